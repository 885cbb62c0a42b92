use clap::Parser;
use flower_id::{cli, config, error, export, interaction, render, repl, scanner, session, upload};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use interaction::{Interaction, Outcome};
use render::Renderer;
use session::SessionState;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    // RUST_LOG があればそちらを優先
    let default = if verbose {
        "flower_id=debug,flower_id_common=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let color = !cli.no_color;

    match cli.command {
        Commands::Identify {
            paths,
            lang,
            theme,
            filter,
            history_out,
            gallery_out,
            annotate_out,
            result_out,
            no_describe,
        } => {
            let config = Config::load()?;
            let images = scanner::scan_paths(&paths)?;
            if images.is_empty() {
                let joined = paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(error::FlowerIdError::NoImagesFound(joined));
            }

            let interaction = Interaction::from_config(&config, !no_describe)?;
            let mut session = SessionState::new(
                lang.unwrap_or(config.lang),
                theme.unwrap_or(config.theme),
            );

            println!("{}", Renderer::for_session(&session, color).header());

            for (idx, info) in images.iter().enumerate() {
                println!("[{}/{}] {}", idx + 1, images.len(), info.file_name);

                let upload = match upload::Upload::from_info(info) {
                    Ok(upload) => upload,
                    Err(e) => {
                        println!("✖ {}\n", e);
                        continue;
                    }
                };

                let outcome = interaction.handle_upload(&mut session, upload).await;

                // 状態更新の後で描画
                let renderer = Renderer::for_session(&session, color);
                println!("{}", renderer.outcome(&outcome));

                if let Outcome::Identified { best, file_name, .. } = &outcome {
                    let written = export::write_result_files(
                        best,
                        session.gallery().last().map(|item| &item.image),
                        session.theme(),
                        file_name,
                        result_out.as_deref(),
                        annotate_out.as_deref(),
                    );
                    // 書き出しの失敗は表示だけして次の画像へ進む
                    for w in written {
                        match w {
                            Ok(path) => println!("✔ {}", path.display()),
                            Err(e) => println!("✖ {}", e),
                        }
                    }
                }
            }

            let renderer = Renderer::for_session(&session, color);
            let term = filter.as_deref().unwrap_or("");
            println!("{}", renderer.history(&session.filter_history(term)));
            print!("{}", renderer.gallery(&session));

            if let Some(target) = history_out {
                let path = export::write_history_csv(&session, &target)?;
                println!("✔ {}", path.display());
            }
            if let Some(dir) = gallery_out {
                let written = session.save_gallery(&dir)?;
                println!("✔ {} ({})", dir.display(), written.len());
            }

            println!("\n✅ {}/{}", session.len(), images.len());
        }

        Commands::Session {
            lang,
            theme,
            output,
            no_describe,
        } => {
            let config = Config::load()?;
            let interaction = Interaction::from_config(&config, !no_describe)?;
            let session = SessionState::new(
                lang.unwrap_or(config.lang),
                theme.unwrap_or(config.theme),
            );
            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));

            let session = repl::run_interactive_session(&interaction, session, &output_dir, color).await?;
            tracing::info!(recognized = session.len(), "セッション終了");
        }

        Commands::Config {
            set_api_key,
            set_lang,
            set_theme,
            show,
        } => {
            let mut config = Config::load_or_default()?;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if set_lang.is_some() || set_theme.is_some() {
                if let Some(lang) = set_lang {
                    config.lang = lang;
                }
                if let Some(theme) = set_theme {
                    config.theme = theme;
                }
                config.save()?;
                println!("✔ 表示設定を保存しました");
            }

            if show {
                println!("設定:");
                println!("  言語: {}", config.lang);
                println!("  テーマ: {}", config.theme);
                println!("  識別API: {}", config.identify_url);
                println!("  要約API: {}", config.summary_url);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: 既定"),
                }
                println!(
                    "  APIキー: {}",
                    if config.get_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
