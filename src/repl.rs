//! 対話式セッション
//!
//! メニューから操作を選び、状態を更新したあとで描画する。
//! 識別の失敗はメッセージを出すだけでセッションは続行する。

use crate::error::{FlowerIdError, Result};
use crate::export;
use crate::interaction::{Interaction, Outcome};
use crate::render::Renderer;
use crate::session::SessionState;
use crate::upload::Upload;
use dialoguer::{Input, Select};
use flower_id_common::{RecognitionResult, Texts};
use std::path::{Path, PathBuf};

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Upload,
    FilterHistory,
    ExportHistory,
    DownloadResult,
    DownloadAnnotated,
    SaveGallery,
    ToggleTheme,
    ToggleLanguage,
    Quit,
}

impl SessionAction {
    pub const ALL: [SessionAction; 9] = [
        SessionAction::Upload,
        SessionAction::FilterHistory,
        SessionAction::ExportHistory,
        SessionAction::DownloadResult,
        SessionAction::DownloadAnnotated,
        SessionAction::SaveGallery,
        SessionAction::ToggleTheme,
        SessionAction::ToggleLanguage,
        SessionAction::Quit,
    ];

    pub fn label(&self, t: &Texts) -> &'static str {
        match self {
            SessionAction::Upload => t.upload_text,
            SessionAction::FilterHistory => t.filter_history,
            SessionAction::ExportHistory => t.download_history,
            SessionAction::DownloadResult => t.download_result,
            SessionAction::DownloadAnnotated => t.download_annotated,
            SessionAction::SaveGallery => t.save_gallery,
            SessionAction::ToggleTheme => t.dark_mode,
            SessionAction::ToggleLanguage => t.lang_checkbox,
            SessionAction::Quit => t.quit,
        }
    }

    /// 履歴がないと意味のない操作
    pub fn needs_history(&self) -> bool {
        matches!(
            self,
            SessionAction::FilterHistory
                | SessionAction::ExportHistory
                | SessionAction::DownloadResult
                | SessionAction::DownloadAnnotated
                | SessionAction::SaveGallery
        )
    }
}

/// 今の状態で選べる操作
pub fn available_actions(session: &SessionState) -> Vec<SessionAction> {
    SessionAction::ALL
        .into_iter()
        .filter(|a| !a.needs_history() || !session.is_empty())
        .collect()
}

fn prompt_err(e: dialoguer::Error) -> FlowerIdError {
    FlowerIdError::Prompt(e.to_string())
}

fn prompt_text(prompt: &str, allow_empty: bool) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(prompt_err)
}

fn prompt_output(prompt: &str, default: &Path) -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.display().to_string())
        .interact_text()
        .map_err(prompt_err)?;
    Ok(PathBuf::from(input.trim()))
}

/// 書き出し系の操作を実行し、書き出し先の表示を返す
///
/// 書き出す対象がまだなければ `Ok(None)`。
fn run_download(
    action: SessionAction,
    session: &SessionState,
    last_best: Option<&RecognitionResult>,
    target: &Path,
) -> Result<Option<String>> {
    let latest = session.history().last();
    let written = match (action, last_best, latest) {
        (SessionAction::ExportHistory, _, _) => export::write_history_csv(session, target)?.display().to_string(),
        (SessionAction::DownloadResult, Some(best), Some(entry)) => {
            export::write_result_text(best, &entry.source_file_name, target)?
                .display()
                .to_string()
        }
        (SessionAction::DownloadAnnotated, Some(best), Some(entry)) => {
            let Some(item) = session.gallery().last() else {
                return Ok(None);
            };
            export::write_annotated(&item.image, best, session.theme(), &entry.source_file_name, target)?
                .display()
                .to_string()
        }
        (SessionAction::SaveGallery, _, _) => {
            let paths = session.save_gallery(target)?;
            format!("{} ({})", target.display(), paths.len())
        }
        _ => return Ok(None),
    };
    Ok(Some(written))
}

/// 対話式セッションを実行
pub async fn run_interactive_session(
    interaction: &Interaction,
    mut session: SessionState,
    output_dir: &Path,
    color: bool,
) -> Result<SessionState> {
    println!("{}", Renderer::for_session(&session, color).header());

    // 最後に識別した結果（結果テキスト・注釈画像用）
    let mut last_best: Option<RecognitionResult> = None;

    loop {
        let renderer = Renderer::for_session(&session, color);
        let t = flower_id_common::texts(session.language());
        let actions = available_actions(&session);
        let labels: Vec<&str> = actions.iter().map(|a| a.label(t)).collect();

        let choice = Select::new()
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_err)?;

        match actions[choice] {
            SessionAction::Upload => {
                let input = prompt_text(t.upload_text, false)?;
                let upload = match Upload::load(Path::new(input.trim())) {
                    Ok(upload) => upload,
                    Err(e) => {
                        println!("✖ {}", e);
                        continue;
                    }
                };

                let outcome = interaction.handle_upload(&mut session, upload).await;
                if let Outcome::Failed { error, .. } = &outcome {
                    tracing::debug!(error = %error, "アップロード処理失敗");
                }
                if let Outcome::Identified { best, .. } = &outcome {
                    last_best = Some(best.clone());
                }

                println!("{}", renderer.outcome(&outcome));
                println!("{}", renderer.history(&session.filter_history("")));
                print!("{}", renderer.gallery(&session));
            }
            SessionAction::FilterHistory => {
                let term = prompt_text(t.filter_history, true)?;
                println!("{}", renderer.history(&session.filter_history(&term)));
            }
            action @ (SessionAction::ExportHistory
            | SessionAction::DownloadResult
            | SessionAction::DownloadAnnotated
            | SessionAction::SaveGallery) => {
                let target = match action {
                    SessionAction::ExportHistory => {
                        prompt_output(t.download_history, &output_dir.join(export::HISTORY_FILE_NAME))?
                    }
                    SessionAction::SaveGallery => prompt_output(t.save_gallery, &output_dir.join("gallery"))?,
                    _ => output_dir.to_path_buf(),
                };
                // 書き出しの失敗は表示だけしてセッションを続ける
                match run_download(action, &session, last_best.as_ref(), &target) {
                    Ok(Some(written)) => println!("✔ {}", written),
                    Ok(None) => {}
                    Err(e) => println!("✖ {}", e),
                }
            }
            SessionAction::ToggleTheme => {
                session.set_theme(session.theme().toggled());
                println!("→ {}", session.theme());
            }
            SessionAction::ToggleLanguage => {
                session.set_language(session.language().toggled());
                let t = flower_id_common::texts(session.language());
                println!("→ {}: {}", t.language, session.language().native_name());
            }
            SessionAction::Quit => break,
        }
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flower_id_common::{texts, Language};
    use image::{DynamicImage, RgbImage};
    use tempfile::tempdir;

    fn recognized_session() -> SessionState {
        let mut session = SessionState::default();
        session.record_result(
            "rose.jpg",
            &RecognitionResult::new("Rosa canina", 0.6),
            DynamicImage::ImageRgb8(RgbImage::new(4, 4)),
        );
        session
    }

    #[test]
    fn test_empty_session_hides_history_actions() {
        let session = SessionState::default();
        let actions = available_actions(&session);
        assert_eq!(
            actions,
            vec![
                SessionAction::Upload,
                SessionAction::ToggleTheme,
                SessionAction::ToggleLanguage,
                SessionAction::Quit,
            ]
        );
    }

    #[test]
    fn test_all_actions_after_recognition() {
        let mut session = SessionState::default();
        session.record_result(
            "a.jpg",
            &RecognitionResult::new("A", 0.4),
            DynamicImage::ImageRgb8(RgbImage::new(1, 1)),
        );
        assert_eq!(available_actions(&session).len(), SessionAction::ALL.len());
    }

    #[test]
    fn test_labels_follow_language() {
        assert_eq!(SessionAction::Quit.label(texts(Language::En)), "Quit");
        assert_eq!(SessionAction::Quit.label(texts(Language::Pl)), "Zakończ");
        assert_eq!(
            SessionAction::ExportHistory.label(texts(Language::En)),
            "Download history (CSV)"
        );
    }

    #[test]
    fn test_download_failure_keeps_session() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let target = blocker.join("nested");
        let session = recognized_session();
        let best = RecognitionResult::new("Rosa canina", 0.6);

        for action in [
            SessionAction::ExportHistory,
            SessionAction::DownloadResult,
            SessionAction::DownloadAnnotated,
            SessionAction::SaveGallery,
        ] {
            let err = run_download(action, &session, Some(&best), &target).unwrap_err();
            assert!(matches!(err, FlowerIdError::Io(_)), "{:?}: {:?}", action, err);
        }

        // 失敗の後も状態はそのまま使える
        assert_eq!(session.len(), 1);
        assert_eq!(session.gallery().len(), 1);
        let written = run_download(SessionAction::ExportHistory, &session, Some(&best), dir.path())
            .unwrap()
            .unwrap();
        assert!(written.ends_with(export::HISTORY_FILE_NAME));
    }

    #[test]
    fn test_download_without_result_is_skipped() {
        let dir = tempdir().unwrap();
        let session = recognized_session();
        assert_eq!(run_download(SessionAction::DownloadResult, &session, None, dir.path()).unwrap(), None);
        assert_eq!(run_download(SessionAction::ToggleTheme, &session, None, dir.path()).unwrap(), None);
    }
}
