use clap::{Parser, Subcommand};
use flower_id_common::{Language, Theme};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flower-id")]
#[command(about = "花の写真から種を識別するツール (Pl@ntNet)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 色付き出力を無効化
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真（またはフォルダ）を識別して結果と履歴を表示
    Identify {
        /// 写真ファイルまたはフォルダ（jpg/png）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 表示言語 (en/pl)
        #[arg(short, long)]
        lang: Option<Language>,

        /// テーマ (dark/light)
        #[arg(long)]
        theme: Option<Theme>,

        /// 履歴の絞り込み（ファイル名または学名）
        #[arg(short, long)]
        filter: Option<String>,

        /// 履歴CSVの出力先
        #[arg(long)]
        history_out: Option<PathBuf>,

        /// ギャラリー画像の出力フォルダ
        #[arg(long)]
        gallery_out: Option<PathBuf>,

        /// 注釈付き画像の出力フォルダ
        #[arg(long)]
        annotate_out: Option<PathBuf>,

        /// 結果テキストの出力フォルダ
        #[arg(long)]
        result_out: Option<PathBuf>,

        /// Wikipediaの説明文を取得しない
        #[arg(long)]
        no_describe: bool,
    },

    /// 対話式セッションを開始
    Session {
        /// 表示言語 (en/pl)
        #[arg(short, long)]
        lang: Option<Language>,

        /// テーマ (dark/light)
        #[arg(long)]
        theme: Option<Theme>,

        /// ダウンロードファイルの出力先（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wikipediaの説明文を取得しない
        #[arg(long)]
        no_describe: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 既定の表示言語を設定
        #[arg(long)]
        set_lang: Option<Language>,

        /// 既定のテーマを設定
        #[arg(long)]
        set_theme: Option<Theme>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identify() {
        let cli = Cli::try_parse_from([
            "flower-id", "identify", "rose.jpg", "photos", "--lang", "pl", "--filter", "ros",
        ])
        .unwrap();
        match cli.command {
            Commands::Identify { paths, lang, filter, no_describe, .. } => {
                assert_eq!(paths.len(), 2);
                assert_eq!(lang, Some(Language::Pl));
                assert_eq!(filter.as_deref(), Some("ros"));
                assert!(!no_describe);
            }
            _ => panic!("identify として解析されていない"),
        }
    }

    #[test]
    fn test_identify_requires_path() {
        assert!(Cli::try_parse_from(["flower-id", "identify"]).is_err());
    }

    #[test]
    fn test_invalid_theme_rejected() {
        assert!(Cli::try_parse_from(["flower-id", "session", "--theme", "blue"]).is_err());
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::try_parse_from(["flower-id", "config", "--show", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
