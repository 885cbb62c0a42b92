//! flower-id Common Library
//!
//! 識別結果の型、文字列テーブル、配色、APIレスポンスのパース、履歴の検索とCSV出力

pub mod error;
pub mod history;
pub mod i18n;
pub mod parser;
pub mod theme;
pub mod types;

pub use error::{Error, Result};
pub use history::{filter_entries, from_csv, to_csv, CSV_HEADER};
pub use i18n::{texts, Texts};
pub use parser::{first_sentences, parse_identify_response, parse_summary_response};
pub use theme::{hex_to_rgb, palette, Palette};
pub use types::{HistoryEntry, Language, RecognitionResult, Theme};
