//! 識別結果とセッションで使う型定義
//!
//! - RecognitionResult: 識別APIが返す (学名, 信頼度) の組
//! - HistoryEntry: 識別に成功した1回分の履歴
//! - Language / Theme: セッションの表示設定

use serde::{Deserialize, Serialize};

/// 識別APIの1候補
///
/// `confidence` は 0.0〜1.0。並び順はサーバーのランキングのまま保持する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// 学名（命名者付き）
    pub label: String,
    pub confidence: f64,
    /// 命名者なしの学名（百科事典の見出し検索に使う）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_without_author: Option<String>,
}

impl RecognitionResult {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
            name_without_author: None,
        }
    }

    pub fn with_name_without_author(mut self, name: impl Into<String>) -> Self {
        self.name_without_author = Some(name.into());
        self
    }

    /// 説明文検索のキー（命名者なしの学名があればそちら）
    pub fn lookup_name(&self) -> &str {
        self.name_without_author
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.label)
    }

    /// 百分率 (0〜100)
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

/// 識別履歴の1行
///
/// CSVの列名は `file,prediction,confidence`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "file")]
    pub source_file_name: String,

    #[serde(rename = "prediction")]
    pub predicted_label: String,

    #[serde(rename = "confidence")]
    pub confidence_percent: f64,
}

impl HistoryEntry {
    pub fn from_result(file_name: impl Into<String>, result: &RecognitionResult) -> Self {
        Self {
            source_file_name: file_name.into(),
            predicted_label: result.label.clone(),
            confidence_percent: result.confidence_percent(),
        }
    }
}

/// 表示言語
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pl,
}

impl Language {
    /// APIに渡す2文字コード
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pl => "pl",
        }
    }

    /// 言語名（その言語での表記）
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pl => "Polski",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Language::En => Language::Pl,
            Language::Pl => Language::En,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "pl" | "polski" | "polish" => Ok(Language::Pl),
            _ => Err(format!("Unknown language: {}. Use en or pl", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 配色テーマ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(&self) -> Self {
        Self::from_dark_flag(!self.is_dark())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" | "d" => Ok(Theme::Dark),
            "light" | "l" => Ok(Theme::Light),
            _ => Err(format!("Unknown theme: {}. Use dark or light", s)),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}
