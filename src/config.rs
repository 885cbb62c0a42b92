use crate::error::{FlowerIdError, Result};
use flower_id_common::{Language, Theme};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "PLANTNET_API_KEY";
pub const DEFAULT_IDENTIFY_URL: &str = "https://my-api.plantnet.org/v2/identify/all";
/// `{lang}` は言語コードに置換される
pub const DEFAULT_SUMMARY_URL: &str = "https://{lang}.wikipedia.org/api/rest_v1/page/summary/";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub lang: Language,
    pub theme: Theme,
    pub identify_url: String,
    pub summary_url: String,
    /// 未設定ならHTTPクライアントの既定値に従う
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            lang: Language::default(),
            theme: Theme::default(),
            identify_url: DEFAULT_IDENTIFY_URL.into(),
            summary_url: DEFAULT_SUMMARY_URL.into(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 壊れた設定ファイルでも既定値で続行する（`config` サブコマンドで上書き修復するため）
    pub fn load_or_default() -> Result<Self> {
        Ok(Self::load_or_default_from(&Self::config_path()?))
    }

    pub fn load_or_default_from(config_path: &std::path::Path) -> Self {
        Self::load_from(config_path).unwrap_or_else(|e| {
            tracing::warn!(path = %config_path.display(), error = %e, "設定ファイルを読めないため既定値を使います");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FlowerIdError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("flower-id").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(FlowerIdError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config.identify_url, DEFAULT_IDENTIFY_URL);
        assert_eq!(config.lang, Language::En);
        assert_eq!(config.theme, Theme::Dark);
        assert!(config.timeout_seconds.is_none());
    }

    #[test]
    fn test_broken_file_can_be_repaired() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Config::load_from(&path).is_err());

        let mut config = Config::load_or_default_from(&path);
        assert_eq!(config.identify_url, DEFAULT_IDENTIFY_URL);
        config.lang = Language::Pl;
        config.save_to(&path).unwrap();

        let repaired = Config::load_from(&path).unwrap();
        assert_eq!(repaired.lang, Language::Pl);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_key: Some("secret".into()),
            lang: Language::Pl,
            theme: Theme::Light,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("secret"));
        assert_eq!(loaded.lang, Language::Pl);
        assert_eq!(loaded.theme, Theme::Light);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"lang":"pl"}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.lang, Language::Pl);
        assert_eq!(loaded.summary_url, DEFAULT_SUMMARY_URL);
    }
}
