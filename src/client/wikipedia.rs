//! Wikipedia 要約の取得（ベストエフォート）
//!
//! 失敗はすべて None に落とす。識別結果の記録を妨げない。

use crate::error::{FlowerIdError, Result};
use flower_id_common::parse_summary_response;
use reqwest::Url;
use std::time::Duration;

/// 説明文として残す文の数
pub const SUMMARY_SENTENCES: usize = 2;

pub struct SummaryClient {
    http: reqwest::Client,
    /// `{lang}` を言語コードに置換して使うURLテンプレート
    url_template: String,
}

impl SummaryClient {
    pub fn new(url_template: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            http: super::build_http(timeout)?,
            url_template: url_template.into(),
        })
    }

    /// 学名の説明文を取得する
    pub async fn describe(&self, label: &str, language_code: &str) -> Option<String> {
        match self.fetch(label, language_code).await {
            Ok(Some(summary)) => Some(summary),
            Ok(None) => {
                tracing::debug!(label, lang = language_code, "説明文なし");
                None
            }
            Err(e) => {
                tracing::debug!(label, lang = language_code, error = %e, "説明文の取得に失敗");
                None
            }
        }
    }

    /// 要約ページのURL（学名の空白はアンダースコアに置換）
    pub fn summary_url(&self, label: &str, language_code: &str) -> Result<Url> {
        let base = self.url_template.replace("{lang}", language_code);
        let mut url = Url::parse(&base)
            .map_err(|e| FlowerIdError::Config(format!("要約URLが不正です: {}: {}", base, e)))?;

        let title = label.trim().replace(' ', "_");
        url.path_segments_mut()
            .map_err(|_| FlowerIdError::Config(format!("要約URLが不正です: {}", base)))?
            .pop_if_empty()
            .push(&title);

        Ok(url)
    }

    async fn fetch(&self, label: &str, language_code: &str) -> Result<Option<String>> {
        if label.trim().is_empty() {
            return Ok(None);
        }

        let url = self.summary_url(label, language_code)?;
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            tracing::debug!(status = response.status().as_u16(), "要約APIが見つかりませんでした");
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(parse_summary_response(&body, SUMMARY_SENTENCES))
    }
}
