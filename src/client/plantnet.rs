//! Pl@ntNet 識別APIクライアント
//!
//! 画像1枚をmultipartで送信し、候補リストをサーバーの順位のまま返す。
//! パースは flower_id_common::parse_identify_response に任せる。

use crate::error::{FlowerIdError, Result};
use flower_id_common::{parse_identify_response, RecognitionResult};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// multipartのフィールド名
const IMAGE_FIELD: &str = "images";
const UPLOAD_FILE_NAME: &str = "image.jpg";
const UPLOAD_MIME: &str = "image/jpeg";

pub struct RecognitionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RecognitionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            http: super::build_http(timeout)?,
            endpoint: endpoint.into(),
        })
    }

    /// 画像を識別する
    ///
    /// - 200 かつ候補あり: サーバー順の候補リスト
    /// - 200 かつ候補なし: 空のVec（呼び出し側で「識別失敗」として扱う）
    /// - 200 以外: `FlowerIdError::Recognition`
    ///
    /// リトライはしない。
    pub async fn identify(
        &self,
        image_bytes: &[u8],
        language_code: &str,
        api_key: &str,
    ) -> Result<Vec<RecognitionResult>> {
        if api_key.trim().is_empty() {
            return Err(FlowerIdError::MissingApiKey);
        }

        let part = Part::bytes(image_bytes.to_vec())
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        tracing::debug!(
            endpoint = %self.endpoint,
            lang = language_code,
            bytes = image_bytes.len(),
            "識別リクエスト送信"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("api-key", api_key), ("lang", language_code)])
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if status != 200 {
            tracing::warn!(status, "識別APIがエラーを返しました");
            return Err(FlowerIdError::Recognition { status, body });
        }

        let results = parse_identify_response(&body)
            .map_err(|e| FlowerIdError::ApiParse(e.to_string()))?;

        tracing::debug!(candidates = results.len(), "識別レスポンス受信");
        Ok(results)
    }
}
