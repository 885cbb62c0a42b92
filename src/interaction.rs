//! 1回のアップロードを処理する
//!
//! 識別 → 説明文取得 → セッションへ記録 の順に逐次実行し、結果を
//! `Outcome` として返す。描画は呼び出し側が状態更新の後に別ステップで行う。

use crate::client::{RecognitionClient, SummaryClient};
use crate::config::Config;
use crate::error::{FlowerIdError, Result};
use crate::session::SessionState;
use crate::upload::Upload;
use flower_id_common::RecognitionResult;
use std::time::Duration;

/// 表に出す上位候補の数
pub const TOP_CANDIDATES: usize = 3;

/// アップロード1件の処理結果
#[derive(Debug)]
pub enum Outcome {
    /// 識別成功（セッションに記録済み）
    Identified {
        file_name: String,
        best: RecognitionResult,
        top: Vec<RecognitionResult>,
        description: Option<String>,
    },
    /// APIは成功したが候補なし
    NoMatch { file_name: String },
    /// 送信・API・エンコードの失敗
    Failed { file_name: String, error: FlowerIdError },
}

pub struct Interaction {
    recognizer: RecognitionClient,
    summaries: Option<SummaryClient>,
    api_key: String,
}

impl Interaction {
    pub fn new(recognizer: RecognitionClient, summaries: Option<SummaryClient>, api_key: String) -> Self {
        Self {
            recognizer,
            summaries,
            api_key,
        }
    }

    /// 設定からクライアントを組み立てる（`describe` が false なら説明文を取得しない）
    pub fn from_config(config: &Config, describe: bool) -> Result<Self> {
        let api_key = config.get_api_key()?;
        let timeout = config.timeout_seconds.map(Duration::from_secs);

        let recognizer = RecognitionClient::new(config.identify_url.clone(), timeout)?;
        let summaries = if describe {
            Some(SummaryClient::new(config.summary_url.clone(), timeout)?)
        } else {
            None
        };

        Ok(Self::new(recognizer, summaries, api_key))
    }

    /// アップロード1件を処理する
    ///
    /// 失敗してもセッション状態には一切触れない。
    pub async fn handle_upload(&self, session: &mut SessionState, upload: Upload) -> Outcome {
        let file_name = upload.file_name.clone();
        let lang = session.language().code();

        let jpeg = match upload.to_jpeg() {
            Ok(bytes) => bytes,
            Err(error) => return Outcome::Failed { file_name, error },
        };

        let results = match self.recognizer.identify(&jpeg, lang, &self.api_key).await {
            Ok(results) => results,
            Err(error) => {
                tracing::warn!(file = %file_name, error = %error, "識別に失敗");
                return Outcome::Failed { file_name, error };
            }
        };

        let Some(best) = results.first().cloned() else {
            tracing::info!(file = %file_name, "候補なし");
            return Outcome::NoMatch { file_name };
        };

        let description = match &self.summaries {
            Some(client) => client.describe(best.lookup_name(), lang).await,
            None => None,
        };

        session.record_result(&file_name, &best, upload.image);
        tracing::info!(
            file = %file_name,
            label = %best.label,
            confidence = best.confidence,
            "識別結果を記録"
        );

        let top = results.into_iter().take(TOP_CANDIDATES).collect();
        Outcome::Identified {
            file_name,
            best,
            top,
            description,
        }
    }
}
