use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowerIdError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`flower-id config --set-api-key YOUR_KEY` で設定するか PLANTNET_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("対応していない画像形式です (jpg/png のみ): {0}")]
    UnsupportedImage(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("識別APIエラー (HTTP {status}): {body}")]
    Recognition { status: u16, body: String },

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] flower_id_common::Error),
}

pub type Result<T> = std::result::Result<T, FlowerIdError>;
