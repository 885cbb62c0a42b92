pub mod plantnet;
pub mod wikipedia;

pub use plantnet::RecognitionClient;
pub use wikipedia::SummaryClient;

use crate::error::Result;
use std::time::Duration;

const USER_AGENT: &str = concat!("flower-id/", env!("CARGO_PKG_VERSION"));

/// タイムアウト未指定ならreqwestの既定値のまま
fn build_http(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
