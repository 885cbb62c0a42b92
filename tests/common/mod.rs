//! 統合テスト用ヘルパー
//!
//! 識別APIと要約APIの代わりにローカルのaxumサーバーを立てる。

#![allow(dead_code)]

use axum::Router;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// 空きポートでサーバーを起動し、ベースURLを返す
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    format!("http://{}", addr)
}

/// 接続を拒否されるURL
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// テスト用の小さなPNG
pub fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(12, 8, Rgb([220, 60, 120]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("png encode failed");
    buf
}

/// 識別APIのレスポンスJSON
///
/// 命名者なしの学名は先頭2語（属名と種小名）とする。
pub fn identify_body(results: &[(&str, f64)]) -> String {
    let results: Vec<serde_json::Value> = results
        .iter()
        .map(|(name, score)| {
            let without_author = name.split_whitespace().take(2).collect::<Vec<_>>().join(" ");
            serde_json::json!({
                "score": score,
                "species": {
                    "scientificNameWithoutAuthor": without_author,
                    "scientificName": name,
                }
            })
        })
        .collect();
    serde_json::json!({ "query": { "project": "all" }, "results": results }).to_string()
}
