//! ダウンロード用ファイルの書き出し
//!
//! - 履歴CSV (`flower_history.csv`)
//! - 単一結果テキスト (`{stem}_result.txt`)
//! - 注釈付き画像 (`{stem}_annotated.jpg`)

use crate::annotate::annotate;
use crate::error::{FlowerIdError, Result};
use crate::render::result_text;
use crate::session::SessionState;
use flower_id_common::{RecognitionResult, Theme};
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};

pub const HISTORY_FILE_NAME: &str = "flower_history.csv";

/// 出力先がディレクトリ（または拡張子なし）なら既定ファイル名を付ける
fn output_path_for(output: &Path, default_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_name)
    } else {
        output.to_path_buf()
    }
}

fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "flower".to_string())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// 全履歴をCSVで保存
pub fn write_history_csv(session: &SessionState, output: &Path) -> Result<PathBuf> {
    let path = output_path_for(output, HISTORY_FILE_NAME);
    ensure_parent(&path)?;
    std::fs::write(&path, session.export_history_csv()?)?;
    Ok(path)
}

/// 結果テキストを保存
pub fn write_result_text(result: &RecognitionResult, source_file_name: &str, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_result.txt", file_stem(source_file_name)));
    std::fs::write(&path, result_text(result))?;
    Ok(path)
}

/// 注釈付き画像を保存
pub fn write_annotated(
    image: &DynamicImage,
    result: &RecognitionResult,
    theme: Theme,
    source_file_name: &str,
    dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_annotated.jpg", file_stem(source_file_name)));
    annotate(image, result, theme)
        .save_with_format(&path, ImageFormat::Jpeg)
        .map_err(|e| FlowerIdError::ImageLoad(format!("注釈画像の保存に失敗: {}", e)))?;
    Ok(path)
}

/// 識別1件ぶんの結果テキストと注釈画像を書き出す
///
/// 出力先が指定されたものだけ書く。片方が失敗してももう片方は書く。
pub fn write_result_files(
    result: &RecognitionResult,
    image: Option<&DynamicImage>,
    theme: Theme,
    source_file_name: &str,
    result_dir: Option<&Path>,
    annotate_dir: Option<&Path>,
) -> Vec<Result<PathBuf>> {
    let mut written = Vec::new();
    if let Some(dir) = result_dir {
        written.push(write_result_text(result, source_file_name, dir));
    }
    if let (Some(dir), Some(image)) = (annotate_dir, image) {
        written.push(write_annotated(image, result, theme, source_file_name, dir));
    }
    written
}
