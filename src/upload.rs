//! アップロード画像の受け付け
//!
//! jpg/png のみ受け付け、デコードした画像を保持する。
//! 識別APIへはJPEGに再エンコードして送る。

use crate::error::{FlowerIdError, Result};
use crate::scanner::{is_image_path, ImageInfo};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// デコード済みのアップロード画像
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub image: DynamicImage,
}

impl Upload {
    /// ファイルから読み込む
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(FlowerIdError::FileNotFound(path.display().to_string()));
        }
        if !is_image_path(path) {
            return Err(FlowerIdError::UnsupportedImage(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::from_bytes(file_name, &bytes)
    }

    pub fn from_info(info: &ImageInfo) -> Result<Self> {
        Self::load(&info.path)
    }

    /// メモリ上のバイト列から読み込む（jpg/png のみ）
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let file_name = file_name.into();

        let format = image::guess_format(bytes)
            .map_err(|e| FlowerIdError::ImageLoad(format!("{}: {}", file_name, e)))?;
        if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
            return Err(FlowerIdError::UnsupportedImage(file_name));
        }

        let image = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| FlowerIdError::ImageLoad(format!("{}: {}", file_name, e)))?;

        Ok(Self { file_name, image })
    }

    /// 送信用JPEGバイト列
    pub fn to_jpeg(&self) -> Result<Vec<u8>> {
        encode_jpeg(&self.image)
    }
}

/// JPEGにエンコード（アルファは捨てる）
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buffer = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .map_err(|e| FlowerIdError::ImageLoad(format!("JPEGエンコード失敗: {}", e)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(8, 6, Rgba([200, 40, 90, 128]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_from_bytes_png() {
        let upload = Upload::from_bytes("rose.png", &png_bytes()).unwrap();
        assert_eq!(upload.file_name, "rose.png");
        assert_eq!(upload.image.width(), 8);
        assert_eq!(upload.image.height(), 6);
    }

    #[test]
    fn test_png_with_alpha_encodes_to_jpeg() {
        let upload = Upload::from_bytes("rose.png", &png_bytes()).unwrap();
        let jpeg = upload.to_jpeg().unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_from_bytes_rejects_gif() {
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
        let result = Upload::from_bytes("anim.jpg", gif);
        assert!(matches!(result, Err(FlowerIdError::UnsupportedImage(_))));
    }

    #[test]
    fn test_from_bytes_garbage() {
        let result = Upload::from_bytes("broken.jpg", b"not an image");
        assert!(matches!(result, Err(FlowerIdError::ImageLoad(_))));
    }

    #[test]
    fn test_load_checks_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rose.bmp");
        std::fs::write(&path, png_bytes()).unwrap();
        assert!(matches!(Upload::load(&path), Err(FlowerIdError::UnsupportedImage(_))));

        let path = dir.path().join("rose.png");
        std::fs::write(&path, png_bytes()).unwrap();
        let upload = Upload::load(&path).unwrap();
        assert_eq!(upload.file_name, "rose.png");
    }
}
