//! 注釈付き画像
//!
//! 元画像の下端に結果ボックス色の帯を敷き、信頼度に比例した長さの
//! バーを強調色で描く。

use flower_id_common::{hex_to_rgb, palette, RecognitionResult, Theme};
use image::{DynamicImage, Rgb, RgbImage};

/// 帯の高さ = 画像高さ / BAND_RATIO（最低 MIN_BAND px）
const BAND_RATIO: u32 = 12;
const MIN_BAND: u32 = 4;

pub fn annotate(image: &DynamicImage, result: &RecognitionResult, theme: Theme) -> RgbImage {
    let mut canvas = image.to_rgb8();
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return canvas;
    }

    let colors = palette(theme);
    let band_color = Rgb(hex_to_rgb(colors.result_box).unwrap_or([0, 0, 0]));
    let bar_color = Rgb(hex_to_rgb(colors.accent).unwrap_or([255, 255, 255]));

    let band = (height / BAND_RATIO).max(MIN_BAND).min(height);
    let filled = (f64::from(width) * result.confidence.clamp(0.0, 1.0)).round() as u32;

    for y in (height - band)..height {
        for x in 0..width {
            let color = if x < filled { bar_color } else { band_color };
            canvas.put_pixel(x, y, color);
        }
    }

    canvas
}
