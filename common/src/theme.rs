//! テーマ配色

use crate::types::Theme;

/// テーマごとの色定数 (`#rrggbb`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub sidebar: &'static str,
    pub result_box: &'static str,
    pub text: &'static str,
    /// ボタン・信頼度バーの強調色（両テーマ共通）
    pub accent: &'static str,
}

const ACCENT: &str = "#ffb347";

const LIGHT: Palette = Palette {
    background: "#e6f2ff",
    sidebar: "#f8f9fa",
    result_box: "#d4edda",
    text: "#222222",
    accent: ACCENT,
};

const DARK: Palette = Palette {
    background: "#18191a",
    sidebar: "#242526",
    result_box: "#23272b",
    text: "#f0f2f6",
    accent: ACCENT,
};

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}

/// `#rrggbb` / `#rgb` を RGB に変換
pub fn hex_to_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.is_ascii() {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
