//! セッション状態
//!
//! 1セッション分の履歴・ギャラリー・表示設定を1つの値で所有する。
//! セッション開始時に生成し、終了時に破棄する。履歴とギャラリーは
//! 追記のみで、常に同じ長さを保つ（インデックスで対応）。

use crate::error::Result;
use crate::upload::encode_jpeg;
use flower_id_common::{filter_entries, to_csv, HistoryEntry, Language, RecognitionResult, Theme};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// 識別に成功した画像
#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub image: DynamicImage,
}

#[derive(Debug, Default)]
pub struct SessionState {
    history: Vec<HistoryEntry>,
    gallery: Vec<GalleryItem>,
    language: Language,
    theme: Theme,
}

impl SessionState {
    pub fn new(language: Language, theme: Theme) -> Self {
        Self {
            history: Vec::new(),
            gallery: Vec::new(),
            language,
            theme,
        }
    }

    /// 識別結果を1件記録する（履歴とギャラリーに1件ずつ追加）
    pub fn record_result(&mut self, file_name: &str, result: &RecognitionResult, image: DynamicImage) {
        self.history.push(HistoryEntry::from_result(file_name, result));
        self.gallery.push(GalleryItem { image });
        debug_assert_eq!(self.history.len(), self.gallery.len());
    }

    /// ファイル名・学名で履歴を絞り込む（空なら全件）
    pub fn filter_history(&self, term: &str) -> Vec<&HistoryEntry> {
        filter_entries(&self.history, term)
    }

    /// 全履歴をCSVで出力
    pub fn export_history_csv(&self) -> Result<Vec<u8>> {
        Ok(to_csv(&self.history)?)
    }

    /// ギャラリー画像を `flower_{n}.jpg` として保存
    pub fn save_gallery(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.gallery.len());
        for (idx, item) in self.gallery.iter().enumerate() {
            let path = dir.join(format!("flower_{}.jpg", idx + 1));
            std::fs::write(&path, encode_jpeg(&item.image)?)?;
            written.push(path);
        }
        Ok(written)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn gallery(&self) -> &[GalleryItem] {
        &self.gallery
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
