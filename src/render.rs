//! ターミナル描画
//!
//! 状態を変更した後に明示的に呼び出す描画ステップ。すべて文字列を返す純粋関数で、
//! 出力は呼び出し側が行う。

use crate::interaction::Outcome;
use crate::session::SessionState;
use flower_id_common::i18n::PLANTNET_URL;
use flower_id_common::{hex_to_rgb, palette, texts, HistoryEntry, Language, Palette, RecognitionResult, Texts, Theme};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

pub struct Renderer {
    language: Language,
    colors: Palette,
    color: bool,
}

impl Renderer {
    pub fn new(language: Language, theme: Theme, color: bool) -> Self {
        Self {
            language,
            colors: palette(theme),
            color,
        }
    }

    pub fn for_session(session: &SessionState, color: bool) -> Self {
        Self::new(session.language(), session.theme(), color)
    }

    fn texts(&self) -> &'static Texts {
        texts(self.language)
    }

    /// 24bit ANSI 前景色で囲む
    fn paint(&self, text: &str, hex: &str) -> String {
        match (self.color, hex_to_rgb(hex)) {
            (true, Some([r, g, b])) => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text),
            _ => text.to_string(),
        }
    }

    /// タイトル・説明・言語表示
    pub fn header(&self) -> String {
        let t = self.texts();
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.paint(&format!("🌼 {}", t.title), self.colors.accent));
        let _ = writeln!(out, "{}", t.intro);
        let _ = writeln!(out, "{}: {}", t.language, self.language.native_name());
        let _ = writeln!(out, "{}", t.about_text);
        let _ = writeln!(out, "{}: {}", t.learn_more, PLANTNET_URL);
        out
    }

    /// アップロード1件の結果
    pub fn outcome(&self, outcome: &Outcome) -> String {
        let t = self.texts();
        match outcome {
            Outcome::Identified {
                best,
                top,
                description,
                ..
            } => {
                let mut out = String::new();
                let _ = writeln!(
                    out,
                    "{}",
                    self.paint(&format!("🌼 {} {}!", t.probably, best.label), self.colors.text)
                );
                let _ = writeln!(out, "{}: {:.2}%", t.confidence, best.confidence_percent());
                let _ = writeln!(out);
                let _ = writeln!(out, "#### {}", t.top_species);
                out.push_str(&self.candidates(top));
                let _ = writeln!(out);
                match description {
                    Some(text) => {
                        let _ = writeln!(out, "{} {}: {}", t.about, best.label, text);
                    }
                    None => {
                        let _ = writeln!(out, "ℹ {}", t.no_description);
                    }
                }
                out
            }
            Outcome::NoMatch { .. } | Outcome::Failed { .. } => {
                format!("✖ {}\n", t.error_message)
            }
        }
    }

    /// 上位候補の表と信頼度バー
    pub fn candidates(&self, top: &[RecognitionResult]) -> String {
        let t = self.texts();
        let width = top
            .iter()
            .map(|r| r.label.chars().count())
            .chain(std::iter::once(t.species.chars().count()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "  {:<width$}  {:>10}", t.species, t.confidence, width = width);
        for r in top {
            let bar = confidence_bar(r.confidence, BAR_WIDTH);
            let _ = writeln!(
                out,
                "  {:<width$}  {:>9.2}%  {}",
                r.label,
                r.confidence_percent(),
                self.paint(&bar, self.colors.accent),
                width = width
            );
        }
        out
    }

    /// 履歴表（絞り込み済みの行を受け取る）
    pub fn history(&self, entries: &[&HistoryEntry]) -> String {
        let t = self.texts();
        let mut out = String::new();
        let _ = writeln!(out, "### 📝 {}", t.history_text);

        if entries.is_empty() {
            let _ = writeln!(out, "{}", t.empty_history);
            return out;
        }

        let file_width = entries
            .iter()
            .map(|e| e.source_file_name.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);
        let label_width = entries
            .iter()
            .map(|e| e.predicted_label.chars().count())
            .max()
            .unwrap_or(0)
            .max(10);

        let _ = writeln!(
            out,
            "  {:<fw$}  {:<lw$}  {:>10}",
            "file",
            "prediction",
            "confidence",
            fw = file_width,
            lw = label_width
        );
        for e in entries {
            let _ = writeln!(
                out,
                "  {:<fw$}  {:<lw$}  {:>9.2}%",
                e.source_file_name,
                e.predicted_label,
                e.confidence_percent,
                fw = file_width,
                lw = label_width
            );
        }
        out
    }

    /// ギャラリー一覧（`#n` は1始まり、履歴と同じ順）
    pub fn gallery(&self, session: &SessionState) -> String {
        let t = self.texts();
        let mut out = String::new();
        if session.gallery().is_empty() {
            return out;
        }

        let _ = writeln!(out, "### 🌸 {}", t.gallery);
        for (idx, (item, entry)) in session.gallery().iter().zip(session.history()).enumerate() {
            let _ = writeln!(
                out,
                "  #{:<3} {}x{}  {}",
                idx + 1,
                item.image.width(),
                item.image.height(),
                entry.source_file_name
            );
        }
        out
    }
}

/// 単一結果のテキスト出力
pub fn result_text(result: &RecognitionResult) -> String {
    format!(
        "Species: {}\nConfidence: {:.2}",
        result.label,
        result.confidence_percent()
    )
}

/// 信頼度 (0〜1) をブロック文字のバーにする
pub fn confidence_bar(confidence: f64, width: usize) -> String {
    let filled = (confidence.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}
