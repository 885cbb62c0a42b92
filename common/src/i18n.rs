//! 表示文字列テーブル
//!
//! 言語ごとの固定文字列。ロジックは持たず、表示層から参照されるだけ。

use crate::types::Language;

/// UIラベル一式
#[derive(Debug)]
pub struct Texts {
    pub title: &'static str,
    pub language: &'static str,
    pub dark_mode: &'static str,
    pub lang_checkbox: &'static str,
    pub intro: &'static str,
    pub upload_text: &'static str,
    pub about_text: &'static str,
    pub learn_more: &'static str,
    pub error_message: &'static str,
    pub history_text: &'static str,
    pub filter_history: &'static str,
    pub download_result: &'static str,
    pub download_annotated: &'static str,
    pub download_history: &'static str,
    pub probably: &'static str,
    pub confidence: &'static str,
    pub top_species: &'static str,
    pub species: &'static str,
    pub about: &'static str,
    pub no_description: &'static str,
    pub gallery: &'static str,
    pub empty_history: &'static str,
    pub save_gallery: &'static str,
    pub quit: &'static str,
}

pub const PLANTNET_URL: &str = "https://plantnet.org/";

static EN: Texts = Texts {
    title: "Flower Recognition App",
    language: "Language selected",
    dark_mode: "Dark Mode",
    lang_checkbox: "Polish",
    intro: "Upload a photo of a flower to find out what species it is!",
    upload_text: "Choose a flower photo",
    about_text: "This app uses the PlantNet API to identify flowers and plants. Upload a photo to learn more!",
    learn_more: "Learn more about PlantNet",
    error_message: "Error recognizing the image. Please check your API key or try again.",
    history_text: "Prediction History",
    filter_history: "Filter history (file name or species):",
    download_result: "Download result (text)",
    download_annotated: "Download annotated image",
    download_history: "Download history (CSV)",
    probably: "This is probably a",
    confidence: "Confidence",
    top_species: "Top 3 Species",
    species: "Species",
    about: "About",
    no_description: "No Wikipedia description available for this species.",
    gallery: "Gallery",
    empty_history: "No predictions yet.",
    save_gallery: "Save gallery",
    quit: "Quit",
};

static PL: Texts = Texts {
    title: "Aplikacja do rozpoznawania kwiatów",
    language: "Wybrany język",
    dark_mode: "Ciemny motyw",
    lang_checkbox: "Polski",
    intro: "Prześlij zdjęcie kwiatu, aby dowiedzieć się, jaki to gatunek!",
    upload_text: "Wybierz zdjęcie kwiatu",
    about_text: "Aplikacja używa PlantNet API do identyfikacji kwiatów i roślin. Prześlij zdjęcie, aby dowiedzieć się więcej!",
    learn_more: "Dowiedz się więcej o PlantNet",
    error_message: "Błąd rozpoznawania obrazu. Sprawdź klucz API lub spróbuj ponownie.",
    history_text: "Historia rozpoznań",
    filter_history: "Filtruj historię (nazwa pliku lub gatunek):",
    download_result: "Pobierz wynik (tekst)",
    download_annotated: "Pobierz zdjęcie z adnotacją",
    download_history: "Pobierz historię (CSV)",
    probably: "To prawdopodobnie",
    confidence: "Pewność",
    top_species: "Top 3 gatunki",
    species: "Gatunek",
    about: "O gatunku",
    no_description: "Brak opisu w Wikipedii dla tego gatunku.",
    gallery: "Galeria",
    empty_history: "Brak rozpoznań.",
    save_gallery: "Zapisz galerię",
    quit: "Zakończ",
};

/// 言語に対応する文字列テーブルを返す
pub fn texts(lang: Language) -> &'static Texts {
    match lang {
        Language::En => &EN,
        Language::Pl => &PL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texts_per_language() {
        assert_eq!(texts(Language::En).title, "Flower Recognition App");
        assert_eq!(texts(Language::Pl).title, "Aplikacja do rozpoznawania kwiatów");
    }

    #[test]
    fn test_error_message_differs() {
        assert_ne!(
            texts(Language::En).error_message,
            texts(Language::Pl).error_message
        );
    }

    #[test]
    fn test_no_empty_labels() {
        for lang in [Language::En, Language::Pl] {
            let t = texts(lang);
            for label in [t.title, t.error_message, t.history_text, t.no_description, t.quit] {
                assert!(!label.is_empty());
            }
        }
    }
}
