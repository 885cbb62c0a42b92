//! APIレスポンスパーサー
//!
//! 識別APIと要約APIのJSONを型に変換する。HTTPから切り離した純粋関数なので
//! 単体テストで直接検証できる。

use crate::error::{Error, Result};
use crate::types::RecognitionResult;
use regex::Regex;
use serde::Deserialize;

#[derive(Deserialize)]
struct IdentifyResponse {
    #[serde(default)]
    results: Vec<WireResult>,
}

#[derive(Deserialize)]
struct WireResult {
    score: f64,
    species: WireSpecies,
}

#[derive(Deserialize)]
struct WireSpecies {
    #[serde(rename = "scientificName")]
    scientific_name: String,
    #[serde(rename = "scientificNameWithoutAuthor", default)]
    scientific_name_without_author: Option<String>,
}

#[derive(Deserialize)]
struct SummaryResponse {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    extract: String,
}

/// 識別APIのレスポンスをパース
///
/// `results` が空または欠落している場合は空のVecを返す（エラーではない）。
/// 順序はサーバーのランキングのまま。
///
/// # Examples
/// ```
/// use flower_id_common::parse_identify_response;
///
/// let json = r#"{"results":[{"score":0.9,"species":{"scientificName":"Rosa canina"}}]}"#;
/// let results = parse_identify_response(json).unwrap();
/// assert_eq!(results[0].label, "Rosa canina");
/// ```
pub fn parse_identify_response(json: &str) -> Result<Vec<RecognitionResult>> {
    let response: IdentifyResponse = serde_json::from_str(json)?;

    response
        .results
        .into_iter()
        .map(|r| {
            if !(0.0..=1.0).contains(&r.score) {
                return Err(Error::Parse(format!(
                    "score が範囲外です: {} ({})",
                    r.score, r.species.scientific_name
                )));
            }
            let result = RecognitionResult::new(r.species.scientific_name, r.score);
            Ok(match r.species.scientific_name_without_author {
                Some(name) => result.with_name_without_author(name),
                None => result,
            })
        })
        .collect()
}

/// 要約APIのレスポンスから説明文を取り出す
///
/// 曖昧さ回避ページや本文が空の場合は None。
pub fn parse_summary_response(json: &str, sentences: usize) -> Option<String> {
    let response: SummaryResponse = serde_json::from_str(json).ok()?;

    if response.kind == "disambiguation" {
        return None;
    }

    let summary = first_sentences(&response.extract, sentences);
    if summary.is_empty() {
        None
    } else {
        Some(summary)
    }
}

/// 先頭から `n` 文を取り出す
pub fn first_sentences(text: &str, n: usize) -> String {
    lazy_static::lazy_static! {
        static ref SENTENCE_END: Regex = Regex::new(r"[.!?。](\s+|$)").unwrap();
    }

    let text = text.trim();
    if n == 0 {
        return String::new();
    }

    match SENTENCE_END.find_iter(text).nth(n - 1) {
        Some(m) => text[..m.end()].trim_end().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identify_keeps_server_order() {
        let json = r#"{
            "query": {"project": "all"},
            "results": [
                {"score": 0.12, "species": {"scientificName": "Tulipa gesneriana L."}},
                {"score": 0.85, "species": {"scientificName": "Rosa damascena Mill."}}
            ]
        }"#;
        let results = parse_identify_response(json).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "Tulipa gesneriana L.");
        assert_eq!(results[1].label, "Rosa damascena Mill.");
        assert!((results[0].confidence - 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_parse_identify_reads_name_without_author() {
        let json = r#"{"results":[
            {"score":0.7,"species":{"scientificNameWithoutAuthor":"Rosa damascena","scientificName":"Rosa damascena Mill."}},
            {"score":0.1,"species":{"scientificName":"Rosa gallica L."}}
        ]}"#;
        let results = parse_identify_response(json).unwrap();
        assert_eq!(results[0].label, "Rosa damascena Mill.");
        assert_eq!(results[0].lookup_name(), "Rosa damascena");
        assert_eq!(results[1].name_without_author, None);
        assert_eq!(results[1].lookup_name(), "Rosa gallica L.");
    }

    #[test]
    fn test_parse_identify_empty_results() {
        assert!(parse_identify_response(r#"{"results": []}"#).unwrap().is_empty());
        assert!(parse_identify_response(r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_identify_score_out_of_range() {
        let json = r#"{"results":[{"score":1.5,"species":{"scientificName":"X"}}]}"#;
        let err = parse_identify_response(json).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parse_identify_malformed() {
        let err = parse_identify_response("<html>502</html>").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_parse_summary_standard() {
        let json = r#"{"type":"standard","extract":"Rosa canina is a rose. It climbs. It is common."}"#;
        assert_eq!(
            parse_summary_response(json, 2).as_deref(),
            Some("Rosa canina is a rose. It climbs.")
        );
    }

    #[test]
    fn test_parse_summary_disambiguation() {
        let json = r#"{"type":"disambiguation","extract":"Rosa may refer to:"}"#;
        assert_eq!(parse_summary_response(json, 2), None);
    }

    #[test]
    fn test_parse_summary_empty_or_invalid() {
        assert_eq!(parse_summary_response(r#"{"type":"standard","extract":"  "}"#, 2), None);
        assert_eq!(parse_summary_response("not json", 2), None);
    }

    #[test]
    fn test_first_sentences() {
        assert_eq!(first_sentences("One. Two! Three?", 2), "One. Two!");
        assert_eq!(first_sentences("No terminator", 2), "No terminator");
        assert_eq!(first_sentences("  Only one.  ", 2), "Only one.");
        assert_eq!(first_sentences("Version 1.5 is out. Next.", 1), "Version 1.5 is out.");
        assert_eq!(first_sentences("Anything.", 0), "");
    }
}
