//! 識別履歴の検索とCSV入出力

use crate::error::Result;
use crate::types::HistoryEntry;

/// CSVヘッダー（列順固定）
pub const CSV_HEADER: [&str; 3] = ["file", "prediction", "confidence"];

/// ファイル名または学名に部分一致する履歴を返す
///
/// 大文字小文字は区別しない。検索語が空なら全件。元の順序を保つ。
pub fn filter_entries<'a>(entries: &'a [HistoryEntry], term: &str) -> Vec<&'a HistoryEntry> {
    // 空白だけの検索語は空と同じ扱い。それ以外は前後の空白も含めて照合する
    if term.trim().is_empty() {
        return entries.iter().collect();
    }
    let needle = term.to_lowercase();

    entries
        .iter()
        .filter(|e| {
            e.source_file_name.to_lowercase().contains(&needle)
                || e.predicted_label.to_lowercase().contains(&needle)
        })
        .collect()
}

/// 履歴をCSVバイト列に変換（ヘッダー行あり）
pub fn to_csv<'a, I>(entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // 空の履歴でもヘッダーは出力する
    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        writer.serialize(entry)?;
    }

    writer
        .into_inner()
        .map_err(|e| crate::error::Error::Io(e.into_error()))
}

/// CSVバイト列から履歴を復元
pub fn from_csv(data: &[u8]) -> Result<Vec<HistoryEntry>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut entries = Vec::new();
    for record in reader.deserialize() {
        entries.push(record?);
    }
    Ok(entries)
}
