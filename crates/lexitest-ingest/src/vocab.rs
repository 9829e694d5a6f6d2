//! Vocabulary CSV import.

use std::io::Read;

use anyhow::{Context, Result};

use crate::columns::{ColumnMap, FieldSpec};
use crate::ImportReport;

/// Column aliases accepted in vocabulary sheets, in priority order.
const VOCAB_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("hanzi", &["中文", "zh", "ZH"]),
    FieldSpec::new("pinyin", &["拼音", "pinyin", "Pinyin"]),
    FieldSpec::new("meaning", &["越南语", "vi", "VI", "Tiếng Việt"]),
    FieldSpec::new("audio", &["audio_url", "audio"]),
    FieldSpec::new("tag", &["source_tag", "Source Tag", "unit", "Unit", "Bài"]),
];

/// One parsed vocabulary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabRow {
    pub hanzi: String,
    pub pinyin: String,
    pub meaning: String,
    pub audio: Option<String>,
    pub tag: Option<String>,
}

/// Parse a vocabulary CSV.
///
/// Rows missing all of hanzi/pinyin/meaning are skipped with a row-level
/// diagnostic; a row with any of the three present is imported as-is.
pub fn parse_vocab_csv<R: Read>(input: R) -> Result<(Vec<VocabRow>, ImportReport)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .context("failed to read vocabulary CSV headers")?
        .clone();
    let columns = ColumnMap::resolve(&headers, VOCAB_FIELDS);

    let mut rows = Vec::new();
    let mut report = ImportReport::default();

    for (i, record) in reader.records().enumerate() {
        report.total += 1;

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                report.skipped += 1;
                report.row_error(i, e);
                continue;
            }
        };

        let hanzi = columns.value(&record, "hanzi");
        let pinyin = columns.value(&record, "pinyin");
        let meaning = columns.value(&record, "meaning");

        if hanzi.is_empty() && pinyin.is_empty() && meaning.is_empty() {
            report.skipped += 1;
            report.row_error(i, "skipped: no hanzi, pinyin, or meaning");
            continue;
        }

        rows.push(VocabRow {
            hanzi,
            pinyin,
            meaning,
            audio: columns.get(&record, "audio").map(str::to_string),
            tag: columns.get(&record, "tag").map(str::to_string),
        });
        report.imported += 1;
    }

    Ok((rows, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chinese_headers() {
        let csv = "中文,拼音,越南语,source_tag\n你好,nǐ hǎo,xin chào,bai-1\n谢谢,xiè xie,cảm ơn,\n";
        let (rows, report) = parse_vocab_csv(csv.as_bytes()).unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(report.imported, 2);
        assert!(report.errors.is_empty());

        assert_eq!(rows[0].hanzi, "你好");
        assert_eq!(rows[0].tag.as_deref(), Some("bai-1"));
        assert!(rows[1].tag.is_none());
    }

    #[test]
    fn parses_ascii_alias_headers() {
        let csv = "zh,pinyin,vi\n水,shuǐ,nước\n";
        let (rows, _) = parse_vocab_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].hanzi, "水");
        assert_eq!(rows[0].meaning, "nước");
    }

    #[test]
    fn skips_rows_with_no_content() {
        let csv = "zh,pinyin,vi\n,,\n好,hǎo,tốt\n";
        let (rows, report) = parse_vocab_csv(csv.as_bytes()).unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 1);
        assert!(report.errors[0].starts_with("row 2:"));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn partial_rows_are_kept() {
        // Only a meaning: still imported (the original kept such rows).
        let csv = "zh,vi\n,chỉ có nghĩa\n";
        let (rows, report) = parse_vocab_csv(csv.as_bytes()).unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(rows[0].hanzi, "");
        assert_eq!(rows[0].meaning, "chỉ có nghĩa");
    }

    #[test]
    fn vietnamese_tag_header_is_accepted() {
        let csv = "zh,vi,Bài\n一,một,bai-3\n";
        let (rows, _) = parse_vocab_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].tag.as_deref(), Some("bai-3"));
    }
}
