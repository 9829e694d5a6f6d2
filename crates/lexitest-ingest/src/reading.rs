//! Reading-unit and reading-question CSV import.
//!
//! One sheet carries both: rows are grouped by unit title, the first row
//! of each unit supplies the paragraph pair, and any row with a question
//! cell contributes a question to its unit.

use std::collections::HashSet;
use std::io::Read;

use anyhow::{Context, Result};

use lexitest_core::model::{AnswerKey, Difficulty, QuestionKind};

use crate::columns::{ColumnMap, FieldSpec};
use crate::ImportReport;

/// Column aliases accepted in reading sheets, in priority order.
const READING_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", &["unit_title", "Unit Title", "标题"]),
    FieldSpec::new("source_paragraph", &["zh_paragraph", "中文段落", "ZH Paragraph"]),
    FieldSpec::new("target_paragraph", &["vi_paragraph", "越南语段落", "VI Paragraph"]),
    FieldSpec::new("tag", &["source_tag", "Source Tag", "unit", "Unit", "Bài"]),
    FieldSpec::new("question", &["question", "Câu hỏi"]),
    FieldSpec::new("options", &["options", "Options"]),
    FieldSpec::new("option1", &["option1", "option_1", "Option1"]),
    FieldSpec::new("option2", &["option2", "option_2", "Option2"]),
    FieldSpec::new("option3", &["option3", "option_3", "Option3"]),
    FieldSpec::new("option4", &["option4", "option_4", "Option4"]),
    FieldSpec::new("answer", &["answer", "Đáp án", "Answer"]),
    FieldSpec::new("kind", &["question_type", "questionType", "Question Type", "QuestionType"]),
    FieldSpec::new("difficulty", &["difficulty", "Độ khó", "Difficulty"]),
];

/// One parsed reading unit (paragraphs from its first sheet row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingUnitRow {
    pub title: String,
    pub source_paragraph: String,
    pub target_paragraph: String,
    pub tag: Option<String>,
}

/// One parsed reading question, keyed to its unit by title.
#[derive(Debug, Clone)]
pub struct ReadingQuestionRow {
    pub unit_title: String,
    pub prompt: String,
    pub options: Option<Vec<String>>,
    pub answer: AnswerKey,
    pub kind: QuestionKind,
    pub difficulty: Difficulty,
}

/// The outcome of parsing one reading sheet.
#[derive(Debug, Clone, Default)]
pub struct ReadingImport {
    pub units: Vec<ReadingUnitRow>,
    pub questions: Vec<ReadingQuestionRow>,
}

/// Parse a reading CSV into units and questions.
///
/// Rows without a unit title are skipped. Option cells may hold a JSON
/// array or be spread over `option1..option4` columns; answer cells may be
/// plain text or a JSON object. Invalid kind/difficulty values fall back
/// to their defaults with a row diagnostic, matching the permissive
/// spreadsheet contract.
pub fn parse_reading_csv<R: Read>(input: R) -> Result<(ReadingImport, ImportReport)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .context("failed to read reading CSV headers")?
        .clone();
    let columns = ColumnMap::resolve(&headers, READING_FIELDS);

    let mut import = ReadingImport::default();
    let mut report = ImportReport::default();
    let mut seen_titles: HashSet<String> = HashSet::new();

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

        let Some(title) = columns.get(&record, "title") else {
            report.skipped += 1;
            report.row_error(i, "skipped: missing unit title");
            continue;
        };

        // The first row of a unit carries its paragraphs; later rows only
        // contribute questions.
        if seen_titles.insert(title.to_string()) {
            import.units.push(ReadingUnitRow {
                title: title.to_string(),
                source_paragraph: columns.value(&record, "source_paragraph"),
                target_paragraph: columns.value(&record, "target_paragraph"),
                tag: columns.get(&record, "tag").map(str::to_string),
            });
        }

        if let Some(prompt) = columns.get(&record, "question") {
            let options = parse_options(&columns, &record);
            let answer = parse_answer(columns.get(&record, "answer"));

            let kind = match columns.get(&record, "kind") {
                None => QuestionKind::default(),
                Some(raw) => raw.parse().unwrap_or_else(|_| {
                    report.row_error(i, format!("invalid question type '{raw}', using mcq"));
                    QuestionKind::default()
                }),
            };
            let difficulty = match columns.get(&record, "difficulty") {
                None => Difficulty::default(),
                Some(raw) => raw.parse().unwrap_or_else(|_| {
                    report.row_error(i, format!("invalid difficulty '{raw}', using medium"));
                    Difficulty::default()
                }),
            };

            import.questions.push(ReadingQuestionRow {
                unit_title: title.to_string(),
                prompt: prompt.to_string(),
                options,
                answer,
                kind,
                difficulty,
            });
        }

        report.imported += 1;
    }

    Ok((import, report))
}

/// Options come either as a JSON array in one cell or spread across
/// `option1..option4` columns.
fn parse_options(columns: &ColumnMap, record: &csv::StringRecord) -> Option<Vec<String>> {
    if let Some(cell) = columns.get(record, "options") {
        if cell.starts_with('[') {
            if let Ok(parsed) = serde_json::from_str::<Vec<String>>(cell) {
                return Some(parsed).filter(|o| !o.is_empty());
            }
        }
    }

    let spread: Vec<String> = ["option1", "option2", "option3", "option4"]
        .into_iter()
        .filter_map(|field| columns.get(record, field))
        .map(str::to_string)
        .collect();

    if spread.is_empty() {
        None
    } else {
        Some(spread)
    }
}

/// Answers come as plain text or as a JSON object with a `text` field.
fn parse_answer(cell: Option<&str>) -> AnswerKey {
    match cell {
        None => AnswerKey::Plain(String::new()),
        Some(raw) => {
            if raw.starts_with('{') {
                if let Ok(parsed) = serde_json::from_str::<AnswerKey>(raw) {
                    return parsed;
                }
            }
            AnswerKey::Plain(raw.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_rows_by_unit_title() {
        let csv = "\
unit_title,zh_paragraph,vi_paragraph,question,answer
Unit 1,你好。再见。,Xin chào. Tạm biệt.,问题一,đáp án một
Unit 1,ignored,ignored,问题二,đáp án hai
Unit 2,谢谢。,Cảm ơn.,,
";
        let (import, report) = parse_reading_csv(csv.as_bytes()).unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.imported, 3);
        assert_eq!(import.units.len(), 2);
        assert_eq!(import.questions.len(), 2);

        // Paragraphs come from the unit's first row only.
        assert_eq!(import.units[0].source_paragraph, "你好。再见。");
        assert_eq!(import.questions[1].unit_title, "Unit 1");
    }

    #[test]
    fn rows_without_title_are_skipped() {
        let csv = "unit_title,zh_paragraph,vi_paragraph\n,段落,đoạn văn\n";
        let (import, report) = parse_reading_csv(csv.as_bytes()).unwrap();

        assert!(import.units.is_empty());
        assert_eq!(report.skipped, 1);
        assert!(report.errors[0].contains("missing unit title"));
    }

    #[test]
    fn options_parse_from_json_cell() {
        let csv = "unit_title,question,options,answer\nUnit 1,选哪个？,\"[\"\"đẹp\"\", \"\"xấu\"\"]\",đẹp\n";
        let (import, _) = parse_reading_csv(csv.as_bytes()).unwrap();
        assert_eq!(
            import.questions[0].options.as_deref(),
            Some(["đẹp".to_string(), "xấu".to_string()].as_slice())
        );
    }

    #[test]
    fn options_parse_from_spread_columns() {
        let csv = "unit_title,question,option1,option2,option3,answer\nUnit 1,选哪个？,a,b,,a\n";
        let (import, _) = parse_reading_csv(csv.as_bytes()).unwrap();
        assert_eq!(
            import.questions[0].options.as_deref(),
            Some(["a".to_string(), "b".to_string()].as_slice())
        );
    }

    #[test]
    fn json_answer_object_is_structured() {
        let csv = "unit_title,question,answer\nUnit 1,问题,\"{\"\"text\"\": \"\"thời tiết đẹp\"\"}\"\n";
        let (import, _) = parse_reading_csv(csv.as_bytes()).unwrap();
        assert_eq!(
            import.questions[0].answer.canonical_text(),
            "thời tiết đẹp"
        );
    }

    #[test]
    fn invalid_kind_and_difficulty_fall_back_with_diagnostics() {
        let csv = "unit_title,question,question_type,difficulty,answer\nUnit 1,问题,essay,impossible,x\n";
        let (import, report) = parse_reading_csv(csv.as_bytes()).unwrap();

        assert_eq!(import.questions[0].kind, QuestionKind::Mcq);
        assert_eq!(import.questions[0].difficulty, Difficulty::Medium);
        // Row is still imported; the fallbacks are diagnostics, not drops.
        assert_eq!(report.imported, 1);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn question_kind_synonym_headers_resolve() {
        let csv = "unit_title,question,questionType,answer\nUnit 1,điền từ,fill,từ\n";
        let (import, _) = parse_reading_csv(csv.as_bytes()).unwrap();
        assert_eq!(import.questions[0].kind, QuestionKind::Fill);
    }
}
