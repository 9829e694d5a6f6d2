//! The `lexitest import` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use lexitest_corpus::loader::{ReadingQuestionDoc, ReadingUnitDoc, VocabDoc};
use lexitest_corpus::{parse_corpus, write_corpus, CorpusDocument};
use lexitest_ingest::{parse_reading_csv, parse_vocab_csv, ImportMode, ImportReport};

pub fn execute(kind: String, file: PathBuf, corpus_path: PathBuf, mode: String) -> Result<()> {
    let mode: ImportMode = mode
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{e}"))?;

    let mut doc = if corpus_path.exists() {
        parse_corpus(&corpus_path)?
    } else {
        CorpusDocument::default()
    };

    let input = std::fs::File::open(&file)
        .with_context(|| format!("failed to open CSV file: {}", file.display()))?;

    let report = match kind.to_lowercase().as_str() {
        "vocab" => import_vocab(&mut doc, input, mode)?,
        "reading" => import_reading(&mut doc, input, mode)?,
        other => anyhow::bail!("unknown import kind: {other} (expected vocab or reading)"),
    };

    write_corpus(&doc, &corpus_path)?;

    println!(
        "Imported {} of {} row(s), {} skipped.",
        report.imported, report.total, report.skipped
    );
    for error in &report.errors {
        println!("  {error}");
    }
    println!("Updated {}", corpus_path.display());

    Ok(())
}

fn import_vocab(
    doc: &mut CorpusDocument,
    input: std::fs::File,
    mode: ImportMode,
) -> Result<ImportReport> {
    let (rows, report) = parse_vocab_csv(input)?;

    if mode == ImportMode::Overwrite {
        doc.vocab.clear();
    }
    doc.vocab.extend(rows.into_iter().map(|row| VocabDoc {
        hanzi: row.hanzi,
        pinyin: row.pinyin,
        meaning: row.meaning,
        audio: row.audio,
        tag: row.tag,
    }));

    Ok(report)
}

fn import_reading(
    doc: &mut CorpusDocument,
    input: std::fs::File,
    mode: ImportMode,
) -> Result<ImportReport> {
    let (import, report) = parse_reading_csv(input)?;

    if mode == ImportMode::Overwrite {
        doc.reading_units.clear();
        doc.reading_questions.clear();
    }

    for unit in import.units {
        // In append mode an existing unit keeps its stored paragraphs.
        if mode == ImportMode::Append
            && doc.reading_units.iter().any(|u| u.title == unit.title)
        {
            continue;
        }
        doc.reading_units.push(ReadingUnitDoc {
            title: unit.title,
            source_paragraph: unit.source_paragraph,
            target_paragraph: unit.target_paragraph,
            tag: unit.tag,
        });
    }

    doc.reading_questions
        .extend(import.questions.into_iter().map(|q| ReadingQuestionDoc {
            unit: q.unit_title,
            prompt: q.prompt,
            options: q.options,
            kind: Some(q.kind.to_string()),
            difficulty: Some(q.difficulty.to_string()),
            answer: q.answer,
        }));

    Ok(report)
}
