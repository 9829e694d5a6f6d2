//! The `lexitest validate` command.

use std::path::PathBuf;

use anyhow::Result;

use lexitest_corpus::{load_corpus_path, validate_corpus};

pub fn execute(corpus_path: PathBuf) -> Result<()> {
    let docs = load_corpus_path(&corpus_path)?;

    let mut total_warnings = 0;

    for doc in &docs {
        let name = if doc.corpus.name.is_empty() {
            "(unnamed corpus)"
        } else {
            doc.corpus.name.as_str()
        };
        println!(
            "Corpus: {} ({} lessons, {} vocab, {} sentences, {} units, {} questions)",
            name,
            doc.lessons.len(),
            doc.vocab.len(),
            doc.sentences.len(),
            doc.reading_units.len(),
            doc.reading_questions.len()
        );

        let warnings = validate_corpus(doc);
        for w in &warnings {
            let prefix = w
                .context
                .as_ref()
                .map(|c| format!("  [{c}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All corpus files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
