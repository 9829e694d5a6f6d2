//! The `lexitest grade` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::Table;
use uuid::Uuid;

use lexitest_core::engine::QuizEngine;
use lexitest_core::model::{SessionMode, SubmittedAnswer};
use lexitest_core::report::{load_json, save_json};
use lexitest_core::traits::{CorpusProvider, SessionStore};
use lexitest_corpus::{build_store, load_corpus_path};

pub async fn execute(
    corpus_path: PathBuf,
    answers_path: PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    let answers: Vec<SubmittedAnswer> = load_json(&answers_path)?;

    let docs = load_corpus_path(&corpus_path)?;
    let store = Arc::new(build_store(&docs));
    let corpus: Arc<dyn CorpusProvider> = store.clone();
    let sessions: Arc<dyn SessionStore> = store.clone();

    let owner = Uuid::new_v4();
    let session = store
        .create_session(owner, SessionMode::Test)
        .await
        .context("failed to open grading session")?;

    let engine = QuizEngine::new(corpus, sessions);
    let report = engine.submit(owner, session.id, &answers).await?;

    println!(
        "Score: {}% ({} correct, {} incorrect, {} total)",
        report.score, report.correct, report.incorrect, report.total
    );

    let mut breakdown = Table::new();
    breakdown.set_header(["Kind", "Total", "Correct"]);
    for (kind, tally) in [
        ("vocab", report.breakdown.vocab),
        ("sentence", report.breakdown.sentence),
        ("reading", report.breakdown.reading),
    ] {
        breakdown.add_row([kind.to_string(), tally.total.to_string(), tally.correct.to_string()]);
    }
    println!("{breakdown}");

    let mut results = Table::new();
    results.set_header(["Item", "Kind", "Submitted", "Canonical", "Correct"]);
    for result in &report.results {
        results.add_row([
            result.item_id.clone(),
            result.kind.to_string(),
            result.submitted_text.clone(),
            result.canonical_answer.clone(),
            if result.is_correct { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{results}");

    if let Some(path) = output {
        save_json(&report, &path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
