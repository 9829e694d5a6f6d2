//! The `lexitest generate` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::Table;

use lexitest_core::synthesize::SentenceSynthesizer;
use lexitest_corpus::{build_store, load_corpus_path};

pub async fn execute(corpus_path: PathBuf, limit: usize) -> Result<()> {
    let docs = load_corpus_path(&corpus_path)?;
    let store = Arc::new(build_store(&docs));

    let generated = SentenceSynthesizer::new(store).synthesize(limit).await?;

    if generated.is_empty() {
        println!("No sentences could be generated (no reading units with aligned paragraphs).");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(["#", "Source", "Target", "Lesson"]);
    for (i, sentence) in generated.iter().enumerate() {
        table.add_row([
            (i + 1).to_string(),
            sentence.source_text.clone(),
            sentence.target_text.clone(),
            sentence.lesson.title.clone(),
        ]);
    }
    println!("{table}");
    println!("{} sentence(s) generated.", generated.len());

    Ok(())
}
