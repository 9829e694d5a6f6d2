//! The `lexitest assemble` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::Table;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use lexitest_core::engine::{AssembleRequest, QuizEngine, QuizEngineConfig};
use lexitest_core::report::save_json;
use lexitest_core::traits::{CorpusProvider, SessionStore};
use lexitest_corpus::{build_store, load_corpus_path};

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    corpus_path: PathBuf,
    count: usize,
    vocab_ratio: f64,
    sentence_ratio: f64,
    reading_ratio: f64,
    output: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let docs = load_corpus_path(&corpus_path)?;
    let store = Arc::new(build_store(&docs));
    let corpus: Arc<dyn CorpusProvider> = store.clone();
    let sessions: Arc<dyn SessionStore> = store;

    let request = AssembleRequest {
        count,
        vocab_ratio,
        sentence_ratio,
        reading_ratio,
    };

    // One-shot CLI identity; the session only lives for this invocation.
    let owner = Uuid::new_v4();

    let response = match seed {
        Some(seed) => {
            let engine = QuizEngine::with_rng(
                corpus,
                sessions,
                QuizEngineConfig::default(),
                StdRng::seed_from_u64(seed),
            );
            engine.assemble(owner, request).await?
        }
        None => {
            let engine = QuizEngine::new(corpus, sessions);
            engine.assemble(owner, request).await?
        }
    };

    println!("Session: {}", response.session_id);

    let mut table = Table::new();
    table.set_header(["#", "Kind", "Prompt", "Pinyin", "Options"]);
    for (i, item) in response.items.iter().enumerate() {
        table.add_row([
            (i + 1).to_string(),
            item.kind.to_string(),
            item.prompt_text.clone(),
            item.pinyin.clone().unwrap_or_default(),
            item.options
                .as_ref()
                .map(|o| o.join(" | "))
                .unwrap_or_default(),
        ]);
    }
    println!("{table}");
    println!("{} item(s) assembled (requested {count}).", response.items.len());

    if let Some(path) = output {
        save_json(&response, &path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
