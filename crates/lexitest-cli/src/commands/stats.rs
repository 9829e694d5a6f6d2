//! The `lexitest stats` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;

use lexitest_core::model::ItemKind;
use lexitest_core::report::{aggregate_reports, load_json, SubmitResponse};

pub fn execute(reports_dir: PathBuf) -> Result<()> {
    let mut reports: Vec<SubmitResponse> = Vec::new();

    for entry in std::fs::read_dir(&reports_dir)
        .with_context(|| format!("failed to read directory: {}", reports_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            match load_json(&path) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    println!("Skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    let overview = aggregate_reports(&reports);

    println!(
        "{} report(s), {} item(s), {}% accuracy ({} correct, {} incorrect)",
        overview.reports, overview.items, overview.accuracy, overview.correct, overview.incorrect
    );

    if !overview.per_kind.is_empty() {
        let mut table = Table::new();
        table.set_header(["Kind", "Total", "Correct"]);
        for kind in [ItemKind::Vocab, ItemKind::Sentence, ItemKind::Reading] {
            if let Some(tally) = overview.per_kind.get(&kind) {
                table.add_row([
                    kind.to_string(),
                    tally.total.to_string(),
                    tally.correct.to_string(),
                ]);
            }
        }
        println!("{table}");
    }

    Ok(())
}
