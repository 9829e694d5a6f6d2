//! Wire-facing response types with JSON persistence.
//!
//! These are the shapes a presentation layer serializes directly; field
//! names follow the camelCase wire convention.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{ItemKind, TestItem};

/// Response to a test-assembly request: the session handle plus the
/// answer-stripped item list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembleResponse {
    pub session_id: Uuid,
    pub items: Vec<TestItem>,
}

/// Per-kind tally of graded items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTally {
    pub total: u32,
    pub correct: u32,
}

/// Graded-item totals broken down by item kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Breakdown {
    pub vocab: KindTally,
    pub sentence: KindTally,
    pub reading: KindTally,
}

impl Breakdown {
    pub fn record(&mut self, kind: ItemKind, correct: bool) {
        let tally = match kind {
            ItemKind::Vocab => &mut self.vocab,
            ItemKind::Sentence => &mut self.sentence,
            ItemKind::Reading => &mut self.reading,
        };
        tally.total += 1;
        if correct {
            tally.correct += 1;
        }
    }

    pub fn for_kind(&self, kind: ItemKind) -> KindTally {
        match kind {
            ItemKind::Vocab => self.vocab,
            ItemKind::Sentence => self.sentence,
            ItemKind::Reading => self.reading,
        }
    }
}

/// The graded outcome of a single submitted item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    pub item_id: String,
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_text: Option<String>,
    pub submitted_text: String,
    pub canonical_answer: String,
    pub is_correct: bool,
}

/// Response to a full-test submission: the finalized summary, the per-kind
/// breakdown, and the detailed per-item results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub session_id: Uuid,
    pub score: u32,
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub breakdown: Breakdown,
    pub results: Vec<ItemResult>,
}

/// Aggregate view over a set of saved submission reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsOverview {
    pub reports: usize,
    pub items: u32,
    pub correct: u32,
    pub incorrect: u32,
    /// Percentage accuracy across every graded item; 0 when empty.
    pub accuracy: u32,
    pub per_kind: HashMap<ItemKind, KindTally>,
}

/// Fold submission reports into a single overview.
pub fn aggregate_reports(reports: &[SubmitResponse]) -> ReportsOverview {
    let mut overview = ReportsOverview {
        reports: reports.len(),
        ..Default::default()
    };

    for report in reports {
        overview.items += report.total;
        overview.correct += report.correct;
        overview.incorrect += report.incorrect;
        for kind in [ItemKind::Vocab, ItemKind::Sentence, ItemKind::Reading] {
            let tally = report.breakdown.for_kind(kind);
            if tally.total > 0 {
                let entry = overview.per_kind.entry(kind).or_default();
                entry.total += tally.total;
                entry.correct += tally.correct;
            }
        }
    }

    overview.accuracy = percentage(overview.correct, overview.items);
    overview
}

/// `round(100 * correct / total)`, with the division-by-zero case pinned
/// to 0 instead of NaN.
pub fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Save a report-shaped value as pretty JSON.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

/// Load a report-shaped value from a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse report JSON: {}", path.display()))
}
