//! Per-owner progress statistics across sessions.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::QuizEngine;
use crate::error::EngineError;
use crate::model::{Session, SessionMode};
use crate::report::percentage;

/// Headline totals across an owner's sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_sessions: usize,
    pub total_items: u32,
    pub total_correct: u32,
    pub total_incorrect: u32,
    /// Percentage accuracy across every answered item; 0 when none.
    pub accuracy: u32,
}

/// Per-mode answer tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTally {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
}

/// An owner's learning progress, folded from their session summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOverview {
    pub summary: ProgressSummary,
    pub per_mode: HashMap<SessionMode, ModeTally>,
}

/// Fold session summaries into a progress overview.
pub fn fold_sessions(sessions: &[Session]) -> ProgressOverview {
    let mut summary = ProgressSummary {
        total_sessions: sessions.len(),
        ..Default::default()
    };
    let mut per_mode: HashMap<SessionMode, ModeTally> = HashMap::new();

    for session in sessions {
        summary.total_items += session.summary.total;
        summary.total_correct += session.summary.correct;
        summary.total_incorrect += session.summary.incorrect;

        let tally = per_mode.entry(session.mode).or_default();
        tally.total += session.summary.total;
        tally.correct += session.summary.correct;
        tally.incorrect += session.summary.incorrect;
    }

    summary.accuracy = percentage(summary.total_correct, summary.total_items);
    ProgressOverview { summary, per_mode }
}

impl<R: Rng + Send> QuizEngine<R> {
    /// The owner's progress across all of their sessions.
    pub async fn progress(&self, owner_id: Uuid) -> Result<ProgressOverview, EngineError> {
        let sessions = self.sessions.sessions_for_owner(owner_id).await?;
        Ok(fold_sessions(&sessions))
    }
}
