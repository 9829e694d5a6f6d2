//! Session accumulation: full-test grading, practice-mode recording, and
//! session finalization.
//!
//! Grading resolves the authoritative entity by its real id on every
//! submission; client-supplied ids that do not resolve (including the
//! synthetic `gen_*` ids of generated sentences) grade as incorrect rather
//! than erroring.

use rand::Rng;
use uuid::Uuid;

use crate::engine::QuizEngine;
use crate::error::EngineError;
use crate::grade::{evaluate, Authority, Verdict};
use crate::model::{AnswerRecord, ItemKind, Session, SubmittedAnswer};
use crate::report::{percentage, Breakdown, ItemResult, SubmitResponse};

/// One practice-mode answer, graded client-side and recorded as-is.
#[derive(Debug, Clone)]
pub struct PracticeAnswer {
    pub session_id: Uuid,
    pub item_id: String,
    pub kind: ItemKind,
    pub submitted_text: String,
    pub was_correct: bool,
}

impl<R: Rng + Send> QuizEngine<R> {
    /// Grade a full submitted answer set against the corpus and finalize
    /// the session.
    ///
    /// Answers are graded sequentially; each appends exactly one
    /// [`AnswerRecord`]. The session summary is recomputed from the whole
    /// batch (overwrite semantics) and `completed_at` is stamped. Fails
    /// with `NotFound` when the session is absent or owned by somebody
    /// else, and with `Validation` when it was already finalized.
    pub async fn submit(
        &self,
        owner_id: Uuid,
        session_id: Uuid,
        answers: &[SubmittedAnswer],
    ) -> Result<SubmitResponse, EngineError> {
        let mut session = self.owned_session(owner_id, session_id).await?;
        if session.completed_at.is_some() {
            return Err(EngineError::Validation(format!(
                "session {session_id} is already completed"
            )));
        }

        let mut breakdown = Breakdown::default();
        let mut results = Vec::with_capacity(answers.len());
        let mut correct = 0u32;

        for answer in answers {
            let verdict = self.resolve_and_evaluate(answer).await?;

            self.sessions
                .append_answer(AnswerRecord::new(
                    session_id,
                    answer.item_id.clone(),
                    answer.kind,
                    answer.submitted_text.clone(),
                    verdict.is_correct,
                ))
                .await?;

            if verdict.is_correct {
                correct += 1;
            }
            breakdown.record(answer.kind, verdict.is_correct);
            results.push(ItemResult {
                item_id: answer.item_id.clone(),
                kind: answer.kind,
                prompt_text: answer.prompt_text.clone(),
                submitted_text: answer.submitted_text.clone(),
                canonical_answer: verdict.canonical_answer,
                is_correct: verdict.is_correct,
            });
        }

        let total = answers.len() as u32;
        let score = percentage(correct, total);

        session.summary.total = total;
        session.summary.correct = correct;
        session.summary.incorrect = total - correct;
        session.summary.score = Some(score);
        session.completed_at = Some(chrono::Utc::now());
        self.sessions.update_session(session).await?;

        tracing::info!(%session_id, total, correct, score, "finalized test session");

        Ok(SubmitResponse {
            session_id,
            score,
            total,
            correct,
            incorrect: total - correct,
            breakdown,
            results,
        })
    }

    /// Append one practice-mode answer and bump the session's running
    /// totals. The score stays unset until [`Self::complete_session`].
    pub async fn record_answer(
        &self,
        owner_id: Uuid,
        answer: PracticeAnswer,
    ) -> Result<AnswerRecord, EngineError> {
        if answer.item_id.trim().is_empty() {
            return Err(EngineError::Validation("item id must not be empty".into()));
        }

        let mut session = self.owned_session(owner_id, answer.session_id).await?;
        if session.completed_at.is_some() {
            return Err(EngineError::Validation(format!(
                "session {} is already completed",
                answer.session_id
            )));
        }

        let record = AnswerRecord::new(
            answer.session_id,
            answer.item_id,
            answer.kind,
            answer.submitted_text,
            answer.was_correct,
        );
        // The append is committed independently of the summary update so a
        // racing summary write cannot lose it.
        self.sessions.append_answer(record.clone()).await?;

        session.summary.total += 1;
        if answer.was_correct {
            session.summary.correct += 1;
        } else {
            session.summary.incorrect += 1;
        }
        self.sessions.update_session(session).await?;

        Ok(record)
    }

    /// Finalize a practice session: compute the score from the accumulated
    /// totals and stamp `completed_at`. Completing twice is an error.
    pub async fn complete_session(
        &self,
        owner_id: Uuid,
        session_id: Uuid,
    ) -> Result<Session, EngineError> {
        let mut session = self.owned_session(owner_id, session_id).await?;
        if session.completed_at.is_some() {
            return Err(EngineError::Validation(format!(
                "session {session_id} is already completed"
            )));
        }

        session.summary.score = Some(percentage(session.summary.correct, session.summary.total));
        session.completed_at = Some(chrono::Utc::now());
        self.sessions.update_session(session.clone()).await?;

        Ok(session)
    }

    /// Load a session, treating both absence and foreign ownership as
    /// `NotFound` so callers cannot probe other owners' sessions.
    pub(crate) async fn owned_session(
        &self,
        owner_id: Uuid,
        session_id: Uuid,
    ) -> Result<Session, EngineError> {
        match self.sessions.session_by_id(session_id).await? {
            Some(session) if session.owner_id == owner_id => Ok(session),
            _ => Err(EngineError::NotFound(format!("session {session_id}"))),
        }
    }

    /// Resolve the authoritative entity for one answer and grade against
    /// it. Unresolvable ids (malformed, synthetic, or deleted) degrade to
    /// an incorrect verdict with an empty canonical answer.
    async fn resolve_and_evaluate(
        &self,
        answer: &SubmittedAnswer,
    ) -> Result<Verdict, EngineError> {
        let Ok(entity_id) = answer.item_id.parse::<Uuid>() else {
            tracing::warn!(
                item_id = %answer.item_id,
                kind = %answer.kind,
                "item id is not an entity id, grading as incorrect"
            );
            return Ok(Verdict::unresolved());
        };

        let verdict = match answer.kind {
            ItemKind::Vocab => self
                .corpus
                .vocab_by_id(entity_id)
                .await?
                .map(|entry| evaluate(&Authority::Vocab(&entry), &answer.submitted_text)),
            ItemKind::Sentence => self
                .corpus
                .sentence_by_id(entity_id)
                .await?
                .map(|sentence| evaluate(&Authority::Sentence(&sentence), &answer.submitted_text)),
            ItemKind::Reading => self
                .corpus
                .reading_question_by_id(entity_id)
                .await?
                .map(|question| evaluate(&Authority::Reading(&question), &answer.submitted_text)),
        };

        Ok(verdict.unwrap_or_else(|| {
            tracing::warn!(
                item_id = %answer.item_id,
                kind = %answer.kind,
                "entity not found while grading, marking incorrect"
            );
            Verdict::unresolved()
        }))
    }
}
