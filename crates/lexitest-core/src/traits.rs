//! Collaborator trait definitions for the corpus and session stores.
//!
//! These async traits form the boundary between the engine and whatever
//! actually holds the learning corpus. The `lexitest-corpus` crate provides
//! the in-memory reference implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CorpusResult;
use crate::model::{
    AnswerRecord, AuthoredSentence, Difficulty, LessonGroup, ReadingQuestion, ReadingUnit,
    Session, SessionMode, VocabEntry,
};

/// The key under which sentences and units are grouped into lessons:
/// the unit's topic tag, or its title when no tag is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LessonKey {
    Tag(String),
    Title(String),
}

impl LessonKey {
    /// Build the grouping key for a reading unit.
    pub fn for_unit(unit: &ReadingUnit) -> Self {
        match unit.tag.as_deref() {
            Some(tag) if !tag.trim().is_empty() => LessonKey::Tag(tag.to_string()),
            _ => LessonKey::Title(unit.title.clone()),
        }
    }
}

/// Constraints on reading-question draws. The default filter matches
/// every question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub unit_id: Option<Uuid>,
    pub difficulty: Option<Difficulty>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &ReadingQuestion) -> bool {
        self.unit_id.map_or(true, |id| question.unit_id == id)
            && self.difficulty.map_or(true, |d| question.difficulty == d)
    }
}

/// Read access to the learning corpus.
///
/// Samples are uniform without replacement, with size clamped to the
/// available population.
#[async_trait]
pub trait CorpusProvider: Send + Sync {
    async fn vocab_count(&self) -> CorpusResult<usize>;
    async fn sentence_count(&self) -> CorpusResult<usize>;
    async fn reading_question_count(&self, filter: &QuestionFilter) -> CorpusResult<usize>;

    async fn sample_vocab(&self, n: usize) -> CorpusResult<Vec<VocabEntry>>;
    async fn sample_sentences(&self, n: usize) -> CorpusResult<Vec<AuthoredSentence>>;
    async fn sample_reading_questions(
        &self,
        filter: &QuestionFilter,
        n: usize,
    ) -> CorpusResult<Vec<ReadingQuestion>>;

    async fn vocab_by_id(&self, id: Uuid) -> CorpusResult<Option<VocabEntry>>;
    async fn sentence_by_id(&self, id: Uuid) -> CorpusResult<Option<AuthoredSentence>>;
    async fn reading_question_by_id(&self, id: Uuid) -> CorpusResult<Option<ReadingQuestion>>;

    /// Reading units ordered most-recently-created first, at most `limit`.
    async fn recent_reading_units(&self, limit: usize) -> CorpusResult<Vec<ReadingUnit>>;

    async fn find_lesson(&self, key: &LessonKey) -> CorpusResult<Option<LessonGroup>>;

    /// Find the lesson grouping for `key`, creating it with a default
    /// description when absent. `fallback_title` names a freshly created
    /// group when the key alone does not.
    async fn upsert_lesson_group(
        &self,
        key: &LessonKey,
        fallback_title: &str,
    ) -> CorpusResult<LessonGroup>;
}

/// Storage for sessions and their append-only answer records.
///
/// Answer appends are independent of summary updates: concurrent appends
/// must not be lost even when summary writes race (last-write-wins on the
/// summary is acceptable).
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, owner_id: Uuid, mode: SessionMode) -> CorpusResult<Session>;
    async fn session_by_id(&self, id: Uuid) -> CorpusResult<Option<Session>>;
    async fn update_session(&self, session: Session) -> CorpusResult<()>;
    async fn append_answer(&self, record: AnswerRecord) -> CorpusResult<()>;
    async fn sessions_for_owner(&self, owner_id: Uuid) -> CorpusResult<Vec<Session>>;
}
