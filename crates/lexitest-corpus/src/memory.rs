//! In-memory corpus and session store.
//!
//! The reference implementation of both collaborator traits, backed by a
//! `RwLock`. Sampling is uniform without replacement using an unseeded
//! generator; callers must treat sample content and order as
//! nondeterministic.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::thread_rng;
use uuid::Uuid;

use lexitest_core::error::{CorpusError, CorpusResult};
use lexitest_core::model::{
    AnswerRecord, AuthoredSentence, LessonGroup, ReadingQuestion, ReadingUnit, Session,
    SessionMode, VocabEntry,
};
use lexitest_core::traits::{CorpusProvider, LessonKey, QuestionFilter, SessionStore};

#[derive(Default)]
struct Inner {
    vocab: Vec<VocabEntry>,
    lessons: Vec<LessonGroup>,
    sentences: Vec<AuthoredSentence>,
    units: Vec<ReadingUnit>,
    questions: Vec<ReadingQuestion>,
    sessions: HashMap<Uuid, Session>,
    answers: Vec<AnswerRecord>,
}

/// An in-memory corpus and session store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CorpusResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| CorpusError::Unavailable("store lock poisoned".into()))
    }

    fn write(&self) -> CorpusResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| CorpusError::Unavailable("store lock poisoned".into()))
    }

    pub fn insert_vocab(&self, entry: VocabEntry) {
        self.inner.write().unwrap().vocab.push(entry);
    }

    pub fn insert_lesson(&self, lesson: LessonGroup) {
        self.inner.write().unwrap().lessons.push(lesson);
    }

    pub fn insert_sentence(&self, sentence: AuthoredSentence) {
        self.inner.write().unwrap().sentences.push(sentence);
    }

    pub fn insert_reading_unit(&self, unit: ReadingUnit) {
        self.inner.write().unwrap().units.push(unit);
    }

    pub fn insert_reading_question(&self, question: ReadingQuestion) {
        self.inner.write().unwrap().questions.push(question);
    }

    pub fn lessons(&self) -> Vec<LessonGroup> {
        self.inner.read().unwrap().lessons.clone()
    }

    /// Answer records appended for a session, in insertion order.
    pub fn answers_for_session(&self, session_id: Uuid) -> Vec<AnswerRecord> {
        self.inner
            .read()
            .unwrap()
            .answers
            .iter()
            .filter(|a| a.session_id == session_id)
            .cloned()
            .collect()
    }
}

fn sample<T: Clone>(pool: &[T], n: usize) -> Vec<T> {
    pool.choose_multiple(&mut thread_rng(), n).cloned().collect()
}

#[async_trait]
impl CorpusProvider for MemoryStore {
    async fn vocab_count(&self) -> CorpusResult<usize> {
        Ok(self.read()?.vocab.len())
    }

    async fn sentence_count(&self) -> CorpusResult<usize> {
        Ok(self.read()?.sentences.len())
    }

    async fn reading_question_count(&self, filter: &QuestionFilter) -> CorpusResult<usize> {
        Ok(self
            .read()?
            .questions
            .iter()
            .filter(|q| filter.matches(q))
            .count())
    }

    async fn sample_vocab(&self, n: usize) -> CorpusResult<Vec<VocabEntry>> {
        Ok(sample(&self.read()?.vocab, n))
    }

    async fn sample_sentences(&self, n: usize) -> CorpusResult<Vec<AuthoredSentence>> {
        Ok(sample(&self.read()?.sentences, n))
    }

    async fn sample_reading_questions(
        &self,
        filter: &QuestionFilter,
        n: usize,
    ) -> CorpusResult<Vec<ReadingQuestion>> {
        let matching: Vec<ReadingQuestion> = self
            .read()?
            .questions
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();
        Ok(sample(&matching, n))
    }

    async fn vocab_by_id(&self, id: Uuid) -> CorpusResult<Option<VocabEntry>> {
        Ok(self.read()?.vocab.iter().find(|v| v.id == id).cloned())
    }

    async fn sentence_by_id(&self, id: Uuid) -> CorpusResult<Option<AuthoredSentence>> {
        Ok(self.read()?.sentences.iter().find(|s| s.id == id).cloned())
    }

    async fn reading_question_by_id(&self, id: Uuid) -> CorpusResult<Option<ReadingQuestion>> {
        Ok(self.read()?.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn recent_reading_units(&self, limit: usize) -> CorpusResult<Vec<ReadingUnit>> {
        let mut units = self.read()?.units.clone();
        units.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        units.truncate(limit);
        Ok(units)
    }

    async fn find_lesson(&self, key: &LessonKey) -> CorpusResult<Option<LessonGroup>> {
        let inner = self.read()?;
        let found = match key {
            LessonKey::Tag(tag) => inner
                .lessons
                .iter()
                .find(|l| l.tag.as_deref() == Some(tag.as_str())),
            LessonKey::Title(title) => inner.lessons.iter().find(|l| l.title == *title),
        };
        Ok(found.cloned())
    }

    async fn upsert_lesson_group(
        &self,
        key: &LessonKey,
        fallback_title: &str,
    ) -> CorpusResult<LessonGroup> {
        if let Some(existing) = self.find_lesson(key).await? {
            return Ok(existing);
        }

        let (title, tag) = match key {
            LessonKey::Tag(tag) => {
                let title = if fallback_title.trim().is_empty() {
                    format!("Lesson {tag}")
                } else {
                    fallback_title.to_string()
                };
                (title, Some(tag.clone()))
            }
            LessonKey::Title(title) => (title.clone(), None),
        };

        let lesson = LessonGroup {
            id: Uuid::new_v4(),
            description: format!("Derived from {title}"),
            title,
            tag,
        };
        self.write()?.lessons.push(lesson.clone());
        Ok(lesson)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, owner_id: Uuid, mode: SessionMode) -> CorpusResult<Session> {
        let session = Session::new(owner_id, mode);
        self.write()?.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn session_by_id(&self, id: Uuid) -> CorpusResult<Option<Session>> {
        Ok(self.read()?.sessions.get(&id).cloned())
    }

    async fn update_session(&self, session: Session) -> CorpusResult<()> {
        self.write()?.sessions.insert(session.id, session);
        Ok(())
    }

    async fn append_answer(&self, record: AnswerRecord) -> CorpusResult<()> {
        self.write()?.answers.push(record);
        Ok(())
    }

    async fn sessions_for_owner(&self, owner_id: Uuid) -> CorpusResult<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .read()?
            .sessions
            .values()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(sessions)
    }
}
