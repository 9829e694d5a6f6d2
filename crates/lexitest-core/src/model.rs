//! Core data model types for lexitest.
//!
//! These are the fundamental types the entire lexitest system uses to
//! represent corpus content, assembled test items, sessions, and answers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vocabulary entry: a source-script word with its reading and meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabEntry {
    /// Unique identifier for this entry.
    pub id: Uuid,
    /// The word in the source script (e.g. 你好).
    pub hanzi: String,
    /// Romanized reading of the source-script word.
    pub pinyin: String,
    /// Meaning in the target language.
    pub meaning: String,
    /// Optional reference to a pronunciation recording.
    #[serde(default)]
    pub audio_ref: Option<String>,
    /// Free-text category label used to filter/group content.
    #[serde(default)]
    pub tag: Option<String>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

/// A named bucket associating sentences and units under a shared topic tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonGroup {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: Option<String>,
}

/// An authored bilingual sentence belonging to a lesson group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoredSentence {
    pub id: Uuid,
    pub lesson_id: Uuid,
    /// Sentence in the source script.
    pub source_text: String,
    /// Sentence in the target language.
    pub target_text: String,
    /// Fixed choices, when the sentence is presented as multiple choice.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Stored correct answer; defaults to `target_text` when absent.
    #[serde(default)]
    pub correct_answer: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuthoredSentence {
    /// The authoritative answer for grading: the stored `correct_answer`,
    /// falling back to the target-language text.
    pub fn correct_answer(&self) -> &str {
        self.correct_answer.as_deref().unwrap_or(&self.target_text)
    }

    /// Whether this sentence carries a fixed option set.
    pub fn has_options(&self) -> bool {
        self.options.as_ref().is_some_and(|o| !o.is_empty())
    }
}

/// A reading-comprehension unit: an aligned paragraph pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingUnit {
    pub id: Uuid,
    pub title: String,
    /// Paragraph in the source script.
    pub source_paragraph: String,
    /// Paragraph in the target language.
    pub target_paragraph: String,
    #[serde(default)]
    pub tag: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The stored answer of a reading question.
///
/// Spreadsheet ingestion produces either a plain string or a structured
/// object; grading always reads it through [`AnswerKey::canonical_text`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Plain(String),
    Structured {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        value: Option<String>,
    },
}

impl AnswerKey {
    /// The canonical answer text: the plain string, or the structured
    /// `text` field with `value` as fallback.
    pub fn canonical_text(&self) -> &str {
        match self {
            AnswerKey::Plain(text) => text,
            AnswerKey::Structured { text, value } => text
                .as_deref()
                .or(value.as_deref())
                .unwrap_or_default(),
        }
    }
}

/// How a reading question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Mcq,
    Fill,
    Translate,
}

impl Default for QuestionKind {
    fn default() -> Self {
        QuestionKind::Mcq
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Mcq => write!(f, "mcq"),
            QuestionKind::Fill => write!(f, "fill"),
            QuestionKind::Translate => write!(f, "translate"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mcq" | "multiple-choice" => Ok(QuestionKind::Mcq),
            "fill" | "fill-in" => Ok(QuestionKind::Fill),
            "translate" => Ok(QuestionKind::Translate),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// Difficulty rating of a reading question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A comprehension question attached to a reading unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingQuestion {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub prompt_text: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub answer: AnswerKey,
    #[serde(default)]
    pub kind: QuestionKind,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// A sentence pair derived from a reading unit's paragraphs.
///
/// Ephemeral: never persisted. The synthetic id is stable only within one
/// synthesis pass and must not be treated as a durable identifier.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedSentence {
    pub synthetic_id: String,
    pub lesson: LessonGroup,
    pub source_text: String,
    pub target_text: String,
}

/// The category of an assembled test item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Vocab,
    Sentence,
    Reading,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Vocab => write!(f, "vocab"),
            ItemKind::Sentence => write!(f, "sentence"),
            ItemKind::Reading => write!(f, "reading"),
        }
    }
}

/// A single assembled test item, stripped of every answer-bearing field.
///
/// The struct deliberately has no answer field: stripping is enforced by
/// construction, not by serialization filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestItem {
    /// Entity id, or a synthetic `gen_*` id for generated sentences.
    pub id: String,
    pub kind: ItemKind,
    pub prompt_text: String,
    /// Reading hint, present for vocab items only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl TestItem {
    pub fn from_vocab(vocab: &VocabEntry) -> Self {
        TestItem {
            id: vocab.id.to_string(),
            kind: ItemKind::Vocab,
            prompt_text: vocab.meaning.clone(),
            pinyin: Some(vocab.pinyin.clone()),
            options: None,
        }
    }

    pub fn from_sentence(sentence: &AuthoredSentence) -> Self {
        TestItem {
            id: sentence.id.to_string(),
            kind: ItemKind::Sentence,
            prompt_text: sentence.source_text.clone(),
            pinyin: None,
            options: sentence.options.clone(),
        }
    }

    pub fn from_question(question: &ReadingQuestion) -> Self {
        TestItem {
            id: question.id.to_string(),
            kind: ItemKind::Reading,
            prompt_text: question.prompt_text.clone(),
            pinyin: None,
            options: question.options.clone(),
        }
    }

    pub fn from_generated(generated: &GeneratedSentence) -> Self {
        TestItem {
            id: generated.synthetic_id.clone(),
            kind: ItemKind::Sentence,
            prompt_text: generated.source_text.clone(),
            pinyin: None,
            options: None,
        }
    }
}

/// The kind of learning activity a session tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Vocab,
    Lesson,
    Reading,
    Quiz,
    Test,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Vocab => write!(f, "vocab"),
            SessionMode::Lesson => write!(f, "lesson"),
            SessionMode::Reading => write!(f, "reading"),
            SessionMode::Quiz => write!(f, "quiz"),
            SessionMode::Test => write!(f, "test"),
        }
    }
}

impl FromStr for SessionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vocab" => Ok(SessionMode::Vocab),
            "lesson" => Ok(SessionMode::Lesson),
            "reading" => Ok(SessionMode::Reading),
            "quiz" => Ok(SessionMode::Quiz),
            "test" => Ok(SessionMode::Test),
            other => Err(format!("unknown session mode: {other}")),
        }
    }
}

/// Running totals of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    /// Percentage score, set only when the session is finalized.
    #[serde(default)]
    pub score: Option<u32>,
}

/// A bounded interaction during which a learner answers a set of items.
///
/// Created with a zeroed summary, mutated additively as answers arrive,
/// finalized once (score computed, `completed_at` stamped) and thereafter
/// immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub mode: SessionMode,
    pub summary: SessionSummary,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(owner_id: Uuid, mode: SessionMode) -> Self {
        Session {
            id: Uuid::new_v4(),
            owner_id,
            mode,
            summary: SessionSummary::default(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// One graded submission, append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: Uuid,
    pub session_id: Uuid,
    /// The item id as submitted. Synthetic `gen_*` ids may appear here but
    /// carry no stable meaning across generation passes.
    pub item_id: String,
    pub item_kind: ItemKind,
    pub submitted_text: String,
    pub was_correct: bool,
    pub created_at: DateTime<Utc>,
}

impl AnswerRecord {
    pub fn new(
        session_id: Uuid,
        item_id: String,
        item_kind: ItemKind,
        submitted_text: String,
        was_correct: bool,
    ) -> Self {
        AnswerRecord {
            id: Uuid::new_v4(),
            session_id,
            item_id,
            item_kind,
            submitted_text,
            was_correct,
            created_at: Utc::now(),
        }
    }
}

/// A learner's answer to one assembled item, as submitted for grading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub item_id: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub submitted_text: String,
    /// Prompt text echoed by the client, passed through to the result list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_text: Option<String>,
}
