//! TOML corpus file parser, validator, and writer.
//!
//! Corpus files hold lessons, vocabulary, authored sentences, reading
//! units, and reading questions. Cross references are by name: sentences
//! name their lesson by tag or title, questions name their unit by title.
//! The same document type round-trips through the CLI `import` command.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lexitest_core::model::{
    AnswerKey, AuthoredSentence, Difficulty, LessonGroup, QuestionKind, ReadingQuestion,
    ReadingUnit, VocabEntry,
};

use crate::memory::MemoryStore;

/// Top-level metadata of a corpus file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusHeader {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonDoc {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabDoc {
    #[serde(default)]
    pub hanzi: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceDoc {
    /// Lesson reference: the tag or title of a `[[lessons]]` entry.
    pub lesson: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingUnitDoc {
    pub title: String,
    pub source_paragraph: String,
    pub target_paragraph: String,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingQuestionDoc {
    /// Unit reference: the title of a `[[reading_units]]` entry.
    pub unit: String,
    pub prompt: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Plain text or a `{ text = "..." }` table; kept last so nested
    /// tables serialize after scalar fields.
    pub answer: AnswerKey,
}

/// A complete corpus document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusDocument {
    #[serde(default)]
    pub corpus: CorpusHeader,
    #[serde(default)]
    pub lessons: Vec<LessonDoc>,
    #[serde(default)]
    pub vocab: Vec<VocabDoc>,
    #[serde(default)]
    pub sentences: Vec<SentenceDoc>,
    #[serde(default)]
    pub reading_units: Vec<ReadingUnitDoc>,
    #[serde(default)]
    pub reading_questions: Vec<ReadingQuestionDoc>,
}

impl CorpusDocument {
    pub fn entity_count(&self) -> usize {
        self.lessons.len()
            + self.vocab.len()
            + self.sentences.len()
            + self.reading_units.len()
            + self.reading_questions.len()
    }
}

/// Parse a single TOML file into a `CorpusDocument`.
pub fn parse_corpus(path: &Path) -> Result<CorpusDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus file: {}", path.display()))?;
    parse_corpus_str(&content, path)
}

/// Parse a TOML string into a `CorpusDocument` (useful for testing).
pub fn parse_corpus_str(content: &str, source_path: &Path) -> Result<CorpusDocument> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))
}

/// Load a corpus file, or every `.toml` file under a directory.
pub fn load_corpus_path(path: &Path) -> Result<Vec<CorpusDocument>> {
    if path.is_dir() {
        let mut docs = Vec::new();
        for entry in std::fs::read_dir(path)
            .with_context(|| format!("failed to read directory: {}", path.display()))?
        {
            let entry = entry?;
            let entry_path = entry.path();
            if entry_path.is_dir() {
                docs.extend(load_corpus_path(&entry_path)?);
            } else if entry_path.extension().is_some_and(|ext| ext == "toml") {
                match parse_corpus(&entry_path) {
                    Ok(doc) => docs.push(doc),
                    Err(e) => {
                        tracing::warn!("skipping {}: {}", entry_path.display(), e);
                    }
                }
            }
        }
        Ok(docs)
    } else {
        Ok(vec![parse_corpus(path)?])
    }
}

/// Write a corpus document back to disk as TOML.
pub fn write_corpus(doc: &CorpusDocument, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(doc).context("failed to serialize corpus")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write corpus to {}", path.display()))?;
    Ok(())
}

/// A warning from corpus validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The entity the warning refers to (if applicable).
    pub context: Option<String>,
    /// Warning message.
    pub message: String,
}

fn warn(context: impl Into<String>, message: impl Into<String>) -> ValidationWarning {
    ValidationWarning {
        context: Some(context.into()),
        message: message.into(),
    }
}

/// Validate a corpus document for common issues.
pub fn validate_corpus(doc: &CorpusDocument) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate lesson keys
    let mut seen = std::collections::HashSet::new();
    for lesson in &doc.lessons {
        let key = lesson
            .tag
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&lesson.title);
        if !seen.insert(key.to_string()) {
            warnings.push(warn(&lesson.title, format!("duplicate lesson key: {key}")));
        }
    }

    // Vocab rows with no content
    for (i, vocab) in doc.vocab.iter().enumerate() {
        if vocab.hanzi.trim().is_empty()
            && vocab.pinyin.trim().is_empty()
            && vocab.meaning.trim().is_empty()
        {
            warnings.push(warn(format!("vocab #{}", i + 1), "entry has no content"));
        }
    }

    // Sentence lesson references and option consistency
    for sentence in &doc.sentences {
        let resolved = doc.lessons.iter().any(|l| {
            l.tag.as_deref() == Some(sentence.lesson.as_str()) || l.title == sentence.lesson
        });
        if !resolved {
            warnings.push(warn(
                &sentence.source,
                format!(
                    "lesson '{}' is not declared; it will be created implicitly",
                    sentence.lesson
                ),
            ));
        }
        if let Some(options) = &sentence.options {
            if !options.is_empty() {
                let answer = sentence
                    .correct_answer
                    .as_deref()
                    .unwrap_or(&sentence.target);
                if !options.iter().any(|o| o == answer) {
                    warnings.push(warn(
                        &sentence.source,
                        "correct answer is not among the presented options",
                    ));
                }
            }
        }
    }

    // Question references, prompts, and enum values
    for question in &doc.reading_questions {
        if !doc.reading_units.iter().any(|u| u.title == question.unit) {
            warnings.push(warn(
                &question.prompt,
                format!("unknown reading unit '{}'; question will be skipped", question.unit),
            ));
        }
        if question.prompt.trim().is_empty() {
            warnings.push(warn(&question.unit, "question prompt is empty"));
        }
        if let Some(kind) = &question.kind {
            if kind.parse::<QuestionKind>().is_err() {
                warnings.push(warn(
                    &question.prompt,
                    format!("invalid question kind '{kind}', defaulting to mcq"),
                ));
            }
        }
        if let Some(difficulty) = &question.difficulty {
            if difficulty.parse::<Difficulty>().is_err() {
                warnings.push(warn(
                    &question.prompt,
                    format!("invalid difficulty '{difficulty}', defaulting to medium"),
                ));
            }
        }
        let is_mcq = question
            .kind
            .as_deref()
            .map_or(true, |k| k.parse::<QuestionKind>() == Ok(QuestionKind::Mcq));
        if is_mcq && question.options.as_ref().map_or(true, |o| o.is_empty()) {
            warnings.push(warn(&question.prompt, "mcq question has no options"));
        }
    }

    warnings
}

fn clean_tag(tag: &Option<String>) -> Option<String> {
    tag.as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Deterministic entity id for corpus-file content.
///
/// Ids must be stable across loads of the same file: a test assembled by
/// one process is graded by another, and both resolve entities by id.
fn stable_id(kind: &str, ordinal: usize, discriminant: &str) -> Uuid {
    let name = format!("lexitest:{kind}:{ordinal}:{discriminant}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

/// Materialize corpus documents into an in-memory store.
///
/// Permissive by design: undeclared lesson references are created
/// implicitly, invalid kind/difficulty values fall back to their defaults,
/// and questions pointing at unknown units are skipped with a warning log.
/// Run [`validate_corpus`] first to surface these as diagnostics.
pub fn build_store(docs: &[CorpusDocument]) -> MemoryStore {
    let store = MemoryStore::new();
    let mut lessons: Vec<LessonGroup> = Vec::new();
    let mut units: Vec<ReadingUnit> = Vec::new();
    let mut counters: std::collections::HashMap<&'static str, usize> = Default::default();
    let mut next = |kind: &'static str| {
        let counter = counters.entry(kind).or_insert(0);
        let ordinal = *counter;
        *counter += 1;
        ordinal
    };

    for doc in docs {
        for lesson in &doc.lessons {
            let group = LessonGroup {
                id: stable_id("lesson", next("lesson"), &lesson.title),
                title: lesson.title.clone(),
                description: lesson.description.clone(),
                tag: clean_tag(&lesson.tag),
            };
            lessons.push(group.clone());
            store.insert_lesson(group);
        }

        for vocab in &doc.vocab {
            store.insert_vocab(VocabEntry {
                id: stable_id("vocab", next("vocab"), &vocab.hanzi),
                hanzi: vocab.hanzi.clone(),
                pinyin: vocab.pinyin.clone(),
                meaning: vocab.meaning.clone(),
                audio_ref: vocab.audio.clone(),
                tag: clean_tag(&vocab.tag),
                created_at: Utc::now(),
            });
        }

        for sentence in &doc.sentences {
            let lesson_id = match lessons.iter().find(|l| {
                l.tag.as_deref() == Some(sentence.lesson.as_str()) || l.title == sentence.lesson
            }) {
                Some(lesson) => lesson.id,
                None => {
                    let implicit = LessonGroup {
                        id: stable_id("lesson", next("lesson"), &sentence.lesson),
                        title: sentence.lesson.clone(),
                        description: format!("Derived from {}", sentence.lesson),
                        tag: None,
                    };
                    lessons.push(implicit.clone());
                    store.insert_lesson(implicit.clone());
                    implicit.id
                }
            };

            store.insert_sentence(AuthoredSentence {
                id: stable_id("sentence", next("sentence"), &sentence.source),
                lesson_id,
                source_text: sentence.source.clone(),
                target_text: sentence.target.clone(),
                options: sentence.options.clone().filter(|o| !o.is_empty()),
                correct_answer: sentence.correct_answer.clone(),
                created_at: Utc::now(),
            });
        }

        for unit in &doc.reading_units {
            let reading_unit = ReadingUnit {
                id: stable_id("unit", next("unit"), &unit.title),
                title: unit.title.clone(),
                source_paragraph: unit.source_paragraph.clone(),
                target_paragraph: unit.target_paragraph.clone(),
                tag: clean_tag(&unit.tag),
                created_at: Utc::now(),
            };
            units.push(reading_unit.clone());
            store.insert_reading_unit(reading_unit);
        }

        for question in &doc.reading_questions {
            let Some(unit) = units.iter().find(|u| u.title == question.unit) else {
                tracing::warn!(
                    unit = %question.unit,
                    prompt = %question.prompt,
                    "question references unknown reading unit, skipping"
                );
                continue;
            };

            let kind = question
                .kind
                .as_deref()
                .and_then(|k| k.parse().ok())
                .unwrap_or_default();
            let difficulty = question
                .difficulty
                .as_deref()
                .and_then(|d| d.parse().ok())
                .unwrap_or_default();

            store.insert_reading_question(ReadingQuestion {
                id: stable_id("question", next("question"), &question.prompt),
                unit_id: unit.id,
                prompt_text: question.prompt.clone(),
                options: question.options.clone().filter(|o| !o.is_empty()),
                answer: question.answer.clone(),
                kind,
                difficulty,
            });
        }
    }

    store
}
