//! On-demand sentence synthesis from reading-unit paragraphs.
//!
//! When no authored sentences exist, quiz content is derived from reading
//! units: each unit's paragraph pair is segmented into aligned sentence
//! pairs, grouped into lessons by topic tag, and emitted as ephemeral
//! [`GeneratedSentence`] records.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::EngineError;
use crate::model::{GeneratedSentence, LessonGroup};
use crate::segment::segment;
use crate::traits::{CorpusProvider, LessonKey};

/// Upper bound on the number of reading units scanned per synthesis call,
/// to bound cost on large corpora. Tunable via
/// [`SentenceSynthesizer::with_max_unit_scan`].
pub const DEFAULT_MAX_UNIT_SCAN: usize = 1000;

/// Derives ephemeral sentence records from reading units.
pub struct SentenceSynthesizer {
    corpus: Arc<dyn CorpusProvider>,
    max_unit_scan: usize,
}

impl SentenceSynthesizer {
    pub fn new(corpus: Arc<dyn CorpusProvider>) -> Self {
        SentenceSynthesizer {
            corpus,
            max_unit_scan: DEFAULT_MAX_UNIT_SCAN,
        }
    }

    pub fn with_max_unit_scan(mut self, max_unit_scan: usize) -> Self {
        self.max_unit_scan = max_unit_scan;
        self
    }

    /// Generate up to `limit` sentences from the most recent reading units.
    ///
    /// Lesson groupings are resolved once per key within this call (the
    /// cache does not outlive it) and upserted against the corpus, so a
    /// failure after some upserts leaves those groupings committed:
    /// synthesis is at-least-once, not atomic. Any collaborator error
    /// aborts the whole call with no partial result.
    ///
    /// Synthetic ids (`gen_<unitId>_<ordinal>`) are stable only within one
    /// call and must never be used as durable identifiers.
    pub async fn synthesize(&self, limit: usize) -> Result<Vec<GeneratedSentence>, EngineError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let units = self.corpus.recent_reading_units(self.max_unit_scan).await?;

        let mut generated: Vec<GeneratedSentence> = Vec::new();
        let mut lesson_cache: HashMap<LessonKey, LessonGroup> = HashMap::new();

        for unit in &units {
            let pairs = segment(&unit.source_paragraph, &unit.target_paragraph);

            let key = LessonKey::for_unit(unit);
            let lesson = match lesson_cache.get(&key) {
                Some(lesson) => lesson.clone(),
                None => {
                    let lesson = self.corpus.upsert_lesson_group(&key, &unit.title).await?;
                    lesson_cache.insert(key, lesson.clone());
                    lesson
                }
            };

            for pair in pairs {
                generated.push(GeneratedSentence {
                    synthetic_id: format!("gen_{}_{}", unit.id, generated.len()),
                    lesson: lesson.clone(),
                    source_text: pair.source,
                    target_text: pair.target,
                });

                if generated.len() >= limit {
                    tracing::debug!(
                        limit,
                        unit_id = %unit.id,
                        "synthesis limit reached mid-unit"
                    );
                    return Ok(generated);
                }
            }
        }

        Ok(generated)
    }
}
