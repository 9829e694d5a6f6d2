//! Central quiz engine: ratio-weighted test assembly.
//!
//! The engine owns the corpus and session collaborators plus the shuffle
//! randomness source. Grading and session accumulation live in
//! [`crate::session`]; both are methods on [`QuizEngine`].

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::error::EngineError;
use crate::model::{SessionMode, TestItem};
use crate::report::AssembleResponse;
use crate::synthesize::{SentenceSynthesizer, DEFAULT_MAX_UNIT_SCAN};
use crate::traits::{CorpusProvider, QuestionFilter, SessionStore};

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct QuizEngineConfig {
    /// Maximum reading units scanned per sentence-synthesis pass.
    pub max_unit_scan: usize,
}

impl Default for QuizEngineConfig {
    fn default() -> Self {
        QuizEngineConfig {
            max_unit_scan: DEFAULT_MAX_UNIT_SCAN,
        }
    }
}

/// Parameters for assembling a mixed-type test.
///
/// Ratios are not required to sum to 1 and are never renormalized: each
/// category's target is computed independently and the combined pool is
/// truncated to `count` afterward.
#[derive(Debug, Clone)]
pub struct AssembleRequest {
    pub count: usize,
    pub vocab_ratio: f64,
    pub sentence_ratio: f64,
    pub reading_ratio: f64,
}

impl Default for AssembleRequest {
    fn default() -> Self {
        AssembleRequest {
            count: 50,
            vocab_ratio: 0.4,
            sentence_ratio: 0.3,
            reading_ratio: 0.3,
        }
    }
}

impl AssembleRequest {
    fn validate(&self) -> Result<(), EngineError> {
        if self.count == 0 {
            return Err(EngineError::Validation("count must be at least 1".into()));
        }
        for (name, ratio) in [
            ("vocab_ratio", self.vocab_ratio),
            ("sentence_ratio", self.sentence_ratio),
            ("reading_ratio", self.reading_ratio),
        ] {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(EngineError::Validation(format!(
                    "{name} must be a non-negative finite number, got {ratio}"
                )));
            }
        }
        Ok(())
    }
}

/// Per-category item target: `round(count * ratio)`, computed independently
/// of the other categories.
pub(crate) fn category_target(count: usize, ratio: f64) -> usize {
    (count as f64 * ratio).round() as usize
}

/// The test-assembly and grading engine.
///
/// All operations are request-scoped and single-pass; the engine holds no
/// cross-request mutable state beyond the injected randomness source.
pub struct QuizEngine<R: Rng + Send = StdRng> {
    pub(crate) corpus: Arc<dyn CorpusProvider>,
    pub(crate) sessions: Arc<dyn SessionStore>,
    config: QuizEngineConfig,
    rng: Mutex<R>,
}

impl QuizEngine<StdRng> {
    pub fn new(corpus: Arc<dyn CorpusProvider>, sessions: Arc<dyn SessionStore>) -> Self {
        QuizEngine::with_rng(
            corpus,
            sessions,
            QuizEngineConfig::default(),
            StdRng::from_entropy(),
        )
    }
}

impl<R: Rng + Send> QuizEngine<R> {
    /// Build an engine with an explicit randomness source, so tests can
    /// substitute a seeded generator without changing the algorithm.
    pub fn with_rng(
        corpus: Arc<dyn CorpusProvider>,
        sessions: Arc<dyn SessionStore>,
        config: QuizEngineConfig,
        rng: R,
    ) -> Self {
        QuizEngine {
            corpus,
            sessions,
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Assemble a ratio-weighted, size-bounded, randomly ordered test.
    ///
    /// A session is opened before returning, so the session id is valid
    /// for answer submission even when zero items were assembled. Every
    /// returned item is answer-stripped. An empty category degrades to
    /// zero items for that kind, never an error; when the authored
    /// sentence pool is empty, sentence items are synthesized from
    /// reading units instead (display-only `gen_*` ids).
    pub async fn assemble(
        &self,
        owner_id: Uuid,
        request: AssembleRequest,
    ) -> Result<AssembleResponse, EngineError> {
        request.validate()?;

        let vocab_target = category_target(request.count, request.vocab_ratio);
        let sentence_target = category_target(request.count, request.sentence_ratio);
        let reading_target = category_target(request.count, request.reading_ratio);

        let mut items: Vec<TestItem> = Vec::new();

        if vocab_target > 0 {
            let available = self.corpus.vocab_count().await?;
            let sample = self.corpus.sample_vocab(vocab_target.min(available)).await?;
            items.extend(sample.iter().map(TestItem::from_vocab));
        }

        if sentence_target > 0 {
            let available = self.corpus.sentence_count().await?;
            if available > 0 {
                let sample = self
                    .corpus
                    .sample_sentences(sentence_target.min(available))
                    .await?;
                items.extend(sample.iter().map(TestItem::from_sentence));
            } else {
                let synthesizer = SentenceSynthesizer::new(Arc::clone(&self.corpus))
                    .with_max_unit_scan(self.config.max_unit_scan);
                let generated = synthesizer.synthesize(sentence_target).await?;
                tracing::debug!(
                    generated = generated.len(),
                    target = sentence_target,
                    "authored sentence pool empty, synthesized from reading units"
                );
                items.extend(generated.iter().map(TestItem::from_generated));
            }
        }

        if reading_target > 0 {
            let filter = QuestionFilter::default();
            let available = self.corpus.reading_question_count(&filter).await?;
            let sample = self
                .corpus
                .sample_reading_questions(&filter, reading_target.min(available))
                .await?;
            items.extend(sample.iter().map(TestItem::from_question));
        }

        let session = self
            .sessions
            .create_session(owner_id, SessionMode::Test)
            .await?;

        {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| EngineError::Internal("rng lock poisoned".into()))?;
            items.shuffle(&mut *rng);
        }
        items.truncate(request.count);

        tracing::info!(
            session_id = %session.id,
            items = items.len(),
            requested = request.count,
            "assembled test"
        );

        Ok(AssembleResponse {
            session_id: session.id,
            items,
        })
    }
}
