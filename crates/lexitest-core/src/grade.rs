//! Per-kind answer equivalence rules.
//!
//! Grading compares a submitted answer against the authoritative corpus
//! record under a rule chosen by item kind. Evaluation is pure; resolving
//! the authoritative record and appending the answer record happen in the
//! session layer.

use crate::model::{AuthoredSentence, QuestionKind, ReadingQuestion, VocabEntry};

/// A borrowed view of the authoritative entity an answer is graded against.
#[derive(Debug)]
pub enum Authority<'a> {
    Vocab(&'a VocabEntry),
    Sentence(&'a AuthoredSentence),
    Reading(&'a ReadingQuestion),
}

/// The outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub is_correct: bool,
    pub canonical_answer: String,
}

impl Verdict {
    /// The verdict for an unresolvable or ungradable item: incorrect,
    /// with no canonical answer to report.
    pub fn unresolved() -> Self {
        Verdict {
            is_correct: false,
            canonical_answer: String::new(),
        }
    }
}

/// Grade a submitted answer against its authoritative record.
///
/// All comparisons trim surrounding whitespace first. An empty submission
/// or an empty canonical answer always grades incorrect; malformed input
/// never produces an error.
pub fn evaluate(authority: &Authority<'_>, submitted: &str) -> Verdict {
    let submitted = submitted.trim();

    let (canonical, is_correct) = match authority {
        Authority::Vocab(vocab) => {
            let canonical = vocab.hanzi.trim();
            (canonical, submitted == canonical)
        }
        Authority::Sentence(sentence) => {
            let canonical = sentence.correct_answer().trim();
            let matched = if sentence.has_options() {
                // The stored answer is one of the presented options.
                submitted == canonical
            } else {
                eq_ignore_case(submitted, canonical)
            };
            (canonical, matched)
        }
        Authority::Reading(question) => {
            let canonical = question.answer.canonical_text().trim();
            let matched = match question.kind {
                QuestionKind::Mcq => submitted == canonical,
                QuestionKind::Fill => eq_ignore_case(submitted, canonical),
                // Lenient by intent: equality or containment either way,
                // favoring recall over precision.
                QuestionKind::Translate => contains_ignore_case(submitted, canonical),
            };
            (canonical, matched)
        }
    };

    Verdict {
        is_correct: is_correct && !submitted.is_empty() && !canonical.is_empty(),
        canonical_answer: canonical.to_string(),
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn contains_ignore_case(submitted: &str, canonical: &str) -> bool {
    let submitted = submitted.to_lowercase();
    let canonical = canonical.to_lowercase();
    submitted == canonical || submitted.contains(&canonical) || canonical.contains(&submitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerKey;
    use chrono::Utc;
    use uuid::Uuid;

    fn vocab(hanzi: &str) -> VocabEntry {
        VocabEntry {
            id: Uuid::new_v4(),
            hanzi: hanzi.into(),
            pinyin: "pīnyīn".into(),
            meaning: "meaning".into(),
            audio_ref: None,
            tag: None,
            created_at: Utc::now(),
        }
    }

    fn sentence(
        target: &str,
        options: Option<Vec<&str>>,
        correct_answer: Option<&str>,
    ) -> AuthoredSentence {
        AuthoredSentence {
            id: Uuid::new_v4(),
            lesson_id: Uuid::new_v4(),
            source_text: "原文".into(),
            target_text: target.into(),
            options: options.map(|o| o.into_iter().map(str::to_string).collect()),
            correct_answer: correct_answer.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn question(kind: QuestionKind, answer: AnswerKey) -> ReadingQuestion {
        ReadingQuestion {
            id: Uuid::new_v4(),
            unit_id: Uuid::new_v4(),
            prompt_text: "prompt".into(),
            options: None,
            answer,
            kind,
            difficulty: Default::default(),
        }
    }

    #[test]
    fn vocab_requires_exact_hanzi() {
        let entry = vocab("你好");
        assert!(evaluate(&Authority::Vocab(&entry), "你好").is_correct);
        assert!(evaluate(&Authority::Vocab(&entry), "  你好  ").is_correct);
        assert!(!evaluate(&Authority::Vocab(&entry), "您好").is_correct);
    }

    #[test]
    fn sentence_with_options_is_exact() {
        let s = sentence("Hôm nay trời đẹp", Some(vec!["a", "b"]), Some("Hôm nay trời đẹp"));
        assert!(evaluate(&Authority::Sentence(&s), "Hôm nay trời đẹp").is_correct);
        assert!(!evaluate(&Authority::Sentence(&s), "hôm nay trời đẹp").is_correct);
    }

    #[test]
    fn free_form_sentence_ignores_case() {
        let s = sentence("Hôm nay trời đẹp", None, None);
        assert!(evaluate(&Authority::Sentence(&s), "HÔM NAY TRỜI ĐẸP").is_correct);
        assert!(!evaluate(&Authority::Sentence(&s), "trời xấu").is_correct);
    }

    #[test]
    fn free_form_sentence_falls_back_to_target_text() {
        let s = sentence("Tôi đi học", None, None);
        let verdict = evaluate(&Authority::Sentence(&s), "tôi đi học");
        assert!(verdict.is_correct);
        assert_eq!(verdict.canonical_answer, "Tôi đi học");
    }

    #[test]
    fn mcq_is_case_sensitive() {
        let q = question(QuestionKind::Mcq, AnswerKey::Plain("Đáp án B".into()));
        assert!(evaluate(&Authority::Reading(&q), "Đáp án B").is_correct);
        assert!(!evaluate(&Authority::Reading(&q), "đáp án b").is_correct);
    }

    #[test]
    fn fill_in_ignores_case() {
        let q = question(QuestionKind::Fill, AnswerKey::Plain("hello".into()));
        assert!(evaluate(&Authority::Reading(&q), "Hello").is_correct);
        assert!(!evaluate(&Authority::Reading(&q), "goodbye").is_correct);
    }

    #[test]
    fn translate_accepts_containment_either_way() {
        let q = question(QuestionKind::Translate, AnswerKey::Plain("đẹp".into()));
        assert!(evaluate(&Authority::Reading(&q), "rất đẹp").is_correct);
        assert!(!evaluate(&Authority::Reading(&q), "xấu").is_correct);

        let longer = question(QuestionKind::Translate, AnswerKey::Plain("rất đẹp".into()));
        assert!(evaluate(&Authority::Reading(&longer), "đẹp").is_correct);
    }

    #[test]
    fn structured_answer_reads_text_field() {
        let q = question(
            QuestionKind::Fill,
            AnswerKey::Structured {
                text: Some("xin chào".into()),
                value: None,
            },
        );
        let verdict = evaluate(&Authority::Reading(&q), "Xin Chào");
        assert!(verdict.is_correct);
        assert_eq!(verdict.canonical_answer, "xin chào");
    }

    #[test]
    fn empty_submission_is_always_incorrect() {
        let entry = vocab("你好");
        assert!(!evaluate(&Authority::Vocab(&entry), "").is_correct);
        assert!(!evaluate(&Authority::Vocab(&entry), "   ").is_correct);

        let q = question(QuestionKind::Translate, AnswerKey::Plain("đẹp".into()));
        assert!(!evaluate(&Authority::Reading(&q), "").is_correct);
    }

    #[test]
    fn empty_canonical_answer_never_matches() {
        // An empty canonical would otherwise satisfy translate containment
        // for any submission.
        let q = question(QuestionKind::Translate, AnswerKey::Plain(String::new()));
        assert!(!evaluate(&Authority::Reading(&q), "anything").is_correct);
    }
}
