//! Paragraph segmentation into aligned sentence pairs.
//!
//! Each side of a bilingual paragraph pair is split on its own language's
//! sentence-terminal punctuation, then the two sequences are paired
//! positionally by index. This is a deliberate simplification, not a
//! translation-aware aligner: pair i of the source is matched with pair i
//! of the target regardless of semantic correspondence.

/// Sentence-terminal marks for the source script (wide-form punctuation).
const SOURCE_TERMINALS: [char; 4] = ['。', '！', '？', '；'];

/// Sentence-terminal marks for the target language.
const TARGET_TERMINALS: [char; 4] = ['.', '!', '?', ';'];

/// An aligned sentence pair produced by segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    pub source: String,
    pub target: String,
}

fn split_on(paragraph: &str, terminals: &[char]) -> Vec<String> {
    paragraph
        .split(|c: char| c == '\n' || terminals.contains(&c))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a source-script paragraph on wide-form terminal marks and newlines.
pub fn split_source_paragraph(paragraph: &str) -> Vec<String> {
    split_on(paragraph, &SOURCE_TERMINALS)
}

/// Split a target-language paragraph on narrow terminal marks, semicolon,
/// and newlines.
pub fn split_target_paragraph(paragraph: &str) -> Vec<String> {
    split_on(paragraph, &TARGET_TERMINALS)
}

/// Segment a bilingual paragraph pair into aligned sentence pairs.
///
/// Pure function of its two inputs. Pairs are kept only while both sides
/// have a non-empty sentence at the same index; the longer side's tail is
/// dropped.
pub fn segment(source_paragraph: &str, target_paragraph: &str) -> Vec<SentencePair> {
    split_source_paragraph(source_paragraph)
        .into_iter()
        .zip(split_target_paragraph(target_paragraph))
        .map(|(source, target)| SentencePair { source, target })
        .collect()
}
