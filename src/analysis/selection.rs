/*!
 * Tap-to-word resolution.
 *
 * Turns a caret offset in the displayed text into the word the user meant:
 * expand to the enclosing word boundary, strip surrounding punctuation, look
 * up the best-overlapping analysis, and gather the linguistic context the
 * dictionary lookup wants (a five-word window plus the containing sentence).
 */

use std::ops::Range;

use isolang::Language;
use log::debug;
use unicode_segmentation::UnicodeSegmentation;

use super::{LexicalClass, TextAnalysisResult};

/// Number of context words around a selection, selection included
const CONTEXT_WINDOW_WORDS: usize = 5;

/// A resolved word selection
#[derive(Debug, Clone, PartialEq)]
pub struct WordSelection {
    /// The selected word with surrounding punctuation stripped
    pub word: String,
    /// Byte range of the cleaned word in the analyzed text
    pub range: Range<usize>,
    /// Lexical class from the best-matching analysis
    pub lexical_class: Option<LexicalClass>,
    /// Language from the best-matching analysis
    pub language: Option<Language>,
    /// Window of surrounding words for dictionary disambiguation
    pub linguistic_context: String,
    /// The sentence the selection appears in
    pub sentence: String,
}

/// Resolves caret offsets against a text analysis
#[derive(Debug)]
pub struct WordSelector<'a> {
    analysis: &'a TextAnalysisResult,
}

impl<'a> WordSelector<'a> {
    pub fn new(analysis: &'a TextAnalysisResult) -> Self {
        Self { analysis }
    }

    /// Resolve a byte offset to the enclosing word.
    ///
    /// Offsets past the end of the text clamp to the final word. A position
    /// that only covers punctuation or whitespace resolves to `None` and no
    /// further action is taken.
    pub fn resolve(&self, offset: usize) -> Option<WordSelection> {
        let text = self.analysis.original_text.as_str();
        if text.is_empty() {
            return None;
        }

        let (segment_start, segment) = self.enclosing_segment(offset)?;

        // Strip leading/trailing non-alphanumeric characters
        let leading = segment.char_indices().find(|(_, c)| c.is_alphanumeric());
        let Some((relative_start, _)) = leading else {
            debug!("Selection at offset {} covers no word characters", offset);
            return None;
        };
        let relative_end = segment
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_alphanumeric())
            .map(|(index, c)| index + c.len_utf8())
            .unwrap_or(segment.len());

        let range = segment_start + relative_start..segment_start + relative_end;
        let word = text[range.clone()].to_string();

        let best_match = self.analysis.best_matching_analysis(&range);

        Some(WordSelection {
            linguistic_context: self.context_window(&range),
            sentence: self.containing_sentence(&word),
            lexical_class: best_match.and_then(|analysis| analysis.lexical_class),
            language: best_match.and_then(|analysis| analysis.language),
            word,
            range,
        })
    }

    /// The word-boundary segment containing the offset, clamping past-the-end
    /// offsets to the last segment
    fn enclosing_segment(&self, offset: usize) -> Option<(usize, &'a str)> {
        let text = self.analysis.original_text.as_str();
        let mut last = None;

        for (start, segment) in text.split_word_bound_indices() {
            if offset >= start && offset < start + segment.len() {
                return Some((start, segment));
            }
            last = Some((start, segment));
        }

        if offset >= text.len() {
            return last;
        }
        None
    }

    /// A window of up to five whitespace-delimited words centered on the
    /// selection, clamped at document boundaries
    fn context_window(&self, range: &Range<usize>) -> String {
        let text = self.analysis.original_text.as_str();
        let words: Vec<(usize, &str)> = text
            .split_whitespace()
            .map(|word| (offset_in(text, word), word))
            .collect();
        if words.is_empty() {
            return String::new();
        }

        let selected_index = words
            .iter()
            .position(|(start, word)| *start < range.end && range.start < start + word.len());
        let Some(selected_index) = selected_index else {
            return words
                .iter()
                .take(CONTEXT_WINDOW_WORDS)
                .map(|(_, word)| *word)
                .collect::<Vec<_>>()
                .join(" ");
        };

        let context_needed = CONTEXT_WINDOW_WORDS - 1;
        let before = (context_needed / 2).min(selected_index);
        let after = (context_needed - before).min(words.len() - selected_index - 1);

        words[selected_index - before..=selected_index + after]
            .iter()
            .map(|(_, word)| *word)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First sentence containing the word, falling back to the whole text
    fn containing_sentence(&self, word: &str) -> String {
        let text = self.analysis.original_text.as_str();
        let lowered = word.to_lowercase();

        text.split(['.', '!', '?'])
            .find(|sentence| sentence.to_lowercase().contains(&lowered))
            .map(|sentence| sentence.trim().to_string())
            .unwrap_or_else(|| text.to_string())
    }
}

/// Byte offset of a subslice within its parent string
fn offset_in(parent: &str, slice: &str) -> usize {
    slice.as_ptr() as usize - parent.as_ptr() as usize
}
