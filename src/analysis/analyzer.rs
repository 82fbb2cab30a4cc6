/*!
 * Text analyzer: tokenization, tagging and language detection.
 */

use log::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::language_utils;

use super::{lexicon, TextAnalysisResult, WordAnalysis};

/// Analyzes raw text into an ordered list of tagged word spans.
///
/// The dominant language is detected once for the whole text and assigned to
/// every word; tagging is per token. Analysis never fails: text without any
/// recognizable words simply yields an empty result.
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer;

impl TextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze a text into word-level lexical information
    pub fn analyze(&self, text: &str) -> TextAnalysisResult {
        if text.is_empty() {
            return TextAnalysisResult::new(text, Vec::new());
        }

        let language = language_utils::detect_language(text);
        debug!(
            "Analyzing {} bytes of text, detected language: {:?}",
            text.len(),
            language.map(language_utils::language_code)
        );

        let mut word_analyses = Vec::new();
        for (offset, segment) in text.split_word_bound_indices() {
            // Word boundaries also yield whitespace and punctuation segments
            if !segment.chars().any(char::is_alphanumeric) {
                continue;
            }

            word_analyses.push(WordAnalysis {
                word: segment.to_string(),
                range: offset..offset + segment.len(),
                lexical_class: lexicon::tag(segment, language),
                language,
            });
        }

        TextAnalysisResult::new(text, word_analyses)
    }
}
