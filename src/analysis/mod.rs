/*!
 * Word-level text analysis.
 *
 * This module contains the analysis data model shared by the whole pipeline:
 * - `LexicalClass`: closed set of grammatical categories
 * - `WordAnalysis`: one tagged word span
 * - `TextAnalysisResult`: the ordered analysis of a text with range lookups
 *
 * All ranges are byte offsets into the analyzed string, and every consumer
 * (formatter, selection resolver) works in the same offset space.
 */

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use isolang::Language;
use serde::{Deserialize, Serialize};

pub mod analyzer;
pub mod formatting;
pub mod lexicon;
pub mod selection;

// Re-export main types
pub use analyzer::TextAnalyzer;
pub use formatting::{FormattingConfig, HighlightStyle, StyledText, TextFormatter};
pub use selection::{WordSelection, WordSelector};

/// Grammatical category of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LexicalClass {
    Noun,
    Adjective,
    Verb,
    Adverb,
    Pronoun,
    Determiner,
    Particle,
    Preposition,
    Number,
    Conjunction,
    Interjection,
    Classifier,
    Idiom,
}

impl LexicalClass {
    /// Capitalized name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Noun => "Noun",
            Self::Adjective => "Adjective",
            Self::Verb => "Verb",
            Self::Adverb => "Adverb",
            Self::Pronoun => "Pronoun",
            Self::Determiner => "Determiner",
            Self::Particle => "Particle",
            Self::Preposition => "Preposition",
            Self::Number => "Number",
            Self::Conjunction => "Conjunction",
            Self::Interjection => "Interjection",
            Self::Classifier => "Classifier",
            Self::Idiom => "Idiom",
        }
    }
}

// Lowercase identifier, used in prompts and config files
impl fmt::Display for LexicalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name().to_lowercase())
    }
}

impl std::str::FromStr for LexicalClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "noun" => Ok(Self::Noun),
            "adjective" => Ok(Self::Adjective),
            "verb" => Ok(Self::Verb),
            "adverb" => Ok(Self::Adverb),
            "pronoun" => Ok(Self::Pronoun),
            "determiner" => Ok(Self::Determiner),
            "particle" => Ok(Self::Particle),
            "preposition" => Ok(Self::Preposition),
            "number" => Ok(Self::Number),
            "conjunction" => Ok(Self::Conjunction),
            "interjection" => Ok(Self::Interjection),
            "classifier" => Ok(Self::Classifier),
            "idiom" => Ok(Self::Idiom),
            _ => Err(anyhow::anyhow!("Invalid lexical class: {}", s)),
        }
    }
}

/// Analysis of a single word in a text
#[derive(Debug, Clone, PartialEq)]
pub struct WordAnalysis {
    /// The analyzed word
    pub word: String,
    /// Byte range of the word in the original text
    pub range: Range<usize>,
    /// Lexical class of the word, if one could be determined
    pub lexical_class: Option<LexicalClass>,
    /// Detected language of the word
    pub language: Option<Language>,
}

/// Complete analysis of a text
///
/// Immutable once built; reanalysis produces a new value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextAnalysisResult {
    /// The original text that was analyzed
    pub original_text: String,
    /// Word analyses in order of appearance, with non-overlapping ranges
    pub word_analyses: Vec<WordAnalysis>,
}

impl TextAnalysisResult {
    /// Build a result from a text and its word analyses
    pub fn new(original_text: impl Into<String>, word_analyses: Vec<WordAnalysis>) -> Self {
        Self {
            original_text: original_text.into(),
            word_analyses,
        }
    }

    /// Whether the analysis holds no words at all
    pub fn is_empty(&self) -> bool {
        self.word_analyses.is_empty()
    }

    /// All words belonging to one of the given lexical classes
    pub fn words_with_classes(&self, classes: &HashSet<LexicalClass>) -> Vec<&WordAnalysis> {
        self.word_analyses
            .iter()
            .filter(|analysis| {
                analysis
                    .lexical_class
                    .is_some_and(|class| classes.contains(&class))
            })
            .collect()
    }

    /// First analysis whose range overlaps the given range
    pub fn analysis_overlapping(&self, range: &Range<usize>) -> Option<&WordAnalysis> {
        self.word_analyses
            .iter()
            .find(|analysis| intersection_len(&analysis.range, range) > 0)
    }

    /// Analysis covering exactly the given range
    pub fn analysis_for_exact_range(&self, range: &Range<usize>) -> Option<&WordAnalysis> {
        self.word_analyses
            .iter()
            .find(|analysis| analysis.range == *range)
    }

    /// Analysis that best matches the given range, by largest intersection.
    ///
    /// On an exact intersection-length tie the earliest analysis in document
    /// order wins.
    pub fn best_matching_analysis(&self, range: &Range<usize>) -> Option<&WordAnalysis> {
        let mut best_match: Option<&WordAnalysis> = None;
        let mut largest_intersection = 0;

        for analysis in &self.word_analyses {
            let intersection = intersection_len(&analysis.range, range);
            if intersection > largest_intersection {
                largest_intersection = intersection;
                best_match = Some(analysis);
            }
        }

        best_match
    }
}

/// Length of the intersection of two byte ranges
pub(crate) fn intersection_len(a: &Range<usize>, b: &Range<usize>) -> usize {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    end.saturating_sub(start)
}
