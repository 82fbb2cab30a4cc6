/*!
 * Text analyzer tests: tokenization, tagging, range lookups.
 */

use isolang::Language;
use vocap::analysis::{LexicalClass, TextAnalysisResult, TextAnalyzer, WordAnalysis};

fn word(word: &str, start: usize, end: usize) -> WordAnalysis {
    WordAnalysis {
        word: word.to_string(),
        range: start..end,
        lexical_class: Some(LexicalClass::Noun),
        language: Some(Language::Eng),
    }
}

#[test]
fn test_analyze_withEmptyString_shouldReturnZeroWordsWithoutError() {
    let result = TextAnalyzer::new().analyze("");
    assert_eq!(result.word_analyses.len(), 0);
    assert_eq!(result.original_text, "");
}

#[test]
fn test_analyze_shouldSkipPunctuationAndWhitespace() {
    let result = TextAnalyzer::new().analyze("Hello, world! (42)");

    let words: Vec<&str> = result.word_analyses.iter().map(|a| a.word.as_str()).collect();
    assert_eq!(words, vec!["Hello", "world", "42"]);
}

#[test]
fn test_analyze_shouldDetectOneLanguageForWholeText() {
    let text = "El rápido zorro marrón salta sobre el perro perezoso en el jardín.";
    let result = TextAnalyzer::new().analyze(text);

    let languages: Vec<Option<Language>> =
        result.word_analyses.iter().map(|a| a.language).collect();
    assert!(!languages.is_empty());
    // Every word carries the same detected language
    assert!(languages.iter().all(|l| *l == Some(Language::Spa)));
}

#[test]
fn test_analyze_shouldTagNumberTokens() {
    let result = TextAnalyzer::new().analyze("Chapter 42 begins");
    let number = result.word_analyses.iter().find(|a| a.word == "42").unwrap();
    assert_eq!(number.lexical_class, Some(LexicalClass::Number));
}

#[test]
fn test_bestMatchingAnalysis_withClearWinner_shouldSelectLargestIntersection() {
    // Ranges [0,5) and [3,8); query [2,7) intersects them over 3 and 4 bytes
    let result =
        TextAnalysisResult::new("abcdefgh", vec![word("abcde", 0, 5), word("defgh", 3, 8)]);

    let best = result.best_matching_analysis(&(2..7)).unwrap();
    assert_eq!(best.word, "defgh");
}

#[test]
fn test_bestMatchingAnalysis_withExactTie_shouldSelectFirstInDocumentOrder() {
    // Ranges [0,5) and [3,8); query [2,6) intersects both over exactly 3 bytes
    let result =
        TextAnalysisResult::new("abcdefgh", vec![word("abcde", 0, 5), word("defgh", 3, 8)]);

    let best = result.best_matching_analysis(&(2..6)).unwrap();
    assert_eq!(best.word, "abcde");
}

#[test]
fn test_analysisOverlapping_shouldReturnFirstOverlapOnly() {
    let result =
        TextAnalysisResult::new("abcdefgh", vec![word("abcde", 0, 5), word("defgh", 3, 8)]);

    // Overlap lookup takes the first hit even when a later one overlaps more
    let first = result.analysis_overlapping(&(4..8)).unwrap();
    assert_eq!(first.word, "abcde");
}

#[test]
fn test_analyze_reanalysis_shouldNotMutatePreviousResult() {
    let analyzer = TextAnalyzer::new();
    let first = analyzer.analyze("the first text");
    let snapshot = first.clone();

    let _second = analyzer.analyze("a completely different text entirely");
    assert_eq!(first, snapshot);
}
