/*!
 * Tap-to-word resolution tests: cleaning, best-overlap lookup, context.
 */

use vocap::analysis::selection::WordSelector;
use vocap::analysis::{LexicalClass, TextAnalyzer};

fn analyze(text: &str) -> vocap::analysis::TextAnalysisResult {
    TextAnalyzer::new().analyze(text)
}

#[test]
fn test_resolve_withWordFollowedByComma_shouldStripTrailingPunctuation() {
    let analysis = analyze("take this word, for example");
    let selector = WordSelector::new(&analysis);

    // Offset inside "word"
    let offset = analysis.original_text.find("word").unwrap() + 1;
    let selection = selector.resolve(offset).unwrap();

    assert_eq!(selection.word, "word");
    assert!(!selection.word.contains(','));
}

#[test]
fn test_resolve_onPurePunctuationSpan_shouldTakeNoAction() {
    let analysis = analyze("before ... after");
    let selector = WordSelector::new(&analysis);

    let offset = analysis.original_text.find("...").unwrap() + 1;
    assert!(selector.resolve(offset).is_none());
}

#[test]
fn test_resolve_shouldUseBestOverlapNotFirstMatch() {
    let analysis = analyze("The happiness arrived quickly today.");
    let selector = WordSelector::new(&analysis);

    let offset = analysis.original_text.find("quickly").unwrap() + 3;
    let selection = selector.resolve(offset).unwrap();

    assert_eq!(selection.word, "quickly");
    assert_eq!(selection.lexical_class, Some(LexicalClass::Adverb));
}

#[test]
fn test_resolve_shouldProduceFiveWordContextWindow() {
    let analysis = analyze("alpha beta gamma delta epsilon zeta eta");
    let selector = WordSelector::new(&analysis);

    let offset = analysis.original_text.find("delta").unwrap();
    let selection = selector.resolve(offset).unwrap();

    assert_eq!(selection.linguistic_context, "beta gamma delta epsilon zeta");
    assert_eq!(selection.linguistic_context.split_whitespace().count(), 5);
}

#[test]
fn test_resolve_nearDocumentEdges_shouldClampContextWindow() {
    let analysis = analyze("alpha beta gamma delta epsilon zeta eta");
    let selector = WordSelector::new(&analysis);

    let first = selector.resolve(0).unwrap();
    assert_eq!(first.linguistic_context, "alpha beta gamma delta epsilon");

    // rfind: "eta" also occurs inside "beta" and "zeta"
    let offset = analysis.original_text.rfind("eta").unwrap();
    let last = selector.resolve(offset).unwrap();
    assert_eq!(last.word, "eta");
    assert_eq!(last.linguistic_context, "epsilon zeta eta");
}

#[test]
fn test_resolve_shouldExtractContainingSentence() {
    let analysis = analyze("First things first. The word lives here! Not there.");
    let selector = WordSelector::new(&analysis);

    let offset = analysis.original_text.find("lives").unwrap();
    let selection = selector.resolve(offset).unwrap();
    assert_eq!(selection.sentence, "The word lives here");
}

#[test]
fn test_resolve_withShortDocument_shouldUseWholeTextAsFallbackWindow() {
    let analysis = analyze("only two");
    let selector = WordSelector::new(&analysis);

    let selection = selector.resolve(0).unwrap();
    assert_eq!(selection.linguistic_context, "only two");
}
