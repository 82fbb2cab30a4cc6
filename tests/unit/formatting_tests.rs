/*!
 * Highlight formatting tests: span attribution and idempotence.
 */

use std::collections::HashSet;

use vocap::analysis::formatting::{Color, FormattingConfig, HighlightStyle, TextFormatter};
use vocap::analysis::{LexicalClass, TextAnalyzer};

#[test]
fn test_formatText_sameInputsTwice_shouldYieldAttributeEqualOutput() {
    let analysis = TextAnalyzer::new().analyze("The happiness arrived quickly today.");
    let config = FormattingConfig::default();
    let formatter = TextFormatter::new();

    let first = formatter.format_text(&analysis, &config);
    let second = formatter.format_text(&analysis, &config);

    assert_eq!(first, second);
    assert_eq!(first.to_ansi(), second.to_ansi());
}

#[test]
fn test_formatText_shouldOnlyHighlightConfiguredClasses() {
    let analysis = TextAnalyzer::new().analyze("The happiness arrived quickly today.");
    let config = FormattingConfig {
        highlighted_classes: HashSet::from([LexicalClass::Noun]),
        highlight_style: HighlightStyle::Underline,
        ..FormattingConfig::default()
    };

    let styled = TextFormatter::new().format_text(&analysis, &config);

    let happiness = analysis
        .word_analyses
        .iter()
        .find(|a| a.word == "happiness")
        .unwrap();
    assert!(styled.style_at(happiness.range.start).underline);

    let quickly = analysis
        .word_analyses
        .iter()
        .find(|a| a.word == "quickly")
        .unwrap();
    assert!(!styled.style_at(quickly.range.start).underline);
}

#[test]
fn test_formatText_spanRanges_shouldMatchWordRanges() {
    let analysis = TextAnalyzer::new().analyze("The happiness arrived quickly today.");
    let styled = TextFormatter::new().format_text(&analysis, &FormattingConfig::default());

    for span in &styled.spans {
        let covered = &styled.text[span.range.clone()];
        let word = analysis
            .word_analyses
            .iter()
            .find(|a| a.range == span.range)
            .expect("every span maps to an analyzed word");
        assert_eq!(covered, word.word);
    }
}

#[test]
fn test_formatText_withEmptyAnalysis_shouldProduceEmptyStyledText() {
    let analysis = TextAnalyzer::new().analyze("");
    let styled = TextFormatter::new().format_text(&analysis, &FormattingConfig::default());

    assert!(styled.text.is_empty());
    assert!(styled.spans.is_empty());
    assert_eq!(styled.to_ansi(), "");
}

#[test]
fn test_highlightStyles_shouldResolveAgainstBase() {
    let analysis = TextAnalyzer::new().analyze("happiness");
    let formatter = TextFormatter::new();

    let bold_config = FormattingConfig {
        highlight_style: HighlightStyle::Bold,
        ..FormattingConfig::default()
    };
    let styled = formatter.format_text(&analysis, &bold_config);
    assert!(styled.style_at(0).bold);
    assert_eq!(styled.style_at(0).color, None);

    let color_config = FormattingConfig {
        highlight_style: HighlightStyle::BoldAndColor(Color::Magenta),
        ..FormattingConfig::default()
    };
    let styled = formatter.format_text(&analysis, &color_config);
    assert!(styled.style_at(0).bold);
    assert_eq!(styled.style_at(0).color, Some(Color::Magenta));
}
