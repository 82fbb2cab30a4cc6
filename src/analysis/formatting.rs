/*!
 * Lexical-class highlighting.
 *
 * Formatting is a pure function from an analysis plus a configuration to a
 * `StyledText`: the original text, a base style, and one styled span per
 * highlighted word. The span model carries resolved attributes so two
 * formatting passes over the same inputs compare equal, and rendering to
 * ANSI for the terminal is a separate, final step.
 */

use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{LexicalClass, TextAnalysisResult};

/// Terminal palette colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    fn ansi_code(self) -> u8 {
        match self {
            Color::Black => 30,
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::White => 37,
        }
    }
}

/// Resolved display attributes for a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub color: Option<Color>,
}

/// How highlighted words should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "color", rename_all = "snake_case")]
pub enum HighlightStyle {
    Bold,
    Color(Color),
    BoldAndColor(Color),
    Underline,
}

impl HighlightStyle {
    /// Resolve the highlight against a base style
    ///
    /// Attributes the variant does not mention are kept from the base, the
    /// way the surrounding text is styled.
    pub fn apply_to(self, base: TextStyle) -> TextStyle {
        let mut style = base;
        match self {
            HighlightStyle::Bold => style.bold = true,
            HighlightStyle::Color(color) => style.color = Some(color),
            HighlightStyle::BoldAndColor(color) => {
                style.bold = true;
                style.color = Some(color);
            }
            HighlightStyle::Underline => style.underline = true,
        }
        style
    }
}

/// Configuration for text formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingConfig {
    /// Style for non-highlighted text
    #[serde(default)]
    pub base_style: TextStyle,
    /// Lexical classes that should be highlighted
    pub highlighted_classes: HashSet<LexicalClass>,
    /// Style applied to highlighted words
    pub highlight_style: HighlightStyle,
}

impl FormattingConfig {
    /// Default configuration for vocabulary learning: emphasize the open
    /// word classes a reader is most likely to look up
    pub fn vocabulary_learning() -> Self {
        Self {
            base_style: TextStyle::default(),
            highlighted_classes: HashSet::from([
                LexicalClass::Noun,
                LexicalClass::Adjective,
                LexicalClass::Verb,
                LexicalClass::Adverb,
            ]),
            highlight_style: HighlightStyle::BoldAndColor(Color::Cyan),
        }
    }
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self::vocabulary_learning()
    }
}

/// A styled run within a `StyledText`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    /// Byte range of the run in the text
    pub range: Range<usize>,
    /// Resolved attributes for the run
    pub style: TextStyle,
}

/// A text with a base style and styled spans, in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText {
    pub text: String,
    pub base_style: TextStyle,
    pub spans: Vec<StyledSpan>,
}

impl StyledText {
    /// Resolved style at a byte offset
    pub fn style_at(&self, offset: usize) -> TextStyle {
        self.spans
            .iter()
            .find(|span| span.range.contains(&offset))
            .map(|span| span.style)
            .unwrap_or(self.base_style)
    }

    /// Render with ANSI escape sequences for terminal display
    pub fn to_ansi(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + self.spans.len() * 8);
        let mut cursor = 0usize;

        for span in &self.spans {
            if span.range.start > cursor {
                push_styled(&mut out, &self.text[cursor..span.range.start], self.base_style);
            }
            push_styled(&mut out, &self.text[span.range.clone()], span.style);
            cursor = span.range.end;
        }
        if cursor < self.text.len() {
            push_styled(&mut out, &self.text[cursor..], self.base_style);
        }

        out
    }
}

fn push_styled(out: &mut String, segment: &str, style: TextStyle) {
    let mut codes: Vec<String> = Vec::new();
    if style.bold {
        codes.push("1".to_string());
    }
    if style.underline {
        codes.push("4".to_string());
    }
    if let Some(color) = style.color {
        codes.push(color.ansi_code().to_string());
    }

    if codes.is_empty() {
        out.push_str(segment);
    } else {
        out.push_str(&format!("\x1B[{}m{}\x1B[0m", codes.join(";"), segment));
    }
}

/// Formats analyzed text for display
#[derive(Debug, Clone, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Apply the configuration's highlight style to every word whose lexical
    /// class is in the highlighted set
    pub fn format_text(
        &self,
        analysis: &TextAnalysisResult,
        config: &FormattingConfig,
    ) -> StyledText {
        let highlight = config.highlight_style.apply_to(config.base_style);

        let spans = analysis
            .word_analyses
            .iter()
            .filter(|word| {
                word.lexical_class
                    .is_some_and(|class| config.highlighted_classes.contains(&class))
            })
            .map(|word| StyledSpan {
                range: word.range.clone(),
                style: highlight,
            })
            .collect();

        StyledText {
            text: analysis.original_text.clone(),
            base_style: config.base_style,
            spans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::TextAnalyzer;

    fn sample_analysis() -> TextAnalysisResult {
        TextAnalyzer::new().analyze("The happiness arrived quickly.")
    }

    #[test]
    fn test_formatText_shouldHighlightConfiguredClasses() {
        let analysis = sample_analysis();
        let styled = TextFormatter::new().format_text(&analysis, &FormattingConfig::default());

        // "happiness" (noun) and "quickly" (adverb) are in the default set
        let happiness = analysis
            .word_analyses
            .iter()
            .find(|a| a.word == "happiness")
            .unwrap();
        assert_ne!(styled.style_at(happiness.range.start), styled.base_style);

        // "The" is a determiner and stays at the base style
        let the = analysis.word_analyses.iter().find(|a| a.word == "The").unwrap();
        assert_eq!(styled.style_at(the.range.start), styled.base_style);
    }

    #[test]
    fn test_formatText_calledTwice_shouldBeAttributeEqual() {
        let analysis = sample_analysis();
        let config = FormattingConfig::default();
        let formatter = TextFormatter::new();

        let first = formatter.format_text(&analysis, &config);
        let second = formatter.format_text(&analysis, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_formatText_withEmptyClassSet_shouldProduceNoSpans() {
        let analysis = sample_analysis();
        let config = FormattingConfig {
            highlighted_classes: HashSet::new(),
            ..FormattingConfig::default()
        };

        let styled = TextFormatter::new().format_text(&analysis, &config);
        assert!(styled.spans.is_empty());
        assert_eq!(styled.to_ansi(), analysis.original_text);
    }

    #[test]
    fn test_applyTo_shouldKeepUnmentionedBaseAttributes() {
        let base = TextStyle {
            bold: false,
            underline: false,
            color: Some(Color::White),
        };

        let bolded = HighlightStyle::Bold.apply_to(base);
        assert!(bolded.bold);
        assert_eq!(bolded.color, Some(Color::White));

        let colored = HighlightStyle::Color(Color::Red).apply_to(base);
        assert!(!colored.bold);
        assert_eq!(colored.color, Some(Color::Red));

        let underlined = HighlightStyle::Underline.apply_to(base);
        assert!(underlined.underline);
    }

    #[test]
    fn test_toAnsi_shouldWrapHighlightedSpansInEscapes() {
        let analysis = sample_analysis();
        let styled = TextFormatter::new().format_text(&analysis, &FormattingConfig::default());

        let rendered = styled.to_ansi();
        assert!(rendered.contains("\x1B[1;36mhappiness\x1B[0m"));
        assert!(rendered.contains("The "));
    }

    #[test]
    fn test_toAnsi_withPlainBaseStyle_shouldLeaveGapsUnescaped() {
        let styled = StyledText {
            text: "plain".to_string(),
            base_style: TextStyle::default(),
            spans: Vec::new(),
        };
        assert_eq!(styled.to_ansi(), "plain");
    }
}
