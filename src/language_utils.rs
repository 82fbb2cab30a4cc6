use isolang::Language;

/// Language utilities for detection and ISO code handling
///
/// Detection runs over a whole text blob and yields a single dominant
/// language; the analyzer stamps that one language on every word it emits
/// rather than re-detecting per token.
/// Minimum detector confidence before a guess is trusted
const MIN_DETECTION_CONFIDENCE: f64 = 0.2;

/// Detect the dominant language of a text
///
/// Returns `None` for empty input or when the detector has no usable guess.
pub fn detect_language(text: &str) -> Option<Language> {
    if text.trim().is_empty() {
        return None;
    }

    let info = whatlang::detect(text)?;
    if !info.is_reliable() && info.confidence() < MIN_DETECTION_CONFIDENCE {
        return None;
    }

    // whatlang reports ISO 639-3 codes
    Language::from_639_3(info.lang().code())
}

/// Short ISO code for a language: 639-1 when one exists, 639-3 otherwise
pub fn language_code(language: Language) -> String {
    language
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| language.to_639_3().to_string())
}

/// English display name for a language
pub fn language_name(language: Language) -> &'static str {
    language.to_name()
}

/// Parse a language out of a 2- or 3-letter ISO code
pub fn language_from_code(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }
}

/// Check if two language codes refer to the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (language_from_code(code1), language_from_code(code2)) {
        (Some(first), Some(second)) => first == second,
        _ => false,
    }
}
