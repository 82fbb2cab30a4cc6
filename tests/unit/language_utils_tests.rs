/*!
 * Language utility tests.
 */

use isolang::Language;
use vocap::language_utils::{
    detect_language, language_code, language_codes_match, language_from_code, language_name,
};

#[test]
fn test_detectLanguage_withClearEnglishParagraph_shouldReturnEnglish() {
    let text = "The weather was bright and the streets were full of people walking \
                slowly toward the market square in the early morning light.";
    assert_eq!(detect_language(text), Some(Language::Eng));
}

#[test]
fn test_detectLanguage_withBlankInput_shouldReturnNone() {
    assert_eq!(detect_language(""), None);
    assert_eq!(detect_language("\n  \t"), None);
}

#[test]
fn test_languageCode_shouldPreferShortCode() {
    assert_eq!(language_code(Language::Eng), "en");
    assert_eq!(language_code(Language::Deu), "de");
}

#[test]
fn test_languageName_shouldReturnEnglishName() {
    assert_eq!(language_name(Language::Spa), "Spanish");
    assert_eq!(language_name(Language::Eng), "English");
}

#[test]
fn test_languageFromCode_shouldAcceptTwoAndThreeLetterCodes() {
    assert_eq!(language_from_code("es"), Some(Language::Spa));
    assert_eq!(language_from_code("spa"), Some(Language::Spa));
    assert_eq!(language_from_code(" ES "), Some(Language::Spa));
    assert_eq!(language_from_code("nope"), None);
}

#[test]
fn test_languageCodesMatch_shouldCompareAcrossCodeLengths() {
    assert!(language_codes_match("es", "spa"));
    assert!(!language_codes_match("es", "en"));
    assert!(!language_codes_match("", "en"));
}
