/*!
 * App configuration tests.
 */

use vocap::analysis::LexicalClass;
use vocap::app_config::{Config, LogLevel};
use vocap::ocr::OcrProviderKind;

use crate::common::create_temp_dir;

#[test]
fn test_defaultConfig_shouldUseLocalProviderAndInfoLogging() {
    let config = Config::default();

    assert_eq!(config.ocr.provider, OcrProviderKind::Tesseract);
    assert_eq!(config.ocr.tesseract.binary, "tesseract");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config
        .formatting
        .highlighted_classes
        .contains(&LexicalClass::Noun));
    assert!(config.validate().is_ok());
}

#[test]
fn test_saveAndLoad_shouldRoundTripConfiguration() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.ocr.provider = OcrProviderKind::OpenAi;
    config.ocr.openai.model = "gpt-4o".to_string();
    config.log_level = LogLevel::Trace;

    config.save(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.ocr.provider, OcrProviderKind::OpenAi);
    assert_eq!(loaded.ocr.openai.model, "gpt-4o");
    assert_eq!(loaded.log_level, LogLevel::Trace);
}

#[test]
fn test_fromFileOrDefault_withMissingFile_shouldWriteDefaultConfig() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("fresh").join("conf.json");

    let config = Config::from_file_or_default(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.ocr.provider, OcrProviderKind::Tesseract);
}

#[test]
fn test_fromFile_withPartialConfig_shouldApplySerdeDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{ "dictionary": { "model": "gpt-4o" }, "log_level": "debug" }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.dictionary.model, "gpt-4o");
    assert_eq!(config.dictionary.timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.ocr.provider, OcrProviderKind::Tesseract);
}

#[test]
fn test_validate_shouldRejectEmptyModelNames() {
    let mut config = Config::default();
    config.dictionary.model = "  ".to_string();
    assert!(config.validate().is_err());
}
