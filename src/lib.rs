/*!
 * # vocap - Vocabulary Capture
 *
 * A Rust library for building a vocabulary list from photographed pages of text.
 *
 * ## Features
 *
 * - Extract text from page images using interchangeable OCR providers:
 *   - Tesseract (local CLI engine)
 *   - OpenAI vision models (remote)
 * - Repair hyphenated line-break artifacts in OCR output
 * - Tag every word with a lexical class and a detected language
 * - Highlight word classes for terminal display
 * - Resolve a caret position to the tapped word with its grammatical context
 * - Fetch dictionary definitions enriched by part of speech, language and
 *   sentence context
 * - Persist words with contextual sentences and captured images for review
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `ocr`: OCR provider abstraction and line reconstruction:
 *   - `ocr::merge`: Dehyphenation of line-wrapped words
 *   - `ocr::tesseract`: Local Tesseract CLI provider
 *   - `ocr::openai`: Remote vision-model provider
 * - `analysis`: Word-level text analysis:
 *   - `analysis::analyzer`: Tokenization, tagging and language detection
 *   - `analysis::formatting`: Lexical-class highlighting
 *   - `analysis::selection`: Tap-to-word resolution
 * - `dictionary`: Definition lookup services
 * - `database`: SQLite persistence for the vocabulary list
 * - `providers`: Raw API clients shared by OCR and dictionary services
 * - `app_controller`: Main application controller
 * - `language_utils`: Language detection and ISO code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod ocr;
pub mod analysis;
pub mod dictionary;
pub mod database;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use ocr::{OcrProvider, OcrResult, OcrServiceManager, RecognizedLine};
pub use analysis::{LexicalClass, TextAnalysisResult, WordAnalysis};
pub use analysis::analyzer::TextAnalyzer;
pub use dictionary::{DictionaryEntry, DictionaryProvider};
pub use language_utils::{detect_language, language_code, language_name};
pub use errors::{AppError, DictionaryError, OcrError, ProviderError};
