/*!
 * Mock dictionary provider for testing.
 */

use async_trait::async_trait;
use isolang::Language;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::analysis::LexicalClass;
use crate::errors::DictionaryError;
use crate::language_utils;

use super::{Definition, DictionaryEntry, DictionaryProvider, Meaning};

/// Behavior mode for the mock dictionary
#[derive(Debug, Clone, PartialEq)]
pub enum MockDictionaryBehavior {
    /// Builds a plausible entry for whatever word is asked
    Working,
    /// Always fails with the given status code
    ApiFailure { status_code: u16 },
    /// Answers with no meanings, as for an unknown word
    UnknownWord,
}

/// Mock dictionary provider with scripted behavior
#[derive(Debug)]
pub struct MockDictionaryProvider {
    behavior: MockDictionaryBehavior,
    call_count: Arc<AtomicUsize>,
}

impl MockDictionaryProvider {
    pub fn new(behavior: MockDictionaryBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Provider that defines every word it is asked about
    pub fn working() -> Self {
        Self::new(MockDictionaryBehavior::Working)
    }

    /// Provider that always fails with an API error
    pub fn failing(status_code: u16) -> Self {
        Self::new(MockDictionaryBehavior::ApiFailure { status_code })
    }

    /// Provider that knows no words
    pub fn unknown_word() -> Self {
        Self::new(MockDictionaryBehavior::UnknownWord)
    }

    /// Shared counter of lookups made against this provider
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait]
impl DictionaryProvider for MockDictionaryProvider {
    fn is_available(&self) -> bool {
        true
    }

    async fn fetch_definition(
        &self,
        word: &str,
        lexical_class: Option<LexicalClass>,
        language: Option<Language>,
        _linguistic_context: Option<&str>,
    ) -> Result<DictionaryEntry, DictionaryError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let word = word.trim();
        if word.is_empty() {
            return Err(DictionaryError::InvalidInput(
                "word must not be empty".to_string(),
            ));
        }

        match &self.behavior {
            MockDictionaryBehavior::Working => Ok(DictionaryEntry {
                word: word.to_string(),
                language: language
                    .map(language_utils::language_code)
                    .unwrap_or_else(|| "en".to_string()),
                meanings: vec![Meaning {
                    part_of_speech: lexical_class
                        .map(|class| class.to_string())
                        .unwrap_or_else(|| "noun".to_string()),
                    definitions: vec![Definition {
                        definition: format!("mock definition of '{}'", word),
                        example: Some(format!("An example with '{}' in it.", word)),
                        synonyms: vec!["placeholder".to_string()],
                    }],
                }],
            }),
            MockDictionaryBehavior::ApiFailure { status_code } => Err(DictionaryError::ApiError {
                status_code: *status_code,
            }),
            MockDictionaryBehavior::UnknownWord => Ok(DictionaryEntry {
                word: word.to_string(),
                language: "en".to_string(),
                meanings: Vec::new(),
            }),
        }
    }
}
