/*!
 * Dictionary lookup services.
 *
 * A lookup takes the selected word plus whatever grammatical context the
 * analysis produced (lexical class, language, surrounding sentence) and
 * returns a structured entry. Unlike the OCR boundary, lookups fail loudly:
 * the error set is finite and typed so the caller can show a precise
 * message.
 */

use async_trait::async_trait;
use isolang::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::LexicalClass;
use crate::errors::DictionaryError;

pub mod mock;
pub mod openai;

pub use mock::MockDictionaryProvider;
pub use openai::OpenAiDictionaryProvider;

/// One sense of a word within a meaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// The definition text
    pub definition: String,
    /// Example sentence, when the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Similar words
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// A group of definitions sharing a part of speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    /// Part of speech label, e.g. "noun"
    pub part_of_speech: String,
    /// Definitions under this part of speech
    pub definitions: Vec<Definition>,
}

/// A complete dictionary entry for a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// The defined word
    pub word: String,
    /// Language the entry is in (short ISO code)
    pub language: String,
    /// Meanings, may be empty when the word is unknown
    pub meanings: Vec<Meaning>,
}

impl DictionaryEntry {
    /// The first definition text, if any
    pub fn primary_definition(&self) -> Option<&str> {
        self.meanings
            .first()
            .and_then(|meaning| meaning.definitions.first())
            .map(|definition| definition.definition.as_str())
    }

    /// The first part-of-speech label, if any
    pub fn primary_part_of_speech(&self) -> Option<&str> {
        self.meanings
            .first()
            .map(|meaning| meaning.part_of_speech.as_str())
    }
}

impl fmt::Display for DictionaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.word, self.language)?;
        for meaning in &self.meanings {
            write!(f, "\n  ({})", meaning.part_of_speech)?;
            for definition in &meaning.definitions {
                write!(f, "\n    {}", definition.definition)?;
                if let Some(example) = &definition.example {
                    write!(f, "\n    e.g. {}", example)?;
                }
                if !definition.synonyms.is_empty() {
                    write!(f, "\n    syn: {}", definition.synonyms.join(", "))?;
                }
            }
        }
        Ok(())
    }
}

/// Common trait for dictionary lookup services
#[async_trait]
pub trait DictionaryProvider: Send + Sync + fmt::Debug {
    /// Whether the service can be used in this environment
    fn is_available(&self) -> bool;

    /// Fetch a definition for a word.
    ///
    /// The optional lexical class, language and linguistic context steer the
    /// lookup toward the sense the reader actually met on the page.
    async fn fetch_definition(
        &self,
        word: &str,
        lexical_class: Option<LexicalClass>,
        language: Option<Language>,
        linguistic_context: Option<&str>,
    ) -> Result<DictionaryEntry, DictionaryError>;
}
