/*!
 * Database entity models.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};

/// Highest mastery level a word can reach
pub const MAX_MASTERY_LEVEL: i64 = 5;

/// A persisted vocabulary word with its study statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyWordRecord {
    /// Row id, 0 until the record is inserted
    pub id: i64,
    /// The word itself
    pub word: String,
    /// Short ISO code of the word's language
    pub language: String,
    /// Primary definition text
    pub definition: String,
    /// Part of speech label, when the dictionary provided one
    pub part_of_speech: Option<String>,
    /// RFC 3339 timestamp of when the word was added
    pub date_added: String,
    /// Mastery level from 0 (new) to 5 (mastered)
    pub mastery_level: i64,
    /// How many times the word has been reviewed
    pub study_count: i64,
}

impl VocabularyWordRecord {
    /// Create a new unsaved word record
    pub fn new(
        word: impl Into<String>,
        language: impl Into<String>,
        definition: impl Into<String>,
        part_of_speech: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            word: word.into(),
            language: language.into(),
            definition: definition.into(),
            part_of_speech,
            date_added: chrono::Utc::now().to_rfc3339(),
            mastery_level: 0,
            study_count: 0,
        }
    }
}

/// A captured context a word was encountered in.
///
/// Owned by exactly one vocabulary word; deleting the word deletes its
/// contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordContextRecord {
    /// Row id, 0 until the record is inserted
    pub id: i64,
    /// Owning word's row id
    pub word_id: i64,
    /// The sentence the word appeared in
    pub sentence: String,
    /// Captured page image, when one was taken
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_image: Option<Vec<u8>>,
    /// Content hash of the captured image
    pub image_hash: Option<String>,
    /// RFC 3339 timestamp of when the context was captured
    pub date_added: String,
}

impl WordContextRecord {
    /// Create a new unsaved context record
    pub fn new(word_id: i64, sentence: impl Into<String>, captured_image: Option<Vec<u8>>) -> Self {
        Self {
            id: 0,
            word_id,
            sentence: sentence.into(),
            captured_image,
            image_hash: None,
            date_added: chrono::Utc::now().to_rfc3339(),
        }
    }
}
