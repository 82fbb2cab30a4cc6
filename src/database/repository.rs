/*!
 * Repository layer for vocabulary persistence.
 *
 * This module provides a high-level API for all database operations,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, OptionalExtension, Row};
use sha2::{Digest, Sha256};

use super::connection::DatabaseConnection;
use super::models::{VocabularyWordRecord, WordContextRecord, MAX_MASTERY_LEVEL};

/// Repository for vocabulary words and their contexts
#[derive(Clone)]
pub struct VocabularyRepository {
    /// Database connection
    db: DatabaseConnection,
}

fn parse_word_row(row: &Row) -> rusqlite::Result<VocabularyWordRecord> {
    Ok(VocabularyWordRecord {
        id: row.get(0)?,
        word: row.get(1)?,
        language: row.get(2)?,
        definition: row.get(3)?,
        part_of_speech: row.get(4)?,
        date_added: row.get(5)?,
        mastery_level: row.get(6)?,
        study_count: row.get(7)?,
    })
}

const WORD_COLUMNS: &str =
    "id, word, language, definition, part_of_speech, date_added, mastery_level, study_count";

impl VocabularyRepository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Compute the SHA256 content hash of a captured image
    pub fn hash_image(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    // =========================================================================
    // Word Operations
    // =========================================================================

    /// Insert a new vocabulary word and return its row id
    pub async fn add_word(&self, word: &VocabularyWordRecord) -> Result<i64> {
        let word = word.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO vocabulary_words (
                        word, language, definition, part_of_speech,
                        date_added, mastery_level, study_count
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                    params![
                        word.word,
                        word.language,
                        word.definition,
                        word.part_of_speech,
                        word.date_added,
                        word.mastery_level,
                        word.study_count,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    /// Get a word by its row id
    pub async fn get_word(&self, word_id: i64) -> Result<Option<VocabularyWordRecord>> {
        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        &format!("SELECT {} FROM vocabulary_words WHERE id = ?1", WORD_COLUMNS),
                        [word_id],
                        parse_word_row,
                    )
                    .optional()?;
                Ok(result)
            })
            .await
    }

    /// All words, newest first
    pub async fn fetch_words(&self) -> Result<Vec<VocabularyWordRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM vocabulary_words ORDER BY date_added DESC, id DESC",
                    WORD_COLUMNS
                ))?;
                let words = stmt
                    .query_map([], parse_word_row)?
                    .filter_map(|r| r.ok())
                    .collect();
                Ok(words)
            })
            .await
    }

    /// Words whose text or definition contains the search string, newest first
    pub async fn search_words(&self, search_text: &str) -> Result<Vec<VocabularyWordRecord>> {
        let pattern = format!("%{}%", search_text.replace('%', "\\%").replace('_', "\\_"));

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    r#"
                    SELECT {} FROM vocabulary_words
                    WHERE word LIKE ?1 ESCAPE '\' OR definition LIKE ?1 ESCAPE '\'
                    ORDER BY date_added DESC, id DESC
                    "#,
                    WORD_COLUMNS
                ))?;
                let words = stmt
                    .query_map([pattern], parse_word_row)?
                    .filter_map(|r| r.ok())
                    .collect();
                Ok(words)
            })
            .await
    }

    /// Words in the given language, newest first
    pub async fn fetch_words_by_language(
        &self,
        language: &str,
    ) -> Result<Vec<VocabularyWordRecord>> {
        let language = language.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM vocabulary_words WHERE language = ?1 ORDER BY date_added DESC, id DESC",
                    WORD_COLUMNS
                ))?;
                let words = stmt
                    .query_map([language], parse_word_row)?
                    .filter_map(|r| r.ok())
                    .collect();
                Ok(words)
            })
            .await
    }

    /// Distinct languages present in the list, sorted
    pub async fn available_languages(&self) -> Result<Vec<String>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn
                    .prepare("SELECT DISTINCT language FROM vocabulary_words ORDER BY language")?;
                let languages = stmt
                    .query_map([], |row| row.get(0))?
                    .filter_map(|r| r.ok())
                    .collect();
                Ok(languages)
            })
            .await
    }

    /// Delete a word; its contexts go with it via cascade
    pub async fn delete_word(&self, word_id: i64) -> Result<()> {
        self.db
            .execute_async(move |conn| {
                conn.execute("DELETE FROM vocabulary_words WHERE id = ?1", [word_id])?;
                Ok(())
            })
            .await
    }

    /// Set a word's mastery level (0-5)
    pub async fn update_mastery(&self, word_id: i64, level: i64) -> Result<()> {
        if !(0..=MAX_MASTERY_LEVEL).contains(&level) {
            return Err(anyhow::anyhow!(
                "Mastery level must be between 0 and {}, got {}",
                MAX_MASTERY_LEVEL,
                level
            ));
        }

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "UPDATE vocabulary_words SET mastery_level = ?1 WHERE id = ?2",
                    params![level, word_id],
                )?;
                Ok(())
            })
            .await
    }

    /// Bump a word's study counter by one
    pub async fn increment_study_count(&self, word_id: i64) -> Result<()> {
        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "UPDATE vocabulary_words SET study_count = study_count + 1 WHERE id = ?1",
                    [word_id],
                )?;
                Ok(())
            })
            .await
    }

    // =========================================================================
    // Context Operations
    // =========================================================================

    /// Attach a context to a word and return the context's row id.
    ///
    /// The image hash is computed here so stored captures can be deduplicated
    /// by content later.
    pub async fn add_context(&self, context: &WordContextRecord) -> Result<i64> {
        let mut context = context.clone();
        if context.image_hash.is_none() {
            context.image_hash = context
                .captured_image
                .as_deref()
                .map(|bytes| Self::hash_image(bytes));
        }

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO word_contexts (word_id, sentence, captured_image, image_hash, date_added)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        context.word_id,
                        context.sentence,
                        context.captured_image,
                        context.image_hash,
                        context.date_added,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    /// All contexts attached to a word, oldest first
    pub async fn word_contexts(&self, word_id: i64) -> Result<Vec<WordContextRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, word_id, sentence, captured_image, image_hash, date_added
                    FROM word_contexts
                    WHERE word_id = ?1
                    ORDER BY date_added, id
                    "#,
                )?;

                let contexts = stmt
                    .query_map([word_id], |row| {
                        Ok(WordContextRecord {
                            id: row.get(0)?,
                            word_id: row.get(1)?,
                            sentence: row.get(2)?,
                            captured_image: row.get(3)?,
                            image_hash: row.get(4)?,
                            date_added: row.get(5)?,
                        })
                    })?
                    .filter_map(|r| r.ok())
                    .collect();
                Ok(contexts)
            })
            .await
    }

    /// Number of stored contexts across all words
    pub async fn context_count(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM word_contexts", [], |row| row.get(0))?;
                debug!("Context count: {}", count);
                Ok(count)
            })
            .await
    }
}
