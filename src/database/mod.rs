/*!
 * Database module for the persisted vocabulary list.
 *
 * This module provides SQLite-based persistence for:
 * - Vocabulary words with study statistics
 * - Word contexts (captured sentence and page image) owned by a word
 */

// Allow dead code - database types are for library consumers
#![allow(dead_code)]

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::{VocabularyWordRecord, WordContextRecord, MAX_MASTERY_LEVEL};
pub use repository::VocabularyRepository;
