/*!
 * Vocabulary store tests through the controller and repository API.
 */

use vocap::database::{VocabularyRepository, VocabularyWordRecord, WordContextRecord};

use crate::common::build_controller;
use crate::common::mock_providers::{sample_page_ocr, working_dictionary};

fn word(name: &str, language: &str, added: &str) -> VocabularyWordRecord {
    let mut record =
        VocabularyWordRecord::new(name, language, format!("definition of {}", name), None);
    record.date_added = added.to_string();
    record
}

#[tokio::test]
async fn test_fetchWords_shouldComeBackNewestFirst() {
    let repo = VocabularyRepository::new_in_memory().unwrap();

    repo.add_word(&word("oldest", "en", "2026-01-01T08:00:00Z")).await.unwrap();
    repo.add_word(&word("newest", "en", "2026-03-01T08:00:00Z")).await.unwrap();
    repo.add_word(&word("middle", "en", "2026-02-01T08:00:00Z")).await.unwrap();

    let words = repo.fetch_words().await.unwrap();
    let names: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(names, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_deleteWord_shouldCascadeDeleteContexts() {
    let repo = VocabularyRepository::new_in_memory().unwrap();

    let keep_id = repo.add_word(&word("keep", "en", "2026-01-01T08:00:00Z")).await.unwrap();
    let drop_id = repo.add_word(&word("drop", "en", "2026-01-02T08:00:00Z")).await.unwrap();

    repo.add_context(&WordContextRecord::new(keep_id, "keep this sentence", None))
        .await
        .unwrap();
    repo.add_context(&WordContextRecord::new(drop_id, "drop this sentence", None))
        .await
        .unwrap();
    repo.add_context(&WordContextRecord::new(drop_id, "and this one", Some(vec![1, 2])))
        .await
        .unwrap();

    repo.delete_word(drop_id).await.unwrap();

    assert!(repo.get_word(drop_id).await.unwrap().is_none());
    assert!(repo.word_contexts(drop_id).await.unwrap().is_empty());
    // The other word's context is untouched
    assert_eq!(repo.word_contexts(keep_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_searchWords_shouldMatchSubstringInWordOrDefinition() {
    let repo = VocabularyRepository::new_in_memory().unwrap();

    repo.add_word(&VocabularyWordRecord::new("serendipity", "en", "a happy accident", None))
        .await
        .unwrap();
    repo.add_word(&VocabularyWordRecord::new("casa", "es", "a dwelling", None))
        .await
        .unwrap();

    assert_eq!(repo.search_words("seren").await.unwrap().len(), 1);
    assert_eq!(repo.search_words("dwelling").await.unwrap().len(), 1);
    assert_eq!(repo.search_words("happy accident").await.unwrap().len(), 1);
    assert!(repo.search_words("xyz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_languageFilter_shouldOnlyReturnMatchingWords() {
    let repo = VocabularyRepository::new_in_memory().unwrap();

    repo.add_word(&word("house", "en", "2026-01-01T08:00:00Z")).await.unwrap();
    repo.add_word(&word("casa", "es", "2026-01-02T08:00:00Z")).await.unwrap();
    repo.add_word(&word("perro", "es", "2026-01-03T08:00:00Z")).await.unwrap();

    let spanish = repo.fetch_words_by_language("es").await.unwrap();
    assert_eq!(spanish.len(), 2);

    let languages = repo.available_languages().await.unwrap();
    assert_eq!(languages, vec!["en".to_string(), "es".to_string()]);
}

#[tokio::test]
async fn test_masteryAndStudyCounters_shouldEnforceBoundsAndAccumulate() {
    let repo = VocabularyRepository::new_in_memory().unwrap();
    let id = repo.add_word(&word("casa", "es", "2026-01-01T08:00:00Z")).await.unwrap();

    repo.update_mastery(id, 5).await.unwrap();
    assert!(repo.update_mastery(id, 6).await.is_err());

    repo.increment_study_count(id).await.unwrap();
    repo.increment_study_count(id).await.unwrap();

    let stored = repo.get_word(id).await.unwrap().unwrap();
    assert_eq!(stored.mastery_level, 5);
    assert_eq!(stored.study_count, 2);
}

#[tokio::test]
async fn test_controllerReviewHelpers_shouldValidateMasteryRange() {
    let controller = build_controller(sample_page_ocr(), working_dictionary());

    let record = controller.add_word_direct("casa", None).await.unwrap();
    assert!(record.id > 0);

    assert!(controller.set_mastery(record.id, 3).await.is_ok());
    assert!(controller.set_mastery(record.id, 9).await.is_err());

    controller.record_study(record.id).await.unwrap();
    let stored = controller.list_words(None).await.unwrap();
    assert_eq!(stored[0].mastery_level, 3);
    assert_eq!(stored[0].study_count, 1);
}

#[tokio::test]
async fn test_deleteThroughController_shouldRemoveWord() {
    let controller = build_controller(sample_page_ocr(), working_dictionary());

    let record = controller.add_word_direct("casa", None).await.unwrap();
    controller.delete_word(record.id).await.unwrap();

    assert!(controller.list_words(None).await.unwrap().is_empty());
}
