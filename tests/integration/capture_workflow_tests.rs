/*!
 * End-to-end capture pipeline tests with scripted providers:
 * image -> OCR -> analysis -> selection -> dictionary -> store.
 */

use vocap::errors::OcrError;

use crate::common::mock_providers::{
    failing_dictionary, failing_ocr, sample_page_ocr, unavailable_ocr, working_dictionary,
};
use crate::common::{
    build_controller, create_temp_dir, create_test_image, init_test_logging, SAMPLE_PAGE_TEXT,
};

#[tokio::test]
async fn test_scanImage_withWorkingProvider_shouldAnalyzeAndHighlight() {
    init_test_logging();
    let controller = build_controller(sample_page_ocr(), working_dictionary());
    let dir = create_temp_dir().unwrap();
    let image = create_test_image(&dir, "page.png").unwrap();

    let scan = controller.scan_image(&image).await.unwrap();

    assert_eq!(scan.ocr.recognized_text, SAMPLE_PAGE_TEXT);
    assert!(!scan.analysis.is_empty());
    // The default config highlights nouns, so at least one span exists
    assert!(!scan.styled.spans.is_empty());
    assert!(!controller.is_processing());
}

#[tokio::test]
async fn test_scanImage_withFailingProvider_shouldSurfaceOneUserFacingError() {
    let controller = build_controller(failing_ocr(), working_dictionary());
    let dir = create_temp_dir().unwrap();
    let image = create_test_image(&dir, "page.png").unwrap();

    let result = controller.scan_image(&image).await;

    let message = result.unwrap_err().to_string();
    assert!(message.contains("Could not extract text"));
    assert!(message.contains("Mock"), "error names the active provider");
}

#[tokio::test]
async fn test_scanImage_withUnavailableProvider_shouldFailBeforeRecognition() {
    let controller = build_controller(unavailable_ocr(), working_dictionary());
    let dir = create_temp_dir().unwrap();
    let image = create_test_image(&dir, "page.png").unwrap();

    let result = controller.scan_image(&image).await;
    let error = result.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<OcrError>(),
        Some(OcrError::ProviderNotAvailable(_))
    ));
}

#[tokio::test]
async fn test_scanImage_withMissingFile_shouldReturnInvalidImage() {
    let controller = build_controller(sample_page_ocr(), working_dictionary());

    let result = controller.scan_image("does/not/exist.png").await;
    let error = result.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<OcrError>(),
        Some(OcrError::InvalidImage(_))
    ));
}

#[tokio::test]
async fn test_addWordFromScan_shouldPersistWordWithContext() {
    let controller = build_controller(sample_page_ocr(), working_dictionary());
    let dir = create_temp_dir().unwrap();
    let image = create_test_image(&dir, "page.png").unwrap();

    let scan = controller.scan_image(&image).await.unwrap();

    // Tap inside "garden"
    let offset = SAMPLE_PAGE_TEXT.find("garden").unwrap() + 2;
    let record = controller
        .add_word_from_scan(&scan, offset)
        .await
        .unwrap()
        .expect("a word should resolve at this offset");

    assert_eq!(record.word, "garden");
    assert!(record.id > 0);
    assert!(record.definition.contains("garden"));

    let stored = controller.list_words(None).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].word, "garden");

    let contexts = controller.word_contexts(record.id).await.unwrap();
    assert_eq!(contexts.len(), 1);
    assert_eq!(
        contexts[0].sentence,
        "The quiet afternoon settled over the garden"
    );
    assert!(contexts[0].captured_image.is_some());
}

#[tokio::test]
async fn test_addWordFromScan_onPunctuation_shouldSilentlyDoNothing() {
    let controller = build_controller(sample_page_ocr(), working_dictionary());
    let dir = create_temp_dir().unwrap();
    let image = create_test_image(&dir, "page.png").unwrap();

    let scan = controller.scan_image(&image).await.unwrap();

    // Tap the period after "garden"
    let offset = SAMPLE_PAGE_TEXT.find("garden.").unwrap() + "garden".len();
    let outcome = controller.add_word_from_scan(&scan, offset).await.unwrap();

    assert!(outcome.is_none());
    assert!(controller.list_words(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_addWordFromScan_withDictionaryFailure_shouldPropagateTypedError() {
    let controller = build_controller(sample_page_ocr(), failing_dictionary(502));
    let dir = create_temp_dir().unwrap();
    let image = create_test_image(&dir, "page.png").unwrap();

    let scan = controller.scan_image(&image).await.unwrap();
    let offset = SAMPLE_PAGE_TEXT.find("garden").unwrap();

    let result = controller.add_word_from_scan(&scan, offset).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("502"));

    // Nothing was stored
    assert!(controller.list_words(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_scanDirectory_shouldSkipUnreadableImagesAndContinue() {
    let controller = build_controller(sample_page_ocr(), working_dictionary());
    let dir = create_temp_dir().unwrap();

    create_test_image(&dir, "a.png").unwrap();
    create_test_image(&dir, "b.png").unwrap();
    // An empty file fails loading but must not abort the directory scan
    std::fs::write(dir.path().join("broken.png"), b"").unwrap();

    let scans = controller.scan_directory(dir.path()).await.unwrap();
    assert_eq!(scans.len(), 2);
}

#[tokio::test]
async fn test_scanDirectory_withoutImages_shouldFail() {
    let controller = build_controller(sample_page_ocr(), working_dictionary());
    let dir = create_temp_dir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();

    assert!(controller.scan_directory(dir.path()).await.is_err());
}
