/*!
 * Common test utilities for the vocap test suite
 */

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use vocap::app_config::Config;
use vocap::app_controller::Controller;
use vocap::database::VocabularyRepository;
use vocap::dictionary::DictionaryProvider;
use vocap::ocr::{OcrProvider, OcrProviderKind, OcrServiceManager};

// Re-export the mock providers module
pub mod mock_providers;

/// A paragraph of recognized page text used across tests
pub const SAMPLE_PAGE_TEXT: &str = "The quiet afternoon settled over the garden. \
A small dog wandered between the flower beds, looking for something interesting.";

/// Sets up test logging, safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a tiny valid PNG capture for pipeline tests
pub fn create_test_image(dir: &TempDir, filename: &str) -> Result<PathBuf> {
    let path = dir.path().join(filename);
    let buffer = image::RgbImage::from_pixel(8, 8, image::Rgb([250, 250, 250]));
    image::DynamicImage::ImageRgb8(buffer).save(&path)?;
    Ok(path)
}

/// Builds a controller wired to scripted providers and an in-memory store
pub fn build_controller(
    ocr: Box<dyn OcrProvider>,
    dictionary: Box<dyn DictionaryProvider>,
) -> Controller {
    let manager = OcrServiceManager::with_provider(OcrProviderKind::Tesseract, ocr);
    let repository = VocabularyRepository::new_in_memory().expect("in-memory repository");

    Controller::with_parts(Config::default(), manager, dictionary, repository)
}
