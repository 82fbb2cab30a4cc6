/*!
 * Scripted provider builders shared by the integration tests.
 *
 * The mock implementations themselves live in the library so inline module
 * tests can reach them too; this module only adds suite-specific recipes.
 */

use vocap::dictionary::{DictionaryProvider, MockDictionaryProvider};
use vocap::ocr::{MockOcrProvider, OcrProvider};

use super::SAMPLE_PAGE_TEXT;

/// OCR provider that recognizes the shared sample page
pub fn sample_page_ocr() -> Box<dyn OcrProvider> {
    Box::new(MockOcrProvider::working(SAMPLE_PAGE_TEXT))
}

/// OCR provider that never produces a result
pub fn failing_ocr() -> Box<dyn OcrProvider> {
    Box::new(MockOcrProvider::failing())
}

/// OCR provider that reports itself unavailable
pub fn unavailable_ocr() -> Box<dyn OcrProvider> {
    Box::new(MockOcrProvider::unavailable())
}

/// Dictionary that defines every word it is asked about
pub fn working_dictionary() -> Box<dyn DictionaryProvider> {
    Box::new(MockDictionaryProvider::working())
}

/// Dictionary that fails with the given API status
pub fn failing_dictionary(status_code: u16) -> Box<dyn DictionaryProvider> {
    Box::new(MockDictionaryProvider::failing(status_code))
}
