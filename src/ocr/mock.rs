/*!
 * Mock OCR provider for testing.
 *
 * Simulates the provider behaviors the pipeline has to cope with:
 * - `MockOcrProvider::working()` - Always recognizes the scripted text
 * - `MockOcrProvider::failing()` - Always yields no result
 * - `MockOcrProvider::unavailable()` - Reports itself unusable
 * - `MockOcrProvider::slow()` - Holds the pipeline busy before answering
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{BoundingBox, ImageInput, OcrProvider, OcrResult, RecognizedLine};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockOcrBehavior {
    /// Always recognizes the scripted text
    Working { text: String, confidence: f32 },
    /// Always yields no result
    Failing,
    /// Reports itself unavailable
    Unavailable,
    /// Delays before answering (for busy-flag testing)
    Slow { text: String, delay_ms: u64 },
}

/// Mock provider with scripted behavior
#[derive(Debug)]
pub struct MockOcrProvider {
    behavior: MockOcrBehavior,
    call_count: Arc<AtomicUsize>,
}

impl MockOcrProvider {
    pub fn new(behavior: MockOcrBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Provider that always recognizes the given text
    pub fn working(text: impl Into<String>) -> Self {
        Self::new(MockOcrBehavior::Working {
            text: text.into(),
            confidence: 0.9,
        })
    }

    /// Provider that always recognizes the given text with a set confidence
    pub fn working_with_confidence(text: impl Into<String>, confidence: f32) -> Self {
        Self::new(MockOcrBehavior::Working {
            text: text.into(),
            confidence,
        })
    }

    /// Provider that never produces a result
    pub fn failing() -> Self {
        Self::new(MockOcrBehavior::Failing)
    }

    /// Provider that reports itself unavailable
    pub fn unavailable() -> Self {
        Self::new(MockOcrBehavior::Unavailable)
    }

    /// Provider that sleeps before answering
    pub fn slow(text: impl Into<String>, delay_ms: u64) -> Self {
        Self::new(MockOcrBehavior::Slow {
            text: text.into(),
            delay_ms,
        })
    }

    /// Shared counter of recognition calls made against this provider
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait]
impl OcrProvider for MockOcrProvider {
    fn display_name(&self) -> &str {
        "Mock"
    }

    fn is_available(&self) -> bool {
        !matches!(self.behavior, MockOcrBehavior::Unavailable)
    }

    async fn recognize_text(&self, _image: &ImageInput) -> Option<OcrResult> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockOcrBehavior::Working { text, confidence } => Some(OcrResult::new(
                text.clone(),
                *confidence,
                BoundingBox::full_frame(),
                text.lines().map(RecognizedLine::new).collect(),
            )),
            MockOcrBehavior::Failing | MockOcrBehavior::Unavailable => None,
            MockOcrBehavior::Slow { text, delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Some(OcrResult::new(
                    text.clone(),
                    0.9,
                    BoundingBox::full_frame(),
                    Vec::new(),
                ))
            }
        }
    }
}
