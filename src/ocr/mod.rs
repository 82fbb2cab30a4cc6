/*!
 * OCR provider abstraction.
 *
 * This module defines the capability interface every OCR variant implements
 * and the normalized result shape the rest of the pipeline consumes:
 * - `ocr::tesseract`: Local Tesseract CLI engine
 * - `ocr::openai`: Remote vision-model extraction
 * - `ocr::mock`: Scripted provider for tests
 * - `ocr::merge`: Dehyphenation of line-wrapped words
 *
 * Providers return `None` on failure, never an error: the caller
 * distinguishes "no result" through the option, and the details land in the
 * log. Switching providers requires no change downstream of the manager.
 */

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::app_config::OcrConfig;
use crate::errors::OcrError;

pub mod merge;
pub mod mock;
pub mod openai;
pub mod tesseract;

pub use merge::merge_lines;
pub use mock::MockOcrProvider;
pub use openai::OpenAiOcrProvider;
pub use tesseract::TesseractOcrProvider;

/// One transcribed physical line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedLine {
    /// Line transcript
    pub text: String,
    /// Whether the transcript ends with a line-break hyphen
    pub ends_with_hyphen: bool,
}

impl RecognizedLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let ends_with_hyphen = text.trim_end().ends_with('-');
        Self {
            text,
            ends_with_hyphen,
        }
    }
}

/// Normalized rectangle in [0,1] image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    /// The whole image frame
    pub fn full_frame() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

/// Normalized recognition result shared by all providers
#[derive(Debug, Clone, PartialEq)]
pub struct OcrResult {
    /// Recognized text with line breaks preserved and hyphenation repaired
    pub recognized_text: String,
    /// Mean recognition confidence in [0,1]
    pub confidence: f32,
    /// Region the text was found in
    pub bounding_box: BoundingBox,
    /// Per-line transcripts, empty when the provider has no line geometry
    pub raw_lines: Vec<RecognizedLine>,
}

impl OcrResult {
    pub fn new(
        recognized_text: impl Into<String>,
        confidence: f32,
        bounding_box: BoundingBox,
        raw_lines: Vec<RecognizedLine>,
    ) -> Self {
        Self {
            recognized_text: recognized_text.into(),
            confidence: confidence.clamp(0.0, 1.0),
            bounding_box,
            raw_lines,
        }
    }
}

/// A captured page image handed to a provider
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Source path when the image came from disk
    path: Option<PathBuf>,
    /// Raw encoded image bytes
    bytes: Vec<u8>,
}

impl ImageInput {
    /// Load an image file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OcrError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| OcrError::InvalidImage(format!("{}: {}", path.display(), e)))?;
        if bytes.is_empty() {
            return Err(OcrError::InvalidImage(format!(
                "{}: file is empty",
                path.display()
            )));
        }

        Ok(Self {
            path: Some(path.to_path_buf()),
            bytes,
        })
    }

    /// Wrap already-loaded image bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { path: None, bytes }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Common trait for all OCR providers
///
/// Recognition failures stay inside the provider: callers get `None` and the
/// cause is logged, so no error type ever crosses this boundary.
#[async_trait]
pub trait OcrProvider: Send + Sync + fmt::Debug {
    /// Human-readable provider name
    fn display_name(&self) -> &str;

    /// Whether the provider can be used in this environment
    fn is_available(&self) -> bool;

    /// Recognize text in an image
    async fn recognize_text(&self, image: &ImageInput) -> Option<OcrResult>;
}

/// OCR provider variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OcrProviderKind {
    /// Local Tesseract CLI engine
    #[default]
    Tesseract,
    /// Remote OpenAI vision model
    OpenAi,
}

impl OcrProviderKind {
    /// Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Tesseract => "Tesseract",
            Self::OpenAi => "OpenAI",
        }
    }
}

impl fmt::Display for OcrProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tesseract => write!(f, "tesseract"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for OcrProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tesseract" => Ok(Self::Tesseract),
            "openai" => Ok(Self::OpenAi),
            _ => Err(anyhow::anyhow!("Invalid OCR provider: {}", s)),
        }
    }
}

/// Registry of OCR providers with a selected variant and a busy flag.
///
/// One capture pipeline runs at a time: re-entry while a recognition pass is
/// in flight is refused rather than queued.
#[derive(Debug)]
pub struct OcrServiceManager {
    providers: HashMap<OcrProviderKind, Box<dyn OcrProvider>>,
    selected: OcrProviderKind,
    processing: AtomicBool,
}

impl OcrServiceManager {
    /// Build the manager with the real provider variants from configuration
    pub fn from_config(config: &OcrConfig) -> Self {
        let mut providers: HashMap<OcrProviderKind, Box<dyn OcrProvider>> = HashMap::new();
        providers.insert(
            OcrProviderKind::Tesseract,
            Box::new(TesseractOcrProvider::new(&config.tesseract)),
        );
        providers.insert(
            OcrProviderKind::OpenAi,
            Box::new(OpenAiOcrProvider::new(&config.openai)),
        );

        Self {
            providers,
            selected: config.provider,
            processing: AtomicBool::new(false),
        }
    }

    /// Build an empty manager and register providers manually (for tests)
    pub fn with_provider(kind: OcrProviderKind, provider: Box<dyn OcrProvider>) -> Self {
        let mut providers: HashMap<OcrProviderKind, Box<dyn OcrProvider>> = HashMap::new();
        providers.insert(kind, provider);
        Self {
            providers,
            selected: kind,
            processing: AtomicBool::new(false),
        }
    }

    /// Register an additional provider
    pub fn register(&mut self, kind: OcrProviderKind, provider: Box<dyn OcrProvider>) {
        self.providers.insert(kind, provider);
    }

    /// Currently selected provider kind
    pub fn selected_kind(&self) -> OcrProviderKind {
        self.selected
    }

    /// Switch the active provider
    pub fn select(&mut self, kind: OcrProviderKind) -> Result<(), OcrError> {
        if !self.providers.contains_key(&kind) {
            return Err(OcrError::ProviderNotAvailable(
                kind.display_name().to_string(),
            ));
        }
        self.selected = kind;
        Ok(())
    }

    /// The currently selected provider
    pub fn current_provider(&self) -> Option<&dyn OcrProvider> {
        self.providers.get(&self.selected).map(|p| p.as_ref())
    }

    /// Kinds whose providers report themselves available
    pub fn available_kinds(&self) -> Vec<OcrProviderKind> {
        let mut kinds: Vec<OcrProviderKind> = self
            .providers
            .iter()
            .filter(|(_, provider)| provider.is_available())
            .map(|(kind, _)| *kind)
            .collect();
        kinds.sort_by_key(|kind| kind.to_string());
        kinds
    }

    /// Whether a recognition pass is currently running
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    /// Run recognition with the selected provider.
    ///
    /// Returns `Ok(None)` when the provider ran but produced nothing; errors
    /// cover an unavailable provider and a busy pipeline.
    pub async fn recognize_text(&self, image: &ImageInput) -> Result<Option<OcrResult>, OcrError> {
        let provider = self
            .current_provider()
            .ok_or_else(|| OcrError::ProviderNotAvailable(self.selected.display_name().to_string()))?;

        if !provider.is_available() {
            return Err(OcrError::ProviderNotAvailable(
                provider.display_name().to_string(),
            ));
        }

        if self
            .processing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Rejecting capture: an OCR pass is already in progress");
            return Err(OcrError::Busy);
        }

        let result = provider.recognize_text(image).await;
        self.processing.store(false, Ordering::SeqCst);

        if result.is_none() {
            warn!(
                "Provider '{}' could not extract any text",
                provider.display_name()
            );
        }

        Ok(result)
    }
}
