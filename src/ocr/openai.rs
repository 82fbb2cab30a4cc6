use async_trait::async_trait;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use log::{debug, error};

use crate::app_config::OpenAiOcrConfig;
use crate::providers::openai::{ChatRequest, ContentPart, ImageUrl, OpenAiClient};

use super::{BoundingBox, ImageInput, OcrProvider, OcrResult};

/// JPEG quality for captures re-encoded before upload
const UPLOAD_JPEG_QUALITY: u8 = 80;

/// Remote models report no per-word scores; the extraction itself is
/// reliably good, so the whole result carries one fixed confidence
const REMOTE_CONFIDENCE: f32 = 0.95;

const SYSTEM_PROMPT: &str = "You are an OCR assistant. Extract text from images accurately.";

const EXTRACTION_PROMPT: &str = "Extract all text from this image. Return only the text content, \
preserving line breaks and formatting. Rejoin words that are split across lines with a hyphen. \
Do not include any additional commentary or explanation.";

/// Remote OCR provider backed by an OpenAI vision model.
///
/// Sends the capture as a base64 data URL with a fixed extraction prompt and
/// treats the entire completion as the recognized text. The model already
/// de-hyphenates line-wrapped words, so no line reconstruction runs here and
/// the result carries no per-line geometry.
#[derive(Debug, Clone)]
pub struct OpenAiOcrProvider {
    client: OpenAiClient,
    model: String,
}

impl OpenAiOcrProvider {
    pub fn new(config: &OpenAiOcrConfig) -> Self {
        Self {
            client: OpenAiClient::new(
                config.effective_api_key(),
                config.endpoint.clone(),
                config.timeout_secs,
            ),
            model: config.model.clone(),
        }
    }

    /// Re-encode the capture as JPEG and wrap it in a data URL
    fn to_data_url(image: &ImageInput) -> Option<String> {
        let decoded = match image::load_from_memory(image.bytes()) {
            Ok(decoded) => decoded,
            Err(e) => {
                error!("OpenAI OCR: could not decode capture: {}", e);
                return None;
            }
        };

        let mut jpeg = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut jpeg, UPLOAD_JPEG_QUALITY);
        if let Err(e) = decoded.to_rgb8().write_with_encoder(encoder) {
            error!("OpenAI OCR: could not encode capture: {}", e);
            return None;
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(&jpeg);
        Some(format!("data:image/jpeg;base64,{}", encoded))
    }
}

#[async_trait]
impl OcrProvider for OpenAiOcrProvider {
    fn display_name(&self) -> &str {
        "OpenAI"
    }

    fn is_available(&self) -> bool {
        self.client.is_configured()
    }

    async fn recognize_text(&self, image: &ImageInput) -> Option<OcrResult> {
        let data_url = Self::to_data_url(image)?;

        let request = ChatRequest::new(&self.model)
            .temperature(0.1)
            .max_tokens(1000)
            .add_message("system", SYSTEM_PROMPT)
            .add_parts_message(
                "user",
                vec![
                    ContentPart::Text {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: data_url,
                            detail: Some("auto".to_string()),
                        },
                    },
                ],
            );

        let response = match self.client.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("OpenAI OCR: request failed: {}", e);
                return None;
            }
        };

        let recognized_text = OpenAiClient::extract_text(&response)?;
        debug!(
            "OpenAI OCR: extracted {} bytes of text",
            recognized_text.len()
        );

        Some(OcrResult::new(
            recognized_text,
            REMOTE_CONFIDENCE,
            BoundingBox::full_frame(),
            Vec::new(),
        ))
    }
}
