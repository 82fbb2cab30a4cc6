use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, warn};
use tokio::process::Command;

use crate::app_config::TesseractConfig;

use super::{merge, BoundingBox, ImageInput, OcrProvider, OcrResult, RecognizedLine};

/// Local OCR provider driving the Tesseract CLI.
///
/// Runs `tesseract <image> - -l <languages> tsv` and rebuilds line
/// transcripts from the word-level TSV rows, then repairs hyphenated line
/// breaks before handing the text on. Per-word geometry from the TSV is not
/// carried into the result.
#[derive(Debug, Clone)]
pub struct TesseractOcrProvider {
    /// Binary name or path
    binary: String,
    /// Recognition languages, e.g. "eng+spa"
    languages: String,
    /// Kill the engine after this long
    timeout: Duration,
}

/// TSV row level that carries a recognized word
const WORD_LEVEL: u32 = 5;

impl TesseractOcrProvider {
    pub fn new(config: &TesseractConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            languages: config.languages.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Rebuild per-line transcripts and word confidences from TSV output.
    ///
    /// Rows are grouped into lines by (page, block, paragraph, line) id;
    /// confidences come back in Tesseract's 0-100 scale.
    pub(crate) fn parse_tsv(output: &str) -> (Vec<RecognizedLine>, Vec<f32>) {
        let mut lines: Vec<RecognizedLine> = Vec::new();
        let mut confidences: Vec<f32> = Vec::new();

        let mut current_key: Option<(u32, u32, u32, u32)> = None;
        let mut current_words: Vec<String> = Vec::new();

        let flush = |words: &mut Vec<String>, lines: &mut Vec<RecognizedLine>| {
            if !words.is_empty() {
                lines.push(RecognizedLine::new(words.join(" ")));
                words.clear();
            }
        };

        for row in output.lines().skip(1) {
            let fields: Vec<&str> = row.split('\t').collect();
            if fields.len() < 12 {
                continue;
            }

            let level: u32 = match fields[0].parse() {
                Ok(level) => level,
                Err(_) => continue,
            };
            if level != WORD_LEVEL {
                continue;
            }

            let word = fields[11].trim();
            if word.is_empty() {
                continue;
            }

            let key = (
                fields[1].parse().unwrap_or(0),
                fields[2].parse().unwrap_or(0),
                fields[3].parse().unwrap_or(0),
                fields[4].parse().unwrap_or(0),
            );
            if current_key != Some(key) {
                flush(&mut current_words, &mut lines);
                current_key = Some(key);
            }

            current_words.push(word.to_string());
            if let Ok(confidence) = fields[10].parse::<f32>() {
                if confidence >= 0.0 {
                    confidences.push(confidence);
                }
            }
        }
        flush(&mut current_words, &mut lines);

        (lines, confidences)
    }
}

#[async_trait]
impl OcrProvider for TesseractOcrProvider {
    fn display_name(&self) -> &str {
        "Tesseract"
    }

    fn is_available(&self) -> bool {
        which::which(&self.binary).is_ok()
    }

    async fn recognize_text(&self, image: &ImageInput) -> Option<OcrResult> {
        // Tesseract wants a file on disk; captures passed as bytes go
        // through a temp file that lives until the engine is done
        let mut temp_image = None;
        let input_path = match image.path() {
            Some(path) => path.to_path_buf(),
            None => {
                let mut file = match tempfile::NamedTempFile::new() {
                    Ok(file) => file,
                    Err(e) => {
                        error!("Tesseract: failed to stage capture bytes: {}", e);
                        return None;
                    }
                };
                if let Err(e) = file.write_all(image.bytes()) {
                    error!("Tesseract: failed to stage capture bytes: {}", e);
                    return None;
                }
                let path = file.path().to_path_buf();
                temp_image = Some(file);
                path
            }
        };

        let command_future = Command::new(&self.binary)
            .arg(&input_path)
            .arg("-")
            .args(["-l", &self.languages])
            .arg("tsv")
            .output();

        let output = tokio::select! {
            result = command_future => {
                match result {
                    Ok(output) => output,
                    Err(e) => {
                        error!("Tesseract: failed to execute '{}': {}", self.binary, e);
                        return None;
                    }
                }
            },
            _ = tokio::time::sleep(self.timeout) => {
                error!("Tesseract: timed out after {:?}", self.timeout);
                return None;
            }
        };
        drop(temp_image);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Tesseract: engine failed: {}", stderr.trim());
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let (lines, confidences) = Self::parse_tsv(&stdout);
        if lines.is_empty() {
            warn!("Tesseract: no text found in image");
            return None;
        }

        let mean_confidence = if confidences.is_empty() {
            0.0
        } else {
            confidences.iter().sum::<f32>() / confidences.len() as f32 / 100.0
        };
        debug!(
            "Tesseract: {} lines, mean confidence {:.2}",
            lines.len(),
            mean_confidence
        );

        let recognized_text = merge::merge_lines(&lines);

        Some(OcrResult::new(
            recognized_text,
            mean_confidence,
            BoundingBox::default(),
            lines,
        ))
    }
}
