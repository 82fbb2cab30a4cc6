use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::analysis::formatting::StyledText;
use crate::analysis::selection::{WordSelection, WordSelector};
use crate::analysis::{TextAnalysisResult, TextAnalyzer, TextFormatter};
use crate::app_config::Config;
use crate::database::{VocabularyRepository, VocabularyWordRecord, WordContextRecord, MAX_MASTERY_LEVEL};
use crate::dictionary::{DictionaryProvider, OpenAiDictionaryProvider};
use crate::file_utils::FileManager;
use crate::ocr::{ImageInput, OcrResult, OcrServiceManager};

// @module: Application controller for the capture pipeline

/// Result of scanning one page image
#[derive(Debug)]
pub struct PageScan {
    /// The capture that was recognized
    pub image: ImageInput,
    /// Raw OCR outcome
    pub ocr: OcrResult,
    /// Word-level analysis of the recognized text
    pub analysis: TextAnalysisResult,
    /// Highlighted text ready for terminal display
    pub styled: StyledText,
}

/// Main application controller wiring OCR, analysis, dictionary and store.
///
/// One capture pipeline runs at a time; the OCR manager's busy flag refuses
/// overlapping captures. There are no retries: a failed OCR pass or lookup
/// surfaces once and the user re-triggers manually.
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: OCR provider registry
    ocr_manager: OcrServiceManager,
    // @field: Dictionary service
    dictionary: Box<dyn DictionaryProvider>,
    // @field: Vocabulary store
    repository: VocabularyRepository,
    analyzer: TextAnalyzer,
    formatter: TextFormatter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let ocr_manager = OcrServiceManager::from_config(&config.ocr);
        let dictionary = Box::new(OpenAiDictionaryProvider::new(&config.dictionary));
        let repository = VocabularyRepository::new_default()?;

        Ok(Self::assemble(config, ocr_manager, dictionary, repository))
    }

    /// Create a controller from pre-built parts (for tests)
    pub fn with_parts(
        config: Config,
        ocr_manager: OcrServiceManager,
        dictionary: Box<dyn DictionaryProvider>,
        repository: VocabularyRepository,
    ) -> Self {
        Self::assemble(config, ocr_manager, dictionary, repository)
    }

    fn assemble(
        config: Config,
        ocr_manager: OcrServiceManager,
        dictionary: Box<dyn DictionaryProvider>,
        repository: VocabularyRepository,
    ) -> Self {
        Self {
            config,
            ocr_manager,
            dictionary,
            repository,
            analyzer: TextAnalyzer::new(),
            formatter: TextFormatter::new(),
        }
    }

    /// Whether a capture is currently being processed
    pub fn is_processing(&self) -> bool {
        self.ocr_manager.is_processing()
    }

    /// Run OCR and analysis over a single page image
    pub async fn scan_image<P: AsRef<Path>>(&self, path: P) -> Result<PageScan> {
        let path = path.as_ref();
        info!("Scanning {:?}", path);

        let image = ImageInput::from_path(path)?;
        self.scan(image).await
    }

    /// Run OCR and analysis over an already-loaded capture
    pub async fn scan(&self, image: ImageInput) -> Result<PageScan> {
        let provider_name = self
            .ocr_manager
            .current_provider()
            .map(|provider| provider.display_name().to_string())
            .unwrap_or_else(|| self.ocr_manager.selected_kind().display_name().to_string());

        let ocr = self
            .ocr_manager
            .recognize_text(&image)
            .await?
            .ok_or(crate::errors::OcrError::NoText(provider_name))?;

        debug!(
            "Recognized {} bytes of text (confidence {:.2})",
            ocr.recognized_text.len(),
            ocr.confidence
        );

        let analysis = self.analyzer.analyze(&ocr.recognized_text);
        let styled = self.formatter.format_text(&analysis, &self.config.formatting);

        Ok(PageScan {
            image,
            ocr,
            analysis,
            styled,
        })
    }

    /// Scan every page image under a directory, skipping files that fail
    pub async fn scan_directory<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<(PathBuf, PageScan)>> {
        let images = FileManager::find_image_files(dir.as_ref())?;
        if images.is_empty() {
            return Err(anyhow!(
                "No page images found in {:?}",
                dir.as_ref()
            ));
        }

        let progress = ProgressBar::new(images.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut scans = Vec::new();
        for path in images {
            progress.set_message(
                path.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            match self.scan_image(&path).await {
                Ok(scan) => scans.push((path, scan)),
                Err(e) => warn!("Skipping {:?}: {}", path, e),
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(scans)
    }

    /// Resolve a caret offset inside a scanned page to a word selection.
    ///
    /// A position covering no word characters resolves to `None` silently.
    pub fn select_word(&self, scan: &PageScan, offset: usize) -> Option<WordSelection> {
        WordSelector::new(&scan.analysis).resolve(offset)
    }

    /// Look up the selected word and persist it with its capture context.
    ///
    /// Returns `Ok(None)` when the offset resolves to nothing. Dictionary
    /// failures propagate; persistence failures are logged and swallowed so
    /// the pipeline result still reaches the user.
    pub async fn add_word_from_scan(
        &self,
        scan: &PageScan,
        offset: usize,
    ) -> Result<Option<VocabularyWordRecord>> {
        let Some(selection) = self.select_word(scan, offset) else {
            debug!("Offset {} resolved to no word, nothing to add", offset);
            return Ok(None);
        };

        let entry = self
            .dictionary
            .fetch_definition(
                &selection.word,
                selection.lexical_class,
                selection.language,
                Some(&selection.linguistic_context),
            )
            .await?;

        let mut record = VocabularyWordRecord::new(
            &selection.word,
            &entry.language,
            entry
                .primary_definition()
                .unwrap_or("No definition available"),
            entry.primary_part_of_speech().map(str::to_string),
        );

        match self.repository.add_word(&record).await {
            Ok(word_id) => {
                record.id = word_id;
                let context = WordContextRecord::new(
                    word_id,
                    &selection.sentence,
                    Some(scan.image.bytes().to_vec()),
                );
                if let Err(e) = self.repository.add_context(&context).await {
                    error!("Error saving word context: {}", e);
                }
                info!("Added '{}' to vocabulary (id {})", record.word, word_id);
            }
            Err(e) => {
                // Persistence failures do not abort the pipeline
                error!("Error saving word: {}", e);
            }
        }

        Ok(Some(record))
    }

    /// Look up a word directly, without a scanned page
    pub async fn add_word_direct(
        &self,
        word: &str,
        language: Option<isolang::Language>,
    ) -> Result<VocabularyWordRecord> {
        let entry = self
            .dictionary
            .fetch_definition(word, None, language, None)
            .await?;

        let mut record = VocabularyWordRecord::new(
            word,
            &entry.language,
            entry
                .primary_definition()
                .unwrap_or("No definition available"),
            entry.primary_part_of_speech().map(str::to_string),
        );

        match self.repository.add_word(&record).await {
            Ok(word_id) => {
                record.id = word_id;
                info!("Added '{}' to vocabulary (id {})", record.word, word_id);
            }
            Err(e) => {
                error!("Error saving word: {}", e);
            }
        }

        Ok(record)
    }

    /// All stored words, optionally filtered by language, newest first
    pub async fn list_words(&self, language: Option<&str>) -> Result<Vec<VocabularyWordRecord>> {
        match language {
            Some(language) => self.repository.fetch_words_by_language(language).await,
            None => self.repository.fetch_words().await,
        }
    }

    /// Words matching a search string in word or definition
    pub async fn search_words(&self, query: &str) -> Result<Vec<VocabularyWordRecord>> {
        self.repository.search_words(query).await
    }

    /// Contexts stored for a word
    pub async fn word_contexts(&self, word_id: i64) -> Result<Vec<WordContextRecord>> {
        self.repository.word_contexts(word_id).await
    }

    /// Delete a word and its contexts
    pub async fn delete_word(&self, word_id: i64) -> Result<()> {
        if let Err(e) = self.repository.delete_word(word_id).await {
            error!("Error deleting word {}: {}", word_id, e);
        }
        Ok(())
    }

    /// Set a word's mastery level
    pub async fn set_mastery(&self, word_id: i64, level: i64) -> Result<()> {
        if !(0..=MAX_MASTERY_LEVEL).contains(&level) {
            return Err(anyhow!(
                "Mastery level must be between 0 and {}",
                MAX_MASTERY_LEVEL
            ));
        }

        if let Err(e) = self.repository.update_mastery(word_id, level).await {
            error!("Error updating mastery for word {}: {}", word_id, e);
        }
        Ok(())
    }

    /// Record one review of a word
    pub async fn record_study(&self, word_id: i64) -> Result<()> {
        if let Err(e) = self.repository.increment_study_count(word_id).await {
            error!("Error recording study for word {}: {}", word_id, e);
        }
        Ok(())
    }
}
