use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::formatting::FormattingConfig;
use crate::ocr::OcrProviderKind;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Environment variable that overrides configured OpenAI API keys
pub const API_KEY_ENV_VAR: &str = "VOCAP_OPENAI_API_KEY";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// OCR pipeline configuration
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Dictionary lookup configuration
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Word highlighting configuration
    #[serde(default)]
    pub formatting: FormattingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// OCR configuration: selected provider plus per-variant settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OcrConfig {
    /// Selected OCR provider
    #[serde(default)]
    pub provider: OcrProviderKind,

    /// Local Tesseract engine settings
    #[serde(default)]
    pub tesseract: TesseractConfig,

    /// Remote vision-model settings
    #[serde(default)]
    pub openai: OpenAiOcrConfig,
}

/// Tesseract engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TesseractConfig {
    /// Binary name or path
    #[serde(default = "default_tesseract_binary")]
    pub binary: String,

    /// Recognition languages passed to the engine (e.g. "eng+spa")
    #[serde(default = "default_tesseract_languages")]
    pub languages: String,

    /// Engine timeout in seconds
    #[serde(default = "default_tesseract_timeout_secs")]
    pub timeout_secs: u64,
}

/// Remote OCR provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAiOcrConfig {
    /// Model name
    #[serde(default = "default_ocr_model")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (empty for the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
}

/// Dictionary service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DictionaryConfig {
    /// Model name
    #[serde(default = "default_dictionary_model")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (empty for the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_tesseract_binary() -> String {
    "tesseract".to_string()
}

fn default_tesseract_languages() -> String {
    "eng+spa".to_string()
}

fn default_tesseract_timeout_secs() -> u64 {
    60
}

fn default_ocr_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_dictionary_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary: default_tesseract_binary(),
            languages: default_tesseract_languages(),
            timeout_secs: default_tesseract_timeout_secs(),
        }
    }
}

impl Default for OpenAiOcrConfig {
    fn default() -> Self {
        Self {
            model: default_ocr_model(),
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            model: default_dictionary_model(),
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            provider: OcrProviderKind::default(),
            tesseract: TesseractConfig::default(),
            openai: OpenAiOcrConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            dictionary: DictionaryConfig::default(),
            formatting: FormattingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl OpenAiOcrConfig {
    /// Configured API key, with the environment variable taking precedence
    pub fn effective_api_key(&self) -> String {
        std::env::var(API_KEY_ENV_VAR).unwrap_or_else(|_| self.api_key.clone())
    }
}

impl DictionaryConfig {
    /// Configured API key, with the environment variable taking precedence
    pub fn effective_api_key(&self) -> String {
        std::env::var(API_KEY_ENV_VAR).unwrap_or_else(|_| self.api_key.clone())
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the configuration, writing a default file first when none exists
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }
        Self::from_file(path)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ocr.tesseract.binary.trim().is_empty() {
            return Err(anyhow!("Tesseract binary must not be empty"));
        }
        if self.ocr.tesseract.languages.trim().is_empty() {
            return Err(anyhow!("Tesseract languages must not be empty"));
        }
        if self.ocr.tesseract.timeout_secs == 0 {
            return Err(anyhow!("Tesseract timeout must be greater than zero"));
        }
        if self.ocr.openai.model.trim().is_empty() {
            return Err(anyhow!("OCR model must not be empty"));
        }
        if self.ocr.openai.timeout_secs == 0 {
            return Err(anyhow!("OCR request timeout must be greater than zero"));
        }
        if self.dictionary.model.trim().is_empty() {
            return Err(anyhow!("Dictionary model must not be empty"));
        }
        if self.dictionary.timeout_secs == 0 {
            return Err(anyhow!("Dictionary request timeout must be greater than zero"));
        }

        Ok(())
    }
}
