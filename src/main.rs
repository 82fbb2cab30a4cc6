// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_arguments)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::file_utils::FileManager;
use crate::ocr::OcrProviderKind;

mod analysis;
mod app_config;
mod app_controller;
mod database;
mod dictionary;
mod errors;
mod file_utils;
mod language_utils;
mod ocr;
mod providers;

/// CLI Wrapper for OcrProviderKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOcrProvider {
    Tesseract,
    OpenAi,
}

impl From<CliOcrProvider> for OcrProviderKind {
    fn from(cli_provider: CliOcrProvider) -> Self {
        match cli_provider {
            CliOcrProvider::Tesseract => OcrProviderKind::Tesseract,
            CliOcrProvider::OpenAi => OcrProviderKind::OpenAi,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a page image (or a directory of images) and print the
    /// highlighted text
    Scan(ScanArgs),

    /// Scan a page, pick the word at an offset and add it to the vocabulary
    Add(AddArgs),

    /// List stored vocabulary words
    List(ListArgs),

    /// Search stored words by text or definition
    Search {
        /// Search string
        query: String,
    },

    /// Delete a word (and its contexts) by id
    Delete {
        /// Word id as shown by list
        id: i64,
    },

    /// Update study progress for a word
    Review(ReviewArgs),

    /// Generate shell completions for vocap
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// Page image file or directory of images
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// OCR provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliOcrProvider>,

    /// Print plain text without highlighting
    #[arg(long)]
    plain: bool,

    /// Write the recognized text to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct AddArgs {
    /// Page image to scan
    #[arg(value_name = "IMAGE_PATH")]
    image: Option<PathBuf>,

    /// Byte offset of the tapped word in the recognized text
    #[arg(long, requires = "image")]
    offset: Option<usize>,

    /// Add a word directly, skipping the scan
    #[arg(short, long, conflicts_with_all = ["image", "offset"])]
    word: Option<String>,

    /// Language code hint for direct lookup (e.g. 'en', 'es')
    #[arg(short, long, requires = "word")]
    language: Option<String>,

    /// OCR provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliOcrProvider>,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Only show words in this language (e.g. 'en', 'es')
    #[arg(short, long)]
    language: Option<String>,

    /// Show stored contexts for each word
    #[arg(long)]
    contexts: bool,
}

#[derive(Parser, Debug)]
struct ReviewArgs {
    /// Word id as shown by list
    id: i64,

    /// Set the mastery level (0-5)
    #[arg(short, long)]
    mastery: Option<i64>,

    /// Record one study session
    #[arg(short, long)]
    studied: bool,
}

/// vocap - Vocabulary Capture
///
/// Photograph a page, extract the text, tap a word, keep it. vocap runs OCR
/// over page images, highlights the interesting word classes, looks up
/// definitions and stores everything in a local vocabulary database.
#[derive(Parser, Debug)]
#[command(name = "vocap")]
#[command(version = "0.4.0")]
#[command(about = "OCR vocabulary capture for language learners")]
#[command(long_about = "vocap extracts text from photographed pages, analyzes it word by word and
builds a personal vocabulary list with definitions and captured context.

EXAMPLES:
    vocap scan page.jpg                        # OCR a page and print highlighted text
    vocap scan pages/ --plain                  # OCR a directory, no highlighting
    vocap scan page.jpg -p open-ai             # Use the remote vision model
    vocap add page.jpg --offset 128            # Add the word at byte offset 128
    vocap add -w serendipity -l en             # Add a word without scanning
    vocap list -l es                           # List stored Spanish words
    vocap review 3 --mastery 4                 # Set mastery for word 3
    vocap completions bash > vocap.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED OCR PROVIDERS:
    tesseract - Local Tesseract CLI engine (default)
    open-ai   - OpenAI vision model (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &options.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "vocap", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::from_file_or_default(&options.config_path)?;
    if let Some(level) = options.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match options.command {
        Commands::Scan(args) => run_scan(config, args).await,
        Commands::Add(args) => run_add(config, args).await,
        Commands::List(args) => run_list(config, args).await,
        Commands::Search { query } => run_search(config, &query).await,
        Commands::Delete { id } => run_delete(config, id).await,
        Commands::Review(args) => run_review(config, args).await,
        Commands::Completions { .. } => unreachable!("handled before config load"),
    }
}

async fn run_scan(mut config: Config, args: ScanArgs) -> Result<()> {
    if let Some(provider) = args.provider {
        config.ocr.provider = provider.into();
    }
    let controller = Controller::with_config(config)?;

    let scans = if args.input_path.is_dir() {
        controller.scan_directory(&args.input_path).await?
    } else {
        let scan = controller.scan_image(&args.input_path).await?;
        vec![(args.input_path.clone(), scan)]
    };

    let mut plain_output = String::new();
    for (path, scan) in &scans {
        if scans.len() > 1 {
            println!("--- {} ---", path.display());
        }
        if args.plain || args.output.is_some() {
            plain_output.push_str(&scan.ocr.recognized_text);
            plain_output.push('\n');
        }
        if args.plain {
            println!("{}", scan.ocr.recognized_text);
        } else {
            println!("{}", scan.styled.to_ansi());
        }
    }

    if let Some(output) = args.output {
        FileManager::write_to_file(&output, &plain_output)?;
        info!("Recognized text written to {:?}", output);
    }

    Ok(())
}

async fn run_add(mut config: Config, args: AddArgs) -> Result<()> {
    if let Some(provider) = args.provider {
        config.ocr.provider = provider.into();
    }
    let controller = Controller::with_config(config)?;

    if let Some(word) = args.word {
        let language = args
            .language
            .as_deref()
            .and_then(language_utils::language_from_code);
        let record = controller.add_word_direct(&word, language).await?;
        println!(
            "{} [{}] - {}",
            record.word, record.language, record.definition
        );
        return Ok(());
    }

    let image = args
        .image
        .ok_or_else(|| anyhow!("Provide an image with an --offset, or use --word"))?;
    let offset = args
        .offset
        .ok_or_else(|| anyhow!("--offset is required when scanning an image"))?;

    let scan = controller.scan_image(&image).await?;
    match controller.add_word_from_scan(&scan, offset).await? {
        Some(record) => {
            println!(
                "{} [{}] - {}",
                record.word, record.language, record.definition
            );
        }
        None => {
            // A tap on punctuation selects nothing; not an error
            info!("No word at offset {}, nothing added", offset);
        }
    }

    Ok(())
}

async fn run_list(config: Config, args: ListArgs) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let words = controller.list_words(args.language.as_deref()).await?;

    if words.is_empty() {
        println!("No words stored yet.");
        return Ok(());
    }

    for word in &words {
        let part_of_speech = word
            .part_of_speech
            .as_deref()
            .map(|pos| format!(" ({})", pos))
            .unwrap_or_default();
        println!(
            "{:>4}  {} [{}]{} - {} [mastery {}/5, studied {}x]",
            word.id,
            word.word,
            word.language,
            part_of_speech,
            word.definition,
            word.mastery_level,
            word.study_count
        );

        if args.contexts {
            for context in controller.word_contexts(word.id).await? {
                println!("      \"{}\"", context.sentence);
            }
        }
    }

    Ok(())
}

async fn run_search(config: Config, query: &str) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let words = controller.search_words(query).await?;

    if words.is_empty() {
        println!("No matches for '{}'.", query);
        return Ok(());
    }

    for word in &words {
        println!("{:>4}  {} [{}] - {}", word.id, word.word, word.language, word.definition);
    }
    Ok(())
}

async fn run_delete(config: Config, id: i64) -> Result<()> {
    let controller = Controller::with_config(config)?;
    controller.delete_word(id).await?;
    println!("Deleted word {}.", id);
    Ok(())
}

async fn run_review(config: Config, args: ReviewArgs) -> Result<()> {
    if args.mastery.is_none() && !args.studied {
        error!("Nothing to do: pass --mastery and/or --studied");
        return Err(anyhow!("Nothing to do: pass --mastery and/or --studied"));
    }

    let controller = Controller::with_config(config)?;

    if let Some(level) = args.mastery {
        controller.set_mastery(args.id, level).await?;
        println!("Word {} mastery set to {}/5.", args.id, level);
    }
    if args.studied {
        controller.record_study(args.id).await?;
        println!("Recorded a study session for word {}.", args.id);
    }

    Ok(())
}
