use async_trait::async_trait;
use isolang::Language;
use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::analysis::LexicalClass;
use crate::app_config::DictionaryConfig;
use crate::errors::DictionaryError;
use crate::language_utils;
use crate::providers::openai::{ChatRequest, OpenAiClient};

use super::{Definition, DictionaryEntry, DictionaryProvider, Meaning};

const SYSTEM_PROMPT: &str = "\
You are a comprehensive multilingual dictionary. When given a word, provide a complete dictionary entry.

Guidelines:
- Provide definitions in the same language as the input word when possible
- Include multiple meanings/parts of speech if they exist
- Keep definitions clear and concise
- Include realistic example sentences
- Provide relevant synonyms
- If you don't know the word, return the word with an empty meanings array
- Always return valid data matching the provided schema";

const INSTRUCTIONS: &str = "Return a complete vocabulary entry. If no synonyms exist, return an \
empty array. Always provide an example sentence.";

/// Dictionary service backed by an OpenAI model with structured outputs.
///
/// The model returns one flat entry (word, language, part of speech,
/// definition, example, synonyms) that gets folded into the nested
/// `DictionaryEntry` shape the rest of the application uses.
#[derive(Debug, Clone)]
pub struct OpenAiDictionaryProvider {
    client: OpenAiClient,
    model: String,
}

/// Flat response payload guaranteed by the JSON schema
#[derive(Debug, Deserialize)]
struct VocabularyEntryPayload {
    word: String,
    language: String,
    #[serde(rename = "partOfSpeech")]
    part_of_speech: String,
    definition: String,
    example: String,
    synonyms: Vec<String>,
}

impl OpenAiDictionaryProvider {
    pub fn new(config: &DictionaryConfig) -> Self {
        Self {
            client: OpenAiClient::new(
                config.effective_api_key(),
                config.endpoint.clone(),
                config.timeout_secs,
            ),
            model: config.model.clone(),
        }
    }

    fn entry_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "description": "Vocabulary word entry",
            "properties": {
                "word": { "type": "string", "description": "The word" },
                "language": { "type": "string", "description": "The language the word is a member of" },
                "partOfSpeech": { "type": "string", "description": "noun, verb, adverb, adjective, etc." },
                "definition": { "type": "string", "description": "Primary meaning" },
                "example": { "type": "string", "description": "Example sentence" },
                "synonyms": {
                    "type": "array",
                    "description": "Similar words",
                    "items": { "type": "string" }
                }
            },
            "required": ["word", "language", "partOfSpeech", "definition", "example", "synonyms"],
            "additionalProperties": false
        })
    }

    fn build_system_prompt(
        lexical_class: Option<LexicalClass>,
        language: Option<Language>,
        linguistic_context: Option<&str>,
    ) -> String {
        let mut prompt = SYSTEM_PROMPT.to_string();

        if let Some(language) = language {
            prompt.push_str(&format!(
                "\n - The word is detected to be in the language: {}, but make your own assessment.",
                language_utils::language_name(language)
            ));
        }
        if let Some(class) = lexical_class {
            prompt.push_str(&format!("\n - The word is detected to be a {}", class));
        }
        if let Some(context) = linguistic_context {
            prompt.push_str(&format!(
                "\n - In order to better ascertain the language and meaning, here is the word within a larger sentence: {}",
                context
            ));
        }

        prompt
    }

    fn build_user_prompt(
        word: &str,
        lexical_class: Option<LexicalClass>,
        language: Option<Language>,
    ) -> String {
        match (lexical_class, language) {
            (Some(class), Some(language)) => format!(
                "Define the {} '{}' in {}",
                class,
                word,
                language_utils::language_name(language)
            ),
            (Some(class), None) => format!("Define the {}: {}", class, word),
            (None, Some(language)) => format!(
                "Define the word in {}: {}",
                language_utils::language_name(language),
                word
            ),
            (None, None) => format!("Define the word: {}", word),
        }
    }

    /// Fold the flat payload into the nested entry shape
    fn fold_payload(payload: VocabularyEntryPayload) -> DictionaryEntry {
        let definition = Definition {
            definition: payload.definition,
            example: Some(payload.example).filter(|example| !example.is_empty()),
            synonyms: payload.synonyms,
        };

        DictionaryEntry {
            word: payload.word,
            language: payload.language,
            meanings: vec![Meaning {
                part_of_speech: payload.part_of_speech,
                definitions: vec![definition],
            }],
        }
    }

    fn parse_response(content: &str) -> Result<DictionaryEntry, DictionaryError> {
        let payload: VocabularyEntryPayload = serde_json::from_str(content)
            .map_err(|e| DictionaryError::ParseError(e.to_string()))?;
        Ok(Self::fold_payload(payload))
    }
}

#[async_trait]
impl DictionaryProvider for OpenAiDictionaryProvider {
    fn is_available(&self) -> bool {
        self.client.is_configured()
    }

    async fn fetch_definition(
        &self,
        word: &str,
        lexical_class: Option<LexicalClass>,
        language: Option<Language>,
        linguistic_context: Option<&str>,
    ) -> Result<DictionaryEntry, DictionaryError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(DictionaryError::InvalidInput(
                "word must not be empty".to_string(),
            ));
        }
        if !self.client.is_configured() {
            return Err(DictionaryError::MissingApiKey);
        }

        debug!(
            "Looking up '{}' (class: {:?}, language: {:?})",
            word,
            lexical_class,
            language.map(language_utils::language_code)
        );

        let request = ChatRequest::new(&self.model)
            .temperature(0.1)
            .max_tokens(1000)
            .json_schema("vocabulary_entry", Self::entry_schema())
            .add_message(
                "system",
                format!(
                    "{}\n\n{}",
                    Self::build_system_prompt(lexical_class, language, linguistic_context),
                    INSTRUCTIONS
                ),
            )
            .add_message(
                "user",
                Self::build_user_prompt(word, lexical_class, language),
            );

        let response = self.client.complete(request).await?;
        let content = OpenAiClient::extract_text(&response).ok_or(DictionaryError::NoContent)?;

        Self::parse_response(&content)
    }
}
