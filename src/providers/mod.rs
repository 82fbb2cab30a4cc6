/*!
 * Raw API clients shared by the higher-level services.
 *
 * The OCR remote variant and the dictionary service both talk to the same
 * OpenAI chat-completions API; the client lives here so request and response
 * plumbing is written once.
 */

pub mod openai;

pub use openai::OpenAiClient;
