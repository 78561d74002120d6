pub mod ollama;
pub mod parser;

pub use ollama::*;
pub use parser::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Ollama is not running at {0}")]
    Connection(String),

    #[error("Ollama returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("No compatible model available")]
    NoModelAvailable,

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

/// LLM client abstraction (allows mocking)
pub trait LlmClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, ModelError>;

    fn is_model_available(&self, model: &str) -> Result<bool, ModelError>;

    fn list_models(&self) -> Result<Vec<String>, ModelError>;
}
