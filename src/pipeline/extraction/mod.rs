pub mod pdf;

pub use pdf::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Unsupported format for extraction")]
    UnsupportedFormat,
}

/// Document-to-text extraction seam (allows mocking).
///
/// An empty result is legal — a scanned PDF has no text layer — and is the
/// caller's to tolerate. Malformed input fails with an error.
pub trait DocumentExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Mock extractor for testing — returns a configurable text or failure.
pub struct MockExtractor {
    result: Result<String, String>,
}

impl MockExtractor {
    pub fn new(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

impl DocumentExtractor for MockExtractor {
    fn extract_text(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        match &self.result {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ExtractionError::PdfParsing(message.clone())),
        }
    }
}
