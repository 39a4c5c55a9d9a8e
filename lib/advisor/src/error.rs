use std::time::Duration;
use thiserror::Error;

/// Why advice text could not be produced. Never fails a recommendation; see
/// [`crate::advice_text`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdviceError {
    #[error("request to text-generation service failed: {0}")]
    Request(String),

    #[error("text-generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not parse text-generation response: {0}")]
    Parse(String),

    #[error("text-generation service returned no text")]
    EmptyResponse,

    #[error("text-generation timed out after {0:?}")]
    Timeout(Duration),
}
