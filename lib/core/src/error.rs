use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("No reliable match found for '{chemical}' on '{crop}'.")]
    NoReliableMatch { chemical: String, crop: String },

    #[error("Failed to load catalog: {0}")]
    Load(String),

    #[error("Record index {index} out of range (catalog has {len} records)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Whether the caller caused this error (bad input or nothing close enough
    /// in the catalog) as opposed to a fault on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NoReliableMatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_message_names_inputs() {
        let err = Error::NoReliableMatch {
            chemical: "unknownchem123".to_string(),
            crop: "wheat".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("unknownchem123"));
        assert!(msg.contains("wheat"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_load_is_server_side() {
        assert!(!Error::Load("missing".into()).is_client_error());
        assert!(Error::Validation("bad".into()).is_client_error());
    }
}
