//! Error type for the importer CLI (component C8).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("failed to serialize output for {0}: {1}")]
    Json(String, #[source] serde_json::Error),
}
