//! Error types for the date/time pattern interpreter (component C5).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateTimeFormatError {
    #[error("unrecognized date/time field character {0:?}")]
    UnknownField(char),
    #[error("unterminated literal quote in pattern {0:?}")]
    UnterminatedQuote(String),
    #[error("no interval pattern available and no fallback pattern supplied")]
    NoIntervalFallback,
    #[error("zone id {0:?} could not be resolved")]
    UnknownZone(String),
}
