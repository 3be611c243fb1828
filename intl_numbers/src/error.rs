//! Error types for the number-pattern interpreter (component C4).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternSyntaxError {
    #[error("empty number pattern")]
    Empty,
    #[error("number pattern has more than two `;`-separated subpatterns: {0:?}")]
    TooManySubpatterns(String),
    #[error("number pattern {0:?} has no digit or `@` placeholders")]
    NoDigits(String),
    #[error("number pattern {0:?} has more than one decimal point")]
    MultipleDecimalPoints(String),
    #[error("number pattern {0:?} has a malformed exponent marker")]
    MalformedExponent(String),
}

#[derive(Debug, Error)]
pub enum NumberFormatError {
    #[error(transparent)]
    Pattern(#[from] PatternSyntaxError),
    #[error("numbering system {0:?} is not supported")]
    UnsupportedNumberingSystem(String),
    #[error("could not format value: {0}")]
    Arithmetic(String),
}

#[derive(Debug, Error)]
pub enum NumberParseError {
    /// Strict-mode rejection (spec §4.4.3): `regrouped` re-positions the
    /// input's own group separators at the pattern's legal boundaries,
    /// `decimal_only` drops grouping entirely. Either may be absent when
    /// the input can't be sensibly repaired into that shape (e.g. a
    /// doubled separator has no legal decimal-only reading).
    #[error("{input:?} is not a valid number in strict mode; did you mean {regrouped:?} or {decimal_only:?}?")]
    StrictMismatch {
        input: String,
        regrouped: Option<String>,
        decimal_only: Option<String>,
    },
    #[error("{0:?} could not be parsed as a number")]
    Invalid(String),
    #[error("numbering system {0:?} is not supported")]
    UnsupportedNumberingSystem(String),
}
