//! Error types for the RBNF interpreter (component C7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RbnfError {
    #[error("rule body {0:?} could not be tokenized")]
    Tokenization(String),
    #[error("ruleset {0:?} is not defined for this locale")]
    RulesetNotFound(String),
    #[error("ruleset {0:?} has no rule applicable to the requested value")]
    RuleNotFound(String),
    #[error("cannot request both `ordinal` and `year` entry points at once")]
    ConflictingEntryPoint,
    #[error(transparent)]
    Number(#[from] intl_numbers::NumberFormatError),
    #[error(transparent)]
    Pattern(#[from] intl_numbers::PatternSyntaxError),
    #[error(transparent)]
    LocaleData(#[from] intl_localedata::LocaleDataError),
}
