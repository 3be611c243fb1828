//! Error types for currency/unit/list composition (component C6).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("currency code {0:?} is not in the currency table")]
    UnknownCurrency(String),
    #[error("{0}")]
    ValueError(String),
    #[error(transparent)]
    Number(#[from] intl_numbers::NumberFormatError),
    #[error(transparent)]
    Pattern(#[from] intl_numbers::PatternSyntaxError),
    #[error(transparent)]
    LocaleData(#[from] intl_localedata::LocaleDataError),
}
