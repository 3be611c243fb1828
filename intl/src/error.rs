//! Error type for the public facade (component C9): wraps every
//! downstream component's error enum behind one `thiserror` type so
//! callers only need to match on one thing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntlError {
    #[error("invalid locale identifier: {0}")]
    InvalidLocale(String),
    #[error("no locale data available for {0:?}")]
    UnknownLocale(String),
    #[error(transparent)]
    LocaleData(#[from] intl_localedata::LocaleDataError),
    #[error(transparent)]
    PluralRule(#[from] intl_pluralrules::PluralRuleError),
    #[error(transparent)]
    Number(#[from] intl_numbers::NumberFormatError),
    #[error(transparent)]
    Pattern(#[from] intl_numbers::PatternSyntaxError),
    #[error(transparent)]
    Parse(#[from] intl_numbers::NumberParseError),
    #[error(transparent)]
    Format(#[from] intl_format::FormatError),
    #[error(transparent)]
    DateTime(#[from] intl_datetime::DateTimeFormatError),
    #[error(transparent)]
    Rbnf(#[from] intl_rbnf::RbnfError),
}

impl From<intl_locale::LocaleError> for IntlError {
    fn from(e: intl_locale::LocaleError) -> Self {
        match e {
            intl_locale::LocaleError::InvalidIdentifier(id) => IntlError::InvalidLocale(id),
        }
    }
}
