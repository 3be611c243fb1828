//! Number, percent, scientific, currency and compact-decimal pattern
//! interpreter (component C4): turns the pattern/symbol data a locale
//! resolves (component C2) into formatted strings, and turns user-entered
//! text back into exact decimals.

pub mod compact;
pub mod error;
pub mod format;
pub mod parse;
pub mod pattern;
pub mod rounding;
pub mod symbols;

pub use compact::{format_compact, CompactData, CompactEntry};
pub use error::{NumberFormatError, NumberParseError, PatternSyntaxError};
pub use format::{format_currency_value, format_number, FormatOptions, Number};
pub use parse::{parse_number, ParseOptions};
pub use pattern::{parse_pattern, AffixPair, ExponentSpec, NumberPattern, Scale};
pub use symbols::NumberSymbols;
