//! Date/time pattern interpreter (component C5): field tokenization,
//! named-form formatting, day-period and zone rendering, skeleton
//! best-match, and interval formatting.

pub mod dayperiod;
pub mod error;
pub mod field;
pub mod interval;
pub mod render;
pub mod skeleton;
pub mod symbols;
pub mod zone;

pub use error::DateTimeFormatError;
pub use field::{tokenize, FieldChar, PatternToken};
pub use interval::{format_interval, greatest_difference_field, IntervalField, IntervalPatterns};
pub use render::format_tokens;
pub use skeleton::{best_match, substitute_arities};
pub use symbols::{DateTimeSymbols, FormContext, Width};
pub use zone::ZoneInfo;
