//! Interval formatting (spec §4.5.3): picks the greatest-difference field
//! between two instants (the most significant field at which they
//! differ), applies the associated start/end pattern pair, and
//! concatenates. Falls back to the locale's general `{0}`/`{1}` pattern
//! when no per-field pattern is known, or to the plain single-datetime
//! pattern when start and end are equal.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::DateTimeFormatError;
use crate::field::PatternToken;
use crate::render::format_tokens;
use crate::symbols::DateTimeSymbols;
use crate::zone::ZoneInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalField {
    Era,
    Year,
    Month,
    Day,
    DayPeriod,
    Hour,
    Minute,
}

impl IntervalField {
    pub fn key(&self) -> &'static str {
        match self {
            IntervalField::Era => "G",
            IntervalField::Year => "y",
            IntervalField::Month => "M",
            IntervalField::Day => "d",
            IntervalField::DayPeriod => "a",
            IntervalField::Hour => "h",
            IntervalField::Minute => "m",
        }
    }
}

/// `interval_formats[skeleton]`: per greatest-difference-field start/end
/// pattern pairs, plus the locale's general fallback pattern.
#[derive(Debug, Clone, Default)]
pub struct IntervalPatterns {
    pub per_field: HashMap<String, (String, String)>,
    pub fallback: Option<String>,
}

/// Finds the most significant field at which `start` and `end` differ,
/// in era -> year -> month -> day -> AM/PM -> hour -> minute order.
/// `None` means the two instants are equal down to the minute.
pub fn greatest_difference_field(start: &NaiveDateTime, end: &NaiveDateTime) -> Option<IntervalField> {
    let era = |dt: &NaiveDateTime| dt.year() >= 1;
    if era(start) != era(end) {
        return Some(IntervalField::Era);
    }
    if start.year() != end.year() {
        return Some(IntervalField::Year);
    }
    if start.month() != end.month() {
        return Some(IntervalField::Month);
    }
    if start.day() != end.day() {
        return Some(IntervalField::Day);
    }
    if (start.hour() < 12) != (end.hour() < 12) {
        return Some(IntervalField::DayPeriod);
    }
    if start.hour() != end.hour() {
        return Some(IntervalField::Hour);
    }
    if start.minute() != end.minute() {
        return Some(IntervalField::Minute);
    }
    None
}

pub fn format_interval(
    start: &NaiveDateTime,
    end: &NaiveDateTime,
    single_pattern_tokens: &[PatternToken],
    symbols: &DateTimeSymbols,
    zone: Option<&dyn ZoneInfo>,
    patterns: &IntervalPatterns,
) -> Result<String, DateTimeFormatError> {
    let Some(field) = greatest_difference_field(start, end) else {
        return format_tokens(single_pattern_tokens, start, symbols, zone);
    };

    if let Some((start_pattern, end_pattern)) = patterns.per_field.get(field.key()) {
        let start_tokens = crate::field::tokenize(start_pattern)?;
        let end_tokens = crate::field::tokenize(end_pattern)?;
        let rendered_start = format_tokens(&start_tokens, start, symbols, zone)?;
        let rendered_end = format_tokens(&end_tokens, end, symbols, zone)?;
        return Ok(format!("{rendered_start}{rendered_end}"));
    }

    let rendered_start = format_tokens(single_pattern_tokens, start, symbols, zone)?;
    let rendered_end = format_tokens(single_pattern_tokens, end, symbols, zone)?;
    let fallback = patterns
        .fallback
        .clone()
        .unwrap_or_else(|| "{0} \u{2013} {1}".to_string());
    Ok(fallback.replace("{0}", &rendered_start).replace("{1}", &rendered_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::tokenize;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn equal_instants_use_single_pattern() {
        let a = dt(2024, 3, 5, 9, 0);
        let tokens = tokenize("yyyy-MM-dd").unwrap();
        let symbols = DateTimeSymbols::default();
        let out = format_interval(&a, &a, &tokens, &symbols, None, &IntervalPatterns::default()).unwrap();
        assert_eq!(out, "2024-03-05");
    }

    #[test]
    fn differing_months_select_month_field() {
        let start = dt(2024, 3, 5, 9, 0);
        let end = dt(2024, 4, 5, 9, 0);
        assert_eq!(greatest_difference_field(&start, &end), Some(IntervalField::Month));
    }

    #[test]
    fn falls_back_to_general_pattern_when_field_unmapped() {
        let start = dt(2024, 3, 5, 9, 0);
        let end = dt(2024, 4, 5, 9, 0);
        let tokens = tokenize("MM-dd").unwrap();
        let symbols = DateTimeSymbols::default();
        let out = format_interval(&start, &end, &tokens, &symbols, None, &IntervalPatterns::default()).unwrap();
        assert_eq!(out, "03-05 \u{2013} 04-05");
    }
}
