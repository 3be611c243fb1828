//! The formatting contract (spec §4.5.2): each token delegates to a
//! field-specific renderer; numeric fields zero-pad to their arity, named
//! fields consult the locale's named-form tables and fall back to the
//! numeric form when a lookup misses.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::dayperiod::resolve_period;
use crate::error::DateTimeFormatError;
use crate::field::{FieldChar, PatternToken};
use crate::symbols::{DateTimeSymbols, FormContext, Width};
use crate::zone::{render_gmt, render_iso, render_rfc, ZoneInfo};

fn zero_pad(value: i64, width: usize) -> String {
    let s = value.unsigned_abs().to_string();
    if s.len() >= width {
        s
    } else {
        format!("{}{}", "0".repeat(width - s.len()), s)
    }
}

fn width_for_count(count: usize) -> Width {
    match count {
        5 => Width::Narrow,
        4 => Width::Wide,
        _ => Width::Abbreviated,
    }
}

fn context_for(ch: FieldChar) -> FormContext {
    match ch {
        FieldChar::SA_Q | FieldChar::SA_M | FieldChar::SA_Weekday => FormContext::StandAlone,
        _ => FormContext::Format,
    }
}

fn named_field(values: Option<&[String]>, index: usize) -> Option<String> {
    values.and_then(|v| v.get(index)).cloned()
}

fn render_field(
    ch: FieldChar,
    count: usize,
    dt: &NaiveDateTime,
    symbols: &DateTimeSymbols,
    zone: Option<&dyn ZoneInfo>,
) -> Result<String, DateTimeFormatError> {
    let hour = dt.hour();
    let minute = dt.minute();

    Ok(match ch {
        FieldChar::G => {
            let index = if dt.year() >= 1 { 1 } else { 0 };
            named_field(symbols.eras.get(width_for_count(count)), index)
                .unwrap_or_else(|| if index == 1 { "AD".to_string() } else { "BC".to_string() })
        }
        FieldChar::Y | FieldChar::YearWeekBased => {
            let year = if matches!(ch, FieldChar::YearWeekBased) {
                dt.iso_week().year()
            } else {
                dt.year()
            };
            if count == 2 {
                zero_pad((year.rem_euclid(100)) as i64, 2)
            } else {
                zero_pad(year as i64, count)
            }
        }
        FieldChar::Q | FieldChar::SA_Q => {
            let quarter = (dt.month() - 1) / 3;
            if count <= 2 {
                zero_pad(quarter as i64 + 1, count)
            } else {
                let context = context_for(ch);
                named_field(symbols.quarters.get(context, width_for_count(count)), quarter as usize)
                    .unwrap_or_else(|| zero_pad(quarter as i64 + 1, 1))
            }
        }
        FieldChar::M | FieldChar::SA_M => {
            let month = dt.month();
            if count <= 2 {
                zero_pad(month as i64, count)
            } else {
                let context = context_for(ch);
                named_field(symbols.months.get(context, width_for_count(count)), (month - 1) as usize)
                    .unwrap_or_else(|| zero_pad(month as i64, 2))
            }
        }
        FieldChar::WeekOfYear => zero_pad(dt.iso_week().week() as i64, count.min(2)),
        FieldChar::WeekOfMonth => {
            let week_of_month = (dt.day() - 1) / 7 + 1;
            zero_pad(week_of_month as i64, count.min(2))
        }
        FieldChar::D => zero_pad(dt.day() as i64, count),
        FieldChar::DayOfYear => zero_pad(dt.ordinal() as i64, count),
        FieldChar::DayOfWeekInMonth => zero_pad(((dt.day() - 1) / 7 + 1) as i64, 1),
        FieldChar::E | FieldChar::LocalWeekday | FieldChar::SA_Weekday => {
            let weekday_index = dt.weekday().num_days_from_sunday() as usize;
            if matches!(ch, FieldChar::LocalWeekday) && count <= 2 {
                zero_pad(weekday_index as i64 + 1, count)
            } else {
                let context = context_for(ch);
                named_field(symbols.weekdays.get(context, width_for_count(count)), weekday_index)
                    .unwrap_or_else(|| zero_pad(weekday_index as i64 + 1, 1))
            }
        }
        FieldChar::A => {
            let period_id = resolve_period(&symbols.day_period_rules, hour, minute);
            let width = if count >= 4 { Width::Wide } else { Width::Abbreviated };
            symbols
                .periods
                .get(&period_id)
                .and_then(|names| names.get(width))
                .map(str::to_string)
                .unwrap_or_else(|| if hour < 12 { "AM".to_string() } else { "PM".to_string() })
        }
        FieldChar::H12 => {
            let h = hour % 12;
            zero_pad(if h == 0 { 12 } else { h as i64 }, count)
        }
        FieldChar::H24 => zero_pad(hour as i64, count),
        FieldChar::K => zero_pad((hour % 12) as i64, count),
        FieldChar::LowerK => zero_pad(if hour == 0 { 24 } else { hour as i64 }, count),
        FieldChar::Minute => zero_pad(minute as i64, count),
        FieldChar::Second => zero_pad(dt.second() as i64, count),
        FieldChar::FractionalSecond => {
            let nanos = dt.nanosecond() % 1_000_000_000;
            let full = format!("{nanos:09}");
            if count <= 9 {
                full[..count].to_string()
            } else {
                format!("{full}{}", "0".repeat(count - 9))
            }
        }
        FieldChar::MillisInDay => {
            let millis = (hour as i64 * 3600 + minute as i64 * 60 + dt.second() as i64) * 1000
                + dt.nanosecond() as i64 / 1_000_000;
            zero_pad(millis, count)
        }
        FieldChar::ZoneNamed => match zone {
            Some(z) if count <= 3 => short_zone_name(z, *dt),
            Some(z) => z.zone_id().to_string(),
            None => "UTC".to_string(),
        },
        FieldChar::ZoneRfc => render_rfc(offset_or_zero(zone, *dt), count),
        FieldChar::ZoneGmt => render_gmt(offset_or_zero(zone, *dt), count),
        FieldChar::ZoneId => match zone {
            Some(z) if count == 2 => z.zone_id().to_string(),
            Some(z) => z.exemplar_city().unwrap_or_else(|| z.zone_id()).to_string(),
            None => "Etc/Unknown".to_string(),
        },
        FieldChar::ZoneIso => render_iso(offset_or_zero(zone, *dt), count, true),
        FieldChar::ZoneIsoZ => render_iso(offset_or_zero(zone, *dt), count, false),
    })
}

fn offset_or_zero(zone: Option<&dyn ZoneInfo>, at: NaiveDateTime) -> i32 {
    zone.map(|z| z.utc_offset_seconds(at)).unwrap_or(0)
}

fn short_zone_name(zone: &dyn ZoneInfo, at: NaiveDateTime) -> String {
    let offset = zone.utc_offset_seconds(at);
    render_gmt(offset, 1)
}

/// Renders every token in `pattern` against `dt`, substituting literals
/// verbatim.
pub fn format_tokens(
    tokens: &[PatternToken],
    dt: &NaiveDateTime,
    symbols: &DateTimeSymbols,
    zone: Option<&dyn ZoneInfo>,
) -> Result<String, DateTimeFormatError> {
    let mut out = String::new();
    for token in tokens {
        match token {
            PatternToken::Literal(s) => out.push_str(s),
            PatternToken::Field { ch, count } => {
                out.push_str(&render_field(*ch, *count, dt, symbols, zone)?)
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::tokenize;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn renders_numeric_pattern_without_symbols() {
        let tokens = tokenize("yyyy-MM-dd HH:mm:ss").unwrap();
        let symbols = DateTimeSymbols::default();
        let out = format_tokens(&tokens, &sample(), &symbols, None).unwrap();
        assert_eq!(out, "2024-03-05 14:05:09");
    }

    #[test]
    fn renders_12_hour_clock_with_am_pm_fallback() {
        let tokens = tokenize("h:mm a").unwrap();
        let symbols = DateTimeSymbols::default();
        let out = format_tokens(&tokens, &sample(), &symbols, None).unwrap();
        assert_eq!(out, "2:05 PM");
    }

    #[test]
    fn renders_named_month_when_available() {
        let mut symbols = DateTimeSymbols::default();
        symbols.months.format.wide = Some(
            ["January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November", "December"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let tokens = tokenize("MMMM d").unwrap();
        let out = format_tokens(&tokens, &sample(), &symbols, None).unwrap();
        assert_eq!(out, "March 5");
    }

    #[test]
    fn falls_back_to_numeric_when_named_month_missing() {
        let tokens = tokenize("MMMM").unwrap();
        let symbols = DateTimeSymbols::default();
        let out = format_tokens(&tokens, &sample(), &symbols, None).unwrap();
        assert_eq!(out, "03");
    }
}
