//! Time zone rendering (spec §4.5.1 `z`/`Z`/`O`/`V`/`X`/`x`). Per the
//! open question on zone boundary types, callers are not forced onto
//! `chrono-tz`: anything implementing `ZoneInfo` (offset, DST flag, a
//! stable id) can be rendered.

use chrono::NaiveDateTime;

/// Minimal zone abstraction a caller supplies alongside a naive
/// date/time; `intl_datetime` never resolves IANA zone databases itself.
pub trait ZoneInfo {
    /// Offset from UTC, in seconds, at `at` (local wall-clock time).
    fn utc_offset_seconds(&self, at: NaiveDateTime) -> i32;
    fn is_dst(&self, at: NaiveDateTime) -> bool;
    /// Stable zone id, e.g. `"America/Los_Angeles"`.
    fn zone_id(&self) -> &str;
    /// Locale-facing exemplar city, when known (used by `VVV`).
    fn exemplar_city(&self) -> Option<&str> {
        None
    }
}

fn format_offset(total_seconds: i32, with_colon: bool, with_seconds_if_nonzero: bool, z_for_zero: bool) -> String {
    if total_seconds == 0 && z_for_zero {
        return "Z".to_string();
    }
    let sign = if total_seconds < 0 { '-' } else { '+' };
    let abs = total_seconds.unsigned_abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    let seconds = abs % 60;
    let mut out = if with_colon {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}{minutes:02}")
    };
    if with_seconds_if_nonzero && seconds != 0 {
        out.push_str(&format!(":{seconds:02}"));
    }
    out
}

/// `Z` field: 1-3 => `+HHMM`, 4 => `GMT+HH:MM`, 5 => ISO 8601 `+HH:MM`.
pub fn render_rfc(offset_seconds: i32, count: usize) -> String {
    match count {
        1..=3 => format_offset(offset_seconds, false, false, false),
        4 => format!("GMT{}", format_offset(offset_seconds, true, false, false)),
        _ => format_offset(offset_seconds, true, true, true),
    }
}

/// `O` field: 1 => `GMT+H`, 4 => `GMT+HH:MM`.
pub fn render_gmt(offset_seconds: i32, count: usize) -> String {
    if offset_seconds == 0 {
        return "GMT".to_string();
    }
    if count >= 4 {
        format!("GMT{}", format_offset(offset_seconds, true, false, false))
    } else {
        let sign = if offset_seconds < 0 { '-' } else { '+' };
        let abs = offset_seconds.unsigned_abs();
        let hours = abs / 3600;
        let minutes = (abs % 3600) / 60;
        if minutes == 0 {
            format!("GMT{sign}{hours}")
        } else {
            format!("GMT{sign}{hours}:{minutes:02}")
        }
    }
}

/// `X`/`x` fields: 1 => `+HH`, 2 => `+HHMM`, 3 => `+HH:MM`; `X` (uppercase)
/// additionally uses `Z` for a zero offset.
pub fn render_iso(offset_seconds: i32, count: usize, zulu_sentinel: bool) -> String {
    if offset_seconds == 0 && zulu_sentinel {
        return "Z".to_string();
    }
    match count {
        1 => {
            let sign = if offset_seconds < 0 { '-' } else { '+' };
            format!("{sign}{:02}", offset_seconds.unsigned_abs() / 3600)
        }
        2 => format_offset(offset_seconds, false, false, false),
        _ => format_offset(offset_seconds, true, false, false),
    }
}
