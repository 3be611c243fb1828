//! Day-period rule evaluation (spec §4.5.2 "Day-period rules"): each rule
//! gives a half-open `from`/`before` interval or a single `at` point;
//! rules are tried in declaration order and the first match wins. `am`/
//! `pm` are handled as a fixed noon/midnight split, independent of the
//! locale's richer period catalog (`morning1`, `night1`, ...).

use crate::symbols::{DayPeriodBoundary, DayPeriodRule};

fn minutes(h: u32, m: u32) -> u32 {
    h * 60 + m
}

fn in_half_open(value: u32, from: u32, to: u32) -> bool {
    if from <= to {
        value >= from && value < to
    } else {
        // wraps past midnight
        value >= from || value < to
    }
}

/// Resolves the period id (e.g. `"morning1"`) for `hour:minute`, falling
/// back to plain `am`/`pm` when no rule matches or none are defined.
pub fn resolve_period(rules: &[DayPeriodRule], hour: u32, minute: u32) -> String {
    let now = minutes(hour, minute);

    for window in rules.windows(2) {
        if let [current, next] = window {
            let from = match current.boundary {
                DayPeriodBoundary::From(h, m) | DayPeriodBoundary::Before(h, m) => minutes(h, m),
                DayPeriodBoundary::At(h, m) => minutes(h, m),
            };
            let to = match next.boundary {
                DayPeriodBoundary::From(h, m) | DayPeriodBoundary::Before(h, m) => minutes(h, m),
                DayPeriodBoundary::At(h, m) => minutes(h, m),
            };
            if matches!(current.boundary, DayPeriodBoundary::At(_, _)) {
                if now == from {
                    return current.period_id.clone();
                }
                continue;
            }
            if in_half_open(now, from, to) {
                return current.period_id.clone();
            }
        }
    }
    if let Some(last) = rules.last() {
        if let DayPeriodBoundary::At(h, m) = last.boundary {
            if now == minutes(h, m) {
                return last.period_id.clone();
            }
        } else {
            return last.period_id.clone();
        }
    }

    if hour < 12 {
        "am".to_string()
    } else {
        "pm".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, from_h: u32) -> DayPeriodRule {
        DayPeriodRule {
            period_id: id.to_string(),
            boundary: DayPeriodBoundary::From(from_h, 0),
        }
    }

    #[test]
    fn falls_back_to_am_pm_with_no_rules() {
        assert_eq!(resolve_period(&[], 9, 0), "am");
        assert_eq!(resolve_period(&[], 15, 0), "pm");
    }

    #[test]
    fn selects_matching_window() {
        let rules = vec![rule("night1", 0), rule("morning1", 6), rule("afternoon1", 12), rule("evening1", 18)];
        assert_eq!(resolve_period(&rules, 8, 30), "morning1");
        assert_eq!(resolve_period(&rules, 23, 0), "evening1");
    }
}
