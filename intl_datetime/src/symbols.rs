//! Named-form lookup tables (months, weekdays, quarters, eras, day
//! periods) pulled out of a resolved locale's compiled data tree. Every
//! lookup is `Option`-returning: a missing named form falls back to the
//! numeric rendering at the call site (spec §4.5.2 "Fallback").

use indexmap::IndexMap;
use intl_localedata::{Data, LocaleData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Wide,
    Abbreviated,
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormContext {
    Format,
    StandAlone,
}

#[derive(Debug, Clone, Default)]
pub struct NamedSet {
    pub wide: Option<Vec<String>>,
    pub abbreviated: Option<Vec<String>>,
    pub narrow: Option<Vec<String>>,
}

impl NamedSet {
    pub fn get(&self, width: Width) -> Option<&[String]> {
        match width {
            Width::Wide => self.wide.as_deref(),
            Width::Abbreviated => self.abbreviated.as_deref(),
            Width::Narrow => self.narrow.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormField {
    pub format: NamedSet,
    pub stand_alone: NamedSet,
}

impl FormField {
    pub fn get(&self, context: FormContext, width: Width) -> Option<&[String]> {
        let set = match context {
            FormContext::Format => &self.format,
            FormContext::StandAlone => &self.stand_alone,
        };
        set.get(width).or_else(|| self.format.get(width))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayPeriodBoundary {
    From(u32, u32),
    Before(u32, u32),
    At(u32, u32),
}

#[derive(Debug, Clone)]
pub struct DayPeriodRule {
    pub period_id: String,
    pub boundary: DayPeriodBoundary,
}

#[derive(Debug, Clone, Default)]
pub struct PeriodNames {
    pub wide: Option<String>,
    pub abbreviated: Option<String>,
    pub narrow: Option<String>,
}

impl PeriodNames {
    pub fn get(&self, width: Width) -> Option<&str> {
        match width {
            Width::Wide => self.wide.as_deref(),
            Width::Abbreviated => self.abbreviated.as_deref(),
            Width::Narrow => self.narrow.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DateTimeSymbols {
    pub months: FormField,
    pub weekdays: FormField,
    pub quarters: FormField,
    pub eras: NamedSet,
    /// Keyed by period id (`"am"`, `"pm"`, `"morning1"`, ...).
    pub periods: IndexMap<String, PeriodNames>,
    pub day_period_rules: Vec<DayPeriodRule>,
}

fn named_seq(locale_data: &LocaleData, path: &[&str]) -> Option<Vec<String>> {
    let data = locale_data.get(path).ok()?;
    let seq = data.as_seq()?;
    Some(seq.iter().filter_map(Data::as_str).map(str::to_string).collect())
}

fn named_set(locale_data: &LocaleData, base: &[&str]) -> NamedSet {
    let mut path = base.to_vec();
    path.push("wide");
    let wide = named_seq(locale_data, &path);
    path.pop();
    path.push("abbreviated");
    let abbreviated = named_seq(locale_data, &path);
    path.pop();
    path.push("narrow");
    let narrow = named_seq(locale_data, &path);
    NamedSet { wide, abbreviated, narrow }
}

fn form_field(locale_data: &LocaleData, base: &[&str]) -> FormField {
    let mut format_path = base.to_vec();
    format_path.push("format");
    let format = named_set(locale_data, &format_path);

    let mut stand_alone_path = base.to_vec();
    stand_alone_path.push("stand_alone");
    let stand_alone = named_set(locale_data, &stand_alone_path);

    FormField { format, stand_alone }
}

fn periods_for_width(locale_data: &LocaleData, width: &str) -> IndexMap<String, String> {
    let Ok(data) = locale_data.get(&["periods", "format", width]) else {
        return IndexMap::new();
    };
    let Some(map) = data.as_map() else {
        return IndexMap::new();
    };
    map.iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}

fn parse_boundary(map: &IndexMap<String, Data>) -> Option<DayPeriodBoundary> {
    fn split_hm(s: &str) -> Option<(u32, u32)> {
        let (h, m) = s.split_once(':')?;
        Some((h.parse().ok()?, m.parse().ok()?))
    }
    if let Some(v) = map.get("from").and_then(Data::as_str) {
        return split_hm(v).map(|(h, m)| DayPeriodBoundary::From(h, m));
    }
    if let Some(v) = map.get("before").and_then(Data::as_str) {
        return split_hm(v).map(|(h, m)| DayPeriodBoundary::Before(h, m));
    }
    if let Some(v) = map.get("at").and_then(Data::as_str) {
        return split_hm(v).map(|(h, m)| DayPeriodBoundary::At(h, m));
    }
    None
}

fn day_period_rules(locale_data: &LocaleData) -> Vec<DayPeriodRule> {
    let Ok(data) = locale_data.get(&["day_period_rules"]) else {
        return Vec::new();
    };
    let Some(seq) = data.as_seq() else {
        return Vec::new();
    };
    seq.iter()
        .filter_map(|entry| {
            let map = entry.as_map()?;
            let period_id = map.get("period").and_then(Data::as_str)?.to_string();
            let boundary = parse_boundary(map)?;
            Some(DayPeriodRule { period_id, boundary })
        })
        .collect()
}

impl DateTimeSymbols {
    pub fn from_locale_data(locale_data: &LocaleData) -> DateTimeSymbols {
        let mut periods: IndexMap<String, PeriodNames> = IndexMap::new();
        for width in ["wide", "abbreviated", "narrow"] {
            for (id, name) in periods_for_width(locale_data, width) {
                let entry = periods.entry(id).or_insert_with(PeriodNames::default);
                match width {
                    "wide" => entry.wide = Some(name),
                    "abbreviated" => entry.abbreviated = Some(name),
                    _ => entry.narrow = Some(name),
                }
            }
        }

        DateTimeSymbols {
            months: form_field(locale_data, &["months"]),
            weekdays: form_field(locale_data, &["weekdays"]),
            quarters: form_field(locale_data, &["quarters"]),
            eras: named_set(locale_data, &["eras"]),
            periods,
            day_period_rules: day_period_rules(locale_data),
        }
    }
}
