use std::str::FromStr;

/// One of the six CLDR plural categories. Variant names are kept in the
/// same upper-case style the generated lookup tables in this crate's
/// lineage have always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum PluralCategory {
    ZERO,
    ONE,
    TWO,
    FEW,
    MANY,
    OTHER,
}

impl FromStr for PluralCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(PluralCategory::ZERO),
            "one" => Ok(PluralCategory::ONE),
            "two" => Ok(PluralCategory::TWO),
            "few" => Ok(PluralCategory::FEW),
            "many" => Ok(PluralCategory::MANY),
            "other" => Ok(PluralCategory::OTHER),
            _ => Err(()),
        }
    }
}

impl PluralCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::ZERO => "zero",
            PluralCategory::ONE => "one",
            PluralCategory::TWO => "two",
            PluralCategory::FEW => "few",
            PluralCategory::MANY => "many",
            PluralCategory::OTHER => "other",
        }
    }
}

/// CLDR ships separate cardinal and ordinal rule sets per locale
/// (`plural_form` / `ordinal_form` in the compiled data, see spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRuleType {
    Cardinal,
    Ordinal,
}
