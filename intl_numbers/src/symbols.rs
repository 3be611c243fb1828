//! Locale number symbols and numbering-system digit tables.
//!
//! Pulled out of the compiled locale tree (`intl_localedata::Data`) rather
//! than hardcoded, but every field has a root-locale default so callers
//! working from partial data still get sane output.

use intl_localedata::Data;

use crate::error::NumberFormatError;

const LATN_DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

#[derive(Debug, Clone)]
pub struct NumberSymbols {
    pub decimal: String,
    pub group: String,
    pub plus_sign: String,
    pub minus_sign: String,
    pub exponential: String,
    pub percent_sign: String,
    pub permille_sign: String,
    pub nan: String,
    pub infinity: String,
    pub numbering_system: String,
    digits: Vec<char>,
}

impl Default for NumberSymbols {
    fn default() -> Self {
        NumberSymbols {
            decimal: ".".to_string(),
            group: ",".to_string(),
            plus_sign: "+".to_string(),
            minus_sign: "-".to_string(),
            exponential: "E".to_string(),
            percent_sign: "%".to_string(),
            permille_sign: "\u{2030}".to_string(),
            nan: "NaN".to_string(),
            infinity: "\u{221E}".to_string(),
            numbering_system: "latn".to_string(),
            digits: LATN_DIGITS.to_vec(),
        }
    }
}

impl NumberSymbols {
    /// Digit in the active numbering system for a single decimal digit value `0..=9`.
    pub fn digit(&self, value: u32) -> char {
        self.digits.get(value as usize).copied().unwrap_or('?')
    }

    pub fn with_numbering_system(
        mut self,
        name: &str,
        digits: &str,
    ) -> Result<Self, NumberFormatError> {
        let chars: Vec<char> = digits.chars().collect();
        if chars.len() != 10 {
            return Err(NumberFormatError::UnsupportedNumberingSystem(name.to_string()));
        }
        self.numbering_system = name.to_string();
        self.digits = chars;
        Ok(self)
    }

    /// Reads the flat `symbols` map out of a locale's compiled data node,
    /// falling back to root defaults for any key that is absent.
    pub fn from_data(data: &Data) -> NumberSymbols {
        let mut symbols = NumberSymbols::default();
        let Some(map) = data.as_map() else {
            return symbols;
        };
        if let Some(v) = map.get("decimal").and_then(Data::as_str) {
            symbols.decimal = v.to_string();
        }
        if let Some(v) = map.get("group").and_then(Data::as_str) {
            symbols.group = v.to_string();
        }
        if let Some(v) = map.get("plus_sign").and_then(Data::as_str) {
            symbols.plus_sign = v.to_string();
        }
        if let Some(v) = map.get("minus_sign").and_then(Data::as_str) {
            symbols.minus_sign = v.to_string();
        }
        if let Some(v) = map.get("exponential").and_then(Data::as_str) {
            symbols.exponential = v.to_string();
        }
        if let Some(v) = map.get("percent_sign").and_then(Data::as_str) {
            symbols.percent_sign = v.to_string();
        }
        if let Some(v) = map.get("permille_sign").and_then(Data::as_str) {
            symbols.permille_sign = v.to_string();
        }
        if let Some(v) = map.get("nan").and_then(Data::as_str) {
            symbols.nan = v.to_string();
        }
        if let Some(v) = map.get("infinity").and_then(Data::as_str) {
            symbols.infinity = v.to_string();
        }
        if let Some(name) = map.get("numbering_system").and_then(Data::as_str) {
            symbols.numbering_system = name.to_string();
        }
        if let Some(digits) = map.get("digits").and_then(Data::as_str) {
            if let Ok(s) = symbols.clone().with_numbering_system(&symbols.numbering_system.clone(), digits) {
                symbols = s;
            }
        }
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_latn_ascii() {
        let symbols = NumberSymbols::default();
        assert_eq!(symbols.digit(0), '0');
        assert_eq!(symbols.digit(9), '9');
        assert_eq!(symbols.decimal, ".");
    }

    #[test]
    fn rejects_malformed_digit_table() {
        let symbols = NumberSymbols::default();
        assert!(symbols.with_numbering_system("bogus", "01234").is_err());
    }
}
