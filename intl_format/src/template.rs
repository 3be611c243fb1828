//! `{0}`/`{1}`-style placeholder substitution shared by currency, unit
//! and list pattern templates.

pub fn substitute(template: &str, values: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, value) in values.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positional_placeholders() {
        assert_eq!(substitute("{0} of {1}", &["3", "5"]), "3 of 5");
    }
}
