//! Skeleton best-match (spec §4.5.3): a skeleton is a canonicalized
//! sequence of field characters with no literals. Formatting by skeleton
//! looks it up directly; if absent, picks the locale's closest stored
//! skeleton by summed per-field count difference plus a penalty for
//! fields present in one skeleton but not the other.

use std::collections::HashMap;

use crate::field::{tokenize, FieldChar, PatternToken};

const MISSING_FIELD_PENALTY: i64 = 20;

/// `(field, count)` pairs extracted from a skeleton string, in the order
/// its field characters appear (a skeleton has no literal runs).
fn skeleton_fields(skeleton: &str) -> Vec<(FieldChar, usize)> {
    tokenize(skeleton)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|t| match t {
            PatternToken::Field { ch, count } => Some((ch, count)),
            PatternToken::Literal(_) => None,
        })
        .collect()
}

fn distance(a: &[(FieldChar, usize)], b: &[(FieldChar, usize)]) -> i64 {
    let a_map: HashMap<char, usize> = a.iter().map(|(c, n)| (c.canonical_char(), *n)).collect();
    let b_map: HashMap<char, usize> = b.iter().map(|(c, n)| (c.canonical_char(), *n)).collect();

    let mut total = 0i64;
    let mut seen = std::collections::HashSet::new();
    for (ch, count) in &a_map {
        seen.insert(*ch);
        match b_map.get(ch) {
            Some(other_count) => total += (*count as i64 - *other_count as i64).abs(),
            None => total += MISSING_FIELD_PENALTY,
        }
    }
    for ch in b_map.keys() {
        if !seen.contains(ch) {
            total += MISSING_FIELD_PENALTY;
        }
    }
    total
}

/// Picks the best-matching stored skeleton (by key) for `requested` out of
/// `available` (skeleton string -> pattern string), preferring an exact
/// key match.
pub fn best_match<'a>(requested: &str, available: &'a HashMap<String, String>) -> Option<(&'a str, &'a str)> {
    if let Some(pattern) = available.get(requested) {
        return Some((requested, pattern.as_str()));
    }

    let requested_fields = skeleton_fields(requested);
    available
        .iter()
        .map(|(key, pattern)| {
            let key_fields = skeleton_fields(key);
            (distance(&requested_fields, &key_fields), key.as_str(), pattern.as_str())
        })
        .min_by_key(|(d, _, _)| *d)
        .map(|(_, key, pattern)| (key, pattern))
}

/// Substitutes the arities of `requested`'s fields into `matched_pattern`'s
/// tokens, keeping the matched pattern's literals and field ordering.
pub fn substitute_arities(matched_pattern: &str, requested: &str) -> String {
    let Ok(matched_tokens) = tokenize(matched_pattern) else {
        return matched_pattern.to_string();
    };
    let requested_counts: HashMap<char, usize> = skeleton_fields(requested)
        .into_iter()
        .map(|(ch, n)| (ch.canonical_char(), n))
        .collect();

    let mut out = String::new();
    for token in matched_tokens {
        match token {
            PatternToken::Literal(s) => out.push_str(&s),
            PatternToken::Field { ch, count } => {
                let new_count = requested_counts.get(&ch.canonical_char()).copied().unwrap_or(count);
                out.push_str(&ch.canonical_char().to_string().repeat(new_count));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_skeleton_match_wins() {
        let mut available = HashMap::new();
        available.insert("yMMMd".to_string(), "d MMM y".to_string());
        let (key, pattern) = best_match("yMMMd", &available).unwrap();
        assert_eq!(key, "yMMMd");
        assert_eq!(pattern, "d MMM y");
    }

    #[test]
    fn picks_closest_when_exact_missing() {
        let mut available = HashMap::new();
        available.insert("yMd".to_string(), "d/M/y".to_string());
        available.insert("yMMMMd".to_string(), "d MMMM y".to_string());
        let (key, _) = best_match("yMMMd", &available).unwrap();
        assert_eq!(key, "yMMMMd");
    }

    #[test]
    fn substitutes_requested_field_counts() {
        let out = substitute_arities("d MMM y", "yyyyMMMMdd");
        assert_eq!(out, "dd MMMM yyyy");
    }
}
