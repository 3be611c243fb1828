//! CLDR revision detection, used to decide whether a locale blob needs
//! re-emitting (spec §6: "refuse to re-emit up-to-date blobs unless
//! `--force` is given").
//!
//! Mirrors `need_conversion()` in
//! `examples/original_source/scripts/import_cldr.py`: CLDR's root
//! `common/dtd/ldml.dtd` (and, before CLDR switched away from SVN
//! keyword expansion, each data file's own header comment) carries a
//! `<!-- version number="$Revision: 1234 $" -->` marker. CLDR 36
//! shipped without that marker at all; treat a missing marker as "no
//! version available" rather than an error, the same way the original
//! importer falls back to `None`.

const MARKER: &str = "version number=\"";
const REVISION_PREFIX: &str = "$Revision: ";

/// Scans the first `window` bytes of `content` for the revision marker
/// and returns the embedded integer, if any.
pub fn extract_version(content: &str, window: usize) -> Option<i64> {
    let head = &content[..content.len().min(window)];
    let start = head.find(MARKER)? + MARKER.len();
    let rest = &head[start..];
    let rest = rest.strip_prefix(REVISION_PREFIX).unwrap_or(rest);
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// `extract_version` over the first 4096 bytes of a file, matching the
/// original importer's fixed read window.
pub fn extract_version_from_file(content: &str) -> Option<i64> {
    extract_version(content, 4096)
}

/// Whether the existing blob at `previous_version` is stale relative to
/// `current_version`. A missing previous version is always stale; a
/// missing current version (CLDR 36-style) always forces re-emission
/// since staleness can't be determined.
pub fn is_stale(previous_version: Option<i64>, current_version: Option<i64>) -> bool {
    match (previous_version, current_version) {
        (Some(prev), Some(cur)) => cur > prev,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_svn_revision() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" ?>
<!-- version number="$Revision: 14477 $" -->
<ldml>
</ldml>"#;
        assert_eq!(extract_version_from_file(xml), Some(14477));
    }

    #[test]
    fn missing_marker_is_none() {
        let xml = "<ldml></ldml>";
        assert_eq!(extract_version_from_file(xml), None);
    }

    #[test]
    fn staleness() {
        assert!(is_stale(Some(1), Some(2)));
        assert!(!is_stale(Some(2), Some(2)));
        assert!(is_stale(None, Some(2)));
        assert!(is_stale(Some(2), None));
    }
}
