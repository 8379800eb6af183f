//! Name normalization shared by all three reference stores.
//!
//! Two spellings are the same individual when they agree after trimming,
//! collapsing internal whitespace to single spaces, unifying apostrophe
//! variants to `'` and upper-casing.

/// Canonical display value for an absent pedigree name.
pub const UNKNOWN: &str = "Unknown";

/// Values treated as "no name recorded", compared case-insensitively after
/// whitespace is collapsed.
const PLACEHOLDERS: [&str; 8] = [
    "-",
    "--",
    "unknown",
    "n/a",
    "na",
    "unk",
    "unraced",
    "not recorded",
];

const APOSTROPHE_VARIANTS: [char; 6] = ['\u{2019}', '\u{2018}', '\u{201B}', '`', '\u{00B4}', '\u{2032}'];

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lookup key for a pedigree name.
pub fn normalize_name(raw: &str) -> String {
    collapse_whitespace(raw)
        .chars()
        .map(|c| if APOSTROPHE_VARIANTS.contains(&c) { '\'' } else { c })
        .collect::<String>()
        .to_uppercase()
}

/// True when the raw value carries no usable name.
pub fn is_placeholder(raw: &str) -> bool {
    let folded = collapse_whitespace(raw).to_lowercase();
    folded.is_empty() || PLACEHOLDERS.contains(&folded.as_str())
}

/// Display form of a raw name: trimmed and whitespace-collapsed, or the
/// `Unknown` sentinel for absent/placeholder values.
pub fn canonical_name(raw: Option<&str>) -> String {
    match raw {
        Some(name) if !is_placeholder(name) => collapse_whitespace(name),
        _ => UNKNOWN.to_string(),
    }
}

/// True for the sentinel produced by [`canonical_name`].
pub fn is_unknown(name: &str) -> bool {
    name == UNKNOWN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_whitespace() {
        assert_eq!(normalize_name("  into   mischief "), "INTO MISCHIEF");
        assert_eq!(normalize_name("Into\tMischief"), "INTO MISCHIEF");
    }

    #[test]
    fn test_normalize_apostrophes() {
        let straight = normalize_name("Kitten's Joy");
        assert_eq!(normalize_name("Kitten\u{2019}s Joy"), straight);
        assert_eq!(normalize_name("kitten`s joy"), straight);
        assert_eq!(straight, "KITTEN'S JOY");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_name("Medaglia d\u{2019}Oro");
        assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn test_placeholders() {
        for value in ["", "   ", "-", "--", "Unknown", "N/A", "na", "UNK", "unraced", "Not  Recorded"] {
            assert!(is_placeholder(value), "{value:?} should be a placeholder");
        }
        assert!(!is_placeholder("Tapit"));
        assert!(!is_placeholder("Nana"));
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name(None), UNKNOWN);
        assert_eq!(canonical_name(Some("n/a")), UNKNOWN);
        assert_eq!(canonical_name(Some("  Gun   Runner ")), "Gun Runner");
    }
}
