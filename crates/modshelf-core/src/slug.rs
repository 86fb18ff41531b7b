//! Slug derivation and collision resolution
//!
//! A slug is the unique URL-safe identifier of a mod, derived from its title.
//! Derivation is pure; collision resolution probes an existing-slug set
//! fetched by the caller, so the functions here stay synchronous and
//! deterministic.

use std::collections::HashSet;

/// Derive a base slug from a title.
///
/// Lowercases, folds common diacritics to ASCII, replaces any run of
/// non-alphanumeric characters with a single hyphen, and trims leading and
/// trailing hyphens. An empty result (e.g. an all-punctuation title) falls
/// back to `mod-<base36 unix timestamp>` so the candidate is never empty.
pub fn derive_base_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_was_hyphen = true; // starts true to skip leading hyphens

    for c in title.chars().flat_map(fold_diacritic) {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            slug.push('-');
            prev_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        return format!("mod-{}", to_base36(chrono::Utc::now().timestamp()));
    }

    slug
}

/// Resolve a unique slug given the set of existing slugs matching `base`.
///
/// `existing` must contain every stored slug equal to `base` or of the form
/// `base-<integer>`. Returns `base` itself when free, otherwise `base-N` for
/// the smallest integer `N >= 2` not taken. Tolerates gaps: with
/// `{x, x-2, x-4}` present, `x-3` is the answer. Output depends only on the
/// contents of `existing`, never on its iteration order.
pub fn resolve_unique_slug(base: &str, existing: &HashSet<String>) -> String {
    if !existing.contains(base) {
        return base.to_string();
    }

    let mut n: u64 = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !existing.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Check that a caller-supplied slug is well-formed.
///
/// Valid slugs are what `derive_base_slug` can produce: non-empty, lowercase
/// ASCII alphanumerics separated by single hyphens, with no leading or
/// trailing hyphen.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.starts_with('-') || slug.ends_with('-') {
        return false;
    }
    let mut prev_was_hyphen = false;
    for c in slug.chars() {
        if c == '-' {
            if prev_was_hyphen {
                return false;
            }
            prev_was_hyphen = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            prev_was_hyphen = false;
        } else {
            return false;
        }
    }
    true
}

/// Fold a character with a common Latin diacritic to its ASCII base.
///
/// Covers the Latin-1 supplement and a handful of Latin Extended-A letters
/// that show up in creator titles. Anything else passes through unchanged
/// and is dropped later by the alphanumeric filter.
fn fold_diacritic(c: char) -> std::vec::IntoIter<char> {
    let folded: &str = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => "O",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' | 'Ÿ' => "Y",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => "N",
        'ç' | 'ć' | 'ĉ' | 'č' => "c",
        'Ç' | 'Ć' | 'Ĉ' | 'Č' => "C",
        'š' | 'ś' => "s",
        'Š' | 'Ś' => "S",
        'ž' | 'ź' | 'ż' => "z",
        'Ž' | 'Ź' | 'Ż' => "Z",
        'ł' => "l",
        'Ł' => "L",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'þ' => "th",
        'Þ' => "TH",
        _ => return vec![c].into_iter(),
    };
    folded.chars().collect::<Vec<_>>().into_iter()
}

/// Encode a non-negative integer in base36 (0-9, a-z)
fn to_base36(mut value: i64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value <= 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    // DIGITS is pure ASCII
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(slugs: &[&str]) -> HashSet<String> {
        slugs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_derive_basic() {
        assert_eq!(derive_base_slug("Cool Hat"), "cool-hat");
        assert_eq!(derive_base_slug("  Cool   Hat!!  "), "cool-hat");
        assert_eq!(derive_base_slug("UPPER_case.title"), "upper-case-title");
    }

    #[test]
    fn test_derive_collapses_runs() {
        assert_eq!(derive_base_slug("a---b___c"), "a-b-c");
        assert_eq!(derive_base_slug("a !@# b"), "a-b");
    }

    #[test]
    fn test_derive_folds_diacritics() {
        assert_eq!(derive_base_slug("Crème Brûlée"), "creme-brulee");
        assert_eq!(derive_base_slug("Señor Müller"), "senor-muller");
        assert_eq!(derive_base_slug("Łódź"), "lodz");
    }

    #[test]
    fn test_derive_output_shape() {
        // only lowercase alphanumerics and single hyphens, no edge hyphens
        for title in ["Hello, World!", "--x--", "Ünïcödé", "123 456", "a&b"] {
            let slug = derive_base_slug(title);
            assert!(is_valid_slug(&slug), "bad slug {:?} from {:?}", slug, title);
        }
    }

    #[test]
    fn test_derive_empty_falls_back() {
        let slug = derive_base_slug("!!!");
        assert!(slug.starts_with("mod-"));
        assert!(is_valid_slug(&slug));
    }

    #[test]
    fn test_resolve_free_base() {
        assert_eq!(resolve_unique_slug("hat-x", &set(&[])), "hat-x");
        assert_eq!(resolve_unique_slug("hat-x", &set(&["other"])), "hat-x");
    }

    #[test]
    fn test_resolve_starts_at_two() {
        assert_eq!(resolve_unique_slug("hat-x", &set(&["hat-x"])), "hat-x-2");
    }

    #[test]
    fn test_resolve_fills_gaps() {
        let existing = set(&["hat-x", "hat-x-2", "hat-x-4"]);
        assert_eq!(resolve_unique_slug("hat-x", &existing), "hat-x-3");
    }

    #[test]
    fn test_resolve_is_stable_and_not_in_set() {
        let existing = set(&["mod", "mod-2", "mod-3", "mod-5", "mod-9"]);
        let first = resolve_unique_slug("mod", &existing);
        let second = resolve_unique_slug("mod", &existing);
        assert_eq!(first, second);
        assert!(!existing.contains(&first));
        assert_eq!(first, "mod-4");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("cool-hat"));
        assert!(is_valid_slug("x2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-x"));
        assert!(!is_valid_slug("x-"));
        assert!(!is_valid_slug("a--b"));
        assert!(!is_valid_slug("Cool-Hat"));
        assert!(!is_valid_slug("a_b"));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000), "s44we8");
    }
}
