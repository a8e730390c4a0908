//! Text folding for search.
//!
//! Staff names and publication authors are frequently entered with and
//! without diacritics ("Aklilu" / "Äklilu", "Müller" / "Muller"), so search
//! compares folded forms:
//! - Replace letters that don't decompose (ł, ø, æ, ...)
//! - Unicode NFD, then drop combining marks
//! - Lowercase and collapse whitespace

use unicode_normalization::UnicodeNormalization;

/// Fold text for accent- and case-insensitive comparison.
///
/// # Examples
///
/// ```
/// use spaceweather_portal::utils::fold;
///
/// assert_eq!(fold("José García"), "jose garcia");
/// assert_eq!(fold("  Solar   FLARES "), "solar flares");
/// ```
pub fn fold(text: &str) -> String {
    text.chars()
        .map(replace_special_char)
        .collect::<String>()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// True when `needle` occurs in any of the given fields after folding.
/// A blank needle matches everything.
pub fn matches_search<'a, I>(fields: I, needle: &str) -> bool
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let needle = fold(needle);
    if needle.is_empty() {
        return true;
    }

    fields
        .into_iter()
        .flatten()
        .any(|field| fold(field).contains(&needle))
}

fn replace_special_char(c: char) -> char {
    match c {
        'Ł' => 'L',
        'ł' => 'l',
        'Ø' => 'O',
        'ø' => 'o',
        'Æ' => 'A',
        'æ' => 'a',
        'ß' => 's',
        'Đ' => 'D',
        'đ' => 'd',
        'İ' => 'I',
        'ı' => 'i',
        _ => c,
    }
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold() {
        assert_eq!(fold("Müller"), "muller");
        assert_eq!(fold("Łukasz"), "lukasz");
        assert_eq!(fold("Alice\t\nBob"), "alice bob");
        assert_eq!(fold(""), "");
    }

    #[test]
    fn test_matches_search() {
        let fields = [Some("Impact of Solar Flares"), None, Some("Dr. A. Solomon")];
        assert!(matches_search(fields, "solar"));
        assert!(matches_search(fields, "SOLOMON"));
        assert!(matches_search(fields, "   "));
        assert!(!matches_search(fields, "lunar"));
    }

    #[test]
    fn test_matches_search_ignores_accents() {
        assert!(matches_search([Some("Schrödinger")], "schrodinger"));
        assert!(matches_search([Some("Schrodinger")], "Schrödinger"));
    }
}
