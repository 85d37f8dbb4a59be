//! Text normalization used when comparing names coming from different feeds.
//!
//! Feeds disagree on accents and casing ("Banco Itaú" vs "BANCO ITAU"), so every
//! name comparison goes through [`fold`] first.

/// Replaces accented Latin letters with their unaccented base letter.
pub fn remove_diacritics(input: &str) -> String {
    input.chars().map(strip_accent).collect()
}

fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        other => other,
    }
}

/// Accent-free, lowercase, trimmed form of `input`.
pub fn fold(input: &str) -> String {
    remove_diacritics(input.trim()).to_lowercase()
}

/// Case- and diacritics-insensitive equality.
pub fn names_equal(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

/// Case- and diacritics-insensitive containment. An empty needle never matches.
pub fn name_contains(haystack: &str, needle: &str) -> bool {
    let needle = fold(needle);
    !needle.is_empty() && fold(haystack).contains(&needle)
}

pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Short name derived from a long name: everything before the first " - " clause.
pub fn derive_short_name(long_name: &str) -> String {
    match long_name.find(" - ") {
        Some(idx) => long_name[..idx].trim().to_string(),
        None => long_name.trim().to_string(),
    }
}

/// Removes stray quotes and surrounding whitespace from a feed name.
pub fn clean_name(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

/// `https://` plus the lowercased host/path. Blank and "NA" values mean no URL.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") {
        return String::new();
    }
    let lowered = trimmed.to_lowercase();
    let bare = lowered
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    format!("https://{}", bare)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold("  Banco Itaú S.A. "), "banco itau s.a.");
        assert_eq!(fold("CAIXA ECONÔMICA FEDERAL"), "caixa economica federal");
        assert_eq!(fold("Cooperativa de Crédito"), "cooperativa de credito");
    }

    #[test]
    fn test_names_equal_ignores_diacritics() {
        assert!(names_equal("Banco Itaú", "BANCO ITAU"));
        assert!(!names_equal("Banco Itaú", "Banco Inter"));
    }

    #[test]
    fn test_name_contains() {
        assert!(name_contains("Banco Bradesco S.A.", "bradesco"));
        assert!(!name_contains("Banco Bradesco S.A.", ""));
        assert!(!name_contains("Banco Bradesco S.A.", "Santander"));
    }

    #[test]
    fn test_derive_short_name() {
        assert_eq!(derive_short_name("BANCO XYZ S.A. - EM LIQUIDACAO"), "BANCO XYZ S.A.");
        assert_eq!(derive_short_name("BANCO XYZ S.A."), "BANCO XYZ S.A.");
        assert_eq!(derive_short_name("ABC-DEF LTDA"), "ABC-DEF LTDA");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("60.746.948/0001-12"), "60746948000112");
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("HTTPS://www.Itau.com.br"), "https://www.itau.com.br");
        assert_eq!(normalize_url("www.bb.com.br"), "https://www.bb.com.br");
        assert_eq!(normalize_url("NA"), "");
        assert_eq!(normalize_url("  "), "");
    }
}
