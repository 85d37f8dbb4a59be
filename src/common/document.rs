//! CNPJ handling. A normalized document is exactly 14 ASCII digits.

use super::text::digits_only;

pub const DOCUMENT_LENGTH: usize = 14;
pub const ISPB_LENGTH: usize = 8;

/// Document assigned to the all-zero root (Banco do Brasil).
pub const ZERO_ROOT_DOCUMENT: &str = "00000000000191";

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Strips formatting; an 8-digit root is expanded to its head-office document and a
/// document that lost leading zeros is padded back to 14 digits.
pub fn normalize(raw: &str) -> String {
    let digits = digits_only(raw);
    match digits.len() {
        0 => String::new(),
        ISPB_LENGTH => from_root(&digits),
        n if n > ISPB_LENGTH && n < DOCUMENT_LENGTH => format!("{:0>14}", digits),
        _ => digits,
    }
}

pub fn is_valid(document: &str) -> bool {
    document.len() == DOCUMENT_LENGTH && document.chars().all(|c| c.is_ascii_digit())
}

/// Document derived from an ISPB: the ISPB as root, branch `0001`, then check digits.
pub fn from_ispb(ispb: u32) -> String {
    from_root(&format!("{:08}", ispb))
}

fn from_root(root: &str) -> String {
    if root.chars().all(|c| c == '0') {
        return ZERO_ROOT_DOCUMENT.to_string();
    }
    let base = format!("{}0001", root);
    let (first, second) = check_digits(&base);
    format!("{}{}{}", base, first, second)
}

/// Modulo-11 check digits for a 12-digit CNPJ base.
pub fn check_digits(base: &str) -> (u32, u32) {
    let digits: Vec<u32> = base.chars().filter_map(|c| c.to_digit(10)).collect();
    let first = mod11(digits.iter().zip(FIRST_WEIGHTS.iter()).map(|(d, w)| d * w).sum());
    let second = mod11(
        digits
            .iter()
            .chain(std::iter::once(&first))
            .zip(SECOND_WEIGHTS.iter())
            .map(|(d, w)| d * w)
            .sum(),
    );
    (first, second)
}

fn mod11(sum: u32) -> u32 {
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// Leading 8 digits of a document, parsed as an ISPB root.
pub fn root(document: &str) -> Option<u32> {
    let digits = digits_only(document);
    if digits.len() < ISPB_LENGTH {
        return None;
    }
    digits[..ISPB_LENGTH].parse().ok()
}

/// `NN.NNN.NNN/NNNN-NN`; invalid documents are returned unchanged.
pub fn format(document: &str) -> String {
    if !is_valid(document) {
        return document.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &document[0..2],
        &document[2..5],
        &document[5..8],
        &document[8..12],
        &document[12..14]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ispb_computes_check_digits() {
        assert_eq!(from_ispb(60746948), "60746948000112");
        assert_eq!(from_ispb(60701190), "60701190000104");
    }

    #[test]
    fn test_zero_root_maps_to_fixed_document() {
        assert_eq!(from_ispb(0), ZERO_ROOT_DOCUMENT);
        assert_eq!(normalize("00000000"), ZERO_ROOT_DOCUMENT);
    }

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(normalize("60.746.948/0001-12"), "60746948000112");
        assert_eq!(normalize("60746948"), "60746948000112");
        assert_eq!(normalize("0.360.305/0001-04"), "00360305000104");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("60746948000112"));
        assert!(!is_valid("6074694800011"));
        assert!(!is_valid(""));
    }

    #[test]
    fn test_root() {
        assert_eq!(root("60.746.948/0001-12"), Some(60746948));
        assert_eq!(root("00000000000191"), Some(0));
        assert_eq!(root("1234"), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format("60746948000112"), "60.746.948/0001-12");
        assert_eq!(format("123"), "123");
    }
}
