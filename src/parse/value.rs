// src/parse/value.rs

/// Convert one raw census cell to a number.
///
/// Steps, in order: trim, drop thousands separators, drop the trailing `+`
/// of a top-coded value ("1,000,000+"), parse. Anything still unparseable
/// (suppression sentinels like "(X)", "***", "N", "-", or an empty cell)
/// becomes 0, which means suppressed cells and genuine zeros are
/// indistinguishable downstream.
pub fn coerce(raw: &str) -> f64 {
    let cleaned = raw.trim().replace(',', "");
    let cleaned = cleaned.strip_suffix('+').unwrap_or(&cleaned);
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(coerce("250"), 250.0);
        assert_eq!(coerce("250.5"), 250.5);
        assert_eq!(coerce("-600"), -600.0);
        assert_eq!(coerce(" 42 "), 42.0);
    }

    #[test]
    fn thousands_separators_drop() {
        assert_eq!(coerce("12,345"), 12345.0);
        assert_eq!(coerce("1,234,567.8"), 1234567.8);
    }

    #[test]
    fn top_coded_values_keep_magnitude() {
        assert_eq!(coerce("1,000,000+"), 1_000_000.0);
        assert_eq!(coerce("3,500+"), 3500.0);
    }

    #[test]
    fn sentinels_become_zero() {
        assert_eq!(coerce("(X)"), 0.0);
        assert_eq!(coerce("***"), 0.0);
        assert_eq!(coerce("N"), 0.0);
        assert_eq!(coerce("-"), 0.0);
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce("null"), 0.0);
    }

    #[test]
    fn non_finite_spellings_become_zero() {
        assert_eq!(coerce("NaN"), 0.0);
        assert_eq!(coerce("inf"), 0.0);
    }
}
