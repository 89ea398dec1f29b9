//! Turning raw search-box text into a lookup identifier.

/// What the search box currently asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedQuery {
    /// Whitespace only. Not an error, just nothing to look up.
    Empty,
    /// Not a number, not a whole number, or not strictly positive.
    Invalid,
    Id(u64),
}

/// Trim and parse a query.
///
/// Anything that reads as a number is accepted (`"5114"`, `"+21"`,
/// `"1e3"`), as long as it is finite, whole, positive, and fits in a `u64`.
pub fn parse_query(raw: &str) -> ParsedQuery {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedQuery::Empty;
    }

    // Fast path keeps full precision for very large integers.
    if let Ok(n) = trimmed.parse::<u64>() {
        return if n > 0 {
            ParsedQuery::Id(n)
        } else {
            ParsedQuery::Invalid
        };
    }

    // `u64::MAX as f64` is 2^64, so the bound is exclusive.
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 && v.fract() == 0.0 && v < u64::MAX as f64 => {
            ParsedQuery::Id(v as u64)
        }
        _ => ParsedQuery::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_empty() {
        for raw in ["", " ", "\t\n", "   \r\n  "] {
            assert_eq!(parse_query(raw), ParsedQuery::Empty, "{raw:?}");
        }
    }

    #[test]
    fn test_positive_integers() {
        assert_eq!(parse_query("5114"), ParsedQuery::Id(5114));
        assert_eq!(parse_query("  21 "), ParsedQuery::Id(21));
        assert_eq!(parse_query("+1"), ParsedQuery::Id(1));
        assert_eq!(parse_query("1e3"), ParsedQuery::Id(1000));
        assert_eq!(parse_query("007"), ParsedQuery::Id(7));
        assert_eq!(parse_query("18446744073709551615"), ParsedQuery::Id(u64::MAX));
    }

    #[test]
    fn test_invalid() {
        for raw in [
            "-3", "0", "-0", "0.0", "abc", "12abc", "1.5", "NaN", "inf", "Infinity", "1e400",
            "5 114", "18446744073709551616", "1.8446744073709552e19",
        ] {
            assert_eq!(parse_query(raw), ParsedQuery::Invalid, "{raw:?}");
        }
    }

    #[test]
    fn test_whole_float_accepted() {
        assert_eq!(parse_query("42.0"), ParsedQuery::Id(42));
    }
}
