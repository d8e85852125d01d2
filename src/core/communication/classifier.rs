//! Classification of raw device responses.
//!
//! The device answers every request with either a result or an error token.
//! Error tokens are matched as exact, case-sensitive prefixes of the raw
//! bytes. Specific tokens are tried in table order before the generic
//! `ERROR` prefix, so a new device error only needs a new table row.

use std::fmt;

/// Outcome of one completed exchange with the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedResult {
    /// Device returned a computed value
    Success(String),
    DivisionByZero,
    /// Device could not parse the expression
    InvalidInput,
    /// Device-side line buffer overflowed
    BufferFull,
    /// `ERROR`-prefixed response with no specific meaning
    UnknownError(String),
}

/// Prefix shared by every device error token.
pub const GENERIC_ERROR_PREFIX: &str = "ERROR";

const SPECIFIC_ERRORS: &[(&str, ClassifiedResult)] = &[
    ("ERROR_DIV_0", ClassifiedResult::DivisionByZero),
    ("ERROR_INVALID_INPUT", ClassifiedResult::InvalidInput),
    ("ERROR_BUFFER_FULL", ClassifiedResult::BufferFull),
];

/// Map a raw response to its classified result. First match wins.
pub fn classify(raw: &[u8]) -> ClassifiedResult {
    if let Some((_, result)) = SPECIFIC_ERRORS
        .iter()
        .find(|(prefix, _)| raw.starts_with(prefix.as_bytes()))
    {
        return result.clone();
    }

    let text = String::from_utf8_lossy(raw).into_owned();
    if raw.starts_with(GENERIC_ERROR_PREFIX.as_bytes()) {
        ClassifiedResult::UnknownError(text)
    } else {
        ClassifiedResult::Success(text)
    }
}

impl ClassifiedResult {
    pub fn is_error(&self) -> bool {
        !matches!(self, ClassifiedResult::Success(_))
    }
}

impl fmt::Display for ClassifiedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifiedResult::Success(payload) => write!(f, "Success({})", payload),
            ClassifiedResult::DivisionByZero => write!(f, "DivisionByZero"),
            ClassifiedResult::InvalidInput => write!(f, "InvalidInput"),
            ClassifiedResult::BufferFull => write!(f, "BufferFull"),
            ClassifiedResult::UnknownError(payload) => write!(f, "UnknownError({})", payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero() {
        assert_eq!(classify(b"ERROR_DIV_0"), ClassifiedResult::DivisionByZero);
        assert_eq!(classify(b"ERROR_DIV_0 foo"), ClassifiedResult::DivisionByZero);
    }

    #[test]
    fn test_specific_errors() {
        assert_eq!(classify(b"ERROR_INVALID_INPUT\r\n"), ClassifiedResult::InvalidInput);
        assert_eq!(classify(b"ERROR_BUFFER_FULL"), ClassifiedResult::BufferFull);
    }

    #[test]
    fn test_unknown_error_keeps_payload() {
        assert_eq!(
            classify(b"ERROR_WEIRD_THING"),
            ClassifiedResult::UnknownError("ERROR_WEIRD_THING".to_string())
        );
        assert_eq!(
            classify(b"ERROR"),
            ClassifiedResult::UnknownError("ERROR".to_string())
        );
    }

    #[test]
    fn test_success_is_verbatim() {
        assert_eq!(
            classify(b"4 + 5 = 9"),
            ClassifiedResult::Success("4 + 5 = 9".to_string())
        );
        assert_eq!(classify(b"17\r\n"), ClassifiedResult::Success("17\r\n".to_string()));
    }

    #[test]
    fn test_matching_is_case_sensitive_prefix_only() {
        assert!(matches!(classify(b"error_div_0"), ClassifiedResult::Success(_)));
        assert!(matches!(classify(b"ERRO"), ClassifiedResult::Success(_)));
        assert!(matches!(classify(b" ERROR_DIV_0"), ClassifiedResult::Success(_)));
        assert!(matches!(classify(b"ERROR_DIV"), ClassifiedResult::UnknownError(_)));
    }

    #[test]
    fn test_is_error() {
        assert!(!ClassifiedResult::Success("1".to_string()).is_error());
        assert!(ClassifiedResult::BufferFull.is_error());
    }
}
