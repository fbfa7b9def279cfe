/// Compare two byte strings in time independent of where they differ.
///
/// Length is not hidden.
pub fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Check a submitted token against the configured one.
///
/// No configured token means every request passes.
pub fn token_matches(expected: Option<&str>, submitted: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => {
            timing_safe_eq(expected.as_bytes(), submitted.unwrap_or_default().as_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_safe_eq() {
        assert!(timing_safe_eq(b"secret", b"secret"));
        assert!(timing_safe_eq(b"", b""));
        assert!(!timing_safe_eq(b"secret", b"wrong!"));
        assert!(!timing_safe_eq(b"short", b"longer-value"));
    }

    #[test]
    fn test_no_token_configured() {
        assert!(token_matches(None, None));
        assert!(token_matches(None, Some("anything")));
    }

    #[test]
    fn test_missing_token_rejected() {
        assert!(!token_matches(Some("secret"), None));
        assert!(!token_matches(Some("secret"), Some("")));
    }

    #[test]
    fn test_token_compared_exactly() {
        assert!(token_matches(Some("secret"), Some("secret")));
        assert!(!token_matches(Some("secret"), Some("Secret")));
        assert!(!token_matches(Some("secret"), Some("secret ")));
    }
}
