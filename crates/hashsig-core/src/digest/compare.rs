//! Digest string comparison.

/// True when `a` and `b` name the same digest.
///
/// Surrounding whitespace is ignored and hex case does not matter, so the
/// relation is symmetric and reflexive.
pub fn equal(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
