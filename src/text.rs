//! Code-point indexed string helpers.
//!
//! Tibetan script is multi-byte in UTF-8, so every cut the segmenter makes
//! is measured in characters and converted to a byte offset here.

/// Number of characters (code points) in a string
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `n`-th character, or the string length if `n` runs past the end
pub fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// The string with its first `n` characters removed
pub fn drop_chars(s: &str, n: usize) -> &str {
    &s[byte_offset(s, n)..]
}

/// The string with its last `n` characters removed
pub fn drop_last_chars(s: &str, n: usize) -> &str {
    let len = char_len(s);
    &s[..byte_offset(s, len.saturating_sub(n))]
}

/// Check whether `s` ends with any of the given suffixes
pub fn ends_with_any(s: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| s.ends_with(suffix))
}
