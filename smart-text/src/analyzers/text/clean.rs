//! Normalization applied to values and map keys before counting.

/// Lowercases, replaces punctuation with spaces and collapses whitespace.
///
/// ```rust
/// use smart_text::analyzers::text::clean_text;
///
/// assert_eq!(clean_text("  Hello,   World! "), "hello world");
/// assert_eq!(clean_text("O'Neil"), "o neil");
/// ```
pub fn clean_text(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if c.is_alphanumeric() {
            if pending_space && !cleaned.is_empty() {
                cleaned.push(' ');
            }
            pending_space = false;
            cleaned.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_variants() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("!!!"), "");
        assert_eq!(clean_text("ABC"), "abc");
        assert_eq!(clean_text("a--b"), "a b");
        assert_eq!(clean_text("\tTabbed\nvalue "), "tabbed value");
        assert_eq!(clean_text("Ünïcödé"), "ünïcödé");
    }
}
