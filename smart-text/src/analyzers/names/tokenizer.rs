//! Tokenization seam used by name detection.

/// Splits a raw value into normalized tokens.
///
/// Implementations must be pure: the same input always yields the same
/// tokens, since they run independently on every partition.
pub trait Tokenizer: Send + Sync {
    /// Returns the normalized tokens of `raw`.
    fn tokenize(&self, raw: &str) -> Vec<String>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, raw: &str) -> Vec<String> {
        self(raw)
    }
}

/// Default tokenizer: lowercases and splits on anything that is not
/// alphanumeric.
///
/// ```rust
/// use smart_text::analyzers::names::{SimpleTokenizer, Tokenizer};
///
/// let tokens = SimpleTokenizer.tokenize("Smith, Mr. John-Paul");
/// assert_eq!(tokens, vec!["smith", "mr", "john", "paul"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, raw: &str) -> Vec<String> {
        raw.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokenizer_edge_cases() {
        assert!(SimpleTokenizer.tokenize("").is_empty());
        assert!(SimpleTokenizer.tokenize("  ,.; ").is_empty());
        assert_eq!(SimpleTokenizer.tokenize("ROSS"), vec!["ross"]);
        assert_eq!(
            SimpleTokenizer.tokenize("  Mary   Ann "),
            vec!["mary", "ann"]
        );
    }

    #[test]
    fn test_closure_tokenizer() {
        let whitespace = |raw: &str| -> Vec<String> {
            raw.split_whitespace().map(String::from).collect()
        };
        assert_eq!(whitespace.tokenize("A b"), vec!["A", "b"]);
    }
}
