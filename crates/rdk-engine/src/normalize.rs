//! Merchant-name normalization, kept separate from the rule chain so it can
//! be tested on its own.

/// Normalize a raw merchant string into a word-token sequence.
///
/// Lowercase, then every character that is neither alphanumeric nor
/// whitespace becomes a separator, then the result is split into words.
/// Punctuation must separate, not vanish: deleting it would fuse
/// "Apple.Store" into one token and break whole-word matching against the
/// override table.
///
/// `"Apple, Inc."` → `["apple", "inc"]`; `"Pineapple Co"` →
/// `["pineapple", "co"]` (no `"apple"` token).
pub fn normalize_merchant(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits() {
        assert_eq!(normalize_merchant("Apple Store"), vec!["apple", "store"]);
    }

    #[test]
    fn punctuation_separates_words() {
        assert_eq!(normalize_merchant("Apple, Inc."), vec!["apple", "inc"]);
        assert_eq!(normalize_merchant("Apple.Store"), vec!["apple", "store"]);
    }

    #[test]
    fn all_caps_normalizes() {
        assert_eq!(normalize_merchant("APPLE"), vec!["apple"]);
    }

    #[test]
    fn embedded_word_stays_whole() {
        // "pineapple" must remain a single token; no "apple" appears.
        let tokens = normalize_merchant("Pineapple Co");
        assert_eq!(tokens, vec!["pineapple", "co"]);
        assert!(!tokens.iter().any(|t| t == "apple"));
    }

    #[test]
    fn empty_and_punctuation_only_yield_no_tokens() {
        assert!(normalize_merchant("").is_empty());
        assert!(normalize_merchant("--- !!!").is_empty());
    }

    #[test]
    fn collapses_repeated_separators() {
        assert_eq!(
            normalize_merchant("  Target -- #1  "),
            vec!["target", "1"]
        );
    }
}
