// Document text → token sequence.
//
// Steps run in a fixed order: lowercase, strip ASCII punctuation, strip ASCII
// digits, split on whitespace, singularize each word. Punctuation goes before
// digits, so a mixed token like "3-D" becomes "d" rather than surviving as two
// fragments. Every step is total; empty input yields no tokens.

use super::traits::Singularizer;

/// Remove every ASCII punctuation character (`!"#$%&'()*+,-./:;<=>?@[\]^_\`{|}~`).
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Remove every ASCII digit.
pub fn strip_digits(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Normalize one document's plain text into word tokens.
///
/// Duplicates are kept in document order; counting happens later. Words the
/// singularizer does not recognize as plurals pass through unchanged.
pub fn normalize(text: &str, singularizer: &dyn Singularizer) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = strip_digits(&strip_punctuation(&lowered));

    cleaned
        .split_whitespace()
        .map(|word| singularizer.singularize(word).unwrap_or_else(|| word.to_string()))
        .collect()
}

/// Normalize a single query word the same way document text is normalized.
///
/// Returns `None` if nothing alphabetic survives (e.g. "1999" or "--").
pub fn normalize_word(word: &str, singularizer: &dyn Singularizer) -> Option<String> {
    normalize(word, singularizer).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::inflect::EnglishSingularizer;
    use crate::text::traits::NoopSingularizer;

    #[test]
    fn normalizes_example_sentence() {
        let tokens = normalize("Cats run. Cats jump!", &EnglishSingularizer::default());
        assert_eq!(tokens, vec!["cat", "run", "cat", "jump"]);
    }

    #[test]
    fn strips_punctuation_before_digits() {
        assert_eq!(normalize("3-D", &NoopSingularizer), vec!["d"]);
        assert_eq!(normalize("R2-D2's", &NoopSingularizer), vec!["rds"]);
    }

    #[test]
    fn empty_and_symbol_only_input_yield_nothing() {
        assert!(normalize("", &NoopSingularizer).is_empty());
        assert!(normalize("  \n\t ", &NoopSingularizer).is_empty());
        assert!(normalize("1999 -- 42!", &NoopSingularizer).is_empty());
    }

    #[test]
    fn normalize_word_uses_same_rules() {
        let engine = EnglishSingularizer::default();
        assert_eq!(normalize_word("Dogs!", &engine).as_deref(), Some("dog"));
        assert_eq!(normalize_word("2024", &engine), None);
    }
}
