// Singularizer trait — the swap-ready abstraction for plural handling.
//
// Like the markup extractor, this lets the normalizer run against a stub in
// tests or a different inflection engine later without touching the rest of
// the pipeline. The default implementation is the rule-based English engine
// in `inflect`.

/// Trait for mapping a plural noun form to its singular.
pub trait Singularizer {
    /// Return the singular form if `word` is a recognized plural.
    ///
    /// `None` means "not a recognized plural" and the caller keeps the word
    /// as-is. Implementations must never panic on arbitrary input.
    fn singularize(&self, word: &str) -> Option<String>;
}

/// Singularizer that recognizes nothing — every word passes through unchanged.
pub struct NoopSingularizer;

impl Singularizer for NoopSingularizer {
    fn singularize(&self, _word: &str) -> Option<String> {
        None
    }
}
