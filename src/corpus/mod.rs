// Corpus — the ordered collection of documents for one run.
//
// A corpus starts out raw (one plain-text block per document) and moves to
// tokenized in a single step. Aggregation only accepts a `TokenizedCorpus`,
// so counting raw text is ruled out by the types; the `Corpus` enum carries
// the same distinction for callers that hold either state and reports a
// usage error instead.

pub mod markup;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::errors::{PipelineError, Result};
use crate::frequency::tables::FrequencyTables;
use crate::text::normalize::normalize;
use crate::text::traits::Singularizer;

use self::markup::MarkupExtractor;

/// Documents as extracted from markup, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCorpus {
    documents: Vec<String>,
}

/// Documents as token sequences, ready for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedCorpus {
    documents: Vec<Vec<String>>,
}

/// A corpus in either state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
    Raw(RawCorpus),
    Tokenized(TokenizedCorpus),
}

impl RawCorpus {
    pub fn new(documents: Vec<String>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Normalize every document, consuming the raw text.
    pub fn normalize(self, singularizer: &dyn Singularizer) -> TokenizedCorpus {
        self.normalize_with(singularizer, || {})
    }

    /// Normalize every document, calling `on_document` after each one.
    pub fn normalize_with(
        self,
        singularizer: &dyn Singularizer,
        mut on_document: impl FnMut(),
    ) -> TokenizedCorpus {
        let documents = self
            .documents
            .iter()
            .map(|text| {
                let tokens = normalize(text, singularizer);
                on_document();
                tokens
            })
            .collect();
        TokenizedCorpus { documents }
    }
}

impl TokenizedCorpus {
    /// Wrap token sequences that are already normalized.
    pub fn from_tokens(documents: Vec<Vec<String>>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[Vec<String>] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total number of tokens across all documents (duplicates included).
    pub fn token_count(&self) -> usize {
        self.documents.iter().map(Vec::len).sum()
    }

    /// Drop every token found in `stop_words`. Document count and order are kept.
    pub fn without_stop_words(self, stop_words: &HashSet<String>) -> Self {
        let documents = self
            .documents
            .into_iter()
            .map(|doc| doc.into_iter().filter(|t| !stop_words.contains(t)).collect())
            .collect();
        Self { documents }
    }

    /// Build both frequency tables for this corpus.
    pub fn frequency_tables(&self) -> FrequencyTables {
        FrequencyTables::build(self)
    }
}

impl Corpus {
    pub fn is_tokenized(&self) -> bool {
        matches!(self, Corpus::Tokenized(_))
    }

    /// Move a raw corpus to the tokenized state. Already tokenized corpora are
    /// returned as-is.
    pub fn normalize(self, singularizer: &dyn Singularizer) -> Corpus {
        match self {
            Corpus::Raw(raw) => Corpus::Tokenized(raw.normalize(singularizer)),
            tokenized @ Corpus::Tokenized(_) => tokenized,
        }
    }

    /// Borrow the tokenized documents, or fail if normalization has not run.
    pub fn tokenized(&self) -> Result<&TokenizedCorpus> {
        match self {
            Corpus::Tokenized(tokens) => Ok(tokens),
            Corpus::Raw(_) => Err(PipelineError::Usage(
                "articles have not been processed; normalize the corpus before building frequency tables"
                    .to_string(),
            )),
        }
    }

    /// Build both frequency tables. Fails with a usage error on a raw corpus.
    pub fn frequency_tables(&self) -> Result<FrequencyTables> {
        Ok(self.tokenized()?.frequency_tables())
    }
}

impl From<RawCorpus> for Corpus {
    fn from(raw: RawCorpus) -> Self {
        Corpus::Raw(raw)
    }
}

impl From<TokenizedCorpus> for Corpus {
    fn from(tokens: TokenizedCorpus) -> Self {
        Corpus::Tokenized(tokens)
    }
}

/// Read a markup file and extract its documents.
///
/// Fails with an input error if the file cannot be read or contains no
/// documents. Invalid UTF-8 is replaced rather than rejected.
pub fn load_corpus(path: &Path, extractor: &dyn MarkupExtractor) -> Result<RawCorpus> {
    let bytes = fs::read(path).map_err(|e| PipelineError::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let markup = String::from_utf8_lossy(&bytes);
    if markup.contains('\u{fffd}') {
        warn!(path = %path.display(), "Input is not valid UTF-8; invalid bytes were replaced");
    }

    let documents = extractor.extract_documents(&markup);
    debug!(bytes = bytes.len(), "Extracted documents from markup");

    if documents.is_empty() {
        return Err(PipelineError::Input {
            path: path.to_path_buf(),
            reason: "no documents found".to_string(),
        });
    }

    info!(documents = documents.len(), path = %path.display(), "Loaded corpus");
    Ok(RawCorpus::new(documents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::traits::NoopSingularizer;

    #[test]
    fn raw_corpus_cannot_be_aggregated() {
        let corpus = Corpus::from(RawCorpus::new(vec!["dog dog".to_string()]));
        let err = corpus.frequency_tables().unwrap_err();
        assert!(matches!(err, PipelineError::Usage(_)));
    }

    #[test]
    fn normalize_transitions_state() {
        let corpus = Corpus::from(RawCorpus::new(vec!["Dog dog".to_string()]));
        assert!(!corpus.is_tokenized());

        let corpus = corpus.normalize(&NoopSingularizer);
        assert!(corpus.is_tokenized());
        assert_eq!(
            corpus.tokenized().unwrap().documents(),
            &[vec!["dog".to_string(), "dog".to_string()]]
        );
    }

    #[test]
    fn normalize_reports_each_document() {
        let raw = RawCorpus::new(vec!["a".into(), "b".into(), "c".into()]);
        let mut seen = 0;
        let tokens = raw.normalize_with(&NoopSingularizer, || seen += 1);
        assert_eq!(seen, 3);
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn stop_words_removed_but_documents_kept() {
        let tokens = TokenizedCorpus::from_tokens(vec![
            vec!["the".into(), "dog".into()],
            vec!["the".into()],
        ]);
        let stop: HashSet<String> = ["the".to_string()].into();
        let filtered = tokens.without_stop_words(&stop);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.token_count(), 1);
        assert!(filtered.documents()[1].is_empty());
    }
}
