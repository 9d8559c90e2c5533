// Per-article and total frequency tables.
//
// Both tables are built in one pass over the tokenized corpus from the same
// per-document counts: each (document, count) entry appended to a token's
// per-article list is added to that token's total in the same step, so the
// total always equals the sum of the per-article counts.
//
// Tokens are kept in first-occurrence order (first document, then position
// within it). That order is what breaks ties when ranking by total count.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::corpus::TokenizedCorpus;

/// Occurrences of one token in one document. Documents are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentCount {
    pub document: usize,
    pub count: u32,
}

impl fmt::Display for DocumentCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.document, self.count)
    }
}

/// Token → documents containing it, in increasing document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PerArticleFrequencyTable {
    entries: IndexMap<String, Vec<DocumentCount>>,
}

impl PerArticleFrequencyTable {
    pub fn get(&self, token: &str) -> Option<&[DocumentCount]> {
        self.entries.get(token).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocumentCount])> {
        self.entries.iter().map(|(t, docs)| (t.as_str(), docs.as_slice()))
    }

    fn record(&mut self, token: &str, entry: DocumentCount) {
        match self.entries.get_mut(token) {
            Some(docs) => docs.push(entry),
            None => {
                self.entries.insert(token.to_owned(), vec![entry]);
            }
        }
    }
}

/// Token → occurrences across the whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TotalFrequencyTable {
    totals: IndexMap<String, u64>,
}

impl TotalFrequencyTable {
    pub fn get(&self, token: &str) -> Option<u64> {
        self.totals.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.totals.iter().map(|(t, n)| (t.as_str(), *n))
    }

    /// Sum of all token totals, i.e. the corpus token count.
    pub fn token_count(&self) -> u64 {
        self.totals.values().sum()
    }

    fn add(&mut self, token: &str, count: u32) {
        match self.totals.get_mut(token) {
            Some(total) => *total += u64::from(count),
            None => {
                self.totals.insert(token.to_owned(), u64::from(count));
            }
        }
    }
}

/// One row of the ranked listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedToken<'a> {
    pub token: &'a str,
    pub total: u64,
    pub documents: &'a [DocumentCount],
}

/// Both frequency tables for one corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTables {
    pub per_article: PerArticleFrequencyTable,
    pub total: TotalFrequencyTable,
}

impl FrequencyTables {
    /// Count every token in every document.
    pub fn build(corpus: &TokenizedCorpus) -> Self {
        let mut tables = FrequencyTables::default();

        for (index, document) in corpus.documents().iter().enumerate() {
            let mut counts: IndexMap<&str, u32> = IndexMap::new();
            for token in document {
                *counts.entry(token.as_str()).or_insert(0) += 1;
            }

            for (token, count) in counts {
                tables.per_article.record(
                    token,
                    DocumentCount {
                        document: index + 1,
                        count,
                    },
                );
                tables.total.add(token, count);
            }
        }

        debug!(
            documents = corpus.len(),
            distinct_tokens = tables.total.len(),
            "Built frequency tables"
        );
        tables
    }

    /// Tokens sorted by descending total; equal totals keep first-occurrence order.
    pub fn ranked(&self) -> Vec<RankedToken<'_>> {
        let mut rows: Vec<RankedToken<'_>> = self
            .total
            .iter()
            .map(|(token, total)| RankedToken {
                token,
                total,
                documents: self.per_article.get(token).unwrap_or(&[]),
            })
            .collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        rows
    }

    /// Look up one token's total and per-document breakdown.
    pub fn lookup(&self, token: &str) -> Option<RankedToken<'_>> {
        let total = self.total.get(token)?;
        let documents = self.per_article.get(token)?;
        Some(RankedToken {
            token: self.total.totals.get_key_value(token)?.0.as_str(),
            total,
            documents,
        })
    }

    /// Whether every total equals the sum of its per-article counts and the
    /// two tables hold the same tokens.
    pub fn is_consistent(&self) -> bool {
        self.per_article.len() == self.total.len()
            && self.per_article.iter().all(|(token, docs)| {
                let sum: u64 = docs.iter().map(|d| u64::from(d.count)).sum();
                self.total.get(token) == Some(sum)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&[&str]]) -> TokenizedCorpus {
        TokenizedCorpus::from_tokens(
            docs.iter()
                .map(|d| d.iter().map(|t| t.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn single_document_counts() {
        let tables = FrequencyTables::build(&corpus(&[&["cat", "run", "cat", "jump"]]));
        assert_eq!(tables.total.get("cat"), Some(2));
        assert_eq!(tables.total.get("run"), Some(1));
        assert_eq!(tables.total.get("jump"), Some(1));
        assert_eq!(
            tables.per_article.get("cat"),
            Some(&[DocumentCount { document: 1, count: 2 }][..])
        );
    }

    #[test]
    fn absent_documents_have_no_entry() {
        let tables = FrequencyTables::build(&corpus(&[&["dog", "dog"], &["dog", "cat"]]));
        assert_eq!(
            tables.per_article.get("dog"),
            Some(
                &[
                    DocumentCount { document: 1, count: 2 },
                    DocumentCount { document: 2, count: 1 },
                ][..]
            )
        );
        assert_eq!(
            tables.per_article.get("cat"),
            Some(&[DocumentCount { document: 2, count: 1 }][..])
        );
        assert!(tables.is_consistent());
    }

    #[test]
    fn empty_documents_still_advance_numbering() {
        let tables = FrequencyTables::build(&corpus(&[&[], &["x"]]));
        assert_eq!(
            tables.per_article.get("x"),
            Some(&[DocumentCount { document: 2, count: 1 }][..])
        );
    }

    #[test]
    fn ranked_ties_keep_first_occurrence_order() {
        let tables = FrequencyTables::build(&corpus(&[&["b", "a", "c", "a"], &["c", "d"]]));
        let order: Vec<&str> = tables.ranked().iter().map(|r| r.token).collect();
        assert_eq!(order, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn display_matches_listing_format() {
        let entry = DocumentCount { document: 3, count: 7 };
        assert_eq!(entry.to_string(), "[3, 7]");
    }
}
