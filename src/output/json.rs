// JSON export of the ranked listing and the fit.

use serde::Serialize;

use crate::fit::powerlaw::FitResult;
use crate::frequency::distribution::CountDistribution;
use crate::frequency::tables::{FrequencyTables, RankedToken};

/// Everything the console report shows, in one serializable document.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub documents: usize,
    pub distinct_tokens: usize,
    pub total_tokens: u64,
    pub words: Vec<RankedToken<'a>>,
    pub distribution: &'a CountDistribution,
    pub fit: Option<&'a FitResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_error: Option<String>,
}

impl<'a> JsonReport<'a> {
    pub fn new(
        documents: usize,
        tables: &'a FrequencyTables,
        distribution: &'a CountDistribution,
        fit: Result<&'a FitResult, String>,
        limit: Option<usize>,
    ) -> Self {
        let mut words = tables.ranked();
        if let Some(limit) = limit {
            words.truncate(limit);
        }
        let (fit, fit_error) = match fit {
            Ok(fit) => (Some(fit), None),
            Err(e) => (None, Some(e)),
        };

        Self {
            documents,
            distinct_tokens: tables.total.len(),
            total_tokens: tables.total.token_count(),
            words,
            distribution,
            fit,
            fit_error,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::TokenizedCorpus;

    #[test]
    fn report_lists_words_in_rank_order() {
        let corpus = TokenizedCorpus::from_tokens(vec![
            vec!["dog".into(), "dog".into()],
            vec!["dog".into(), "cat".into()],
        ]);
        let tables = FrequencyTables::build(&corpus);
        let distribution = CountDistribution::from_totals(&tables.total);
        let report = JsonReport::new(
            corpus.len(),
            &tables,
            &distribution,
            Err("too few points".to_string()),
            None,
        );

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["words"][0]["token"], "dog");
        assert_eq!(value["words"][0]["total"], 3);
        assert_eq!(value["words"][0]["documents"][1]["document"], 2);
        assert_eq!(value["words"][1]["token"], "cat");
        assert_eq!(value["distribution"]["1"], 1);
        assert!(value["fit"].is_null());
        assert_eq!(value["fit_error"], "too few points");
    }
}
