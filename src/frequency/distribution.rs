// Count-of-counts distribution: how many distinct tokens occur exactly n times.

use std::collections::BTreeMap;

use serde::Serialize;

use super::tables::TotalFrequencyTable;

/// Frequency value → number of distinct tokens with that total.
///
/// Keys are kept sorted, so `points` yields x in increasing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountDistribution {
    counts: BTreeMap<u64, u64>,
}

impl CountDistribution {
    pub fn from_totals(totals: &TotalFrequencyTable) -> Self {
        let mut counts = BTreeMap::new();
        for (_, total) in totals.iter() {
            *counts.entry(total).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of tokens that occur exactly `frequency` times.
    pub fn get(&self, frequency: u64) -> u64 {
        self.counts.get(&frequency).copied().unwrap_or(0)
    }

    /// Number of distinct frequency values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(f, n)| (*f, *n))
    }

    /// Parallel (x, y) sequences for curve fitting and plotting.
    pub fn points(&self) -> (Vec<f64>, Vec<f64>) {
        self.counts
            .iter()
            .map(|(f, n)| (*f as f64, *n as f64))
            .unzip()
    }
}

impl FromIterator<(u64, u64)> for CountDistribution {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::TokenizedCorpus;
    use crate::frequency::tables::FrequencyTables;

    #[test]
    fn counts_tokens_per_frequency() {
        let corpus = TokenizedCorpus::from_tokens(vec![
            vec!["dog".into(), "dog".into(), "cat".into()],
            vec!["dog".into(), "emu".into()],
        ]);
        let tables = FrequencyTables::build(&corpus);
        let dist = CountDistribution::from_totals(&tables.total);

        assert_eq!(dist.get(3), 1);
        assert_eq!(dist.get(1), 2);
        assert_eq!(dist.get(2), 0);
        assert_eq!(dist.points(), (vec![1.0, 3.0], vec![2.0, 1.0]));
    }

    #[test]
    fn collects_from_pairs() {
        let dist: CountDistribution = [(2, 20), (1, 50), (3, 5)].into_iter().collect();
        assert_eq!(dist.points().0, vec![1.0, 2.0, 3.0]);
        assert_eq!(dist.len(), 3);
    }
}
