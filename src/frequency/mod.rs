// Frequency aggregation — per-article and corpus-wide word counts, and the
// count-of-counts distribution derived from them.

pub mod distribution;
pub mod tables;
