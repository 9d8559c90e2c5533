// wordfreq: per-document and corpus-wide word frequencies with a power-law fit
//
// This is the library root. Each module corresponds to one stage of the
// analysis pipeline.

pub mod config;
pub mod corpus;
pub mod errors;
pub mod fit;
pub mod frequency;
pub mod output;
pub mod pipeline;
pub mod text;
