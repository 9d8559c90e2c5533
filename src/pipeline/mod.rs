// Batch analysis pipeline: load → normalize → aggregate → fit.
//
// Runs strictly in sequence over one input file. The driver owns the corpus
// for the whole run; each stage consumes the previous stage's output and
// hands back a new value, so there is no shared state between runs.
//
// A failed fit does not fail the run: the frequency tables are complete
// before fitting starts, so the result carries the fit outcome alongside them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use stop_words::{get, LANGUAGE};
use tracing::{info, warn};

use crate::corpus::markup::MarkupExtractor;
use crate::corpus::{load_corpus, RawCorpus};
use crate::errors::Result;
use crate::fit::powerlaw::{fit_power_law, FitError, FitResult};
use crate::frequency::distribution::CountDistribution;
use crate::frequency::tables::FrequencyTables;
use crate::output::plots::PlotRenderer;
use crate::text::normalize::normalize;
use crate::text::traits::Singularizer;

/// Knobs for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Remove English stop words after normalization
    pub drop_stop_words: bool,
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Number of documents in the corpus
    pub documents: usize,
    pub tables: FrequencyTables,
    pub distribution: CountDistribution,
    /// Outcome of the power-law fit; failure here leaves the tables usable
    pub fit: std::result::Result<FitResult, FitError>,
}

impl Analysis {
    /// Render the fit plots. Returns `None` without drawing when the fit failed.
    pub fn render(&self, renderer: &dyn PlotRenderer) -> Result<Option<Vec<PathBuf>>> {
        match &self.fit {
            Ok(fit) => Ok(Some(renderer.render(&self.distribution, fit)?)),
            Err(_) => Ok(None),
        }
    }
}

/// Run the full pipeline over one markup file.
pub fn run(
    path: &Path,
    extractor: &dyn MarkupExtractor,
    singularizer: &dyn Singularizer,
    options: &PipelineOptions,
) -> Result<Analysis> {
    let raw = load_corpus(path, extractor)?;
    Ok(analyze(raw, singularizer, options))
}

/// Run every stage after loading over an in-memory corpus.
pub fn analyze(
    raw: RawCorpus,
    singularizer: &dyn Singularizer,
    options: &PipelineOptions,
) -> Analysis {
    let documents = raw.len();

    let pb = ProgressBar::new(documents as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Normalizing [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let mut corpus = raw.normalize_with(singularizer, || pb.inc(1));
    pb.finish_and_clear();

    if options.drop_stop_words {
        let stop_words = english_stop_words(singularizer);
        let before = corpus.token_count();
        corpus = corpus.without_stop_words(&stop_words);
        info!(
            removed = before - corpus.token_count(),
            "Dropped stop words"
        );
    }

    info!(
        documents,
        tokens = corpus.token_count(),
        "Articles processed"
    );

    let tables = corpus.frequency_tables();
    let distribution = CountDistribution::from_totals(&tables.total);
    info!(
        distinct_tokens = tables.total.len(),
        distinct_counts = distribution.len(),
        "Built frequency tables"
    );

    let fit = fit_power_law(&distribution);
    match &fit {
        Ok(fit) => info!(a = fit.a, b = fit.b, iterations = fit.iterations, "Fitted power law"),
        Err(e) => warn!(error = %e, "Power-law fit failed"),
    }

    Analysis {
        documents,
        tables,
        distribution,
        fit,
    }
}

/// English stop words, passed through the same normalization as the text so
/// they match tokens ("don't" → "dont", "others" → "other").
pub fn english_stop_words(singularizer: &dyn Singularizer) -> HashSet<String> {
    let words: Vec<String> = get(LANGUAGE::English);
    words
        .into_iter()
        .flat_map(|word| normalize(&word, singularizer))
        .collect()
}
