// Pipeline error taxonomy.
//
// Every stage surfaces its failure to the driver through one of these
// variants. Nothing is retried.

use std::path::PathBuf;

use thiserror::Error;

use crate::fit::powerlaw::FitError;
use crate::output::plots::PlotError;

/// Error type for every stage of the frequency pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage was invoked before its precondition held (e.g. aggregation
    /// over a corpus that has not been normalized).
    #[error("usage error: {0}")]
    Usage(String),

    /// The markup extractor was configured with an unusable document tag.
    #[error("markup configuration error: {0}")]
    Markup(String),

    /// The input file is missing, unreadable, or holds no documents.
    #[error("input error ({}): {reason}", path.display())]
    Input { path: PathBuf, reason: String },

    #[error("power-law fit failed: {0}")]
    FitConvergence(#[from] FitError),

    #[error("plot rendering failed: {0}")]
    Plot(#[from] PlotError),
}

impl PipelineError {
    /// Short name of the stage that failed, for user-facing messages.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Usage(_) => "aggregation",
            PipelineError::Markup(_) | PipelineError::Input { .. } => "load",
            PipelineError::FitConvergence(_) => "fit",
            PipelineError::Plot(_) => "report",
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_identify_failing_step() {
        let err = PipelineError::Usage("not tokenized".to_string());
        assert_eq!(err.stage(), "aggregation");

        let err = PipelineError::Markup("bad tag".to_string());
        assert_eq!(err.stage(), "load");

        let err = PipelineError::Input {
            path: PathBuf::from("missing.txt"),
            reason: "no documents".to_string(),
        };
        assert_eq!(err.stage(), "load");
        assert!(err.to_string().contains("missing.txt"));

        let err = PipelineError::from(FitError::TooFewPoints { found: 1 });
        assert_eq!(err.stage(), "fit");
    }
}
