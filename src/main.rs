use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;

use wordfreq::config::Config;
use wordfreq::corpus::markup::DocTagExtractor;
use wordfreq::output::json::JsonReport;
use wordfreq::output::plots::PngPlotRenderer;
use wordfreq::output::terminal;
use wordfreq::pipeline::{self, Analysis, PipelineOptions};
use wordfreq::text::inflect::EnglishSingularizer;
use wordfreq::text::normalize::normalize_word;

/// wordfreq: word frequency statistics for a markup corpus.
///
/// Splits the input into `<doc>` records, normalizes each into singular,
/// lowercase word tokens, counts them per document and across the corpus,
/// and fits a power law to the count-of-counts distribution.
#[derive(Parser)]
#[command(name = "wordfreq", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every word ranked by total count, fit a power law, and save plots
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Directory for loglog.png and histogram.png (default: WORDFREQ_PLOT_DIR or ./plots)
        #[arg(long)]
        plot_dir: Option<PathBuf>,

        /// Skip rendering the plots
        #[arg(long)]
        no_plots: bool,

        /// Only list the N most frequent words
        #[arg(long)]
        top: Option<usize>,

        /// Output format for the listing
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the count distribution and the fitted power-law coefficients
    Fit {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show one word's total and per-document counts
    Word {
        #[command(flatten)]
        input: InputArgs,

        /// The word to look up (normalized the same way as the corpus)
        word: String,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Markup file containing the documents
    file: PathBuf,

    /// Tag that delimits documents (default: WORDFREQ_DOC_TAG or "doc")
    #[arg(long)]
    doc_tag: Option<String>,

    /// Drop English stop words after normalization
    #[arg(long)]
    drop_stop_words: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging goes to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wordfreq=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            input,
            plot_dir,
            no_plots,
            top,
            format,
        } => {
            let analysis = run_pipeline(&config, &input)?;

            match format {
                OutputFormat::Text => {
                    terminal::display_listing(&analysis.tables, top);
                    terminal::display_fit(&analysis.fit);
                }
                OutputFormat::Json => {
                    let fit = analysis.fit.as_ref().map_err(|e| e.to_string());
                    let report = JsonReport::new(
                        analysis.documents,
                        &analysis.tables,
                        &analysis.distribution,
                        fit,
                        top,
                    );
                    println!("{}", report.to_json()?);
                }
            }

            if !no_plots {
                let dir = plot_dir.unwrap_or_else(|| config.plot_dir.clone());
                let renderer = PngPlotRenderer::new(dir);
                if let Some(files) = analysis.render(&renderer)? {
                    for file in files {
                        eprintln!("{} {}", "Saved plot:".dimmed(), file.display());
                    }
                }
            }
        }

        Commands::Fit { input } => {
            let analysis = run_pipeline(&config, &input)?;
            terminal::display_distribution(&analysis.distribution);
            terminal::display_fit(&analysis.fit);
        }

        Commands::Word { input, word } => {
            let Some(token) = normalize_word(&word, &EnglishSingularizer::default()) else {
                anyhow::bail!("{word:?} has no letters left after normalization");
            };
            let analysis = run_pipeline(&config, &input)?;
            terminal::display_word(&token, analysis.tables.lookup(&token));
        }
    }

    Ok(())
}

/// Validate the input, then run load → normalize → aggregate → fit.
fn run_pipeline(config: &Config, input: &InputArgs) -> Result<Analysis> {
    config.require_input(&input.file)?;

    let tag = input.doc_tag.as_deref().unwrap_or(&config.doc_tag);
    let extractor = DocTagExtractor::new(tag)?;
    let singularizer = EnglishSingularizer::default();
    let options = PipelineOptions {
        drop_stop_words: input.drop_stop_words || config.drop_stop_words,
    };

    info!(file = %input.file.display(), tag, "Analyzing corpus");
    let analysis = pipeline::run(&input.file, &extractor, &singularizer, &options)
        .map_err(|e| anyhow::anyhow!("{} stage failed: {e}", e.stage()))?;
    Ok(analysis)
}
