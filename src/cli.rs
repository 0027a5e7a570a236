//! CLI argument parsing for compare-mt

use crate::config::{parse_buckets, AnalysisConfig};
use crate::error::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "compare-mt")]
#[command(version)]
#[command(about = "Statistical comparison of machine translation outputs", long_about = None)]
pub struct Cli {
    /// Load analysis settings from a TOML file (flags take precedence)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Log analysis details to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank n-grams over/under-generated by an output, or contrast two outputs
    Ngrams(NgramArgs),
    /// Word F-measure bucketed by training-corpus frequency
    Buckets(BucketArgs),
    /// Paired bootstrap significance test between two systems
    Bootstrap(BootstrapArgs),
}

#[derive(Args, Debug)]
pub struct NgramArgs {
    /// Reference file (one tokenized sentence per line)
    pub reference: PathBuf,

    /// System output file(s): one for attribution, two for a head-to-head
    #[arg(required = true, num_args = 1..)]
    pub outputs: Vec<PathBuf>,

    /// Smoothing constant (> 0)
    #[arg(long = "alpha", value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Maximum n-gram length
    #[arg(long = "ngram", value_name = "N")]
    pub max_order: Option<usize>,

    /// Entries to print from each end of the ranking
    #[arg(long = "printsize", value_name = "K")]
    pub print_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct BucketArgs {
    /// Reference file (one tokenized sentence per line)
    pub reference: PathBuf,

    /// System output file
    pub output: PathBuf,

    /// Token frequencies as token<TAB>count lines
    #[arg(long = "freq-counts", value_name = "FILE", conflicts_with = "freq_corpus")]
    pub freq_counts: Option<PathBuf>,

    /// Training corpus to count token frequencies from
    #[arg(long = "freq-corpus", value_name = "FILE")]
    pub freq_corpus: Option<PathBuf>,

    /// Ascending bucket upper bounds, comma separated (e.g. 1,2,5,10,100)
    #[arg(long = "buckets", value_name = "LIST")]
    pub buckets: Option<String>,
}

#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// File of gold answers
    pub gold: PathBuf,

    /// File of system 1 answers
    pub sys1: PathBuf,

    /// File of system 2 answers
    pub sys2: PathBuf,

    /// Evaluation type (accuracy, pearson, bleu, bleu_detok)
    #[arg(long = "eval-type", alias = "eval_type", value_name = "TYPE")]
    pub eval_type: Option<String>,

    /// Number of resampling iterations
    #[arg(long = "num-samples", alias = "num_samples", value_name = "N")]
    pub num_samples: Option<usize>,

    /// Fraction of the test set drawn per iteration
    #[arg(long = "sample-ratio", value_name = "RATIO")]
    pub sample_ratio: Option<f64>,

    /// Seed for reproducible resampling
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,
}

impl Cli {
    /// Build the effective configuration: file (or defaults), then flags
    pub fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_toml_file(path)?,
            None => AnalysisConfig::default(),
        };

        match &self.command {
            Command::Ngrams(args) => {
                if let Some(alpha) = args.alpha {
                    config.alpha = alpha;
                }
                if let Some(max_order) = args.max_order {
                    config.max_order = max_order;
                }
                if let Some(print_size) = args.print_size {
                    config.print_size = print_size;
                }
            }
            Command::Buckets(args) => {
                if let Some(spec) = &args.buckets {
                    config.buckets = parse_buckets(spec)?;
                }
            }
            Command::Bootstrap(args) => {
                if let Some(name) = &args.eval_type {
                    config.eval_type = name.parse()?;
                }
                if let Some(num_samples) = args.num_samples {
                    config.num_samples = num_samples;
                }
                if let Some(sample_ratio) = args.sample_ratio {
                    config.sample_ratio = sample_ratio;
                }
                if args.seed.is_some() {
                    config.seed = args.seed;
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}
