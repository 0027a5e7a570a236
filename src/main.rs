use anyhow::{Context, Result};
use clap::Parser;
use compare_mt::bootstrap::significance_test;
use compare_mt::cli::{BootstrapArgs, BucketArgs, Cli, Command, NgramArgs, OutputFormat};
use compare_mt::config::AnalysisConfig;
use compare_mt::corpus::{ensure_aligned, load_corpus, read_lines};
use compare_mt::frequency::{analyze_buckets, FrequencyTable};
use compare_mt::ngram::rank_ngrams;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}

fn render_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    json.push('\n');
    Ok(json)
}

/// Build the n-gram ranking report
fn run_ngrams(args: &NgramArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<String> {
    let reference = load_corpus(&args.reference)?;
    let outputs = args
        .outputs
        .iter()
        .map(|path| load_corpus(path))
        .collect::<compare_mt::Result<Vec<_>>>()?;

    let names: Vec<String> = std::iter::once(&args.reference)
        .chain(&args.outputs)
        .map(|p| display_name(p))
        .collect();
    let lengths: Vec<(&str, usize)> = names
        .iter()
        .map(String::as_str)
        .zip(std::iter::once(reference.len()).chain(outputs.iter().map(Vec::len)))
        .collect();
    ensure_aligned(&lengths)?;

    let ranking = rank_ngrams(&reference, &outputs, config.alpha, config.max_order)?;

    match format {
        OutputFormat::Text => Ok(ranking.to_report_string(config.print_size)),
        OutputFormat::Json => render_json(&ranking.summary(config.print_size)),
    }
}

/// Build the bucketed F-measure report
fn run_buckets(args: &BucketArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<String> {
    let reference = load_corpus(&args.reference)?;
    let output = load_corpus(&args.output)?;
    ensure_aligned(&[
        (display_name(&args.reference).as_str(), reference.len()),
        (display_name(&args.output).as_str(), output.len()),
    ])?;

    let table = match (&args.freq_counts, &args.freq_corpus) {
        (Some(counts), _) => FrequencyTable::from_counts_file(counts)?,
        (None, Some(training)) => FrequencyTable::from_corpus(&load_corpus(training)?),
        (None, None) => FrequencyTable::from_corpus(&reference),
    };

    let analysis = analyze_buckets(&reference, &output, &table, &config.buckets)?;

    match format {
        OutputFormat::Text => Ok(analysis.to_report_string()),
        OutputFormat::Json => render_json(&analysis),
    }
}

/// Build the significance report
fn run_bootstrap(
    args: &BootstrapArgs,
    config: &AnalysisConfig,
    format: OutputFormat,
) -> Result<String> {
    let gold = read_lines(&args.gold)?;
    let sys1 = read_lines(&args.sys1)?;
    let sys2 = read_lines(&args.sys2)?;
    ensure_aligned(&[
        (display_name(&args.gold).as_str(), gold.len()),
        (display_name(&args.sys1).as_str(), sys1.len()),
        (display_name(&args.sys2).as_str(), sys2.len()),
    ])?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = significance_test(
        &gold,
        &sys1,
        &sys2,
        config.eval_type,
        config.num_samples,
        config.sample_ratio,
        &mut rng,
    )?;

    match format {
        OutputFormat::Text => Ok(report.to_report_string()),
        OutputFormat::Json => render_json(&report),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(cli.debug);

    let config = cli.resolve_config()?;
    tracing::debug!("Effective configuration: {:?}", config);

    // Reports are fully built before anything reaches stdout
    let report = match &cli.command {
        Command::Ngrams(args) => run_ngrams(args, &config, cli.format)?,
        Command::Buckets(args) => run_buckets(args, &config, cli.format)?,
        Command::Bootstrap(args) => run_bootstrap(args, &config, cli.format)?,
    };

    print!("{report}");
    Ok(())
}
