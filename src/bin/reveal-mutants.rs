use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use revealing_mutants::harness::{
    CandidateProvider, ConsoleReporter, EvaluationReport, Evaluator, EvaluatorConfig,
    MutantRegistry, RecordingReporter, ReportFormat, render_report,
};
use revealing_mutants::third_shortest::{self, ThirdShortest, full_revealer_suite, revealer_suite};

#[derive(Debug, Parser)]
#[command(name = "reveal-mutants")]
#[command(about = "Score a test suite against a reference implementation and its mutants")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a revealer suite. Exits 1 when the verdict is a failure.
    Run {
        /// Reference validation trials.
        #[arg(long)]
        trials: Option<usize>,
        /// Evaluate the two-case starter suite instead of the full one.
        #[arg(long)]
        starter: bool,
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Directory holding the verdict decoration files.
        #[arg(long)]
        art_dir: Option<PathBuf>,
        /// Keep running reference trials after the first failure.
        #[arg(long)]
        no_fail_fast: bool,
        /// Debug-level logging on stderr.
        #[arg(long, short)]
        verbose: bool,
    },
    /// List registered candidates.
    List {
        /// Emit JSON output.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Live narration
    Text,
    /// Markdown
    Md,
    /// JSON
    Json,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new(filter)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into())
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn make_config(
    trials: Option<usize>,
    art_dir: Option<PathBuf>,
    no_fail_fast: bool,
) -> EvaluatorConfig {
    let mut config = EvaluatorConfig::default().with_fail_fast_reference(!no_fail_fast);
    if let Some(trials) = trials {
        config = config.with_trials(trials);
    }
    if let Some(art_dir) = art_dir {
        config = config.with_art_dir(art_dir);
    }
    config
}

fn evaluate(
    config: EvaluatorConfig,
    starter: bool,
    format: OutputFormat,
) -> Result<EvaluationReport> {
    let provider = third_shortest::provider();
    let mut registry: MutantRegistry<dyn ThirdShortest> = MutantRegistry::new();
    let failures = registry.initialize(&provider);
    tracing::info!(
        candidates = registry.size(),
        failed = failures.len(),
        "registry initialized"
    );

    let suite = if starter {
        revealer_suite()
    } else {
        full_revealer_suite()
    };
    let evaluator = Evaluator::new(config);

    let report = match format {
        OutputFormat::Text => evaluator.run(&mut registry, &suite, &mut ConsoleReporter)?,
        OutputFormat::Md | OutputFormat::Json => {
            let mut recorder = RecordingReporter::default();
            let report = evaluator.run(&mut registry, &suite, &mut recorder)?;
            let format = if format == OutputFormat::Md {
                ReportFormat::Markdown
            } else {
                ReportFormat::Json
            };
            println!("{}", render_report(&report, format)?);
            report
        }
    };
    Ok(report)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            trials,
            starter,
            format,
            art_dir,
            no_fail_fast,
            verbose,
        } => {
            init_tracing(verbose);
            let config = make_config(trials, art_dir, no_fail_fast);
            let report = evaluate(config, starter, format)?;
            if !report.passed() {
                std::process::exit(1);
            }
        }
        Command::List { json } => {
            let provider = third_shortest::provider();
            if json {
                let candidates: Vec<_> = (0..provider.len())
                    .map(|index| {
                        serde_json::json!({
                            "index": index,
                            "name": provider.name(index),
                            "role": if index == 0 { "reference" } else { "defect" },
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else {
                for index in 0..provider.len() {
                    let role = if index == 0 { "reference" } else { "defect" };
                    println!("{index}\t{role}\t{}", provider.name(index));
                }
            }
        }
    }

    Ok(())
}
