//! Method Oracle CLI.
//!
//! Grades the bundled practice submissions against their reference solutions.

use clap::{Parser, Subcommand, ValueEnum};
use method_oracle::practice::{self, Problem};
use method_oracle::{HarnessConfig, MemberTable, RunSummary};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "method-oracle")]
#[command(about = "Method Oracle - equivalence testing against a reference", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// List the practice problems and their reference headers
    List,

    /// Grade a bundled submission against the practice set
    Grade {
        /// Which bundled submission to grade
        #[arg(long, value_enum, default_value_t = Submission::Sample)]
        submission: Submission,

        /// Only grade this problem (default: all)
        #[arg(long)]
        problem: Option<String>,

        /// Number of generated test cases per problem
        #[arg(long, default_value_t = 10)]
        rounds: usize,

        /// Seed for the input generators
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Per-invocation timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Submission {
    /// Solves every problem
    Sample,
    /// One typical mistake per problem
    Buggy,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("Method Oracle v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(Commands::List) => {
            for problem in practice::problems() {
                println!("{}", problem.reference.signature());
            }
            ExitCode::SUCCESS
        }
        Some(Commands::Grade {
            submission,
            problem,
            rounds,
            seed,
            timeout_ms,
            format,
            output,
        }) => {
            let submission = match submission {
                Submission::Sample => practice::sample_submission(),
                Submission::Buggy => practice::buggy_submission(),
            };
            let mut config = HarnessConfig::standard();
            if let Some(ms) = timeout_ms {
                config = config.with_timeout(Duration::from_millis(ms));
            }
            grade(&submission, problem.as_deref(), rounds, seed, config, format, output)
        }
        None => {
            println!("Method Oracle v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}

fn grade(
    submission: &MemberTable,
    only: Option<&str>,
    rounds: usize,
    seed: u64,
    config: HarnessConfig,
    format: Format,
    output: Option<PathBuf>,
) -> ExitCode {
    let selected: Vec<Problem> = practice::problems()
        .into_iter()
        .filter(|p| only.is_none_or(|name| p.name() == name))
        .collect();
    if selected.is_empty() {
        eprintln!("Unknown problem: {}", only.unwrap_or_default());
        return ExitCode::from(2);
    }

    let mut summary = RunSummary::new();
    for (index, problem) in selected.iter().enumerate() {
        let results = problem
            .method_test(submission, rounds, seed.wrapping_add(index as u64), config)
            .and_then(|mut test| test.run_all_tests_then_end());
        match results {
            Ok(results) => results.into_iter().for_each(|r| summary.record(r)),
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::from(2);
            }
        }
    }

    let report = match format {
        Format::Text => render_text(&summary),
        Format::Json => match summary.to_json() {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                return ExitCode::from(2);
            }
        },
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, report) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                return ExitCode::from(2);
            }
        }
        None => println!("{}", report),
    }

    if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// One line per result, infrastructure errors flagged, then the tally.
fn render_text(summary: &RunSummary) -> String {
    let mut lines: Vec<String> = summary
        .results
        .iter()
        .map(|r| {
            if r.is_error() {
                format!("[harness] {}", r)
            } else {
                r.to_string()
            }
        })
        .collect();
    lines.push(summary.summary());
    lines.join("\n")
}
