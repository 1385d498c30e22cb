//! Sequential vs parallel reduction and sorting benchmark.
//!
//! Run with: cargo run --release --bin array-bench -- reduce --size 1000000

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::EnvFilter;

use parallel_array_bench::bench::{self, prompt, MonotonicClock, ReductionReport, Report, SortRow};
use parallel_array_bench::{validate_size, BenchConfig, MergeStrategy, OddEvenMode, Result};

#[derive(Parser)]
#[command(name = "array-bench", version, about = "Compare sequential and parallel array algorithms")]
struct Cli {
    /// TOML file with benchmark settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// Fixed RNG seed for reproducible input
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sum, average and min/max
    Reduce {
        /// Array length; prompts on stdin when omitted
        #[arg(long, allow_negative_numbers = true)]
        size: Option<i64>,

        /// Timed repetitions per measurement
        #[arg(long)]
        runs: Option<usize>,

        /// How worker partials are merged
        #[arg(long, value_parser = parse_merge)]
        merge: Option<MergeStrategy>,
    },
    /// Bubble, selection and insertion sort
    Sort {
        /// Comma-separated array lengths
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        sizes: Vec<i64>,

        /// Phase synchronisation for the parallel bubble sort
        #[arg(long, value_parser = parse_odd_even)]
        odd_even: Option<OddEvenMode>,

        /// Stop odd-even sort once two consecutive phases make no swaps
        #[arg(long)]
        early_exit: bool,
    },
}

fn parse_merge(s: &str) -> std::result::Result<MergeStrategy, String> {
    match s {
        "tree" => Ok(MergeStrategy::Tree),
        "critical" => Ok(MergeStrategy::Critical),
        other => Err(format!("unknown merge strategy '{other}' (expected tree or critical)")),
    }
}

fn parse_odd_even(s: &str) -> std::result::Result<OddEvenMode, String> {
    match s {
        "phases" => Ok(OddEvenMode::Phases),
        "barrier" => Ok(OddEvenMode::Barrier),
        other => Err(format!("unknown odd-even mode '{other}' (expected phases or barrier)")),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("array_bench=info,parallel_array_bench=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(report) if report.all_ok() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Report> {
    let mut config = match &cli.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let clock = MonotonicClock::new();
    let mut report = Report::new();
    info!(threads = report.threads, cpus = report.cpus, "worker pool ready");

    match cli.command {
        Command::Reduce { size, runs, merge } => {
            let size = match size {
                Some(n) => validate_size(n)?,
                None => prompt::read_size(io::stdin().lock(), io::stdout())?,
            };
            if let Some(runs) = runs {
                config.runs = runs.max(1);
            }
            if let Some(merge) = merge {
                config.merge = merge;
            }
            report.reductions = Some(bench::reduction_report(size, &config, &clock)?);
        }
        Command::Sort { sizes, odd_even, early_exit } => {
            if !sizes.is_empty() {
                config.sizes = sizes.into_iter().map(validate_size).collect::<Result<_>>()?;
            }
            if let Some(mode) = odd_even {
                config.odd_even = mode;
            }
            config.early_exit |= early_exit;
            for &size in &config.sizes {
                report.sorts.extend(bench::run_sorts(size, &config, &clock)?);
            }
        }
    }

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }
    Ok(report)
}

fn print_report(report: &Report) {
    println!("Worker threads: {} (logical CPUs: {})", report.threads, report.cpus);
    if let Some(reductions) = &report.reductions {
        print_reductions(reductions);
    }
    let mut current_size = None;
    for row in &report.sorts {
        if current_size != Some(row.size) {
            println!("\n--- Array size: {} ---", row.size);
            current_size = Some(row.size);
        }
        print_sort_row(row);
    }
}

fn print_reductions(r: &ReductionReport) {
    println!("\nArray size: {} ({} run(s) averaged)", r.size, r.runs);
    if let Some(sample) = &r.sample {
        println!("Array: {}", sample.iter().join(" "));
    }
    for row in &r.rows {
        println!("{:<8} seq: {} ({:.3} ms)", row.kind.to_string(), row.sequential, row.seq_ms);
        println!("{:<8} par: {} ({:.3} ms)", "", row.parallel, row.par_ms);
        let verdict = if row.matches { "OK".green() } else { "MISMATCH".red() };
        match row.speedup {
            Some(s) => println!("{:<8} speedup: {s:.2}x | {verdict}", ""),
            None => println!("{:<8} speedup: n/a | {verdict}", ""),
        }
    }
}

fn print_sort_row(row: &SortRow) {
    let name = capitalize(&row.algorithm.to_string());
    let par = match &row.parallel {
        Some(p) => format!("{:.3} ms", p.ms),
        None => "N/A (not parallelized)".to_string(),
    };
    let speedup = row.speedup.map(|s| format!(" | {s:.2}x")).unwrap_or_default();
    let verdict = if row.ok() { "OK".green() } else { "ERROR".red() };
    println!("{name:<9} seq: {:.3} ms | par: {par}{speedup} | {verdict}", row.seq_ms);
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
