//! Match simulator CLI: plays whole Guandan matches between automated players.
//!
//! Every match runs in memory through the engine facade. Results go to a
//! JSONL file (one line per match) and a CSV summary.

mod analysis;
mod metrics;
mod output;
mod types;

use analysis::{analyze_jsonl, Summary};
use clap::Parser;
use guandan_engine::logging::{init_tracing, LogFormat};
use guandan_engine::{MatchConfig, MatchResult, MatchSimulator};
use metrics::build_match_metrics;
use output::OutputWriter;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use types::{OutputFormat, SeatKind};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "In-memory Guandan match simulator")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Player for all seats (shortcut to set all 4 seats at once)
    #[arg(long, conflicts_with_all = ["seat0", "seat1", "seat2", "seat3"])]
    seats: Option<SeatKind>,

    /// Player for seat 0
    #[arg(long, default_value = "smart")]
    seat0: SeatKind,

    /// Player for seat 1
    #[arg(long, default_value = "smart")]
    seat1: SeatKind,

    /// Player for seat 2
    #[arg(long, default_value = "smart")]
    seat2: SeatKind,

    /// Player for seat 3
    #[arg(long, default_value = "smart")]
    seat3: SeatKind,

    /// Base seed; match N uses seed + N - 1. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Run matches on all cores
    #[arg(long)]
    parallel: bool,

    /// Override the deal limit per match
    #[arg(long)]
    max_deals: Option<u32>,

    /// Narrate every engine event
    #[arg(short, long)]
    verbose: bool,

    /// Also log output file paths and per-match results
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,

    /// Summarize an existing JSONL results file instead of simulating
    #[arg(long)]
    analyze: Option<PathBuf>,
}

struct Finished {
    match_id: u32,
    outcome: Result<MatchResult, guandan_engine::GameError>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    init_tracing(filter, LogFormat::from_env());

    if let Some(path) = &args.analyze {
        let summary = analyze_jsonl(path)?;
        println!("Matches analysed: {}", summary.matches);
        summary.print();
        return Ok(());
    }

    let seat_kinds = match args.seats {
        Some(kind) => [kind; 4],
        None => [args.seat0, args.seat1, args.seat2, args.seat3],
    };
    let players = seat_kinds.map(|k| k.difficulty().to_string());

    let mut config = MatchConfig::from_env()?;
    if let Some(max_deals) = args.max_deals {
        config.max_deals = max_deals;
    }
    config.validate()?;
    let base_seed = args.seed.unwrap_or_else(rand::random);

    if args.show_output {
        info!(games = args.games, ?players, base_seed, parallel = args.parallel, "starting simulator");
    }

    let mut output_writer = OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let run_one = |match_id: u32| Finished {
        match_id,
        outcome: run_match(
            config.with_seed(base_seed.wrapping_add(u64::from(match_id - 1))),
            seat_kinds,
            args.verbose,
        ),
    };

    let start = Instant::now();
    let finished: Vec<Finished> = if args.parallel {
        (1..=args.games).into_par_iter().map(run_one).collect()
    } else {
        (1..=args.games).map(run_one).collect()
    };
    let elapsed = start.elapsed();

    let mut summary = Summary::default();
    let mut errors = 0;
    for Finished { match_id, outcome } in finished {
        match outcome {
            Ok(result) => {
                let metrics = build_match_metrics(match_id, players.clone(), args.games, &result);
                if let Err(e) = output_writer.write_match(&metrics) {
                    warn!("Failed to write metrics for match {}: {}", match_id, e);
                }
                summary.add_metrics(&metrics);
                if args.verbose {
                    info!(match_id, winner = result.winner.0, levels = ?result.final_levels, "match completed");
                }
            }
            Err(e) => {
                errors += 1;
                warn!(match_id, code = e.code(), "Match {} failed: {}", match_id, e);
            }
        }
    }

    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
    }
    print_summary(&summary, errors, elapsed, args.games);

    Ok(())
}

fn run_match(
    config: MatchConfig,
    seats: [SeatKind; 4],
    verbose: bool,
) -> Result<MatchResult, guandan_engine::GameError> {
    MatchSimulator::new(config, seats.map(SeatKind::difficulty))?
        .verbose(verbose)
        .run()
}

fn print_summary(summary: &Summary, errors: u32, elapsed: Duration, total: u32) {
    print!("{}", summary_report(summary, errors, elapsed, total));
}

fn summary_report(summary: &Summary, errors: u32, elapsed: Duration, total: u32) -> String {
    let mut out = format!(
        "\n=== Simulation Summary ===\nMatches completed: {}/{}\n",
        summary.matches, total
    );
    if errors > 0 {
        out.push_str(&format!("Errors: {}\n", errors));
    }
    out.push_str(&format!("Total time: {:?}\n", elapsed));
    if summary.matches > 0 {
        out.push_str(&format!(
            "Average time per match: {:?}\n",
            elapsed / summary.matches
        ));
        out.push_str(&summary.report());
    }
    out
}
