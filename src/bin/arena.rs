//! Self-play CLI.
//!
//! Plays random-policy games on random symmetric maps and writes one JSON
//! record per game.
//!
//! Usage:
//!   cargo run --release --bin arena -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --density D     Brick density 0.0-1.0 (default: 0.3)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tankfield::arena::{self, ArenaConfig};

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("invalid {} value", flag);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = ArenaConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = parse_value(&args, i, "--games");
            }
            "--threads" => {
                i += 1;
                config.threads = parse_value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(&args, i, "--seed");
            }
            "--density" => {
                i += 1;
                config.density = parse_value(&args, i, "--density");
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_value(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !config.quiet {
        eprintln!(
            "Arena: {} games, density {:.2}, {} threads",
            config.num_games, config.density, config.threads
        );
    }

    let start = Instant::now();
    let games = match arena::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        let summary = arena::summarize(&games);
        eprintln!("Completed {} games in {:.2}s", summary.games, elapsed.as_secs_f64());
        eprintln!(
            "Blue {} / Red {} / Draw {}, {:.1} turns per game",
            summary.blue_wins, summary.red_wins, summary.draws, summary.avg_turns
        );
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| arena::write_jsonl(&games, &mut BufWriter::new(file))),
        None => arena::write_jsonl(&games, &mut BufWriter::new(io::stdout().lock())),
    };
    if let Err(e) = written {
        log::error!("failed to write output: {}", e);
        process::exit(1);
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        eprintln!("Wrote {} games to {}", games.len(), path);
    }
}

fn print_usage() {
    eprintln!("Usage: arena [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --density D      Brick density 0.0-1.0 (default: 0.3)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
