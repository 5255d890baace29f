//! Match driver CLI.
//!
//! Runs two bot processes against each other and prints one JSON line per
//! turn, then the final outcome.
//!
//! Usage:
//!   cargo run --release --bin drive -- [OPTIONS]
//!
//! Options:
//!   --blue CMD      Blue bot command line (default: tankfield)
//!   --red CMD       Red bot command line (default: tankfield)
//!   --field A,B,C   Starting bricks as three 27-bit integers (default: 0,0,0)
//!   --density D     Generate a random symmetric field instead
//!   --seed N        Seed for --density, 0 for entropy (default: 0)

use std::env;
use std::process;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

use tankfield::drive::{self, DriveConfig};
use tankfield::protocol::bitfield::BrickMap;
use tankfield::protocol::layout::random_layout;

fn split_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

fn parse_field(raw: &str) -> Option<BrickMap> {
    let parts: Vec<u64> = raw.split(',').map(|p| p.trim().parse().ok()).collect::<Option<_>>()?;
    let fields: [u64; 3] = parts.try_into().ok()?;
    BrickMap::from_fields(fields).ok()
}

fn arg_or_exit<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("missing {} value", flag);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = DriveConfig::default();
    let mut density: Option<f64> = None;
    let mut seed = 0u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--blue" => {
                i += 1;
                config.blue = split_command(arg_or_exit(&args, i, "--blue"));
            }
            "--red" => {
                i += 1;
                config.red = split_command(arg_or_exit(&args, i, "--red"));
            }
            "--field" => {
                i += 1;
                config.bricks = match parse_field(arg_or_exit(&args, i, "--field")) {
                    Some(bricks) => bricks,
                    None => {
                        eprintln!("invalid --field value");
                        process::exit(1);
                    }
                };
            }
            "--density" => {
                i += 1;
                density = arg_or_exit(&args, i, "--density").parse().ok();
                if density.is_none() {
                    eprintln!("invalid --density value");
                    process::exit(1);
                }
            }
            "--seed" => {
                i += 1;
                seed = match arg_or_exit(&args, i, "--seed").parse() {
                    Ok(s) => s,
                    Err(_) => {
                        eprintln!("invalid --seed value");
                        process::exit(1);
                    }
                };
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

    if let Some(density) = density {
        let mut rng = if seed != 0 {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_entropy()
        };
        config.bricks = random_layout(&mut rng, density);
    }
    log::info!("field {:?}", config.bricks.to_fields());

    let result = drive::run_match_with_callback(&config, |turn, answers| {
        println!("{}", json!({ "turn": turn, "blue": answers[0], "red": answers[1] }));
    });

    match result {
        Ok(result) => {
            println!("{}", json!({ "outcome": result.outcome, "turns": result.turns }));
        }
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: drive [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --blue CMD       Blue bot command line (default: tankfield)");
    eprintln!("  --red CMD        Red bot command line (default: tankfield)");
    eprintln!("  --field A,B,C    Starting bricks as three 27-bit integers (default: 0,0,0)");
    eprintln!("  --density D      Generate a random symmetric field instead");
    eprintln!("  --seed N         Seed for --density, 0 for entropy (default: 0)");
    eprintln!("  --help           Show this help");
}
