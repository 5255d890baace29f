//! tankfield -- a 9x9 tank battle bot speaking the Botzone JSON line protocol.
//!
//! Reads one request per line from stdin and writes the response (plus the
//! keep-running sentinel) to stdout. Logging goes to stderr via `RUST_LOG`.
//!
//! Options:
//!   --exit-after-output   Answer one request and exit (no sentinel)
//!   --seed N              Random seed, 0 for entropy (default: 0)

use std::env;
use std::io::{self, BufRead};
use std::process;

use tankfield::engine::{Engine, EngineConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = EngineConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--exit-after-output" => {
                config.keep_running = false;
            }
            "--seed" => {
                i += 1;
                config.seed = match args.get(i).and_then(|v| v.parse().ok()) {
                    Some(seed) => seed,
                    None => {
                        eprintln!("invalid --seed value");
                        process::exit(1);
                    }
                };
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Usage: tankfield [--exit-after-output] [--seed N]");
                process::exit(1);
            }
        }
        i += 1;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new(config);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        match engine.handle_line(&line, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                log::error!("{}", e);
                process::exit(1);
            }
        }
    }
}
