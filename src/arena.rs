//! In-process self-play.
//!
//! Plays complete games between two random policies on random symmetric
//! maps and records every turn. Games run sequentially or on a rayon pool;
//! each game gets its own RNG derived from the base seed, so a seeded run
//! produces the same games whatever the thread count.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::{Action, Battlefield, ALL_SIDES, TANKS_PER_SIDE};
use crate::movegen::random_actions;
use crate::movegen::legality::IllegalAction;
use crate::protocol::bitfield::LayoutError;
use crate::protocol::layout::{battlefield_from_bricks, random_layout};
use crate::resolve::{outcome, resolve_turn, Outcome};

/// Configuration for self-play.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Number of parallel threads (1 = sequential).
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Probability that a free mirrored cell pair holds bricks.
    pub density: f64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            num_games: 10,
            threads: 4,
            seed: 0,
            density: 0.3,
            quiet: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("bad starting layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("turn rejected: {0}")]
    Rejected(#[from] IllegalAction),

    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,
}

/// One resolved turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    pub turn: u32,
    /// Executed actions, indexed by side then slot.
    pub actions: [[Action; TANKS_PER_SIDE]; 2],
    /// Number of entities removed this turn.
    pub destroyed: usize,
}

/// A complete self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    /// Starting bricks in wire encoding.
    pub field: [u64; 3],
    pub turns: Vec<TurnRecord>,
    pub outcome: Outcome,
}

/// Aggregate results over many games.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArenaSummary {
    pub games: usize,
    pub blue_wins: usize,
    pub red_wins: usize,
    pub draws: usize,
    pub avg_turns: f64,
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays a single game to its end.
pub fn play_game(config: &ArenaConfig, game_id: usize, rng: &mut SmallRng) -> Result<GameRecord, ArenaError> {
    let bricks = random_layout(rng, config.density);
    let mut state: Battlefield = battlefield_from_bricks(&bricks)?;
    let mut turns = Vec::new();

    let result = loop {
        let result = outcome(&state);
        if result.is_finished() {
            break result;
        }
        for side in ALL_SIDES {
            let actions = random_actions(&state, side, rng);
            state.set_actions(side, actions)?;
        }
        let report = resolve_turn(&mut state)?;
        turns.push(TurnRecord {
            turn: report.turn,
            actions: report.actions,
            destroyed: report.destroyed.len(),
        });
    };

    log::debug!("game {} over after {} turns: {:?}", game_id, turns.len(), result);
    Ok(GameRecord {
        game_id,
        field: bricks.to_fields(),
        turns,
        outcome: result,
    })
}

/// Runs self-play, collecting every game record.
pub fn run_self_play(config: &ArenaConfig) -> Result<Vec<GameRecord>, ArenaError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    Ok(games)
}

/// Runs self-play, calling `on_game` with each completed game as it finishes.
///
/// With `config.threads > 1` games finish out of order.
pub fn run_self_play_with_callback<F>(config: &ArenaConfig, on_game: F) -> Result<(), ArenaError>
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_parallel(config, on_game)
    } else {
        run_sequential(config, on_game)
    }
}

fn report_progress(config: &ArenaConfig, n: usize, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    eprintln!(
        "Game {}/{}: {:?} after {} turns ({:.3}s)",
        n,
        config.num_games,
        game.outcome,
        game.turns.len(),
        started.elapsed().as_secs_f64(),
    );
}

fn run_sequential<F>(config: &ArenaConfig, mut on_game: F) -> Result<(), ArenaError>
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let started = Instant::now();
        let game = play_game(config, i, &mut game_rng(config.seed, i))?;
        report_progress(config, i + 1, &game, started);
        on_game(game);
    }
    Ok(())
}

fn run_parallel<F>(config: &ArenaConfig, mut on_game: F) -> Result<(), ArenaError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.threads).build()?;
    let (tx, rx) = mpsc::channel::<Result<GameRecord, ArenaError>>();

    let config = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config.num_games).into_par_iter().for_each_with(tx, |tx, i| {
                let started = Instant::now();
                let game = play_game(&config, i, &mut game_rng(config.seed, i));
                if let Ok(game) = &game {
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    report_progress(&config, n, game, started);
                }
                let _ = tx.send(game);
            });
        });
    });

    let mut first_error = None;
    for game in rx {
        match game {
            Ok(game) => on_game(game),
            Err(e) => {
                log::error!("{}", e);
                first_error.get_or_insert(e);
            }
        }
    }

    handle.join().map_err(|_| ArenaError::WorkerPanicked)?;
    first_error.map_or(Ok(()), Err)
}

/// Win/draw counts and mean game length.
pub fn summarize(games: &[GameRecord]) -> ArenaSummary {
    let mut summary = ArenaSummary {
        games: games.len(),
        ..ArenaSummary::default()
    };
    let mut total_turns = 0usize;
    for game in games {
        total_turns += game.turns.len();
        match game.outcome {
            Outcome::BlueWins => summary.blue_wins += 1,
            Outcome::RedWins => summary.red_wins += 1,
            Outcome::Draw | Outcome::NotFinished => summary.draws += 1,
        }
    }
    if !games.is_empty() {
        summary.avg_turns = total_turns as f64 / games.len() as f64;
    }
    summary
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}
