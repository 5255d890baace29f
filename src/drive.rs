//! Two-process match harness.
//!
//! Spawns one bot process per side, sends both the same encoded field,
//! then relays each side's answer to the other as a one-item history while
//! keeping its own authoritative `Battlefield` to decide when the game ends.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::Serialize;

use crate::board::{Action, Side, ALL_SIDES, TANKS_PER_SIDE};
use crate::movegen::legality::IllegalAction;
use crate::protocol::bitfield::{BrickMap, LayoutError};
use crate::protocol::botzone::{
    format_request, parse_response, InitPayload, ProtocolError, Request, RequestItem, Response, SideActions,
    KEEP_RUNNING,
};
use crate::protocol::layout::battlefield_from_bricks;
use crate::resolve::{outcome, resolve_turn, Outcome};

/// Match options: the command line of each bot and the starting bricks.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    pub blue: Vec<String>,
    pub red: Vec<String>,
    pub bricks: BrickMap,
}

impl Default for DriveConfig {
    fn default() -> Self {
        DriveConfig {
            blue: vec!["tankfield".to_string()],
            red: vec!["tankfield".to_string()],
            bricks: BrickMap::empty(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("empty command for {0}")]
    EmptyCommand(Side),

    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} bot closed its output")]
    BotExited(Side),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("invalid field: {0}")]
    Layout(#[from] LayoutError),

    #[error("turn rejected: {0}")]
    Rejected(#[from] IllegalAction),
}

/// A running bot connected through pipes.
pub struct BotProcess {
    side: Side,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl BotProcess {
    pub fn spawn(command: &[String], side: Side) -> Result<Self, DriveError> {
        let (program, args) = command.split_first().ok_or(DriveError::EmptyCommand(side))?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| DriveError::Spawn {
                command: command.join(" "),
                source,
            })?;
        let stdin = child.stdin.take().ok_or(DriveError::BotExited(side))?;
        let stdout = child.stdout.take().ok_or(DriveError::BotExited(side))?;
        log::info!("started {} bot: {}", side, command.join(" "));
        Ok(BotProcess {
            side,
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Writes one request line.
    pub fn send(&mut self, request: &Request) -> Result<(), DriveError> {
        let line = format_request(request)?;
        log::debug!("-> {}: {}", self.side, line);
        writeln!(self.stdin, "{}", line)?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Reads the next response, skipping blank lines and the keep-running sentinel.
    pub fn read_response(&mut self) -> Result<Response, DriveError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.stdout.read_line(&mut line)? == 0 {
                return Err(DriveError::BotExited(self.side));
            }
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed == KEEP_RUNNING {
                continue;
            }
            log::debug!("<- {}: {}", self.side, trimmed);
            return Ok(parse_response(trimmed)?);
        }
    }
}

impl Drop for BotProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Result of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub outcome: Outcome,
    /// Number of turns resolved.
    pub turns: u32,
    /// Raw answers per turn, indexed by side.
    pub history: Vec<[SideActions; 2]>,
}

/// Plays one match between the two configured bots.
pub fn run_match(config: &DriveConfig) -> Result<MatchResult, DriveError> {
    run_match_with_callback(config, |_, _| {})
}

/// Like `run_match`, calling `on_turn(turn, answers)` after each resolved turn.
pub fn run_match_with_callback<F>(config: &DriveConfig, mut on_turn: F) -> Result<MatchResult, DriveError>
where
    F: FnMut(u32, &[SideActions; 2]),
{
    let mut state = battlefield_from_bricks(&config.bricks)?;
    let mut bots = [
        BotProcess::spawn(&config.blue, Side::Blue)?,
        BotProcess::spawn(&config.red, Side::Red)?,
    ];

    for bot in bots.iter_mut() {
        let init = InitPayload::new(&config.bricks, bot.side());
        bot.send(&Request::Single(RequestItem::Init(init)))?;
    }

    let mut history = Vec::new();
    loop {
        let mut answers = [[Action::Stay; TANKS_PER_SIDE]; 2];
        for side in ALL_SIDES {
            answers[side.index()] = bots[side.index()].read_response()?.response;
        }
        for side in ALL_SIDES {
            state.set_actions_or_stay(side, answers[side.index()]);
        }
        let report = resolve_turn(&mut state)?;
        on_turn(report.turn, &answers);
        history.push(answers);

        let result = outcome(&state);
        if result.is_finished() {
            log::info!("match over after turn {}: {:?}", report.turn, result);
            return Ok(MatchResult {
                outcome: result,
                turns: report.turn,
                history,
            });
        }

        for side in ALL_SIDES {
            let theirs = answers[side.opponent().index()];
            bots[side.index()].send(&Request::opponent_turn(theirs))?;
        }
    }
}
