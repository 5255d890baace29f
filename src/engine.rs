//! Bot session state.
//!
//! Holds the battlefield as this bot sees it, which side it plays, and the
//! opaque `data`/`globaldata` the judge round-trips. Each input line is
//! replayed onto the state, then the bot answers with random legal actions
//! and submits them so the opponent's next message can resolve the turn.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::board::{Battlefield, Side};
use crate::movegen::random_actions;
use crate::protocol::botzone::{
    format_response, parse_request, ProtocolError, Request, RequestItem, Response, SideActions, KEEP_RUNNING,
};
use crate::protocol::layout::battlefield_from_bricks;
use crate::resolve::{outcome, resolve_turn};

/// Session options.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Print the keep-running sentinel and stay alive after each answer.
    pub keep_running: bool,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            keep_running: true,
            seed: 0,
        }
    }
}

/// Holds the mutable state of the bot between input lines.
pub struct Engine {
    pub position: Option<Battlefield>,
    pub my_side: Side,
    pub data: Value,
    pub globaldata: Value,
    config: EngineConfig,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = if config.seed != 0 {
            SmallRng::seed_from_u64(config.seed)
        } else {
            SmallRng::from_entropy()
        };
        Engine {
            position: None,
            my_side: Side::Blue,
            data: Value::Null,
            globaldata: Value::Null,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handles one input line and writes the answer to `out`.
    ///
    /// Returns whether the process should keep reading. Blank lines are
    /// skipped and produce no output.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool, ProtocolError> {
        if line.trim().is_empty() {
            return Ok(true);
        }
        match parse_request(line)? {
            Request::Single(item) => self.apply_opponent(item)?,
            Request::History {
                requests,
                responses,
                data,
                globaldata,
            } => {
                self.replay(requests, responses)?;
                if let Some(data) = data {
                    self.data = data;
                }
                if let Some(globaldata) = globaldata {
                    self.globaldata = globaldata;
                }
            }
        }

        let actions = self.respond(out)?;
        if let Some(state) = self.position.as_mut() {
            state.set_actions_or_stay(self.my_side, actions);
        }
        Ok(self.config.keep_running)
    }

    /// Replays a judge history: `requests[i]` comes from the opponent and
    /// `responses[i]` is what this bot answered to it.
    fn replay(&mut self, requests: Vec<RequestItem>, responses: Vec<SideActions>) -> Result<(), ProtocolError> {
        let n = requests.len();
        if responses.len() + 1 < n {
            return Err(ProtocolError::HistoryMismatch {
                requests: n,
                responses: responses.len(),
            });
        }
        for (i, item) in requests.into_iter().enumerate() {
            self.apply_opponent(item)?;
            if i + 1 < n {
                let state = self.position.as_mut().ok_or(ProtocolError::NoPosition)?;
                state.set_actions_or_stay(self.my_side, responses[i]);
            }
        }
        Ok(())
    }

    fn apply_opponent(&mut self, item: RequestItem) -> Result<(), ProtocolError> {
        match item {
            RequestItem::Init(payload) => {
                let bricks = payload.bricks()?;
                let state = battlefield_from_bricks(&bricks)?;
                log::info!("new game as {} with {} bricks", payload.my_side, bricks.len());
                log::debug!("starting field:\n{}", state);
                self.my_side = payload.my_side;
                self.position = Some(state);
            }
            RequestItem::Actions(actions) => {
                let my_side = self.my_side;
                let state = self.position.as_mut().ok_or(ProtocolError::NoPosition)?;
                state.set_actions_or_stay(my_side.opponent(), actions);
                // Own slots never submitted (a history cut short) default to stay.
                let mine = [0, 1].map(|slot| state.pending_action(my_side, slot));
                state.set_actions_or_stay(my_side, mine);
                let report = resolve_turn(state).map_err(|e| {
                    log::error!("turn {} rejected: {}", state.current_turn(), e);
                    ProtocolError::Rejected(e)
                })?;
                log::debug!("turn {} resolved, {} destroyed", report.turn, report.destroyed.len());
                let result = outcome(state);
                if result.is_finished() {
                    log::info!("game over after turn {}: {:?}", report.turn, result);
                }
            }
        }
        Ok(())
    }

    /// Picks and writes this turn's answer.
    fn respond<W: Write>(&mut self, out: &mut W) -> Result<SideActions, ProtocolError> {
        let state = self.position.as_ref().ok_or(ProtocolError::NoPosition)?;
        let actions = random_actions(state, self.my_side, &mut self.rng);
        let response = Response {
            response: actions,
            debug: Value::String(format!("turn {}", state.current_turn())),
            data: self.data.clone(),
            globaldata: self.globaldata.clone(),
        };
        writeln!(out, "{}", format_response(&response)?)?;
        if self.config.keep_running {
            writeln!(out, "{}", KEEP_RUNNING)?;
        }
        out.flush()?;
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Action, Pos};
    use crate::movegen::is_legal;
    use crate::protocol::botzone::parse_response;

    fn seeded(keep_running: bool) -> Engine {
        Engine::new(EngineConfig { keep_running, seed: 7 })
    }

    fn lines(out: &[u8]) -> Vec<String> {
        String::from_utf8(out.to_vec()).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn new_engine_has_no_state() {
        let engine = Engine::default();
        assert!(engine.position.is_none());
        assert_eq!(engine.data, Value::Null);
        assert!(engine.config().keep_running);
    }

    #[test]
    fn init_produces_legal_response_and_sentinel() {
        let mut engine = seeded(true);
        let mut out = Vec::new();
        let keep = engine
            .handle_line(r#"{"field": [0, 0, 0], "mySide": 1}"#, &mut out)
            .unwrap();
        assert!(keep);

        let lines = lines(&out);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], KEEP_RUNNING);
        let resp = parse_response(&lines[0]).unwrap();
        assert_eq!(engine.my_side, Side::Red);

        let state = engine.position.as_ref().unwrap();
        for (slot, &a) in resp.response.iter().enumerate() {
            assert_eq!(state.pending_action(Side::Red, slot), a);
        }
        // Fresh state: nothing has been played yet.
        let fresh = Battlefield::new();
        for (slot, &a) in resp.response.iter().enumerate() {
            assert!(is_legal(&fresh, Side::Red, slot, a));
        }
    }

    #[test]
    fn single_shot_mode_has_no_sentinel() {
        let mut engine = seeded(false);
        let mut out = Vec::new();
        let keep = engine
            .handle_line(r#"{"requests":[{"field":[0,0,0],"mySide":0}],"responses":[]}"#, &mut out)
            .unwrap();
        assert!(!keep);
        assert_eq!(lines(&out).len(), 1);
    }

    #[test]
    fn history_replay_applies_both_sides() {
        let mut engine = seeded(false);
        let mut out = Vec::new();
        let line = r#"{"requests":[{"field":[0,0,0],"mySide":0},[-1,-1]],"responses":[[2,-1]],"data":{"k":1}}"#;
        engine.handle_line(line, &mut out).unwrap();

        let state = engine.position.as_ref().unwrap();
        assert_eq!(state.current_turn(), 2);
        assert_eq!(state.tank(Side::Blue, 0).pos, Pos::new(2, 1));
        assert_eq!(state.last_action(Side::Blue, 0), Action::Down);
        assert_eq!(state.last_action(Side::Red, 1), Action::Stay);

        let resp = parse_response(&lines(&out)[0]).unwrap();
        assert_eq!(resp.data, serde_json::json!({"k": 1}));
        assert_eq!(resp.debug, Value::String("turn 2".to_string()));
    }

    #[test]
    fn long_running_turns_advance() {
        let mut engine = seeded(true);
        let mut out = Vec::new();
        engine.handle_line(r#"{"field":[0,0,0],"mySide":0}"#, &mut out).unwrap();
        for turn in 1..=5u32 {
            assert_eq!(engine.position.as_ref().unwrap().current_turn(), turn);
            engine
                .handle_line(r#"{"requests":[[-1,-1]],"responses":[]}"#, &mut out)
                .unwrap();
        }
        assert_eq!(engine.position.as_ref().unwrap().current_turn(), 6);
        assert_eq!(lines(&out).len(), 12);
    }

    #[test]
    fn illegal_opponent_actions_become_stay() {
        let mut engine = seeded(true);
        let mut out = Vec::new();
        engine.handle_line(r#"{"field":[0,0,0],"mySide":0}"#, &mut out).unwrap();
        // Red slot 0 at (6,8): Down leaves the field.
        engine.handle_line("[2, -1]", &mut out).unwrap();
        let state = engine.position.as_ref().unwrap();
        assert_eq!(state.last_action(Side::Red, 0), Action::Stay);
        assert_eq!(state.tank(Side::Red, 0).pos, Pos::new(6, 8));
    }

    #[test]
    fn actions_before_init_rejected() {
        let mut engine = seeded(true);
        let mut out = Vec::new();
        let err = engine.handle_line("[-1, -1]", &mut out).unwrap_err();
        assert!(matches!(err, ProtocolError::NoPosition));
        assert!(out.is_empty());
    }

    #[test]
    fn short_history_rejected() {
        let mut engine = seeded(true);
        let mut out = Vec::new();
        let line = r#"{"requests":[{"field":[0,0,0],"mySide":0},[-1,-1],[-1,-1]],"responses":[[-1,-1]]}"#;
        let err = engine.handle_line(line, &mut out).unwrap_err();
        assert!(matches!(err, ProtocolError::HistoryMismatch { requests: 3, responses: 1 }));
    }

    #[test]
    fn bad_field_rejected() {
        let mut engine = seeded(true);
        let mut out = Vec::new();
        let err = engine
            .handle_line(r#"{"field":[134217728,0,0],"mySide":0}"#, &mut out)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Layout(_)));
    }

    #[test]
    fn blank_line_is_ignored() {
        let mut engine = seeded(true);
        let mut out = Vec::new();
        assert!(engine.handle_line("   ", &mut out).unwrap());
        assert!(out.is_empty());
    }
}
