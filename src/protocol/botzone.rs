//! Botzone JSON line protocol.
//!
//! Every input line is one JSON value:
//!
//! - `{"field": [a, b, c], "mySide": 0|1}` starts a game on the encoded map;
//! - `[a0, a1]` is the opponent's actions for the turn just played;
//! - `{"requests": [...], "responses": [...], "data": .., "globaldata": ..}`
//!   is a history to replay, where `requests[i]` is one of the two forms above
//!   and `responses[i]` is the bot's own reply to it.
//!
//! Every output turn is one JSON object
//! `{"response": [a0, a1], "debug": .., "data": .., "globaldata": ..}`,
//! followed by `KEEP_RUNNING` when the bot stays alive for the next turn.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::bitfield::{BrickMap, LayoutError};
use crate::board::{Action, Side, TANKS_PER_SIDE};
use crate::movegen::legality::IllegalAction;

/// Sentinel line telling the judge to keep the process alive.
pub const KEEP_RUNNING: &str = ">>>BOTZONE_REQUEST_KEEP_RUNNING<<<";

/// Both actions of one side for one turn.
pub type SideActions = [Action; TANKS_PER_SIDE];

/// Errors raised at the protocol boundary.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid field: {0}")]
    Layout(#[from] LayoutError),

    #[error("actions received before any field")]
    NoPosition,

    #[error("history has {responses} responses for {requests} requests")]
    HistoryMismatch { requests: usize, responses: usize },

    #[error("turn rejected: {0}")]
    Rejected(#[from] IllegalAction),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Game start payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitPayload {
    pub field: [u64; 3],
    #[serde(rename = "mySide")]
    pub my_side: Side,
}

impl InitPayload {
    pub fn new(bricks: &BrickMap, my_side: Side) -> Self {
        InitPayload {
            field: bricks.to_fields(),
            my_side,
        }
    }

    /// Decodes the brick map.
    pub fn bricks(&self) -> Result<BrickMap, LayoutError> {
        BrickMap::from_fields(self.field)
    }
}

/// One entry of the request stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestItem {
    Init(InitPayload),
    Actions(SideActions),
}

/// A full input line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Request {
    History {
        requests: Vec<RequestItem>,
        #[serde(default)]
        responses: Vec<SideActions>,
        #[serde(default)]
        data: Option<Value>,
        #[serde(default)]
        globaldata: Option<Value>,
    },
    Single(RequestItem),
}

impl Request {
    /// Wraps the opponent's latest reply the way a long-running judge sends it.
    pub fn opponent_turn(actions: SideActions) -> Self {
        Request::History {
            requests: vec![RequestItem::Actions(actions)],
            responses: Vec::new(),
            data: None,
            globaldata: None,
        }
    }
}

/// One output turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub response: SideActions,
    #[serde(default)]
    pub debug: Value,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub globaldata: Value,
}

/// Parses one input line.
pub fn parse_request(line: &str) -> Result<Request, ProtocolError> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Parses one output line, as a harness reading a bot does.
pub fn parse_response(line: &str) -> Result<Response, ProtocolError> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Serializes a request to a single line (no trailing newline).
pub fn format_request(request: &Request) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(request)?)
}

/// Serializes a response to a single line (no trailing newline).
pub fn format_response(response: &Response) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(response)?)
}
