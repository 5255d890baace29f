//! Integration tests for the tankfield bot binary.
//!
//! Spawns the bot process, feeds it protocol lines on stdin, and checks the
//! responses on stdout. The last tests pit two bot processes against each
//! other through the match driver.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

use tankfield::board::Side;
use tankfield::drive::{run_match, DriveConfig};
use tankfield::protocol::bitfield::BrickMap;
use tankfield::protocol::botzone::{parse_response, KEEP_RUNNING};
use tankfield::resolve::MAX_TURNS;

const BOT: &str = env!("CARGO_BIN_EXE_tankfield");

/// Sends lines to the bot and collects stdout until it exits.
fn run_bot(args: &[&str], lines: &[&str]) -> (Vec<String>, bool) {
    let mut child = Command::new(BOT)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start tankfield");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for line in lines {
        // The bot may already have exited in single-shot mode.
        let _ = writeln!(stdin, "{}", line);
    }
    let _ = stdin.flush();
    drop(stdin);

    let out: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    (out, status.success())
}

#[test]
fn init_gets_response_and_sentinel() {
    let (lines, ok) = run_bot(&["--seed", "5"], &[r#"{"field":[0,0,0],"mySide":0}"#]);
    assert!(ok);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], KEEP_RUNNING);
    let resp = parse_response(&lines[0]).unwrap();
    assert_eq!(resp.response.len(), 2);
}

#[test]
fn long_running_session() {
    let (lines, ok) = run_bot(
        &["--seed", "5"],
        &[
            r#"{"field":[62917632,101424,837180],"mySide":1}"#,
            r#"{"requests":[[-1,-1]],"responses":[]}"#,
            r#"{"requests":[[-1,-1]],"responses":[]}"#,
        ],
    );
    assert!(ok);
    assert_eq!(lines.len(), 6);
    for pair in lines.chunks(2) {
        assert!(parse_response(&pair[0]).is_ok());
        assert_eq!(pair[1], KEEP_RUNNING);
    }
}

#[test]
fn single_shot_history_replay() {
    let history = r#"{"requests":[{"field":[0,0,0],"mySide":0},[-1,-1]],"responses":[[2,-1]],"data":"memo"}"#;
    let (lines, ok) = run_bot(&["--exit-after-output", "--seed", "9"], &[history]);
    assert!(ok);
    assert_eq!(lines.len(), 1);
    let resp = parse_response(&lines[0]).unwrap();
    assert_eq!(resp.data, serde_json::json!("memo"));
    assert_eq!(resp.debug, serde_json::json!("turn 2"));
}

#[test]
fn malformed_input_exits_with_error() {
    let (lines, ok) = run_bot(&[], &["this is not json"]);
    assert!(!ok);
    assert!(lines.is_empty());
}

#[test]
fn actions_before_field_exit_with_error() {
    let (_, ok) = run_bot(&[], &["[-1,-1]"]);
    assert!(!ok);
}

#[test]
fn bot_against_itself_finishes() {
    let config = DriveConfig {
        blue: vec![BOT.to_string(), "--seed".to_string(), "11".to_string()],
        red: vec![BOT.to_string(), "--seed".to_string(), "12".to_string()],
        bricks: BrickMap::empty(),
    };
    let result = run_match(&config).unwrap();
    assert!(result.outcome.is_finished());
    assert!(result.turns >= 1 && result.turns <= MAX_TURNS);
    assert_eq!(result.history.len(), result.turns as usize);
}

#[test]
fn bot_against_itself_on_bricks() {
    let bricks = BrickMap::from_fields([62917632, 101424, 837180]).unwrap();
    let config = DriveConfig {
        blue: vec![BOT.to_string(), "--seed".to_string(), "3".to_string()],
        red: vec![BOT.to_string(), "--seed".to_string(), "4".to_string()],
        bricks,
    };
    let result = run_match(&config).unwrap();
    assert!(result.outcome.is_finished());
    // Every shot is followed by a non-shot for the same tank.
    for pair in result.history.windows(2) {
        for side in [Side::Blue, Side::Red] {
            for slot in 0..2 {
                let (a, b) = (pair[0][side.index()][slot], pair[1][side.index()][slot]);
                assert!(!(a.is_shoot() && b.is_shoot()));
            }
        }
    }
}
