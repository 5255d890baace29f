//! tankfield library.
//!
//! Exposes the battlefield representation, legality checks, turn resolver,
//! wire codecs, and the bot and harness drivers for use by the binaries,
//! integration tests, and benchmarks.

pub mod arena;
pub mod board;
pub mod drive;
pub mod engine;
pub mod movegen;
pub mod protocol;
pub mod resolve;
