//! Draughtsman engine library.
//!
//! Exposes the board representation, move generation, game state machine,
//! opponent policy, and protocol modules for use by integration tests and
//! the binary entry points.

pub mod board;
pub mod game;
pub mod movegen;
pub mod policy;
pub mod protocol;
pub mod selfplay;
pub mod session;
