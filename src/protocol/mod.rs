//! Text protocol handling.
//!
//! This module implements parsing and serialization for the session's
//! text surface: position strings, algebraic move notation, and the
//! command parser for the main loop.

pub mod fen;
pub mod notation;
pub mod parser;

pub use fen::{encode_fen, parse_fen, FenError, INITIAL_FEN};
pub use notation::{
    format_move, format_moves, format_turn, parse_move, MoveRequest, NotationError,
};
pub use parser::{parse_command, Command};
