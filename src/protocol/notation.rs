//! Move notation encoding and decoding.
//!
//! Moves are written as the two square names joined by `-` for a simple
//! move or `x` for a jump: `a3-b4`, `b4xd6`. Parsing accepts either
//! separator since the jumped square is recovered from the legal set, not
//! from the text.

use thiserror::Error;

use crate::board::{Move, Square};

/// Errors that can occur when parsing move text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("expected '<from>-<to>' or '<from>x<to>', got '{0}'")]
    MalformedMove(String),

    #[error("unknown square '{0}'")]
    UnknownSquare(String),
}

/// A parsed move request: the squares named by the user, before the
/// engine resolves them against its legal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
}

/// Parses move text like `a3-b4` or `b4xd6` into a [`MoveRequest`].
pub fn parse_move(s: &str) -> Result<MoveRequest, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }

    let (from_text, to_text) = s
        .split_once(|c| c == '-' || c == 'x')
        .ok_or_else(|| NotationError::MalformedMove(s.to_string()))?;

    let from = Square::from_name(from_text)
        .ok_or_else(|| NotationError::UnknownSquare(from_text.to_string()))?;
    let to = Square::from_name(to_text)
        .ok_or_else(|| NotationError::UnknownSquare(to_text.to_string()))?;

    Ok(MoveRequest { from, to })
}

/// Formats a move in canonical notation: `x` for jumps, `-` otherwise.
pub fn format_move(mv: &Move) -> String {
    let sep = if mv.is_jump() { 'x' } else { '-' };
    format!("{}{}{}", mv.from, sep, mv.to)
}

/// Formats a move list as a space-separated line.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(format_move)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats the moves of one turn as a single token.
///
/// A lone move keeps its canonical form; a capture chain strings the
/// landing squares together: `b4xd6xf8`.
pub fn format_turn(moves: &[Move]) -> String {
    match moves {
        [] => String::new(),
        [only] => format_move(only),
        [first, rest @ ..] => {
            let mut out = format!("{}x{}", first.from, first.to);
            for mv in rest {
                out.push('x');
                out.push_str(&mv.to.to_string());
            }
            out
        }
    }
}
