//! Position string encoding and decoding.
//!
//! A position is written as `<side>:<row0>/<row1>/.../<row7>`, rows from
//! the top of the board, eight cells per row: `.` for empty, `r`/`b` for
//! men and `R`/`B` for kings. The string is an in-memory exchange format
//! for the CLI and tests; nothing is written to disk.

use thiserror::Error;

use crate::board::{Board, Piece, Side, Square, BOARD_SIZE};

/// Errors that can occur during position parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected '<side>:<rows>', got '{0}'")]
    MissingSideField(String),

    #[error("invalid side character: '{0}'")]
    InvalidSide(String),

    #[error("expected 8 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {0} has {1} cells, expected 8")]
    WrongRowLength(usize, usize),

    #[error("unknown cell character: '{0}'")]
    UnknownCell(char),

    #[error("piece on non-playable square at row {0}, column {1}")]
    UnplayableSquare(u8, u8),
}

/// Parses a position string into a board and the side to move.
pub fn parse_fen(s: &str) -> Result<(Board, Side), FenError> {
    let s = s.trim();
    let (side_text, rows_text) = s
        .split_once(':')
        .ok_or_else(|| FenError::MissingSideField(s.to_string()))?;

    let side = match side_text {
        "r" => Side::Red,
        "b" => Side::Black,
        other => return Err(FenError::InvalidSide(other.to_string())),
    };

    let rows: Vec<&str> = rows_text.split('/').collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(FenError::WrongRowCount(rows.len()));
    }

    let mut board = Board::empty();
    for (row, row_text) in rows.iter().enumerate() {
        let cells: Vec<char> = row_text.chars().collect();
        if cells.len() != BOARD_SIZE as usize {
            return Err(FenError::WrongRowLength(row, cells.len()));
        }
        for (col, &c) in cells.iter().enumerate() {
            if c == '.' {
                continue;
            }
            let piece = Piece::from_fen_char(c).ok_or(FenError::UnknownCell(c))?;
            let sq = Square::new(row as u8, col as u8);
            if !board.place(sq, piece) {
                return Err(FenError::UnplayableSquare(row as u8, col as u8));
            }
        }
    }

    Ok((board, side))
}

/// Encodes a board and side to move as a position string.
pub fn encode_fen(board: &Board, to_move: Side) -> String {
    let mut out = String::with_capacity(74);
    out.push(to_move.fen_char());
    out.push(':');
    for row in 0..BOARD_SIZE {
        if row > 0 {
            out.push('/');
        }
        for col in 0..BOARD_SIZE {
            match board.piece_at(Square::new(row, col)) {
                Some(p) => out.push(p.fen_char()),
                None => out.push('.'),
            }
        }
    }
    out
}

/// The starting position.
pub const INITIAL_FEN: &str =
    "r:.b.b.b.b/b.b.b.b./.b.b.b.b/......../......../r.r.r.r./.r.r.r.r/r.r.r.r.";
