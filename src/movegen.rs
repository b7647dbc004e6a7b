//! Legal move generation.
//!
//! Enumerates simple moves and jumps for a single piece or a whole side,
//! enforcing the mandatory-capture rule: any available jump suppresses
//! simple moves, first per piece and then across the side.

use crate::board::{Board, Move, Piece, Side, Square};

/// Returns the diagonal directions available to a piece: the owner's two
/// forward diagonals for a man, all four for a king.
fn directions(piece: Piece) -> Vec<(i8, i8)> {
    let fwd = piece.side.forward();
    let mut dirs = vec![(fwd, -1), (fwd, 1)];
    if piece.is_king() {
        dirs.push((-fwd, -1));
        dirs.push((-fwd, 1));
    }
    dirs
}

/// Enumerates the simple moves for the piece at `from`: adjacent empty
/// squares along its diagonals. Empty if the square holds no piece.
pub fn slides_for_piece(board: &Board, from: Square) -> Vec<Move> {
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut moves = Vec::new();
    for (dr, dc) in directions(piece) {
        if let Some(to) = from.offset(dr, dc) {
            if board.piece_at(to).is_none() {
                moves.push(Move::slide(from, to));
            }
        }
    }
    moves
}

/// Enumerates the jumps for the piece at `from`: an adjacent opposing
/// piece with an empty on-board square directly beyond it.
pub fn captures_for_piece(board: &Board, from: Square) -> Vec<Move> {
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut jumps = Vec::new();
    for (dr, dc) in directions(piece) {
        let over = match from.offset(dr, dc) {
            Some(sq) => sq,
            None => continue,
        };
        let to = match from.offset(dr * 2, dc * 2) {
            Some(sq) => sq,
            None => continue,
        };
        if board.is_side_at(over, piece.side.opponent()) && board.piece_at(to).is_none() {
            jumps.push(Move::jump(from, over, to));
        }
    }
    jumps
}

/// Returns the legal moves for the piece at `from` in isolation.
///
/// If the piece has any jump available, only its jumps are returned and
/// simple moves are suppressed. This is local per-piece behavior; the
/// side-wide mandatory-capture rule lives in [`moves_for_side`].
pub fn moves_for_piece(board: &Board, from: Square) -> Vec<Move> {
    let jumps = captures_for_piece(board, from);
    if !jumps.is_empty() {
        jumps
    } else {
        slides_for_piece(board, from)
    }
}

/// Returns true if any piece of the side has a jump available.
pub fn side_has_capture(board: &Board, side: Side) -> bool {
    board
        .squares_with(side)
        .into_iter()
        .any(|sq| !captures_for_piece(board, sq).is_empty())
}

/// Returns the legal moves for the whole side.
///
/// If any piece of the side can jump, the result contains only jumps,
/// from every piece that has one; pieces with only simple moves contribute
/// nothing. Otherwise the result is the union of all simple moves.
pub fn moves_for_side(board: &Board, side: Side) -> Vec<Move> {
    let must_jump = side_has_capture(board, side);

    let mut moves = Vec::new();
    for sq in board.squares_with(side) {
        if must_jump {
            moves.extend(captures_for_piece(board, sq));
        } else {
            moves.extend(slides_for_piece(board, sq));
        }
    }
    moves
}
