//! Board representation and core game types.
//!
//! Contains the data structures for sides, pieces, squares, moves, and
//! the 8x8 grid with its piece-count bookkeeping.

pub mod grid;
pub mod moves;
pub mod piece;
pub mod square;

pub use grid::{Board, PIECES_PER_SIDE};
pub use moves::Move;
pub use piece::{Piece, Rank, Side};
pub use square::{Square, BOARD_SIZE};
