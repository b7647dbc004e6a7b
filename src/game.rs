//! Game state management.
//!
//! Holds the board and turn state for one game, validates submitted moves
//! against the current legal set, applies them (relocation, capture
//! removal, crowning, capture-chain continuation), and decides when the
//! game is over. All state lives in the `Game` instance; callers drive it
//! through `submit_move` and the read-only queries.

use thiserror::Error;

use crate::board::{Board, Move, Piece, Rank, Side, Square};
use crate::movegen;

/// Where the game stands between submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// The side to move may play any move from its legal set.
    Playing { side: Side },
    /// The side to move must continue jumping with the piece at `piece`.
    CaptureChain { side: Side, piece: Square },
    /// The game is over.
    Finished { winner: Side },
}

/// The result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The same side must jump again with the piece now at `piece`.
    ChainContinues { piece: Square },
    /// The turn passed to the other side.
    TurnEnded { next: Side },
    /// The move ended the game.
    GameOver { winner: Side },
}

/// A rejected submission. The game state is unchanged in every case.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("the game is over")]
    GameFinished,

    #[error("no piece of the side to move at {0}")]
    NotYourPiece(Square),

    #[error("move is not legal in the current position")]
    IllegalMove,

    #[error("a capture is available and must be taken")]
    CaptureRequired,

    #[error("the capture sequence must continue from {0}")]
    ChainPieceRequired(Square),
}

/// A single game of draughts.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    state: TurnState,
    must_capture: bool,
}

impl Game {
    /// Creates a game at the starting position with Red to move.
    pub fn new() -> Game {
        Game::from_position(Board::starting(), Side::Red)
    }

    /// Creates a game from an arbitrary position.
    ///
    /// If the side to move has no legal moves, the game begins already
    /// finished with the other side as winner.
    pub fn from_position(board: Board, to_move: Side) -> Game {
        let legal = movegen::moves_for_side(&board, to_move);
        if legal.is_empty() {
            return Game {
                board,
                state: TurnState::Finished { winner: to_move.opponent() },
                must_capture: false,
            };
        }
        Game {
            board,
            state: TurnState::Playing { side: to_move },
            must_capture: legal.iter().any(|m| m.is_jump()),
        }
    }

    /// Resets to the starting position with Red to move.
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    /// Returns the board for rendering and inspection.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current turn state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Returns the side to move, or `None` once the game is over.
    pub fn side_to_move(&self) -> Option<Side> {
        match self.state {
            TurnState::Playing { side } | TurnState::CaptureChain { side, .. } => Some(side),
            TurnState::Finished { .. } => None,
        }
    }

    /// Returns true if the side to move is obliged to capture.
    pub fn must_capture(&self) -> bool {
        self.must_capture
    }

    /// Returns the square a capture chain is pinned to, if one is active.
    pub fn chain_square(&self) -> Option<Square> {
        match self.state {
            TurnState::CaptureChain { piece, .. } => Some(piece),
            _ => None,
        }
    }

    /// Returns the number of pieces the side has left.
    pub fn pieces(&self, side: Side) -> u8 {
        self.board.count(side)
    }

    /// Returns the winner once the game is over.
    pub fn winner(&self) -> Option<Side> {
        match self.state {
            TurnState::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, TurnState::Finished { .. })
    }

    /// Returns the legal moves in the current position: the side's full
    /// mandatory-capture-filtered set, or only the pinned piece's jumps
    /// during a capture chain. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.state {
            TurnState::Playing { side } => movegen::moves_for_side(&self.board, side),
            TurnState::CaptureChain { piece, .. } => {
                movegen::captures_for_piece(&self.board, piece)
            }
            TurnState::Finished { .. } => Vec::new(),
        }
    }

    /// Returns the legal moves originating from one square.
    pub fn moves_from(&self, from: Square) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.from == from)
            .collect()
    }

    /// Looks up the legal move from `from` to `to`, if there is one.
    ///
    /// In draughts the pair uniquely identifies a move, including the
    /// jumped square, so notation-driven callers resolve through this.
    pub fn find_move(&self, from: Square, to: Square) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .find(|m| m.from == from && m.to == to)
    }

    /// Validates and applies a move.
    ///
    /// The move must be a member of the current legal set regardless of
    /// how the caller produced it; on any violation the game state is
    /// left untouched.
    pub fn submit_move(&mut self, mv: Move) -> Result<MoveOutcome, RuleViolation> {
        let side = match self.state {
            TurnState::Finished { .. } => return Err(RuleViolation::GameFinished),
            TurnState::Playing { side } => side,
            TurnState::CaptureChain { side, piece } => {
                if mv.from != piece || !mv.is_jump() {
                    return Err(RuleViolation::ChainPieceRequired(piece));
                }
                side
            }
        };

        let piece = match self.board.piece_at(mv.from) {
            Some(p) if p.side == side => p,
            _ => return Err(RuleViolation::NotYourPiece(mv.from)),
        };

        if !self.legal_moves().contains(&mv) {
            // Distinguish a geometrically valid slide refused only because
            // a capture is mandatory this turn.
            if self.must_capture
                && !mv.is_jump()
                && movegen::slides_for_piece(&self.board, mv.from).contains(&mv)
            {
                return Err(RuleViolation::CaptureRequired);
            }
            return Err(RuleViolation::IllegalMove);
        }

        Ok(self.apply(side, piece, mv))
    }

    /// Applies a validated move and advances the turn state.
    fn apply(&mut self, side: Side, piece: Piece, mv: Move) -> MoveOutcome {
        self.board.remove(mv.from);

        // Crown a man landing on its far row before anything else looks at
        // the piece; crowning this step ends any capture chain.
        let promoted = piece.rank == Rank::Man && mv.to.row() == side.far_row();
        let landed = if promoted { Piece::king(side) } else { piece };
        self.board.place(mv.to, landed);

        if let Some(over) = mv.capture {
            // Removing an already-empty square is a no-op on the counts.
            self.board.remove(over);

            if self.board.count(side.opponent()) == 0 {
                self.state = TurnState::Finished { winner: side };
                self.must_capture = false;
                return MoveOutcome::GameOver { winner: side };
            }

            if !promoted {
                let chain = movegen::captures_for_piece(&self.board, mv.to);
                if !chain.is_empty() {
                    self.state = TurnState::CaptureChain { side, piece: mv.to };
                    self.must_capture = true;
                    return MoveOutcome::ChainContinues { piece: mv.to };
                }
            }
        }

        self.switch_turn(side)
    }

    /// Hands the move to the other side, detecting the no-legal-moves loss.
    fn switch_turn(&mut self, side: Side) -> MoveOutcome {
        let next = side.opponent();
        let legal = movegen::moves_for_side(&self.board, next);
        if legal.is_empty() {
            self.state = TurnState::Finished { winner: side };
            self.must_capture = false;
            return MoveOutcome::GameOver { winner: side };
        }
        self.must_capture = legal.iter().any(|m| m.is_jump());
        self.state = TurnState::Playing { side: next };
        MoveOutcome::TurnEnded { next }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col)
    }

    #[test]
    fn new_game_is_red_to_move() {
        let game = Game::new();
        assert_eq!(game.side_to_move(), Some(Side::Red));
        assert_eq!(game.pieces(Side::Red), 12);
        assert_eq!(game.pieces(Side::Black), 12);
        assert!(!game.must_capture());
        assert!(!game.is_over());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut game = Game::new();
        let mv = game.legal_moves()[0];
        game.submit_move(mv).unwrap();
        game.reset();
        assert_eq!(game.side_to_move(), Some(Side::Red));
        assert_eq!(game.pieces(Side::Red), 12);
        assert_eq!(game.pieces(Side::Black), 12);
        assert!(game.winner().is_none());
    }

    #[test]
    fn simple_move_switches_turn() {
        let mut game = Game::new();
        let mv = Move::slide(sq(5, 0), sq(4, 1));
        let outcome = game.submit_move(mv).unwrap();
        assert_eq!(outcome, MoveOutcome::TurnEnded { next: Side::Black });
        assert_eq!(game.board().piece_at(sq(4, 1)), Some(Piece::man(Side::Red)));
        assert_eq!(game.board().piece_at(sq(5, 0)), None);
    }

    #[test]
    fn submitting_opponent_piece_is_rejected() {
        let mut game = Game::new();
        let mv = Move::slide(sq(2, 1), sq(3, 0));
        assert_eq!(
            game.submit_move(mv),
            Err(RuleViolation::NotYourPiece(sq(2, 1)))
        );
        assert_eq!(game.side_to_move(), Some(Side::Red));
    }

    #[test]
    fn fabricated_move_is_rejected() {
        let mut game = Game::new();
        // A two-square slide the generator would never produce.
        let mv = Move::slide(sq(5, 0), sq(3, 2));
        assert_eq!(game.submit_move(mv), Err(RuleViolation::IllegalMove));
    }

    #[test]
    fn capture_decrements_exactly_one_count() {
        let mut board = Board::empty();
        board.place(sq(5, 0), Piece::man(Side::Red));
        board.place(sq(4, 1), Piece::man(Side::Black));
        board.place(sq(0, 1), Piece::man(Side::Black));
        let mut game = Game::from_position(board, Side::Red);

        let mv = Move::jump(sq(5, 0), sq(4, 1), sq(3, 2));
        game.submit_move(mv).unwrap();
        assert_eq!(game.pieces(Side::Black), 1);
        assert_eq!(game.pieces(Side::Red), 1);
        assert_eq!(game.board().piece_at(sq(4, 1)), None);
    }

    #[test]
    fn mandatory_capture_rejects_slide() {
        let mut board = Board::empty();
        board.place(sq(4, 3), Piece::man(Side::Red));
        board.place(sq(3, 2), Piece::man(Side::Black));
        board.place(sq(6, 1), Piece::man(Side::Red));
        board.place(sq(0, 1), Piece::man(Side::Black));
        let mut game = Game::from_position(board, Side::Red);
        assert!(game.must_capture());

        // The other red piece has a geometrically fine slide.
        let slide = Move::slide(sq(6, 1), sq(5, 2));
        assert_eq!(game.submit_move(slide), Err(RuleViolation::CaptureRequired));

        // A slide of the jumping piece itself is also refused.
        let slide = Move::slide(sq(4, 3), sq(3, 4));
        assert_eq!(game.submit_move(slide), Err(RuleViolation::CaptureRequired));

        let jump = Move::jump(sq(4, 3), sq(3, 2), sq(2, 1));
        assert!(game.submit_move(jump).is_ok());
    }

    #[test]
    fn capture_chain_pins_the_piece() {
        // Red jumps from b4 over c5, landing at d6 with another jump
        // available over e7.
        let mut board = Board::empty();
        board.place(sq(4, 1), Piece::man(Side::Red));
        board.place(sq(3, 2), Piece::man(Side::Black));
        board.place(sq(1, 4), Piece::man(Side::Black));
        board.place(sq(5, 6), Piece::man(Side::Black));
        board.place(sq(7, 6), Piece::man(Side::Red));
        let mut game = Game::from_position(board, Side::Red);

        let first = Move::jump(sq(4, 1), sq(3, 2), sq(2, 3));
        let outcome = game.submit_move(first).unwrap();
        assert_eq!(outcome, MoveOutcome::ChainContinues { piece: sq(2, 3) });
        assert_eq!(game.side_to_move(), Some(Side::Red));
        assert_eq!(game.chain_square(), Some(sq(2, 3)));
        assert!(game.must_capture());

        // The legal set is exactly the pinned piece's jumps.
        assert_eq!(
            game.legal_moves(),
            vec![Move::jump(sq(2, 3), sq(1, 4), sq(0, 5))]
        );

        // Moving the other red piece is refused.
        let other = Move::slide(sq(7, 6), sq(6, 5));
        assert_eq!(
            game.submit_move(other),
            Err(RuleViolation::ChainPieceRequired(sq(2, 3)))
        );

        let second = Move::jump(sq(2, 3), sq(1, 4), sq(0, 5));
        let outcome = game.submit_move(second).unwrap();
        // The chain ends on the far row with a crowning.
        assert_eq!(game.board().piece_at(sq(0, 5)), Some(Piece::king(Side::Red)));
        assert_eq!(outcome, MoveOutcome::TurnEnded { next: Side::Black });
    }

    #[test]
    fn promotion_happens_on_landing() {
        let mut board = Board::empty();
        board.place(sq(1, 2), Piece::man(Side::Red));
        board.place(sq(4, 5), Piece::man(Side::Black));
        let mut game = Game::from_position(board, Side::Red);

        game.submit_move(Move::slide(sq(1, 2), sq(0, 1))).unwrap();
        assert_eq!(game.board().piece_at(sq(0, 1)), Some(Piece::king(Side::Red)));
    }

    #[test]
    fn king_is_not_repromoted() {
        let mut board = Board::empty();
        board.place(sq(1, 2), Piece::king(Side::Red));
        board.place(sq(4, 5), Piece::man(Side::Black));
        let mut game = Game::from_position(board, Side::Red);

        game.submit_move(Move::slide(sq(1, 2), sq(0, 1))).unwrap();
        assert_eq!(game.board().piece_at(sq(0, 1)), Some(Piece::king(Side::Red)));
    }

    #[test]
    fn promotion_ends_capture_chain() {
        // Red jumps onto row 0, is crowned, and a further jump is
        // geometrically available to the new king; the turn still ends.
        let mut board = Board::empty();
        board.place(sq(2, 3), Piece::man(Side::Red));
        board.place(sq(1, 4), Piece::man(Side::Black));
        board.place(sq(1, 6), Piece::man(Side::Black));
        board.place(sq(4, 1), Piece::man(Side::Black));
        let mut game = Game::from_position(board, Side::Red);

        let mv = Move::jump(sq(2, 3), sq(1, 4), sq(0, 5));
        let outcome = game.submit_move(mv).unwrap();
        assert_eq!(outcome, MoveOutcome::TurnEnded { next: Side::Black });
        assert_eq!(game.board().piece_at(sq(0, 5)), Some(Piece::king(Side::Red)));
        assert_eq!(game.chain_square(), None);
        // The skipped jump really was available.
        assert!(!crate::movegen::captures_for_piece(game.board(), sq(0, 5)).is_empty());
    }

    #[test]
    fn unpromoted_capture_with_followup_continues() {
        // The same double-jump shape but ending on row 1, short of the far
        // row, so the chain must continue instead of ending on promotion.
        let mut board = Board::empty();
        board.place(sq(5, 2), Piece::man(Side::Red));
        board.place(sq(4, 3), Piece::man(Side::Black));
        board.place(sq(2, 5), Piece::man(Side::Black));
        board.place(sq(6, 7), Piece::man(Side::Black));
        let mut game = Game::from_position(board, Side::Red);

        let mv = Move::jump(sq(5, 2), sq(4, 3), sq(3, 4));
        let outcome = game.submit_move(mv).unwrap();
        assert_eq!(outcome, MoveOutcome::ChainContinues { piece: sq(3, 4) });
        assert_eq!(
            game.legal_moves(),
            vec![Move::jump(sq(3, 4), sq(2, 5), sq(1, 6))]
        );

        let second = Move::jump(sq(3, 4), sq(2, 5), sq(1, 6));
        let outcome = game.submit_move(second).unwrap();
        assert_eq!(outcome, MoveOutcome::TurnEnded { next: Side::Black });
        assert_eq!(game.board().piece_at(sq(1, 6)), Some(Piece::man(Side::Red)));
    }

    #[test]
    fn capturing_last_piece_wins_immediately() {
        // The captured man is Black's last piece; the win fires before any
        // chain evaluation.
        let mut board = Board::empty();
        board.place(sq(4, 1), Piece::man(Side::Red));
        board.place(sq(3, 2), Piece::man(Side::Black));
        let mut game = Game::from_position(board, Side::Red);

        let mv = Move::jump(sq(4, 1), sq(3, 2), sq(2, 3));
        let outcome = game.submit_move(mv).unwrap();
        assert_eq!(outcome, MoveOutcome::GameOver { winner: Side::Red });
        assert_eq!(game.winner(), Some(Side::Red));
        assert_eq!(game.pieces(Side::Black), 0);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn no_legal_moves_is_a_loss() {
        // A black man wedged against red men: both forward diagonals are
        // occupied and both jump landings blocked or off-board. Red makes
        // an unrelated slide and black, with no legal move, loses.
        let mut board = Board::empty();
        board.place(sq(0, 1), Piece::man(Side::Black));
        board.place(sq(1, 0), Piece::man(Side::Red));
        board.place(sq(1, 2), Piece::man(Side::Red));
        board.place(sq(2, 3), Piece::man(Side::Red));
        board.place(sq(5, 0), Piece::man(Side::Red));
        let mut game = Game::from_position(board, Side::Red);

        let outcome = game.submit_move(Move::slide(sq(5, 0), sq(4, 1))).unwrap();
        assert_eq!(outcome, MoveOutcome::GameOver { winner: Side::Red });
        assert_eq!(game.winner(), Some(Side::Red));
    }

    #[test]
    fn from_position_detects_lost_position() {
        let mut board = Board::empty();
        board.place(sq(0, 1), Piece::man(Side::Black));
        board.place(sq(1, 0), Piece::man(Side::Red));
        board.place(sq(1, 2), Piece::man(Side::Red));
        board.place(sq(2, 3), Piece::man(Side::Red));
        let game = Game::from_position(board, Side::Black);
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Side::Red));
    }

    #[test]
    fn submissions_after_game_over_are_rejected() {
        let mut board = Board::empty();
        board.place(sq(4, 1), Piece::man(Side::Red));
        board.place(sq(3, 2), Piece::man(Side::Black));
        let mut game = Game::from_position(board, Side::Red);
        game.submit_move(Move::jump(sq(4, 1), sq(3, 2), sq(2, 3)))
            .unwrap();

        let mv = Move::slide(sq(2, 3), sq(1, 2));
        assert_eq!(game.submit_move(mv), Err(RuleViolation::GameFinished));
    }

    #[test]
    fn rejection_leaves_state_untouched() {
        let mut game = Game::new();
        let before = game.clone();
        let _ = game.submit_move(Move::slide(sq(2, 1), sq(3, 0)));
        let _ = game.submit_move(Move::slide(sq(5, 0), sq(3, 2)));
        assert_eq!(game.board(), before.board());
        assert_eq!(game.state(), before.state());
    }

    #[test]
    fn moves_from_groups_by_origin() {
        let game = Game::new();
        let from_a3 = game.moves_from(sq(5, 0));
        assert_eq!(from_a3, vec![Move::slide(sq(5, 0), sq(4, 1))]);
        assert!(game.moves_from(sq(5, 1)).is_empty());
    }

    #[test]
    fn find_move_resolves_notation_pairs() {
        let game = Game::new();
        assert_eq!(
            game.find_move(sq(5, 0), sq(4, 1)),
            Some(Move::slide(sq(5, 0), sq(4, 1)))
        );
        assert_eq!(game.find_move(sq(5, 0), sq(4, 3)), None);
    }

    #[test]
    fn adjacent_opponent_forces_the_jump() {
        // Black man at b4, red man at a3, c5 empty: the red piece's only
        // move is the jump to c5 over b4.
        let mut board = Board::empty();
        board.place(sq(5, 0), Piece::man(Side::Red));
        board.place(sq(4, 1), Piece::man(Side::Black));
        let game = Game::from_position(board, Side::Red);
        assert_eq!(
            game.moves_from(sq(5, 0)),
            vec![Move::jump(sq(5, 0), sq(4, 1), sq(3, 2))]
        );
    }
}
