//! Interactive session management.
//!
//! Owns the current game and the computer's random source, and handles
//! the parsed CLI commands. The human plays Red; whenever a completed
//! human turn leaves Black to move, the opponent policy is invoked and
//! its reply is written to the output.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Move, Side};
use crate::game::{Game, MoveOutcome, TurnState};
use crate::policy;
use crate::protocol::fen::{encode_fen, parse_fen};
use crate::protocol::notation::{format_moves, format_turn, parse_move, MoveRequest};

/// The side played by the opponent policy.
const COMPUTER: Side = Side::Black;

/// Holds the mutable state of one interactive session.
pub struct Session {
    game: Game,
    rng: SmallRng,
}

impl Session {
    /// Creates a session at the starting position with an entropy-seeded
    /// random source.
    pub fn new() -> Self {
        Session {
            game: Game::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a session with a fixed seed for reproducible play.
    pub fn with_seed(seed: u64) -> Self {
        Session {
            game: Game::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Returns the current game for inspection.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Replaces the random source with a seeded one.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Handles `new`: resets to the starting position.
    pub fn handle_new<W: Write>(&mut self, out: &mut W) {
        self.game.reset();
        writeln!(out, "{}", self.game.board()).unwrap();
        self.write_status(out);
    }

    /// Handles `board`: prints the diagram, piece counts, and status.
    pub fn handle_board<W: Write>(&self, out: &mut W) {
        writeln!(out, "{}", self.game.board()).unwrap();
        writeln!(
            out,
            "pieces: red {}, black {}",
            self.game.pieces(Side::Red),
            self.game.pieces(Side::Black)
        )
        .unwrap();
        self.write_status(out);
    }

    /// Handles `moves`: lists the legal moves for the side to move.
    pub fn handle_moves<W: Write>(&self, out: &mut W) {
        let legal = self.game.legal_moves();
        if legal.is_empty() {
            writeln!(out, "no legal moves").unwrap();
        } else {
            writeln!(out, "{}", format_moves(&legal)).unwrap();
        }
    }

    /// Handles `fen`: prints the current position string.
    pub fn handle_fen<W: Write>(&self, out: &mut W) {
        let to_move = self.game.side_to_move().unwrap_or(COMPUTER);
        writeln!(out, "{}", encode_fen(self.game.board(), to_move)).unwrap();
    }

    /// Handles `position <fen>`: replaces the game with the given
    /// position. If it is the computer's turn there, it replies at once.
    pub fn handle_position<W: Write>(&mut self, fen: &str, out: &mut W) {
        match parse_fen(fen) {
            Ok((board, to_move)) => {
                self.game = Game::from_position(board, to_move);
                self.computer_reply(out);
            }
            Err(e) => {
                eprintln!("failed to parse position: {}", e);
            }
        }
    }

    /// Handles `move <text>`: submits a move for the human side.
    ///
    /// Rejections are reported on the output with the violated rule; the
    /// game is unchanged. When the human turn completes, the computer's
    /// reply follows in the same call.
    pub fn handle_move<W: Write>(&mut self, text: &str, out: &mut W) {
        let req = match parse_move(text) {
            Ok(req) => req,
            Err(e) => {
                writeln!(out, "error: {}", e).unwrap();
                return;
            }
        };

        if self.game.side_to_move() == Some(COMPUTER) {
            writeln!(out, "error: it is black's turn").unwrap();
            return;
        }

        // Resolve against the legal set; an unmatched request is rebuilt
        // geometrically so the engine can report which rule it breaks.
        let mv = self
            .game
            .find_move(req.from, req.to)
            .unwrap_or_else(|| request_as_move(req));

        match self.game.submit_move(mv) {
            Ok(MoveOutcome::ChainContinues { piece }) => {
                writeln!(out, "continue capturing from {}", piece).unwrap();
            }
            Ok(MoveOutcome::GameOver { winner }) => {
                writeln!(out, "game over: {} wins", winner.name()).unwrap();
            }
            Ok(MoveOutcome::TurnEnded { .. }) => {
                self.computer_reply(out);
            }
            Err(e) => {
                writeln!(out, "illegal move: {}", e).unwrap();
            }
        }
    }

    /// Handles `help`: lists the available commands.
    pub fn handle_help<W: Write>(&self, out: &mut W) {
        writeln!(out, "commands:").unwrap();
        writeln!(out, "  new              start a fresh game").unwrap();
        writeln!(out, "  board            show the board and status").unwrap();
        writeln!(out, "  moves            list legal moves").unwrap();
        writeln!(out, "  move <from>-<to> play a move, e.g. move a3-b4").unwrap();
        writeln!(out, "  fen              print the position string").unwrap();
        writeln!(out, "  position <fen>   set the position").unwrap();
        writeln!(out, "  seed <n>         reseed the computer's choices").unwrap();
        writeln!(out, "  quit             exit").unwrap();
        out.flush().unwrap();
    }

    /// Plays the computer's turn if it is to move, then writes the status.
    fn computer_reply<W: Write>(&mut self, out: &mut W) {
        if self.game.side_to_move() == Some(COMPUTER) {
            if let Some(played) = policy::play_turn(&mut self.game, &mut self.rng) {
                writeln!(out, "black plays {}", format_turn(&played.moves)).unwrap();
            }
        }
        self.write_status(out);
    }

    /// Writes a one-line summary of whose move it is, or the result.
    fn write_status<W: Write>(&self, out: &mut W) {
        match self.game.state() {
            TurnState::Finished { winner } => {
                writeln!(out, "game over: {} wins", winner.name()).unwrap();
            }
            TurnState::CaptureChain { side, piece } => {
                writeln!(out, "{} to move, continue capturing from {}", side.name(), piece)
                    .unwrap();
            }
            TurnState::Playing { side } => {
                if self.game.must_capture() {
                    writeln!(out, "{} to move (must capture)", side.name()).unwrap();
                } else {
                    writeln!(out, "{} to move", side.name()).unwrap();
                }
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

/// Rebuilds a move from its endpoint squares alone, inferring the jumped
/// square for a two-step diagonal. Used only to produce precise
/// rejections for moves outside the legal set.
fn request_as_move(req: MoveRequest) -> Move {
    let dr = req.to.row() as i8 - req.from.row() as i8;
    let dc = req.to.col() as i8 - req.from.col() as i8;
    if dr.abs() == 2 && dc.abs() == 2 {
        if let Some(over) = req.from.offset(dr / 2, dc / 2) {
            return Move::jump(req.from, over, req.to);
        }
    }
    Move::slide(req.from, req.to)
}
