//! The computer opponent.
//!
//! Picks a move for the side to move from the engine's legal set:
//! uniformly at random among captures when any capture exists, otherwise
//! uniformly at random among the simple moves. No evaluation, no
//! look-ahead. The random source is injected so tests can seed it.

use rand::Rng;

use crate::board::Move;
use crate::game::{Game, MoveOutcome};

/// One complete turn played by the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPlayed {
    /// The moves made, in order; more than one during a capture chain.
    pub moves: Vec<Move>,
    /// The outcome of the final move of the turn.
    pub outcome: MoveOutcome,
}

/// Chooses one move from a legal set, preferring captures.
///
/// Returns `None` only for an empty set. The set is expected to come from
/// the engine and therefore to be homogeneous (all jumps or all slides),
/// but mixed input is handled by taking the capture subset first.
pub fn choose_move(moves: &[Move], rng: &mut impl Rng) -> Option<Move> {
    if moves.is_empty() {
        return None;
    }
    let jumps: Vec<Move> = moves.iter().copied().filter(|m| m.is_jump()).collect();
    let pool: &[Move] = if jumps.is_empty() { moves } else { &jumps };
    Some(pool[rng.gen_range(0..pool.len())])
}

/// Plays one full turn for the side to move, following a capture chain
/// to completion.
///
/// Returns `None` if the game is already over. Every submitted move comes
/// from `Game::legal_moves`, so submissions cannot be rejected.
pub fn play_turn(game: &mut Game, rng: &mut impl Rng) -> Option<TurnPlayed> {
    if game.is_over() {
        return None;
    }

    let mut moves = Vec::new();
    loop {
        let legal = game.legal_moves();
        let mv = choose_move(&legal, rng)?;
        let outcome = game
            .submit_move(mv)
            .expect("policy picked a move outside the legal set");
        moves.push(mv);
        match outcome {
            MoveOutcome::ChainContinues { .. } => continue,
            MoveOutcome::TurnEnded { .. } | MoveOutcome::GameOver { .. } => {
                return Some(TurnPlayed { moves, outcome });
            }
        }
    }
}
