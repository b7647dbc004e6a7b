//! Self-play game generation.
//!
//! Plays full games with the random opponent policy on both sides, for
//! smoke testing the rules engine and gathering win statistics. Games are
//! recorded as move lists and can be written out as JSONL. A ply cap
//! terminates games that would otherwise wander forever once kings exist;
//! capped games are recorded with no winner.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::Side;
use crate::game::{Game, MoveOutcome};
use crate::policy;
use crate::protocol::notation::format_move;

/// Configuration for self-play game generation.
#[derive(Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Maximum half-moves before a game is cut off as drawn.
    pub max_plies: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_plies: 500,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Final piece counts of a finished game.
#[derive(Clone, Copy, Serialize)]
pub struct FinalCounts {
    pub red: u8,
    pub black: u8,
}

/// A complete self-play game record.
#[derive(Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// The winning side name, or `None` for a ply-capped game.
    pub winner: Option<&'static str>,
    /// Number of half-moves played, counting every leg of a capture chain.
    pub plies: usize,
    /// The moves in order, in algebraic notation.
    pub moves: Vec<String>,
    /// Piece counts when the game ended.
    pub final_counts: FinalCounts,
}

/// Plays a single self-play game and returns the game record.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut game = Game::new();
    let mut moves: Vec<String> = Vec::new();
    let mut winner: Option<Side> = None;

    while moves.len() < config.max_plies {
        let played = match policy::play_turn(&mut game, rng) {
            Some(p) => p,
            None => break,
        };
        for mv in &played.moves {
            moves.push(format_move(mv));
        }
        if let MoveOutcome::GameOver { winner: w } = played.outcome {
            winner = Some(w);
            break;
        }
    }

    GameRecord {
        game_id,
        winner: winner.map(Side::name),
        plies: moves.len(),
        moves,
        final_counts: FinalCounts {
            red: game.pieces(Side::Red),
            black: game.pieces(Side::Black),
        },
    }
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games
}

/// Runs self-play generation, calling `on_game` with each completed game.
///
/// This allows the caller to process games incrementally (e.g. write to
/// disk) rather than waiting for all games to finish.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed)
    } else {
        SmallRng::from_entropy()
    };

    for i in 0..config.num_games {
        let game_start = Instant::now();
        let game = play_game(config, i, &mut rng);
        if !config.quiet {
            report_progress(&game, i + 1, config.num_games, game_start);
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker
/// threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = if config_clone.seed != 0 {
                        SmallRng::seed_from_u64(config_clone.seed.wrapping_add(i as u64))
                    } else {
                        SmallRng::from_entropy()
                    };
                    let game_start = Instant::now();
                    let game = play_game(&config_clone, i, &mut rng);
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        report_progress(&game, n, config_clone.num_games, game_start);
                    }
                    let _ = tx.send(game);
                });
        });
    });

    // Receive completed games on the main thread and pass to callback.
    for game in rx {
        on_game(game);
    }

    handle.join().expect("selfplay worker thread panicked");
}

/// Prints a one-line progress report for a finished game.
fn report_progress(game: &GameRecord, n: usize, total: usize, started: Instant) {
    let outcome = match game.winner {
        Some(w) => format!("{} wins", w),
        None => "drawn at ply cap".to_string(),
    };
    eprintln!(
        "Game {}/{}: {} after {} plies ({:.2}s)",
        n,
        total,
        outcome,
        game.plies,
        started.elapsed().as_secs_f64(),
    );
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints aggregate win statistics to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let red_wins = games.iter().filter(|g| g.winner == Some("red")).count();
    let black_wins = games.iter().filter(|g| g.winner == Some("black")).count();
    let draws = games.len() - red_wins - black_wins;
    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f64 / games.len() as f64
    };
    eprintln!(
        "Summary: {} games, red {} black {} drawn {}, {:.1} plies/game",
        games.len(),
        red_wins,
        black_wins,
        draws,
        avg_plies
    );
}
