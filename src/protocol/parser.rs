//! CLI command parser.
//!
//! Parses incoming command lines from raw text into structured `Command`
//! variants that the session loop can dispatch on.

/// A parsed command for the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a fresh game.
    New,

    /// Print the board diagram and status line.
    Board,

    /// List the legal moves for the side to move.
    Moves,

    /// Submit a move for the human side, e.g. `move a3-b4`.
    Move { text: String },

    /// Print the current position string.
    Fen,

    /// Set the position from a position string.
    Position { fen: String },

    /// Reseed the computer's random source for reproducible play.
    Seed { seed: u64 },

    /// Print command help.
    Help,

    /// Terminate the session.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "new" => Some(Command::New),
        "board" => Some(Command::Board),
        "moves" => Some(Command::Moves),
        "fen" => Some(Command::Fen),
        "help" => Some(Command::Help),
        "quit" => Some(Command::Quit),

        "move" => parse_move_cmd(&tokens),
        "position" => parse_position(&tokens),
        "seed" => parse_seed(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `move <from>-<to>`.
fn parse_move_cmd(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed move: expected 'move <from>-<to>'");
        return None;
    }
    Some(Command::Move {
        text: tokens[1].to_string(),
    })
}

/// Parses `position <fen>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed position: expected 'position <fen>'");
        return None;
    }
    // The position string is a single token (no spaces).
    Some(Command::Position {
        fen: tokens[1].to_string(),
    })
}

/// Parses `seed <n>`.
fn parse_seed(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed seed: expected 'seed <n>'");
        return None;
    }
    match tokens[1].parse::<u64>() {
        Ok(seed) => Some(Command::Seed { seed }),
        Err(_) => {
            eprintln!("invalid seed value: '{}'", tokens[1]);
            None
        }
    }
}
