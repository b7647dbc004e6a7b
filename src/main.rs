//! Draughtsman -- an English draughts engine played from the terminal.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! The human plays Red; the computer answers for Black.

use std::io::{self, BufRead, Write};

use draughtsman::protocol::parser::{parse_command, Command};
use draughtsman::session::Session;

/// Runs the main command loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut session = Session::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::New => {
                session.handle_new(&mut out);
            }
            Command::Board => {
                session.handle_board(&mut out);
            }
            Command::Moves => {
                session.handle_moves(&mut out);
            }
            Command::Move { text } => {
                session.handle_move(&text, &mut out);
            }
            Command::Fen => {
                session.handle_fen(&mut out);
            }
            Command::Position { fen } => {
                session.handle_position(&fen, &mut out);
            }
            Command::Seed { seed } => {
                session.reseed(seed);
            }
            Command::Help => {
                session.handle_help(&mut out);
            }
            Command::Quit => {
                break;
            }
        }
        out.flush().unwrap();
    }
}
