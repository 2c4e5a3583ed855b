//! Text front end: parses player commands and drives a [`Session`].
//!
//! Commands are `<from> <to>` (e.g. `e2 e4`), `undo`, `hint <square>` and
//! `quit`. Only the leading words count, trailing ones are ignored.
//! Anything else is reported and the loop asks again.

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::core::definitions::{EngineError, MatchInterface};
use crate::core::engine::Square;
use crate::core::game::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Square, Square),
    Undo,
    Hint(Square),
    Quit,
    /** Blank line, nothing to do */
    Nothing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// Too few words for any command.
    Malformed(String),
    Coordinate(EngineError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Malformed(line) => write!(f, "can't understand `{line}`"),
            CommandError::Coordinate(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<EngineError> for CommandError {
    fn from(value: EngineError) -> Self {
        CommandError::Coordinate(value)
    }
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Ok(Command::Nothing),
        ["undo", ..] => Ok(Command::Undo),
        ["quit", ..] | ["exit", ..] => Ok(Command::Quit),
        ["hint", square, ..] => Ok(Command::Hint(square.parse()?)),
        [from, to, ..] => Ok(Command::Move(from.parse()?, to.parse()?)),
        _ => Err(CommandError::Malformed(line.trim().to_string())),
    }
}

/// Play a whole game from `input`, writing the board and replies to `output`.
/// Returns on `quit` or when the input runs out.
pub fn run_loop<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        writeln!(output, "{}", session.board())?;
        writeln!(output, "{} to move", session.current_player())?;
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "Invalid input: {err}. Try again.")?;
                continue;
            }
        };
        debug!("Command: {:?}", command);
        match command {
            Command::Nothing => {}
            Command::Quit => break,
            Command::Undo => {
                if let Err(err) = session.undo_move() {
                    writeln!(output, "Can't undo: {err}.")?;
                }
            }
            Command::Hint(square) => match session.hint_view(square) {
                Ok(view) => writeln!(output, "{view}")?,
                Err(err) => writeln!(output, "No hints: {err}.")?,
            },
            Command::Move(from, to) => {
                if let Err(err) = session.play(from, to) {
                    writeln!(output, "Illegal move: {err}.")?;
                }
            }
        }
    }
    info!("Game over after {} moves", session.board().history().len());
    Ok(())
}
