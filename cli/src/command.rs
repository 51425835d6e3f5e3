use popquest_core::Coord;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  start              start a new game from the menu
  r ROW COL          reveal a cell
  f ROW COL          flag or unflag a cell
  restart            back to the menu after a win or a loss
  help               show this text
  quit               leave
while a challenge is open every line is an answer, a trailing '<' erases one letter";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
    Reveal(Coord, Coord),
    Flag(Coord, Coord),
    Help,
    Quit,
    Answer(Vec<Keystroke>),
}

/// Challenge input, replayed one key at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Backspace,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("expected ROW and COL after {0:?}")]
    MissingCoords(String),
    #[error("{0:?} is not a valid coordinate")]
    BadCoord(String),
}

/// Parses one input line. While a challenge is open the line is an answer instead.
pub fn parse(line: &str, answering: bool) -> Result<Command, ParseError> {
    if answering {
        return Ok(Command::Answer(keystrokes(line)));
    }

    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Help);
    };

    match verb.to_ascii_lowercase().as_str() {
        "start" | "s" => Ok(Command::Start),
        "restart" => Ok(Command::Restart),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "reveal" | "r" => coords(verb, &mut words).map(|(row, col)| Command::Reveal(row, col)),
        "flag" | "f" => coords(verb, &mut words).map(|(row, col)| Command::Flag(row, col)),
        _ => Err(ParseError::Unknown(verb.to_owned())),
    }
}

fn coords<'a>(
    verb: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<(Coord, Coord), ParseError> {
    let (Some(row), Some(col)) = (words.next(), words.next()) else {
        return Err(ParseError::MissingCoords(verb.to_owned()));
    };
    let parse_one = |text: &str| {
        text.parse::<Coord>()
            .map_err(|_| ParseError::BadCoord(text.to_owned()))
    };
    Ok((parse_one(row)?, parse_one(col)?))
}

fn keystrokes(line: &str) -> Vec<Keystroke> {
    line.trim_end_matches(['\r', '\n'])
        .chars()
        .map(|c| match c {
            '<' | '\u{8}' | '\u{7f}' => Keystroke::Backspace,
            c => Keystroke::Char(c),
        })
        .collect()
}
