use std::str::FromStr;
use sweeper_core::{Coord, Coord2};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// Primary action
    Reveal(Coord2),
    /// Secondary action
    Flag(Coord2),
    Restart,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseCommandError {
    #[error("Unknown command `{0}`")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("`{0}` is not a valid coordinate")]
    InvalidCoord(String),
    #[error("Unexpected trailing input `{0}`")]
    Trailing(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseCommandError::Unknown(String::new()));
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" | "open" => Command::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(&mut words)?),
            "n" | "new" | "restart" => Command::Restart,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(verb.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::Trailing(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, ParseCommandError> {
    let mut next = || -> Result<Coord, ParseCommandError> {
        let word = words.next().ok_or(ParseCommandError::MissingCoords)?;
        word.parse()
            .map_err(|_| ParseCommandError::InvalidCoord(word.to_owned()))
    };
    let row = next()?;
    let col = next()?;
    Ok((row, col))
}
