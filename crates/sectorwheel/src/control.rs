//! Line protocol spoken over the menu's control socket.

use crate::sector::ItemId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/circlemenu.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Show,
    Hide,
    Rotate(i32),
    Select(ItemId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` expects a whole number")]
    BadArgument(&'static str),
}

impl FromStr for ControlCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;
        let arg = words.next();

        match verb.to_ascii_lowercase().as_str() {
            "show" => Ok(Self::Show),
            "hide" => Ok(Self::Hide),
            "rotate" => arg
                .and_then(|a| a.parse().ok())
                .map(Self::Rotate)
                .ok_or(ParseCommandError::BadArgument("rotate")),
            "select" => arg
                .and_then(|a| a.parse::<u32>().ok())
                .map(|id| Self::Select(ItemId::new(id)))
                .ok_or(ParseCommandError::BadArgument("select")),
            _ => Err(ParseCommandError::Unknown(verb.to_string())),
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => f.write_str("show"),
            Self::Hide => f.write_str("hide"),
            Self::Rotate(angle) => write!(f, "rotate {angle}"),
            Self::Select(id) => write!(f, "select {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_commands() {
        let cases = vec![
            ("show", ControlCommand::Show),
            ("  HIDE ", ControlCommand::Hide),
            ("rotate -45", ControlCommand::Rotate(-45)),
            ("select 3", ControlCommand::Select(ItemId::new(3))),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<ControlCommand>(), Ok(expected));
        }
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert_eq!("".parse::<ControlCommand>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "spin".parse::<ControlCommand>(),
            Err(ParseCommandError::Unknown("spin".to_string()))
        );
        assert_eq!(
            "rotate left".parse::<ControlCommand>(),
            Err(ParseCommandError::BadArgument("rotate"))
        );
        assert_eq!(
            "select".parse::<ControlCommand>(),
            Err(ParseCommandError::BadArgument("select"))
        );
    }

    #[test]
    fn test_display_matches_the_wire_format() {
        assert_eq!(ControlCommand::Rotate(90).to_string(), "rotate 90");
        assert_eq!(ControlCommand::Select(ItemId::new(2)).to_string(), "select 2");
    }
}
