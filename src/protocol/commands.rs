//! Command notation encoding and decoding.
//!
//! The host accepts one batch of commands per cycle. Each command is a short
//! token sequence: `m <id> <n|s|e|w|o>` to move, `g` to spawn at home, and
//! `c <id>` to turn a unit into an auxiliary base. Batches join commands with
//! ` ; `; an empty batch is written `-`.

use thiserror::Error;

use crate::board::{Command, Direction, UnitId};

/// Errors that can occur when parsing command strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("invalid unit id '{0}'")]
    InvalidUnitId(String),

    #[error("unknown direction '{0}'")]
    UnknownDirection(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(String),

    #[error("unexpected trailing token '{0}'")]
    TrailingToken(String),
}

/// Formats one command.
pub fn format_command(command: &Command) -> String {
    match command {
        Command::Move { unit, direction } => format!("m {} {}", unit, direction.command_char()),
        Command::Spawn => "g".to_string(),
        Command::ConvertToBase { unit } => format!("c {}", unit),
    }
}

/// Formats a batch, or `-` if it is empty.
pub fn format_commands(commands: &[Command]) -> String {
    if commands.is_empty() {
        return "-".to_string();
    }
    commands.iter().map(format_command).collect::<Vec<_>>().join(" ; ")
}

fn parse_unit_id(tokens: &[&str], idx: usize) -> Result<UnitId, CommandError> {
    let token = tokens
        .get(idx)
        .ok_or_else(|| CommandError::UnexpectedEnd("unit id".to_string()))?;
    token
        .parse::<u32>()
        .map(UnitId)
        .map_err(|_| CommandError::InvalidUnitId(token.to_string()))
}

/// Parses a single command string.
pub fn parse_command(s: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Err(CommandError::EmptyInput);
    };

    let (command, consumed) = match head {
        "g" => (Command::Spawn, 1),
        "c" => (Command::ConvertToBase { unit: parse_unit_id(&tokens, 1)? }, 2),
        "m" => {
            let unit = parse_unit_id(&tokens, 1)?;
            let dir = tokens
                .get(2)
                .ok_or_else(|| CommandError::UnexpectedEnd("direction".to_string()))?;
            let mut chars = dir.chars();
            let direction = match (chars.next(), chars.next()) {
                (Some(c), None) => Direction::from_command_char(c),
                _ => None,
            }
            .ok_or_else(|| CommandError::UnknownDirection(dir.to_string()))?;
            (Command::Move { unit, direction }, 3)
        }
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };

    if let Some(extra) = tokens.get(consumed) {
        return Err(CommandError::TrailingToken(extra.to_string()));
    }
    Ok(command)
}

/// Parses a ` ; `-separated batch. `-` is the empty batch.
pub fn parse_commands(s: &str) -> Result<Vec<Command>, CommandError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(CommandError::EmptyInput);
    }
    if s == "-" {
        return Ok(Vec::new());
    }
    s.split(';').map(parse_command).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_each_variant() {
        assert_eq!(
            format_command(&Command::Move { unit: UnitId(3), direction: Direction::North }),
            "m 3 n"
        );
        assert_eq!(format_command(&Command::Spawn), "g");
        assert_eq!(format_command(&Command::ConvertToBase { unit: UnitId(12) }), "c 12");
    }

    #[test]
    fn batch_roundtrip() {
        let batch = vec![
            Command::ConvertToBase { unit: UnitId(1) },
            Command::Move { unit: UnitId(2), direction: Direction::West },
            Command::Move { unit: UnitId(5), direction: Direction::Still },
            Command::Spawn,
        ];
        let text = format_commands(&batch);
        assert_eq!(text, "c 1 ; m 2 w ; m 5 o ; g");
        assert_eq!(parse_commands(&text).unwrap(), batch);
    }

    #[test]
    fn empty_batch_is_dash() {
        assert_eq!(format_commands(&[]), "-");
        assert_eq!(parse_commands("-").unwrap(), Vec::new());
        assert_eq!(parse_commands("  "), Err(CommandError::EmptyInput));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse_command(""), Err(CommandError::EmptyInput));
        assert_eq!(parse_command("x 1"), Err(CommandError::UnknownCommand("x".to_string())));
        assert_eq!(parse_command("m one n"), Err(CommandError::InvalidUnitId("one".to_string())));
        assert_eq!(parse_command("m 1 up"), Err(CommandError::UnknownDirection("up".to_string())));
        assert_eq!(
            parse_command("m 1"),
            Err(CommandError::UnexpectedEnd("direction".to_string()))
        );
        assert_eq!(parse_command("c"), Err(CommandError::UnexpectedEnd("unit id".to_string())));
        assert_eq!(parse_command("g 4"), Err(CommandError::TrailingToken("4".to_string())));
    }
}
