//! Engine command parser.
//!
//! Parses incoming host lines into structured `EngineCommand` variants that
//! the main loop dispatches on.

use tracing::warn;

/// Constraints passed with the `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Overrides the configured cycle budget, in milliseconds.
    pub movetime: Option<u64>,
    /// Reseeds the engine's random source before planning.
    pub seed: Option<u64>,
}

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Start the handshake.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Set the current snapshot from its notation.
    Position { snapshot: String },

    /// Plan one cycle for the current snapshot.
    Go(GoParams),

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into an `EngineCommand`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_engine_command(line: &str) -> Option<EngineCommand> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let head = *tokens.first()?;

    match head {
        "hello" => Some(EngineCommand::Hello),
        "isready" => Some(EngineCommand::IsReady),
        "quit" => Some(EngineCommand::Quit),
        "newgame" => Some(EngineCommand::NewGame),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "go" => Some(parse_go(&tokens)),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<EngineCommand> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(EngineCommand::SetOption { name, value })
}

/// Parses `position <snapshot>`.
fn parse_position(tokens: &[&str]) -> Option<EngineCommand> {
    if tokens.len() < 2 {
        warn!("malformed position: expected 'position <snapshot>'");
        return None;
    }
    Some(EngineCommand::Position { snapshot: tokens[1].to_string() })
}

/// Parses `go [movetime <ms>] [seed <n>]`. Bad parameters are skipped.
fn parse_go(tokens: &[&str]) -> EngineCommand {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            key @ ("movetime" | "seed") => {
                i += 1;
                match tokens.get(i).map(|t| t.parse::<u64>()) {
                    Some(Ok(v)) if key == "movetime" => params.movetime = Some(v),
                    Some(Ok(v)) => params.seed = Some(v),
                    Some(Err(_)) => warn!(parameter = key, value = tokens[i], "invalid go value"),
                    None => warn!(parameter = key, "missing go value"),
                }
            }
            other => {
                warn!(parameter = other, "unknown go parameter");
            }
        }
        i += 1;
    }

    EngineCommand::Go(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_engine_command("hello"), Some(EngineCommand::Hello));
        assert_eq!(parse_engine_command("isready"), Some(EngineCommand::IsReady));
        assert_eq!(parse_engine_command("quit"), Some(EngineCommand::Quit));
        assert_eq!(parse_engine_command("newgame"), Some(EngineCommand::NewGame));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_engine_command(""), None);
        assert_eq!(parse_engine_command("  "), None);
        assert_eq!(parse_engine_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_engine_command("foobar"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        assert_eq!(
            parse_engine_command("setoption name SeamCount value 6"),
            Some(EngineCommand::SetOption {
                name: "SeamCount".to_string(),
                value: Some("6".to_string()),
            })
        );
    }

    #[test]
    fn parse_setoption_path_value() {
        assert_eq!(
            parse_engine_command("setoption name ConfigFile value /etc/seamline/tuned.json"),
            Some(EngineCommand::SetOption {
                name: "ConfigFile".to_string(),
                value: Some("/etc/seamline/tuned.json".to_string()),
            })
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        assert_eq!(
            parse_engine_command("setoption name ResetDefaults"),
            Some(EngineCommand::SetOption {
                name: "ResetDefaults".to_string(),
                value: None,
            })
        );
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_engine_command("setoption"), None);
        assert_eq!(parse_engine_command("setoption foo"), None);
        assert_eq!(parse_engine_command("setoption name value 3"), None);
    }

    #[test]
    fn parse_position_snapshot() {
        let snapshot = "0/2x1/7,8/0.0/-/-/-/0";
        assert_eq!(
            parse_engine_command(&format!("position {}", snapshot)),
            Some(EngineCommand::Position { snapshot: snapshot.to_string() })
        );
        assert_eq!(parse_engine_command("position"), None);
    }

    #[test]
    fn parse_go_variants() {
        assert_eq!(parse_engine_command("go"), Some(EngineCommand::Go(GoParams::default())));
        assert_eq!(
            parse_engine_command("go movetime 250 seed 9"),
            Some(EngineCommand::Go(GoParams { movetime: Some(250), seed: Some(9) }))
        );
    }

    #[test]
    fn parse_go_skips_bad_values() {
        assert_eq!(
            parse_engine_command("go movetime soon depth 3 seed"),
            Some(EngineCommand::Go(GoParams::default()))
        );
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse_engine_command("  hello  "), Some(EngineCommand::Hello));
    }
}
