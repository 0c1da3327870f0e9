//! Seamline: a seam-following harvest planner speaking a line protocol.
//!
//! Reads host commands from stdin and writes responses to stdout. Logs go to
//! stderr, filtered by `RUST_LOG`.

use std::io::{self, BufRead};

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use seamline::engine::Engine;
use seamline::protocol::parser::{parse_engine_command, EngineCommand};

/// Runs the protocol loop until `quit` or end of input.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_engine_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let written = match cmd {
            EngineCommand::Hello => engine.handle_hello(&mut out),
            EngineCommand::IsReady => engine.handle_isready(&mut out),
            EngineCommand::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref()) {
                    warn!(option = %name, "setoption rejected: {}", e);
                }
                Ok(())
            }
            EngineCommand::NewGame => {
                engine.new_game();
                Ok(())
            }
            EngineCommand::Position { snapshot } => {
                if let Err(e) = engine.set_position(&snapshot) {
                    warn!("position rejected: {}", e);
                }
                Ok(())
            }
            EngineCommand::Go(params) => engine.handle_go(&params, &mut out),
            EngineCommand::Quit => break,
        };

        if let Err(e) = written {
            error!("failed to write response: {}", e);
            break;
        }
    }
}
