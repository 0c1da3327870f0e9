//! Host protocol handling.
//!
//! Parsing and serialization for the snapshot notation the host sends each
//! cycle, the command notation the engine answers with, and the line parser
//! for the engine's main loop.

pub mod commands;
pub mod parser;
pub mod snapshot;

pub use commands::{format_command, format_commands, parse_command, parse_commands, CommandError};
pub use parser::{parse_engine_command, EngineCommand, GoParams};
pub use snapshot::{encode_snapshot, parse_snapshot, SnapshotError};
