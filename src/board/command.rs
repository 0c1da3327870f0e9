//! Commands submitted to the host at the end of a cycle.

use super::position::Direction;
use super::unit::UnitId;

/// One entry of a cycle's command batch.
///
/// Mirrors the host command notation: `m <id> <dir>`, `g`, `c <id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move: `m 3 n`
    Move { unit: UnitId, direction: Direction },

    /// Spawn a new unit at the home base: `g`
    Spawn,

    /// Turn a unit (and its cell) into an auxiliary base: `c 3`
    ConvertToBase { unit: UnitId },
}

impl Command {
    /// The unit this command addresses, if any.
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            Command::Move { unit, .. } | Command::ConvertToBase { unit } => Some(*unit),
            Command::Spawn => None,
        }
    }
}
