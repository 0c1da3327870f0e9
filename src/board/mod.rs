//! Board representation and snapshot types.
//!
//! Contains positions and directions, the toroidal resource grid with its
//! occupancy, units, the per-cycle snapshot, and host commands.

pub mod command;
pub mod map;
pub mod position;
pub mod state;
pub mod unit;

pub use command::Command;
pub use map::{Cell, GameMap, Occupancy};
pub use position::{target_direction, Direction, Position, CARDINALS};
pub use state::Snapshot;
pub use unit::{Unit, UnitId};
