//! Unit routing.
//!
//! Turns the cycle's seam set into one move per unit, booking every cell a
//! unit moves onto so later units in the same cycle avoid it.

pub mod book;
pub mod router;

pub use book::{navigate, OccupancyBook};
pub use router::{closest_safe_target, MoveAssignment, RouteReason, RoutedMove, UnitRouter};
