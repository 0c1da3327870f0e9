//! Energy seams.
//!
//! Converts the grid into an energy matrix around the home base, extracts the
//! maximum-energy seam by dynamic programming, and builds the per-cycle set
//! of diverse seams the router draws targets from.

pub mod energy;
pub mod maximizer;
pub mod set;

pub use energy::EnergyMatrix;
pub use maximizer::{maximum_seam, Seam, SeamMaximizer, SuppressionMask};
pub use set::SeamSet;
