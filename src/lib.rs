//! Seamline planner library.
//!
//! Exposes the board model, seam extraction, routing, planning and protocol
//! modules for the binaries, integration tests and benches.

pub mod board;
pub mod config;
pub mod economy;
pub mod engine;
pub mod planner;
pub mod protocol;
pub mod random;
pub mod route;
pub mod seam;
pub mod simulate;
