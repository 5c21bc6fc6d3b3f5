//! Time-stepping engine and absorbing boundaries.
//!
//! The engine owns all simulation state and drives the strict per-step
//! update sequence; the boundary module supplies the first-order Mur edge
//! treatment it applies between the E and H updates.

mod boundary;
mod engine;

pub use boundary::MurBoundary;
pub use engine::{FdtdSolver, SimulationOutput, SolverError};
