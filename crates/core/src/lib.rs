//! One-Dimensional Dispersive FDTD Core Library
//!
//! Propagates a pulsed plane wave through a medium containing a
//! frequency-dependent (Debye) dielectric region, while extracting the
//! steady-state frequency-domain response at every cell with a running
//! discrete Fourier accumulation.
//!
//! ## Solver structure
//!
//! - Explicit leapfrog stepping of the D, E and H fields on a fixed grid
//! - Auxiliary-differential-equation (ADE) treatment of Debye dispersion
//! - First-order Mur absorbing boundaries via two-step edge delay lines
//! - Per-cell amplitude/phase extraction normalized against the input
//!   pulse's own spectrum

// Configuration and setup-time validation
pub mod config;

// Per-cell field state
pub mod grid;

// Material profile and update coefficients
pub mod medium;

// Excitation pulse
pub mod source;

// Time-stepping engine and boundaries
pub mod solver;

// Running Fourier accumulation and normalization
pub mod spectrum;

// Field snapshot capture
pub mod snapshot;

// Re-export the simulation surface
pub use config::{ConfigError, DebyeRegion, SimulationConfig};
pub use grid::FieldGrid;
pub use medium::{MediumCoefficients, VACUUM_PERMITTIVITY};
pub use snapshot::SnapshotRecorder;
pub use solver::{FdtdSolver, MurBoundary, SimulationOutput, SolverError};
pub use source::GaussianPulse;
pub use spectrum::{FourierMonitor, SpectralResponse, SpectrumError};
