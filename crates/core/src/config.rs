//! Simulation configuration and setup-time validation.
//!
//! All run parameters are immutable once the solver is constructed. Invalid
//! configurations are rejected here with a typed error before any field
//! array is allocated, so the update loops can index without bounds
//! surprises.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Debye dielectric region occupying the half-open cell interval
/// `[start, cells)`.
///
/// Cells in front of `start` are vacuum. The region is described by its
/// static relative permittivity, conductivity, susceptibility and
/// relaxation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DebyeRegion {
    /// First cell of the dielectric region
    pub start: usize,
    /// Relative permittivity εr
    pub epsr: f64,
    /// Conductivity (S/m)
    pub sigma: f64,
    /// Debye susceptibility χ
    pub chi: f64,
    /// Relaxation time (s)
    pub tau: f64,
}

impl DebyeRegion {
    /// A region that leaves the whole grid as vacuum.
    ///
    /// The relaxation time is kept positive so the exponential decay factor
    /// stays well defined; with zero susceptibility and conductivity it has
    /// no effect on the fields.
    #[must_use]
    pub fn vacuum() -> Self {
        Self {
            start: 0,
            epsr: 1.0,
            sigma: 0.0,
            chi: 0.0,
            tau: 1e-9,
        }
    }
}

/// Immutable configuration for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid cell count N
    pub cells: usize,
    /// Cell size (m)
    pub cell_size: f64,
    /// Time step (s)
    pub dt: f64,
    /// Target frequencies for the running Fourier transform (Hz)
    pub frequencies: Vec<f64>,
    /// Pulse center, in time steps
    pub t0: f64,
    /// Pulse width, in time steps
    pub spread: f64,
    /// Cell receiving the excitation pulse
    pub source_cell: usize,
    /// Cell where the input pulse's own spectrum is measured
    pub probe_cell: usize,
    /// Dispersive dielectric region
    pub medium: DebyeRegion,
    /// Total number of time steps
    pub nsteps: usize,
    /// Steps at which the E field is snapshotted
    pub snapshot_steps: Vec<usize>,
}

impl SimulationConfig {
    /// The reference scenario from Sullivan's fd1d_2_3 example: a 200-cell
    /// grid with a Debye half-space starting at cell 100, probed at 50, 200
    /// and 500 MHz.
    ///
    /// The time step is half the vacuum Courant limit (`dt = dx / 2c`), the
    /// value the 0.5 curl coupling of the update equations is written for.
    #[must_use]
    pub fn textbook() -> Self {
        let cell_size = 0.01;
        Self {
            cells: 200,
            cell_size,
            dt: cell_size / 6e8,
            frequencies: vec![50e6, 200e6, 500e6],
            t0: 50.0,
            spread: 10.0,
            source_cell: 5,
            probe_cell: 10,
            medium: DebyeRegion {
                start: 100,
                epsr: 2.0,
                sigma: 0.01,
                chi: 2.0,
                tau: 1e-9,
            },
            nsteps: 1000,
            snapshot_steps: vec![250, 1000],
        }
    }

    /// Check every setup-time invariant.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`]: a grid too
    /// small for the update stencil, a non-positive physical quantity, an
    /// empty frequency list, a dielectric region or source/probe cell
    /// outside the grid, or an observation step outside `[1, nsteps]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cells < 3 {
            return Err(ConfigError::GridTooSmall { cells: self.cells });
        }
        positive("cell_size", self.cell_size)?;
        positive("dt", self.dt)?;
        positive("t0", self.t0)?;
        positive("spread", self.spread)?;
        positive("epsr", self.medium.epsr)?;
        positive("tau", self.medium.tau)?;
        if self.frequencies.is_empty() {
            return Err(ConfigError::NoFrequencies);
        }
        if self.nsteps == 0 {
            return Err(ConfigError::NoSteps);
        }
        if self.medium.start >= self.cells {
            return Err(ConfigError::RegionOutOfBounds {
                start: self.medium.start,
                cells: self.cells,
            });
        }
        interior_cell("source_cell", self.source_cell, self.cells)?;
        interior_cell("probe_cell", self.probe_cell, self.cells)?;
        for &step in &self.snapshot_steps {
            if step == 0 || step > self.nsteps {
                return Err(ConfigError::SnapshotStepOutOfRange {
                    step,
                    nsteps: self.nsteps,
                });
            }
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn interior_cell(name: &'static str, cell: usize, cells: usize) -> Result<(), ConfigError> {
    // Edge cells belong to the absorbing boundary, not to sources or probes
    if cell >= 1 && cell < cells - 1 {
        Ok(())
    } else {
        Err(ConfigError::CellOutOfRange { name, cell, cells })
    }
}

/// Setup-time configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Fewer cells than the update stencil needs
    GridTooSmall {
        /// Configured cell count
        cells: usize,
    },
    /// A physical quantity that must be strictly positive is not
    NonPositive {
        /// Parameter name
        name: &'static str,
        /// Offending value (bit pattern comparison only)
        value: f64,
    },
    /// The frequency list is empty
    NoFrequencies,
    /// The step count is zero
    NoSteps,
    /// The dielectric region starts outside `[0, cells)`
    RegionOutOfBounds {
        /// Configured region start
        start: usize,
        /// Grid cell count
        cells: usize,
    },
    /// A source or probe cell is outside the grid interior
    CellOutOfRange {
        /// Parameter name
        name: &'static str,
        /// Configured cell index
        cell: usize,
        /// Grid cell count
        cells: usize,
    },
    /// An observation step is outside `[1, nsteps]`
    SnapshotStepOutOfRange {
        /// Configured observation step
        step: usize,
        /// Total step count
        nsteps: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridTooSmall { cells } => {
                write!(f, "grid too small: {cells} cells (minimum 3)")
            }
            ConfigError::NonPositive { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            ConfigError::NoFrequencies => write!(f, "frequency list is empty"),
            ConfigError::NoSteps => write!(f, "step count is zero"),
            ConfigError::RegionOutOfBounds { start, cells } => {
                write!(
                    f,
                    "dielectric region start {start} outside grid of {cells} cells"
                )
            }
            ConfigError::CellOutOfRange { name, cell, cells } => {
                write!(
                    f,
                    "{name} {cell} outside the interior of a {cells}-cell grid"
                )
            }
            ConfigError::SnapshotStepOutOfRange { step, nsteps } => {
                write!(f, "observation step {step} outside [1, {nsteps}]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
