//! Field update engine: one strict update sequence per time step.
//!
//! The per-step order is load-bearing. The D update reads the previous
//! step's H field, the ADE sub-updates read the freshly computed E value,
//! the boundaries run between the E and H updates, and the Fourier and
//! snapshot consumers see the field exactly as the step leaves it.
//! Reordering any of these changes physical causality without crashing.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use super::boundary::MurBoundary;
use crate::config::{ConfigError, SimulationConfig};
use crate::grid::FieldGrid;
use crate::medium::MediumCoefficients;
use crate::snapshot::SnapshotRecorder;
use crate::source::GaussianPulse;
use crate::spectrum::{FourierMonitor, SpectralResponse, SpectrumError};

/// One-dimensional dispersive FDTD simulation.
///
/// Owns every piece of run state: the field arrays, the immutable medium
/// coefficients, the boundary delay lines, the running Fourier sums and
/// the snapshot store. Multiple instances are fully independent.
pub struct FdtdSolver {
    config: SimulationConfig,
    grid: FieldGrid,
    coefficients: MediumCoefficients,
    boundary: MurBoundary,
    source: GaussianPulse,
    monitor: FourierMonitor,
    recorder: SnapshotRecorder,
    time_step: usize,
}

impl FdtdSolver {
    /// Build a solver from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] of the first violated setup invariant;
    /// no state is allocated in that case.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "Creating 1D dispersive FDTD solver: {} cells, dt={:.3e}s, medium from cell {}, {} frequencies",
            config.cells,
            config.dt,
            config.medium.start,
            config.frequencies.len()
        );

        let grid = FieldGrid::new(config.cells);
        let coefficients = MediumCoefficients::build(&config.medium, config.dt, config.cells);
        let source = GaussianPulse::new(config.t0, config.spread);
        let monitor = FourierMonitor::new(
            &config.frequencies,
            config.dt,
            config.cells,
            config.probe_cell,
            config.t0,
        );
        let recorder = SnapshotRecorder::new(&config.snapshot_steps);
        Ok(Self {
            config,
            grid,
            coefficients,
            boundary: MurBoundary::new(),
            source,
            monitor,
            recorder,
            time_step: 0,
        })
    }

    /// Advance the simulation by one time step.
    ///
    /// # Errors
    ///
    /// [`SolverError::Instability`] at the first non-finite field value;
    /// the step's results are discarded and the run must not continue.
    pub fn step(&mut self) -> Result<(), SolverError> {
        self.time_step += 1;
        let step = self.time_step;
        let cells = self.config.cells;

        // 1. Flux density from the curl of the previous step's H field
        for k in 1..cells {
            self.grid.dx[k] += 0.5 * (self.grid.hy[k - 1] - self.grid.hy[k]);
        }

        // 2. Source injection, before the E update of the same step
        self.grid.dx[self.config.source_cell] += self.source.evaluate(step);

        // 3. E from D through the auxiliary differential equation.
        //    ix and sx read the E value computed in the same iteration.
        let ga = self.coefficients.ga();
        let gb = self.coefficients.gb();
        let gc = self.coefficients.gc();
        let del_exp = self.coefficients.del_exp();
        for k in 1..cells {
            self.grid.ex[k] =
                ga[k] * (self.grid.dx[k] - self.grid.ix[k] - del_exp * self.grid.sx[k]);
            self.grid.ix[k] += gb[k] * self.grid.ex[k];
            self.grid.sx[k] = del_exp * self.grid.sx[k] + gc[k] * self.grid.ex[k];
        }

        // 4. Absorbing boundaries on the freshly updated E field
        self.boundary.apply(&mut self.grid.ex);

        // 5. H from the curl of the just-updated E
        for k in 0..cells - 1 {
            self.grid.hy[k] += 0.5 * (self.grid.ex[k] - self.grid.ex[k + 1]);
        }

        if let Some(cell) = self.grid.first_non_finite() {
            warn!("Non-finite field value at step {step}, cell {cell}");
            return Err(SolverError::Instability { step, cell });
        }

        // 6. Hand the end-of-step field to the consumers
        self.monitor.accumulate(step, &self.grid.ex);
        self.recorder.capture(step, &self.grid.ex);

        if step % 100 == 0 {
            debug!("Completed step {step}/{}", self.config.nsteps);
        }
        Ok(())
    }

    /// Run the remaining steps, then normalize the spectral response.
    ///
    /// # Errors
    ///
    /// [`SolverError::Instability`] if the stepping aborts, or
    /// [`SolverError::Spectrum`] if the reference spectrum is degenerate at
    /// normalization time.
    pub fn run(mut self) -> Result<SimulationOutput, SolverError> {
        while self.time_step < self.config.nsteps {
            self.step()?;
        }
        info!("Time stepping complete after {} steps", self.time_step);

        let spectrum = self.monitor.normalize()?;
        Ok(SimulationOutput {
            snapshots: self.recorder.into_map(),
            spectrum,
            gb: self.coefficients.gb().to_vec(),
        })
    }

    /// Current field state.
    #[must_use]
    pub fn grid(&self) -> &FieldGrid {
        &self.grid
    }

    /// Run configuration.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of completed steps.
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.time_step
    }

    /// The medium's conductivity coefficient profile (presentation overlay).
    #[must_use]
    pub fn gb_profile(&self) -> &[f64] {
        self.coefficients.gb()
    }
}

/// Everything the presentation layer consumes after a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Observation step to E-field copy
    pub snapshots: FxHashMap<usize, Vec<f64>>,
    /// Normalized amplitude/phase response per frequency per cell
    pub spectrum: SpectralResponse,
    /// Medium conductivity coefficient per cell, for overlay scaling only
    pub gb: Vec<f64>,
}

/// Runtime failures of the stepping loop and the final normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// A non-finite value appeared in the E or H field
    Instability {
        /// Step at which the first non-finite value was seen
        step: usize,
        /// Cell holding the value
        cell: usize,
    },
    /// The reference spectrum could not be normalized
    Spectrum(SpectrumError),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Instability { step, cell } => {
                write!(f, "numerical instability detected at step {step}, cell {cell}")
            }
            SolverError::Spectrum(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for SolverError {}

impl From<SpectrumError> for SolverError {
    fn from(error: SpectrumError) -> Self {
        SolverError::Spectrum(error)
    }
}
