//! Per-cell field state arrays.
//!
//! Pure data: the update sequencing lives in the solver. All arrays share
//! the same length and indexing, so index `k` always denotes the same
//! physical position across arrays and across time steps.

use serde::{Deserialize, Serialize};

/// Field state for the one-dimensional grid.
///
/// The dispersive auxiliary arrays `ix` (integrated conduction term) and
/// `sx` (polarization relaxation term) carry the Debye medium's memory
/// between steps; they stay zero in vacuum cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGrid {
    /// Electric field
    pub ex: Vec<f64>,
    /// Electric flux density
    pub dx: Vec<f64>,
    /// Magnetic field
    pub hy: Vec<f64>,
    /// Integrated conduction term
    pub ix: Vec<f64>,
    /// Polarization relaxation term
    pub sx: Vec<f64>,
}

impl FieldGrid {
    /// Create a grid of `cells` cells with all fields zero.
    #[must_use]
    pub fn new(cells: usize) -> Self {
        Self {
            ex: vec![0.0; cells],
            dx: vec![0.0; cells],
            hy: vec![0.0; cells],
            ix: vec![0.0; cells],
            sx: vec![0.0; cells],
        }
    }

    /// Number of cells.
    #[must_use]
    pub fn cells(&self) -> usize {
        self.ex.len()
    }

    /// Index of the first non-finite value in `ex` or `hy`, if any.
    ///
    /// A hit means the recurrence has gone numerically unstable; the run
    /// must stop rather than keep producing garbage.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<usize> {
        for (k, value) in self.ex.iter().enumerate() {
            if !value.is_finite() {
                return Some(k);
            }
        }
        for (k, value) in self.hy.iter().enumerate() {
            if !value.is_finite() {
                return Some(k);
            }
        }
        None
    }
}
