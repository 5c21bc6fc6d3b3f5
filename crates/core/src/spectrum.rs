//! Running discrete Fourier accumulation and spectral normalization.
//!
//! Instead of storing the full time history and transforming afterwards,
//! cos/sin-weighted sums are accumulated at every step for each target
//! frequency. The input pulse's own spectrum is captured the same way at a
//! probe cell while the pulse still has support there, and the per-cell
//! response is normalized against it once the run completes.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Running Fourier sums for `M` target frequencies over every grid cell.
#[derive(Debug, Clone)]
pub struct FourierMonitor {
    frequencies: Vec<f64>,
    /// Angular argument `2*pi*f*dt` per frequency, precomputed
    args: Vec<f64>,
    real_pt: Vec<Vec<f64>>,
    imag_pt: Vec<Vec<f64>>,
    real_in: Vec<f64>,
    imag_in: Vec<f64>,
    cells: usize,
    probe_cell: usize,
    /// Steps before this bound still carry the input pulse at the probe
    probe_cutoff: f64,
}

impl FourierMonitor {
    /// Create a monitor for the given target frequencies.
    ///
    /// The reference accumulation window is the first `3 * t0` steps, a
    /// bound on the support of the Gaussian pulse at the probe cell.
    #[must_use]
    pub fn new(frequencies: &[f64], dt: f64, cells: usize, probe_cell: usize, t0: f64) -> Self {
        let count = frequencies.len();
        Self {
            frequencies: frequencies.to_vec(),
            args: frequencies.iter().map(|f| 2.0 * PI * f * dt).collect(),
            real_pt: vec![vec![0.0; cells]; count],
            imag_pt: vec![vec![0.0; cells]; count],
            real_in: vec![0.0; count],
            imag_in: vec![0.0; count],
            cells,
            probe_cell,
            probe_cutoff: 3.0 * t0,
        }
    }

    /// Fold one step's E field into the running sums.
    pub fn accumulate(&mut self, step: usize, ex: &[f64]) {
        let t = step as f64;
        for (m, &arg) in self.args.iter().enumerate() {
            let (sin, cos) = (arg * t).sin_cos();
            let real = &mut self.real_pt[m];
            let imag = &mut self.imag_pt[m];
            for (k, &field) in ex.iter().enumerate() {
                real[k] += cos * field;
                imag[k] -= sin * field;
            }
            if t < self.probe_cutoff {
                self.real_in[m] += cos * ex[self.probe_cell];
                self.imag_in[m] -= sin * ex[self.probe_cell];
            }
        }
    }

    /// Convert the accumulated sums into amplitude and phase relative to
    /// the input pulse's spectrum. Runs once, after the step loop ends.
    ///
    /// # Errors
    ///
    /// [`SpectrumError::DegenerateReference`] if the reference amplitude is
    /// zero for some frequency: the pulse never reached the probe cell
    /// inside the accumulation window, and dividing by it would only turn
    /// a configuration problem into silent NaN output.
    pub fn normalize(&self) -> Result<SpectralResponse, SpectrumError> {
        let count = self.frequencies.len();
        let mut amp = Vec::with_capacity(count);
        let mut phase = Vec::with_capacity(count);
        let mut amp_in = Vec::with_capacity(count);
        let mut phase_in = Vec::with_capacity(count);

        for m in 0..count {
            let reference = (self.real_in[m] * self.real_in[m]
                + self.imag_in[m] * self.imag_in[m])
                .sqrt();
            if reference == 0.0 {
                return Err(SpectrumError::DegenerateReference {
                    frequency: self.frequencies[m],
                });
            }
            let reference_phase = self.imag_in[m].atan2(self.real_in[m]);

            let mut amp_m = Vec::with_capacity(self.cells);
            let mut phase_m = Vec::with_capacity(self.cells);
            for k in 0..self.cells {
                let real = self.real_pt[m][k];
                let imag = self.imag_pt[m][k];
                amp_m.push((real * real + imag * imag).sqrt() / reference);
                phase_m.push(imag.atan2(real) - reference_phase);
            }
            amp.push(amp_m);
            phase.push(phase_m);
            amp_in.push(reference);
            phase_in.push(reference_phase);
        }

        Ok(SpectralResponse {
            frequencies: self.frequencies.clone(),
            amp,
            phase,
            amp_in,
            phase_in,
        })
    }
}

/// Steady-state frequency-domain response, derived once after the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralResponse {
    /// Target frequencies (Hz)
    pub frequencies: Vec<f64>,
    /// Amplitude per frequency per cell, relative to the input spectrum
    pub amp: Vec<Vec<f64>>,
    /// Phase per frequency per cell, relative to the input spectrum (rad)
    pub phase: Vec<Vec<f64>>,
    /// Reference amplitude of the input pulse per frequency
    pub amp_in: Vec<f64>,
    /// Reference phase of the input pulse per frequency (rad)
    pub phase_in: Vec<f64>,
}

/// Normalization failures.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectrumError {
    /// The reference spectrum has zero amplitude at a frequency
    DegenerateReference {
        /// Frequency with the empty reference accumulation (Hz)
        frequency: f64,
    },
}

impl fmt::Display for SpectrumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpectrumError::DegenerateReference { frequency } => write!(
                f,
                "degenerate reference spectrum at {frequency:.3e} Hz: the input pulse \
                 never reached the probe cell during the accumulation window"
            ),
        }
    }
}

impl std::error::Error for SpectrumError {}
