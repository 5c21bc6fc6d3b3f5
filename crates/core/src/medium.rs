//! Debye material profile and per-cell update coefficients.
//!
//! The layered permittivity/conductivity/susceptibility description is
//! folded into three coefficient arrays once, before the run starts. The
//! field update never consults the physical constants again.

use crate::config::DebyeRegion;

/// Permittivity of free space (F/m)
pub const VACUUM_PERMITTIVITY: f64 = 8.854e-12;

/// Per-cell update coefficients for the auxiliary-differential-equation
/// form of the Debye medium.
///
/// Immutable after construction. Vacuum cells carry `ga = 1`, `gb = 0`,
/// `gc = 0`, which reduces the E update to `ex[k] = dx[k]`.
#[derive(Debug, Clone)]
pub struct MediumCoefficients {
    ga: Vec<f64>,
    gb: Vec<f64>,
    gc: Vec<f64>,
    del_exp: f64,
}

impl MediumCoefficients {
    /// Fold a dielectric region and the time step into coefficient arrays
    /// covering the whole grid.
    ///
    /// Inputs are caller-validated positive physical quantities; this is
    /// pure function composition with no error paths.
    #[must_use]
    pub fn build(region: &DebyeRegion, dt: f64, cells: usize) -> Self {
        let mut ga = vec![1.0; cells];
        let mut gb = vec![0.0; cells];
        let mut gc = vec![0.0; cells];

        let sigma_term = region.sigma * dt / VACUUM_PERMITTIVITY;
        let chi_term = region.chi * dt / region.tau;
        for k in region.start..cells {
            ga[k] = 1.0 / (region.epsr + sigma_term + chi_term);
            gb[k] = sigma_term;
            gc[k] = chi_term;
        }

        Self {
            ga,
            gb,
            gc,
            del_exp: (-dt / region.tau).exp(),
        }
    }

    /// Inverse-permittivity coefficient per cell.
    #[must_use]
    pub fn ga(&self) -> &[f64] {
        &self.ga
    }

    /// Conductivity coefficient per cell. Also exposed to the presentation
    /// layer for overlay scaling of the medium extent.
    #[must_use]
    pub fn gb(&self) -> &[f64] {
        &self.gb
    }

    /// Susceptibility coefficient per cell.
    #[must_use]
    pub fn gc(&self) -> &[f64] {
        &self.gc
    }

    /// Per-step decay factor `exp(-dt/tau)` of the relaxation term.
    #[must_use]
    pub fn del_exp(&self) -> f64 {
        self.del_exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn textbook_region() -> DebyeRegion {
        DebyeRegion {
            start: 100,
            epsr: 2.0,
            sigma: 0.01,
            chi: 2.0,
            tau: 1e-9,
        }
    }

    #[test]
    fn test_vacuum_cells_before_region() {
        let dt = 0.01 / 6e8;
        let coeffs = MediumCoefficients::build(&textbook_region(), dt, 200);
        for k in 0..100 {
            assert_eq!(coeffs.ga()[k], 1.0, "cell {k}");
            assert_eq!(coeffs.gb()[k], 0.0, "cell {k}");
            assert_eq!(coeffs.gc()[k], 0.0, "cell {k}");
        }
    }

    #[test]
    fn test_dispersive_cells_match_formulas() {
        let dt = 0.01 / 6e8;
        let region = textbook_region();
        let coeffs = MediumCoefficients::build(&region, dt, 200);

        let sigma_term = region.sigma * dt / VACUUM_PERMITTIVITY;
        let chi_term = region.chi * dt / region.tau;
        let expected_ga = 1.0 / (region.epsr + sigma_term + chi_term);
        for k in 100..200 {
            assert_eq!(coeffs.ga()[k], expected_ga, "cell {k}");
            assert_eq!(coeffs.gb()[k], sigma_term, "cell {k}");
            assert_eq!(coeffs.gc()[k], chi_term, "cell {k}");
        }
    }

    #[test]
    fn test_decay_factor() {
        let dt = 0.01 / 6e8;
        let coeffs = MediumCoefficients::build(&textbook_region(), dt, 200);
        assert_relative_eq!(coeffs.del_exp(), (-dt / 1e-9).exp(), max_relative = 1e-15);
        assert!(coeffs.del_exp() < 1.0);
        assert!(coeffs.del_exp() > 0.9);
    }

    #[test]
    fn test_region_start_zero_covers_whole_grid() {
        let mut region = textbook_region();
        region.start = 0;
        let coeffs = MediumCoefficients::build(&region, 0.01 / 6e8, 50);
        assert!(coeffs.ga().iter().all(|&g| g < 1.0));
    }
}
