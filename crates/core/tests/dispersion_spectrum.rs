//! Dispersion and Spectrum Validation Suite
//!
//! Runs the textbook scenario (200 cells, Debye half-space from cell 100,
//! probed at 50/200/500 MHz) end to end and checks the documented waveform
//! shape and the frequency-domain response, plus the spectral behavior in
//! pure vacuum and the degenerate-reference error path.
//!
//! # Test Categories
//! 1. Textbook scenario waveform shape
//! 2. Frequency-domain attenuation inside the medium
//! 3. Spectral energy conservation in vacuum
//! 4. Degenerate reference spectrum detection

use wave_sim_core::{
    DebyeRegion, FdtdSolver, SimulationConfig, SimulationOutput, SolverError, SpectrumError,
};

fn run_textbook() -> SimulationOutput {
    FdtdSolver::new(SimulationConfig::textbook())
        .expect("valid config")
        .run()
        .expect("stable run")
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()))
}

// ═══════════════════════════════════════════════════════════════════════
// SECTION 1: TEXTBOOK WAVEFORM SHAPE
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_snapshots_cover_both_observation_steps() {
    let output = run_textbook();
    assert_eq!(output.snapshots.len(), 2);
    assert_eq!(output.snapshots[&250].len(), 200);
    assert_eq!(output.snapshots[&1000].len(), 200);
}

/// At step 250 the pulse is arriving at the dielectric interface: its peak
/// sits near cell 100 and nothing has penetrated deep into the medium.
#[test]
fn test_step_250_pulse_reaches_the_interface() {
    let output = run_textbook();
    let ex = &output.snapshots[&250];

    let peak_cell = (0..ex.len())
        .max_by(|&a, &b| ex[a].abs().total_cmp(&ex[b].abs()))
        .expect("non-empty snapshot");
    assert!(
        (95..112).contains(&peak_cell),
        "pulse peak at cell {peak_cell}, expected near the interface at 100"
    );

    let peak = ex[peak_cell].abs();
    assert!(
        peak > 0.3 && peak < 1.1,
        "pulse peak amplitude {peak:.3} outside the expected range"
    );

    let deep = max_abs(&ex[120..]);
    assert!(
        deep < 1e-3,
        "field {deep:.3e} deep inside the medium before the pulse could get there"
    );
}

/// By step 1000 the transmitted wave has been attenuated by the lossy
/// medium: a small but measurable residual remains past the interface.
#[test]
fn test_step_1000_transmission_is_attenuated() {
    let output = run_textbook();
    let ex = &output.snapshots[&1000];

    let residual = max_abs(&ex[100..]);
    assert!(
        residual > 1e-4,
        "no transmitted field at all past the interface"
    );
    assert!(
        residual < 1e-2,
        "transmitted field {residual:.3e} barely attenuated"
    );
    assert!(max_abs(ex) < 0.05, "domain should be nearly quiet by step 1000");
}

// ═══════════════════════════════════════════════════════════════════════
// SECTION 2: FREQUENCY-DOMAIN ATTENUATION
// ═══════════════════════════════════════════════════════════════════════

/// Amplitude inside the medium is attenuated at every target frequency,
/// while the vacuum side stays near unity (standing-wave ripple from the
/// interface reflection included).
#[test]
fn test_amplitude_attenuated_beyond_the_interface() {
    let output = run_textbook();

    for (m, &frequency) in output.spectrum.frequencies.iter().enumerate() {
        let amp = &output.spectrum.amp[m];
        for (k, &a) in amp.iter().enumerate().take(180).skip(120) {
            assert!(
                a < 0.7,
                "amplitude {a:.3} at cell {k} not attenuated at {frequency:.0} Hz"
            );
        }
        for (k, &a) in amp.iter().enumerate().take(90).skip(20) {
            assert!(
                (0.5..1.5).contains(&a),
                "vacuum amplitude {a:.3} at cell {k} out of range at {frequency:.0} Hz"
            );
        }
    }
}

#[test]
fn test_reference_spectrum_has_support_at_all_frequencies() {
    let output = run_textbook();
    for (m, &amp_in) in output.spectrum.amp_in.iter().enumerate() {
        assert!(
            amp_in > 10.0,
            "weak reference amplitude {amp_in:.3} for frequency index {m}"
        );
    }
}

#[test]
fn test_phase_stays_in_principal_range() {
    let output = run_textbook();
    for phase_m in &output.spectrum.phase {
        for &p in phase_m {
            assert!(p.is_finite());
            assert!(p.abs() < 7.0, "phase {p:.3} outside (-2pi, 2pi)");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SECTION 3: VACUUM SPECTRAL ENERGY CONSERVATION
// ═══════════════════════════════════════════════════════════════════════

/// In lossless vacuum each cell sees the same pulse the probe saw, so the
/// normalized amplitude settles at 1 everywhere away from the edges.
#[test]
fn test_vacuum_amplitude_is_unity() {
    let config = SimulationConfig {
        medium: DebyeRegion::vacuum(),
        ..SimulationConfig::textbook()
    };
    let output = FdtdSolver::new(config)
        .expect("valid config")
        .run()
        .expect("stable run");

    for (m, amp_m) in output.spectrum.amp.iter().enumerate() {
        for (k, &a) in amp_m.iter().enumerate().take(180).skip(20) {
            assert!(
                (a - 1.0).abs() < 1e-2,
                "vacuum amplitude {a:.5} at cell {k}, frequency index {m}"
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SECTION 4: DEGENERATE REFERENCE SPECTRUM
// ═══════════════════════════════════════════════════════════════════════

/// A pulse centered so early that the accumulation window closes before
/// the wave reaches the probe cell leaves a zero reference spectrum; the
/// normalizer must refuse rather than emit NaN.
#[test]
fn test_empty_reference_window_is_rejected() {
    let mut config = SimulationConfig::textbook();
    config.t0 = 0.5;
    config.nsteps = 100;
    config.snapshot_steps = Vec::new();

    let result = FdtdSolver::new(config).expect("valid config").run();
    match result {
        Err(SolverError::Spectrum(SpectrumError::DegenerateReference { frequency })) => {
            assert_eq!(frequency, 50e6, "first degenerate frequency reported");
        }
        other => panic!("expected degenerate reference spectrum, got {other:?}"),
    }
}
