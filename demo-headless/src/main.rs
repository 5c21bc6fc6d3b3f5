use clap::Parser;
use wave_sim_core::{DebyeRegion, FdtdSolver, SimulationConfig};

/// 1D dispersive FDTD demo with configurable medium parameters
#[derive(Parser, Debug)]
#[command(name = "wave-sim-demo")]
#[command(about = "Pulsed plane wave through a Debye dielectric half-space", long_about = None)]
struct Args {
    /// Grid cell count
    #[arg(long, default_value_t = 200)]
    cells: usize,

    /// Number of time steps
    #[arg(short, long, default_value_t = 1000)]
    nsteps: usize,

    /// First cell of the dielectric region
    #[arg(long, default_value_t = 100)]
    medium_start: usize,

    /// Relative permittivity of the medium
    #[arg(long, default_value_t = 2.0)]
    epsr: f64,

    /// Conductivity of the medium (S/m)
    #[arg(long, default_value_t = 0.01)]
    sigma: f64,

    /// Debye susceptibility
    #[arg(long, default_value_t = 2.0)]
    chi: f64,

    /// Relaxation time (s)
    #[arg(long, default_value_t = 1e-9)]
    tau: f64,

    /// Pulse center (time steps)
    #[arg(long, default_value_t = 50.0)]
    t0: f64,

    /// Pulse width (time steps)
    #[arg(long, default_value_t = 10.0)]
    spread: f64,

    /// Target frequency in Hz (repeat for several)
    #[arg(short, long)]
    frequency: Vec<f64>,

    /// Snapshot step (repeat for several)
    #[arg(short, long)]
    snapshot: Vec<usize>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== 1D Dispersive FDTD Demo ===\n");

    let mut config = SimulationConfig::textbook();
    config.cells = args.cells;
    config.nsteps = args.nsteps;
    config.t0 = args.t0;
    config.spread = args.spread;
    config.medium = DebyeRegion {
        start: args.medium_start,
        epsr: args.epsr,
        sigma: args.sigma,
        chi: args.chi,
        tau: args.tau,
    };
    if !args.frequency.is_empty() {
        config.frequencies = args.frequency;
    }
    if !args.snapshot.is_empty() {
        config.snapshot_steps = args.snapshot;
    }
    // Drop default observation steps the shortened run can never reach
    config.snapshot_steps.retain(|&step| step <= config.nsteps);

    println!(
        "Grid: {} cells of {:.1} cm, dt = {:.3e} s, {} steps",
        config.cells,
        config.cell_size * 100.0,
        config.dt,
        config.nsteps
    );
    println!(
        "Medium: cells {}..{}, epsr = {}, sigma = {} S/m, chi = {}, tau = {:.1e} s",
        config.medium.start, config.cells, config.medium.epsr, config.medium.sigma,
        config.medium.chi, config.medium.tau
    );
    let frequencies_mhz: Vec<f64> = config.frequencies.iter().map(|f| f / 1e6).collect();
    println!("Frequencies: {frequencies_mhz:?} MHz\n");

    let solver = match FdtdSolver::new(config) {
        Ok(solver) => solver,
        Err(error) => {
            eprintln!("Configuration error: {error}");
            std::process::exit(1);
        }
    };

    let output = match solver.run() {
        Ok(output) => output,
        Err(error) => {
            eprintln!("Simulation failed: {error}");
            std::process::exit(1);
        }
    };

    let mut steps: Vec<usize> = output.snapshots.keys().copied().collect();
    steps.sort_unstable();
    for step in steps {
        let ex = &output.snapshots[&step];
        let peak_cell = (0..ex.len())
            .max_by(|&a, &b| ex[a].abs().total_cmp(&ex[b].abs()))
            .unwrap_or(0);
        println!(
            "Snapshot at step {step}: peak |Ex| = {:.4} at cell {peak_cell}",
            ex[peak_cell].abs()
        );
    }

    let cells = output.gb.len();
    let probes = [cells / 4, cells * 5 / 8, cells * 9 / 10];
    println!("\nFrequency response (amplitude relative to the input pulse):");
    println!(
        "{:>12} {:>12} {:>12} {:>12}",
        "freq (MHz)",
        format!("cell {}", probes[0]),
        format!("cell {}", probes[1]),
        format!("cell {}", probes[2])
    );
    for (m, &frequency) in output.spectrum.frequencies.iter().enumerate() {
        println!(
            "{:>12.0} {:>12.4} {:>12.4} {:>12.4}",
            frequency / 1e6,
            output.spectrum.amp[m][probes[0]],
            output.spectrum.amp[m][probes[1]],
            output.spectrum.amp[m][probes[2]]
        );
    }

    println!("\nPhase shift at the same cells (radians):");
    for (m, &frequency) in output.spectrum.frequencies.iter().enumerate() {
        println!(
            "{:>12.0} {:>12.4} {:>12.4} {:>12.4}",
            frequency / 1e6,
            output.spectrum.phase[m][probes[0]],
            output.spectrum.phase[m][probes[1]],
            output.spectrum.phase[m][probes[2]]
        );
    }
}
