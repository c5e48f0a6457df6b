use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quantum::{heisenberg_energy, MpsSimulator, NoiseConfig};
use rng::ShakeRng;
use vqe::{
    best_outcome, run_multi_start, run_vqe, shot_scaling, write_scaling_csv, NelderMead,
    ScalingConfig, VqeConfig,
};

/// Two-qubit spin energy: shot-noise scaling (XXZ) and minimal VQE (Heisenberg)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed (full reproducibility)
    #[arg(long, default_value = "spin-energy")]
    seed: String,

    /// Comma-separated shot counts for the scaling sweep
    #[arg(long, default_value = "256,512,1024,2048,4096,8192")]
    shots: String,

    /// Shots per Pauli term per VQE objective evaluation
    #[arg(long, default_value_t = 2048)]
    vqe_shots: usize,

    /// Enable depolarizing noise on basis rotations and CX
    #[arg(long)]
    noisy: bool,

    /// Single-qubit depolarizing probability (with --noisy)
    #[arg(long, default_value_t = 0.001)]
    p1: f64,

    /// Two-qubit depolarizing probability (with --noisy)
    #[arg(long, default_value_t = 0.01)]
    p2: f64,

    /// Number of independent VQE starts; the best is reported
    #[arg(long, default_value_t = 1)]
    restarts: usize,

    /// Maximum Nelder-Mead iterations per VQE run
    #[arg(long, default_value_t = 200)]
    max_iterations: usize,

    /// Write the error-vs-shots table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let noise = if args.noisy {
        Some(NoiseConfig::new(args.p1, args.p2)?)
    } else {
        None
    };

    // --------------------------------------------------
    // Shot-noise scaling (XXZ, J = 1, Δ = 1.2)
    // --------------------------------------------------
    println!("\n--- Shot-noise scaling (XXZ) ---");

    let shots = parse_list(&args.shots)?;
    let scaling = ScalingConfig::default().with_shots(shots).with_noise(noise);
    let mut sim = MpsSimulator::new(ShakeRng::for_run(&args.seed, "scaling", 0));

    let points = shot_scaling(&mut sim, &scaling)?;
    for p in &points {
        println!(
            "Shots: {:5} | Energy: {:.4} | Error: {:.2e}",
            p.shots, p.energy, p.error
        );
    }

    if let Some(path) = &args.csv {
        write_scaling_csv(path, &points)?;
        info!(path = %path.display(), "wrote error-vs-shots table");
    }

    // --------------------------------------------------
    // Minimal VQE (Heisenberg, J = 1)
    // --------------------------------------------------
    println!("\n--- Minimal VQE (Heisenberg) ---");

    let config = VqeConfig::default()
        .with_shots(args.vqe_shots)
        .with_noise(noise)
        .with_optimizer(NelderMead::new().with_max_iterations(args.max_iterations));

    let outcome = if args.restarts <= 1 {
        let mut sim = MpsSimulator::new(ShakeRng::for_run(&args.seed, "vqe-shots", 0));
        let mut rng = ShakeRng::for_run(&args.seed, "vqe-init", 0);
        run_vqe(&mut sim, &config, &mut rng)?
    } else {
        let outcomes = run_multi_start(&config, &args.seed, args.restarts)?;
        best_outcome(&outcomes)
            .cloned()
            .context("no VQE restart produced a result")?
    };

    println!("VQE optimal energy: {}", outcome.energy);
    println!("Exact energy: {}", heisenberg_energy(1.0));

    Ok(())
}

fn parse_list(input: &str) -> Result<Vec<usize>> {
    let values = input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<usize>()
                .with_context(|| format!("invalid shot count '{}'", t))
        })
        .collect::<Result<Vec<_>>>()?;

    if values.is_empty() {
        bail!("--shots must contain at least one integer value");
    }
    Ok(values)
}
