//! Minimal variational loop: RY ansatz energy estimated from shots,
//! minimized by a derivative-free optimizer.

use quantum::{
    estimate_energy, AnsatzParams, Backend, HamiltonianSpec, MpsSimulator, NoiseConfig,
    NoiseModel, StatePrep, ANSATZ_LEN,
};
use rayon::prelude::*;
use rng::ShakeRng;
use tracing::info;

use crate::error::{VqeError, VqeResult};
use crate::optimizer::{NelderMead, Optimizer};

#[derive(Debug, Clone)]
pub struct VqeConfig {
    pub hamiltonian: HamiltonianSpec,
    /// Shots per Pauli term per objective evaluation.
    pub shots: usize,
    /// Depolarizing rates on basis rotations and CX; `None` is ideal.
    pub noise: Option<NoiseConfig>,
    /// Initial angles are drawn uniformly from `[lo, hi)`.
    pub init_range: (f64, f64),
    pub optimizer: NelderMead,
}

impl Default for VqeConfig {
    fn default() -> Self {
        Self {
            hamiltonian: HamiltonianSpec::heisenberg(1.0),
            shots: 2048,
            noise: None,
            init_range: (0.0, 1.0),
            optimizer: NelderMead::default(),
        }
    }
}

impl VqeConfig {
    pub fn with_hamiltonian(mut self, hamiltonian: HamiltonianSpec) -> Self {
        self.hamiltonian = hamiltonian;
        self
    }

    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_noise(mut self, noise: Option<NoiseConfig>) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_init_range(mut self, lo: f64, hi: f64) -> Self {
        self.init_range = (lo, hi);
        self
    }

    pub fn with_optimizer(mut self, optimizer: NelderMead) -> Self {
        self.optimizer = optimizer;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VqeOutcome {
    pub initial_params: Vec<f64>,
    pub params: Vec<f64>,
    /// Noisy estimate recorded at `params`.
    pub energy: f64,
    /// Exact ground-state energy of the Hamiltonian.
    pub exact_energy: f64,
    pub evaluations: usize,
    pub iterations: usize,
    pub converged: bool,
    pub history: Vec<f64>,
}

/// Draws `ANSATZ_LEN` angles uniformly from `[lo, hi)`.
pub fn initial_params(rng: &mut ShakeRng, (lo, hi): (f64, f64)) -> VqeResult<Vec<f64>> {
    if lo.is_nan() || hi.is_nan() || hi <= lo {
        return Err(VqeError::EmptyRange { lo, hi });
    }
    Ok((0..ANSATZ_LEN).map(|_| rng.uniform(lo, hi, b"VQE_INIT")).collect())
}

/// Estimated ansatz energy at `params`, the VQE objective.
pub fn ansatz_energy<B: Backend + ?Sized>(
    backend: &mut B,
    config: &VqeConfig,
    params: &[f64],
) -> VqeResult<f64> {
    let noise = config.noise.map(|n| n.basis_rotation_model()).transpose()?;
    energy_at(backend, config, noise.as_ref(), params)
}

fn energy_at<B: Backend + ?Sized>(
    backend: &mut B,
    config: &VqeConfig,
    noise: Option<&NoiseModel>,
    params: &[f64],
) -> VqeResult<f64> {
    let prep = StatePrep::Ansatz(AnsatzParams::try_from(params)?);
    let estimate = estimate_energy(backend, &config.hamiltonian, &prep, config.shots, noise)?;
    Ok(estimate.energy)
}

/// Runs one VQE from a random start drawn from `rng`. Sampling randomness
/// comes from `backend`.
pub fn run_vqe<B: Backend + ?Sized>(
    backend: &mut B,
    config: &VqeConfig,
    rng: &mut ShakeRng,
) -> VqeResult<VqeOutcome> {
    let start = initial_params(rng, config.init_range)?;
    run_vqe_from(backend, config, start)
}

/// Runs one VQE from the given starting angles.
pub fn run_vqe_from<B: Backend + ?Sized>(
    backend: &mut B,
    config: &VqeConfig,
    start: Vec<f64>,
) -> VqeResult<VqeOutcome> {
    if config.shots == 0 {
        return Err(quantum::QuantumError::ZeroShots.into());
    }
    let noise = config.noise.map(|n| n.basis_rotation_model()).transpose()?;

    info!(
        model = ?config.hamiltonian.model,
        shots = config.shots,
        noisy = noise.is_some(),
        start = ?start,
        "starting VQE"
    );

    let objective = |params: &[f64]| energy_at(&mut *backend, config, noise.as_ref(), params);

    let result = config.optimizer.minimize(objective, start.clone())?;
    let exact_energy = config.hamiltonian.ground_energy();

    info!(
        energy = result.value,
        exact_energy,
        evaluations = result.evaluations,
        converged = result.converged,
        "VQE finished"
    );

    Ok(VqeOutcome {
        initial_params: start,
        params: result.params,
        energy: result.value,
        exact_energy,
        evaluations: result.evaluations,
        iterations: result.iterations,
        converged: result.converged,
        history: result.history,
    })
}

/// Independent restarts, each with its own simulator and random stream
/// derived from `seed`. Results are in restart order.
pub fn run_multi_start(config: &VqeConfig, seed: &str, restarts: usize) -> VqeResult<Vec<VqeOutcome>> {
    (0..restarts)
        .into_par_iter()
        .map(|i| {
            let mut sim = MpsSimulator::new(ShakeRng::for_run(seed, "vqe-shots", i));
            let mut rng = ShakeRng::for_run(seed, "vqe-init", i);
            run_vqe(&mut sim, config, &mut rng)
        })
        .collect()
}

/// Restart with the lowest recorded energy.
pub fn best_outcome(outcomes: &[VqeOutcome]) -> Option<&VqeOutcome> {
    outcomes.iter().min_by(|a, b| a.energy.total_cmp(&b.energy))
}
