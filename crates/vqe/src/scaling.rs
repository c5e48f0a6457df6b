//! Shot-count sweeps: how the estimator error shrinks with more shots.

use quantum::{
    estimate_energy, Backend, BellState, HamiltonianSpec, MpsSimulator, NoiseConfig, QuantumError,
    StatePrep,
};
use rayon::prelude::*;
use rng::ShakeRng;
use tracing::info;

use crate::error::VqeResult;

pub const DEFAULT_SHOTS: [usize; 6] = [256, 512, 1024, 2048, 4096, 8192];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingPoint {
    pub shots: usize,
    pub energy: f64,
    /// |energy − reference|
    pub error: f64,
}

#[derive(Debug, Clone)]
pub struct ScalingConfig {
    pub hamiltonian: HamiltonianSpec,
    pub prep: StatePrep,
    pub shots: Vec<usize>,
    pub noise: Option<NoiseConfig>,
}

impl Default for ScalingConfig {
    /// XXZ with J = 1, Δ = 1.2 on the singlet reference state.
    fn default() -> Self {
        Self {
            hamiltonian: HamiltonianSpec::xxz(1.0, 1.2),
            prep: StatePrep::Fixed(BellState::PsiMinus),
            shots: DEFAULT_SHOTS.to_vec(),
            noise: None,
        }
    }
}

impl ScalingConfig {
    pub fn with_prep(mut self, prep: StatePrep) -> Self {
        self.prep = prep;
        self
    }

    pub fn with_shots(mut self, shots: Vec<usize>) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_noise(mut self, noise: Option<NoiseConfig>) -> Self {
        self.noise = noise;
        self
    }
}

/// Estimates the energy once per shot count, in order, and reports the
/// deviation from the exact ground-state energy.
pub fn shot_scaling<B: Backend + ?Sized>(
    backend: &mut B,
    config: &ScalingConfig,
) -> VqeResult<Vec<ScalingPoint>> {
    if config.shots.is_empty() {
        return Err(QuantumError::EmptyShotList.into());
    }
    let noise = config.noise.map(|n| n.basis_rotation_model()).transpose()?;
    let exact = config.hamiltonian.ground_energy();

    config
        .shots
        .iter()
        .map(|&shots| -> VqeResult<ScalingPoint> {
            let est = estimate_energy(
                &mut *backend,
                &config.hamiltonian,
                &config.prep,
                shots,
                noise.as_ref(),
            )?;
            let error = (est.energy - exact).abs();
            info!(shots, energy = est.energy, error, "shot-scaling point");
            Ok(ScalingPoint {
                shots,
                energy: est.energy,
                error,
            })
        })
        .collect()
}

/// Mean |estimate − reference| over `trials` independent seeded runs at a
/// single shot count. Trials run in parallel, each on its own simulator.
pub fn mean_absolute_error(
    config: &ScalingConfig,
    shots: usize,
    reference: f64,
    trials: usize,
    seed: &str,
) -> VqeResult<f64> {
    if trials == 0 {
        return Ok(0.0);
    }
    let noise = config.noise.map(|n| n.basis_rotation_model()).transpose()?;

    let errors: Vec<f64> = (0..trials)
        .into_par_iter()
        .map(|t| {
            let mut sim = MpsSimulator::new(ShakeRng::for_run(seed, &format!("shots-{}", shots), t));
            estimate_energy(&mut sim, &config.hamiltonian, &config.prep, shots, noise.as_ref())
                .map(|est| (est.energy - reference).abs())
        })
        .collect::<Result<_, _>>()?;

    Ok(errors.iter().sum::<f64>() / trials as f64)
}
