//! Circuit execution: the [`Backend`] seam and the MPS shot simulator.

use std::time::Instant;

use rng::ShakeRng;
use tn::{mps::MPS, truncation::Truncation};
use tracing::debug;

use crate::circuit::{Circuit, Gate};
use crate::counts::{bitstring, ShotCounts};
use crate::error::{QuantumError, QuantumResult};
use crate::gates::{cnot, cnot_reversed, hadamard, pauli_x, ry, s_dagger};
use crate::measurement::{draw, measure_all};
use crate::noise::{depolarize, NoiseModel};

/// Executes a measured circuit for a number of shots.
pub trait Backend {
    /// Returns outcome counts summing to `shots`. `noise = None` is ideal.
    fn run(
        &mut self,
        circuit: &Circuit,
        shots: usize,
        noise: Option<&NoiseModel>,
    ) -> QuantumResult<ShotCounts>;
}

/// Shot simulator over an MPS register.
///
/// Ideal circuits are evolved once and `shots` outcomes are drawn from the
/// exact distribution. Noisy circuits run one stochastic trajectory per shot,
/// each ending in a qubit-by-qubit projective measurement.
pub struct MpsSimulator {
    rng: ShakeRng,
    trunc: Truncation,
}

impl MpsSimulator {
    pub fn new(rng: ShakeRng) -> Self {
        Self {
            rng,
            trunc: Truncation::exact(),
        }
    }

    pub fn from_seed(seed: &str) -> Self {
        Self::new(ShakeRng::new(seed.as_bytes()))
    }

    pub fn with_truncation(mut self, trunc: Truncation) -> Self {
        self.trunc = trunc;
        self
    }

    fn run_ideal(&mut self, circuit: &Circuit, shots: usize) -> ShotCounts {
        let psi = prepare_state(circuit, self.trunc);
        let probs = psi.probabilities();

        let mut tally = vec![0usize; probs.len()];
        for _ in 0..shots {
            tally[draw(&probs, &mut self.rng, b"SHOT")] += 1;
        }

        tally
            .into_iter()
            .enumerate()
            .filter(|&(_, c)| c > 0)
            .map(|(bits, c)| (bitstring(bits, circuit.num_qubits()), c))
            .collect()
    }

    fn run_noisy(&mut self, circuit: &Circuit, shots: usize, noise: &NoiseModel) -> ShotCounts {
        let mut counts = ShotCounts::new();
        let mut kicks = 0usize;

        for _ in 0..shots {
            let mut psi = MPS::new_zero(circuit.num_qubits());
            for gate in circuit.gates() {
                apply_gate(&mut psi, gate, self.trunc);
                let p = noise.error_rate(gate.kind());
                if depolarize(&mut psi, &gate.qubits(), p, &mut self.rng) {
                    kicks += 1;
                }
            }
            let bits = measure_all(&mut psi, &mut self.rng);
            counts.record(bitstring(bits, circuit.num_qubits()), 1);
        }

        debug!(kicks, shots, "noisy trajectories finished");
        counts
    }
}

impl Backend for MpsSimulator {
    fn run(
        &mut self,
        circuit: &Circuit,
        shots: usize,
        noise: Option<&NoiseModel>,
    ) -> QuantumResult<ShotCounts> {
        if shots == 0 {
            return Err(QuantumError::ZeroShots);
        }

        let start = Instant::now();
        let counts = match noise {
            Some(model) if !model.is_ideal() => self.run_noisy(circuit, shots, model),
            _ => self.run_ideal(circuit, shots),
        };

        debug!(
            qubits = circuit.num_qubits(),
            gates = circuit.gates().len(),
            shots,
            outcomes = counts.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "simulation finished"
        );
        Ok(counts)
    }
}

pub fn apply_gate(psi: &mut MPS, gate: &Gate, trunc: Truncation) {
    match *gate {
        Gate::H(q) => psi.apply_1q(q, hadamard()),
        Gate::X(q) => psi.apply_1q(q, pauli_x()),
        Gate::Sdg(q) => psi.apply_1q(q, s_dagger()),
        Gate::Ry(q, theta) => psi.apply_1q(q, ry(theta)),
        Gate::Cx { control, target } if control < target => {
            psi.apply_2q_svd(control, cnot(), trunc)
        }
        Gate::Cx { target, .. } => psi.apply_2q_svd(target, cnot_reversed(), trunc),
    }
}

/// Noiseless pre-measurement state of `circuit`.
pub fn prepare_state(circuit: &Circuit, trunc: Truncation) -> MPS {
    let mut psi = MPS::new_zero(circuit.num_qubits());
    for gate in circuit.gates() {
        apply_gate(&mut psi, gate, trunc);
    }
    psi
}
