//! Depolarizing noise: configuration, gate attachment and the
//! trajectory-level channel applied by the simulator.

use crate::circuit::GateKind;
use crate::error::{QuantumError, QuantumResult};
use crate::gates::{identity, pauli_x, pauli_y, pauli_z, C64};
use rng::ShakeRng;
use tn::mps::MPS;

/// Depolarizing error rates for single-qubit (`p1`) and two-qubit (`p2`) gates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseConfig {
    pub p1: f64,
    pub p2: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { p1: 0.001, p2: 0.01 }
    }
}

impl NoiseConfig {
    pub fn new(p1: f64, p2: f64) -> QuantumResult<Self> {
        check_probability("p1", p1)?;
        check_probability("p2", p2)?;
        Ok(Self { p1, p2 })
    }

    /// `p1` on the measurement basis rotations (H, S†), `p2` on CX.
    pub fn basis_rotation_model(self) -> QuantumResult<NoiseModel> {
        NoiseModel::depolarizing(self, &[GateKind::H, GateKind::Sdg], &[GateKind::Cx])
    }
}

fn check_probability(name: &'static str, value: f64) -> QuantumResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(QuantumError::InvalidProbability { name, value })
    }
}

/// Depolarizing channels keyed by gate kind. Gates not listed are ideal.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseModel {
    channels: Vec<(GateKind, f64)>,
}

impl NoiseModel {
    pub fn depolarizing(
        config: NoiseConfig,
        single_qubit: &[GateKind],
        two_qubit: &[GateKind],
    ) -> QuantumResult<Self> {
        check_probability("p1", config.p1)?;
        check_probability("p2", config.p2)?;

        let mut channels = Vec::with_capacity(single_qubit.len() + two_qubit.len());
        for (kinds, arity, p) in [(single_qubit, 1, config.p1), (two_qubit, 2, config.p2)] {
            for &kind in kinds {
                if kind.arity() != arity {
                    return Err(QuantumError::GateArity {
                        kind,
                        expected: arity,
                        actual: kind.arity(),
                    });
                }
                channels.push((kind, p));
            }
        }
        Ok(Self { channels })
    }

    /// Error probability attached to `kind`, zero when none is.
    pub fn error_rate(&self, kind: GateKind) -> f64 {
        self.channels
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0.0, |&(_, p)| p)
    }

    pub fn is_ideal(&self) -> bool {
        self.channels.iter().all(|&(_, p)| p == 0.0)
    }
}

fn pauli(index: usize) -> [[C64; 2]; 2] {
    match index {
        0 => identity(),
        1 => pauli_x(),
        2 => pauli_y(),
        _ => pauli_z(),
    }
}

/// With probability `p`, replaces `qubits` by the fully mixed state: a
/// uniformly random element of the n-qubit Pauli group (identity included)
/// is applied. Returns whether a non-identity Pauli was applied.
pub fn depolarize(psi: &mut MPS, qubits: &[usize], p: f64, rng: &mut ShakeRng) -> bool {
    if p <= 0.0 {
        return false;
    }

    let x = rng.next_f64(b"DEPOLARIZE");
    if x >= p {
        return false;
    }

    let group = 1usize << (2 * qubits.len());
    let mut pick = (((x / p) * group as f64) as usize).min(group - 1);
    if pick == 0 {
        return false;
    }

    for &q in qubits {
        let idx = pick % 4;
        pick /= 4;
        if idx != 0 {
            psi.apply_1q(q, pauli(idx));
        }
    }
    true
}
