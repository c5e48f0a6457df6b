//! Pre-measurement state preparation: fixed Bell references and the
//! two-angle RY ansatz.

use crate::circuit::Circuit;
use crate::error::{QuantumError, QuantumResult};

/// Number of angles the ansatz takes.
pub const ANSATZ_LEN: usize = 2;

/// The four maximally entangled two-qubit states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BellState {
    /// (|00⟩ + |11⟩)/√2
    PhiPlus,
    /// (|00⟩ − |11⟩)/√2
    PhiMinus,
    /// (|01⟩ + |10⟩)/√2
    PsiPlus,
    /// (|01⟩ − |10⟩)/√2, the singlet; ground state of J > 0 Heisenberg/XXZ.
    #[default]
    PsiMinus,
}

impl BellState {
    /// X flips on (qubit 0, qubit 1) applied before H(0)·CX(0,1).
    fn flips(self) -> (bool, bool) {
        match self {
            BellState::PhiPlus => (false, false),
            BellState::PhiMinus => (true, false),
            BellState::PsiPlus => (false, true),
            BellState::PsiMinus => (true, true),
        }
    }
}

/// Ansatz rotation angles, validated to [`ANSATZ_LEN`] entries.
#[derive(Clone, Debug, PartialEq)]
pub struct AnsatzParams(Vec<f64>);

impl AnsatzParams {
    pub fn new(params: Vec<f64>) -> QuantumResult<Self> {
        if params.len() != ANSATZ_LEN {
            return Err(QuantumError::AnsatzLength {
                expected: ANSATZ_LEN,
                got: params.len(),
            });
        }
        Ok(Self(params))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<&[f64]> for AnsatzParams {
    type Error = QuantumError;

    fn try_from(params: &[f64]) -> QuantumResult<Self> {
        Self::new(params.to_vec())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatePrep {
    Fixed(BellState),
    Ansatz(AnsatzParams),
}

impl StatePrep {
    /// Two-qubit preparation circuit, without measurement.
    pub fn circuit(&self) -> QuantumResult<Circuit> {
        let mut qc = Circuit::new(2);
        match self {
            StatePrep::Fixed(bell) => {
                let (flip0, flip1) = bell.flips();
                if flip0 {
                    qc.x(0)?;
                }
                if flip1 {
                    qc.x(1)?;
                }
                qc.h(0)?.cx(0, 1)?;
            }
            StatePrep::Ansatz(params) => {
                let theta = params.as_slice();
                qc.ry(0, theta[0])?.ry(1, theta[1])?.cx(0, 1)?;
            }
        }
        Ok(qc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::prepare_state;
    use crate::circuit::Gate;
    use tn::truncation::Truncation;

    #[test]
    fn phi_plus_is_hadamard_then_cx() {
        let qc = StatePrep::Fixed(BellState::PhiPlus).circuit().unwrap();
        assert_eq!(qc.gates(), &[Gate::H(0), Gate::Cx { control: 0, target: 1 }]);
        assert!(!qc.is_measured());
    }

    #[test]
    fn bell_amplitudes() {
        let s = 1.0 / 2.0_f64.sqrt();
        let cases = [
            (BellState::PhiPlus, [s, 0.0, 0.0, s]),
            (BellState::PhiMinus, [s, 0.0, 0.0, -s]),
            (BellState::PsiPlus, [0.0, s, s, 0.0]),
            (BellState::PsiMinus, [0.0, s, -s, 0.0]),
        ];
        for (bell, want) in cases {
            let psi = prepare_state(&StatePrep::Fixed(bell).circuit().unwrap(), Truncation::exact());
            // Index order (qubit 0, qubit 1); compare up to a global phase.
            let amps: Vec<_> = [[0, 0], [0, 1], [1, 0], [1, 1]]
                .iter()
                .map(|b| psi.amplitude(b))
                .collect();
            let pivot = amps.iter().position(|a| a.norm() > 0.5).unwrap();
            let phase = amps[pivot] / amps[pivot].norm() / want[pivot].signum();
            for (a, w) in amps.iter().zip(want) {
                assert!((a / phase - w).norm() < 1e-12, "{:?}: {:?}", bell, amps);
            }
        }
    }

    #[test]
    fn ansatz_is_deterministic() {
        let p = AnsatzParams::new(vec![0.3, 1.7]).unwrap();
        let a = StatePrep::Ansatz(p.clone()).circuit().unwrap();
        let b = StatePrep::Ansatz(p).circuit().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.gates()[0], Gate::Ry(0, 0.3));
        assert_eq!(a.gates()[1], Gate::Ry(1, 1.7));
    }

    #[test]
    fn ansatz_length_checked() {
        assert_eq!(
            AnsatzParams::new(vec![0.1]).unwrap_err(),
            QuantumError::AnsatzLength { expected: 2, got: 1 }
        );
        assert!(AnsatzParams::try_from(&[0.1, 0.2, 0.3][..]).is_err());
    }
}
