//! Two-qubit Pauli terms and their finite-shot expectation estimator.

use std::fmt;

use tn::mps::MPS;
use tracing::trace;

use crate::backend::Backend;
use crate::circuit::Circuit;
use crate::counts::ShotCounts;
use crate::error::{QuantumError, QuantumResult};
use crate::noise::NoiseModel;
use crate::observables::{expect_xx, expect_yy, expect_zz};

/// Two-qubit Pauli observable measured on qubits (0, 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PauliTerm {
    XX,
    YY,
    ZZ,
}

impl PauliTerm {
    pub const ALL: [PauliTerm; 3] = [PauliTerm::XX, PauliTerm::YY, PauliTerm::ZZ];

    /// Appends the rotation that maps this term's eigenbasis onto the
    /// computational basis.
    pub fn append_basis_rotation(self, qc: &mut Circuit) -> QuantumResult<()> {
        match self {
            PauliTerm::XX => {
                qc.h(0)?.h(1)?;
            }
            PauliTerm::YY => {
                qc.sdg(0)?.sdg(1)?;
                qc.h(0)?.h(1)?;
            }
            PauliTerm::ZZ => {}
        }
        Ok(())
    }

    /// Noiseless expectation on a prepared two-qubit state.
    pub fn exact_expectation(self, psi: &MPS) -> f64 {
        match self {
            PauliTerm::XX => expect_xx(psi, 0),
            PauliTerm::YY => expect_yy(psi, 0),
            PauliTerm::ZZ => expect_zz(psi, 0),
        }
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PauliTerm::XX => "XX",
            PauliTerm::YY => "YY",
            PauliTerm::ZZ => "ZZ",
        };
        f.write_str(s)
    }
}

/// Sign-parity reduction: Σ (-1)^popcount(b) · c / shots.
pub fn parity_expectation(counts: &ShotCounts, shots: usize) -> QuantumResult<f64> {
    if shots == 0 {
        return Err(QuantumError::ZeroShots);
    }
    let total = counts.total();
    if total != shots {
        return Err(QuantumError::CountsMismatch {
            expected: shots,
            got: total,
        });
    }

    let signed: i64 = counts
        .iter()
        .map(|(b, c)| {
            let ones = b.bytes().filter(|&ch| ch == b'1').count();
            if ones % 2 == 0 {
                c as i64
            } else {
                -(c as i64)
            }
        })
        .sum();

    Ok(signed as f64 / shots as f64)
}

/// Estimates ⟨term⟩ on the state prepared by `prepared` from `shots`
/// measurements executed on `backend`.
pub fn estimate_expectation<B: Backend + ?Sized>(
    backend: &mut B,
    term: PauliTerm,
    prepared: &Circuit,
    shots: usize,
    noise: Option<&NoiseModel>,
) -> QuantumResult<f64> {
    if shots == 0 {
        return Err(QuantumError::ZeroShots);
    }

    let mut qc = prepared.clone();
    term.append_basis_rotation(&mut qc)?;
    qc.measure_all();

    let counts = backend.run(&qc, shots, noise)?;
    let value = parity_expectation(&counts, shots)?;

    trace!(%term, shots, value, "pauli expectation");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Gate;

    #[test]
    fn basis_rotations_per_term() {
        let mut xx = Circuit::new(2);
        PauliTerm::XX.append_basis_rotation(&mut xx).unwrap();
        assert_eq!(xx.gates(), &[Gate::H(0), Gate::H(1)]);

        let mut yy = Circuit::new(2);
        PauliTerm::YY.append_basis_rotation(&mut yy).unwrap();
        assert_eq!(yy.gates(), &[Gate::Sdg(0), Gate::Sdg(1), Gate::H(0), Gate::H(1)]);

        let mut zz = Circuit::new(2);
        PauliTerm::ZZ.append_basis_rotation(&mut zz).unwrap();
        assert!(zz.gates().is_empty());
    }

    #[test]
    fn parity_reduction() {
        let counts: ShotCounts = [("00", 50), ("11", 30), ("01", 15), ("10", 5)]
            .into_iter()
            .collect();
        let e = parity_expectation(&counts, 100).unwrap();
        assert!((e - 0.6).abs() < 1e-12, "e = {}", e);
    }

    #[test]
    fn parity_rejects_zero_shots_and_mismatch() {
        let counts: ShotCounts = [("00", 10)].into_iter().collect();
        assert_eq!(parity_expectation(&counts, 0).unwrap_err(), QuantumError::ZeroShots);
        assert_eq!(
            parity_expectation(&counts, 12).unwrap_err(),
            QuantumError::CountsMismatch {
                expected: 12,
                got: 10
            }
        );
    }

    #[test]
    fn display_names() {
        let names: Vec<String> = PauliTerm::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(names, ["XX", "YY", "ZZ"]);
    }
}
