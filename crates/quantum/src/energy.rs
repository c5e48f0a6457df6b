use tn::truncation::Truncation;
use tracing::debug;

use crate::backend::{prepare_state, Backend};
use crate::error::QuantumResult;
use crate::hamiltonian::HamiltonianSpec;
use crate::noise::NoiseModel;
use crate::pauli::{estimate_expectation, PauliTerm};
use crate::state_prep::StatePrep;

/// Shot-based energy with its per-term breakdown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyEstimate {
    pub energy: f64,
    pub xx: f64,
    pub yy: f64,
    pub zz: f64,
    /// Shots spent on each of the three terms.
    pub shots: usize,
}

impl EnergyEstimate {
    pub fn term(&self, term: PauliTerm) -> f64 {
        match term {
            PauliTerm::XX => self.xx,
            PauliTerm::YY => self.yy,
            PauliTerm::ZZ => self.zz,
        }
    }
}

/// J·(E[XX] + E[YY]) + Δ·E[ZZ], each term measured independently with its
/// own `shots` budget.
pub fn estimate_energy<B: Backend + ?Sized>(
    backend: &mut B,
    hamiltonian: &HamiltonianSpec,
    prep: &StatePrep,
    shots: usize,
    noise: Option<&NoiseModel>,
) -> QuantumResult<EnergyEstimate> {
    let prepared = prep.circuit()?;

    let xx = estimate_expectation(backend, PauliTerm::XX, &prepared, shots, noise)?;
    let yy = estimate_expectation(backend, PauliTerm::YY, &prepared, shots, noise)?;
    let zz = estimate_expectation(backend, PauliTerm::ZZ, &prepared, shots, noise)?;

    let energy = hamiltonian.j * (xx + yy) + hamiltonian.delta * zz;
    debug!(energy, xx, yy, zz, shots, "energy estimate");

    Ok(EnergyEstimate {
        energy,
        xx,
        yy,
        zz,
        shots,
    })
}

/// ⟨ψ|H|ψ⟩ of the prepared state without sampling or noise.
pub fn expected_energy(hamiltonian: &HamiltonianSpec, prep: &StatePrep) -> QuantumResult<f64> {
    let psi = prepare_state(&prep.circuit()?, Truncation::exact());
    let xx = PauliTerm::XX.exact_expectation(&psi);
    let yy = PauliTerm::YY.exact_expectation(&psi);
    let zz = PauliTerm::ZZ.exact_expectation(&psi);
    Ok(hamiltonian.j * (xx + yy) + hamiltonian.delta * zz)
}
