//! Two-qubit spin Hamiltonians: exact reference energies, finite-shot Pauli
//! measurement on a simulated register, and the energy estimator built on it.

pub mod backend;
pub mod circuit;
pub mod counts;
pub mod energy;
pub mod error;
pub mod gates;
pub mod hamiltonian;
pub mod measurement;
pub mod noise;
pub mod observables;
pub mod pauli;
pub mod state_prep;
mod env;

pub use backend::{Backend, MpsSimulator};
pub use circuit::{Circuit, Gate, GateKind};
pub use counts::ShotCounts;
pub use energy::{estimate_energy, expected_energy, EnergyEstimate};
pub use error::{QuantumError, QuantumResult};
pub use hamiltonian::{heisenberg_energy, xxz_energy, HamiltonianSpec, SpinModel};
pub use noise::{NoiseConfig, NoiseModel};
pub use pauli::{estimate_expectation, parity_expectation, PauliTerm};
pub use state_prep::{AnsatzParams, BellState, StatePrep, ANSATZ_LEN};
