//! Error types for circuit construction, simulation and estimation.

use thiserror::Error;

use crate::circuit::GateKind;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuantumError {
    /// A shot budget of zero cannot produce an expectation value.
    #[error("shot count must be positive, got 0")]
    ZeroShots,

    /// Backend returned counts that do not add up to the requested shots.
    #[error("outcome counts sum to {got} but {expected} shots were requested")]
    CountsMismatch { expected: usize, got: usize },

    #[error("{name} = {value} is not a probability in [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("ansatz expects {expected} parameters, got {got}")]
    AnsatzLength { expected: usize, got: usize },

    #[error("gate references qubit {qubit} but circuit only has {num_qubits} qubits")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    /// The MPS simulator only applies two-qubit gates on neighbouring sites.
    #[error("two-qubit gate on qubits {0} and {1}, which are not adjacent")]
    NonAdjacentQubits(usize, usize),

    #[error("two-qubit gate uses qubit {0} as both control and target")]
    SameQubit(usize),

    #[error("{kind:?} acts on {actual} qubit(s), cannot attach a {expected}-qubit channel")]
    GateArity {
        kind: GateKind,
        expected: usize,
        actual: usize,
    },

    #[error("shot list is empty")]
    EmptyShotList,
}

pub type QuantumResult<T> = Result<T, QuantumError>;
