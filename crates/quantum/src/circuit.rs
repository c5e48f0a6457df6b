//! Circuit description handed to a [`Backend`](crate::backend::Backend).

use crate::error::{QuantumError, QuantumResult};

/// Gate family, used to key noise channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    H,
    X,
    Sdg,
    Ry,
    Cx,
}

impl GateKind {
    pub fn arity(self) -> usize {
        match self {
            GateKind::Cx => 2,
            GateKind::H | GateKind::X | GateKind::Sdg | GateKind::Ry => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Gate {
    H(usize),
    X(usize),
    Sdg(usize),
    Ry(usize, f64),
    Cx { control: usize, target: usize },
}

impl Gate {
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::H(_) => GateKind::H,
            Gate::X(_) => GateKind::X,
            Gate::Sdg(_) => GateKind::Sdg,
            Gate::Ry(..) => GateKind::Ry,
            Gate::Cx { .. } => GateKind::Cx,
        }
    }

    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Gate::H(q) | Gate::X(q) | Gate::Sdg(q) | Gate::Ry(q, _) => vec![q],
            Gate::Cx { control, target } => vec![control, target],
        }
    }
}

/// Gate sequence on a fixed number of qubits, optionally ending in a
/// computational-basis measurement of every qubit.
#[derive(Clone, Debug, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
    measured: bool,
}

impl Circuit {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            measured: false,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn h(&mut self, q: usize) -> QuantumResult<&mut Self> {
        self.push(Gate::H(q))
    }

    pub fn x(&mut self, q: usize) -> QuantumResult<&mut Self> {
        self.push(Gate::X(q))
    }

    pub fn sdg(&mut self, q: usize) -> QuantumResult<&mut Self> {
        self.push(Gate::Sdg(q))
    }

    pub fn ry(&mut self, q: usize, theta: f64) -> QuantumResult<&mut Self> {
        self.push(Gate::Ry(q, theta))
    }

    pub fn cx(&mut self, control: usize, target: usize) -> QuantumResult<&mut Self> {
        self.push(Gate::Cx { control, target })
    }

    pub fn measure_all(&mut self) -> &mut Self {
        self.measured = true;
        self
    }

    pub fn push(&mut self, gate: Gate) -> QuantumResult<&mut Self> {
        for q in gate.qubits() {
            if q >= self.num_qubits {
                return Err(QuantumError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: self.num_qubits,
                });
            }
        }
        if let Gate::Cx { control, target } = gate {
            if control == target {
                return Err(QuantumError::SameQubit(control));
            }
            if control.abs_diff(target) != 1 {
                return Err(QuantumError::NonAdjacentQubits(control, target));
            }
        }
        self.gates.push(gate);
        Ok(self)
    }
}
