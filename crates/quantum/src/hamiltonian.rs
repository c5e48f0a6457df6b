use faer::{Mat, Side};

use crate::gates::{kron, pauli_x, pauli_y, pauli_z, C64};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinModel {
    Heisenberg,
    Xxz,
}

/// Two-site spin Hamiltonian H = J·(X⊗X + Y⊗Y) + Δ·(Z⊗Z).
///
/// The Heisenberg model is stored with `delta == j`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HamiltonianSpec {
    pub model: SpinModel,
    pub j: f64,
    pub delta: f64,
}

impl HamiltonianSpec {
    pub fn heisenberg(j: f64) -> Self {
        Self {
            model: SpinModel::Heisenberg,
            j,
            delta: j,
        }
    }

    pub fn xxz(j: f64, delta: f64) -> Self {
        Self {
            model: SpinModel::Xxz,
            j,
            delta,
        }
    }

    /// Dense 4×4 matrix in the (qubit 0, qubit 1) product basis.
    pub fn matrix(&self) -> [[C64; 4]; 4] {
        let xx = kron(pauli_x(), pauli_x());
        let yy = kron(pauli_y(), pauli_y());
        let zz = kron(pauli_z(), pauli_z());

        let mut h = [[C64::new(0.0, 0.0); 4]; 4];
        for r in 0..4 {
            for c in 0..4 {
                h[r][c] = (xx[r][c] + yy[r][c]) * self.j + zz[r][c] * self.delta;
            }
        }
        h
    }

    /// Eigenvalues in ascending order.
    pub fn spectrum(&self) -> Vec<f64> {
        let h = self.matrix();
        let m = Mat::<C64>::from_fn(4, 4, |r, c| h[r][c]);
        let mut eigs: Vec<f64> = m.selfadjoint_eigenvalues(Side::Lower);
        eigs.sort_by(f64::total_cmp);
        eigs
    }

    /// Exact ground-state energy (smallest eigenvalue).
    pub fn ground_energy(&self) -> f64 {
        self.spectrum()
            .into_iter()
            .fold(f64::INFINITY, f64::min)
    }
}

pub fn heisenberg_energy(j: f64) -> f64 {
    HamiltonianSpec::heisenberg(j).ground_energy()
}

pub fn xxz_energy(j: f64, delta: f64) -> f64 {
    HamiltonianSpec::xxz(j, delta).ground_energy()
}
