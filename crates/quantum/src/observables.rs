//! Exact (infinite-shot, noiseless) expectation values on an MPS.

use crate::env::{left_env, right_env};
use crate::gates::{kron, pauli_x, pauli_y, pauli_z, C64};
use tn::mps::MPS;

/// ⟨ψ|O|ψ⟩ / ⟨ψ|ψ⟩ for a two-site operator on neighbours (i, i+1).
/// Row/column index of `op` is `p_i * 2 + p_{i+1}`.
pub fn expect_two_site(psi: &MPS, i: usize, op: [[C64; 4]; 4]) -> f64 {
    let a = &psi.sites[i];
    let b = &psi.sites[i + 1];
    assert!(a.dp == 2 && b.dp == 2, "expect_two_site supports qubits only");

    let left = left_env(&psi.sites, i);
    let right = right_env(&psi.sites, i + 1);

    // rho[(pi, pj), (qi, qj)] = ⟨qi qj|ψ⟩* ⟨pi pj|ψ⟩ with the environment traced out.
    let mut rho = [[C64::new(0.0, 0.0); 4]; 4];
    for (row, rho_row) in rho.iter_mut().enumerate() {
        let (pi, pj) = (row / 2, row % 2);
        for (col, slot) in rho_row.iter_mut().enumerate() {
            let (qi, qj) = (col / 2, col % 2);
            for l in 0..a.dl {
                for lp in 0..a.dl {
                    let lval = left[l * a.dl + lp];
                    for r in 0..b.dr {
                        for rp in 0..b.dr {
                            let rval = right[r * b.dr + rp];
                            for m in 0..a.dr {
                                for mp in 0..a.dr {
                                    *slot += lval
                                        * a.get(l, pi, m)
                                        * b.get(m, pj, r)
                                        * a.get(lp, qi, mp).conj()
                                        * b.get(mp, qj, rp).conj()
                                        * rval;
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    let denom: f64 = (0..4).map(|d| rho[d][d].re.max(0.0)).sum();
    if denom == 0.0 {
        return 0.0;
    }

    let mut numer = C64::new(0.0, 0.0);
    for p in 0..4 {
        for q in 0..4 {
            numer += op[q][p] * rho[p][q];
        }
    }
    numer.re / denom
}

/// ⟨X_i X_{i+1}⟩
pub fn expect_xx(psi: &MPS, i: usize) -> f64 {
    expect_two_site(psi, i, kron(pauli_x(), pauli_x()))
}

/// ⟨Y_i Y_{i+1}⟩
pub fn expect_yy(psi: &MPS, i: usize) -> f64 {
    expect_two_site(psi, i, kron(pauli_y(), pauli_y()))
}

/// ⟨Z_i Z_{i+1}⟩
pub fn expect_zz(psi: &MPS, i: usize) -> f64 {
    expect_two_site(psi, i, kron(pauli_z(), pauli_z()))
}
