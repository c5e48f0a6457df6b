use crate::truncation::Truncation;
use faer::Mat;
use num_complex::Complex64;

pub type C64 = Complex64;

/// Rank-3 site tensor indexed (left bond, physical, right bond).
#[derive(Clone, Debug)]
pub struct Tensor3 {
    pub data: Vec<C64>,
    pub dl: usize,
    pub dp: usize,
    pub dr: usize,
}

impl Tensor3 {
    pub fn zeros(dl: usize, dp: usize, dr: usize) -> Self {
        Self {
            data: vec![C64::new(0.0, 0.0); dl * dp * dr],
            dl,
            dp,
            dr,
        }
    }

    #[inline]
    fn idx(&self, l: usize, p: usize, r: usize) -> usize {
        (l * self.dp + p) * self.dr + r
    }

    pub fn get(&self, l: usize, p: usize, r: usize) -> C64 {
        self.data[self.idx(l, p, r)]
    }

    pub fn set(&mut self, l: usize, p: usize, r: usize, v: C64) {
        let i = self.idx(l, p, r);
        self.data[i] = v;
    }
}

/// Qubit register stored as a matrix-product state. Site `k` is qubit `k`.
#[derive(Clone, Debug)]
pub struct MPS {
    pub sites: Vec<Tensor3>,
}

impl MPS {
    /// |0…0⟩ on `n` qubits.
    pub fn new_zero(n: usize) -> Self {
        let mut sites = Vec::with_capacity(n);
        for _ in 0..n {
            let mut t = Tensor3::zeros(1, 2, 1);
            t.set(0, 0, 0, C64::new(1.0, 0.0));
            sites.push(t);
        }
        Self { sites }
    }

    pub fn num_qubits(&self) -> usize {
        self.sites.len()
    }

    pub fn apply_1q(&mut self, k: usize, u: [[C64; 2]; 2]) {
        let s = &self.sites[k];
        let mut out = Tensor3::zeros(s.dl, s.dp, s.dr);

        for l in 0..s.dl {
            for r in 0..s.dr {
                for p in 0..2 {
                    let mut acc = C64::new(0.0, 0.0);
                    for pp in 0..2 {
                        acc += u[p][pp] * s.get(l, pp, r);
                    }
                    out.set(l, p, r, acc);
                }
            }
        }
        self.sites[k] = out;
    }

    /// Applies a gate on sites (k, k+1). Row/column index of `u` is
    /// `p_k * 2 + p_{k+1}`. The merged block is split back by SVD under `trunc`.
    pub fn apply_2q_svd(&mut self, k: usize, u: [[C64; 4]; 4], trunc: Truncation) {
        let theta = self.gate_block(k, &u);
        let (new_a, new_b) = split_block(&theta, self.sites[k].dl, self.sites[k + 1].dr, trunc);
        self.sites[k] = new_a;
        self.sites[k + 1] = new_b;
    }

    /// Contracts sites (k, k+1) with the gate into a (dl·2) × (2·dr) matrix.
    fn gate_block(&self, k: usize, u: &[[C64; 4]; 4]) -> Mat<C64> {
        let a = &self.sites[k];
        let b = &self.sites[k + 1];

        let dl = a.dl;
        let dr = b.dr;
        let chi = a.dr;

        let mut theta = Mat::<C64>::zeros(dl * 2, 2 * dr);

        for l in 0..dl {
            for r in 0..dr {
                for p1 in 0..2 {
                    for p2 in 0..2 {
                        let mut v = C64::new(0.0, 0.0);
                        for m in 0..chi {
                            for q1 in 0..2 {
                                for q2 in 0..2 {
                                    v += u[p1 * 2 + p2][q1 * 2 + q2]
                                        * a.get(l, q1, m)
                                        * b.get(m, q2, r);
                                }
                            }
                        }
                        theta.write(l * 2 + p1, p2 * dr + r, v);
                    }
                }
            }
        }

        theta
    }

    /// ⟨bits|ψ⟩ where `bits[k]` is the value of qubit `k`.
    pub fn amplitude(&self, bits: &[usize]) -> C64 {
        assert_eq!(bits.len(), self.sites.len(), "one bit per qubit");

        let mut env = vec![C64::new(1.0, 0.0)];
        for (site, &p) in self.sites.iter().zip(bits) {
            let mut next = vec![C64::new(0.0, 0.0); site.dr];
            for (l, &lval) in env.iter().enumerate() {
                for (r, slot) in next.iter_mut().enumerate() {
                    *slot += lval * site.get(l, p, r);
                }
            }
            env = next;
        }
        env.iter().copied().sum()
    }

    /// Outcome probabilities over all 2ⁿ basis states, normalised.
    /// Bit `k` of the index is qubit `k`.
    pub fn probabilities(&self) -> Vec<f64> {
        let n = self.sites.len();
        let mut probs: Vec<f64> = (0..1usize << n)
            .map(|index| {
                let bits: Vec<usize> = (0..n).map(|k| (index >> k) & 1).collect();
                self.amplitude(&bits).norm_sqr()
            })
            .collect();

        let total: f64 = probs.iter().sum();
        if total > 0.0 {
            for p in &mut probs {
                *p /= total;
            }
        }
        probs
    }
}

fn split_block(theta: &Mat<C64>, dl: usize, dr: usize, trunc: Truncation) -> (Tensor3, Tensor3) {
    let svd = theta.thin_svd();
    let s = svd.s_diagonal();

    let mut kept = 0;
    for i in 0..s.nrows() {
        let sv = s.read(i).re;
        if sv > trunc.cutoff && kept < trunc.max_bond {
            kept += 1;
        }
    }
    if kept == 0 {
        kept = 1;
    }

    let u_full = svd.u();
    let v_full = svd.v();
    let u_mat = u_full.submatrix(0, 0, u_full.nrows(), kept);
    let v_mat = v_full.submatrix(0, 0, v_full.nrows(), kept);

    let mut new_a = Tensor3::zeros(dl, 2, kept);
    for l in 0..dl {
        for p in 0..2 {
            for m in 0..kept {
                let u_val = u_mat.read(l * 2 + p, m);
                new_a.set(l, p, m, u_val * s.read(m).re);
            }
        }
    }

    let mut new_b = Tensor3::zeros(kept, 2, dr);
    for m in 0..kept {
        for p in 0..2 {
            for r in 0..dr {
                new_b.set(m, p, r, v_mat.read(p * dr + r, m).conj());
            }
        }
    }

    (new_a, new_b)
}

#[cfg(test)]
mod tests {
    use super::{C64, MPS};
    use crate::truncation::Truncation;

    fn h() -> [[C64; 2]; 2] {
        let s = 1.0 / 2.0_f64.sqrt();
        [
            [C64::new(s, 0.0), C64::new(s, 0.0)],
            [C64::new(s, 0.0), C64::new(-s, 0.0)],
        ]
    }

    fn cnot() -> [[C64; 4]; 4] {
        let z = C64::new(0.0, 0.0);
        let o = C64::new(1.0, 0.0);
        [[o, z, z, z], [z, o, z, z], [z, z, z, o], [z, z, o, z]]
    }

    #[test]
    fn zero_state_is_all_zeros() {
        let psi = MPS::new_zero(2);
        assert_eq!(psi.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn bell_pair_probabilities() {
        let mut psi = MPS::new_zero(2);
        psi.apply_1q(0, h());
        psi.apply_2q_svd(0, cnot(), Truncation::exact());

        let p = psi.probabilities();
        assert!((p[0b00] - 0.5).abs() < 1e-12, "p = {:?}", p);
        assert!((p[0b11] - 0.5).abs() < 1e-12, "p = {:?}", p);
        assert!(p[0b01].abs() < 1e-12 && p[0b10].abs() < 1e-12, "p = {:?}", p);
        assert_eq!(psi.sites[0].dr, 2);
    }

    #[test]
    fn product_state_keeps_unit_bond() {
        let mut psi = MPS::new_zero(2);
        psi.apply_2q_svd(0, cnot(), Truncation::exact());
        assert_eq!(psi.sites[0].dr, 1);
        assert!((psi.amplitude(&[0, 0]).norm() - 1.0).abs() < 1e-12);
    }
}
