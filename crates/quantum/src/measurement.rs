use crate::env::{left_env, right_env};
use rng::ShakeRng;
use tn::mps::{C64, MPS, Tensor3};

/// Unnormalised probability of each physical value at site `k`.
pub(crate) fn site_weights(psi: &MPS, k: usize) -> Vec<f64> {
    let s = &psi.sites[k];
    let left = left_env(&psi.sites, k);
    let right = right_env(&psi.sites, k);

    (0..s.dp)
        .map(|p| {
            let mut acc = C64::new(0.0, 0.0);
            for l in 0..s.dl {
                for lp in 0..s.dl {
                    let lval = left[l * s.dl + lp];
                    for r in 0..s.dr {
                        for rp in 0..s.dr {
                            acc += lval * s.get(l, p, r) * s.get(lp, p, rp).conj() * right[r * s.dr + rp];
                        }
                    }
                }
            }
            acc.re.max(0.0)
        })
        .collect()
}

/// Index drawn from `weights` (need not be normalised). Zero-weight outcomes
/// are never returned unless every weight is zero.
pub(crate) fn draw(weights: &[f64], rng: &mut ShakeRng, ctx: &[u8]) -> usize {
    let total: f64 = weights.iter().sum();
    let Some(last) = weights.iter().rposition(|&w| w > 0.0) else {
        return 0;
    };

    let mut x = rng.next_f64(ctx) * total;
    for (idx, &w) in weights.iter().enumerate() {
        if w > 0.0 && x < w {
            return idx;
        }
        x -= w;
    }
    last
}

/// Projective Z measurement of qubit `k`; collapses `psi`.
pub fn measure_z(psi: &mut MPS, k: usize, rng: &mut ShakeRng) -> usize {
    let probs = site_weights(psi, k);
    if probs.iter().sum::<f64>() == 0.0 {
        return 0;
    }

    let outcome = draw(&probs, rng, b"MEASURE_Z");
    let norm = probs[outcome].sqrt();

    let s = &psi.sites[k];
    let mut t = Tensor3::zeros(s.dl, s.dp, s.dr);
    for l in 0..s.dl {
        for r in 0..s.dr {
            t.set(l, outcome, r, s.get(l, outcome, r) / norm);
        }
    }
    psi.sites[k] = t;
    outcome
}

/// Measures every qubit in order; bit `k` of the result is qubit `k`.
pub fn measure_all(psi: &mut MPS, rng: &mut ShakeRng) -> usize {
    (0..psi.num_qubits()).fold(0, |bits, k| bits | (measure_z(psi, k, rng) << k))
}
