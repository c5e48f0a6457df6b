use tn::mps::{C64, Tensor3};

/// Norm environment of sites `0..k`, flattened (r, r') over the right bond of
/// site `k - 1`.
pub(crate) fn left_env(sites: &[Tensor3], k: usize) -> Vec<C64> {
    sites[..k].iter().fold(vec![C64::new(1.0, 0.0)], |env, a| {
        let mut next = vec![C64::new(0.0, 0.0); a.dr * a.dr];
        for l in 0..a.dl {
            for lp in 0..a.dl {
                let lval = env[l * a.dl + lp];
                if lval == C64::new(0.0, 0.0) {
                    continue;
                }
                for p in 0..a.dp {
                    for r in 0..a.dr {
                        let aval = lval * a.get(l, p, r);
                        for rp in 0..a.dr {
                            next[r * a.dr + rp] += aval * a.get(lp, p, rp).conj();
                        }
                    }
                }
            }
        }
        next
    })
}

/// Norm environment of sites `k+1..`, flattened (l, l') over the left bond of
/// site `k + 1`.
pub(crate) fn right_env(sites: &[Tensor3], k: usize) -> Vec<C64> {
    sites[k + 1..].iter().rev().fold(vec![C64::new(1.0, 0.0)], |env, a| {
        let mut next = vec![C64::new(0.0, 0.0); a.dl * a.dl];
        for r in 0..a.dr {
            for rp in 0..a.dr {
                let rval = env[r * a.dr + rp];
                if rval == C64::new(0.0, 0.0) {
                    continue;
                }
                for p in 0..a.dp {
                    for l in 0..a.dl {
                        let aval = a.get(l, p, r) * rval;
                        for lp in 0..a.dl {
                            next[l * a.dl + lp] += aval * a.get(lp, p, rp).conj();
                        }
                    }
                }
            }
        }
        next
    })
}
