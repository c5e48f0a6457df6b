//! Deterministic random stream built on SHAKE-256.
//!
//! Every draw carries a context label, so two consumers reading the same
//! stream for different purposes (shot sampling, noise kicks, parameter
//! initialization) never reuse the same output bytes.

use sha3::{digest::{ExtendableOutput, Update, XofReader}, Shake256};

#[derive(Clone, Debug)]
pub struct ShakeRng {
    state: [u8; 32],
    step: u64,
}

impl ShakeRng {
    pub fn new(seed: &[u8]) -> Self {
        let mut state = [0u8; 32];
        shake(&[seed, b"SHAKE_RNG_INIT"], &mut state);
        Self { state, step: 0 }
    }

    /// Stream for the `index`-th independent run derived from a textual seed,
    /// e.g. one trial of a repeated experiment.
    pub fn for_run(seed: &str, label: &str, index: usize) -> Self {
        Self::new(format!("{}-{}-{}", seed, label, index).as_bytes())
    }

    /// Uniform draw in [0, 1].
    pub fn next_f64(&mut self, ctx: &[u8]) -> f64 {
        let mut out = [0u8; 8];
        self.squeeze(ctx, &mut out);
        (u64::from_be_bytes(out) as f64) / (u64::MAX as f64)
    }

    /// Uniform draw in [lo, hi].
    pub fn uniform(&mut self, lo: f64, hi: f64, ctx: &[u8]) -> f64 {
        lo + (hi - lo) * self.next_f64(ctx)
    }

    /// Split off an independent child stream. The parent advances, so
    /// repeated forks with the same label still differ.
    pub fn fork(&mut self, label: &[u8]) -> Self {
        let mut state = [0u8; 32];
        self.squeeze(label, &mut state);
        let mut child = [0u8; 32];
        shake(&[&state, label, b"FORK"], &mut child);
        Self {
            state: child,
            step: 0,
        }
    }

    fn squeeze(&mut self, ctx: &[u8], out: &mut [u8]) {
        self.step += 1;

        let state = self.state;
        let step_bytes = self.step.to_be_bytes();
        shake(&[&state, &step_bytes, b"ADVANCE"], &mut self.state);

        shake(&[&self.state, ctx], out);
    }
}

fn shake(parts: &[&[u8]], out: &mut [u8]) {
    let mut h = Shake256::default();
    for p in parts {
        h.update(p);
    }
    let mut r = h.finalize_xof();
    r.read(out);
}
