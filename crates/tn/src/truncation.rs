/// Bond-dimension policy applied after every two-site gate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Truncation {
    pub max_bond: usize,
    /// Singular values at or below this are dropped.
    pub cutoff: f64,
}

impl Truncation {
    /// Keeps every non-negligible singular value.
    pub fn exact() -> Self {
        Self {
            max_bond: usize::MAX,
            cutoff: 1e-12,
        }
    }
}

impl Default for Truncation {
    fn default() -> Self {
        Self::exact()
    }
}
