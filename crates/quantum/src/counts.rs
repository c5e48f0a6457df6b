use std::collections::BTreeMap;

/// Measured bitstring → number of shots that produced it.
///
/// Keys have one character per qubit, qubit 0 rightmost (`"10"` means
/// qubit 1 read 1 and qubit 0 read 0).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShotCounts {
    counts: BTreeMap<String, usize>,
}

impl ShotCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, bitstring: impl Into<String>, n: usize) {
        *self.counts.entry(bitstring.into()).or_insert(0) += n;
    }

    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(b, &c)| (b.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for ShotCounts {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut counts = ShotCounts::new();
        for (b, c) in iter {
            counts.record(b, c);
        }
        counts
    }
}

/// Formats the outcome `bits` (bit `k` = qubit `k`) as a count key.
pub fn bitstring(bits: usize, num_qubits: usize) -> String {
    (0..num_qubits)
        .rev()
        .map(|k| if (bits >> k) & 1 == 1 { '1' } else { '0' })
        .collect()
}
