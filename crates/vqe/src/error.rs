use thiserror::Error;

use quantum::QuantumError;

#[derive(Debug, Error)]
pub enum VqeError {
    #[error(transparent)]
    Quantum(#[from] QuantumError),

    #[error("failed to write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("initial range [{lo}, {hi}) is empty")]
    EmptyRange { lo: f64, hi: f64 },
}

pub type VqeResult<T> = Result<T, VqeError>;
