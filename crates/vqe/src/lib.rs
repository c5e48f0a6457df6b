pub mod driver;
mod error;
pub mod optimizer;
pub mod output;
pub mod scaling;

pub use driver::{
    ansatz_energy, best_outcome, initial_params, run_multi_start, run_vqe, run_vqe_from,
    VqeConfig, VqeOutcome,
};
pub use error::{VqeError, VqeResult};
pub use optimizer::{NelderMead, OptimizationResult, Optimizer};
pub use output::write_scaling_csv;
pub use scaling::{mean_absolute_error, shot_scaling, ScalingConfig, ScalingPoint, DEFAULT_SHOTS};
