pub mod mps;
pub mod truncation;
