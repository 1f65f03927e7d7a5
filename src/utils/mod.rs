// file: src/utils/mod.rs
// description: utility functions module exports
// reference: internal module structure

pub mod logging;
pub mod telemetry;
pub mod text;
pub mod validation;

pub use telemetry::{OperationTimer, PerformanceMetrics};
pub use validation::Validator;
