//! Error types for model evaluation and amplitude optimization.

use thiserror::Error;

/// Rejected input to the shear model or to a symbolic evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be strictly positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("symbol `{0}` has no bound value")]
    UnboundSymbol(&'static str),

    #[error("division by zero while evaluating `{0}`")]
    DivisionByZero(String),
}

/// Failure of the constrained minimizer. The message is what callers surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("iteration limit reached after {iterations} iterations")]
    IterationLimit { iterations: usize },

    #[error("linearized constraints are incompatible at iteration {iteration}")]
    IncompatibleConstraints { iteration: usize },

    #[error("line search could not reduce the merit function at iteration {iteration}")]
    LineSearchFailed { iteration: usize },

    #[error("problem has {count} constraint rows, at most {max} are supported")]
    TooManyConstraints { count: usize, max: usize },

    #[error("invalid bounds for variable {index}: [{lower}, {upper}]")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },

    #[error("objective or constraint evaluated to a non-finite value at iteration {iteration}")]
    NonFiniteEvaluation { iteration: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}
