// src/solver/mod.rs
pub mod amplitude;
pub mod qp;
pub mod sqp;

// Re-export from the solver module
pub use amplitude::{AmplitudeProblem, OptimalAmplitude, optimize_amplitude};
pub use sqp::{ConstrainedProblem, SqpOutcome, SqpSettings, SqpSolver};
