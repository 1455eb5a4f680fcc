//! Configuration and parameters
//!
//! Constants, safety criteria and optimizer settings.

pub mod constants;
pub mod solver_params;

pub use constants::*;
pub use solver_params::*;
