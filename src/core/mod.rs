pub mod shear_model;

pub use shear_model::{ShearReport, nominal_shear_rate, validate_safety_and_shear};
