// Physical and numerical constants for the vibration shear model
use std::f64::consts::PI;

// Unit conversions
pub const MICRONS_TO_METERS: f64 = 1e-6;
pub const MILLIMETERS_TO_METERS: f64 = 1e-3;
pub const TWO_PI: f64 = 2.0 * PI;

// Default layer (topical gel)
pub const DEFAULT_LAYER_THICKNESS_MM: f64 = 5.0;
pub const DEFAULT_DYNAMIC_VISCOSITY: f64 = 100.0; // Pa·s
pub const DEFAULT_DENSITY: f64 = 1000.0; // kg/m³

// Peak acceleration compared directly, not RMS
pub const SAFETY_ACCELERATION_LIMIT: f64 = 0.5; // m/s²
pub const EFFECTIVE_SHEAR_RATE: f64 = 1.0; // 1/s

// Amplitude search range in µm
pub const AMPLITUDE_MIN_UM: f64 = 0.1;
pub const AMPLITUDE_MAX_UM: f64 = 100.0;
pub const DEFAULT_INITIAL_AMPLITUDE_UM: f64 = 1.0;

// SQP settings
pub const SOLVER_TOLERANCE: f64 = 1e-6;
pub const SOLVER_MAX_ITERATIONS: usize = 100;
