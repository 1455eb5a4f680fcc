//! Shear rate and safety evaluation for a vibrated viscous layer
//!
//! A source oscillating at frequency f with peak displacement A shears the
//! layer underneath it. The oscillatory (Stokes) boundary layer
//! δ = sqrt(2ν/ω) limits how deep the motion penetrates, so the shear is
//! concentrated over the thinner of the layer and the boundary layer.

use std::fmt;

use indexmap::IndexMap;

use crate::config::SafetyCriteria;
use crate::config::constants::{MICRONS_TO_METERS, MILLIMETERS_TO_METERS, TWO_PI};
use crate::error::ModelError;
use crate::materials::LayerParams;
use crate::materials::utils::{inv_exact, require_finite, require_non_negative, require_positive};

/// Every derived quantity of one evaluation. Produced once, only read afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearReport {
    pub frequency_hz: f64,
    pub amplitude_um: f64,
    /// Angular frequency ω = 2πf (rad/s)
    pub omega: f64,
    pub amplitude_m: f64,
    pub thickness_m: f64,
    /// ν = η/ρ (m²/s)
    pub kinematic_viscosity: f64,
    /// Stokes layer depth, or the layer thickness when ω = 0 (m)
    pub boundary_layer_m: f64,
    /// min(thickness, boundary layer) (m)
    pub effective_gap_m: f64,
    /// ω·A / gap (1/s)
    pub shear_rate: f64,
    /// Peak acceleration ω²·A (m/s²)
    pub acceleration: f64,
    /// Acceleration limit minus acceleration (m/s²)
    pub safety_margin: f64,
    pub safe: bool,
    pub effective: bool,
}

impl ShearReport {
    /// Numeric results in a fixed order, keyed by quantity name.
    pub fn named_values(&self) -> IndexMap<&'static str, f64> {
        IndexMap::from([
            ("frequency_hz", self.frequency_hz),
            ("amplitude_um", self.amplitude_um),
            ("omega", self.omega),
            ("amplitude_m", self.amplitude_m),
            ("thickness_m", self.thickness_m),
            ("kinematic_viscosity", self.kinematic_viscosity),
            ("boundary_layer_m", self.boundary_layer_m),
            ("effective_gap_m", self.effective_gap_m),
            ("shear_rate", self.shear_rate),
            ("acceleration", self.acceleration),
            ("safety_margin", self.safety_margin),
        ])
    }
}

impl fmt::Display for ShearReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.named_values() {
            writeln!(f, "{name:>20}: {value:.6e}")?;
        }
        writeln!(f, "{:>20}: {}", "safe", self.safe)?;
        write!(f, "{:>20}: {}", "effective", self.effective)
    }
}

/// Evaluate shear rate, peak acceleration and the safety/effectiveness flags.
///
/// Frequency and amplitude in Hz and µm, both finite and non-negative. Zero
/// frequency is the static case: the boundary layer falls back to the layer
/// thickness and every rate is zero. Layer parameters must be finite and
/// strictly positive. Inputs large enough to overflow the acceleration or
/// shear rate are rejected as non-finite.
pub fn validate_safety_and_shear(
    frequency_hz: f64,
    amplitude_um: f64,
    layer: &LayerParams,
    criteria: &SafetyCriteria,
) -> Result<ShearReport, ModelError> {
    require_non_negative("frequency", frequency_hz)?;
    require_non_negative("amplitude", amplitude_um)?;
    layer.validate()?;

    let omega = TWO_PI * frequency_hz;
    let amplitude_m = amplitude_um * MICRONS_TO_METERS;
    let thickness_m = layer.thickness_mm * MILLIMETERS_TO_METERS;
    let kinematic_viscosity = layer.kinematic_viscosity();

    let boundary_layer_m = if omega > 0.0 {
        (2.0 * kinematic_viscosity / omega).sqrt()
    } else {
        thickness_m
    };
    let effective_gap_m = thickness_m.min(boundary_layer_m);

    let shear_rate = omega * amplitude_m * inv_exact(effective_gap_m);
    let acceleration = omega * omega * amplitude_m;
    // Finite but huge inputs can still overflow
    require_finite("acceleration", acceleration)?;
    require_finite("shear rate", shear_rate)?;

    Ok(ShearReport {
        frequency_hz,
        amplitude_um,
        omega,
        amplitude_m,
        thickness_m,
        kinematic_viscosity,
        boundary_layer_m,
        effective_gap_m,
        shear_rate,
        acceleration,
        safety_margin: criteria.acceleration_limit - acceleration,
        safe: acceleration < criteria.acceleration_limit,
        effective: shear_rate > criteria.effective_shear_rate,
    })
}

/// Shear rate over the full layer thickness, without the boundary-layer
/// correction: γ̇ = ω·A / h.
pub fn nominal_shear_rate(
    frequency_hz: f64,
    amplitude_um: f64,
    thickness_mm: f64,
) -> Result<f64, ModelError> {
    require_non_negative("frequency", frequency_hz)?;
    require_non_negative("amplitude", amplitude_um)?;
    require_positive("thickness", thickness_mm)?;

    let omega = TWO_PI * frequency_hz;
    Ok(omega * amplitude_um * MICRONS_TO_METERS / (thickness_mm * MILLIMETERS_TO_METERS))
}
