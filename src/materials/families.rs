//! Shared parameter packs for vibrated layers.
//!
//! These structs describe the material and geometry under the vibration
//! source. They are plain data so demo code and tests can populate them
//! without touching the model.

use bevy::prelude::*;

use crate::config;
use crate::error::ModelError;
use crate::materials::utils::require_positive;

/// Thickness, viscosity and density of the sheared layer.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LayerParams {
    pub name: &'static str,
    /// Physical layer thickness in mm
    pub thickness_mm: f64,
    /// Dynamic viscosity in Pa·s
    pub viscosity: f64,
    /// Density in kg/m³
    pub density: f64,
}

impl LayerParams {
    pub const fn new(name: &'static str, thickness_mm: f64, viscosity: f64, density: f64) -> Self {
        Self {
            name,
            thickness_mm,
            viscosity,
            density,
        }
    }

    /// Default parameters of the gel layer.
    pub const fn defaults() -> Self {
        Self::new(
            "layer",
            config::constants::DEFAULT_LAYER_THICKNESS_MM,
            config::constants::DEFAULT_DYNAMIC_VISCOSITY,
            config::constants::DEFAULT_DENSITY,
        )
    }

    /// Same values as `defaults`, labelled as a topical gel.
    pub const fn topical_gel() -> Self {
        Self::new(
            "topical gel",
            config::constants::DEFAULT_LAYER_THICKNESS_MM,
            config::constants::DEFAULT_DYNAMIC_VISCOSITY,
            config::constants::DEFAULT_DENSITY,
        )
    }

    pub fn with_thickness_mm(mut self, thickness_mm: f64) -> Self {
        self.thickness_mm = thickness_mm;
        self
    }

    pub fn with_viscosity(mut self, viscosity: f64) -> Self {
        self.viscosity = viscosity;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Fails on the first non-finite or non-positive field.
    pub fn validate(&self) -> Result<(), ModelError> {
        require_positive("thickness", self.thickness_mm)?;
        require_positive("viscosity", self.viscosity)?;
        require_positive("density", self.density)?;
        Ok(())
    }

    /// Kinematic viscosity ν = η/ρ in m²/s
    #[inline]
    pub fn kinematic_viscosity(&self) -> f64 {
        self.viscosity / self.density
    }
}

impl Default for LayerParams {
    fn default() -> Self {
        Self::defaults()
    }
}
