use bevy::prelude::*;

use super::constants::{
    AMPLITUDE_MAX_UM, AMPLITUDE_MIN_UM, DEFAULT_INITIAL_AMPLITUDE_UM, EFFECTIVE_SHEAR_RATE,
    SAFETY_ACCELERATION_LIMIT, SOLVER_MAX_ITERATIONS, SOLVER_TOLERANCE,
};

/// Thresholds used to classify an evaluated operating point
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SafetyCriteria {
    /// Peak acceleration must stay strictly below this value (m/s²)
    pub acceleration_limit: f64,

    /// Shear rate must strictly exceed this value to count as effective (1/s)
    pub effective_shear_rate: f64,
}

impl Default for SafetyCriteria {
    fn default() -> Self {
        Self {
            acceleration_limit: SAFETY_ACCELERATION_LIMIT,
            effective_shear_rate: EFFECTIVE_SHEAR_RATE,
        }
    }
}

impl SafetyCriteria {
    pub fn with_acceleration_limit(mut self, limit: f64) -> Self {
        self.acceleration_limit = limit;
        self
    }

    pub fn with_effective_shear_rate(mut self, rate: f64) -> Self {
        self.effective_shear_rate = rate;
        self
    }
}

/// Settings for the amplitude optimizer
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OptimizerParams {
    /// Starting amplitude in µm, clipped into `amplitude_bounds`
    pub initial_amplitude_um: f64,

    /// Upper bound on peak acceleration enforced as a constraint (m/s²)
    pub safety_limit: f64,

    /// Closed search interval for the amplitude in µm
    pub amplitude_bounds: (f64, f64),

    /// Step and constraint-violation tolerance
    pub tolerance: f64,

    pub max_iterations: usize,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            initial_amplitude_um: DEFAULT_INITIAL_AMPLITUDE_UM,
            safety_limit: SAFETY_ACCELERATION_LIMIT,
            amplitude_bounds: (AMPLITUDE_MIN_UM, AMPLITUDE_MAX_UM),
            tolerance: SOLVER_TOLERANCE,
            max_iterations: SOLVER_MAX_ITERATIONS,
        }
    }
}

impl OptimizerParams {
    pub fn with_initial_amplitude(mut self, amplitude_um: f64) -> Self {
        self.initial_amplitude_um = amplitude_um;
        self
    }

    pub fn with_safety_limit(mut self, limit: f64) -> Self {
        self.safety_limit = limit;
        self
    }

    pub fn with_amplitude_bounds(mut self, lower_um: f64, upper_um: f64) -> Self {
        self.amplitude_bounds = (lower_um, upper_um);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Criteria matching this optimizer's safety limit, used to classify the optimum
    pub fn safety_criteria(&self) -> SafetyCriteria {
        SafetyCriteria::default().with_acceleration_limit(self.safety_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let params = OptimizerParams::default();
        assert_eq!(params.initial_amplitude_um, 1.0);
        assert_eq!(params.safety_limit, 0.5);
        assert_eq!(params.amplitude_bounds, (0.1, 100.0));

        let criteria = SafetyCriteria::default();
        assert_eq!(criteria.acceleration_limit, 0.5);
        assert_eq!(criteria.effective_shear_rate, 1.0);
    }

    #[test]
    fn safety_criteria_follow_optimizer_limit() {
        let params = OptimizerParams::default().with_safety_limit(0.25);
        assert_eq!(params.safety_criteria().acceleration_limit, 0.25);
    }
}
