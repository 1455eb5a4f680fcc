//! Amplitude that maximizes shear rate without exceeding the safety limit
//!
//! The search runs from a single starting point. Shear rate grows linearly
//! with amplitude while the acceleration limit is linear too, so the optimum
//! sits on whichever binds first: the safety limit or the amplitude bound.

use bevy::log::{info, warn};

use crate::config::{OptimizerParams, SafetyCriteria};
use crate::core::{ShearReport, validate_safety_and_shear};
use crate::error::{ModelError, SolverError};
use crate::materials::LayerParams;
use crate::materials::utils::{require_non_negative, require_positive};
use crate::math::{Real, Vector};

use super::sqp::{ConstrainedProblem, SqpSettings, SqpSolver};

/// One-variable problem: minimize −shear rate subject to
/// `safety_limit − acceleration ≥ 0` over the amplitude bounds.
pub struct AmplitudeProblem<'a> {
    pub frequency_hz: f64,
    pub layer: &'a LayerParams,
    pub criteria: SafetyCriteria,
    pub bounds: (f64, f64),
}

impl AmplitudeProblem<'_> {
    pub fn report(&self, amplitude_um: f64) -> Result<ShearReport, ModelError> {
        validate_safety_and_shear(self.frequency_hz, amplitude_um, self.layer, &self.criteria)
    }
}

impl ConstrainedProblem for AmplitudeProblem<'_> {
    fn dimension(&self) -> usize {
        1
    }

    fn bounds(&self) -> (Vector, Vector) {
        (
            Vector::from_element(1, self.bounds.0),
            Vector::from_element(1, self.bounds.1),
        )
    }

    fn objective(&self, x: &Vector) -> Result<Real, ModelError> {
        Ok(-self.report(x[0])?.shear_rate)
    }

    fn constraints(&self, x: &Vector) -> Result<Vector, ModelError> {
        let report = self.report(x[0])?;
        Ok(Vector::from_element(
            1,
            self.criteria.acceleration_limit - report.acceleration,
        ))
    }
}

/// The best amplitude found and the full model output there.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimalAmplitude {
    pub amplitude_um: f64,
    pub report: ShearReport,
    pub iterations: usize,
    pub evaluations: usize,
}

/// Search the amplitude (µm) that maximizes shear rate at `frequency_hz`
/// while keeping peak acceleration at or under `params.safety_limit`.
///
/// Non-convergence is returned as an error carrying the solver's message.
pub fn optimize_amplitude(
    frequency_hz: f64,
    layer: &LayerParams,
    params: &OptimizerParams,
) -> Result<OptimalAmplitude, SolverError> {
    search(frequency_hz, layer, params).inspect_err(|err| {
        warn!("amplitude optimization at {frequency_hz} Hz failed: {err}");
    })
}

fn search(
    frequency_hz: f64,
    layer: &LayerParams,
    params: &OptimizerParams,
) -> Result<OptimalAmplitude, SolverError> {
    require_non_negative("frequency", frequency_hz)?;
    require_non_negative("initial amplitude", params.initial_amplitude_um)?;
    require_non_negative("amplitude lower bound", params.amplitude_bounds.0)?;
    require_positive("safety limit", params.safety_limit)?;
    require_positive("tolerance", params.tolerance)?;
    layer.validate()?;

    let problem = AmplitudeProblem {
        frequency_hz,
        layer,
        criteria: params.safety_criteria(),
        bounds: params.amplitude_bounds,
    };
    let settings = SqpSettings {
        tolerance: params.tolerance,
        max_iterations: params.max_iterations,
    };

    let mut solver = SqpSolver::new(&problem, settings)?;
    let outcome = solver.minimize(&Vector::from_element(1, params.initial_amplitude_um))?;

    let amplitude_um = outcome.x[0];
    let report = problem.report(amplitude_um)?;

    info!(
        "optimal amplitude at {frequency_hz} Hz: {amplitude_um:.4} µm, shear rate {:.4} 1/s, acceleration {:.4} m/s² ({} iterations)",
        report.shear_rate, report.acceleration, outcome.iterations
    );

    Ok(OptimalAmplitude {
        amplitude_um,
        report,
        iterations: outcome.iterations,
        evaluations: outcome.evaluations,
    })
}
