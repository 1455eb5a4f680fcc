//! Vibration-induced shear in thin viscous layers
//!
//! Evaluates the shear rate and peak acceleration an oscillating source
//! (frequency, amplitude) produces in a layer such as a topical gel, checks
//! the acceleration against a safety threshold, and searches the amplitude
//! that maximizes shear without crossing it. Kelvin-Voigt and Maxwell
//! complex moduli are provided as a separate reference.

use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod error;
pub mod materials;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use config::{OptimizerParams, SafetyCriteria};
pub use crate::core::{ShearReport, nominal_shear_rate, validate_safety_and_shear};
pub use error::{ModelError, SolverError};
pub use materials::{LayerParams, ViscoelasticModel, WorkedExample, worked_example};
pub use solver::{OptimalAmplitude, optimize_amplitude};

/// Operating points evaluated and frequencies optimized at startup
#[derive(Resource, Debug, Clone)]
pub struct ShearScenarios {
    /// (frequency Hz, amplitude µm)
    pub evaluations: Vec<(f64, f64)>,
    pub optimize_frequencies: Vec<f64>,
}

impl Default for ShearScenarios {
    fn default() -> Self {
        Self {
            evaluations: vec![(90.0, 10.0), (16.0, 100.0)],
            optimize_frequencies: vec![90.0, 16.0],
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct ShearResults {
    pub reports: Vec<Result<ShearReport, ModelError>>,
    /// Keyed by frequency in Hz
    pub optima: Vec<(f64, Result<OptimalAmplitude, SolverError>)>,
    pub viscoelastic: Option<Result<WorkedExample, ModelError>>,
}

pub struct VibroShearPlugin;

impl Plugin for VibroShearPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LayerParams>()
            .init_resource::<SafetyCriteria>()
            .init_resource::<OptimizerParams>()
            .init_resource::<ShearScenarios>()
            .init_resource::<ShearResults>()
            .add_systems(
                Startup,
                (
                    evaluate_scenarios,
                    optimize_scenarios,
                    derive_viscoelastic_reference,
                    print_results,
                )
                    .chain(),
            );
    }
}

fn evaluate_scenarios(
    scenarios: Res<ShearScenarios>,
    layer: Res<LayerParams>,
    criteria: Res<SafetyCriteria>,
    mut results: ResMut<ShearResults>,
) {
    for &(frequency_hz, amplitude_um) in &scenarios.evaluations {
        let report = validate_safety_and_shear(frequency_hz, amplitude_um, &layer, &criteria);
        match &report {
            Ok(report) => info!(
                "{frequency_hz} Hz, {amplitude_um} µm on {}: shear {:.4} 1/s, acceleration {:.4} m/s², safe = {}, effective = {}",
                layer.name, report.shear_rate, report.acceleration, report.safe, report.effective
            ),
            Err(err) => warn!("{frequency_hz} Hz, {amplitude_um} µm rejected: {err}"),
        }
        results.reports.push(report);
    }
}

fn optimize_scenarios(
    scenarios: Res<ShearScenarios>,
    layer: Res<LayerParams>,
    params: Res<OptimizerParams>,
    mut results: ResMut<ShearResults>,
) {
    for &frequency_hz in &scenarios.optimize_frequencies {
        let optimum = optimize_amplitude(frequency_hz, &layer, &params);
        results.optima.push((frequency_hz, optimum));
    }
}

fn derive_viscoelastic_reference(mut results: ResMut<ShearResults>) {
    for model in ViscoelasticModel::ALL {
        debug!("{}", model.derivation());
    }
    results.viscoelastic = Some(worked_example());
}

fn print_results(results: Res<ShearResults>) {
    for report in &results.reports {
        match report {
            Ok(report) => println!("{report}\n"),
            Err(err) => println!("evaluation failed: {err}\n"),
        }
    }
    for (frequency_hz, optimum) in &results.optima {
        match optimum {
            Ok(optimum) => println!(
                "optimal amplitude at {frequency_hz} Hz: {:.6} µm\n{}\n",
                optimum.amplitude_um, optimum.report
            ),
            Err(err) => println!("optimization at {frequency_hz} Hz failed: {err}\n"),
        }
    }
    if let Some(example) = &results.viscoelastic {
        match example {
            Ok(example) => {
                for model in ViscoelasticModel::ALL {
                    println!("{}", model.derivation());
                }
                println!(
                    "at {} Hz (omega = {:.2} rad/s), eta = {} Pa·s, G = {} Pa:",
                    example.frequency_hz, example.omega, example.viscosity, example.modulus
                );
                println!(
                    "  Kelvin-Voigt G' = {:.3}, G'' = {:.3}",
                    example.kelvin_voigt.storage_modulus, example.kelvin_voigt.loss_modulus
                );
                println!(
                    "  Maxwell      G' = {:.3}, G'' = {:.3}",
                    example.maxwell.storage_modulus, example.maxwell.loss_modulus
                );
            }
            Err(err) => println!("viscoelastic reference failed: {err}"),
        }
    }
}
