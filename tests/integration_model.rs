//! Integration tests: shear model evaluated through the public API.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vibroshear::{
    LayerParams, ModelError, SafetyCriteria, nominal_shear_rate, validate_safety_and_shear,
};

fn evaluate(frequency_hz: f64, amplitude_um: f64) -> vibroshear::ShearReport {
    validate_safety_and_shear(
        frequency_hz,
        amplitude_um,
        &LayerParams::default(),
        &SafetyCriteria::default(),
    )
    .expect("valid inputs")
}

#[test]
fn ninety_hertz_scenario_matches_formula() {
    let report = evaluate(90.0, 10.0);
    let omega = 2.0 * std::f64::consts::PI * 90.0;
    assert!((report.omega - 565.486_677_646_162_8).abs() < 1e-9);
    let expected = omega * omega * 10.0e-6;
    assert!((report.acceleration - expected).abs() < 1e-12);
    assert!((report.acceleration - 3.198).abs() < 1e-3);
    assert!(!report.safe, "3.2 m/s² must be unsafe");
    assert!(report.shear_rate > 0.0);
    assert!(report.effective);
}

#[test]
fn sixteen_hertz_scenario_flags_match_direct_computation() {
    let report = evaluate(16.0, 100.0);
    let omega = 2.0 * std::f64::consts::PI * 16.0;
    let amplitude_m = 100.0e-6;
    let thickness_m: f64 = 5.0e-3;
    let delta = (2.0 * (100.0 / 1000.0) / omega).sqrt();
    let gap = thickness_m.min(delta);
    let shear = omega * amplitude_m / gap;
    let acceleration = omega * omega * amplitude_m;

    assert!((report.shear_rate - shear).abs() < 1e-12);
    assert!((report.acceleration - acceleration).abs() < 1e-12);
    assert_eq!(report.safe, acceleration < 0.5);
    assert_eq!(report.effective, shear > 1.0);
    assert!(!report.safe);
    assert!(report.effective);
}

#[test]
fn acceleration_formula_holds_for_random_inputs() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let frequency_hz = rng.random_range(0.01..500.0);
        let amplitude_um = rng.random_range(0.01..500.0);
        let report = evaluate(frequency_hz, amplitude_um);
        let omega = 2.0 * std::f64::consts::PI * frequency_hz;
        let expected = omega.powi(2) * (amplitude_um * 1e-6);
        assert!(
            (report.acceleration - expected).abs() <= 1e-12 * expected.max(1.0),
            "f = {frequency_hz}, A = {amplitude_um}"
        );
        assert!(report.acceleration >= 0.0);
        assert!(report.shear_rate >= 0.0);
        assert!((report.omega / frequency_hz - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }
}

#[test]
fn effective_gap_never_exceeds_layer_thickness() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let layer = LayerParams::default()
            .with_thickness_mm(rng.random_range(0.01..50.0))
            .with_viscosity(rng.random_range(1e-4..1e4))
            .with_density(rng.random_range(500.0..2000.0));
        let report = validate_safety_and_shear(
            rng.random_range(0.0..1000.0),
            rng.random_range(0.0..100.0),
            &layer,
            &SafetyCriteria::default(),
        )
        .unwrap();
        assert!(report.effective_gap_m <= report.thickness_m);
        assert_eq!(
            report.effective_gap_m,
            report.thickness_m.min(report.boundary_layer_m)
        );
    }
}

#[test]
fn shear_rate_increases_with_amplitude() {
    let mut previous = evaluate(90.0, 0.1);
    for step in 1..200 {
        let report = evaluate(90.0, 0.1 + step as f64 * 0.5);
        assert_eq!(report.effective_gap_m, previous.effective_gap_m);
        assert!(report.shear_rate > previous.shear_rate);
        previous = report;
    }
}

#[test]
fn safety_threshold_is_strict() {
    let criteria = SafetyCriteria::default();
    let just_below = evaluate(10.0, 0.5 / (2.0 * std::f64::consts::PI * 10.0).powi(2) * 1e6 * 0.999);
    assert!(just_below.safe);

    let probe = evaluate(10.0, 50.0);
    let at_limit = criteria.with_acceleration_limit(probe.acceleration);
    let report =
        validate_safety_and_shear(10.0, 50.0, &LayerParams::default(), &at_limit).unwrap();
    assert!(!report.safe, "acceleration equal to the limit is unsafe");
}

#[test]
fn non_physical_inputs_are_reported() {
    let layer = LayerParams::default();
    let criteria = SafetyCriteria::default();
    for (frequency, amplitude) in [(-90.0, 10.0), (90.0, -10.0)] {
        assert!(matches!(
            validate_safety_and_shear(frequency, amplitude, &layer, &criteria),
            Err(ModelError::Negative { .. })
        ));
    }
    for (frequency, amplitude) in [(f64::NAN, 10.0), (90.0, f64::INFINITY)] {
        assert!(matches!(
            validate_safety_and_shear(frequency, amplitude, &layer, &criteria),
            Err(ModelError::NonFinite { .. })
        ));
    }
    assert!(nominal_shear_rate(90.0, 10.0, 0.0).is_err());
}
