/// Simple custom benchmarking without criterion
use std::hint::black_box;
use std::time::Instant;

use vibroshear::{
    LayerParams, OptimizerParams, SafetyCriteria, ViscoelasticModel, optimize_amplitude,
    validate_safety_and_shear,
};

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_us = elapsed.as_secs_f64() * 1e6 / iterations as f64;
    println!("{}: {:.3}µs avg ({} iterations)", name, avg_us, iterations);
}

fn main() {
    println!("\n=== vibroshear Benchmarks ===\n");

    let layer = LayerParams::default();
    let criteria = SafetyCriteria::default();

    println!("--- Model Evaluation ---");
    for &frequency in &[16.0, 90.0, 250.0] {
        time_it(
            &format!("validate_safety_and_shear (f={})", frequency),
            100_000,
            || {
                let _ = black_box(validate_safety_and_shear(
                    black_box(frequency),
                    black_box(10.0),
                    &layer,
                    &criteria,
                ));
            },
        );
    }

    println!("\n--- Amplitude Optimization ---");
    let params = OptimizerParams::default();
    for &frequency in &[5.0, 16.0, 90.0, 250.0] {
        time_it(
            &format!("optimize_amplitude (f={})", frequency),
            1_000,
            || {
                let _ = black_box(optimize_amplitude(black_box(frequency), &layer, &params));
            },
        );
    }

    println!("\n--- Viscoelastic Reference ---");
    for model in ViscoelasticModel::ALL {
        let derivation = model.derivation();
        time_it(&format!("symbolic evaluate ({})", model), 100_000, || {
            let _ = black_box(derivation.evaluate(black_box(565.0), 100.0, 1000.0));
        });
    }

    println!("\n=== Benchmark Complete ===\n");
}
