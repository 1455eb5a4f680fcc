//! Linear viscoelastic references
//!
//! Complex shear modulus G*(ω) = G′ + iG″ of the two classic two-element
//! models, both as closed-form numbers and as symbolic expressions:
//!
//! * Kelvin-Voigt (spring and dashpot in parallel): G* = G + iωη
//! * Maxwell (spring and dashpot in series): G* = iωηG / (G + iωη), with
//!   relaxation time τ = η/G giving G′ = ω²τ²G/(1+ω²τ²), G″ = ωτG/(1+ω²τ²)
//!
//! Nothing in the shear model calls into this module.

use std::fmt;

use nalgebra::Complex;

use crate::config::constants::TWO_PI;
use crate::error::ModelError;
use crate::materials::symbolic::{Bindings, Expr, Symbol};
use crate::materials::utils::require_positive;

/// Frequency, viscosity and modulus of the worked example
pub const EXAMPLE_FREQUENCY_HZ: f64 = 90.0;
pub const EXAMPLE_VISCOSITY: f64 = 100.0;
pub const EXAMPLE_MODULUS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViscoelasticModel {
    KelvinVoigt,
    Maxwell,
}

impl ViscoelasticModel {
    pub const ALL: [Self; 2] = [Self::KelvinVoigt, Self::Maxwell];

    pub fn name(&self) -> &'static str {
        match self {
            Self::KelvinVoigt => "Kelvin-Voigt",
            Self::Maxwell => "Maxwell",
        }
    }

    /// Closed-form G* at angular frequency `omega` (rad/s), which must be
    /// positive: tan δ of the Maxwell model diverges at ω = 0.
    pub fn complex_modulus(
        &self,
        omega: f64,
        viscosity: f64,
        modulus: f64,
    ) -> Result<Complex<f64>, ModelError> {
        let (omega, viscosity, modulus) = validate(omega, viscosity, modulus)?;
        Ok(match self {
            Self::KelvinVoigt => Complex::new(modulus, omega * viscosity),
            Self::Maxwell => {
                let tau = viscosity / modulus;
                let wt = omega * tau;
                let denominator = 1.0 + wt * wt;
                Complex::new(wt * wt * modulus / denominator, wt * modulus / denominator)
            }
        })
    }

    /// Symbolic G*, G′, G″ and tan δ.
    pub fn derivation(&self) -> ModulusDerivation {
        let omega = Expr::symbol(Symbol::Omega);
        let eta = Expr::symbol(Symbol::Eta);
        let g = Expr::symbol(Symbol::Modulus);
        let tau = Expr::symbol(Symbol::Tau);

        match self {
            Self::KelvinVoigt => ModulusDerivation {
                model: *self,
                complex_modulus: g.clone() + Expr::i() * omega.clone() * eta.clone(),
                storage_modulus: g.clone(),
                loss_modulus: omega.clone() * eta.clone(),
                loss_tangent: omega * eta / g,
            },
            Self::Maxwell => {
                let wt_squared = (omega.clone() * tau.clone()).powi(2);
                let denominator = Expr::constant(1.0) + wt_squared.clone();
                ModulusDerivation {
                    model: *self,
                    complex_modulus: Expr::i() * omega.clone() * eta.clone() * g.clone()
                        / (g.clone() + Expr::i() * omega.clone() * eta),
                    storage_modulus: wt_squared * g.clone() / denominator.clone(),
                    loss_modulus: omega.clone() * tau.clone() * g / denominator,
                    loss_tangent: Expr::constant(1.0) / (omega * tau),
                }
            }
        }
    }
}

impl fmt::Display for ViscoelasticModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn validate(omega: f64, viscosity: f64, modulus: f64) -> Result<(f64, f64, f64), ModelError> {
    Ok((
        require_positive("angular frequency", omega)?,
        require_positive("viscosity", viscosity)?,
        require_positive("modulus", modulus)?,
    ))
}

/// Symbolic moduli of one model, in terms of ω, η, G and τ = η/G.
#[derive(Debug, Clone, PartialEq)]
pub struct ModulusDerivation {
    pub model: ViscoelasticModel,
    pub complex_modulus: Expr,
    pub storage_modulus: Expr,
    pub loss_modulus: Expr,
    pub loss_tangent: Expr,
}

impl ModulusDerivation {
    /// The same expressions with τ written out as η/G.
    pub fn without_relaxation_time(&self) -> Self {
        let tau = Expr::symbol(Symbol::Eta) / Expr::symbol(Symbol::Modulus);
        let expand = |expr: &Expr| expr.substitute(Symbol::Tau, &tau);
        Self {
            model: self.model,
            complex_modulus: expand(&self.complex_modulus),
            storage_modulus: expand(&self.storage_modulus),
            loss_modulus: expand(&self.loss_modulus),
            loss_tangent: expand(&self.loss_tangent),
        }
    }

    /// Bind ω, η, G and τ = η/G, then evaluate every expression.
    pub fn evaluate(
        &self,
        omega: f64,
        viscosity: f64,
        modulus: f64,
    ) -> Result<ModulusValues, ModelError> {
        let (omega, viscosity, modulus) = validate(omega, viscosity, modulus)?;
        let bindings = Bindings::from([
            (Symbol::Omega, omega),
            (Symbol::Eta, viscosity),
            (Symbol::Modulus, modulus),
            (Symbol::Tau, viscosity / modulus),
        ]);
        Ok(ModulusValues {
            complex_modulus: self.complex_modulus.eval(&bindings)?,
            storage_modulus: self.storage_modulus.eval(&bindings)?.re,
            loss_modulus: self.loss_modulus.eval(&bindings)?.re,
            loss_tangent: self.loss_tangent.eval(&bindings)?.re,
        })
    }
}

impl fmt::Display for ModulusDerivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} model", self.model)?;
        writeln!(f, "  G*    = {}", self.complex_modulus)?;
        writeln!(f, "  G'    = {}", self.storage_modulus)?;
        writeln!(f, "  G''   = {}", self.loss_modulus)?;
        write!(f, "  tan d = {}", self.loss_tangent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulusValues {
    pub complex_modulus: Complex<f64>,
    pub storage_modulus: f64,
    pub loss_modulus: f64,
    pub loss_tangent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkedExample {
    pub frequency_hz: f64,
    pub omega: f64,
    pub viscosity: f64,
    pub modulus: f64,
    pub kelvin_voigt: ModulusValues,
    pub maxwell: ModulusValues,
}

/// Both models evaluated at 90 Hz, η = 100 Pa·s, G = 1000 Pa.
pub fn worked_example() -> Result<WorkedExample, ModelError> {
    let omega = TWO_PI * EXAMPLE_FREQUENCY_HZ;
    let evaluate = |model: ViscoelasticModel| {
        model
            .derivation()
            .evaluate(omega, EXAMPLE_VISCOSITY, EXAMPLE_MODULUS)
    };
    Ok(WorkedExample {
        frequency_hz: EXAMPLE_FREQUENCY_HZ,
        omega,
        viscosity: EXAMPLE_VISCOSITY,
        modulus: EXAMPLE_MODULUS,
        kelvin_voigt: evaluate(ViscoelasticModel::KelvinVoigt)?,
        maxwell: evaluate(ViscoelasticModel::Maxwell)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn kelvin_voigt_parts_are_modulus_and_viscous_term() {
        let g = ViscoelasticModel::KelvinVoigt
            .complex_modulus(10.0, 2.0, 50.0)
            .unwrap();
        assert_eq!(g, Complex::new(50.0, 20.0));
    }

    #[test]
    fn symbolic_parts_recombine_into_complex_modulus() {
        for model in ViscoelasticModel::ALL {
            let values = model.derivation().evaluate(565.0, 100.0, 1000.0).unwrap();
            assert!(close(values.complex_modulus.re, values.storage_modulus), "{model}");
            assert!(close(values.complex_modulus.im, values.loss_modulus), "{model}");
            assert!(close(
                values.loss_tangent,
                values.loss_modulus / values.storage_modulus
            ));
        }
    }

    #[test]
    fn symbolic_matches_closed_form() {
        for model in ViscoelasticModel::ALL {
            let numeric = model.complex_modulus(200.0, 5.0, 300.0).unwrap();
            let symbolic = model.derivation().evaluate(200.0, 5.0, 300.0).unwrap();
            assert!(close(numeric.re, symbolic.complex_modulus.re));
            assert!(close(numeric.im, symbolic.complex_modulus.im));
        }
    }

    #[test]
    fn expanding_tau_removes_symbol_without_changing_value() {
        let derivation = ViscoelasticModel::Maxwell.derivation();
        let expanded = derivation.without_relaxation_time();
        assert!(derivation.storage_modulus.contains(Symbol::Tau));
        assert!(!expanded.storage_modulus.contains(Symbol::Tau));
        let a = derivation.evaluate(100.0, 10.0, 400.0).unwrap();
        let b = expanded.evaluate(100.0, 10.0, 400.0).unwrap();
        assert!(close(a.storage_modulus, b.storage_modulus));
        assert!(close(a.loss_modulus, b.loss_modulus));
    }

    #[test]
    fn maxwell_worked_example() {
        let example = worked_example().unwrap();
        let tau = 100.0 / 1000.0;
        let wt = example.omega * tau;
        let storage = wt * wt * 1000.0 / (1.0 + wt * wt);
        let loss = wt * 1000.0 / (1.0 + wt * wt);
        assert!(close(example.maxwell.storage_modulus, storage));
        assert!(close(example.maxwell.loss_modulus, loss));
        assert!(close(example.kelvin_voigt.loss_modulus, example.omega * 100.0));
    }

    #[test]
    fn rejects_zero_modulus() {
        assert!(matches!(
            ViscoelasticModel::Maxwell.complex_modulus(1.0, 1.0, 0.0),
            Err(ModelError::NonPositive { name: "modulus", .. })
        ));
    }

    #[test]
    fn zero_frequency_rejected_by_both_paths() {
        for model in ViscoelasticModel::ALL {
            let closed = model.complex_modulus(0.0, 100.0, 1000.0);
            let symbolic = model.derivation().evaluate(0.0, 100.0, 1000.0);
            let expected = ModelError::NonPositive {
                name: "angular frequency",
                value: 0.0,
            };
            assert_eq!(closed, Err(expected.clone()), "{model}");
            assert_eq!(symbolic, Err(expected), "{model}");
        }
    }

    #[test]
    fn derivation_prints_every_part() {
        let text = ViscoelasticModel::Maxwell.derivation().to_string();
        assert!(text.starts_with("Maxwell model"));
        assert!(text.contains("G''"));
        assert!(text.contains("tau"));
    }
}
