//! Minimal symbolic algebra for the viscoelastic references
//!
//! Expressions over a fixed set of physical symbols plus the imaginary unit.
//! Constructors fold constants and drop neutral elements; evaluation is done
//! in complex arithmetic against a table of bound symbol values.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use indexmap::IndexMap;
use nalgebra::Complex;

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Angular frequency (rad/s)
    Omega,
    /// Dynamic viscosity (Pa·s)
    Eta,
    /// Elastic modulus (Pa)
    Modulus,
    /// Relaxation time η/G (s)
    Tau,
}

impl Symbol {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Omega => "omega",
            Self::Eta => "eta",
            Self::Modulus => "G",
            Self::Tau => "tau",
        }
    }
}

/// Values assigned to symbols for numeric evaluation.
pub type Bindings = IndexMap<Symbol, f64>;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    Symbol(Symbol),
    ImaginaryUnit,
    Add(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, i32),
}

impl Expr {
    pub fn constant(value: f64) -> Self {
        Self::Const(value)
    }

    pub fn symbol(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }

    pub fn i() -> Self {
        Self::ImaginaryUnit
    }

    pub fn sum(lhs: Expr, rhs: Expr) -> Self {
        match (lhs, rhs) {
            (Self::Const(a), Self::Const(b)) => Self::Const(a + b),
            (Self::Const(z), other) | (other, Self::Const(z)) if z == 0.0 => other,
            (lhs, rhs) => Self::Add(Box::new(lhs), Box::new(rhs)),
        }
    }

    pub fn product(lhs: Expr, rhs: Expr) -> Self {
        match (lhs, rhs) {
            (Self::Const(a), Self::Const(b)) => Self::Const(a * b),
            (Self::Const(z), _) | (_, Self::Const(z)) if z == 0.0 => Self::Const(0.0),
            (Self::Const(one), other) | (other, Self::Const(one)) if one == 1.0 => other,
            (lhs, rhs) => Self::Mul(Box::new(lhs), Box::new(rhs)),
        }
    }

    pub fn quotient(lhs: Expr, rhs: Expr) -> Self {
        match (lhs, rhs) {
            (Self::Const(a), Self::Const(b)) if b != 0.0 => Self::Const(a / b),
            (lhs, Self::Const(one)) if one == 1.0 => lhs,
            (Self::Const(z), _) if z == 0.0 => Self::Const(0.0),
            (lhs, rhs) => Self::Div(Box::new(lhs), Box::new(rhs)),
        }
    }

    pub fn powi(self, exponent: i32) -> Self {
        match (self, exponent) {
            (_, 0) => Self::Const(1.0),
            (base, 1) => base,
            (Self::Const(a), n) => Self::Const(a.powi(n)),
            (base, n) => Self::Pow(Box::new(base), n),
        }
    }

    /// Replace every occurrence of `symbol` by `replacement`.
    pub fn substitute(&self, symbol: Symbol, replacement: &Expr) -> Self {
        match self {
            Self::Symbol(s) if *s == symbol => replacement.clone(),
            Self::Const(_) | Self::Symbol(_) | Self::ImaginaryUnit => self.clone(),
            Self::Add(a, b) => Self::sum(
                a.substitute(symbol, replacement),
                b.substitute(symbol, replacement),
            ),
            Self::Mul(a, b) => Self::product(
                a.substitute(symbol, replacement),
                b.substitute(symbol, replacement),
            ),
            Self::Div(a, b) => Self::quotient(
                a.substitute(symbol, replacement),
                b.substitute(symbol, replacement),
            ),
            Self::Pow(base, n) => base.substitute(symbol, replacement).powi(*n),
        }
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        match self {
            Self::Symbol(s) => *s == symbol,
            Self::Const(_) | Self::ImaginaryUnit => false,
            Self::Add(a, b) | Self::Mul(a, b) | Self::Div(a, b) => {
                a.contains(symbol) || b.contains(symbol)
            }
            Self::Pow(base, _) => base.contains(symbol),
        }
    }

    pub fn eval(&self, bindings: &Bindings) -> Result<Complex<f64>, ModelError> {
        match self {
            Self::Const(value) => Ok(Complex::new(*value, 0.0)),
            Self::Symbol(symbol) => bindings
                .get(symbol)
                .map(|value| Complex::new(*value, 0.0))
                .ok_or(ModelError::UnboundSymbol(symbol.name())),
            Self::ImaginaryUnit => Ok(Complex::i()),
            Self::Add(a, b) => Ok(a.eval(bindings)? + b.eval(bindings)?),
            Self::Mul(a, b) => Ok(a.eval(bindings)? * b.eval(bindings)?),
            Self::Div(a, b) => {
                let denominator = b.eval(bindings)?;
                if denominator.norm_sqr() == 0.0 {
                    return Err(ModelError::DivisionByZero(self.to_string()));
                }
                Ok(a.eval(bindings)? / denominator)
            }
            Self::Pow(base, exponent) => {
                let value = base.eval(bindings)?;
                if *exponent < 0 && value.norm_sqr() == 0.0 {
                    return Err(ModelError::DivisionByZero(self.to_string()));
                }
                let mut result = Complex::new(1.0, 0.0);
                for _ in 0..exponent.unsigned_abs() {
                    result *= value;
                }
                Ok(if *exponent < 0 { result.inv() } else { result })
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Add(..) => 1,
            Self::Mul(..) | Self::Div(..) => 2,
            Self::Pow(..) => 3,
            Self::Const(c) if *c < 0.0 => 1,
            Self::Const(_) | Self::Symbol(_) | Self::ImaginaryUnit => 4,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(value) => write!(f, "{value}"),
            Self::Symbol(symbol) => f.write_str(symbol.name()),
            Self::ImaginaryUnit => f.write_str("I"),
            Self::Add(a, b) => {
                a.fmt_child(f, 1)?;
                match b.as_ref() {
                    Self::Mul(c, rest) if matches!(c.as_ref(), Self::Const(v) if *v == -1.0) => {
                        f.write_str(" - ")?;
                        rest.fmt_child(f, 2)
                    }
                    _ => {
                        f.write_str(" + ")?;
                        b.fmt_child(f, 1)
                    }
                }
            }
            Self::Mul(a, b) => {
                a.fmt_child(f, 2)?;
                f.write_str("*")?;
                b.fmt_child(f, 2)
            }
            Self::Div(a, b) => {
                a.fmt_child(f, 2)?;
                f.write_str("/")?;
                b.fmt_child(f, 3)
            }
            Self::Pow(base, exponent) => {
                base.fmt_child(f, 4)?;
                write!(f, "^{exponent}")
            }
        }
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Const(value)
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::sum(self, rhs)
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::sum(self, -rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::product(self, rhs)
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::quotient(self, rhs)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::product(Expr::Const(-1.0), self)
    }
}
