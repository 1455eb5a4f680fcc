//! Sequential quadratic programming for small bound-constrained problems
//!
//! Each iteration linearizes the inequality constraints around the current
//! point, solves the quadratic sub-problem built from a quasi-Newton model
//! of the Lagrangian, and takes a backtracking step on an L1 merit function.
//! Gradients come from finite differences; the Hessian model is a damped
//! BFGS update so it stays positive definite even where the problem is
//! linear.

use bevy::log::debug;

use crate::config::constants::{SOLVER_MAX_ITERATIONS, SOLVER_TOLERANCE};
use crate::error::{ModelError, SolverError};
use crate::math::{
    Matrix, Real, Vector, clamp_vector, identity_matrix, max_abs, max_violation, total_violation,
};

use super::qp::{QpProblem, solve_qp};

/// Cube root of machine epsilon, the usual central-difference step
const FD_STEP: Real = 6.055454452393343e-6;
const ARMIJO: Real = 1e-4;
const MAX_BACKTRACKS: usize = 30;
const QP_FEASIBILITY_TOLERANCE: Real = 1e-10;

/// A problem the SQP solver can minimize.
pub trait ConstrainedProblem {
    fn dimension(&self) -> usize;

    /// Lower and upper bounds on every variable
    fn bounds(&self) -> (Vector, Vector);

    fn objective(&self, x: &Vector) -> Result<Real, ModelError>;

    /// Inequality constraints, each required to satisfy `g_i(x) >= 0`
    fn constraints(&self, x: &Vector) -> Result<Vector, ModelError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqpSettings {
    pub tolerance: Real,
    pub max_iterations: usize,
}

impl Default for SqpSettings {
    fn default() -> Self {
        Self {
            tolerance: SOLVER_TOLERANCE,
            max_iterations: SOLVER_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqpOutcome {
    pub x: Vector,
    pub objective: Real,
    pub constraints: Vector,
    /// Multipliers of the inequality constraints at the solution
    pub multipliers: Vector,
    pub iterations: usize,
    /// Number of objective/constraint evaluation pairs
    pub evaluations: usize,
}

struct Point {
    x: Vector,
    f: Real,
    g: Vector,
}

pub struct SqpSolver<'a, P: ConstrainedProblem> {
    problem: &'a P,
    settings: SqpSettings,
    lower: Vector,
    upper: Vector,
    evaluations: usize,
}

impl<'a, P: ConstrainedProblem> SqpSolver<'a, P> {
    pub fn new(problem: &'a P, settings: SqpSettings) -> Result<Self, SolverError> {
        let n = problem.dimension();
        let (lower, upper) = problem.bounds();
        if lower.len() != n || upper.len() != n {
            return Err(SolverError::InvalidBounds {
                index: lower.len().min(upper.len()),
                lower: Real::NAN,
                upper: Real::NAN,
            });
        }
        for index in 0..n {
            let (lo, hi) = (lower[index], upper[index]);
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(SolverError::InvalidBounds {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self {
            problem,
            settings,
            lower,
            upper,
            evaluations: 0,
        })
    }

    fn evaluate(&mut self, x: Vector, iteration: usize) -> Result<Point, SolverError> {
        let f = self.problem.objective(&x)?;
        let g = self.problem.constraints(&x)?;
        self.evaluations += 1;
        if !f.is_finite() || g.iter().any(|gi| !gi.is_finite()) {
            return Err(SolverError::NonFiniteEvaluation { iteration });
        }
        Ok(Point { x, f, g })
    }

    /// Objective gradient and constraint Jacobian (one row per constraint).
    ///
    /// Central differences in the interior, one-sided next to a bound so no
    /// trial point leaves the box.
    fn derivatives(
        &mut self,
        point: &Point,
        iteration: usize,
    ) -> Result<(Vector, Matrix), SolverError> {
        let n = point.x.len();
        let m = point.g.len();
        let mut gradient = Vector::zeros(n);
        let mut jacobian = Matrix::zeros(m, n);

        for j in 0..n {
            let h = FD_STEP * point.x[j].abs().max(1.0);
            let can_step_up = point.x[j] + h <= self.upper[j];
            let can_step_down = point.x[j] - h >= self.lower[j];

            let mut shifted = |delta: Real| -> Result<Point, SolverError> {
                let mut x = point.x.clone();
                x[j] += delta;
                self.evaluate(x, iteration)
            };

            let (df, dg, width) = match (can_step_up, can_step_down) {
                (true, true) => {
                    let up = shifted(h)?;
                    let down = shifted(-h)?;
                    (up.f - down.f, &up.g - &down.g, 2.0 * h)
                }
                (true, false) => {
                    let up = shifted(h)?;
                    (up.f - point.f, &up.g - &point.g, h)
                }
                (false, true) => {
                    let down = shifted(-h)?;
                    (point.f - down.f, &point.g - &down.g, h)
                }
                // Box narrower than the difference step: the variable is fixed
                (false, false) => (0.0, Vector::zeros(m), 1.0),
            };

            gradient[j] = df / width;
            for i in 0..m {
                jacobian[(i, j)] = dg[i] / width;
            }
        }

        Ok((gradient, jacobian))
    }

    /// Linearized constraints followed by the lower and upper bound rows.
    fn linearized_rows(&self, point: &Point, jacobian: &Matrix) -> (Matrix, Vector) {
        let n = point.x.len();
        let m = point.g.len();
        let mut rows = Matrix::zeros(m + 2 * n, n);
        let mut rhs = Vector::zeros(m + 2 * n);

        rows.view_mut((0, 0), (m, n)).copy_from(jacobian);
        for i in 0..m {
            rhs[i] = -point.g[i];
        }
        for j in 0..n {
            rows[(m + j, j)] = 1.0;
            rhs[m + j] = self.lower[j] - point.x[j];
            rows[(m + n + j, j)] = -1.0;
            rhs[m + n + j] = point.x[j] - self.upper[j];
        }
        (rows, rhs)
    }

    /// Minimize from `initial`, which is clipped into the bounds first.
    pub fn minimize(&mut self, initial: &Vector) -> Result<SqpOutcome, SolverError> {
        let tolerance = self.settings.tolerance;
        let start = clamp_vector(initial, &self.lower, &self.upper);

        let mut point = self.evaluate(start, 0)?;
        let (mut gradient, mut jacobian) = self.derivatives(&point, 0)?;
        let mut hessian = identity_matrix(point.x.len());
        let mut penalty: Real = 0.0;
        let m = point.g.len();

        for iteration in 1..=self.settings.max_iterations {
            let (rows, rhs) = self.linearized_rows(&point, &jacobian);
            let qp = QpProblem {
                hessian: &hessian,
                gradient: &gradient,
                constraints: &rows,
                rhs: &rhs,
            };
            let Some(sub) = solve_qp(&qp, QP_FEASIBILITY_TOLERANCE)? else {
                return Err(SolverError::IncompatibleConstraints { iteration });
            };
            let step = sub.step;
            let multipliers = sub.multipliers.rows(0, m).into_owned();

            let violation = total_violation(&point.g);
            debug!(
                "sqp iteration {iteration}: f = {:.9e}, |d| = {:.3e}, violation = {violation:.3e}",
                point.f,
                max_abs(&step)
            );

            if max_abs(&step) <= tolerance * (1.0 + max_abs(&point.x))
                && max_violation(&point.g) <= tolerance
            {
                return Ok(SqpOutcome {
                    x: point.x,
                    objective: point.f,
                    constraints: point.g,
                    multipliers,
                    iterations: iteration,
                    evaluations: self.evaluations,
                });
            }

            penalty = penalty.max(max_abs(&multipliers) * 1.5);
            let merit = point.f + penalty * violation;
            let slope = gradient.dot(&step) - penalty * violation;

            let mut alpha = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_BACKTRACKS {
                let x = clamp_vector(&(&point.x + &step * alpha), &self.lower, &self.upper);
                let trial = self.evaluate(x, iteration)?;
                let trial_merit = trial.f + penalty * total_violation(&trial.g);
                if trial_merit <= merit + ARMIJO * alpha * slope.min(0.0) {
                    accepted = Some(trial);
                    break;
                }
                alpha *= 0.5;
            }
            let Some(next) = accepted else {
                return Err(SolverError::LineSearchFailed { iteration });
            };

            let (next_gradient, next_jacobian) = self.derivatives(&next, iteration)?;
            let s = &next.x - &point.x;
            let y = (&next_gradient - next_jacobian.transpose() * &multipliers)
                - (&gradient - jacobian.transpose() * &multipliers);
            damped_bfgs_update(&mut hessian, &s, &y);

            point = next;
            gradient = next_gradient;
            jacobian = next_jacobian;
        }

        Err(SolverError::IterationLimit {
            iterations: self.settings.max_iterations,
        })
    }
}

/// Powell-damped BFGS update; leaves `hessian` positive definite.
pub fn damped_bfgs_update(hessian: &mut Matrix, s: &Vector, y: &Vector) {
    let bs = &*hessian * s;
    let sbs = s.dot(&bs);
    if sbs <= Real::EPSILON * s.norm_squared().max(Real::MIN_POSITIVE) {
        return;
    }
    let sy = s.dot(y);
    let theta = if sy >= 0.2 * sbs {
        1.0
    } else {
        0.8 * sbs / (sbs - sy)
    };
    let r = y * theta + &bs * (1.0 - theta);
    let sr = s.dot(&r);
    if sr <= 0.0 {
        return;
    }
    *hessian = &*hessian - (&bs * bs.transpose()) / sbs + (&r * r.transpose()) / sr;
}
