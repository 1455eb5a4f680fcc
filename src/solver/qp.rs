//! Quadratic sub-problem of the SQP iteration
//!
//! minimize ½ dᵀBd + cᵀd subject to a_iᵀd ≥ b_i for every row of A.
//!
//! B is kept positive definite by the damped BFGS update, so the problem is
//! strictly convex and its minimizer is the equality-constrained minimizer of
//! its own active set. Problems here are tiny (a handful of variables and
//! rows), so every candidate active set is solved directly and the best
//! feasible candidate wins.

use crate::error::SolverError;
use crate::math::{Matrix, Real, Vector, quadratic_form};

/// Row count above which active-set enumeration is refused
pub const MAX_QP_ROWS: usize = 16;

pub struct QpProblem<'a> {
    pub hessian: &'a Matrix,
    pub gradient: &'a Vector,
    /// One row per linear inequality
    pub constraints: &'a Matrix,
    pub rhs: &'a Vector,
}

#[derive(Debug, Clone)]
pub struct QpSolution {
    pub step: Vector,
    /// One multiplier per constraint row, zero for inactive rows
    pub multipliers: Vector,
    pub objective: Real,
}

impl QpProblem<'_> {
    fn objective(&self, step: &Vector) -> Real {
        0.5 * quadratic_form(self.hessian, step) + self.gradient.dot(step)
    }

    fn is_feasible(&self, step: &Vector, tolerance: Real) -> bool {
        let lhs = self.constraints * step;
        lhs.iter()
            .zip(self.rhs.iter())
            .all(|(a, b)| *a >= b - tolerance * (1.0 + b.abs()))
    }

    /// Solve the KKT system with the rows in `active` held as equalities:
    ///
    /// ```text
    /// [ B  -Aₐᵀ ] [d]   [-c ]
    /// [ Aₐ  0   ] [λ] = [ bₐ]
    /// ```
    fn solve_active_set(&self, active: &[usize]) -> Option<(Vector, Vector)> {
        let n = self.gradient.len();
        let k = active.len();
        let mut kkt = Matrix::zeros(n + k, n + k);
        let mut rhs = Vector::zeros(n + k);

        kkt.view_mut((0, 0), (n, n)).copy_from(self.hessian);
        for i in 0..n {
            rhs[i] = -self.gradient[i];
        }
        for (slot, &row) in active.iter().enumerate() {
            for j in 0..n {
                let a = self.constraints[(row, j)];
                kkt[(n + slot, j)] = a;
                kkt[(j, n + slot)] = -a;
            }
            rhs[n + slot] = self.rhs[row];
        }

        let solution = kkt.lu().solve(&rhs)?;
        if solution.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let step = solution.rows(0, n).into_owned();
        let multipliers = solution.rows(n, k).into_owned();
        Some((step, multipliers))
    }
}

/// Returns `Ok(None)` when the constraints admit no feasible step.
pub fn solve_qp(problem: &QpProblem, tolerance: Real) -> Result<Option<QpSolution>, SolverError> {
    let n = problem.gradient.len();
    let m = problem.constraints.nrows();
    if m > MAX_QP_ROWS {
        return Err(SolverError::TooManyConstraints {
            count: m,
            max: MAX_QP_ROWS,
        });
    }

    let mut best: Option<(QpSolution, Real)> = None;
    let mut active = Vec::with_capacity(n);

    for mask in 0u32..(1u32 << m) {
        if mask.count_ones() as usize > n {
            continue;
        }
        active.clear();
        active.extend((0..m).filter(|row| mask & (1 << row) != 0));

        let Some((step, active_multipliers)) = problem.solve_active_set(&active) else {
            continue;
        };
        if !problem.is_feasible(&step, tolerance) {
            continue;
        }

        let objective = problem.objective(&step);
        let min_multiplier = active_multipliers.iter().copied().fold(0.0, Real::min);

        let better = match &best {
            None => true,
            Some((current, current_min)) => {
                let scale = tolerance * (1.0 + current.objective.abs());
                objective < current.objective - scale
                    || (objective <= current.objective + scale && min_multiplier > *current_min)
            }
        };
        if better {
            let mut multipliers = Vector::zeros(m);
            for (slot, &row) in active.iter().enumerate() {
                multipliers[row] = active_multipliers[slot];
            }
            best = Some((
                QpSolution {
                    step,
                    multipliers,
                    objective,
                },
                min_multiplier,
            ));
        }
    }

    Ok(best.map(|(solution, _)| solution))
}
