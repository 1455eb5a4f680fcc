use nalgebra::{DMatrix, DVector};

pub type Real = f64;

pub type Vector = DVector<Real>;
pub type Matrix = DMatrix<Real>;

#[inline(always)]
pub fn identity_matrix(dim: usize) -> Matrix {
    Matrix::identity(dim, dim)
}

/// Infinity norm, 0 for an empty vector
#[inline]
pub fn max_abs(v: &Vector) -> Real {
    v.iter().fold(0.0, |acc, x| acc.max(x.abs()))
}

/// Sum of the negative parts of `g`, i.e. total violation of `g >= 0`
#[inline]
pub fn total_violation(g: &Vector) -> Real {
    g.iter().map(|gi| (-gi).max(0.0)).sum()
}

/// Largest single violation of `g >= 0`
#[inline]
pub fn max_violation(g: &Vector) -> Real {
    g.iter().fold(0.0, |acc, gi| acc.max(-gi))
}

#[inline]
pub fn quadratic_form(m: &Matrix, v: &Vector) -> Real {
    v.dot(&(m * v))
}

/// Clip each component into `[lower, upper]`
pub fn clamp_vector(v: &Vector, lower: &Vector, upper: &Vector) -> Vector {
    Vector::from_iterator(
        v.len(),
        v.iter()
            .zip(lower.iter().zip(upper.iter()))
            .map(|(x, (lo, hi))| x.clamp(*lo, *hi)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_ignores_satisfied_rows() {
        let g = Vector::from_vec(vec![1.0, -0.5, -0.25, 0.0]);
        assert_eq!(total_violation(&g), 0.75);
        assert_eq!(max_violation(&g), 0.5);
    }

    #[test]
    fn clamp_respects_box() {
        let v = Vector::from_vec(vec![-1.0, 0.5, 3.0]);
        let lo = Vector::from_element(3, 0.0);
        let hi = Vector::from_element(3, 1.0);
        assert_eq!(clamp_vector(&v, &lo, &hi), Vector::from_vec(vec![0.0, 0.5, 1.0]));
    }

    #[test]
    fn quadratic_form_of_identity_is_squared_norm() {
        let v = Vector::from_vec(vec![3.0, 4.0]);
        assert_eq!(quadratic_form(&identity_matrix(2), &v), 25.0);
        assert_eq!(max_abs(&v), 4.0);
    }
}
