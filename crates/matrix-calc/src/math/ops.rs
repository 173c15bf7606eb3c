//! Pure matrix operations.
//!
//! Every function validates operand shapes itself and returns a fresh matrix;
//! operands are never mutated.
use num_traits::{Float, Num};

use crate::config::Operation;
use crate::error::{CalcError, Result};
use crate::math::Matrix;

fn zip_with<T, F>(a: &Matrix<T>, b: &Matrix<T>, f: F) -> Result<Matrix<T>>
where
    T: Copy,
    F: Fn(T, T) -> T,
{
    if a.shape() != b.shape() {
        return Err(CalcError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    let mut out = a.clone();
    for (x, &y) in out.as_mut_slice().iter_mut().zip(b.as_slice()) {
        *x = f(*x, y);
    }
    Ok(out)
}

/// Element-wise sum of two matrices of identical shape.
pub fn add<T: Num + Copy>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    zip_with(a, b, |x, y| x + y)
}

/// Element-wise difference `a - b` of two matrices of identical shape.
pub fn subtract<T: Num + Copy>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    zip_with(a, b, |x, y| x - y)
}

/// Standard matrix product. Requires `a.ncols() == b.nrows()`.
///
/// The result has shape `a.nrows() x b.ncols()`.
pub fn multiply<T: Num + Copy>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    if a.ncols() != b.nrows() {
        return Err(CalcError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    let (rows, inner, cols) = (a.nrows(), a.ncols(), b.ncols());
    let mut result = Matrix::zeros(rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            let mut acc = T::zero();
            for k in 0..inner {
                acc = acc + a[(i, k)] * b[(k, j)];
            }
            result[(i, j)] = acc;
        }
    }
    Ok(result)
}

/// Determinant of a 2x2 matrix.
pub fn determinant_2x2<T: Num + Copy>(a: &Matrix<T>) -> Result<T> {
    if a.shape() != (2, 2) {
        return Err(CalcError::UnsupportedShape { shape: a.shape() });
    }
    Ok(a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)])
}

/// Closed-form inverse of a 2x2 matrix.
///
/// Fails with [`CalcError::UnsupportedShape`] for any other size and
/// [`CalcError::SingularMatrix`] when the determinant is exactly zero.
pub fn invert<T: Float>(a: &Matrix<T>) -> Result<Matrix<T>> {
    let det = determinant_2x2(a)?;
    if det == T::zero() {
        return Err(CalcError::SingularMatrix);
    }
    let mut inv = Matrix::zeros(2, 2);
    inv[(0, 0)] = a[(1, 1)] / det;
    inv[(0, 1)] = -a[(0, 1)] / det;
    inv[(1, 0)] = -a[(1, 0)] / det;
    inv[(1, 1)] = a[(0, 0)] / det;
    // Negated zero entries come out as -0; adding +0 folds them to 0.
    Ok(inv.mapv(|v| *v + T::zero()))
}

/// Run `op` on the operands. `Inverse` only looks at `a`.
pub fn apply<T: Float>(op: Operation, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    match op {
        Operation::Add => add(a, b),
        Operation::Subtract => subtract(a, b),
        Operation::Multiply => multiply(a, b),
        Operation::Inverse => invert(a),
    }
}
