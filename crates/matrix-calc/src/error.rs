use std::error::Error;
use std::fmt;

use crate::calculator::OperandId;

/// Failures reported by the matrix operations and the calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Operand shapes are incompatible with the requested operation.
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Inverse requested on anything other than a 2x2 matrix.
    UnsupportedShape { shape: (usize, usize) },
    /// Inverse requested on a 2x2 matrix with zero determinant.
    SingularMatrix,
    InvalidDimension(usize),
    UnknownOperation(String),
    /// Cell edit addressed outside the operand grid.
    CellOutOfBounds {
        operand: OperandId,
        row: usize,
        col: usize,
        shape: (usize, usize),
    },
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalcError::ShapeMismatch { left, right } => write!(
                f,
                "Matrix dimensions do not match: {}x{} and {}x{}",
                left.0, left.1, right.0, right.1
            ),
            CalcError::UnsupportedShape { .. } => {
                write!(f, "Only 2x2 matrix inversion is supported")
            }
            CalcError::SingularMatrix => write!(f, "Matrix is not invertible"),
            CalcError::InvalidDimension(n) => {
                write!(f, "Unsupported dimension {}: expected 1, 2 or 3", n)
            }
            CalcError::UnknownOperation(op) => write!(f, "Unknown operation: {}", op),
            CalcError::CellOutOfBounds {
                operand,
                row,
                col,
                shape,
            } => write!(
                f,
                "Cell ({}, {}) is outside matrix {} of shape {}x{}",
                row, col, operand, shape.0, shape.1
            ),
        }
    }
}

impl Error for CalcError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CalcError>;
