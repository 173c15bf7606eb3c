//! Matrix storage and the pure operations over it.
//!
//! `Matrix` is a small row-major grid with just enough API for the
//! calculator: construction, indexing, and the row/column growth primitives
//! used when operands are resized.
pub mod matrix;
pub mod ops;

pub use matrix::{Matrix, ShapeError};
pub use ops::{add, apply, determinant_2x2, invert, multiply, subtract};
