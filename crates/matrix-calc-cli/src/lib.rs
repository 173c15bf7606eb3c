//! Command-line front end for `matrix-calc`.
//!
//! Plays the part of the calculator form: it feeds events into a
//! [`matrix_calc::Calculator`] and prints the operands, result or reported
//! error.
pub mod grid;
pub mod session;
