//! matrix-calc: the engine behind a small square-matrix calculator.
//!
//! The crate has two layers. [`math`] holds a row-major [`Matrix`] type and
//! pure add / subtract / multiply / 2x2-inverse operations that validate
//! operand shapes themselves. [`calculator`] holds the stateful
//! [`Calculator`], which keeps two operands at the same shape while the user
//! changes the dimension or adds and removes elements, and reports every
//! operation failure through one error channel.
//!
//! Rendering is left to the caller: it feeds events in and reads the
//! operands, result and last error back out.
pub mod calculator;
pub mod config;
pub mod error;
pub mod input;
pub mod math;

pub use calculator::{Calculator, CalculatorState, OperandId};
pub use config::{CalculatorConfig, Dimension, GrowthMode, Operation};
pub use error::{CalcError, Result};
pub use math::{Matrix, ShapeError};
