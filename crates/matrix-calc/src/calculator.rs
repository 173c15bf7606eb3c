//! Calculator state: two operand grids kept at identical shape, the
//! dimension / operation selectors, and the last result or reported error.
//!
//! Every method runs synchronously to completion. Failures from the matrix
//! operations never escape as panics; they are returned to the caller and
//! also kept in [`Calculator::last_error`] so a front end can show them.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{CalculatorConfig, Dimension, GrowthMode, Operation};
use crate::error::{CalcError, Result};
use crate::input::parse_cell;
use crate::math::{ops, Matrix};

/// Selects one of the two operand grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum OperandId {
    First,
    Second,
}

impl TryFrom<usize> for OperandId {
    type Error = String;

    fn try_from(value: usize) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(OperandId::First),
            2 => Ok(OperandId::Second),
            other => Err(format!("Unknown matrix {}: expected 1 or 2", other)),
        }
    }
}

impl From<OperandId> for usize {
    fn from(value: OperandId) -> Self {
        match value {
            OperandId::First => 1,
            OperandId::Second => 2,
        }
    }
}

impl fmt::Display for OperandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", usize::from(*self))
    }
}

/// Everything a front end needs to redraw the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub dimension: Dimension,
    pub growth_mode: Option<GrowthMode>,
    pub operation: Operation,
    pub matrix1: Matrix<f64>,
    pub matrix2: Matrix<f64>,
    pub shows_second_operand: bool,
    pub result: Option<Matrix<f64>>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalculatorConfig,
    dimension: Dimension,
    growth: Option<GrowthMode>,
    operation: Operation,
    matrix1: Matrix<f64>,
    matrix2: Matrix<f64>,
    result: Option<Matrix<f64>>,
    last_error: Option<CalcError>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

impl Calculator {
    /// A calculator in its reset state: 1x1 zero operands, `Add`, no result.
    pub fn new(config: CalculatorConfig) -> Self {
        let dimension = Dimension::One;
        Self {
            growth: config.growth_for(dimension),
            config,
            dimension,
            operation: Operation::Add,
            matrix1: Matrix::zeros(1, 1),
            matrix2: Matrix::zeros(1, 1),
            result: None,
            last_error: None,
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn growth_mode(&self) -> Option<GrowthMode> {
        self.growth
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn matrix1(&self) -> &Matrix<f64> {
        &self.matrix1
    }

    pub fn matrix2(&self) -> &Matrix<f64> {
        &self.matrix2
    }

    pub fn operand(&self, id: OperandId) -> &Matrix<f64> {
        match id {
            OperandId::First => &self.matrix1,
            OperandId::Second => &self.matrix2,
        }
    }

    pub fn result(&self) -> Option<&Matrix<f64>> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// The second grid is hidden while `Inverse` is selected.
    pub fn shows_second_operand(&self) -> bool {
        self.operation.is_binary()
    }

    /// The clear action is only offered once there is a result to clear.
    pub fn can_clear(&self) -> bool {
        self.result.is_some()
    }

    fn operands_mut(&mut self) -> [&mut Matrix<f64>; 2] {
        [&mut self.matrix1, &mut self.matrix2]
    }

    /// Select a new square size. Both operands are replaced by zero grids of
    /// that size; entered values are not carried over.
    pub fn set_dimension(&mut self, dimension: Dimension) {
        let n = dimension.size();
        self.dimension = dimension;
        self.growth = self.config.growth_for(dimension);
        self.matrix1 = Matrix::zeros(n, n);
        self.matrix2 = Matrix::zeros(n, n);
        self.result = None;
        self.last_error = None;
        log::debug!(
            "Dimension set to {} (growth mode {:?})",
            dimension,
            self.growth
        );
    }

    /// Grow both operands by one step of the current growth mode.
    ///
    /// Returns `false` when growth is disabled for the current dimension.
    pub fn add_element(&mut self) -> bool {
        match self.growth {
            Some(GrowthMode::LinearColumn) => {
                for m in self.operands_mut() {
                    m.push_row();
                }
            }
            Some(GrowthMode::SquareExpand) => {
                for m in self.operands_mut() {
                    m.push_column();
                    m.push_row();
                }
            }
            None => {
                log::debug!("Add element ignored: growth disabled at {}", self.dimension);
                return false;
            }
        }
        log::debug!("Operands grown to {:?}", self.matrix1.shape());
        true
    }

    /// Undo one growth step. Operands never shrink below a single row
    /// (linear) or a single row and column (square).
    ///
    /// Returns `false` when nothing was removed.
    pub fn remove_element(&mut self) -> bool {
        let removed = match self.growth {
            Some(GrowthMode::LinearColumn) => {
                if self.matrix1.nrows() > 1 && self.matrix2.nrows() > 1 {
                    for m in self.operands_mut() {
                        m.pop_row();
                    }
                    true
                } else {
                    false
                }
            }
            Some(GrowthMode::SquareExpand) => {
                let shrinkable = |m: &Matrix<f64>| m.nrows() > 1 && m.ncols() > 1;
                if shrinkable(&self.matrix1) && shrinkable(&self.matrix2) {
                    for m in self.operands_mut() {
                        m.pop_row();
                        m.pop_column();
                    }
                    true
                } else {
                    false
                }
            }
            None => false,
        };
        if removed {
            log::debug!("Operands shrunk to {:?}", self.matrix1.shape());
        }
        removed
    }

    /// Store the number typed into a cell. Text that is not a number is
    /// stored as `0.0`. Returns the stored value.
    pub fn edit_cell(
        &mut self,
        operand: OperandId,
        row: usize,
        col: usize,
        raw: &str,
    ) -> Result<f64> {
        let value = parse_cell(raw);
        let target = match operand {
            OperandId::First => &mut self.matrix1,
            OperandId::Second => &mut self.matrix2,
        };
        let shape = target.shape();
        match target.get_mut(row, col) {
            Some(cell) => {
                *cell = value;
                Ok(value)
            }
            None => {
                let err = CalcError::CellOutOfBounds {
                    operand,
                    row,
                    col,
                    shape,
                };
                log::warn!("{}", err);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = operation;
    }

    /// Run the selected operation on the operands.
    ///
    /// On success the result replaces the previous one. On failure the error
    /// is recorded as [`last_error`](Self::last_error) and the operands and
    /// previous result are left as they were.
    pub fn execute(&mut self) -> Result<&Matrix<f64>> {
        let outcome = match self.operation {
            Operation::Inverse if self.matrix1.shape() != (2, 2) => {
                Err(CalcError::UnsupportedShape {
                    shape: self.matrix1.shape(),
                })
            }
            op => ops::apply(op, &self.matrix1, &self.matrix2),
        };

        match outcome {
            Ok(result) => {
                log::debug!("{} produced a {:?} result", self.operation, result.shape());
                self.last_error = None;
                Ok(&*self.result.insert(result))
            }
            Err(err) => {
                log::warn!("{} failed: {}", self.operation, err);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Back to the start-up state: 1x1 zero operands, `Add`, no result.
    pub fn reset(&mut self) {
        self.result = None;
        self.last_error = None;
        self.operation = Operation::Add;
        self.dimension = Dimension::One;
        self.growth = self.config.growth_for(Dimension::One);
        self.matrix1 = Matrix::zeros(1, 1);
        self.matrix2 = Matrix::zeros(1, 1);
        log::debug!("Calculator reset");
    }

    /// The form's clear action, which performs a full [`reset`](Self::reset).
    pub fn clear(&mut self) {
        self.reset();
    }

    pub fn snapshot(&self) -> CalculatorState {
        CalculatorState {
            dimension: self.dimension,
            growth_mode: self.growth,
            operation: self.operation,
            matrix1: self.matrix1.clone(),
            matrix2: self.matrix2.clone(),
            shows_second_operand: self.shows_second_operand(),
            result: self.result.clone(),
            error: self.last_error.as_ref().map(ToString::to_string),
        }
    }
}
