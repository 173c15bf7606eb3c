//! Text helpers for the command line: reading inline grids and printing
//! calculator state.
use std::fmt::{self, Write};

use anyhow::{bail, Context, Result};

use matrix_calc::{CalculatorState, Matrix};

/// Largest operand side the calculator offers.
pub const MAX_SIDE: usize = 3;

/// Parse an inline grid such as `"1,2;3,4"`: rows separated by `;`, values
/// by `,`.
pub fn parse_grid(text: &str) -> Result<Matrix<f64>> {
    let rows = text
        .split(';')
        .map(|row| {
            row.split(',')
                .map(|value| {
                    value
                        .trim()
                        .parse::<f64>()
                        .with_context(|| format!("Not a number: {:?}", value.trim()))
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    let matrix = Matrix::from_rows(rows).with_context(|| format!("Invalid grid: {:?}", text))?;
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 || rows > MAX_SIDE || cols > MAX_SIDE {
        bail!(
            "Grid {:?} is {}x{}; matrices from 1x1 up to {}x{} are supported",
            text,
            rows,
            cols,
            MAX_SIDE,
            MAX_SIDE
        );
    }
    Ok(matrix)
}

/// Write the calculator state the way the form lays it out: operands first,
/// then the result or the reported error.
pub fn write_state<W: Write>(out: &mut W, state: &CalculatorState) -> fmt::Result {
    writeln!(out, "Dimension: {}", state.dimension)?;
    writeln!(out, "Operation: {}", state.operation)?;
    writeln!(out, "Matrix 1:\n{}", state.matrix1)?;
    if state.shows_second_operand {
        writeln!(out, "Matrix 2:\n{}", state.matrix2)?;
    }
    if let Some(result) = &state.result {
        writeln!(out, "Result:\n{}", result)?;
    }
    if let Some(error) = &state.error {
        writeln!(out, "Error: {}", error)?;
    }
    Ok(())
}

pub fn render_state(state: &CalculatorState) -> Result<String> {
    let mut out = String::new();
    write_state(&mut out, state)?;
    Ok(out)
}
