use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

/// Operation applied by [`Calculator::execute`](crate::calculator::Calculator::execute).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    #[default]
    Add,
    Subtract,
    Multiply,
    Inverse,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Inverse,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "Add",
            Operation::Subtract => "Subtract",
            Operation::Multiply => "Multiply",
            Operation::Inverse => "Inverse",
        }
    }

    /// Whether the operation reads the second operand at all.
    pub fn is_binary(&self) -> bool {
        !matches!(self, Operation::Inverse)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "inverse" => Ok(Operation::Inverse),
            _ => Err(CalcError::UnknownOperation(s.to_string())),
        }
    }
}

/// Square size selected for both operands.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "usize", into = "usize")]
pub enum Dimension {
    #[default]
    One,
    Two,
    Three,
}

impl Dimension {
    pub fn size(&self) -> usize {
        match self {
            Dimension::One => 1,
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }
}

impl TryFrom<usize> for Dimension {
    type Error = CalcError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Dimension::One),
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            other => Err(CalcError::InvalidDimension(other)),
        }
    }
}

impl From<Dimension> for usize {
    fn from(value: Dimension) -> Self {
        value.size()
    }
}

impl FromStr for Dimension {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the selector labels too ("2x2").
        let head = s.trim().split('x').next().unwrap_or_default();
        let n: usize = head
            .trim()
            .parse()
            .map_err(|_| CalcError::InvalidDimension(0))?;
        Dimension::try_from(n)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        write!(f, "{}x{}", n, n)
    }
}

/// How "add element" / "remove element" resize the operands.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthMode {
    /// Grow by one single-value row: n x 1 -> (n+1) x 1.
    LinearColumn,
    /// Grow by one row and one column: n x n -> (n+1) x (n+1).
    SquareExpand,
}

impl FromStr for GrowthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(|c: char| c == '-' || c == '_', "").as_str() {
            "linearcolumn" | "linear" => Ok(GrowthMode::LinearColumn),
            "squareexpand" | "square" => Ok(GrowthMode::SquareExpand),
            _ => Err(format!(
                "Unknown growth mode: {}. Expected `linear-column` or `square-expand`",
                s
            )),
        }
    }
}

/// Calculator settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Growth mode used once the 3x3 dimension is selected. `None` disables
    /// add/remove element at that size.
    pub three_by_three_growth: Option<GrowthMode>,
}

impl CalculatorConfig {
    pub fn new(three_by_three_growth: Option<GrowthMode>) -> Self {
        Self {
            three_by_three_growth,
        }
    }

    /// Growth mode that goes with a freshly selected dimension.
    pub fn growth_for(&self, dimension: Dimension) -> Option<GrowthMode> {
        match dimension {
            Dimension::One => Some(GrowthMode::LinearColumn),
            Dimension::Two => Some(GrowthMode::SquareExpand),
            Dimension::Three => self.three_by_three_growth,
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            three_by_three_growth: Some(GrowthMode::SquareExpand),
        }
    }
}
