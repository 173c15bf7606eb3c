//! Replaying a recorded sequence of form events against a `Calculator`.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use matrix_calc::{
    CalcError, Calculator, CalculatorConfig, CalculatorState, Dimension, Matrix, OperandId,
    Operation,
};

/// One user action on the calculator form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    SetDimension(Dimension),
    AddElement,
    RemoveElement,
    EditCell {
        matrix: OperandId,
        row: usize,
        col: usize,
        value: String,
    },
    SetOperation(Operation),
    Execute,
    Reset,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::SetDimension(_) => "SetDimension",
            SessionEvent::AddElement => "AddElement",
            SessionEvent::RemoveElement => "RemoveElement",
            SessionEvent::EditCell { .. } => "EditCell",
            SessionEvent::SetOperation(_) => "SetOperation",
            SessionEvent::Execute => "Execute",
            SessionEvent::Reset => "Reset",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub version: String,
    pub calculator: CalculatorConfig,
    pub events: Vec<SessionEvent>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            version: clap::crate_version!().to_string(),
            calculator: CalculatorConfig::default(),
            events: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// A small example session: multiply two 2x2 matrices.
    pub fn template() -> Self {
        let cell = |matrix: OperandId, row: usize, col: usize, value: &str| SessionEvent::EditCell {
            matrix,
            row,
            col,
            value: value.to_string(),
        };
        SessionConfig {
            events: vec![
                SessionEvent::SetDimension(Dimension::Two),
                cell(OperandId::First, 0, 0, "1"),
                cell(OperandId::First, 0, 1, "2"),
                cell(OperandId::First, 1, 0, "3"),
                cell(OperandId::First, 1, 1, "4"),
                cell(OperandId::Second, 0, 0, "5"),
                cell(OperandId::Second, 0, 1, "6"),
                cell(OperandId::Second, 1, 0, "7"),
                cell(OperandId::Second, 1, 1, "8"),
                SessionEvent::SetOperation(Operation::Multiply),
                SessionEvent::Execute,
            ],
            ..SessionConfig::default()
        }
    }

    /// Read a session file. A missing or invalid `version` or `calculator`
    /// falls back to its default with a warning; `events` must be present and
    /// every event must be valid.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;

        let partial: serde_json::Value = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))?;
        let mut config = SessionConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    match serde_json::from_value(val.clone()) {
                        Ok(parsed) => config.$field = parsed,
                        Err(e) => log::warn!(
                            "Session invalid value for '{}' ({}), using default: {:?}",
                            stringify!($field),
                            e,
                            config.$field
                        ),
                    }
                } else {
                    log::warn!(
                        "Session missing field '{}', using default: {:?}",
                        stringify!($field),
                        config.$field
                    );
                }
            };
        }

        load_or_default!(version);
        load_or_default!(calculator);

        let events = partial
            .get("events")
            .and_then(|v| v.as_array())
            .with_context(|| format!("Session file has no 'events' list: {}", path.display()))?;
        config.events = events
            .iter()
            .enumerate()
            .map(|(idx, event)| {
                serde_json::from_value(event.clone())
                    .with_context(|| format!("Invalid session event #{}: {}", idx, event))
            })
            .collect::<Result<Vec<SessionEvent>>>()?;

        Ok(config)
    }
}

/// What happened at a step worth reporting: every `Execute`, plus any other
/// event the calculator refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub event: &'static str,
    pub operation: Operation,
    pub result: Option<Matrix<f64>>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub steps: Vec<StepReport>,
    pub final_state: CalculatorState,
}

impl SessionReport {
    pub fn error_count(&self) -> usize {
        self.steps.iter().filter(|s| s.error.is_some()).count()
    }
}

/// Apply a single event. Failures are the calculator's reported errors.
pub fn apply_event(calc: &mut Calculator, event: &SessionEvent) -> matrix_calc::Result<()> {
    match event {
        SessionEvent::SetDimension(dimension) => calc.set_dimension(*dimension),
        SessionEvent::AddElement => {
            calc.add_element();
        }
        SessionEvent::RemoveElement => {
            calc.remove_element();
        }
        SessionEvent::EditCell {
            matrix,
            row,
            col,
            value,
        } => {
            calc.edit_cell(*matrix, *row, *col, value)?;
        }
        SessionEvent::SetOperation(op) => calc.set_operation(*op),
        SessionEvent::Execute => {
            calc.execute()?;
        }
        SessionEvent::Reset => calc.reset(),
    }
    Ok(())
}

/// Replay every event in order. A failed event is reported and the session
/// carries on with the next one.
pub fn run_session(config: &SessionConfig) -> SessionReport {
    let mut calc = Calculator::new(config.calculator.clone());
    let mut steps = Vec::new();

    for (step, event) in config.events.iter().enumerate() {
        let outcome: Result<(), CalcError> = apply_event(&mut calc, event);
        match outcome {
            Ok(()) if *event == SessionEvent::Execute => steps.push(StepReport {
                step,
                event: event.name(),
                operation: calc.operation(),
                result: calc.result().cloned(),
                error: None,
            }),
            Ok(()) => {}
            Err(e) => {
                log::warn!("[matcalc::session] step {} ({}) failed: {}", step, event.name(), e);
                steps.push(StepReport {
                    step,
                    event: event.name(),
                    operation: calc.operation(),
                    result: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let report = SessionReport {
        steps,
        final_state: calc.snapshot(),
    };
    log::info!(
        "[matcalc::session] Replayed {} events, {} reported errors",
        config.events.len(),
        report.error_count()
    );
    report
}
