//! Integration tests for session loading and replay.

use matrix_calc::{CalculatorConfig, Dimension, GrowthMode, OperandId, Operation};
use matrix_calc_cli::session::{apply_event, run_session, SessionConfig, SessionEvent};

fn edit(matrix: OperandId, row: usize, col: usize, value: &str) -> SessionEvent {
    SessionEvent::EditCell {
        matrix,
        row,
        col,
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

#[test]
fn session_config_default_values() {
    let cfg = SessionConfig::default();
    assert!(cfg.events.is_empty());
    assert_eq!(cfg.calculator, CalculatorConfig::default());
    assert!(!cfg.version.is_empty());
}

#[test]
fn session_events_use_readable_json() {
    let json = serde_json::to_string(&vec![
        SessionEvent::SetDimension(Dimension::Two),
        SessionEvent::AddElement,
        edit(OperandId::Second, 0, 1, "2"),
        SessionEvent::SetOperation(Operation::Inverse),
    ])
    .unwrap();
    assert_eq!(
        json,
        r#"[{"SetDimension":2},"AddElement",{"EditCell":{"matrix":2,"row":0,"col":1,"value":"2"}},{"SetOperation":"Inverse"}]"#
    );
}

#[test]
fn session_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let json = serde_json::to_string_pretty(&SessionConfig::template()).unwrap();
    std::fs::write(&path, json).unwrap();

    let loaded = SessionConfig::from_path(&path).unwrap();
    assert_eq!(loaded.events, SessionConfig::template().events);
}

#[test]
fn session_missing_fields_use_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"events": ["AddElement"], "calculator": 7}"#).unwrap();

    let loaded = SessionConfig::from_path(&path).unwrap();
    assert_eq!(loaded.events, vec![SessionEvent::AddElement]);
    assert_eq!(loaded.calculator, CalculatorConfig::default());
}

#[test]
fn session_with_invalid_event_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(
        &path,
        r#"{"events": [{"SetDimension": 2}, {"EditCell": {"matrix": 1, "row": 0, "col": 0, "value": "5"}}, {"SetDimension": 4}, "Execute"]}"#,
    )
    .unwrap();

    let err = SessionConfig::from_path(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("#2"));
}

#[test]
fn session_with_unknown_operand_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(
        &path,
        r#"{"events": [{"EditCell": {"matrix": 3, "row": 0, "col": 0, "value": "1"}}]}"#,
    )
    .unwrap();
    assert!(SessionConfig::from_path(&path).is_err());
}

#[test]
fn session_without_events_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"version": "0.1.0"}"#).unwrap();
    assert!(SessionConfig::from_path(&path).is_err());
}

#[test]
fn session_invalid_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(SessionConfig::from_path(&path).is_err());
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

#[test]
fn template_session_multiplies() {
    let report = run_session(&SessionConfig::template());
    assert_eq!(report.steps.len(), 1);
    let step = &report.steps[0];
    assert_eq!(step.event, "Execute");
    assert_eq!(step.operation, Operation::Multiply);
    assert_eq!(
        step.result.as_ref().unwrap().to_rows(),
        vec![vec![19.0, 22.0], vec![43.0, 50.0]]
    );
    assert_eq!(report.error_count(), 0);
}

#[test]
fn failures_are_reported_and_replay_continues() {
    let config = SessionConfig {
        events: vec![
            SessionEvent::SetDimension(Dimension::Two),
            edit(OperandId::First, 0, 0, "1"),
            edit(OperandId::First, 0, 1, "2"),
            edit(OperandId::First, 1, 0, "2"),
            edit(OperandId::First, 1, 1, "4"),
            SessionEvent::SetOperation(Operation::Inverse),
            SessionEvent::Execute,
            edit(OperandId::First, 5, 5, "1"),
            SessionEvent::SetOperation(Operation::Add),
            SessionEvent::Execute,
        ],
        ..SessionConfig::default()
    };

    let report = run_session(&config);
    assert_eq!(report.steps.len(), 3);
    assert_eq!(report.steps[0].error.as_deref(), Some("Matrix is not invertible"));
    assert_eq!(report.steps[1].event, "EditCell");
    assert!(report.steps[1].error.is_some());
    assert!(report.steps[2].error.is_none());
    assert_eq!(report.error_count(), 2);
    assert_eq!(
        report.final_state.result.as_ref().unwrap().to_rows(),
        vec![vec![1.0, 2.0], vec![2.0, 4.0]]
    );
}

#[test]
fn calculator_config_is_honoured() {
    let config = SessionConfig {
        calculator: CalculatorConfig::new(None),
        events: vec![
            SessionEvent::SetDimension(Dimension::Three),
            SessionEvent::AddElement,
        ],
        ..SessionConfig::default()
    };
    let report = run_session(&config);
    assert_eq!(report.final_state.growth_mode, None);
    assert_eq!(report.final_state.matrix1.shape(), (3, 3));

    let config = SessionConfig {
        calculator: CalculatorConfig::new(Some(GrowthMode::SquareExpand)),
        ..config
    };
    let report = run_session(&config);
    assert_eq!(report.final_state.matrix1.shape(), (4, 4));
}

#[test]
fn apply_event_resets() {
    let mut calc = matrix_calc::Calculator::default();
    apply_event(&mut calc, &SessionEvent::SetDimension(Dimension::Two)).unwrap();
    apply_event(&mut calc, &SessionEvent::Execute).unwrap();
    assert!(calc.can_clear());
    apply_event(&mut calc, &SessionEvent::Reset).unwrap();
    assert!(!calc.can_clear());
    assert_eq!(calc.dimension(), Dimension::One);
}
