use crate::UpdateRunRequest;

fn request_with_timeout(timeout_ms: Option<f64>) -> UpdateRunRequest {
    UpdateRunRequest {
        session_key: String::from("agent:main:main"),
        timeout_ms,
        ..Default::default()
    }
}

#[test]
fn test_timeout_is_floored() {
    assert_eq!(
        request_with_timeout(Some(2500.9)).effective_timeout_ms(),
        Some(2500)
    );
}

#[test]
fn test_timeout_has_one_second_minimum() {
    assert_eq!(request_with_timeout(Some(10.0)).effective_timeout_ms(), Some(1000));
    assert_eq!(request_with_timeout(Some(-5.0)).effective_timeout_ms(), Some(1000));
}

#[test]
fn test_non_finite_or_missing_timeout_is_unset() {
    assert_eq!(request_with_timeout(None).effective_timeout_ms(), None);
    assert_eq!(request_with_timeout(Some(f64::NAN)).effective_timeout_ms(), None);
    assert_eq!(
        request_with_timeout(Some(f64::INFINITY)).effective_timeout_ms(),
        None
    );
}

#[test]
fn test_request_deserializes_from_camel_case() {
    let request: UpdateRunRequest = serde_json::from_str(
        r#"{"sessionKey":"agent:main:main","note":"ship it","restartDelayMs":500}"#,
    )
    .unwrap();

    assert_eq!(request.session_key, "agent:main:main");
    assert_eq!(request.note.as_deref(), Some("ship it"));
    assert_eq!(request.restart_delay_ms, Some(500));
    assert_eq!(request.timeout_ms, None);
}
