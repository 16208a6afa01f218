use crate::{MODE_UNKNOWN, UpdateOutcome, UpdateStatus, UpdateStep};

use googletest::assert_that;
use googletest::prelude::{eq, none, some};

fn ok_outcome() -> UpdateOutcome {
    UpdateOutcome {
        status: UpdateStatus::Ok,
        mode: String::from("git"),
        root: Some(String::from("/svc")),
        before: Some(String::from("1.2.0")),
        after: Some(String::from("1.3.0")),
        steps: vec![UpdateStep {
            name: String::from("pull"),
            command: String::from("git pull --ff-only"),
            cwd: String::from("/svc"),
            duration_ms: 120,
            stdout_tail: None,
            stderr_tail: None,
            exit_code: Some(0),
        }],
        reason: None,
        duration_ms: 300,
    }
}

#[test]
fn given_error_when_synthesized_then_canonical_error_shape() {
    let outcome = UpdateOutcome::synthetic_error("network unreachable");

    assert_that!(outcome.status, eq(UpdateStatus::Error));
    assert_that!(outcome.mode.as_str(), eq(MODE_UNKNOWN));
    assert_that!(outcome.reason, some(eq("network unreachable")));
    assert!(outcome.steps.is_empty());
    assert_that!(outcome.duration_ms, eq(0));
    assert_that!(outcome.root, none());
}

#[test]
fn given_runner_err_when_mapped_then_synthetic_error() {
    let result: Result<UpdateOutcome, String> = Err(String::from("spawn failed"));

    let outcome = UpdateOutcome::from_runner_result(result);

    assert!(outcome.is_error());
    assert_that!(outcome.reason, some(eq("spawn failed")));
}

#[test]
fn given_runner_ok_when_mapped_then_outcome_unchanged() {
    let result: Result<UpdateOutcome, String> = Ok(ok_outcome());

    let outcome = UpdateOutcome::from_runner_result(result);

    assert_that!(outcome, eq(&ok_outcome()));
}

#[test]
fn given_outcome_when_serialized_then_camel_case_and_null_markers() {
    let mut outcome = ok_outcome();
    outcome.before = None;

    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["durationMs"], 300);
    assert!(json["before"].is_null());
    assert_eq!(json["steps"][0]["durationMs"], 120);
    assert_eq!(json["steps"][0]["exitCode"], 0);
    assert!(json.get("reason").is_none());
}
