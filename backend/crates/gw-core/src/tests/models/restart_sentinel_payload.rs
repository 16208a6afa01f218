use crate::{
    RestartSentinelPayload, SENTINEL_KIND_UPDATE, UpdateOutcome, UpdateStatus, UpdateStep,
};

const HINT: &str = "Run: gw-server doctor --non-interactive";

fn outcome_with_step() -> UpdateOutcome {
    UpdateOutcome {
        status: UpdateStatus::Ok,
        mode: String::from("git"),
        root: None,
        before: Some(String::from("abc")),
        after: Some(String::from("def")),
        steps: vec![UpdateStep {
            name: String::from("git pull"),
            command: String::from("git pull --ff-only"),
            cwd: String::from("/svc"),
            duration_ms: 80,
            stdout_tail: Some(String::from("Fast-forward")),
            stderr_tail: None,
            exit_code: Some(0),
        }],
        reason: None,
        duration_ms: 200,
    }
}

#[test]
fn test_payload_mirrors_outcome() {
    let outcome = outcome_with_step();

    let payload = RestartSentinelPayload::for_update(
        &outcome,
        "agent:main:telegram:direct:42",
        Some("nightly rollout"),
        HINT,
    );

    assert_eq!(payload.kind, SENTINEL_KIND_UPDATE);
    assert_eq!(payload.status, UpdateStatus::Ok);
    assert!(payload.ts > 0);
    assert_eq!(payload.message.as_deref(), Some("nightly rollout"));
    assert_eq!(payload.doctor_hint, HINT);
    assert_eq!(payload.stats.mode, "git");
    assert_eq!(payload.stats.steps.len(), 1);
    assert_eq!(payload.stats.steps[0].log.stdout_tail.as_deref(), Some("Fast-forward"));
    assert_eq!(payload.stats.steps[0].log.exit_code, Some(0));
    assert_eq!(payload.delivery_context.unwrap().channel, "telegram");
}

#[test]
fn test_payload_json_shape() {
    let payload = RestartSentinelPayload::for_update(&outcome_with_step(), "main", None, HINT);

    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["kind"], "update");
    assert_eq!(json["sessionKey"], "main");
    assert!(json["message"].is_null());
    assert!(json.get("deliveryContext").is_none());
    assert!(json.get("threadId").is_none());
    assert!(json["stats"].get("root").is_none());
    assert!(json["stats"]["reason"].is_null());
    assert!(json["stats"]["steps"][0]["log"]["stderrTail"].is_null());
    assert_eq!(json["stats"]["steps"][0]["durationMs"], 80);
}
