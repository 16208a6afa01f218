use crate::{ControlPlaneActor, RestartAudit};

#[test]
fn test_display_fills_unknown_parts() {
    let actor = ControlPlaneActor::new(Some(String::from("ops")), None, Some(String::from(" ")));

    assert_eq!(actor.to_string(), "actor=ops device=unknown ip=unknown");
}

#[test]
fn test_audit_from_actor_has_no_changed_paths() {
    let actor = ControlPlaneActor::new(
        Some(String::from("ops")),
        Some(String::from("laptop-1")),
        Some(String::from("10.0.0.5")),
    );

    let audit = RestartAudit::from(&actor);

    assert_eq!(audit.actor.as_deref(), Some("ops"));
    assert_eq!(audit.device_id.as_deref(), Some("laptop-1"));
    assert_eq!(audit.client_ip.as_deref(), Some("10.0.0.5"));
    assert!(audit.changed_paths.is_empty());
}
