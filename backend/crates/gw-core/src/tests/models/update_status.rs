use crate::UpdateStatus;

use std::str::FromStr;

#[test]
fn test_update_status_as_str() {
    assert_eq!(UpdateStatus::Ok.as_str(), "ok");
    assert_eq!(UpdateStatus::Error.as_str(), "error");
    assert_eq!(UpdateStatus::Unknown.as_str(), "unknown");
}

#[test]
fn test_update_status_from_str() {
    assert_eq!(UpdateStatus::from_str("ok").unwrap(), UpdateStatus::Ok);
    assert_eq!(UpdateStatus::from_str("error").unwrap(), UpdateStatus::Error);
    assert!(UpdateStatus::from_str("skipped").is_err());
}

#[test]
fn test_only_ok_allows_restart() {
    assert!(UpdateStatus::Ok.allows_restart());
    assert!(!UpdateStatus::Error.allows_restart());
    assert!(!UpdateStatus::Unknown.allows_restart());
}

#[test]
fn test_update_status_serializes_lowercase() {
    let json = serde_json::to_string(&UpdateStatus::Unknown).unwrap();
    assert_eq!(json, "\"unknown\"");
}
