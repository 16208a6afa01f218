use crate::UpdateChannel;

#[test]
fn test_normalize_accepts_known_channels_case_insensitively() {
    assert_eq!(
        UpdateChannel::normalize(Some(" Beta ")),
        Some(UpdateChannel::Beta)
    );
    assert_eq!(
        UpdateChannel::normalize(Some("stable")),
        Some(UpdateChannel::Stable)
    );
    assert_eq!(UpdateChannel::normalize(Some("DEV")), Some(UpdateChannel::Dev));
}

#[test]
fn test_normalize_treats_blank_and_unknown_as_unset() {
    assert_eq!(UpdateChannel::normalize(None), None);
    assert_eq!(UpdateChannel::normalize(Some("   ")), None);
    assert_eq!(UpdateChannel::normalize(Some("nightly")), None);
}
