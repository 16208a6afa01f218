use crate::{DeliveryContext, DeliveryInfo};

#[test]
fn test_group_key_with_thread() {
    let info = DeliveryInfo::from_session_key("agent:main:telegram:group:-100123:thread:42");

    assert_eq!(
        info.delivery_context,
        Some(DeliveryContext {
            channel: String::from("telegram"),
            to: String::from("group:-100123"),
        })
    );
    assert_eq!(info.thread_id.as_deref(), Some("42"));
}

#[test]
fn test_direct_key_without_thread() {
    let info = DeliveryInfo::from_session_key("agent:ops:Slack:direct:U123");

    let ctx = info.delivery_context.unwrap();
    assert_eq!(ctx.channel, "slack");
    assert_eq!(ctx.to, "direct:U123");
    assert_eq!(info.thread_id, None);
}

#[test]
fn test_topic_marker_is_treated_as_thread() {
    let info = DeliveryInfo::from_session_key("agent:main:discord:channel:987:topic:abc");

    assert_eq!(info.thread_id.as_deref(), Some("abc"));
    assert_eq!(info.delivery_context.unwrap().to, "channel:987");
}

#[test]
fn test_main_session_key_carries_no_delivery_info() {
    assert_eq!(DeliveryInfo::from_session_key("agent:main:main"), DeliveryInfo::default());
    assert_eq!(DeliveryInfo::from_session_key("main"), DeliveryInfo::default());
    assert_eq!(DeliveryInfo::from_session_key(""), DeliveryInfo::default());
}
