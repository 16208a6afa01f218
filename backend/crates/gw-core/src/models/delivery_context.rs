//! Delivery provenance recovered from a session key.
//!
//! Session keys that route back to a chat surface look like
//! `agent:<agentId>:<channel>:<peerKind>:<peerId>`, optionally followed by
//! `:thread:<id>` or `:topic:<id>`. Anything else carries no delivery
//! information and is passed through untouched.

use serde::{Deserialize, Serialize};

const AGENT_PREFIX: &str = "agent";
const THREAD_MARKERS: [&str; 2] = [":thread:", ":topic:"];

/// Where a reply about this session should be delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryContext {
    pub channel: String,
    pub to: String,
}

/// Delivery context plus thread id, both optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryInfo {
    pub delivery_context: Option<DeliveryContext>,
    pub thread_id: Option<String>,
}

impl DeliveryInfo {
    pub fn from_session_key(session_key: &str) -> Self {
        let (base, thread_id) = split_thread(session_key.trim());

        let parts: Vec<&str> = base.split(':').collect();
        match parts.as_slice() {
            [prefix, agent, channel, kind, peer @ ..]
                if prefix.eq_ignore_ascii_case(AGENT_PREFIX)
                    && !agent.is_empty()
                    && !channel.is_empty()
                    && !kind.is_empty()
                    && !peer.is_empty()
                    && peer.iter().all(|p| !p.is_empty()) =>
            {
                Self {
                    delivery_context: Some(DeliveryContext {
                        channel: channel.to_lowercase(),
                        to: format!("{}:{}", kind, peer.join(":")),
                    }),
                    thread_id,
                }
            }
            _ => Self::default(),
        }
    }
}

/// Split a trailing thread/topic suffix off the key.
fn split_thread(key: &str) -> (&str, Option<String>) {
    let found = THREAD_MARKERS
        .iter()
        .filter_map(|marker| key.rfind(marker).map(|idx| (idx, marker.len())))
        .max_by_key(|(idx, _)| *idx);

    match found {
        Some((idx, marker_len)) => {
            let id = &key[idx + marker_len..];
            if id.is_empty() {
                (key, None)
            } else {
                (&key[..idx], Some(id.to_string()))
            }
        }
        None => (key, None),
    }
}
