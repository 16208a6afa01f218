use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "unknown";

/// Identity attributed to a control-plane request, used for audit logging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneActor {
    pub actor: Option<String>,
    pub device_id: Option<String>,
    pub client_ip: Option<String>,
}

impl ControlPlaneActor {
    pub fn new(
        actor: Option<String>,
        device_id: Option<String>,
        client_ip: Option<String>,
    ) -> Self {
        Self {
            actor: non_blank(actor),
            device_id: non_blank(device_id),
            client_ip: non_blank(client_ip),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `actor=<a> device=<d> ip=<i>`, with `unknown` for missing parts.
impl std::fmt::Display for ControlPlaneActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "actor={} device={} ip={}",
            self.actor.as_deref().unwrap_or(UNKNOWN),
            self.device_id.as_deref().unwrap_or(UNKNOWN),
            self.client_ip.as_deref().unwrap_or(UNKNOWN),
        )
    }
}
