use crate::ControlPlaneActor;

use serde::{Deserialize, Serialize};

/// Audit trail attached to a restart request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartAudit {
    pub actor: Option<String>,
    pub device_id: Option<String>,
    pub client_ip: Option<String>,
    /// Always empty for update restarts
    pub changed_paths: Vec<String>,
}

impl From<&ControlPlaneActor> for RestartAudit {
    fn from(actor: &ControlPlaneActor) -> Self {
        Self {
            actor: actor.actor.clone(),
            device_id: actor.device_id.clone(),
            client_ip: actor.client_ip.clone(),
            changed_paths: Vec::new(),
        }
    }
}
