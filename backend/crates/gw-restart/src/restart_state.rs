use std::time::Instant;

/// Process-wide restart slot: at most one restart can be pending.
#[derive(Debug, Clone, Default)]
pub enum RestartState {
    #[default]
    Idle,
    Pending(PendingRestart),
}

/// The restart currently armed
#[derive(Debug, Clone)]
pub struct PendingRestart {
    pub delay_ms: u64,
    pub reason: String,
    pub armed_at: Instant,
    /// Distinguishes timers so a stale timer never clears a newer slot
    pub generation: u64,
}

impl RestartState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}
