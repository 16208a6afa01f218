//! Coalescing self-restart scheduler.
//!
//! State machine: `Idle -> Pending (first schedule) -> Idle (timer fires)`.
//! Scheduling while `Pending` arms nothing and leaves the pending delay
//! untouched; the caller only learns that it was coalesced.

use crate::{PendingRestart, RestartSignal, RestartState};

use gw_core::{RestartScheduleRequest, RestartScheduleResult};

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{error, info};

pub struct RestartScheduler {
    state: Mutex<SchedulerSlot>,
    default_delay_ms: u64,
    max_delay_ms: u64,
    signal: Arc<dyn RestartSignal>,
}

#[derive(Default)]
struct SchedulerSlot {
    state: RestartState,
    next_generation: u64,
}

impl RestartScheduler {
    pub fn new(default_delay_ms: u64, max_delay_ms: u64, signal: Arc<dyn RestartSignal>) -> Self {
        Self {
            state: Mutex::new(SchedulerSlot::default()),
            default_delay_ms: default_delay_ms.min(max_delay_ms),
            max_delay_ms,
            signal,
        }
    }

    /// Request a restart after a delay.
    ///
    /// Arms a one-shot timer when idle. When a restart is already pending the
    /// request is merged into it and the pending delay is reported back.
    pub fn schedule(self: &Arc<Self>, request: RestartScheduleRequest) -> RestartScheduleResult {
        let mut slot = self.lock_slot();

        if let RestartState::Pending(pending) = &slot.state {
            return RestartScheduleResult {
                coalesced: true,
                delay_ms: pending.delay_ms,
            };
        }

        let delay_ms = request
            .delay_ms
            .unwrap_or(self.default_delay_ms)
            .min(self.max_delay_ms);

        let generation = slot.next_generation;
        slot.next_generation += 1;
        slot.state = RestartState::Pending(PendingRestart {
            delay_ms,
            reason: request.reason.clone(),
            armed_at: Instant::now(),
            generation,
        });
        drop(slot);

        let audit = &request.audit;
        info!(
            "restart scheduled reason={} actor={} device={} ip={} changedPaths={} delayMs={}",
            request.reason,
            audit.actor.as_deref().unwrap_or("unknown"),
            audit.device_id.as_deref().unwrap_or("unknown"),
            audit.client_ip.as_deref().unwrap_or("unknown"),
            audit.changed_paths.len(),
            delay_ms
        );

        self.arm_timer(generation, delay_ms);

        RestartScheduleResult {
            coalesced: false,
            delay_ms,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock_slot().state.is_pending()
    }

    /// Delay of the pending restart, if one is armed
    pub fn pending_delay_ms(&self) -> Option<u64> {
        match &self.lock_slot().state {
            RestartState::Pending(pending) => Some(pending.delay_ms),
            RestartState::Idle => None,
        }
    }

    pub fn default_delay_ms(&self) -> u64 {
        self.default_delay_ms
    }

    fn arm_timer(self: &Arc<Self>, generation: u64, delay_ms: u64) {
        let scheduler = Arc::clone(self);
        let delay = Duration::from_millis(delay_ms);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    scheduler.fire(generation);
                });
            }
            Err(_) => {
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    scheduler.fire(generation);
                });
            }
        }
    }

    fn fire(&self, generation: u64) {
        let mut slot = self.lock_slot();
        let pending = match &slot.state {
            RestartState::Pending(pending) if pending.generation == generation => pending.clone(),
            _ => return,
        };
        slot.state = RestartState::Idle;
        drop(slot);

        info!(
            "restart timer fired reason={} after {}ms",
            pending.reason,
            pending.armed_at.elapsed().as_millis()
        );

        if let Err(e) = self.signal.raise() {
            error!("restart signal failed reason={}: {}", pending.reason, e);
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, SchedulerSlot> {
        // The slot holds plain data, so a poisoned lock is still consistent
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for RestartScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestartScheduler")
            .field("default_delay_ms", &self.default_delay_ms)
            .field("max_delay_ms", &self.max_delay_ms)
            .field("pending", &self.is_pending())
            .finish()
    }
}
