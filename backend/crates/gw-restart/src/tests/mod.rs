
use crate::{RestartSignal, Result as RestartErrorResult};

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts raised signals instead of signalling the test process
#[derive(Default)]
pub(crate) struct RecordingSignal {
    raised: AtomicUsize,
}

impl RecordingSignal {
    pub(crate) fn count(&self) -> usize {
        self.raised.load(Ordering::SeqCst)
    }
}

impl RestartSignal for RecordingSignal {
    fn raise(&self) -> RestartErrorResult<()> {
        self.raised.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
