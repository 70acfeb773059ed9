use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::TerminationCondition;

/// A flag through which any thread can ask a running solver to stop.
///
/// The solver consumes the request when it stops, so a handle can be used for more than one
/// query.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn request_stop(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }

    pub(crate) fn clear(&self) {
        self.requested.store(false, Ordering::Relaxed);
    }
}

impl TerminationCondition for StopHandle {
    fn should_stop(&mut self) -> bool {
        self.is_stop_requested()
    }
}
