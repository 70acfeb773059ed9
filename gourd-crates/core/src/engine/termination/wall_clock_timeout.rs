use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::debug;

use super::TerminationCondition;

/// Stops once a wall-clock duration has passed.
///
/// A background thread sleeps for the duration and then raises a flag which the solver polls.
/// Dropping the timeout wakes the thread up and ends it without raising the flag.
#[derive(Debug)]
pub struct WallClockTimeout {
    expired: Arc<AtomicBool>,
    _cancel: mpsc::Sender<()>,
}

impl WallClockTimeout {
    pub fn new(duration: Duration) -> Self {
        let expired = Arc::new(AtomicBool::new(false));
        let (cancel, cancelled) = mpsc::channel::<()>();

        let flag = Arc::clone(&expired);
        let _ = thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = cancelled.recv_timeout(duration) {
                debug!("Wall-clock timeout of {duration:?} expired");
                flag.store(true, Ordering::Relaxed);
            }
        });

        WallClockTimeout {
            expired,
            _cancel: cancel,
        }
    }
}

impl TerminationCondition for WallClockTimeout {
    fn should_stop(&mut self) -> bool {
        self.expired.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn expires_after_the_duration() {
        let mut timeout = WallClockTimeout::new(Duration::from_millis(20));
        let start = Instant::now();
        while !timeout.should_stop() {
            assert!(start.elapsed() < Duration::from_secs(10));
            thread::sleep(Duration::from_millis(1));
        }
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn does_not_expire_early() {
        let mut timeout = WallClockTimeout::new(Duration::from_secs(60));
        assert!(!timeout.should_stop());
    }
}
