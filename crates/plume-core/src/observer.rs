//! Observer hub for session events.
//!
//! In-process pub/sub with one active subscriber per channel: registering a
//! callback replaces whatever was registered before it. Delivery is
//! synchronous in the emitting thread, with no buffering and no replay for
//! late subscribers. Registration is expected during setup, not concurrently
//! with event delivery.

use crate::engine::LoadProgress;
use crate::error::SessionError;
use crate::session::SessionState;
use std::sync::{Arc, Mutex};

type StatusCallback = Arc<dyn Fn(SessionState) + Send + Sync>;
type ProgressCallback = Arc<dyn Fn(&LoadProgress) + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(&SessionError) + Send + Sync>;

#[derive(Default)]
struct Slots {
    status: Option<StatusCallback>,
    progress: Option<ProgressCallback>,
    error: Option<ErrorCallback>,
}

/// Single-slot event hub for status changes, load progress and errors.
///
/// The hub holds callback slots only; it does not own the lifetime of the
/// interested parties behind them.
#[derive(Default)]
pub struct ObserverHub {
    slots: Mutex<Slots>,
}

impl ObserverHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the status-change callback, replacing any previous one.
    pub fn set_on_status(&self, callback: impl Fn(SessionState) + Send + Sync + 'static) {
        self.slots.lock().unwrap().status = Some(Arc::new(callback));
    }

    /// Registers the load-progress callback, replacing any previous one.
    pub fn set_on_progress(&self, callback: impl Fn(&LoadProgress) + Send + Sync + 'static) {
        self.slots.lock().unwrap().progress = Some(Arc::new(callback));
    }

    /// Registers the error callback, replacing any previous one.
    pub fn set_on_error(&self, callback: impl Fn(&SessionError) + Send + Sync + 'static) {
        self.slots.lock().unwrap().error = Some(Arc::new(callback));
    }

    pub(crate) fn emit_status(&self, state: SessionState) {
        // Clone the slot out so delivery happens outside the lock.
        let callback = self.slots.lock().unwrap().status.clone();
        if let Some(callback) = callback {
            callback(state);
        }
    }

    pub(crate) fn emit_progress(&self, progress: &LoadProgress) {
        let callback = self.slots.lock().unwrap().progress.clone();
        if let Some(callback) = callback {
            callback(progress);
        }
    }

    pub(crate) fn emit_error(&self, error: &SessionError) {
        let callback = self.slots.lock().unwrap().error.clone();
        if let Some(callback) = callback {
            callback(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_without_subscriber_is_noop() {
        let hub = ObserverHub::new();
        hub.emit_status(SessionState::Idle);
        hub.emit_progress(&LoadProgress::new(10, "fetching"));
    }

    #[test]
    fn test_registration_replaces_previous_callback() {
        let hub = ObserverHub::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        hub.set_on_status(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = second.clone();
        hub.set_on_status(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        hub.emit_status(SessionState::Loading);

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_synchronous_delivery_in_emission_order() {
        let hub = ObserverHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        hub.set_on_progress(move |progress| {
            sink.lock().unwrap().push(progress.percent);
        });

        for percent in [0, 40, 100] {
            hub.emit_progress(&LoadProgress::new(percent, "loading"));
        }

        assert_eq!(*seen.lock().unwrap(), vec![0, 40, 100]);
    }
}
