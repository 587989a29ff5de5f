//! Shutdown Signal
//!
//! Broadcast stop signal with a level-triggered flag. Plain broadcast
//! receivers only see messages sent after they subscribe, so a task spawned
//! while shutdown is already underway would wait forever; the flag lets
//! late subscribers observe the signal too. Loops select on
//! [`subscribe`](Shutdown::subscribe) for prompt wakeup and check
//! [`is_triggered`](Shutdown::is_triggered) once per tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Cloneable, one-way stop signal shared by every arena task.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl Shutdown {
    /// Create an untriggered signal.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe for wakeup when the signal fires.
    ///
    /// Only delivers a trigger that happens after subscription; callers
    /// must pair this with an [`is_triggered`](Shutdown::is_triggered)
    /// check to cover the late-subscriber case.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Idempotent; the flag never resets.
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        // No receivers is fine; the flag alone still stops late starters.
        let _ = self.tx.send(());
    }

    /// Whether the signal has fired.
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_wakes_existing_subscribers() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        shutdown.trigger();
        assert!(rx.recv().await.is_ok());
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_flag_is_visible_to_late_subscribers() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        // A receiver subscribed now would never get the message, but the
        // flag still reports the signal.
        let late = shutdown.clone();
        assert!(late.is_triggered());
    }

    #[tokio::test]
    async fn test_trigger_is_idempotent() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();
        assert!(shutdown.is_triggered());
    }
}
