use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Cancelable one-shot timers keyed by caller-chosen ids.
///
/// The deadline is fixed when `schedule` is called, so a paused test clock
/// can be advanced without racing task startup.
#[derive(Debug, Clone)]
pub struct Scheduler {
    runtime: Handle,
    timers: Arc<Mutex<HashMap<u64, CancellationToken>>>,
}

impl Scheduler {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Runs `on_fire` after `delay`. Scheduling an id that is already armed
    /// replaces the earlier timer.
    pub fn schedule<F>(&self, id: u64, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let deadline = Instant::now() + delay;
        let token = CancellationToken::new();
        if let Some(previous) = self.lock().insert(id, token.clone()) {
            previous.cancel();
        }

        let timers = self.timers.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = sleep_until(deadline) => {
                    let still_armed = {
                        let mut timers = timers.lock().unwrap_or_else(|p| p.into_inner());
                        match timers.get(&id) {
                            Some(current) if !current.is_cancelled() => {
                                timers.remove(&id);
                                true
                            }
                            _ => false,
                        }
                    };
                    if still_armed {
                        on_fire();
                    }
                }
            }
        });
    }

    /// Returns `false` if the timer already fired or never existed.
    pub fn cancel(&self, id: u64) -> bool {
        match self.lock().remove(&id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    fn armed(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, CancellationToken>> {
        self.timers.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let scheduler = Scheduler::new(Handle::current());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();

        scheduler.schedule(1, Duration::from_secs(2), move || {
            let _ = tx.send(1u64);
        });

        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(start.elapsed(), Duration::from_secs(2));
        assert_eq!(scheduler.armed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let scheduler = Scheduler::new(Handle::current());
        let (tx, mut rx) = mpsc::unbounded_channel();

        scheduler.schedule(7, Duration::from_secs(3), move || {
            let _ = tx.send(7u64);
        });
        assert!(scheduler.cancel(7));
        assert!(!scheduler.cancel(7));

        // Sender is dropped with the cancelled task, so the channel closes.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_previous_timer() {
        let scheduler = Scheduler::new(Handle::current());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let first = tx.clone();

        scheduler.schedule(3, Duration::from_secs(1), move || {
            let _ = first.send("first");
        });
        scheduler.schedule(3, Duration::from_secs(5), move || {
            let _ = tx.send("second");
        });

        assert_eq!(rx.recv().await, Some("second"));
        assert_eq!(rx.recv().await, None);
    }
}
