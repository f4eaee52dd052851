use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A raw window read: how many requests landed since the window opened, and
/// how long the window was open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSample {
    pub count: u64,
    pub elapsed: Duration,
}

#[derive(Debug)]
struct Window {
    count: u64,
    started_at: Instant,
}

/// Shared windowed request counter.
///
/// Cloning yields another handle to the same window; hand one clone to the
/// request path and one to the sampler. Both mutations go through a single
/// lock, so an increment lands entirely before or entirely after a
/// `sample_and_reset`; counts are never lost or split across windows.
#[derive(Debug, Clone)]
pub struct RequestCounter {
    window: Arc<Mutex<Window>>,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self {
            window: Arc::new(Mutex::new(Window {
                count: 0,
                started_at: Instant::now(),
            })),
        }
    }

    /// Record one inbound request. Safe to call from any number of
    /// concurrent request contexts.
    pub fn increment(&self) {
        self.lock().count += 1;
    }

    /// Read the current window and open a fresh one, as a single step.
    pub fn sample_and_reset(&self) -> WindowSample {
        let mut window = self.lock();
        let now = Instant::now();
        let sample = WindowSample {
            count: window.count,
            elapsed: now.duration_since(window.started_at),
        };
        window.count = 0;
        window.started_at = now;
        sample
    }

    fn lock(&self) -> MutexGuard<'_, Window> {
        // A panic while holding the lock leaves the window intact, so a
        // poisoned guard is still usable.
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RequestCounter {
    fn default() -> Self {
        Self::new()
    }
}
