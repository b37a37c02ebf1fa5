//! Monotonic clocks

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Monotonic time source
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

/// Clock shared between a dispatcher and its navigators
pub type SharedClock = Arc<dyn Clock>;

/// Deterministic monotonic clock controlled by the host
///
/// Cheap to share: wrap in an `Arc` and keep a handle to advance it.
#[derive(Debug, Default)]
pub struct DeterministicClock {
    nanos: AtomicU64,
}

impl DeterministicClock {
    /// Create a clock starting at `0`
    pub const fn new() -> Self {
        Self {
            nanos: AtomicU64::new(0),
        }
    }

    /// Create a shared clock starting at `0`
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Set current monotonic time
    pub fn set(&self, now: Duration) {
        self.nanos.store(to_nanos(now), Ordering::Relaxed);
    }

    /// Advance monotonic time by `dt`
    pub fn advance(&self, dt: Duration) {
        let dt = to_nanos(dt);
        // fetch_update never fails when the closure always returns Some
        let _ = self
            .nanos
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |now| {
                Some(now.saturating_add(dt))
            });
    }

    /// Advance by `ms` milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for DeterministicClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}

fn to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
