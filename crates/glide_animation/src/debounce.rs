//! Debouncing
//!
//! A [`Debouncer`] delays an invocation until its input has been quiet for
//! `wait`. Every call pushes the deadline back.
//!
//! - **Trailing** (default): the latest value is released once the input
//!   quiesces, via [`Debouncer::poll`].
//! - **Leading**: the first call of a burst is released immediately and the
//!   rest of the burst is swallowed.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use glide_animation::Debouncer;
//!
//! let mut debounce = Debouncer::new(Duration::from_millis(100));
//! let ms = Duration::from_millis;
//!
//! assert_eq!(debounce.call(ms(0), 1), None);
//! assert_eq!(debounce.call(ms(60), 2), None);
//! assert_eq!(debounce.poll(ms(120)), None); // pushed back to 160ms
//! assert_eq!(debounce.poll(ms(160)), Some(2));
//! ```

use std::time::Duration;

/// Delays a value until calls stop arriving for `wait`
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    leading: bool,
    deadline: Option<Duration>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    /// Trailing-edge debouncer
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            leading: false,
            deadline: None,
            pending: None,
        }
    }

    /// Leading-edge debouncer
    pub fn leading(wait: Duration) -> Self {
        Self {
            leading: true,
            ..Self::new(wait)
        }
    }

    /// Quiet period
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Record an invocation at `now`
    ///
    /// Returns the value when it should run right away (leading edge of a
    /// burst); otherwise the value is held until [`poll`](Self::poll).
    pub fn call(&mut self, now: Duration, value: T) -> Option<T> {
        let idle = self.deadline.is_none();
        self.deadline = Some(now + self.wait);

        if self.leading {
            return idle.then_some(value);
        }
        self.pending = Some(value);
        None
    }

    /// Release the held value once the quiet period has passed
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Release the held value immediately
    pub fn flush(&mut self) -> Option<T> {
        self.deadline = None;
        self.pending.take()
    }

    /// Drop the held value and end the burst
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }

    /// When the current burst ends, if one is in progress
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// True while a burst is in progress
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_trailing_releases_latest_value() {
        let mut debounce = Debouncer::new(ms(100));
        for (t, v) in [(0, 'a'), (30, 'b'), (90, 'c')] {
            assert_eq!(debounce.call(ms(t), v), None);
        }
        assert_eq!(debounce.deadline(), Some(ms(190)));
        assert_eq!(debounce.poll(ms(189)), None);
        assert_eq!(debounce.poll(ms(190)), Some('c'));
        assert!(!debounce.is_pending());
        assert_eq!(debounce.poll(ms(500)), None);
    }

    #[test]
    fn test_leading_fires_once_per_burst() {
        let mut debounce = Debouncer::leading(ms(100));
        assert_eq!(debounce.call(ms(0), 1), Some(1));
        assert_eq!(debounce.call(ms(50), 2), None);
        assert_eq!(debounce.call(ms(120), 3), None);
        // burst ends at 220ms, nothing trails
        assert_eq!(debounce.poll(ms(220)), None);
        assert_eq!(debounce.call(ms(300), 4), Some(4));
    }

    #[test]
    fn test_flush_and_cancel() {
        let mut debounce = Debouncer::new(ms(100));
        debounce.call(ms(0), "offset");
        assert_eq!(debounce.flush(), Some("offset"));
        assert!(!debounce.is_pending());

        debounce.call(ms(10), "offset");
        debounce.cancel();
        assert_eq!(debounce.poll(ms(1000)), None);
    }
}
