//! Glide Timing System
//!
//! Host-driven time for single-threaded widgets.
//!
//! # Features
//!
//! - **Clocks**: a `Clock` trait and a host-advanced deterministic clock
//! - **Timers**: cancellable, reschedulable one-shot timers fired in deadline order
//! - **Debouncing**: delay an invocation until its input quiesces
//!
//! Nothing here spawns threads or blocks. The host (a browser event loop, a
//! test, the CLI) advances time and asks for due work.

pub mod clock;
pub mod debounce;
pub mod scheduler;

pub use clock::{Clock, DeterministicClock, SharedClock};
pub use debounce::Debouncer;
pub use scheduler::{TimerId, TimerScheduler};
