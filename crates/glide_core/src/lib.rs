//! Glide Core
//!
//! This crate provides the foundational types for the Glide slide navigator:
//!
//! - **Index State**: current/previous position with modulo wraparound
//! - **Phase Machine**: explicit `Idle` / `ProgrammaticMove` / `UserScrolling` states
//! - **Configuration**: host attribute parsing with graceful degradation
//! - **Events**: the `ready` / `changed` / `change-started` / `settled` contract
//! - **Input**: host keyboard and pointer events
//!
//! Nothing in this crate knows about time or about the host view. Timing lives
//! in `glide_animation`, the navigator itself in `glide_slider`.
//!
//! # Example
//!
//! ```rust
//! use glide_core::{total_positions, IndexState};
//!
//! let total = total_positions(5, 1);
//! let mut index = IndexState::new(total, 0);
//!
//! let change = index.set_index(-1);
//! assert_eq!((change.previous, change.current), (0, 4));
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod index;
pub mod input;
pub mod slides;

pub use config::{attributes, Axis, SliderConfig, SliderStyle};
pub use error::{ConfigError, Diagnostic, NavigatorError, Result};
pub use events::{event_types, GotoRequest, NavigatorEvent, WidgetId};
pub use fsm::{NavigatorPhase, StateTransitions};
pub use index::{total_positions, IndexChange, IndexState};
pub use input::{Direction, Key, KeyState, KeyboardEvent, PointerEvent};
pub use slides::{SlideCollection, SlideHandle};
