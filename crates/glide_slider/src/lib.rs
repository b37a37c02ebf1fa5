//! Glide Slide Navigator
//!
//! Keeps one slide index consistent across three competing drivers:
//!
//! - **Programmatic moves** (buttons, dots, keyboard, cross-widget `goto`)
//! - **Native scrolling** (the user drags or flicks the strip)
//! - **Auto-advance** (a timer that steps forward unless hovered)
//!
//! # Architecture
//!
//! ```text
//! button / dot / key / timer / goto
//!     ↓
//! Navigation driver (target index, scroll command)  ─┐
//!                                                    ├─▶ IndexState ─▶ `changed`
//! native scroll ─▶ Scroll reconciler (inference)  ───┘
//!                                                         ↓
//!                                            dots, navigation list, thumbnails
//! ```
//!
//! The host supplies a [`SlideView`] (geometry and scroll commands) and
//! optional [`IndexBinding`]s for its controls. A [`PageDispatcher`] owns
//! every navigator on a page and routes keyboard and `goto` traffic to them.
//!
//! # Example
//!
//! ```rust,ignore
//! use glide_slider::prelude::*;
//!
//! let clock = DeterministicClock::shared();
//! let mut page = PageDispatcher::new(clock.clone());
//!
//! page.mount("hero", SliderConfig::default().speed(2.0), slides, Some(view));
//! page.subscribe(|event| println!("{event}"));
//!
//! clock.advance_ms(2000);
//! page.tick(); // hero: changed 0 -> 1
//! ```

pub mod controls;
pub mod dispatcher;
pub mod navigator;
pub mod reconciler;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod view;

pub use controls::{IndexBinding, NavControls, ThumbnailStrip};
pub use dispatcher::{EventListener, NavigatorId, PageDispatcher, ThumbnailId};
pub use navigator::{Navigator, MIN_SLIDES, MOVE_QUIET_WINDOW};
pub use reconciler::{infer_index, INFERENCE_DEBOUNCE, SCROLL_SETTLE_QUIET};
pub use view::{ScrollBehavior, ScrollCommand, SlideView};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::controls::{IndexBinding, NavControls, ThumbnailStrip};
    pub use crate::dispatcher::{NavigatorId, PageDispatcher, ThumbnailId};
    pub use crate::navigator::Navigator;
    pub use crate::view::{ScrollBehavior, SlideView};
    pub use glide_animation::{Clock, DeterministicClock, SharedClock};
    pub use glide_core::{
        Axis, GotoRequest, Key, KeyboardEvent, NavigatorEvent, PointerEvent, SlideCollection,
        SlideHandle, SliderConfig, WidgetId,
    };
}
