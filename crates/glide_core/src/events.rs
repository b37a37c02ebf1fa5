//! Navigator events
//!
//! [`NavigatorEvent`] is the single observable output of a navigator. Every
//! index update, whether it came from a button, a timer, another widget or a
//! native scroll, ends in the same `Changed` event.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::slides::SlideHandle;

/// Phase machine event types
pub mod event_types {
    /// A programmatic move issued a scroll command
    pub const MOVE_START: u32 = 1;
    /// The view reported scroll movement
    pub const SCROLL: u32 = 2;
    /// The host reported a native scroll-settle signal
    pub const SCROLL_END: u32 = 3;
    /// No scroll movement for the fallback quiet period
    pub const QUIET_ELAPSED: u32 = 4;
}

/// Host identifier of a slider widget
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Create from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for WidgetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Events emitted by a navigator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NavigatorEvent {
    /// Initialization finished
    Ready {
        /// Emitting widget
        source: WidgetId,
    },

    /// The current index changed
    #[serde(rename_all = "camelCase")]
    Changed {
        /// Emitting widget
        source: WidgetId,
        /// Index before the change
        previous_index: usize,
        /// Index after the change
        current_index: usize,
        /// Slide at the new index
        current_slide: Option<SlideHandle>,
    },

    /// Motion started (first scroll movement or programmatic move)
    ChangeStarted {
        /// Emitting widget
        source: WidgetId,
    },

    /// Motion stopped; the index is final until the next motion
    #[serde(rename_all = "camelCase")]
    Settled {
        /// Emitting widget
        source: WidgetId,
        /// Index after settling
        current_index: usize,
        /// Index before the last change
        previous_index: usize,
    },
}

impl NavigatorEvent {
    /// Widget that emitted the event
    pub fn source(&self) -> &WidgetId {
        match self {
            NavigatorEvent::Ready { source }
            | NavigatorEvent::Changed { source, .. }
            | NavigatorEvent::ChangeStarted { source }
            | NavigatorEvent::Settled { source, .. } => source,
        }
    }

    /// Host-facing event name
    pub fn name(&self) -> &'static str {
        match self {
            NavigatorEvent::Ready { .. } => "ready",
            NavigatorEvent::Changed { .. } => "changed",
            NavigatorEvent::ChangeStarted { .. } => "change-started",
            NavigatorEvent::Settled { .. } => "settled",
        }
    }

    /// `(previous, current)` for `Changed` events
    pub fn change(&self) -> Option<(usize, usize)> {
        match self {
            NavigatorEvent::Changed {
                previous_index,
                current_index,
                ..
            } => Some((*previous_index, *current_index)),
            _ => None,
        }
    }
}

impl fmt::Display for NavigatorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigatorEvent::Changed {
                source,
                previous_index,
                current_index,
                ..
            } => write!(f, "{source}: changed {previous_index} -> {current_index}"),
            NavigatorEvent::Settled {
                source,
                current_index,
                previous_index,
            } => write!(
                f,
                "{source}: settled at {current_index} (from {previous_index})"
            ),
            other => write!(f, "{}: {}", other.source(), other.name()),
        }
    }
}

/// Cross-widget navigation request (`goto`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GotoRequest {
    /// Widget that should move
    pub target_widget_id: WidgetId,
    /// Requested position, wrapped by the receiver
    pub target_index: isize,
}

impl GotoRequest {
    /// Build a request for `target`
    pub fn new(target: impl Into<WidgetId>, index: isize) -> Self {
        Self {
            target_widget_id: target.into(),
            target_index: index,
        }
    }
}
