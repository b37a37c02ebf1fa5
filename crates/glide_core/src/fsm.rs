//! Navigator phase machine
//!
//! Exactly one source drives the slide index at any instant:
//!
//! ```text
//!            MOVE_START                     SCROLL
//!   Idle ─────────────────▶ ProgrammaticMove ◀──┐ (self-inflicted, restarts quiet window)
//!    │  ▲                        │  ▲           │
//!    │  │ SCROLL_END /           │  └───────────┘
//!    │  │ QUIET_ELAPSED          │
//!    │  └────────────────────────┘
//!    │ SCROLL            ▲ MOVE_START
//!    ▼                   │
//!   UserScrolling ───────┘
//!    │  SCROLL_END / QUIET_ELAPSED
//!    └──────────────────────────▶ Idle
//! ```
//!
//! Scroll-position inference only runs outside `ProgrammaticMove`.

use crate::events::event_types;

/// State transition table driven by `u32` event types
///
/// # Example
///
/// ```rust
/// use glide_core::{event_types, NavigatorPhase, StateTransitions};
///
/// let phase = NavigatorPhase::Idle;
/// assert_eq!(
///     phase.on_event(event_types::SCROLL),
///     Some(NavigatorPhase::UserScrolling)
/// );
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + std::hash::Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Who currently owns the slide index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavigatorPhase {
    /// At rest
    #[default]
    Idle,
    /// A programmatic move's scroll is in flight; scroll signals are ignored
    ProgrammaticMove,
    /// The user is scrolling natively; the index follows the scroll offset
    UserScrolling,
}

impl NavigatorPhase {
    /// True while no motion is in progress
    pub fn is_idle(&self) -> bool {
        matches!(self, NavigatorPhase::Idle)
    }

    /// True between motion start and settle
    pub fn is_scrolling(&self) -> bool {
        !self.is_idle()
    }

    /// True while scroll-position inference must not touch the index
    pub fn suppresses_reconciliation(&self) -> bool {
        matches!(self, NavigatorPhase::ProgrammaticMove)
    }
}

impl StateTransitions for NavigatorPhase {
    fn on_event(&self, event: u32) -> Option<Self> {
        use event_types::*;

        match (self, event) {
            (NavigatorPhase::Idle, MOVE_START) => Some(NavigatorPhase::ProgrammaticMove),
            (NavigatorPhase::Idle, SCROLL) => Some(NavigatorPhase::UserScrolling),

            // A programmatic move takes over from a user scroll
            (NavigatorPhase::UserScrolling, MOVE_START) => Some(NavigatorPhase::ProgrammaticMove),
            (NavigatorPhase::UserScrolling, SCROLL_END | QUIET_ELAPSED) => {
                Some(NavigatorPhase::Idle)
            }

            (NavigatorPhase::ProgrammaticMove, SCROLL_END | QUIET_ELAPSED) => {
                Some(NavigatorPhase::Idle)
            }

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_types::*;

    #[test]
    fn test_idle_transitions() {
        let idle = NavigatorPhase::Idle;
        assert_eq!(idle.on_event(MOVE_START), Some(NavigatorPhase::ProgrammaticMove));
        assert_eq!(idle.on_event(SCROLL), Some(NavigatorPhase::UserScrolling));
        assert_eq!(idle.on_event(SCROLL_END), None);
        assert_eq!(idle.on_event(QUIET_ELAPSED), None);
    }

    #[test]
    fn test_programmatic_move_ignores_scroll() {
        let phase = NavigatorPhase::ProgrammaticMove;
        assert_eq!(phase.on_event(SCROLL), None);
        assert_eq!(phase.on_event(MOVE_START), None);
        assert_eq!(phase.on_event(QUIET_ELAPSED), Some(NavigatorPhase::Idle));
        assert_eq!(phase.on_event(SCROLL_END), Some(NavigatorPhase::Idle));
        assert!(phase.suppresses_reconciliation());
    }

    #[test]
    fn test_user_scroll_hands_over_to_move() {
        let phase = NavigatorPhase::UserScrolling;
        assert_eq!(phase.on_event(SCROLL), None);
        assert_eq!(phase.on_event(MOVE_START), Some(NavigatorPhase::ProgrammaticMove));
        assert_eq!(phase.on_event(SCROLL_END), Some(NavigatorPhase::Idle));
        assert!(!phase.suppresses_reconciliation());
        assert!(phase.is_scrolling());
    }
}
