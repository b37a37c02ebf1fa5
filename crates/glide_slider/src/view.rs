//! Host view collaborator
//!
//! The scrollable strip lives in the host (a DOM element, a native scroll
//! container). The navigator reads geometry from it and issues scroll
//! commands to it; it never creates or styles anything.

use glide_core::{Axis, SlideHandle};

/// Scroll animation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollBehavior {
    /// Jump without animation
    #[default]
    Instant,
    /// Smooth animated scroll (fire-and-forget)
    Smooth,
}

/// A scroll command issued by the navigation driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// Axis to scroll along
    pub axis: Axis,
    /// Absolute target offset
    pub offset: f32,
    /// Animation behavior
    pub behavior: ScrollBehavior,
}

/// The host's scrollable strip
pub trait SlideView {
    /// Scroll to an absolute offset along `axis`
    ///
    /// Must not block; smooth scrolls report progress through the
    /// navigator's scroll callbacks.
    fn scroll_to(&mut self, command: ScrollCommand);

    /// Current scroll offset along `axis`
    fn scroll_offset(&self, axis: Axis) -> f32;

    /// Largest reachable scroll offset along `axis`
    fn max_scroll_offset(&self, axis: Axis) -> f32;

    /// Start offset of `slide` inside the strip
    fn slide_offset(&self, slide: SlideHandle, axis: Axis) -> f32;

    /// Extent of `slide` along `axis` (width or height)
    fn slide_extent(&self, slide: SlideHandle, axis: Axis) -> f32;

    /// Mark `slide` as visually active and every other slide inactive
    fn set_active_slide(&mut self, slide: SlideHandle);
}
