//! Host stand-ins for driving a navigator without a page
//!
//! [`RecordingView`] lays slides out edge to edge with a fixed extent and
//! records every scroll command. [`RecordingBinding`] records every
//! highlight; clones share the same log so a test can keep one half while the
//! navigator owns the other.

use std::cell::RefCell;
use std::rc::Rc;

use glide_core::{Axis, SlideHandle};

use crate::controls::IndexBinding;
use crate::view::{ScrollCommand, SlideView};

/// Slides laid out at `handle * extent`, viewport showing `visible` slides
#[derive(Debug, Clone)]
pub struct RecordingView {
    slide_count: usize,
    extent: f32,
    visible: usize,
    offset_x: f32,
    offset_y: f32,
    commands: Vec<ScrollCommand>,
    active: Option<SlideHandle>,
}

impl RecordingView {
    /// `slide_count` slides of `extent` pixels, one visible at a time
    pub fn new(slide_count: usize, extent: f32) -> Self {
        Self {
            slide_count,
            extent,
            visible: 1,
            offset_x: 0.0,
            offset_y: 0.0,
            commands: Vec::new(),
            active: None,
        }
    }

    /// Show `visible` slides in the viewport
    pub fn with_visible(mut self, visible: usize) -> Self {
        self.visible = visible.max(1);
        self
    }

    /// Offset at which slide `index` starts
    pub fn offset_of(&self, index: usize) -> f32 {
        index as f32 * self.extent
    }

    /// Every scroll command issued so far
    pub fn commands(&self) -> &[ScrollCommand] {
        &self.commands
    }

    /// Most recent scroll command
    pub fn last_command(&self) -> Option<ScrollCommand> {
        self.commands.last().copied()
    }

    /// Forget recorded commands
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Slide last marked active
    pub fn active_slide(&self) -> Option<SlideHandle> {
        self.active
    }

    /// Move the strip as a native user scroll would
    pub fn set_scroll_offset(&mut self, axis: Axis, offset: f32) {
        let offset = offset.clamp(0.0, self.max_scroll_offset(axis));
        match axis {
            Axis::Horizontal => self.offset_x = offset,
            Axis::Vertical => self.offset_y = offset,
        }
    }
}

impl SlideView for RecordingView {
    fn scroll_to(&mut self, command: ScrollCommand) {
        self.commands.push(command);
        self.set_scroll_offset(command.axis, command.offset);
    }

    fn scroll_offset(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.offset_x,
            Axis::Vertical => self.offset_y,
        }
    }

    fn max_scroll_offset(&self, _axis: Axis) -> f32 {
        self.slide_count.saturating_sub(self.visible) as f32 * self.extent
    }

    fn slide_offset(&self, slide: SlideHandle, _axis: Axis) -> f32 {
        slide.raw() as f32 * self.extent
    }

    fn slide_extent(&self, _slide: SlideHandle, _axis: Axis) -> f32 {
        self.extent
    }

    fn set_active_slide(&mut self, slide: SlideHandle) {
        self.active = Some(slide);
    }
}

/// Control of `len` items that records every highlight
#[derive(Debug, Clone)]
pub struct RecordingBinding {
    len: usize,
    history: Rc<RefCell<Vec<usize>>>,
}

impl RecordingBinding {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            history: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Currently highlighted item
    pub fn active(&self) -> Option<usize> {
        self.history.borrow().last().copied()
    }

    /// Every highlight in order
    pub fn history(&self) -> Vec<usize> {
        self.history.borrow().clone()
    }
}

impl IndexBinding for RecordingBinding {
    fn len(&self) -> usize {
        self.len
    }

    fn set_active(&mut self, index: usize) {
        self.history.borrow_mut().push(index);
    }
}
