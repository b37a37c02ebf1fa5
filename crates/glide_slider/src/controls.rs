//! Navigation control bindings
//!
//! Dots, external navigation lists and thumbnail strips are host-owned. The
//! navigator only tells them which index is active:
//!
//! | control          | follows      | activation            |
//! |------------------|--------------|-----------------------|
//! | dots             | `changed`    | `goTo(i)`, smooth     |
//! | navigation list  | `settled`    | `goTo(i)`, instant    |
//! | thumbnail strip  | parent's `changed` | `goto` to parent |
//!
//! Navigation lists follow `settled` rather than `changed` so a drag across
//! several slides does not flicker through every intermediate item.

use glide_core::{NavigatorEvent, WidgetId};

/// A host control keyed by index
pub trait IndexBinding {
    /// Number of items in the control
    fn len(&self) -> usize;

    /// True when the control has no items
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highlight `index` and clear every other item
    fn set_active(&mut self, index: usize);
}

fn activate(binding: &mut dyn IndexBinding, index: usize) {
    if index < binding.len() {
        binding.set_active(index);
    }
}

/// Controls owned by a single navigator
#[derive(Default)]
pub struct NavControls {
    dots: Option<Box<dyn IndexBinding>>,
    navigation: Option<Box<dyn IndexBinding>>,
}

impl std::fmt::Debug for NavControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavControls")
            .field("dots", &self.dots.as_ref().map(|d| d.len()))
            .field("navigation", &self.navigation.as_ref().map(|n| n.len()))
            .finish()
    }
}

impl NavControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when dot indicators are bound
    pub fn has_dots(&self) -> bool {
        self.dots.is_some()
    }

    /// True when an external navigation list is bound
    pub fn has_navigation(&self) -> bool {
        self.navigation.is_some()
    }

    pub(crate) fn bind_dots(&mut self, mut dots: Box<dyn IndexBinding>, current: usize) {
        activate(dots.as_mut(), current);
        self.dots = Some(dots);
    }

    pub(crate) fn bind_navigation(
        &mut self,
        mut navigation: Box<dyn IndexBinding>,
        current: usize,
    ) {
        activate(navigation.as_mut(), current);
        self.navigation = Some(navigation);
    }

    pub(crate) fn on_changed(&mut self, index: usize) {
        if let Some(dots) = self.dots.as_deref_mut() {
            activate(dots, index);
        }
    }

    pub(crate) fn on_settled(&mut self, index: usize) {
        if let Some(navigation) = self.navigation.as_deref_mut() {
            activate(navigation, index);
        }
    }
}

/// Thumbnails driving another widget through `goto`
///
/// Highlighting follows only the parent's `changed` events; events from
/// other widgets on the page are ignored.
pub struct ThumbnailStrip {
    parent: WidgetId,
    binding: Box<dyn IndexBinding>,
    selected: Option<usize>,
}

impl std::fmt::Debug for ThumbnailStrip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailStrip")
            .field("parent", &self.parent)
            .field("len", &self.binding.len())
            .field("selected", &self.selected)
            .finish()
    }
}

impl ThumbnailStrip {
    /// Bind `binding` to the widget named `parent`
    pub fn new(parent: impl Into<WidgetId>, binding: Box<dyn IndexBinding>) -> Self {
        Self {
            parent: parent.into(),
            binding,
            selected: None,
        }
    }

    /// Widget this strip drives
    pub fn parent(&self) -> &WidgetId {
        &self.parent
    }

    /// Currently highlighted thumbnail
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Number of thumbnails
    pub fn len(&self) -> usize {
        self.binding.len()
    }

    /// True when the strip has no thumbnails
    pub fn is_empty(&self) -> bool {
        self.binding.is_empty()
    }

    /// Highlight thumbnail `index`
    pub fn select(&mut self, index: usize) {
        if index < self.binding.len() {
            self.binding.set_active(index);
            self.selected = Some(index);
        }
    }

    /// Follow the parent's index changes
    pub fn observe(&mut self, event: &NavigatorEvent) {
        if event.source() != &self.parent {
            return;
        }
        if let Some((_, current)) = event.change() {
            self.select(current);
        }
    }
}
