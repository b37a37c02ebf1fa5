//! Slide handles
//!
//! Slides are visual elements owned by the host. The navigator only holds
//! opaque handles to them and asks the host view for their geometry.

use serde::{Deserialize, Serialize};

/// Opaque reference to a host-owned slide element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideHandle(pub u64);

impl SlideHandle {
    /// Raw host identifier
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Ordered, fixed-length sequence of slides
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlideCollection {
    slides: Vec<SlideHandle>,
}

impl SlideCollection {
    /// Wrap host handles in strip order
    pub fn new(slides: Vec<SlideHandle>) -> Self {
        Self { slides }
    }

    /// Handles `0..count`, for hosts that address slides by position
    pub fn sequential(count: usize) -> Self {
        Self {
            slides: (0..count as u64).map(SlideHandle).collect(),
        }
    }

    /// Number of slides
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// True when there are no slides
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Handle at `index`
    pub fn get(&self, index: usize) -> Option<SlideHandle> {
        self.slides.get(index).copied()
    }

    /// Iterate handles in strip order
    pub fn iter(&self) -> impl Iterator<Item = SlideHandle> + '_ {
        self.slides.iter().copied()
    }
}

impl FromIterator<SlideHandle> for SlideCollection {
    fn from_iter<I: IntoIterator<Item = SlideHandle>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
