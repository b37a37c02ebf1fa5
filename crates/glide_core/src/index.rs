//! Slide index state
//!
//! Positions are the distinct scroll stops of the strip. With one slide per
//! view every slide is a stop. With `per_view > 1` position `i` still aligns
//! slide `i` with the start of the viewport, so the last stop is slide
//! `N - per_view` and there are `N - per_view + 1` stops.

/// Number of distinct scroll stops for `slide_count` slides
///
/// `per_view` is clamped to `[1, slide_count]`. An empty collection has no
/// stops at all.
pub fn total_positions(slide_count: usize, per_view: usize) -> usize {
    if slide_count == 0 {
        return 0;
    }
    let per_view = per_view.clamp(1, slide_count);
    slide_count - per_view + 1
}

/// Result of an index update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChange {
    /// Index before the update
    pub previous: usize,
    /// Index after the update
    pub current: usize,
}

/// Current and previous position, always inside `[0, total)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexState {
    current: usize,
    previous: usize,
    total: usize,
}

impl IndexState {
    /// Create the state at `initial` (wrapped into range)
    ///
    /// `total` is raised to 1 so the state is never empty.
    pub fn new(total: usize, initial: isize) -> Self {
        let total = total.max(1);
        let current = wrap(initial, total);
        Self {
            current,
            previous: current,
            total,
        }
    }

    /// Current position
    pub fn current(&self) -> usize {
        self.current
    }

    /// Position before the last update
    pub fn previous(&self) -> usize {
        self.previous
    }

    /// Number of positions
    pub fn total(&self) -> usize {
        self.total
    }

    /// Wrap an arbitrary index into `[0, total)`
    ///
    /// One past the end becomes 0, one before the start becomes `total - 1`.
    pub fn wrap(&self, index: isize) -> usize {
        wrap(index, self.total)
    }

    /// Wrap a non-negative index into `[0, total)`
    ///
    /// Unlike [`wrap`](Self::wrap) this never goes through `isize`, so very
    /// large indices keep their exact remainder.
    pub fn wrap_position(&self, index: usize) -> usize {
        index % self.total
    }

    /// Position after `current`, wrapping to 0
    pub fn next_target(&self) -> usize {
        if self.current + 1 >= self.total {
            0
        } else {
            self.current + 1
        }
    }

    /// Position before `current`, wrapping to the last one
    pub fn previous_target(&self) -> usize {
        if self.current == 0 {
            self.total - 1
        } else {
            self.current - 1
        }
    }

    /// Move to `index` (wrapped), shifting the current index into `previous`
    pub fn set_index(&mut self, index: isize) -> IndexChange {
        let index = self.wrap(index);
        self.previous = self.current;
        self.current = index;
        IndexChange {
            previous: self.previous,
            current: self.current,
        }
    }
}

fn wrap(index: isize, total: usize) -> usize {
    let total = total.max(1) as isize;
    index.rem_euclid(total) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_positions() {
        assert_eq!(total_positions(5, 1), 5);
        assert_eq!(total_positions(5, 2), 4);
        assert_eq!(total_positions(5, 5), 1);
        // per_view larger than the strip is clamped
        assert_eq!(total_positions(3, 8), 1);
        // per_view 0 behaves like 1
        assert_eq!(total_positions(4, 0), 4);
        assert_eq!(total_positions(0, 1), 0);
    }

    #[test]
    fn test_set_index_tracks_previous() {
        let mut state = IndexState::new(5, 0);
        let change = state.set_index(3);
        assert_eq!(change, IndexChange { previous: 0, current: 3 });
        let change = state.set_index(1);
        assert_eq!(change, IndexChange { previous: 3, current: 1 });
        assert_eq!(state.previous(), 3);
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn test_set_index_wraps() {
        let mut state = IndexState::new(5, 0);
        assert_eq!(state.set_index(5).current, 0);
        assert_eq!(state.set_index(-1).current, 4);
        assert_eq!(state.set_index(12).current, 2);
        assert_eq!(state.set_index(-6).current, 4);
    }

    #[test]
    fn test_wrap_position_is_exact_for_large_indices() {
        let state = IndexState::new(5, 0);
        assert_eq!(state.wrap_position(7), 2);
        assert_eq!(state.wrap_position(usize::MAX), usize::MAX % 5);
        assert_eq!(state.wrap_position(usize::MAX - 1), 4);
    }

    #[test]
    fn test_initial_index_wraps() {
        let state = IndexState::new(4, 9);
        assert_eq!(state.current(), 1);
        assert_eq!(state.previous(), 1);
    }

    #[test]
    fn test_relative_targets_cycle() {
        let mut state = IndexState::new(3, 0);
        let mut seen = Vec::new();
        for _ in 0..7 {
            let target = state.next_target();
            state.set_index(target as isize);
            seen.push(state.current());
        }
        assert_eq!(seen, vec![1, 2, 0, 1, 2, 0, 1]);

        let mut state = IndexState::new(3, 0);
        assert_eq!(state.previous_target(), 2);
        state.set_index(2);
        assert_eq!(state.previous_target(), 1);
    }

    #[test]
    fn test_single_position() {
        let mut state = IndexState::new(1, 0);
        assert_eq!(state.next_target(), 0);
        assert_eq!(state.previous_target(), 0);
        assert_eq!(state.set_index(-3).current, 0);
    }
}
