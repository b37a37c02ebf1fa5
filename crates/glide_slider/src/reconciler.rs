//! Scroll reconciler
//!
//! Native scrolling moves the strip without asking the navigator. The
//! reconciler infers the visible position from the scroll offset and folds
//! it back into the index, debounced so a flick produces one `changed`
//! rather than one per frame.
//!
//! Scroll signals that arrive while a programmatic move is in flight are the
//! move's own animation. They only restart its quiet window; the strip is
//! reconciled once when the move settles, in case a drag took over.

use std::time::Duration;

use glide_core::{event_types, NavigatorPhase};
use tracing::{debug, trace};

use crate::navigator::{
    cancel_slot, restart_slot, signed, Navigator, NavigatorTimer, MOVE_QUIET_WINDOW,
};
use crate::view::SlideView;

/// Delay between the last scroll signal and index inference
pub const INFERENCE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Quiet period after which a user scroll settles without a scroll-end signal
pub const SCROLL_SETTLE_QUIET: Duration = Duration::from_millis(150);

/// Offsets this close to either end snap to the first or last position
const EDGE_EPSILON: f32 = 0.5;

/// Position whose start is nearest to `offset`
///
/// An offset at the start maps to 0 and an offset at the end of the
/// scrollable range maps to `total - 1`, even when the last slides are
/// narrower than the viewport. Returns `None` for unusable geometry.
///
/// # Example
///
/// ```rust
/// use glide_slider::infer_index;
///
/// assert_eq!(infer_index(790.0, 1600.0, 400.0, 5), Some(2));
/// assert_eq!(infer_index(1600.0, 1600.0, 400.0, 5), Some(4));
/// assert_eq!(infer_index(100.0, 1600.0, 0.0, 5), None);
/// ```
pub fn infer_index(offset: f32, max_offset: f32, extent: f32, total: usize) -> Option<usize> {
    if total == 0 || !offset.is_finite() {
        return None;
    }
    let last = total - 1;

    if offset <= EDGE_EPSILON {
        return Some(0);
    }
    if max_offset > EDGE_EPSILON && offset >= max_offset - EDGE_EPSILON {
        return Some(last);
    }
    if !extent.is_finite() || extent <= 0.0 {
        return None;
    }

    let position = (offset / extent).round();
    Some((position as usize).min(last))
}

impl<V: SlideView> Navigator<V> {
    /// The strip's scroll offset changed
    pub fn on_scroll(&mut self) {
        let now = self.now();

        if self.phase.suppresses_reconciliation() {
            trace!(widget = %self.id, "scroll from programmatic move");
            restart_slot(
                &mut self.timers,
                &mut self.quiet_window,
                now + MOVE_QUIET_WINDOW,
                NavigatorTimer::QuietWindow,
            );
            return;
        }

        self.transition(event_types::SCROLL);
        restart_slot(
            &mut self.timers,
            &mut self.settle_timer,
            now + SCROLL_SETTLE_QUIET,
            NavigatorTimer::ScrollSettle,
        );

        if self.inference_paused() {
            trace!(widget = %self.id, "inference paused while hovered");
            return;
        }
        // Trailing debounce never releases on call
        let _ = self.inference.call(now, ());
    }

    /// The host reported that scrolling stopped
    pub fn on_scroll_end(&mut self) {
        match self.phase {
            NavigatorPhase::Idle => {}
            NavigatorPhase::ProgrammaticMove => {
                cancel_slot(&mut self.timers, &mut self.quiet_window);
                self.transition(event_types::SCROLL_END);
            }
            NavigatorPhase::UserScrolling => self.finish_user_scroll(event_types::SCROLL_END),
        }
    }

    pub(crate) fn fire_inference(&mut self, deadline: Duration) {
        if self.inference.poll(deadline).is_some() {
            self.reconcile();
        }
    }

    /// Final inference for a user scroll, then settle
    ///
    /// Runs even while hover pauses per-signal inference, so the index
    /// always matches the strip once motion stops.
    pub(crate) fn finish_user_scroll(&mut self, event: u32) {
        cancel_slot(&mut self.timers, &mut self.settle_timer);
        let _ = self.inference.flush();
        self.reconcile();
        self.transition(event);
    }

    /// Fold the inferred position into the index
    ///
    /// Returns true when the index changed.
    pub(crate) fn reconcile(&mut self) -> bool {
        if self.phase.suppresses_reconciliation() {
            return false;
        }
        let Some(inferred) = self.infer_current() else {
            return false;
        };
        if inferred == self.index.current() {
            return false;
        }

        let change = self.index.set_index(signed(inferred));
        debug!(
            widget = %self.id,
            previous = change.previous,
            current = change.current,
            "scroll reconciled"
        );
        self.announce_change(change);
        true
    }

    fn infer_current(&self) -> Option<usize> {
        let axis = self.config.direction;
        let first = self.slides.get(0)?;
        infer_index(
            self.view.scroll_offset(axis),
            self.view.max_scroll_offset(axis),
            self.view.slide_extent(first, axis),
            self.index.total(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingBinding, RecordingView};
    use glide_animation::DeterministicClock;
    use glide_core::{Axis, NavigatorEvent, SlideCollection, SlideHandle, SliderConfig, WidgetId};
    use std::sync::Arc;

    const EXTENT: f32 = 400.0;

    fn navigator(
        slides: usize,
        config: SliderConfig,
    ) -> (Navigator<RecordingView>, Arc<DeterministicClock>) {
        let clock = DeterministicClock::shared();
        let view = RecordingView::new(slides, EXTENT).with_visible(config.per_view);
        let mut nav = Navigator::new(
            "reel",
            config,
            SlideCollection::sequential(slides),
            view,
            clock.clone(),
        )
        .unwrap();
        nav.drain_events().for_each(drop);
        (nav, clock)
    }

    fn drag_to(nav: &mut Navigator<RecordingView>, offset: f32) {
        let axis = nav.config().direction;
        nav.view_mut().set_scroll_offset(axis, offset);
        nav.on_scroll();
    }

    #[test]
    fn test_infer_index_rounds_to_nearest() {
        assert_eq!(infer_index(0.0, 1600.0, 400.0, 5), Some(0));
        assert_eq!(infer_index(199.0, 1600.0, 400.0, 5), Some(0));
        assert_eq!(infer_index(201.0, 1600.0, 400.0, 5), Some(1));
        assert_eq!(infer_index(1210.0, 1600.0, 400.0, 5), Some(3));
    }

    #[test]
    fn test_infer_index_snaps_to_edges() {
        // trailing slides narrower than the viewport
        assert_eq!(infer_index(900.0, 900.0, 400.0, 4), Some(3));
        assert_eq!(infer_index(899.8, 900.0, 400.0, 4), Some(3));
        assert_eq!(infer_index(0.3, 900.0, 400.0, 4), Some(0));
    }

    #[test]
    fn test_infer_index_rejects_bad_geometry() {
        assert_eq!(infer_index(300.0, 1600.0, 0.0, 5), None);
        assert_eq!(infer_index(f32::NAN, 1600.0, 400.0, 5), None);
        assert_eq!(infer_index(300.0, 1600.0, 400.0, 0), None);
    }

    #[test]
    fn test_user_scroll_infers_then_settles() {
        let (mut nav, clock) = navigator(5, SliderConfig::default());

        drag_to(&mut nav, 812.0);
        assert_eq!(nav.phase(), NavigatorPhase::UserScrolling);
        assert_eq!(nav.current_index(), 0);

        clock.advance_ms(100);
        nav.tick();
        assert_eq!(nav.current_index(), 2);

        clock.advance_ms(50);
        nav.tick();
        assert!(nav.phase().is_idle());
        assert_eq!(nav.view().active_slide(), Some(SlideHandle(2)));

        let source = WidgetId::from("reel");
        let events: Vec<_> = nav.drain_events().collect();
        assert_eq!(
            events,
            vec![
                NavigatorEvent::ChangeStarted {
                    source: source.clone()
                },
                NavigatorEvent::Changed {
                    source: source.clone(),
                    previous_index: 0,
                    current_index: 2,
                    current_slide: Some(SlideHandle(2)),
                },
                NavigatorEvent::Settled {
                    source,
                    current_index: 2,
                    previous_index: 0,
                },
            ]
        );
    }

    #[test]
    fn test_scroll_burst_emits_single_change() {
        let (mut nav, clock) = navigator(5, SliderConfig::default());
        for offset in [100.0, 300.0, 500.0, 700.0, 800.0] {
            drag_to(&mut nav, offset);
            clock.advance_ms(20);
            nav.tick();
        }
        clock.advance_ms(100);
        nav.tick();

        let pairs: Vec<_> = nav.drain_events().filter_map(|e| e.change()).collect();
        assert_eq!(pairs, vec![(0, 2)]);
    }

    #[test]
    fn test_scroll_within_same_slide_is_not_a_change() {
        let (mut nav, _) = navigator(5, SliderConfig::default());
        drag_to(&mut nav, 60.0);
        nav.on_scroll_end();

        let names: Vec<_> = nav.drain_events().map(|e| e.name()).collect();
        assert_eq!(names, vec!["change-started", "settled"]);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_programmatic_move_ignores_scroll_signals() {
        let (mut nav, clock) = navigator(5, SliderConfig::default());
        nav.next();
        nav.drain_events().for_each(drop);

        // the move's own animation passing through on its way to slide 1
        clock.advance_ms(100);
        drag_to(&mut nav, 150.0);
        clock.advance_ms(100);
        drag_to(&mut nav, 400.0);
        clock.advance_ms(150);
        nav.tick();
        assert_eq!(nav.current_index(), 1);
        assert!(nav.suppresses_reconciliation());

        // quiet window restarted at 200ms
        clock.advance_ms(150);
        nav.tick();
        assert!(nav.phase().is_idle());
        assert_eq!(nav.current_index(), 1);

        let names: Vec<_> = nav.drain_events().map(|e| e.name()).collect();
        assert_eq!(names, vec!["settled"]);
    }

    #[test]
    fn test_drag_during_quiet_window_is_reconciled_on_settle() {
        let (mut nav, clock) = navigator(5, SliderConfig::default());
        let items = RecordingBinding::new(5);
        assert!(nav.bind_navigation(Box::new(items.clone())));
        nav.next();
        nav.drain_events().for_each(drop);

        for offset in [600.0, 1000.0, 1200.0] {
            clock.advance_ms(100);
            drag_to(&mut nav, offset);
        }
        assert_eq!(nav.current_index(), 1);

        clock.advance_ms(700);
        nav.tick();

        let source = WidgetId::from("reel");
        let events: Vec<_> = nav.drain_events().collect();
        assert_eq!(
            events,
            vec![
                NavigatorEvent::Changed {
                    source: source.clone(),
                    previous_index: 1,
                    current_index: 3,
                    current_slide: Some(SlideHandle(3)),
                },
                NavigatorEvent::Settled {
                    source,
                    current_index: 3,
                    previous_index: 1,
                },
            ]
        );
        assert!(nav.phase().is_idle());
        assert_eq!(nav.view().active_slide(), Some(SlideHandle(3)));
        assert_eq!(items.active(), Some(3));
    }

    #[test]
    fn test_scroll_end_reconciles_programmatic_move() {
        let (mut nav, _) = navigator(5, SliderConfig::default());
        nav.go_to(1);
        drag_to(&mut nav, 800.0);
        nav.on_scroll_end();
        assert_eq!(nav.current_index(), 2);
        assert!(nav.phase().is_idle());
    }

    #[test]
    fn test_scroll_end_finishes_programmatic_move() {
        let (mut nav, _) = navigator(5, SliderConfig::default());
        nav.go_to(3);
        nav.on_scroll_end();
        assert!(nav.phase().is_idle());
        assert_eq!(nav.next_deadline(), None);
        assert_eq!(nav.view().active_slide(), Some(SlideHandle(3)));
    }

    #[test]
    fn test_scroll_end_flushes_pending_inference() {
        let (mut nav, _) = navigator(5, SliderConfig::default());
        drag_to(&mut nav, 1200.0);
        nav.on_scroll_end();

        assert_eq!(nav.current_index(), 3);
        assert!(nav.phase().is_idle());
        assert_eq!(nav.next_deadline(), None);
    }

    #[test]
    fn test_move_interrupts_user_scroll() {
        let (mut nav, clock) = navigator(5, SliderConfig::default());
        drag_to(&mut nav, 1200.0);
        nav.previous();
        assert_eq!(nav.current_index(), 4);

        // the pending inference was dropped with the user scroll
        clock.advance_ms(100);
        nav.tick();
        assert_eq!(nav.current_index(), 4);

        let names: Vec<_> = nav.drain_events().map(|e| e.name()).collect();
        assert_eq!(names, vec!["change-started", "changed"]);
    }

    #[test]
    fn test_hover_with_auto_advance_defers_inference_to_settle() {
        let (mut nav, clock) = navigator(5, SliderConfig::default().speed(5.0));
        nav.set_hovered(true);

        drag_to(&mut nav, 1200.0);
        clock.advance_ms(100);
        nav.tick();
        assert_eq!(nav.current_index(), 0);

        nav.on_scroll_end();
        assert_eq!(nav.current_index(), 3);
        assert!(nav.phase().is_idle());
    }

    #[test]
    fn test_vertical_strip_uses_vertical_offset() {
        let (mut nav, clock) = navigator(4, SliderConfig::default().direction(Axis::Vertical));
        nav.view_mut().set_scroll_offset(Axis::Horizontal, 1200.0);
        drag_to(&mut nav, 400.0);
        clock.advance_ms(150);
        nav.tick();
        assert_eq!(nav.current_index(), 1);
        assert!(nav.phase().is_idle());
    }

    #[test]
    fn test_end_of_strip_maps_to_last_position() {
        let (mut nav, _) = navigator(5, SliderConfig::default().per_view(2));
        assert_eq!(nav.total_positions(), 4);
        drag_to(&mut nav, 1200.0);
        nav.on_scroll_end();
        assert_eq!(nav.current_index(), 3);
    }
}
