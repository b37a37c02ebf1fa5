//! Slide navigator
//!
//! Owns the index state of one slider and every timer that touches it.
//! Programmatic moves live here; scroll-driven updates live in
//! [`reconciler`](crate::reconciler). Both end in the same `changed` event.
//!
//! # Timing
//!
//! The navigator never sleeps. The host calls [`Navigator::tick`] whenever
//! [`Navigator::next_deadline`] has passed; each due timer fires in deadline
//! order and observes its own deadline as the current time, so a single late
//! tick replays exactly what on-time ticks would have done.

use std::collections::VecDeque;
use std::time::Duration;

use glide_animation::{Debouncer, SharedClock, TimerId, TimerScheduler};
use glide_core::{
    event_types, total_positions, Diagnostic, Direction, GotoRequest, IndexChange, IndexState,
    KeyState, KeyboardEvent, NavigatorError, NavigatorEvent, NavigatorPhase, PointerEvent, Result,
    SlideCollection, SlideHandle, SliderConfig, StateTransitions, WidgetId,
};
use tracing::{debug, warn};

use crate::controls::{IndexBinding, NavControls};
use crate::reconciler::INFERENCE_DEBOUNCE;
use crate::view::{ScrollBehavior, ScrollCommand, SlideView};

/// Fewest slides a navigator will initialize with
pub const MIN_SLIDES: usize = 2;

/// Quiet period after the last self-inflicted scroll signal of a programmatic move
pub const MOVE_QUIET_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavigatorTimer {
    AutoAdvance,
    QuietWindow,
    ScrollSettle,
}

/// Index state machine for one slider widget
pub struct Navigator<V> {
    pub(crate) id: WidgetId,
    pub(crate) config: SliderConfig,
    pub(crate) slides: SlideCollection,
    pub(crate) view: V,
    pub(crate) index: IndexState,
    pub(crate) phase: NavigatorPhase,
    pub(crate) hovered: bool,
    pub(crate) controls: NavControls,
    clock: SharedClock,
    /// Deadline of the timer being fired; stands in for "now" while ticking
    firing_at: Option<Duration>,
    pub(crate) timers: TimerScheduler<NavigatorTimer>,
    auto_advance: Option<TimerId>,
    pub(crate) quiet_window: Option<TimerId>,
    pub(crate) settle_timer: Option<TimerId>,
    pub(crate) inference: Debouncer<()>,
    events: VecDeque<NavigatorEvent>,
    diagnostics: Vec<Diagnostic>,
}

impl<V> std::fmt::Debug for Navigator<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("id", &self.id)
            .field("current", &self.index.current())
            .field("previous", &self.index.previous())
            .field("total", &self.index.total())
            .field("phase", &self.phase)
            .field("hovered", &self.hovered)
            .field("controls", &self.controls)
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl<V: SlideView> Navigator<V> {
    /// Initialize a navigator and place the strip at the initial slide
    ///
    /// Fails without touching the view when there are fewer than
    /// [`MIN_SLIDES`] slides. Style/per-view conflicts are degraded and
    /// recorded as diagnostics. A `ready` event is queued on success.
    pub fn new(
        id: impl Into<WidgetId>,
        config: SliderConfig,
        slides: SlideCollection,
        view: V,
        clock: SharedClock,
    ) -> Result<Self> {
        let id = id.into();
        if slides.len() < MIN_SLIDES {
            return Err(NavigatorError::TooFewSlides {
                found: slides.len(),
                required: MIN_SLIDES,
            });
        }

        let (config, diagnostics) = config.normalized();
        for diagnostic in &diagnostics {
            warn!(widget = %id, "{}", diagnostic);
        }

        let total = total_positions(slides.len(), config.per_view);
        let index = IndexState::new(total, signed(config.initial_slide % total));

        let mut navigator = Self {
            id,
            config,
            slides,
            view,
            index,
            phase: NavigatorPhase::Idle,
            hovered: false,
            controls: NavControls::new(),
            clock,
            firing_at: None,
            timers: TimerScheduler::new(),
            auto_advance: None,
            quiet_window: None,
            settle_timer: None,
            inference: Debouncer::new(INFERENCE_DEBOUNCE),
            events: VecDeque::new(),
            diagnostics,
        };

        navigator.place_initial();
        let now = navigator.now();
        navigator.restart_auto_advance(now);

        debug!(
            widget = %navigator.id,
            slides = navigator.slides.len(),
            positions = total,
            initial = navigator.index.current(),
            "navigator ready"
        );
        let source = navigator.id.clone();
        navigator.emit(NavigatorEvent::Ready { source });

        Ok(navigator)
    }

    fn place_initial(&mut self) {
        let current = self.index.current();
        let Some(slide) = self.slides.get(current) else {
            return;
        };
        let axis = self.config.direction;
        let offset = self.view.slide_offset(slide, axis);
        self.view.scroll_to(ScrollCommand {
            axis,
            offset,
            behavior: ScrollBehavior::Instant,
        });
        self.view.set_active_slide(slide);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Host identifier of this widget
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    /// Effective configuration (after style/per-view normalization)
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Current position
    pub fn current_index(&self) -> usize {
        self.index.current()
    }

    /// Position before the last change
    pub fn previous_index(&self) -> usize {
        self.index.previous()
    }

    /// Number of distinct scroll stops
    pub fn total_positions(&self) -> usize {
        self.index.total()
    }

    /// Slide at the current position
    pub fn current_slide(&self) -> Option<SlideHandle> {
        self.slides.get(self.index.current())
    }

    /// Slides in strip order
    pub fn slides(&self) -> &SlideCollection {
        &self.slides
    }

    /// Current phase
    pub fn phase(&self) -> NavigatorPhase {
        self.phase
    }

    /// True while the pointer is over the widget
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// True between motion start and settle
    pub fn is_scrolling(&self) -> bool {
        self.phase.is_scrolling()
    }

    /// True while scroll signals are treated as self-inflicted
    pub fn suppresses_reconciliation(&self) -> bool {
        self.phase.suppresses_reconciliation()
    }

    /// Whether the host should render previous/next buttons
    pub fn show_buttons(&self) -> bool {
        self.config.show_buttons
    }

    /// Number of dots the host should render, if dots are enabled
    pub fn dot_count(&self) -> Option<usize> {
        self.config.show_dots.then_some(self.index.total())
    }

    /// Bound controls
    pub fn controls(&self) -> &NavControls {
        &self.controls
    }

    /// Host view
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Host view, mutably (for hosts that update geometry in place)
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Configuration mismatches found so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take every queued event in emission order
    pub fn drain_events(&mut self) -> impl Iterator<Item = NavigatorEvent> + '_ {
        self.events.drain(..)
    }

    /// When [`tick`](Self::tick) next has work to do
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.timers.next_deadline(), self.inference.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Bind dot indicators; they follow every `changed`
    pub fn bind_dots(&mut self, dots: Box<dyn IndexBinding>) {
        let current = self.index.current();
        self.controls.bind_dots(dots, current);
    }

    /// Bind an external navigation list; it follows `settled`
    ///
    /// Returns false (and records a diagnostic) when the list cannot work
    /// with this slider: per-view above 1, or an item count that differs
    /// from the slide count.
    pub fn bind_navigation(&mut self, navigation: Box<dyn IndexBinding>) -> bool {
        if self.config.per_view != 1 {
            self.report(Diagnostic::NavigationWithMultiplePerView {
                per_view: self.config.per_view,
            });
            return false;
        }
        if navigation.len() != self.slides.len() {
            self.report(Diagnostic::NavigationCountMismatch {
                items: navigation.len(),
                slides: self.slides.len(),
            });
            return false;
        }
        let current = self.index.current();
        self.controls.bind_navigation(navigation, current);
        true
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(widget = %self.id, "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    // =========================================================================
    // Navigation driver
    // =========================================================================

    /// Step forward one position, wrapping to the first
    pub fn next(&mut self) {
        let target = self.index.next_target();
        self.move_to(target, ScrollBehavior::Smooth);
    }

    /// Step back one position, wrapping to the last
    pub fn previous(&mut self) {
        let target = self.index.previous_target();
        self.move_to(target, ScrollBehavior::Smooth);
    }

    /// Move to `index`; out-of-range values wrap
    pub fn go_to(&mut self, index: usize) {
        self.move_to(index, ScrollBehavior::Smooth);
    }

    /// Move to `index` if `target` names this widget
    ///
    /// Returns whether the request was accepted. Negative and out-of-range
    /// indices wrap.
    pub fn go_to_external(&mut self, target: &WidgetId, index: isize) -> bool {
        if target != &self.id {
            return false;
        }
        let index = self.index.wrap(index);
        self.move_to(index, ScrollBehavior::Instant);
        true
    }

    /// Handle a cross-widget `goto` request
    pub fn handle_goto(&mut self, request: &GotoRequest) -> bool {
        self.go_to_external(&request.target_widget_id, request.target_index)
    }

    /// A dot was clicked or activated with Enter
    pub fn dot_activated(&mut self, index: usize) {
        self.go_to(index);
    }

    /// An external navigation item was clicked
    pub fn navigation_activated(&mut self, index: usize) {
        self.move_to(index, ScrollBehavior::Instant);
        // Highlight now; the settle that follows confirms it
        let current = self.index.current();
        self.controls.on_settled(current);
    }

    /// Scroll to `target` and make it the current position
    ///
    /// Suppresses scroll reconciliation until the quiet window passes or the
    /// host reports scroll end, and pushes back the next auto-advance.
    pub fn move_to(&mut self, target: usize, behavior: ScrollBehavior) {
        let now = self.now();
        let target = self.index.wrap_position(target);

        self.transition(event_types::MOVE_START);
        // Anything the user scroll had pending is superseded
        self.inference.cancel();
        cancel_slot(&mut self.timers, &mut self.settle_timer);

        if let Some(slide) = self.slides.get(target) {
            let axis = self.config.direction;
            let offset = self.view.slide_offset(slide, axis);
            self.view.scroll_to(ScrollCommand {
                axis,
                offset,
                behavior,
            });
        }

        let change = self.index.set_index(signed(target));
        debug!(
            widget = %self.id,
            previous = change.previous,
            current = change.current,
            ?behavior,
            "move"
        );
        self.announce_change(change);

        restart_slot(
            &mut self.timers,
            &mut self.quiet_window,
            now + MOVE_QUIET_WINDOW,
            NavigatorTimer::QuietWindow,
        );
        self.restart_auto_advance(now);
    }

    pub(crate) fn announce_change(&mut self, change: IndexChange) {
        self.controls.on_changed(change.current);
        let event = NavigatorEvent::Changed {
            source: self.id.clone(),
            previous_index: change.previous,
            current_index: change.current,
            current_slide: self.slides.get(change.current),
        };
        self.emit(event);
    }

    // =========================================================================
    // Phase machine
    // =========================================================================

    pub(crate) fn transition(&mut self, event: u32) {
        let Some(next) = self.phase.on_event(event) else {
            return;
        };
        let previous = std::mem::replace(&mut self.phase, next);
        debug!(widget = %self.id, from = ?previous, to = ?next, "phase");

        if previous.is_idle() && !next.is_idle() {
            let source = self.id.clone();
            self.emit(NavigatorEvent::ChangeStarted { source });
        } else if !previous.is_idle() && next.is_idle() {
            if previous.suppresses_reconciliation() {
                // A drag may have taken over before the quiet window closed
                self.reconcile();
            }
            self.settle();
        }
    }

    fn settle(&mut self) {
        let current = self.index.current();
        if let Some(slide) = self.slides.get(current) {
            self.view.set_active_slide(slide);
        }
        self.controls.on_settled(current);
        let event = NavigatorEvent::Settled {
            source: self.id.clone(),
            current_index: current,
            previous_index: self.index.previous(),
        };
        self.emit(event);
    }

    pub(crate) fn emit(&mut self, event: NavigatorEvent) {
        self.events.push_back(event);
    }

    // =========================================================================
    // Hover & keyboard
    // =========================================================================

    /// Track the pointer entering or leaving the widget
    pub fn on_pointer(&mut self, event: PointerEvent) {
        self.set_hovered(matches!(event, PointerEvent::Entered));
    }

    /// Set hover state directly
    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            debug!(widget = %self.id, hovered, "hover");
            self.hovered = hovered;
        }
    }

    /// Arrow-key navigation, only while hovered
    ///
    /// Several sliders can share a page; only the one under the pointer
    /// consumes arrow keys. Returns whether the key was handled.
    pub fn on_key(&mut self, event: &KeyboardEvent) -> bool {
        if !self.hovered || event.state != KeyState::Pressed {
            return false;
        }
        match event.key.direction(self.config.direction) {
            Some(Direction::Next) => self.next(),
            Some(Direction::Previous) => self.previous(),
            None => return false,
        }
        true
    }

    // =========================================================================
    // Timers
    // =========================================================================

    pub(crate) fn now(&self) -> Duration {
        self.firing_at.unwrap_or_else(|| self.clock.now())
    }

    /// True while hover pauses auto-advance and, with it, scroll inference
    pub(crate) fn inference_paused(&self) -> bool {
        self.hovered && self.config.auto_advance_interval().is_some()
    }

    fn restart_auto_advance(&mut self, now: Duration) {
        if let Some(interval) = self.config.auto_advance_interval() {
            restart_slot(
                &mut self.timers,
                &mut self.auto_advance,
                now + interval,
                NavigatorTimer::AutoAdvance,
            );
        }
    }

    /// Fire every timer due at or before the clock's current time
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.tick_until(now);
    }

    /// Fire every timer due at or before `limit`
    ///
    /// Lets a page interleave several navigators in deadline order.
    pub fn tick_until(&mut self, limit: Duration) {
        loop {
            let timer_due = self.timers.next_deadline().filter(|d| *d <= limit);
            let inference_due = self.inference.deadline().filter(|d| *d <= limit);

            match (timer_due, inference_due) {
                (None, None) => break,
                (Some(timer), Some(inference)) if inference <= timer => {
                    self.firing_at = Some(inference);
                    self.fire_inference(inference);
                }
                (None, Some(inference)) => {
                    self.firing_at = Some(inference);
                    self.fire_inference(inference);
                }
                (Some(_), _) => {
                    let Some((id, deadline, timer)) = self.timers.pop_due(limit) else {
                        break;
                    };
                    self.firing_at = Some(deadline);
                    self.fire_timer(id, timer);
                }
            }
        }
        self.firing_at = None;
    }

    fn fire_timer(&mut self, id: TimerId, timer: NavigatorTimer) {
        match timer {
            NavigatorTimer::AutoAdvance => {
                clear_if(&mut self.auto_advance, id);
                if self.hovered {
                    debug!(widget = %self.id, "auto-advance skipped while hovered");
                    let now = self.now();
                    self.restart_auto_advance(now);
                } else {
                    self.next();
                }
            }
            NavigatorTimer::QuietWindow => {
                clear_if(&mut self.quiet_window, id);
                self.transition(event_types::QUIET_ELAPSED);
            }
            NavigatorTimer::ScrollSettle => {
                clear_if(&mut self.settle_timer, id);
                self.finish_user_scroll(event_types::QUIET_ELAPSED);
            }
        }
    }
}

pub(crate) fn restart_slot(
    timers: &mut TimerScheduler<NavigatorTimer>,
    slot: &mut Option<TimerId>,
    deadline: Duration,
    timer: NavigatorTimer,
) {
    if let Some(id) = *slot {
        if timers.reschedule(id, deadline) {
            return;
        }
    }
    *slot = Some(timers.schedule(deadline, timer));
}

pub(crate) fn cancel_slot(timers: &mut TimerScheduler<NavigatorTimer>, slot: &mut Option<TimerId>) {
    if let Some(id) = slot.take() {
        timers.cancel(id);
    }
}

fn clear_if(slot: &mut Option<TimerId>, fired: TimerId) {
    if *slot == Some(fired) {
        *slot = None;
    }
}

/// Convert an index already wrapped into `[0, total)`
pub(crate) fn signed(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}
