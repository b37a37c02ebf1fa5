//! Page dispatcher
//!
//! Owns every navigator and thumbnail strip on a page and routes host input
//! to them. Cross-widget traffic (`goto` requests, thumbnail highlighting)
//! goes through a queue and is delivered on the next [`PageDispatcher::pump`],
//! never re-entrantly from inside the sender.
//!
//! Events reach subscribers in the order navigators emitted them. Every
//! stimulus method pumps before returning, so after any call the queues are
//! empty.

use std::collections::VecDeque;
use std::time::Duration;

use glide_animation::SharedClock;
use glide_core::{
    GotoRequest, KeyboardEvent, NavigatorError, NavigatorEvent, PointerEvent, SlideCollection,
    SliderConfig, WidgetId,
};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::controls::ThumbnailStrip;
use crate::navigator::{signed, Navigator};
use crate::view::SlideView;

new_key_type! {
    /// Handle to a mounted navigator
    pub struct NavigatorId;
    /// Handle to an attached thumbnail strip
    pub struct ThumbnailId;
}

/// Page-level event subscriber
pub type EventListener = Box<dyn FnMut(&NavigatorEvent)>;

enum PageMessage {
    Goto(GotoRequest),
}

/// Every slider on one page
pub struct PageDispatcher<V> {
    clock: SharedClock,
    navigators: SlotMap<NavigatorId, Navigator<V>>,
    by_widget: FxHashMap<WidgetId, NavigatorId>,
    thumbnails: SlotMap<ThumbnailId, ThumbnailStrip>,
    inbox: VecDeque<PageMessage>,
    outbox: VecDeque<NavigatorEvent>,
    listeners: Vec<EventListener>,
}

impl<V> std::fmt::Debug for PageDispatcher<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageDispatcher")
            .field("navigators", &self.navigators.len())
            .field("thumbnails", &self.thumbnails.len())
            .field("queued", &(self.inbox.len() + self.outbox.len()))
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<V: SlideView> PageDispatcher<V> {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            clock,
            navigators: SlotMap::with_key(),
            by_widget: FxHashMap::default(),
            thumbnails: SlotMap::with_key(),
            inbox: VecDeque::new(),
            outbox: VecDeque::new(),
            listeners: Vec::new(),
        }
    }

    /// Clock shared by every navigator on the page
    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Number of mounted navigators
    pub fn len(&self) -> usize {
        self.navigators.len()
    }

    /// True when nothing is mounted
    pub fn is_empty(&self) -> bool {
        self.navigators.is_empty()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Initialize a slider for the element `widget`
    ///
    /// Elements that cannot host a slider (no scrollable view, too few
    /// slides, duplicate id) are logged and skipped; the rest of the page is
    /// unaffected.
    pub fn mount(
        &mut self,
        widget: impl Into<WidgetId>,
        config: SliderConfig,
        slides: SlideCollection,
        view: Option<V>,
    ) -> Option<NavigatorId> {
        let widget = widget.into();
        if self.by_widget.contains_key(&widget) {
            warn!(widget = %widget, "slider already mounted; skipped");
            return None;
        }

        let navigator = view.ok_or(NavigatorError::MissingView).and_then(|view| {
            Navigator::new(widget.clone(), config, slides, view, self.clock.clone())
        });

        match navigator {
            Ok(navigator) => {
                let id = self.navigators.insert(navigator);
                self.by_widget.insert(widget, id);
                self.collect(id);
                self.pump();
                Some(id)
            }
            Err(err) => {
                warn!(widget = %widget, "slider not initialized: {}", err);
                None
            }
        }
    }

    /// Tear down the slider for `widget`, cancelling its timers
    pub fn unmount(&mut self, widget: &str) -> Option<Navigator<V>> {
        let id = self.by_widget.remove(widget)?;
        let navigator = self.navigators.remove(id)?;
        debug!(widget = %widget, "slider unmounted");
        Some(navigator)
    }

    /// Look up a navigator by handle
    pub fn get(&self, id: NavigatorId) -> Option<&Navigator<V>> {
        self.navigators.get(id)
    }

    /// Look up a navigator by widget id
    pub fn navigator(&self, widget: &str) -> Option<&Navigator<V>> {
        self.by_widget
            .get(widget)
            .and_then(|&id| self.navigators.get(id))
    }

    /// Run `f` against one navigator, then deliver whatever it emitted
    ///
    /// The route for host controls: button clicks, dot activation, scroll
    /// callbacks.
    pub fn with_navigator<R>(
        &mut self,
        widget: &str,
        f: impl FnOnce(&mut Navigator<V>) -> R,
    ) -> Option<R> {
        let id = *self.by_widget.get(widget)?;
        let result = f(self.navigators.get_mut(id)?);
        self.collect(id);
        self.pump();
        Some(result)
    }

    /// Register a page-level listener
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&NavigatorEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // =========================================================================
    // Thumbnails
    // =========================================================================

    /// Attach a thumbnail strip; it starts highlighting its parent's position
    pub fn attach_thumbnails(&mut self, mut strip: ThumbnailStrip) -> ThumbnailId {
        let current = self
            .navigator(strip.parent().as_str())
            .map_or(0, |nav| nav.current_index());
        strip.select(current);
        self.thumbnails.insert(strip)
    }

    /// Look up a thumbnail strip
    pub fn thumbnails(&self, id: ThumbnailId) -> Option<&ThumbnailStrip> {
        self.thumbnails.get(id)
    }

    /// A thumbnail was clicked: highlight it and send `goto` to the parent
    pub fn thumbnail_clicked(&mut self, id: ThumbnailId, index: usize) {
        let Some(strip) = self.thumbnails.get_mut(id) else {
            return;
        };
        strip.select(index);
        let parent = strip.parent().clone();

        let Some(total) = self.navigator(parent.as_str()).map(|nav| nav.total_positions()) else {
            debug!(parent = %parent, "thumbnail parent not mounted");
            return;
        };
        self.post_goto(GotoRequest::new(parent, signed(index % total)));
        self.pump();
    }

    // =========================================================================
    // Routing
    // =========================================================================

    /// Queue a `goto` request for delivery on the next pump
    pub fn post_goto(&mut self, request: GotoRequest) {
        self.inbox.push_back(PageMessage::Goto(request));
    }

    /// Page-wide keyboard input, delivered to hovered navigators only
    pub fn on_key(&mut self, event: &KeyboardEvent) -> bool {
        let mut handled = false;
        for id in self.ids() {
            if let Some(navigator) = self.navigators.get_mut(id) {
                if navigator.is_hovered() {
                    handled |= navigator.on_key(event);
                }
            }
            self.collect(id);
        }
        self.pump();
        handled
    }

    /// Pointer entered or left `widget`
    pub fn on_pointer(&mut self, widget: &str, event: PointerEvent) {
        self.with_navigator(widget, |nav| nav.on_pointer(event));
    }

    /// Native scroll signal from `widget`
    pub fn on_scroll(&mut self, widget: &str) {
        self.with_navigator(widget, |nav| nav.on_scroll());
    }

    /// Scroll-end signal from `widget`
    pub fn on_scroll_end(&mut self, widget: &str) {
        self.with_navigator(widget, |nav| nav.on_scroll_end());
    }

    /// Fire due timers on every navigator
    ///
    /// The page is stepped one deadline at a time across all navigators, so
    /// events from different sliders are delivered in the order they fell
    /// due even when the host ticks late.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        while let Some((id, deadline)) = self.earliest_due(now) {
            if let Some(navigator) = self.navigators.get_mut(id) {
                navigator.tick_until(deadline);
            }
            self.collect(id);
            self.pump();
        }
    }

    fn earliest_due(&self, now: Duration) -> Option<(NavigatorId, Duration)> {
        self.navigators
            .iter()
            .filter_map(|(id, nav)| nav.next_deadline().map(|deadline| (id, deadline)))
            .filter(|(_, deadline)| *deadline <= now)
            .min_by_key(|(_, deadline)| *deadline)
    }

    /// Earliest deadline across the page
    pub fn next_deadline(&self) -> Option<Duration> {
        self.navigators
            .values()
            .filter_map(|nav| nav.next_deadline())
            .min()
    }

    /// Deliver queued messages and events until both queues are empty
    ///
    /// Returns the number of events delivered.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        loop {
            if let Some(message) = self.inbox.pop_front() {
                self.route(message);
                continue;
            }
            let Some(event) = self.outbox.pop_front() else {
                break;
            };
            for strip in self.thumbnails.values_mut() {
                strip.observe(&event);
            }
            for listener in &mut self.listeners {
                listener(&event);
            }
            delivered += 1;
        }
        delivered
    }

    fn route(&mut self, message: PageMessage) {
        match message {
            PageMessage::Goto(request) => {
                let Some(&id) = self.by_widget.get(&request.target_widget_id) else {
                    debug!(target_widget = %request.target_widget_id, "goto for unknown widget");
                    return;
                };
                if let Some(navigator) = self.navigators.get_mut(id) {
                    navigator.handle_goto(&request);
                }
                self.collect(id);
            }
        }
    }

    fn collect(&mut self, id: NavigatorId) {
        if let Some(navigator) = self.navigators.get_mut(id) {
            self.outbox.extend(navigator.drain_events());
        }
    }

    fn ids(&self) -> SmallVec<[NavigatorId; 8]> {
        self.navigators.keys().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingBinding, RecordingView};
    use crate::view::ScrollBehavior;
    use glide_animation::DeterministicClock;
    use glide_core::Key;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    type Log = Rc<RefCell<Vec<NavigatorEvent>>>;

    fn page() -> (PageDispatcher<RecordingView>, Arc<DeterministicClock>, Log) {
        let clock = DeterministicClock::shared();
        let mut page = PageDispatcher::new(clock.clone());
        let log: Log = Rc::default();
        let sink = log.clone();
        page.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        (page, clock, log)
    }

    fn mount(page: &mut PageDispatcher<RecordingView>, widget: &str, config: SliderConfig) {
        let view = RecordingView::new(5, 300.0);
        page.mount(widget, config, SlideCollection::sequential(5), Some(view))
            .unwrap();
    }

    fn changes(log: &Log) -> Vec<(String, usize, usize)> {
        log.borrow()
            .iter()
            .filter_map(|e| {
                e.change()
                    .map(|(prev, curr)| (e.source().to_string(), prev, curr))
            })
            .collect()
    }

    #[test]
    fn test_mount_emits_ready() {
        let (mut page, _, log) = page();
        mount(&mut page, "hero", SliderConfig::default());
        assert_eq!(page.len(), 1);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].name(), "ready");
    }

    #[test]
    fn test_unusable_elements_are_skipped() {
        let (mut page, _, log) = page();
        let two = SlideCollection::sequential(2);

        let missing = page.mount("a", SliderConfig::default(), two.clone(), None);
        assert_eq!(missing, None);

        let single = page.mount(
            "b",
            SliderConfig::default(),
            SlideCollection::sequential(1),
            Some(RecordingView::new(1, 300.0)),
        );
        assert_eq!(single, None);

        let ok = page.mount(
            "c",
            SliderConfig::default(),
            two.clone(),
            Some(RecordingView::new(2, 300.0)),
        );
        assert!(ok.is_some());
        let duplicate = page.mount(
            "c",
            SliderConfig::default(),
            two,
            Some(RecordingView::new(2, 300.0)),
        );
        assert_eq!(duplicate, None);

        assert_eq!(page.len(), 1);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_keyboard_reaches_hovered_slider_only() {
        let (mut page, _, log) = page();
        mount(&mut page, "a", SliderConfig::default());
        mount(&mut page, "b", SliderConfig::default());

        assert!(!page.on_key(&KeyboardEvent::pressed(Key::ArrowRight)));

        page.on_pointer("b", PointerEvent::Entered);
        assert!(page.on_key(&KeyboardEvent::pressed(Key::ArrowRight)));

        assert_eq!(page.navigator("a").map(|n| n.current_index()), Some(0));
        assert_eq!(page.navigator("b").map(|n| n.current_index()), Some(1));
        assert_eq!(changes(&log), vec![("b".to_string(), 0, 1)]);
    }

    #[test]
    fn test_goto_is_queued_until_pump() {
        let (mut page, _, log) = page();
        mount(&mut page, "hero", SliderConfig::default());
        log.borrow_mut().clear();

        page.post_goto(GotoRequest::new("hero", 3));
        assert_eq!(page.navigator("hero").map(|n| n.current_index()), Some(0));

        page.pump();
        assert_eq!(changes(&log), vec![("hero".to_string(), 0, 3)]);
        let behavior = page
            .navigator("hero")
            .and_then(|n| n.view().last_command())
            .map(|c| c.behavior);
        assert_eq!(behavior, Some(ScrollBehavior::Instant));
    }

    #[test]
    fn test_goto_for_other_widget_is_ignored() {
        let (mut page, _, log) = page();
        mount(&mut page, "hero", SliderConfig::default());
        log.borrow_mut().clear();

        page.post_goto(GotoRequest::new("nobody", 2));
        assert_eq!(page.pump(), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(page.navigator("hero").map(|n| n.current_index()), Some(0));
    }

    #[test]
    fn test_thumbnails_drive_and_follow_parent() {
        let (mut page, _, log) = page();
        mount(&mut page, "gallery", SliderConfig::default());
        mount(&mut page, "other", SliderConfig::default());

        let binding = RecordingBinding::new(5);
        let thumbs = page.attach_thumbnails(ThumbnailStrip::new(
            "gallery",
            Box::new(binding.clone()),
        ));
        assert_eq!(binding.active(), Some(0));

        page.thumbnail_clicked(thumbs, 3);
        assert_eq!(
            page.navigator("gallery").map(|n| n.current_index()),
            Some(3)
        );
        assert!(changes(&log).contains(&("gallery".to_string(), 0, 3)));

        page.with_navigator("other", |nav| nav.next());
        assert_eq!(page.thumbnails(thumbs).and_then(|t| t.selected()), Some(3));

        page.with_navigator("gallery", |nav| nav.previous());
        assert_eq!(page.thumbnails(thumbs).and_then(|t| t.selected()), Some(2));
        assert_eq!(binding.active(), Some(2));
    }

    #[test]
    fn test_tick_drives_every_slider_in_order() {
        let (mut page, clock, log) = page();
        mount(&mut page, "fast", SliderConfig::default().speed(1.0));
        mount(&mut page, "slow", SliderConfig::default().speed(3.0));
        mount(&mut page, "still", SliderConfig::default());

        assert_eq!(page.next_deadline(), Some(Duration::from_secs(1)));

        clock.advance_ms(3000);
        page.tick();

        let fast = changes(&log)
            .into_iter()
            .filter(|(w, _, _)| w == "fast")
            .count();
        let slow = changes(&log)
            .into_iter()
            .filter(|(w, _, _)| w == "slow")
            .count();
        assert_eq!((fast, slow), (3, 1));
        assert_eq!(page.navigator("still").map(|n| n.current_index()), Some(0));
    }

    #[test]
    fn test_late_tick_delivers_in_deadline_order() {
        let (mut page, clock, log) = page();
        mount(&mut page, "slow", SliderConfig::default().speed(3.0));
        mount(&mut page, "fast", SliderConfig::default().speed(1.0));
        log.borrow_mut().clear();

        clock.advance_ms(3000);
        page.tick();

        let delivered: Vec<_> = log
            .borrow()
            .iter()
            .filter(|e| e.change().is_some())
            .map(|e| e.to_string())
            .collect();
        assert_eq!(
            delivered,
            vec![
                "fast: changed 0 -> 1",
                "fast: changed 1 -> 2",
                "slow: changed 0 -> 1",
                "fast: changed 2 -> 3",
            ]
        );
        assert_eq!(page.next_deadline(), Some(Duration::from_millis(3300)));
    }

    #[test]
    fn test_thumbnail_index_wraps_into_parent_range() {
        let (mut page, _, _) = page();
        mount(&mut page, "gallery", SliderConfig::default());
        let thumbs = page.attach_thumbnails(ThumbnailStrip::new(
            "gallery",
            Box::new(RecordingBinding::new(5)),
        ));

        page.thumbnail_clicked(thumbs, usize::MAX);
        // usize::MAX is a multiple of 5
        assert_eq!(page.navigator("gallery").map(|n| n.current_index()), Some(0));

        page.thumbnail_clicked(thumbs, 7);
        assert_eq!(page.navigator("gallery").map(|n| n.current_index()), Some(2));
        assert_eq!(page.thumbnails(thumbs).and_then(|t| t.selected()), Some(2));
    }

    #[test]
    fn test_unmount_stops_routing() {
        let (mut page, clock, log) = page();
        mount(&mut page, "hero", SliderConfig::default().speed(1.0));
        assert!(page.unmount("hero").is_some());
        assert!(page.is_empty());
        log.borrow_mut().clear();

        clock.advance_ms(5000);
        page.tick();
        page.post_goto(GotoRequest::new("hero", 1));
        page.pump();
        assert!(log.borrow().is_empty());
        assert_eq!(page.next_deadline(), None);
    }
}
