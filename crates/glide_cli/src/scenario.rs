//! Scripted slider scenarios
//!
//! A scenario is a TOML file describing one slider over a simulated strip
//! and a list of steps to apply to it:
//!
//! ```toml
//! id = "hero"
//! slides = 5
//! slideExtent = 400.0
//!
//! [config]
//! sliderSpeed = 2.0
//!
//! [[steps]]
//! action = "advance"
//! ms = 4500
//! ```

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use glide_animation::{Clock, DeterministicClock};
use glide_core::{
    GotoRequest, Key, KeyboardEvent, NavigatorEvent, PointerEvent, SlideCollection, SliderConfig,
};
use glide_slider::testing::RecordingView;
use glide_slider::PageDispatcher;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default = "default_id")]
    pub id: String,
    pub slides: usize,
    #[serde(default = "default_extent")]
    pub slide_extent: f32,
    #[serde(default)]
    pub config: SliderConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_id() -> String {
    "slider".to_string()
}

fn default_extent() -> f32 {
    400.0
}

/// One host stimulus
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Next,
    Previous,
    Goto { index: usize },
    Dot { index: usize },
    /// Cross-widget `goto`, possibly addressed to another widget
    External { target: String, index: isize },
    /// Native scroll to an absolute offset
    Scroll { offset: f32 },
    ScrollEnd,
    Hover,
    Leave,
    /// DOM key name, e.g. `ArrowRight`
    Key { key: String },
    Advance { ms: u64 },
}

/// An event and the simulated time it was delivered at
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub at: Duration,
    pub event: NavigatorEvent,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply every step and collect the delivered events
    pub fn run(&self) -> Result<Vec<Recorded>> {
        let clock = DeterministicClock::shared();
        let mut page = PageDispatcher::new(clock.clone());

        let log: Rc<RefCell<Vec<Recorded>>> = Rc::default();
        let sink = log.clone();
        let stamp = clock.clone();
        page.subscribe(move |event| {
            sink.borrow_mut().push(Recorded {
                at: stamp.now(),
                event: event.clone(),
            })
        });

        // Size the strip the way the navigator will see it
        let (effective, _) = self.config.normalized();
        let view = RecordingView::new(self.slides, self.slide_extent)
            .with_visible(effective.per_view);
        page.mount(
            self.id.as_str(),
            self.config.clone(),
            SlideCollection::sequential(self.slides),
            Some(view),
        )
        .with_context(|| format!("Slider '{}' could not be initialized", self.id))?;

        let id = self.id.as_str();
        for step in &self.steps {
            debug!(?step, "step");
            match step {
                Step::Next => {
                    page.with_navigator(id, |nav| nav.next());
                }
                Step::Previous => {
                    page.with_navigator(id, |nav| nav.previous());
                }
                Step::Goto { index } => {
                    page.with_navigator(id, |nav| nav.go_to(*index));
                }
                Step::Dot { index } => {
                    page.with_navigator(id, |nav| nav.dot_activated(*index));
                }
                Step::External { target, index } => {
                    page.post_goto(GotoRequest::new(target.as_str(), *index));
                    page.pump();
                }
                Step::Scroll { offset } => {
                    page.with_navigator(id, |nav| {
                        let axis = nav.config().direction;
                        nav.view_mut().set_scroll_offset(axis, *offset);
                        nav.on_scroll();
                    });
                }
                Step::ScrollEnd => page.on_scroll_end(id),
                Step::Hover => page.on_pointer(id, PointerEvent::Entered),
                Step::Leave => page.on_pointer(id, PointerEvent::Left),
                Step::Key { key } => {
                    page.on_key(&KeyboardEvent::pressed(Key::from_dom_key(key)));
                }
                Step::Advance { ms } => advance(&mut page, &clock, Duration::from_millis(*ms)),
            }
        }

        let recorded = log.borrow().clone();
        Ok(recorded)
    }
}

/// Move the clock forward, stopping at every deadline on the way
fn advance(page: &mut PageDispatcher<RecordingView>, clock: &DeterministicClock, by: Duration) {
    let target = clock.now() + by;
    while let Some(deadline) = page.next_deadline().filter(|d| *d <= target) {
        clock.set(deadline.max(clock.now()));
        page.tick();
    }
    clock.set(target);
    page.tick();
}
