//! Slider configuration
//!
//! A [`SliderConfig`] is fixed for the lifetime of a navigator. It can be
//! built three ways:
//!
//! - in code, starting from [`SliderConfig::default()`]
//! - from the host element's `data-*` attributes via [`SliderConfig::from_attributes`]
//!   (lenient: bad values fall back to defaults and produce diagnostics) or
//!   [`SliderConfig::parse_attributes`] (strict)
//! - through serde, using the camelCase attribute names (`perView`, `sliderSpeed`, ...)
//!
//! Moving past either end always wraps around; there is no non-looping mode.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, Diagnostic};

/// Host attribute names
pub mod attributes {
    /// Slides visible (and advanced) per step
    pub const PER_VIEW: &str = "data-per-view";
    /// Starting position
    pub const INITIAL_SLIDE: &str = "data-initial-slide";
    /// `horizontal` or `vertical`
    pub const SLIDER_DIRECTION: &str = "data-slider-direction";
    /// Auto-advance interval in seconds, 0 disables
    pub const SLIDER_SPEED: &str = "data-slider-speed";
    /// Render previous/next buttons
    pub const SHOW_BUTTONS: &str = "data-show-buttons";
    /// Render dot indicators
    pub const SHOW_DOTS: &str = "data-show-dots";
    /// Visual style (`preview` restricts per-view to 1)
    pub const SLIDER_STYLE: &str = "data-slider-style";
    /// Set on an external navigation list, naming the widget it drives
    pub const NAV_FOR: &str = "data-swift-nav-for";
}

/// Shortest auto-advance interval honored; faster speeds are raised to this
pub const MIN_AUTO_ADVANCE_INTERVAL: Duration = Duration::from_millis(100);

/// Scroll axis of the slide strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Axis::Horizontal),
            "vertical" => Ok(Axis::Vertical),
            _ => Err(ConfigError::InvalidDirection(value.to_string())),
        }
    }
}

/// Visual style of the slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderStyle {
    #[default]
    Standard,
    /// Neighbouring slides peek in; only one slide per view
    Preview,
}

impl SliderStyle {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("preview") {
            SliderStyle::Preview
        } else {
            SliderStyle::Standard
        }
    }
}

/// Immutable navigator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderConfig {
    /// Slides visible per view (>= 1)
    pub per_view: usize,
    /// Starting position, wrapped into range at construction
    pub initial_slide: usize,
    /// Scroll axis
    #[serde(rename = "sliderDirection")]
    pub direction: Axis,
    /// Auto-advance interval in seconds (0 = disabled)
    #[serde(rename = "sliderSpeed")]
    pub speed: f64,
    /// Whether the host should render previous/next buttons
    pub show_buttons: bool,
    /// Whether the host should render dot indicators
    pub show_dots: bool,
    /// Visual style
    #[serde(rename = "sliderStyle")]
    pub style: SliderStyle,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            per_view: 1,
            initial_slide: 0,
            direction: Axis::Horizontal,
            speed: 0.0,
            show_buttons: false,
            show_dots: false,
            style: SliderStyle::Standard,
        }
    }
}

impl SliderConfig {
    /// Set slides per view
    pub fn per_view(mut self, per_view: usize) -> Self {
        self.per_view = per_view;
        self
    }

    /// Set the starting position
    pub fn initial_slide(mut self, index: usize) -> Self {
        self.initial_slide = index;
        self
    }

    /// Set the scroll axis
    pub fn direction(mut self, axis: Axis) -> Self {
        self.direction = axis;
        self
    }

    /// Set the auto-advance interval in seconds
    pub fn speed(mut self, seconds: f64) -> Self {
        self.speed = seconds;
        self
    }

    /// Show or hide previous/next buttons
    pub fn show_buttons(mut self, show: bool) -> Self {
        self.show_buttons = show;
        self
    }

    /// Show or hide dot indicators
    pub fn show_dots(mut self, show: bool) -> Self {
        self.show_dots = show;
        self
    }

    /// Set the visual style
    pub fn style(mut self, style: SliderStyle) -> Self {
        self.style = style;
        self
    }

    /// Auto-advance interval, or `None` when disabled
    pub fn auto_advance_interval(&self) -> Option<Duration> {
        if self.speed.is_finite() && self.speed > 0.0 {
            Some(Duration::from_secs_f64(self.speed).max(MIN_AUTO_ADVANCE_INTERVAL))
        } else {
            None
        }
    }

    /// Resolve style/per-view conflicts
    ///
    /// Preview style forces a single slide per view; per-view 0 becomes 1.
    pub fn normalized(&self) -> (Self, Vec<Diagnostic>) {
        let mut config = self.clone();
        let mut diagnostics = Vec::new();

        if config.per_view == 0 {
            diagnostics.push(Diagnostic::InvalidAttribute(ConfigError::PerViewZero));
            config.per_view = 1;
        }

        if config.style == SliderStyle::Preview && config.per_view > 1 {
            diagnostics.push(Diagnostic::PreviewStyleWithMultiplePerView {
                per_view: config.per_view,
            });
            config.per_view = 1;
        }

        (config, diagnostics)
    }

    /// Parse host attributes, failing on the first malformed value
    pub fn parse_attributes<'a, F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut config = Self::default();
        for field in Field::ALL {
            if let Some(raw) = lookup(field.attribute()) {
                field.apply(&mut config, raw)?;
            }
        }
        Ok(config)
    }

    /// Parse host attributes, replacing malformed values with defaults
    ///
    /// Every rejected value is logged and returned as a [`Diagnostic`].
    pub fn from_attributes<'a, F>(lookup: F) -> (Self, Vec<Diagnostic>)
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut config = Self::default();
        let mut diagnostics = Vec::new();
        for field in Field::ALL {
            let Some(raw) = lookup(field.attribute()) else {
                continue;
            };
            if let Err(err) = field.apply(&mut config, raw) {
                warn!(attribute = field.attribute(), "{}", err);
                diagnostics.push(Diagnostic::InvalidAttribute(err));
            }
        }
        (config, diagnostics)
    }
}

#[derive(Clone, Copy)]
enum Field {
    PerView,
    InitialSlide,
    Direction,
    Speed,
    ShowButtons,
    ShowDots,
    Style,
}

impl Field {
    const ALL: [Field; 7] = [
        Field::PerView,
        Field::InitialSlide,
        Field::Direction,
        Field::Speed,
        Field::ShowButtons,
        Field::ShowDots,
        Field::Style,
    ];

    fn attribute(self) -> &'static str {
        match self {
            Field::PerView => attributes::PER_VIEW,
            Field::InitialSlide => attributes::INITIAL_SLIDE,
            Field::Direction => attributes::SLIDER_DIRECTION,
            Field::Speed => attributes::SLIDER_SPEED,
            Field::ShowButtons => attributes::SHOW_BUTTONS,
            Field::ShowDots => attributes::SHOW_DOTS,
            Field::Style => attributes::SLIDER_STYLE,
        }
    }

    fn apply(self, config: &mut SliderConfig, raw: &str) -> Result<(), ConfigError> {
        match self {
            Field::PerView => {
                let per_view = parse_count(self.attribute(), raw)?;
                if per_view == 0 {
                    return Err(ConfigError::PerViewZero);
                }
                config.per_view = per_view;
            }
            Field::InitialSlide => config.initial_slide = parse_count(self.attribute(), raw)?,
            Field::Direction => config.direction = Axis::parse(raw)?,
            Field::Speed => config.speed = parse_speed(raw)?,
            Field::ShowButtons => config.show_buttons = parse_flag(self.attribute(), raw)?,
            Field::ShowDots => config.show_dots = parse_flag(self.attribute(), raw)?,
            Field::Style => config.style = SliderStyle::parse(raw),
        }
        Ok(())
    }
}

fn parse_count(attribute: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidInteger {
            attribute,
            value: raw.to_string(),
        })
}

fn parse_speed(raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
        _ => Err(ConfigError::InvalidSpeed(raw.to_string())),
    }
}

fn parse_flag(attribute: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBoolean {
            attribute,
            value: raw.to_string(),
        }),
    }
}
