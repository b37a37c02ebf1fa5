//! Error and diagnostic types
//!
//! Three tiers, from fatal to cosmetic:
//!
//! - [`NavigatorError`] - initialization cannot proceed, the widget is skipped
//! - [`ConfigError`] - a single attribute value is malformed
//! - [`Diagnostic`] - a recoverable mismatch; the offending feature is disabled

use thiserror::Error;

/// Malformed configuration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Attribute expected a non-negative integer
    #[error("invalid integer for `{attribute}`: {value:?}")]
    InvalidInteger {
        /// Attribute name
        attribute: &'static str,
        /// Raw attribute value
        value: String,
    },

    /// Direction was neither `horizontal` nor `vertical`
    #[error("invalid slider direction {0:?} (expected `horizontal` or `vertical`)")]
    InvalidDirection(String),

    /// Attribute expected `true` or `false`
    #[error("invalid boolean for `{attribute}`: {value:?}")]
    InvalidBoolean {
        /// Attribute name
        attribute: &'static str,
        /// Raw attribute value
        value: String,
    },

    /// Speed was negative, non-finite or not a number
    #[error("invalid slider speed {0:?} (expected seconds >= 0)")]
    InvalidSpeed(String),

    /// Per-view was zero
    #[error("per-view must be at least 1")]
    PerViewZero,
}

/// Unrecoverable initialization failures
///
/// When one of these is returned the widget must not be wired at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigatorError {
    /// Not enough slides for navigation to mean anything
    #[error("slider needs at least {required} slides, found {found}")]
    TooFewSlides {
        /// Slides present in the collection
        found: usize,
        /// Minimum required
        required: usize,
    },

    /// The host element has no scrollable view
    #[error("slider has no scrollable view")]
    MissingView,
}

/// Result type for navigator construction
pub type Result<T> = std::result::Result<T, NavigatorError>;

/// Recoverable configuration mismatches
///
/// Reported through `tracing` and retained on the navigator. The widget keeps
/// working with the offending optional feature switched off.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// External navigation list does not line up with the slides
    #[error("navigation has {items} items but the slider has {slides} slides; navigation disabled")]
    NavigationCountMismatch {
        /// Navigation item count
        items: usize,
        /// Slide count
        slides: usize,
    },

    /// External navigation only works with one slide per view
    #[error("navigation is not supported with per-view {per_view}; navigation disabled")]
    NavigationWithMultiplePerView {
        /// Configured per-view
        per_view: usize,
    },

    /// Preview style cannot show several slides at once
    #[error("preview style is not compatible with per-view {per_view}; using 1")]
    PreviewStyleWithMultiplePerView {
        /// Configured per-view
        per_view: usize,
    },

    /// An attribute was malformed and its default was used
    #[error("attribute ignored: {0}")]
    InvalidAttribute(ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_messages() {
        let diag = Diagnostic::NavigationCountMismatch {
            items: 3,
            slides: 5,
        };
        assert_eq!(
            diag.to_string(),
            "navigation has 3 items but the slider has 5 slides; navigation disabled"
        );

        let wrapped = Diagnostic::InvalidAttribute(ConfigError::PerViewZero);
        assert_eq!(
            wrapped.to_string(),
            "attribute ignored: per-view must be at least 1"
        );
    }

    #[test]
    fn test_too_few_slides_message() {
        let err = NavigatorError::TooFewSlides {
            found: 1,
            required: 2,
        };
        assert_eq!(err.to_string(), "slider needs at least 2 slides, found 1");
    }
}
