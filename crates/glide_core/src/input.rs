//! Host input events for keyboard and pointer

use crate::config::Axis;

/// Keys the navigator cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    /// Any other key
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Enter" => Key::Enter,
            _ => Key::Other,
        }
    }

    /// Navigation direction of this key on `axis`
    ///
    /// Horizontal strips respond to left/right. Vertical strips respond to
    /// up/down and also keep left/right working.
    pub fn direction(self, axis: Axis) -> Option<Direction> {
        match (self, axis) {
            (Key::ArrowLeft, _) => Some(Direction::Previous),
            (Key::ArrowRight, _) => Some(Direction::Next),
            (Key::ArrowUp, Axis::Vertical) => Some(Direction::Previous),
            (Key::ArrowDown, Axis::Vertical) => Some(Direction::Next),
            _ => None,
        }
    }
}

/// Relative navigation direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

/// Key press/release state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key was pressed
    Pressed,
    /// Key was released
    Released,
}

/// Keyboard event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed or released
    pub key: Key,
    /// Whether the key was pressed or released
    pub state: KeyState,
}

impl KeyboardEvent {
    /// A key press
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
        }
    }
}

/// Pointer crossing the widget boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer entered the widget
    Entered,
    /// Pointer left the widget
    Left,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_keys() {
        assert_eq!(Key::from_dom_key("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom_key("Left"), Key::ArrowLeft);
        assert_eq!(Key::from_dom_key("a"), Key::Other);
    }

    #[test]
    fn test_horizontal_ignores_vertical_arrows() {
        assert_eq!(Key::ArrowUp.direction(Axis::Horizontal), None);
        assert_eq!(
            Key::ArrowRight.direction(Axis::Horizontal),
            Some(Direction::Next)
        );
    }

    #[test]
    fn test_vertical_accepts_both_pairs() {
        assert_eq!(
            Key::ArrowDown.direction(Axis::Vertical),
            Some(Direction::Next)
        );
        assert_eq!(
            Key::ArrowLeft.direction(Axis::Vertical),
            Some(Direction::Previous)
        );
        assert_eq!(Key::Enter.direction(Axis::Vertical), None);
    }
}
