//! Pointer input tracking and double-click detection.

use kurbo::Point;
use std::collections::HashSet;
use std::time::Instant;

/// Maximum delay between two presses that form a double-click.
pub const DOUBLE_CLICK_TIME_MS: u128 = 500;
/// Maximum pointer travel between two presses that form a double-click.
pub const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Pointer buttons tracked by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Raw pointer state as reported by the windowing layer.
#[derive(Debug)]
pub struct InputState {
    position: Point,
    pressed: HashSet<PointerButton>,
    /// Time and position of the previous left press, for double-click
    /// detection.
    last_click: Option<(Instant, Point)>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            position: Point::ZERO,
            pressed: HashSet::new(),
            last_click: None,
        }
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_pressed(&self, button: PointerButton) -> bool {
        self.pressed.contains(&button)
    }

    /// Record a button press. Returns `true` when a left press completes a
    /// double-click (two presses within the time and distance thresholds).
    ///
    /// A completed double-click resets the tracking, so a triple-click
    /// counts as a double followed by a single.
    pub fn press(&mut self, button: PointerButton) -> bool {
        self.pressed.insert(button);
        if button != PointerButton::Left {
            return false;
        }

        let now = Instant::now();
        let is_double = self.last_click.is_some_and(|(time, position)| {
            now.duration_since(time).as_millis() <= DOUBLE_CLICK_TIME_MS
                && self.position.distance(position) <= DOUBLE_CLICK_DISTANCE
        });

        self.last_click = if is_double {
            None
        } else {
            Some((now, self.position))
        };
        is_double
    }

    /// Drop double-click tracking. Called after a press that placed a
    /// shape, so a rapid second click on it cannot count as a double-click
    /// and delete what was just placed.
    pub fn clear_click(&mut self) {
        self.last_click = None;
    }

    pub fn release(&mut self, button: PointerButton) {
        self.pressed.remove(&button);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_tracking() {
        let mut input = InputState::new();
        assert!(!input.is_pressed(PointerButton::Left));
        input.press(PointerButton::Left);
        assert!(input.is_pressed(PointerButton::Left));
        input.release(PointerButton::Left);
        assert!(!input.is_pressed(PointerButton::Left));
    }

    #[test]
    fn test_double_click_same_spot() {
        let mut input = InputState::new();
        input.set_position(Point::new(100.0, 100.0));
        assert!(!input.press(PointerButton::Left));
        input.release(PointerButton::Left);
        assert!(input.press(PointerButton::Left));
    }

    #[test]
    fn test_double_click_within_distance() {
        let mut input = InputState::new();
        input.set_position(Point::new(100.0, 100.0));
        assert!(!input.press(PointerButton::Left));
        input.set_position(Point::new(103.0, 100.0));
        assert!(input.press(PointerButton::Left));
    }

    #[test]
    fn test_no_double_click_when_far_apart() {
        let mut input = InputState::new();
        input.set_position(Point::new(100.0, 100.0));
        assert!(!input.press(PointerButton::Left));
        input.set_position(Point::new(200.0, 100.0));
        assert!(!input.press(PointerButton::Left));
    }

    #[test]
    fn test_triple_click_is_double_then_single() {
        let mut input = InputState::new();
        input.set_position(Point::new(50.0, 50.0));
        assert!(!input.press(PointerButton::Left));
        assert!(input.press(PointerButton::Left));
        assert!(!input.press(PointerButton::Left));
    }

    #[test]
    fn test_clear_click_disarms_double_click() {
        let mut input = InputState::new();
        input.set_position(Point::new(50.0, 50.0));
        assert!(!input.press(PointerButton::Left));
        input.release(PointerButton::Left);
        input.clear_click();
        // A rapid second click at the same spot starts a fresh sequence.
        assert!(!input.press(PointerButton::Left));
        input.release(PointerButton::Left);
        assert!(input.press(PointerButton::Left));
    }

    #[test]
    fn test_right_button_never_double_clicks() {
        let mut input = InputState::new();
        input.set_position(Point::new(10.0, 10.0));
        assert!(!input.press(PointerButton::Right));
        assert!(!input.press(PointerButton::Right));
    }
}
