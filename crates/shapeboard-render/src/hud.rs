//! Tool-palette HUD layout.
//!
//! The palette geometry lives here so the painter and the shell's click
//! routing agree on where the buttons are.

use kurbo::{Point, Rect, Size};
use shapeboard_core::shapes::ShapeKind;
use shapeboard_core::tools::Tool;

pub const BUTTON_SIZE: f64 = 44.0;
pub const BUTTON_GAP: f64 = 8.0;
pub const PALETTE_MARGIN: f64 = 12.0;

/// What clicking a palette button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudAction {
    /// Toggle the shape-kind selection (and switch to the select tool).
    PickKind(ShapeKind),
    /// Switch to the given tool.
    PickTool(Tool),
}

/// One palette button: its screen rectangle and its action.
#[derive(Debug, Clone, Copy)]
pub struct HudButton {
    pub rect: Rect,
    pub action: HudAction,
}

/// Vertical palette along the left edge: square, circle, triangle, then
/// the erase tool.
pub fn palette_layout(_viewport: Size) -> Vec<HudButton> {
    let actions = [
        HudAction::PickKind(ShapeKind::Square),
        HudAction::PickKind(ShapeKind::Circle),
        HudAction::PickKind(ShapeKind::Triangle),
        HudAction::PickTool(Tool::Erase),
    ];

    actions
        .iter()
        .enumerate()
        .map(|(i, &action)| {
            let y = PALETTE_MARGIN + i as f64 * (BUTTON_SIZE + BUTTON_GAP);
            HudButton {
                rect: Rect::new(
                    PALETTE_MARGIN,
                    y,
                    PALETTE_MARGIN + BUTTON_SIZE,
                    y + BUTTON_SIZE,
                ),
                action,
            }
        })
        .collect()
}

/// Resolve a click against the palette. Returns `None` when the click is
/// on the canvas proper.
pub fn hit_test(point: Point, viewport: Size) -> Option<HudAction> {
    palette_layout(viewport)
        .into_iter()
        .find(|button| {
            point.x >= button.rect.x0
                && point.x <= button.rect.x1
                && point.y >= button.rect.y0
                && point.y <= button.rect.y1
        })
        .map(|button| button.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    #[test]
    fn test_layout_has_one_button_per_action() {
        let buttons = palette_layout(VIEWPORT);
        assert_eq!(buttons.len(), 4);
        for pair in buttons.windows(2) {
            assert!(pair[0].rect.y1 < pair[1].rect.y0);
        }
    }

    #[test]
    fn test_hit_test_button_centers() {
        for button in palette_layout(VIEWPORT) {
            let hit = hit_test(button.rect.center(), VIEWPORT);
            assert_eq!(hit, Some(button.action));
        }
    }

    #[test]
    fn test_hit_test_misses_canvas() {
        assert_eq!(hit_test(Point::new(400.0, 300.0), VIEWPORT), None);
        assert_eq!(hit_test(Point::new(200.0, 20.0), VIEWPORT), None);
    }
}
