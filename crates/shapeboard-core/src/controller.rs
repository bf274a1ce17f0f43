//! Pointer interaction state machine.
//!
//! Translates pointer events into document mutations. Always operates on
//! the store and tool state passed in, never on a snapshot, so tool or
//! document changes between events are picked up immediately.

use crate::document::DocumentStore;
use crate::shapes::ShapeId;
use crate::tools::{Tool, ToolManager};
use kurbo::{Point, Vec2};

/// Where the pointer interaction currently stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerState {
    Idle,
    /// Pointer rests on a shape; the shell draws a highlight.
    Hovering(ShapeId),
    /// A shape follows the pointer. `offset` is pointer minus shape center,
    /// captured at press, so an off-center grab keeps its grip.
    Dragging { id: ShapeId, offset: Vec2 },
}

#[derive(Debug, Default)]
pub struct Controller {
    state: PointerState,
}

impl Default for PointerState {
    fn default() -> Self {
        PointerState::Idle
    }
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Shape to highlight, if any. The dragged shape stays highlighted.
    pub fn hovered(&self) -> Option<ShapeId> {
        match self.state {
            PointerState::Idle => None,
            PointerState::Hovering(id) => Some(id),
            PointerState::Dragging { id, .. } => Some(id),
        }
    }

    /// Forget any hover or drag, e.g. after the document was replaced.
    pub fn reset(&mut self) {
        self.state = PointerState::Idle;
    }

    fn hover_at(&self, point: Point, store: &DocumentStore) -> PointerState {
        match store.document().shape_at(point) {
            Some(shape) => PointerState::Hovering(shape.id),
            None => PointerState::Idle,
        }
    }

    /// Handle a left press at `point`.
    ///
    /// Select tool: start dragging the shape under the pointer, or place a
    /// new shape of the selected kind on empty canvas. With no kind
    /// selected, an empty-canvas press changes nothing.
    /// Erase tool: remove the shape under the pointer.
    ///
    /// Returns `true` when the press placed a new shape, so the shell can
    /// keep the placement press out of double-click tracking.
    pub fn pointer_pressed(
        &mut self,
        point: Point,
        store: &mut DocumentStore,
        tools: &ToolManager,
    ) -> bool {
        match tools.tool() {
            Tool::Select => {
                if let Some(shape) = store.document().shape_at(point) {
                    let id = shape.id;
                    let offset = point - shape.center;
                    self.state = PointerState::Dragging { id, offset };
                } else if let Some(kind) = tools.selected_kind() {
                    let id = store.add_shape(kind, point);
                    self.state = PointerState::Hovering(id);
                    return true;
                }
            }
            Tool::Erase => {
                if let Some(id) = store.document().shape_at(point).map(|s| s.id) {
                    store.remove_shape(id);
                    self.state = self.hover_at(point, store);
                }
            }
        }
        false
    }

    /// Handle pointer motion. While dragging, the grabbed shape tracks the
    /// pointer minus the grab offset; the resulting mutation notifies the
    /// repaint subscriber. Otherwise the hover target is re-resolved and
    /// the return value says whether the highlight changed.
    pub fn pointer_moved(&mut self, point: Point, store: &mut DocumentStore) -> bool {
        match self.state {
            PointerState::Dragging { id, offset } => {
                if !store.move_shape(id, point - offset) {
                    // Shape vanished mid-drag (erased or replaced).
                    self.state = PointerState::Idle;
                }
                false
            }
            _ => {
                let next = self.hover_at(point, store);
                let changed = next != self.state;
                self.state = next;
                changed
            }
        }
    }

    /// Handle a left release. Ends any drag and re-resolves the hover at
    /// the release point. Returns whether the highlight changed.
    pub fn pointer_released(&mut self, point: Point, store: &DocumentStore) -> bool {
        if let PointerState::Dragging { .. } = self.state {
            self.state = self.hover_at(point, store);
            true
        } else {
            false
        }
    }

    /// The pointer left the canvas: drop drag and hover state.
    pub fn pointer_left(&mut self) -> bool {
        let changed = self.state != PointerState::Idle;
        self.state = PointerState::Idle;
        changed
    }

    /// Double-click removes the shape under the pointer regardless of the
    /// active tool. Returns whether a shape was removed.
    pub fn double_click(&mut self, point: Point, store: &mut DocumentStore) -> bool {
        let Some(id) = store.document().shape_at(point).map(|s| s.id) else {
            return false;
        };
        store.remove_shape(id);
        // A shape further down the stack may now be under the pointer.
        self.state = self.hover_at(point, store);
        true
    }
}
