//! Tool selection state.

use crate::shapes::ShapeKind;

/// The active canvas tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Place, hover, and drag shapes.
    #[default]
    Select,
    /// Remove the shape under the pointer on press.
    Erase,
}

/// Tracks the active tool and the palette's shape-kind selection.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    tool: Tool,
    selected_kind: Option<ShapeKind>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. The kind selection survives a tool switch.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        let changed = self.tool != tool;
        self.tool = tool;
        changed
    }

    pub fn selected_kind(&self) -> Option<ShapeKind> {
        self.selected_kind
    }

    /// Toggle the palette selection: picking the active kind deselects it.
    pub fn toggle_kind(&mut self, kind: ShapeKind) {
        self.selected_kind = if self.selected_kind == Some(kind) {
            None
        } else {
            Some(kind)
        };
    }

    pub fn clear_kind(&mut self) {
        self.selected_kind = None;
    }
}
