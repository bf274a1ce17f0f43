//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use shapeboard_core::document::Document;
use shapeboard_core::shapes::{ShapeId, ShapeKind};
use shapeboard_core::tools::Tool;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The document to render.
    pub document: &'a Document,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Hover highlight color.
    pub highlight_color: Color,
    /// Shape currently hovered or dragged, if any.
    pub hovered: Option<ShapeId>,
    /// Active tool, for the palette HUD.
    pub tool: Tool,
    /// Palette kind selection, for the palette HUD.
    pub selected_kind: Option<ShapeKind>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(document: &'a Document, viewport_size: Size) -> Self {
        Self {
            document,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            highlight_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            hovered: None,
            tool: Tool::Select,
            selected_kind: None,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the hovered shape.
    pub fn with_hovered(mut self, hovered: Option<ShapeId>) -> Self {
        self.hovered = hovered;
        self
    }

    /// Set the tool state shown in the palette HUD.
    pub fn with_tool(mut self, tool: Tool, selected_kind: Option<ShapeKind>) -> Self {
        self.tool = tool;
        self.selected_kind = selected_kind;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
