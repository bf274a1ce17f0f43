//! Vello-based renderer implementation.

use crate::hud::{palette_layout, HudAction, HudButton};
use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape, Stroke};
use peniko::{Color, Fill};
use shapeboard_core::color::Rgb;
use shapeboard_core::shapes::{Shape, ShapeKind};
use shapeboard_core::tools::Tool;
use vello::Scene;

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255)
}

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Hover highlight color.
    highlight_color: Color,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            highlight_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Render one shape: color fill, thin outline, and the highlight
    /// stroke when it is the hover target.
    fn render_shape(&mut self, shape: &Shape, hovered: bool) {
        let path = shape.to_path();

        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            to_color(shape.color),
            None,
            &path,
        );

        let outline = Stroke::new(1.5);
        self.scene.stroke(
            &outline,
            Affine::IDENTITY,
            Color::from_rgba8(60, 60, 60, 255),
            None,
            &path,
        );

        if hovered {
            self.scene.stroke(
                &Stroke::new(3.0),
                Affine::IDENTITY,
                self.highlight_color,
                None,
                &path,
            );
        }
    }

    /// Paint the tool palette along the left edge. Active entries get the
    /// highlight outline.
    fn render_hud(&mut self, ctx: &RenderContext) {
        for button in palette_layout(ctx.viewport_size) {
            let active = match button.action {
                HudAction::PickKind(kind) => {
                    ctx.tool == Tool::Select && ctx.selected_kind == Some(kind)
                }
                HudAction::PickTool(tool) => ctx.tool == tool,
            };

            let chrome = button.rect.to_path(0.1);
            self.scene.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                Color::from_rgba8(255, 255, 255, 235),
                None,
                &chrome,
            );
            let border = if active {
                (Stroke::new(2.5), self.highlight_color)
            } else {
                (Stroke::new(1.0), Color::from_rgba8(170, 170, 170, 255))
            };
            self.scene
                .stroke(&border.0, Affine::IDENTITY, border.1, None, &chrome);

            self.render_hud_glyph(&button);
        }
    }

    /// Draw the icon inside one palette button.
    fn render_hud_glyph(&mut self, button: &HudButton) {
        let inner = button.rect.inset(-10.0);
        match button.action {
            HudAction::PickKind(ShapeKind::Square) => {
                self.scene.fill(
                    Fill::NonZero,
                    Affine::IDENTITY,
                    Color::from_rgba8(220, 53, 69, 255),
                    None,
                    &inner.to_path(0.1),
                );
            }
            HudAction::PickKind(ShapeKind::Circle) => {
                let circle = kurbo::Circle::new(inner.center(), inner.width() / 2.0);
                self.scene.fill(
                    Fill::NonZero,
                    Affine::IDENTITY,
                    Color::from_rgba8(40, 167, 69, 255),
                    None,
                    &circle.to_path(0.1),
                );
            }
            HudAction::PickKind(ShapeKind::Triangle) => {
                let mut path = BezPath::new();
                path.move_to(Point::new(inner.center().x, inner.y0));
                path.line_to(Point::new(inner.x0, inner.y1));
                path.line_to(Point::new(inner.x1, inner.y1));
                path.close_path();
                self.scene.fill(
                    Fill::NonZero,
                    Affine::IDENTITY,
                    Color::from_rgba8(255, 193, 7, 255),
                    None,
                    &path,
                );
            }
            HudAction::PickTool(_) => {
                // Crossed strokes for the erase tool.
                let mut path = BezPath::new();
                path.move_to(Point::new(inner.x0, inner.y0));
                path.line_to(Point::new(inner.x1, inner.y1));
                path.move_to(Point::new(inner.x1, inner.y0));
                path.line_to(Point::new(inner.x0, inner.y1));
                self.scene.stroke(
                    &Stroke::new(3.0),
                    Affine::IDENTITY,
                    Color::from_rgba8(108, 117, 125, 255),
                    None,
                    &path,
                );
            }
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Clear the scene
        self.scene.reset();
        self.highlight_color = ctx.highlight_color;

        let background = Rect::new(0.0, 0.0, ctx.viewport_size.width, ctx.viewport_size.height);
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            ctx.background_color,
            None,
            &background,
        );

        // Shapes in insertion order, latest on top.
        for shape in ctx.document.shapes() {
            self.render_shape(shape, ctx.hovered == Some(shape.id));
        }

        self.render_hud(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeboard_core::document::Document;

    fn context(document: &Document) -> RenderContext<'_> {
        RenderContext::new(document, kurbo::Size::new(800.0, 600.0))
    }

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_scene_still_draws_hud() {
        let mut renderer = VelloRenderer::new();
        let document = Document::new();

        renderer.build_scene(&context(&document));
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_shapes() {
        let mut renderer = VelloRenderer::new();
        let mut document = Document::new();
        document.add_shape(ShapeKind::Square, Point::new(100.0, 100.0));
        document.add_shape(ShapeKind::Triangle, Point::new(300.0, 200.0));

        renderer.build_scene(&context(&document));
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_take_scene_resets() {
        let mut renderer = VelloRenderer::new();
        let mut document = Document::new();
        document.add_shape(ShapeKind::Circle, Point::new(50.0, 50.0));

        renderer.build_scene(&context(&document));
        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_hovered_shape_renders_extra_stroke() {
        let mut renderer = VelloRenderer::new();
        let mut document = Document::new();
        let id = document.add_shape(ShapeKind::Circle, Point::new(50.0, 50.0));

        renderer.build_scene(&context(&document));
        let plain_len = renderer.take_scene().encoding().path_tags.len();

        renderer.build_scene(&context(&document).with_hovered(Some(id)));
        let hovered_len = renderer.take_scene().encoding().path_tags.len();

        assert!(hovered_len > plain_len);
    }
}
