//! Document model and the owning store with repaint notification.

use crate::shapes::{Shape, ShapeId, ShapeKind};
use kurbo::Point;
use std::fmt;

/// Title given to a fresh document.
pub const DEFAULT_TITLE: &str = "My Painting";

/// Per-kind shape totals for the stats readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeCounts {
    pub squares: usize,
    pub circles: usize,
    pub triangles: usize,
}

impl ShapeCounts {
    pub fn total(&self) -> usize {
        self.squares + self.circles + self.triangles
    }
}

impl fmt::Display for ShapeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} square{}, {} circle{}, {} triangle{}",
            self.squares,
            if self.squares == 1 { "" } else { "s" },
            self.circles,
            if self.circles == 1 { "" } else { "s" },
            self.triangles,
            if self.triangles == 1 { "" } else { "s" },
        )
    }
}

/// A titled, insertion-ordered collection of shapes.
///
/// Later entries render on top of earlier ones and win hit-testing ties.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    shapes: Vec<Shape>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            shapes: Vec::new(),
        }
    }

    /// Build a document from already-constructed shapes (import path).
    pub fn with_shapes(title: impl Into<String>, shapes: Vec<Shape>) -> Self {
        Self {
            title: title.into(),
            shapes,
        }
    }

    /// Place a new shape of `kind` centered at `center`, on top of all
    /// existing shapes. Returns its id.
    pub fn add_shape(&mut self, kind: ShapeKind, center: Point) -> ShapeId {
        let shape = Shape::new(kind, center);
        let id = shape.id;
        self.shapes.push(shape);
        id
    }

    /// Remove a shape by id. Returns the removed shape, or `None` if the id
    /// is unknown.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        Some(self.shapes.remove(index))
    }

    /// Recenter a shape. Size, color, and stacking order are untouched.
    /// Returns `false` if the id is unknown.
    pub fn move_shape(&mut self, id: ShapeId, center: Point) -> bool {
        match self.shapes.iter_mut().find(|s| s.id == id) {
            Some(shape) => {
                shape.center = center;
                true
            }
            None => false,
        }
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Topmost shape containing `point`, if any. Walks shapes front-to-back
    /// so the most recently added shape wins overlaps.
    pub fn shape_at(&self, point: Point) -> Option<&Shape> {
        self.shapes.iter().rev().find(|s| s.contains(point))
    }

    /// Shapes in insertion (back-to-front) order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn counts(&self) -> ShapeCounts {
        let mut counts = ShapeCounts::default();
        for shape in &self.shapes {
            match shape.kind {
                ShapeKind::Square => counts.squares += 1,
                ShapeKind::Circle => counts.circles += 1,
                ShapeKind::Triangle => counts.triangles += 1,
            }
        }
        counts
    }
}

type RepaintFn = Box<dyn FnMut()>;

/// Owns the document and tells the shell to repaint after every mutation.
///
/// Mutations that do nothing (unknown id) do not notify, so each successful
/// mutation maps to exactly one repaint request.
pub struct DocumentStore {
    document: Document,
    on_change: Option<RepaintFn>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(Document::new())
    }
}

impl DocumentStore {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            on_change: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Register the repaint callback. Replaces any previous subscriber.
    pub fn subscribe(&mut self, f: impl FnMut() + 'static) {
        self.on_change = Some(Box::new(f));
    }

    fn notify(&mut self) {
        if let Some(on_change) = &mut self.on_change {
            on_change();
        }
    }

    pub fn add_shape(&mut self, kind: ShapeKind, center: Point) -> ShapeId {
        let id = self.document.add_shape(kind, center);
        log::debug!("added {kind:?} {id} at ({:.1}, {:.1})", center.x, center.y);
        self.notify();
        id
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.document.remove_shape(id);
        if removed.is_some() {
            log::debug!("removed shape {id}");
            self.notify();
        }
        removed
    }

    pub fn move_shape(&mut self, id: ShapeId, center: Point) -> bool {
        let moved = self.document.move_shape(id, center);
        if moved {
            self.notify();
        }
        moved
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.document.title = title.into();
        self.notify();
    }

    /// Swap in a whole new document (import path).
    pub fn replace(&mut self, document: Document) {
        self.document = document;
        self.notify();
    }
}
