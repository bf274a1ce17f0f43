//! Shape model and hit-testing geometry.

use crate::color::Rgb;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use uuid::Uuid;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// Default edge length / diameter for newly placed shapes.
pub const DEFAULT_SIZE: f64 = 100.0;

/// The kinds of shape that can be placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
}

impl ShapeKind {
    /// Name used in the JSON wire format.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
        }
    }

    /// Parse a wire-format kind name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "square" => Some(ShapeKind::Square),
            "circle" => Some(ShapeKind::Circle),
            "triangle" => Some(ShapeKind::Triangle),
            _ => None,
        }
    }
}

/// A placed shape: kind, center position, size, and fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Center of the shape in canvas coordinates.
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
}

impl Shape {
    /// Create a new shape at the given center with the default size and a
    /// random fill color.
    pub fn new(kind: ShapeKind, center: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            center,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            color: Rgb::random(),
        }
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.width / 2.0,
            self.center.y - self.height / 2.0,
            self.center.x + self.width / 2.0,
            self.center.y + self.height / 2.0,
        )
    }

    /// Vertices of the triangle outline: apex on top, base below.
    pub fn triangle_vertices(&self) -> [Point; 3] {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        [
            Point::new(self.center.x, self.center.y - half_h),
            Point::new(self.center.x - half_w, self.center.y + half_h),
            Point::new(self.center.x + half_w, self.center.y + half_h),
        ]
    }

    /// Hit-test a point against this shape. Boundary points count as inside.
    pub fn contains(&self, point: Point) -> bool {
        match self.kind {
            ShapeKind::Square => {
                let b = self.bounds();
                point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
            }
            // Hit radius is half the width, independent of height.
            ShapeKind::Circle => self.center.distance(point) <= self.width / 2.0,
            ShapeKind::Triangle => {
                let [a, b, c] = self.triangle_vertices();
                triangle_contains(a, b, c, point)
            }
        }
    }

    /// Build the outline path for rendering.
    pub fn to_path(&self) -> BezPath {
        match self.kind {
            ShapeKind::Square => self.bounds().to_path(0.1),
            ShapeKind::Circle => {
                kurbo::Ellipse::new(self.center, (self.width / 2.0, self.height / 2.0), 0.0)
                    .to_path(0.1)
            }
            ShapeKind::Triangle => {
                let [a, b, c] = self.triangle_vertices();
                let mut path = BezPath::new();
                path.move_to(a);
                path.line_to(b);
                path.line_to(c);
                path.close_path();
                path
            }
        }
    }
}

/// Barycentric point-in-triangle test.
///
/// A degenerate (zero-area) triangle contains no point.
fn triangle_contains(a: Point, b: Point, c: Point, p: Point) -> bool {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < f64::EPSILON {
        return false;
    }
    let u = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denom;
    let v = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denom;
    let w = 1.0 - u - v;
    u >= 0.0 && v >= 0.0 && w >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(kind: ShapeKind, x: f64, y: f64) -> Shape {
        Shape::new(kind, Point::new(x, y))
    }

    #[test]
    fn test_center_is_inside_every_kind() {
        for kind in [ShapeKind::Square, ShapeKind::Circle, ShapeKind::Triangle] {
            let s = shape(kind, 50.0, 50.0);
            assert!(s.contains(Point::new(50.0, 50.0)), "{kind:?} center miss");
        }
    }

    #[test]
    fn test_square_hit_test() {
        let s = shape(ShapeKind::Square, 100.0, 100.0);
        assert!(s.contains(Point::new(60.0, 60.0)));
        assert!(s.contains(Point::new(150.0, 150.0))); // boundary corner
        assert!(!s.contains(Point::new(151.0, 100.0)));
        assert!(!s.contains(Point::new(100.0, 49.0)));
    }

    #[test]
    fn test_circle_hit_test() {
        let s = shape(ShapeKind::Circle, 100.0, 100.0);
        assert!(s.contains(Point::new(150.0, 100.0))); // on the rim
        assert!(!s.contains(Point::new(151.0, 100.0)));
        // Bounding-box corner is outside the disc.
        assert!(!s.contains(Point::new(150.0, 150.0)));
    }

    #[test]
    fn test_circle_hit_radius_uses_width() {
        let mut s = shape(ShapeKind::Circle, 0.0, 0.0);
        s.height = 10.0;
        assert!(s.contains(Point::new(49.0, 0.0)));
        assert!(s.contains(Point::new(0.0, 49.0)));
    }

    #[test]
    fn test_triangle_hit_test() {
        let s = shape(ShapeKind::Triangle, 100.0, 100.0);
        // Apex and base corners.
        assert!(s.contains(Point::new(100.0, 50.0)));
        assert!(s.contains(Point::new(50.0, 150.0)));
        assert!(s.contains(Point::new(150.0, 150.0)));
        // Top corners of the bounding box are outside the triangle.
        assert!(!s.contains(Point::new(51.0, 51.0)));
        assert!(!s.contains(Point::new(149.0, 51.0)));
        assert!(!s.contains(Point::new(100.0, 49.0)));
    }

    #[test]
    fn test_degenerate_triangle_contains_nothing() {
        let mut s = shape(ShapeKind::Triangle, 100.0, 100.0);
        s.width = 0.0;
        s.height = 0.0;
        assert!(!s.contains(Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_bounds() {
        let s = shape(ShapeKind::Square, 100.0, 80.0);
        let b = s.bounds();
        assert!((b.x0 - 50.0).abs() < f64::EPSILON);
        assert!((b.y0 - 30.0).abs() < f64::EPSILON);
        assert!((b.x1 - 150.0).abs() < f64::EPSILON);
        assert!((b.y1 - 130.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_shape_defaults() {
        let s = shape(ShapeKind::Circle, 10.0, 20.0);
        assert!((s.width - DEFAULT_SIZE).abs() < f64::EPSILON);
        assert!((s.height - DEFAULT_SIZE).abs() < f64::EPSILON);
        let other = shape(ShapeKind::Circle, 10.0, 20.0);
        assert_ne!(s.id, other.id);
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in [ShapeKind::Square, ShapeKind::Circle, ShapeKind::Triangle] {
            assert_eq!(ShapeKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ShapeKind::parse("hexagon"), None);
    }
}
