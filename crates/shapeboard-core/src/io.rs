//! Flat-file JSON import and export.
//!
//! Export writes pretty-printed JSON in a fixed layout. Import is lenient:
//! a missing title or shape list falls back to defaults, and malformed
//! shape entries are dropped with a warning instead of failing the whole
//! import. Only a non-object top level is a hard error.

use crate::color::Rgb;
use crate::document::Document;
use crate::shapes::{Shape, ShapeId, ShapeKind};
use kurbo::Point;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Title given to imports that carry none.
pub const IMPORTED_TITLE: &str = "Imported Painting";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object at the top level")]
    NotAnObject,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct DocumentRecord {
    title: String,
    shapes: Vec<ShapeRecord>,
}

#[derive(Serialize)]
struct ShapeRecord {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: String,
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        Self {
            id: shape.id.to_string(),
            kind: shape.kind.as_str().to_string(),
            x: shape.center.x,
            y: shape.center.y,
            width: shape.width,
            height: shape.height,
            color: shape.color.to_string(),
        }
    }
}

/// Serialize the document as pretty-printed JSON.
pub fn to_json(document: &Document) -> Result<String, DocumentError> {
    let record = DocumentRecord {
        title: document.title.clone(),
        shapes: document.shapes().iter().map(ShapeRecord::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&record)?)
}

/// Parse a document from JSON.
pub fn from_json(json: &str) -> Result<Document, DocumentError> {
    let value: Value = serde_json::from_str(json)?;
    let obj = value.as_object().ok_or(DocumentError::NotAnObject)?;

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(IMPORTED_TITLE)
        .to_string();

    let mut shapes = Vec::new();
    if let Some(entries) = obj.get("shapes").and_then(Value::as_array) {
        for entry in entries {
            match parse_shape(entry) {
                Some(shape) => shapes.push(shape),
                None => log::warn!("skipping malformed shape entry: {entry}"),
            }
        }
    }

    Ok(Document::with_shapes(title, shapes))
}

/// Parse one shape entry. Returns `None` for anything malformed: unknown
/// kind, unparseable id or color, or a non-finite / non-positive size.
fn parse_shape(value: &Value) -> Option<Shape> {
    let obj = value.as_object()?;

    let id: ShapeId = obj.get("id")?.as_str().and_then(|s| s.parse().ok())?;
    let kind = obj.get("type")?.as_str().and_then(ShapeKind::parse)?;
    let x = finite(obj.get("x")?)?;
    let y = finite(obj.get("y")?)?;
    let width = finite(obj.get("width")?).filter(|w| *w > 0.0)?;
    let height = finite(obj.get("height")?).filter(|h| *h > 0.0)?;
    let color: Rgb = obj.get("color")?.as_str().and_then(|s| s.parse().ok())?;

    Some(Shape {
        id,
        kind,
        center: Point::new(x, y),
        width,
        height,
        color,
    })
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// File name suggested when exporting: the title with whitespace runs
/// replaced by underscores, plus `.json`.
pub fn export_file_name(title: &str) -> String {
    let name = title.split_whitespace().collect::<Vec<_>>().join("_");
    if name.is_empty() {
        "painting.json".to_string()
    } else {
        format!("{name}.json")
    }
}

/// Title derived from an export path the user picked: the file stem with
/// underscores read back as spaces. `None` when the stem is empty, so the
/// caller keeps the current title.
pub fn title_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let title = stem
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if title.is_empty() { None } else { Some(title) }
}

/// Write the document to `path` as JSON.
pub fn write_file(document: &Document, path: &Path) -> Result<(), DocumentError> {
    let json = to_json(document)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a document from the JSON file at `path`.
pub fn read_file(path: &Path) -> Result<Document, DocumentError> {
    let json = std::fs::read_to_string(path)?;
    from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_document() -> Document {
        let mut doc = Document::with_shapes("Test Painting", Vec::new());
        doc.add_shape(ShapeKind::Square, Point::new(120.0, 80.0));
        doc.add_shape(ShapeKind::Circle, Point::new(300.5, 200.25));
        doc.add_shape(ShapeKind::Triangle, Point::new(-40.0, 10.0));
        doc
    }

    #[test]
    fn test_round_trip_is_exact() {
        let doc = sample_document();
        let json = to_json(&doc).unwrap();
        let restored = from_json(&json).unwrap();
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_export_wire_format() {
        let mut doc = Document::with_shapes("Wire", Vec::new());
        doc.add_shape(ShapeKind::Square, Point::new(1.0, 2.0));
        let json = to_json(&doc).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Wire");
        let entry = &value["shapes"][0];
        assert_eq!(entry["type"], "square");
        assert_eq!(entry["x"], 1.0);
        assert_eq!(entry["y"], 2.0);
        assert_eq!(entry["width"], 100.0);
        assert!(entry["id"].as_str().unwrap().parse::<Uuid>().is_ok());
        assert!(entry["color"].as_str().unwrap().starts_with('#'));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(from_json("not json at all").is_err());
        assert!(matches!(
            from_json("[1, 2, 3]"),
            Err(DocumentError::NotAnObject)
        ));
        assert!(matches!(from_json("42"), Err(DocumentError::NotAnObject)));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let doc = from_json("{}").unwrap();
        assert_eq!(doc.title, IMPORTED_TITLE);
        assert!(doc.is_empty());

        let doc = from_json(r#"{"shapes": []}"#).unwrap();
        assert_eq!(doc.title, IMPORTED_TITLE);

        let doc = from_json(r#"{"title": "Named", "shapes": "nope"}"#).unwrap();
        assert_eq!(doc.title, "Named");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_malformed_entries_are_dropped() {
        let id = Uuid::new_v4();
        let json = format!(
            r##"{{
                "title": "Mixed",
                "shapes": [
                    {{"id": "{id}", "type": "circle", "x": 10.0, "y": 20.0,
                      "width": 100.0, "height": 100.0, "color": "#ff0000"}},
                    {{"id": "not-a-uuid", "type": "circle", "x": 0, "y": 0,
                      "width": 100, "height": 100, "color": "#ff0000"}},
                    {{"id": "{id}", "type": "hexagon", "x": 0, "y": 0,
                      "width": 100, "height": 100, "color": "#ff0000"}},
                    {{"id": "{id}", "type": "square", "x": 0, "y": 0,
                      "width": -5, "height": 100, "color": "#ff0000"}},
                    {{"id": "{id}", "type": "square", "x": 0, "y": 0,
                      "width": 100, "height": 100, "color": "chartreuse"}},
                    "not even an object"
                ]
            }}"##
        );
        let doc = from_json(&json).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.shapes()[0].kind, ShapeKind::Circle);
        assert_eq!(doc.shapes()[0].id, id);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("My Painting"), "My_Painting.json");
        assert_eq!(export_file_name("  spaced   out  "), "spaced_out.json");
        assert_eq!(export_file_name("single"), "single.json");
        assert_eq!(export_file_name(""), "painting.json");
        assert_eq!(export_file_name("   "), "painting.json");
    }

    #[test]
    fn test_title_from_path() {
        let title = |s: &str| title_from_path(Path::new(s));
        assert_eq!(title("My_Painting.json"), Some("My Painting".to_string()));
        assert_eq!(
            title("/tmp/exports/sunset_over_water.json"),
            Some("sunset over water".to_string())
        );
        assert_eq!(title("plain.json"), Some("plain".to_string()));
        assert_eq!(title("___.json"), None);
        assert_eq!(title(""), None);
        // Round trip through the suggested export name.
        assert_eq!(
            title(&export_file_name("My Painting")),
            Some("My Painting".to_string())
        );
    }

    #[test]
    fn test_file_round_trip() {
        let doc = sample_document();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export_file_name(&doc.title));

        write_file(&doc, &path).unwrap();
        let restored = read_file(&path).unwrap();
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_file(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(DocumentError::Io(_))));
    }
}
