//! Shapeboard Core Library
//!
//! Platform-agnostic data structures and logic for the Shapeboard drawing
//! tool: the shape model, the document store, pointer interaction, and
//! JSON import/export.

pub mod color;
pub mod controller;
pub mod document;
pub mod input;
pub mod io;
pub mod shapes;
pub mod tools;

pub use color::Rgb;
pub use controller::{Controller, PointerState};
pub use document::{Document, DocumentStore, ShapeCounts};
pub use input::{InputState, PointerButton};
pub use io::DocumentError;
pub use shapes::{Shape, ShapeId, ShapeKind};
pub use tools::{Tool, ToolManager};
