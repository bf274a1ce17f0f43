//! Shapeboard Application
//!
//! The application shell: windowing, pointer and keyboard routing, native
//! file dialogs, and the render surface lifecycle.

mod app;
mod shortcuts;

pub use app::{App, AppConfig};
pub use shortcuts::{Shortcut, ShortcutRegistry};
