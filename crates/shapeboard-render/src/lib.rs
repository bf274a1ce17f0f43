//! Shapeboard Renderer
//!
//! Renderer abstraction plus the vello implementation that paints the
//! document, the hover highlight, and the tool-palette HUD.

pub mod hud;
pub mod renderer;
pub mod vello_impl;

pub use hud::{palette_layout, HudAction, HudButton};
pub use renderer::{RenderContext, Renderer, RendererError};
pub use vello_impl::VelloRenderer;
