//! Core application state and lifecycle.

use kurbo::{Point, Size};
use peniko::Color;
use shapeboard_core::controller::Controller;
use shapeboard_core::document::{Document, DocumentStore};
use shapeboard_core::input::{InputState, PointerButton};
use shapeboard_core::shapes::ShapeKind;
use shapeboard_core::tools::{Tool, ToolManager};
use shapeboard_render::hud;
use shapeboard_render::{HudAction, RenderContext, Renderer, RendererError, VelloRenderer};
use std::sync::Arc;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::{Window, WindowId};

use crate::shortcuts::ShortcutRegistry;

mod file_ops {
    use shapeboard_core::document::Document;
    use shapeboard_core::io;

    /// Save the document to a JSON file picked via the native dialog.
    /// Returns the title read back from the chosen file name, so renaming
    /// the file in the dialog renames the painting.
    pub fn save_document(document: &Document) -> Option<String> {
        let dialog = rfd::FileDialog::new()
            .set_title("Export Painting")
            .set_file_name(io::export_file_name(&document.title))
            .add_filter("Painting", &["json"]);

        let path = dialog.save_file()?;
        match io::write_file(document, &path) {
            Ok(()) => {
                log::info!("Exported painting to {:?}", path);
                io::title_from_path(&path)
            }
            Err(e) => {
                log::error!("Failed to export painting: {}", e);
                None
            }
        }
    }

    /// Load a document from a JSON file picked via the native dialog.
    /// Returns `None` when the dialog is cancelled or the file is invalid;
    /// the caller keeps the current document in that case.
    pub fn load_document() -> Option<Document> {
        let dialog = rfd::FileDialog::new()
            .set_title("Import Painting")
            .add_filter("Painting", &["json"]);

        let path = dialog.pick_file()?;
        match io::read_file(&path) {
            Ok(document) => {
                log::info!("Imported painting from {:?}", path);
                Some(document)
            }
            Err(e) => {
                log::error!("Failed to import painting: {}", e);
                None
            }
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Shapeboard".to_string(),
            width: 1024,
            height: 768,
            background_color: Color::from_rgba8(250, 250, 250, 255),
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,
    modifiers: ModifiersState,

    // Rendering
    vello_renderer: vello::Renderer,
    shape_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // State
    store: DocumentStore,
    tools: ToolManager,
    controller: Controller,
    input: InputState,
    config: AppConfig,
}

impl AppState {
    fn viewport_size(&self) -> Size {
        Size::new(
            self.surface.config.width as f64,
            self.surface.config.height as f64,
        )
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application.
    pub async fn run() {
        let event_loop = EventLoop::new().expect("Failed to create event loop");
        let mut app = App::new();
        event_loop.run_app(&mut app).expect("Event loop error");
    }

    /// Finish initialization after surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) {
        let render_cx = self
            .render_cx
            .as_ref()
            .expect("RenderContext not initialized");
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .expect("Failed to create Vello renderer");

        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let mut store = DocumentStore::new(Document::new());
        {
            // Repaint follows every document mutation.
            let window = window.clone();
            store.subscribe(move || window.request_redraw());
        }

        log::info!(
            "Shapeboard initialized - {}x{}",
            surface.config.width,
            surface.config.height
        );
        ShortcutRegistry::log_all();

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            modifiers: ModifiersState::default(),
            vello_renderer,
            shape_renderer: VelloRenderer::new(),
            texture_blitter,
            store,
            tools: ToolManager::new(),
            controller: Controller::new(),
            input: InputState::new(),
            config: self.config.clone(),
        });

        window.request_redraw();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);

        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .expect("Failed to create surface");

        // Transmute lifetime to 'static - safe because App owns everything
        let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };
        self.finish_init(window, surface);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.window.request_redraw();
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = modifiers.state();
            }

            WindowEvent::RedrawRequested => {
                sync_window_title(state);

                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                if let Err(e) = render_frame(state, render_cx) {
                    log::error!("Frame render failed: {}", e);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = Point::new(position.x, position.y);
                state.input.set_position(point);

                // Drag mutations repaint through the store subscription;
                // hover changes repaint here.
                if state.controller.pointer_moved(point, &mut state.store) {
                    state.window.request_redraw();
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if state.controller.pointer_left() {
                    state.window.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                let Some(button) = map_button(button) else {
                    return;
                };

                match btn_state {
                    ElementState::Pressed => {
                        if button != PointerButton::Left {
                            state.input.press(button);
                            return;
                        }

                        let point = state.input.position();

                        // Palette clicks never reach the canvas.
                        if let Some(action) = hud::hit_test(point, state.viewport_size()) {
                            apply_hud_action(state, action);
                            state.window.request_redraw();
                            return;
                        }

                        if state.input.press(button) {
                            state.controller.double_click(point, &mut state.store);
                        } else if state
                            .controller
                            .pointer_pressed(point, &mut state.store, &state.tools)
                        {
                            // A placement press must not arm double-click
                            // tracking, or two rapid clicks on empty canvas
                            // would place a shape and immediately delete it.
                            state.input.clear_click();
                        }
                    }
                    ElementState::Released => {
                        state.input.release(button);
                        if button == PointerButton::Left {
                            let point = state.input.position();
                            if state.controller.pointer_released(point, &state.store) {
                                state.window.request_redraw();
                            }
                        }
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                handle_key(state, &event.logical_key);
            }

            _ => {}
        }
    }
}

/// Window title doubles as the stats readout.
fn sync_window_title(state: &AppState) {
    let document = state.store.document();
    let title = format!("{} - {}", document.title, document.counts());
    state.window.set_title(&title);
}

fn map_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Left),
        MouseButton::Right => Some(PointerButton::Right),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn apply_hud_action(state: &mut AppState, action: HudAction) {
    match action {
        HudAction::PickKind(kind) => {
            state.tools.set_tool(Tool::Select);
            state.tools.toggle_kind(kind);
            log::debug!("palette selection: {:?}", state.tools.selected_kind());
        }
        HudAction::PickTool(tool) => {
            state.tools.set_tool(tool);
            log::debug!("tool: {tool:?}");
        }
    }
}

fn handle_key(state: &mut AppState, key: &Key) {
    let ctrl = state.modifiers.control_key() || state.modifiers.super_key();

    match key {
        Key::Character(c) => {
            let action = if ctrl {
                match c.as_str() {
                    "s" | "S" => {
                        if let Some(title) = file_ops::save_document(state.store.document()) {
                            if title != state.store.document().title {
                                state.store.set_title(title);
                            }
                        }
                        return;
                    }
                    "o" | "O" => {
                        if let Some(document) = file_ops::load_document() {
                            state.controller.reset();
                            state.store.replace(document);
                        }
                        return;
                    }
                    _ => return,
                }
            } else {
                match c.as_str() {
                    "s" | "S" => Some(HudAction::PickKind(ShapeKind::Square)),
                    "c" | "C" => Some(HudAction::PickKind(ShapeKind::Circle)),
                    "t" | "T" => Some(HudAction::PickKind(ShapeKind::Triangle)),
                    "v" | "V" => Some(HudAction::PickTool(Tool::Select)),
                    "e" | "E" => Some(HudAction::PickTool(Tool::Erase)),
                    _ => None,
                }
            };

            if let Some(action) = action {
                apply_hud_action(state, action);
                state.window.request_redraw();
            }
        }
        Key::Named(NamedKey::Escape) => {
            state.tools.clear_kind();
            state.window.request_redraw();
        }
        _ => {}
    }
}

/// Build the scene and present one frame.
fn render_frame(
    state: &mut AppState,
    render_cx: &vello::util::RenderContext,
) -> Result<(), RendererError> {
    let width = state.surface.config.width;
    let height = state.surface.config.height;

    let ctx = RenderContext::new(state.store.document(), state.viewport_size())
        .with_scale_factor(state.window.scale_factor())
        .with_background(state.config.background_color)
        .with_hovered(state.controller.hovered())
        .with_tool(state.tools.tool(), state.tools.selected_kind());

    state.shape_renderer.build_scene(&ctx);
    let scene = state.shape_renderer.take_scene();

    let device_handle = &render_cx.devices[state.surface.dev_id];
    let device = &device_handle.device;
    let queue = &device_handle.queue;

    let surface_texture = state
        .surface
        .surface
        .get_current_texture()
        .map_err(|e| RendererError::Surface(format!("{e:?}")))?;

    let params = RenderParams {
        base_color: state.config.background_color,
        width,
        height,
        antialiasing_method: AaConfig::Area,
    };

    // Vello's compute shaders need StorageBinding, which the surface
    // format (often Bgra8Unorm) does not support. Render to an Rgba8Unorm
    // intermediate and blit to the surface.
    let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
        label: Some("vello render texture"),
        size: vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: vello::wgpu::TextureDimension::D2,
        format: vello::wgpu::TextureFormat::Rgba8Unorm,
        usage: vello::wgpu::TextureUsages::STORAGE_BINDING
            | vello::wgpu::TextureUsages::COPY_SRC
            | vello::wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let render_texture_view =
        render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

    state
        .vello_renderer
        .render_to_texture(device, queue, &scene, &render_texture_view, &params)
        .map_err(|e| RendererError::RenderFailed(format!("{e:?}")))?;

    let surface_view = surface_texture
        .texture
        .create_view(&vello::wgpu::TextureViewDescriptor::default());

    let mut blit_encoder =
        device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
            label: Some("blit encoder"),
        });
    state
        .texture_blitter
        .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
    queue.submit(std::iter::once(blit_encoder.finish()));

    surface_texture.present();
    Ok(())
}
