mod app;
mod font;
mod renderer;

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::app::{Action, GameOfLifeApp, GRID_SIZE};
use crate::renderer::Renderer;

fn key_action(event: &KeyEvent) -> Option<Action> {
    match &event.logical_key {
        Key::Named(NamedKey::Space) => Some(Action::ToggleRunning),
        Key::Character(text) if text.eq_ignore_ascii_case("n") => Some(Action::Step),
        Key::Character(text) if text.eq_ignore_ascii_case("r") => Some(Action::Restart),
        Key::Character(text) if text.eq_ignore_ascii_case("c") => Some(Action::Clear),
        _ => None,
    }
}

struct VulkanApp {
    window_attrs: WindowAttributes,
    window: Option<Arc<Window>>,
    window_id: Option<WindowId>,
    renderer: Option<Renderer>,
    app: Option<GameOfLifeApp>,
    last_cursor: [f32; 2],
    frame_count: u32,
    last_fps_log: Instant,
}

impl VulkanApp {
    fn new() -> Self {
        let attrs = Window::default_attributes()
            .with_title("Game of Life - Vulkan")
            .with_inner_size(PhysicalSize::new(1280, 900));
        Self {
            window_attrs: attrs,
            window: None,
            window_id: None,
            renderer: None,
            app: None,
            last_cursor: [0.0, 0.0],
            frame_count: 0,
            last_fps_log: Instant::now(),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = Arc::new(event_loop.create_window(self.window_attrs.clone())?);
        let renderer = pollster::block_on(Renderer::new(window.clone(), GRID_SIZE * GRID_SIZE))?;
        let app = GameOfLifeApp::new(renderer.size())?;
        window.request_redraw();

        self.window_id = Some(window.id());
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.app = Some(app);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(app)) = (self.renderer.as_mut(), self.app.as_mut()) else {
            return;
        };
        app.update();
        let (instances, ui_vertices) = app.build_frame();
        match renderer.render(instances, ui_vertices) {
            Ok(()) => {
                self.frame_count += 1;
                let elapsed = self.last_fps_log.elapsed();
                if elapsed >= Duration::from_secs(5) {
                    let fps = self.frame_count as f64 / elapsed.as_secs_f64();
                    log::info!("fps: {:.1}", fps);
                    self.frame_count = 0;
                    self.last_fps_log = Instant::now();
                }
            }
            Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size()),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory");
                event_loop.exit();
            }
            Err(err) => log::warn!("dropped frame: {err}"),
        }
    }
}

impl ApplicationHandler<()> for VulkanApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            log::error!("failed to start: {err:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if Some(window_id) != self.window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
                if let Some(app) = self.app.as_mut() {
                    app.resize(size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.last_cursor = [position.x as f32, position.y as f32];
                if let Some(app) = self.app.as_mut() {
                    app.cursor_position = Some(self.last_cursor);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(app) = self.app.as_mut() {
                    app.cursor_position = None;
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left && state == ElementState::Released {
                    if let Some(app) = self.app.as_mut() {
                        app.handle_click(self.last_cursor);
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let (Some(app), Some(action)) = (self.app.as_mut(), key_action(&event)) {
                        app.perform(action);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let mut app = VulkanApp::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
