//! Application Shell
//!
//! Winit event-loop integration: owns the window, the renderer and the
//! cancellation flag, and turns `RedrawRequested` events into frames.
//!
//! The loop is schedule-then-execute: each iteration requests the next
//! redraw *before* rendering, so a failure mid-frame never stalls the loop.
//! Teardown is cooperative — `CloseRequested` clears the `running` flag,
//! which is checked at the top of every iteration.

use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::gltf;
use crate::errors::Result;
use crate::render::renderer::Renderer;
use crate::settings::ViewerSettings;
use crate::utils::fps_counter::FpsCounter;

/// The viewer application.
pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    settings: ViewerSettings,
    running: bool,
    fps_counter: FpsCounter,
}

impl App {
    #[must_use]
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            window: None,
            renderer: None,
            settings,
            running: false,
            fps_counter: FpsCounter::new(),
        }
    }

    /// Runs the event loop until the window is closed.
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn redraw(&mut self) {
        // Reschedule before rendering: a failed frame must not stop the loop.
        if let Some(window) = &self.window {
            window.request_redraw();
        }

        if !self.running {
            return;
        }

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render_frame();
        }

        if let Some(fps) = self.fps_counter.update() {
            if let Some(window) = &self.window {
                window.set_title(&format!("{} | FPS: {fps:.0}", self.settings.title));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Guard against duplicate init; a second trigger must not spawn a
        // second loop over the same surface.
        if self.window.is_some() {
            return;
        }

        // Load and decode the asset before any GPU resource exists.
        let data = match gltf::load(&self.settings.model_path) {
            Ok(data) => data,
            Err(e) => {
                log::error!("Fatal asset error: {e}");
                event_loop.exit();
                return;
            }
        };

        let window_attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.width as f64,
                self.settings.height as f64,
            ));

        let window = event_loop
            .create_window(window_attributes)
            .expect("Failed to create window");
        let window = Arc::new(window);
        self.window = Some(window.clone());

        log::info!("Initializing renderer backend...");
        match pollster::block_on(Renderer::new(window, &self.settings, &data)) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.running = true;
            }
            Err(e) => {
                log::error!("Fatal renderer error: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
