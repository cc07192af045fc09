use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use crate::input::map_key;
use crate::surface::Surface;

use super::{RawInput, Scheduler};

/// winit-facing half of the loop.
///
/// Translates window events into [`RawInput`] for the scheduler core and
/// drives the per-frame steps from `RedrawRequested`. The surface is
/// created in `resumed` (winit creates windows only once the loop is
/// active) and dropped with the driver when `run` returns.
pub(super) struct Driver<F> {
    sched: Scheduler,
    render: F,
    surface: Option<Surface>,
    /// Last known cursor position in logical pixels; clicks are stamped
    /// with it because the platform button event carries no coordinates.
    cursor: (f32, f32),
}

impl<F> Driver<F>
where
    F: FnMut(&mut Surface),
{
    pub(super) fn new(sched: Scheduler, render: F) -> Self {
        Self {
            sched,
            render,
            surface: None,
            cursor: (0.0, 0.0),
        }
    }
}

impl<F> ApplicationHandler for Driver<F>
where
    F: FnMut(&mut Surface),
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        let config = self.sched.config();
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));

        // Fatal acquisition failures terminate before the loop proper
        // runs; there is no degraded mode.
        let window = event_loop
            .create_window(attrs)
            .expect("window acquisition failed");
        let surface = Surface::new(window);

        let (w, h) = surface.size();
        self.surface = Some(surface);
        self.sched.prime(w, h);

        if let Some(surface) = &self.surface {
            surface.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.sched.stopped() {
            event_loop.exit();
            return;
        }

        // Continuous rendering; present() paces the loop to the display.
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(surface) = &self.surface {
            surface.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.sched.stopped() {
            event_loop.exit();
            return;
        }

        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.sched.pump(RawInput::Quit);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = map_key(event.physical_key);
                match event.state {
                    ElementState::Pressed => self.sched.pump(RawInput::KeyDown(key)),
                    ElementState::Released => self.sched.pump(RawInput::KeyUp(key)),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(surface.scale_factor());
                self.cursor = (logical.x as f32, logical.y as f32);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => {
                let (x, y) = self.cursor;
                self.sched.pump(RawInput::PointerDown { x, y });
            }

            WindowEvent::Resized(new_size) => {
                surface.resize(new_size);
                let (w, h) = surface.size();
                self.sched.pump(RawInput::Resized { w, h });
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = surface.inner_size();
                surface.resize(new_size);
                let (w, h) = surface.size();
                self.sched.pump(RawInput::Resized { w, h });
            }

            WindowEvent::RedrawRequested => {
                self.sched.tick();
                if self.sched.stopped() {
                    return;
                }
                (self.render)(surface);
                surface.present();
            }

            _ => {}
        }
    }
}
