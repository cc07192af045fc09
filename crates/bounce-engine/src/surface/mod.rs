//! Render surface: one window plus its drawing context, owned as a unit.
//!
//! The wgpu surface borrows the winit window, so the two live together in
//! a self-referencing pair; dropping the [`Surface`] releases the drawing
//! context, then the window, then the process-wide graphics handle, in
//! that order. Exactly one instance exists per running application, and
//! it is created and destroyed by the scheduler.

mod fill;
mod gpu;

use ouroboros::self_referencing;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::window::Window;

use crate::geom::Rect;
use crate::paint::Color;

use fill::{FillRenderer, Instance};
use gpu::{Gpu, SurfaceErrorAction};

#[self_referencing]
struct Host {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Immediate-mode drawing surface.
///
/// `set_color` mutates the current draw color; `clear` resets the pending
/// frame to that color; `draw_rect` buffers a filled rect in it. Nothing
/// reaches the display until [`present`](Surface::present), which encodes
/// and submits the buffered frame and blocks on the display's refresh
/// interval (FIFO presentation) — the loop's sole throttle.
pub struct Surface {
    host: Host,
    fill: FillRenderer,
    draw_color: Color,
    clear_color: Color,
    rects: Vec<Instance>,
}

impl Surface {
    /// Acquires the drawing context for `window`.
    ///
    /// Fatal on failure: an interactive foreground application has no
    /// degraded headless mode, so the process terminates before the loop
    /// is ever entered.
    pub(crate) fn new(window: Window) -> Self {
        let host = HostBuilder {
            window,
            gpu_builder: |window| {
                pollster::block_on(Gpu::new(window))
                    .expect("render surface acquisition failed")
            },
        }
        .build();

        Self {
            host,
            fill: FillRenderer::new(),
            draw_color: Color::WHITE,
            clear_color: Color::BLACK,
            rects: Vec::new(),
        }
    }

    /// Current drawable size in logical pixels.
    ///
    /// May change between calls whenever the window is resized.
    pub fn size(&self) -> (f32, f32) {
        self.host.with_window(|window| {
            let logical: LogicalSize<f64> = window.inner_size().to_logical(window.scale_factor());
            (logical.width as f32, logical.height as f32)
        })
    }

    /// Sets the current draw color from byte channels.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.draw_color = Color::from_u8(r, g, b, a);
    }

    /// Resets the pending frame to the current draw color.
    ///
    /// Rects buffered before the clear are discarded.
    pub fn clear(&mut self) {
        self.clear_color = self.draw_color;
        self.rects.clear();
    }

    /// Buffers a filled rect in the current draw color.
    pub fn draw_rect(&mut self, rect: Rect) {
        debug_assert!(
            rect.w >= 0.0 && rect.h >= 0.0,
            "draw_rect: negative extents"
        );
        debug_assert!(rect.is_finite(), "draw_rect: non-finite rect");

        if rect.is_empty() {
            return;
        }

        self.rects.push(Instance {
            origin: [rect.x, rect.y],
            size: [rect.w, rect.h],
            color: self.draw_color.as_array(),
        });
    }

    /// Publishes the buffered frame.
    ///
    /// Blocks until the display subsystem is ready for the next buffer.
    /// Transient surface errors drop the frame; out-of-memory is fatal.
    pub(crate) fn present(&mut self) {
        let acquired = self.host.with_gpu(|gpu| gpu.begin_frame());
        let mut frame = match acquired {
            Ok(frame) => frame,
            Err(err) => {
                log::debug!("dropping frame after surface error: {err:?}");
                let action = self.host.with_gpu_mut(|gpu| gpu.handle_surface_error(err));
                if action == SurfaceErrorAction::Fatal {
                    panic!("render surface out of memory");
                }
                self.rects.clear();
                return;
            }
        };

        let (w, h) = self.size();
        let clear = self.clear_color;
        let fill = &mut self.fill;
        let rects = &self.rects;

        self.host.with_gpu(|gpu| {
            fill.render(
                gpu.device(),
                gpu.queue(),
                gpu.surface_format(),
                [w, h],
                clear,
                rects,
                &mut frame.encoder,
                &frame.view,
            );
        });
        self.host.with_gpu(|gpu| gpu.submit(frame));

        self.rects.clear();
    }

    /// Reconfigures the swapchain after a platform size change.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.host.with_gpu_mut(|gpu| gpu.resize(new_size));
    }

    pub(crate) fn request_redraw(&self) {
        self.host.with_window(|window| window.request_redraw());
    }

    pub(crate) fn scale_factor(&self) -> f64 {
        self.host.with_window(|window| window.scale_factor())
    }

    pub(crate) fn inner_size(&self) -> PhysicalSize<u32> {
        self.host.with_window(|window| window.inner_size())
    }
}
