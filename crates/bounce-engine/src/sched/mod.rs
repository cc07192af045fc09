//! Scheduler: owns the event bus and the render surface, runs the frame
//! loop.
//!
//! Strictly single-threaded and cooperative. Per iteration, platform
//! input events are dispatched first (in arrival order, interleaved with
//! the drain), then one `FrameTick`, then the render callback, then the
//! present — and within one category, subscribers always run in
//! subscription order. The only blocking call is the present.
//!
//! Subscriber callbacks may mutate whatever external state they capture;
//! that state must outlive the scheduler, and callbacks must not
//! re-enter `subscribe` or `run`.

mod clock;
mod driver;

pub use clock::FrameClock;

use anyhow::{Context, Result};
use winit::event_loop::EventLoop;

use crate::event::{Category, Event, EventBus, FrameTick, KeyPress, PointerClick, SurfaceResize};
use crate::input::{Key, Keyboard};
use crate::surface::Surface;

/// Resolved window configuration, supplied by the caller before the
/// scheduler is constructed.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    /// Initial logical window size.
    pub width: f64,
    pub height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "bounce".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Loop lifecycle: `Idle` until the loop primes, `Running` while frames
/// are produced, `Stopped` once the platform quit signal is observed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Phase {
    Idle,
    Running,
    Stopped,
}

/// Platform input already translated out of the window system, in
/// arrival order. The winit driver produces these; tests feed them
/// directly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum RawInput {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown { x: f32, y: f32 },
    Resized { w: f32, h: f32 },
    Quit,
}

/// Owns the bus, the held-key table, and the frame clock; `run` adds the
/// window and render surface and drives the loop to completion.
pub struct Scheduler {
    bus: EventBus,
    keyboard: Keyboard,
    clock: FrameClock,
    phase: Phase,
    config: Config,
}

impl Scheduler {
    pub fn new(config: Config) -> Self {
        Self {
            bus: EventBus::new(),
            keyboard: Keyboard::new(),
            clock: FrameClock::new(),
            phase: Phase::Idle,
            config,
        }
    }

    /// Registers `callback` for `category`.
    ///
    /// Subscriptions are append-only and permanent; invocation order is
    /// registration order.
    pub fn subscribe(&mut self, category: Category, callback: impl FnMut(&Event) + 'static) {
        self.bus.subscribe(category, callback);
    }

    /// Handle to the held-key table, for "is key held" polling from
    /// frame subscribers.
    pub fn keyboard(&self) -> Keyboard {
        self.keyboard.clone()
    }

    /// Runs the frame loop until the platform quit signal.
    ///
    /// Creates the window and render surface (fatal on acquisition
    /// failure), dispatches one synthetic `SurfaceResize` before the
    /// first frame, then loops: drain input, tick, `render`, present.
    /// Returns once stopped; the surface is released on the way out on
    /// every exit path.
    pub fn run<F>(self, render: F) -> Result<()>
    where
        F: FnMut(&mut Surface) + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit event loop")?;
        let mut driver = driver::Driver::new(self, render);

        event_loop
            .run_app(&mut driver)
            .context("event loop terminated with error")?;

        Ok(())
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// Priming step: moves to `Running` and dispatches one synthetic
    /// `SurfaceResize` so size-dependent layout exists before the first
    /// frame, even if the platform never reports a native resize.
    pub(crate) fn prime(&mut self, w: f32, h: f32) {
        self.phase = Phase::Running;
        self.bus.dispatch(&Event::from(SurfaceResize { w, h }));
    }

    /// Dispatches one translated platform input event.
    ///
    /// Quit moves to `Stopped`; once stopped, everything else is
    /// suppressed — a quit observed mid-drain aborts the remainder of
    /// the drain.
    pub(crate) fn pump(&mut self, input: RawInput) {
        if self.phase == Phase::Stopped {
            return;
        }

        match input {
            RawInput::KeyDown(key) => {
                self.keyboard.press(key);
                self.bus.dispatch(&Event::from(KeyPress { key }));
            }
            RawInput::KeyUp(key) => {
                // Held-table bookkeeping only; releases carry no event.
                self.keyboard.release(key);
            }
            RawInput::PointerDown { x, y } => {
                self.bus.dispatch(&Event::from(PointerClick { x, y }));
            }
            RawInput::Resized { w, h } => {
                self.bus.dispatch(&Event::from(SurfaceResize { w, h }));
            }
            RawInput::Quit => {
                log::debug!("quit signal observed; stopping loop");
                self.phase = Phase::Stopped;
            }
        }
    }

    /// Dispatches one `FrameTick` with the elapsed time since the
    /// previous tick. No-op unless running.
    pub(crate) fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        let dt = self.clock.tick();
        self.bus.dispatch(&Event::from(FrameTick { dt }));
    }

    pub(crate) fn stopped(&self) -> bool {
        self.phase == Phase::Stopped
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records the category of every event a scheduler dispatches.
    fn recording_scheduler() -> (Scheduler, Rc<RefCell<Vec<Category>>>) {
        let mut sched = Scheduler::new(Config::default());
        let record = Rc::new(RefCell::new(Vec::new()));

        for category in [
            Category::Frame,
            Category::Click,
            Category::Key,
            Category::Resize,
        ] {
            let record = record.clone();
            sched.subscribe(category, move |event| {
                record.borrow_mut().push(event.category());
            });
        }

        (sched, record)
    }

    #[test]
    fn resize_is_dispatched_before_first_tick() {
        let (mut sched, record) = recording_scheduler();

        sched.prime(800.0, 600.0);
        sched.tick();

        assert_eq!(*record.borrow(), vec![Category::Resize, Category::Frame]);
    }

    #[test]
    fn input_precedes_tick_within_an_iteration() {
        let (mut sched, record) = recording_scheduler();
        sched.prime(800.0, 600.0);
        record.borrow_mut().clear();

        sched.pump(RawInput::KeyDown(Key::A));
        sched.pump(RawInput::PointerDown { x: 1.0, y: 2.0 });
        sched.tick();

        assert_eq!(
            *record.borrow(),
            vec![Category::Key, Category::Click, Category::Frame]
        );
    }

    #[test]
    fn quit_mid_drain_aborts_the_rest_of_the_iteration() {
        let (mut sched, record) = recording_scheduler();
        sched.prime(800.0, 600.0);
        record.borrow_mut().clear();

        sched.pump(RawInput::PointerDown { x: 1.0, y: 1.0 });
        sched.pump(RawInput::Quit);
        // Everything after the quit signal must be suppressed, including
        // the frame tick that would normally end the iteration.
        sched.pump(RawInput::PointerDown { x: 2.0, y: 2.0 });
        sched.pump(RawInput::KeyDown(Key::P));
        sched.tick();

        assert!(sched.stopped());
        assert_eq!(*record.borrow(), vec![Category::Click]);
    }

    #[test]
    fn tick_is_inert_before_priming() {
        let (mut sched, record) = recording_scheduler();
        sched.tick();
        assert!(record.borrow().is_empty());
    }

    #[test]
    fn key_down_updates_held_table_and_dispatches() {
        let (mut sched, record) = recording_scheduler();
        let keyboard = sched.keyboard();
        sched.prime(800.0, 600.0);
        record.borrow_mut().clear();

        sched.pump(RawInput::KeyDown(Key::D));
        assert!(keyboard.is_down(Key::D));
        assert_eq!(*record.borrow(), vec![Category::Key]);

        // Release updates the table without dispatching anything.
        sched.pump(RawInput::KeyUp(Key::D));
        assert!(!keyboard.is_down(Key::D));
        assert_eq!(*record.borrow(), vec![Category::Key]);
    }

    #[test]
    fn resize_events_carry_the_new_size() {
        let mut sched = Scheduler::new(Config::default());
        let sizes = Rc::new(RefCell::new(Vec::new()));

        let record = sizes.clone();
        sched.subscribe(Category::Resize, move |event| {
            if let Event::SurfaceResize(resize) = event {
                record.borrow_mut().push((resize.w, resize.h));
            }
        });

        sched.prime(800.0, 600.0);
        sched.pump(RawInput::Resized { w: 1024.0, h: 768.0 });

        assert_eq!(*sizes.borrow(), vec![(800.0, 600.0), (1024.0, 768.0)]);
    }

    #[test]
    fn frame_subscribers_replay_subscription_order_for_100_ticks() {
        let mut sched = Scheduler::new(Config::default());
        let order = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3u8 {
            let order = order.clone();
            sched.subscribe(Category::Frame, move |_| order.borrow_mut().push(id));
        }

        sched.prime(800.0, 600.0);
        for _ in 0..100 {
            sched.tick();
        }

        let recorded = order.borrow();
        assert_eq!(recorded.len(), 300);
        for frame in recorded.chunks(3) {
            assert_eq!(frame, [0, 1, 2]);
        }
    }

    #[test]
    fn tick_deltas_are_non_negative_after_a_large_first_delta() {
        let mut sched = Scheduler::new(Config::default());
        let deltas = Rc::new(RefCell::new(Vec::new()));

        let record = deltas.clone();
        sched.subscribe(Category::Frame, move |event| {
            if let Event::FrameTick(tick) = event {
                record.borrow_mut().push(tick.dt);
            }
        });

        sched.prime(800.0, 600.0);
        for _ in 0..10 {
            sched.tick();
        }

        let recorded = deltas.borrow();
        assert_eq!(recorded.len(), 10);
        // First delta measures from construction; only the later ones are
        // bounded by the loop cadence. Durations are non-negative by type,
        // so the check here is that every tick produced a delta at all and
        // none of the follow-ups exceeds the total elapsed span.
        let total: std::time::Duration = recorded.iter().skip(1).sum();
        for dt in recorded.iter().skip(1) {
            assert!(*dt <= total);
        }
    }
}
