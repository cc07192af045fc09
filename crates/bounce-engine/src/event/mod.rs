//! Typed event model.
//!
//! Events are a closed sum over four payload shapes. The category
//! discriminant is derived from the payload itself, so a tag/payload
//! mismatch is unrepresentable — the bus routes purely on
//! [`Event::category`].

mod bus;

pub use bus::EventBus;

use std::time::Duration;

use crate::input::Key;

/// One frame of simulation time has elapsed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrameTick {
    /// Wall-clock time since the previous tick. Non-negative by type.
    ///
    /// The very first tick measures from scheduler construction and can be
    /// arbitrarily large (window and GPU bring-up happen in between);
    /// callers that integrate positions should clamp it.
    pub dt: Duration,
}

/// A pointer button went down, in surface-space logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerClick {
    pub x: f32,
    pub y: f32,
}

/// A key went down (including platform key repeats).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyPress {
    pub key: Key,
}

/// The render surface changed size, in logical pixels.
///
/// Dispatched once synthetically before the first frame (the priming step)
/// and thereafter whenever the platform reports a size change.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceResize {
    pub w: f32,
    pub h: f32,
}

/// Event instance: exactly one payload shape is active.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    FrameTick(FrameTick),
    PointerClick(PointerClick),
    KeyPress(KeyPress),
    SurfaceResize(SurfaceResize),
}

/// Discriminant identifying which payload shape an event carries.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Category {
    Frame,
    Click,
    Key,
    Resize,
}

impl Category {
    pub(crate) const COUNT: usize = 4;

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Category::Frame => 0,
            Category::Click => 1,
            Category::Key => 2,
            Category::Resize => 3,
        }
    }
}

impl Event {
    /// Category of this event, in lock-step with the payload by construction.
    #[inline]
    pub fn category(&self) -> Category {
        match self {
            Event::FrameTick(_) => Category::Frame,
            Event::PointerClick(_) => Category::Click,
            Event::KeyPress(_) => Category::Key,
            Event::SurfaceResize(_) => Category::Resize,
        }
    }
}

impl From<FrameTick> for Event {
    #[inline]
    fn from(payload: FrameTick) -> Self {
        Event::FrameTick(payload)
    }
}

impl From<PointerClick> for Event {
    #[inline]
    fn from(payload: PointerClick) -> Self {
        Event::PointerClick(payload)
    }
}

impl From<KeyPress> for Event {
    #[inline]
    fn from(payload: KeyPress) -> Self {
        Event::KeyPress(payload)
    }
}

impl From<SurfaceResize> for Event {
    #[inline]
    fn from(payload: SurfaceResize) -> Self {
        Event::SurfaceResize(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_follows_payload() {
        let tick = Event::from(FrameTick {
            dt: Duration::from_millis(16),
        });
        assert_eq!(tick.category(), Category::Frame);

        let click = Event::from(PointerClick { x: 3.0, y: 4.0 });
        assert_eq!(click.category(), Category::Click);

        let key = Event::from(KeyPress { key: Key::P });
        assert_eq!(key.category(), Category::Key);

        let resize = Event::from(SurfaceResize { w: 800.0, h: 600.0 });
        assert_eq!(resize.category(), Category::Resize);
    }
}
