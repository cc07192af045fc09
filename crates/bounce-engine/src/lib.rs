//! Minimal real-time interactive application framework.
//!
//! One render surface, one typed event bus, one single-threaded frame
//! loop, and an axis-aligned rectangle collision resolver:
//!
//! - `geom`: value types and the collision resolver
//! - `event`: the closed event sum type and the per-category bus
//! - `surface`: window + wgpu drawing context, owned as a unit
//! - `sched`: the scheduler that polls input, ticks, renders, presents
//! - `input`: key identifiers and the held-key table
//! - `logging`: env_logger bootstrap

pub mod event;
pub mod geom;
pub mod input;
pub mod logging;
pub mod paint;
pub mod sched;
pub mod surface;

pub use event::{Category, Event, EventBus, FrameTick, KeyPress, PointerClick, SurfaceResize};
pub use geom::{Contact, Rect, Vec2, collide};
pub use input::{Key, Keyboard};
pub use paint::Color;
pub use sched::{Config, FrameClock, Scheduler};
pub use surface::Surface;
