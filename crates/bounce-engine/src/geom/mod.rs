//! Geometry value types and the rectangle collision resolver.
//!
//! Convention: logical pixels, top-left origin, +Y down.

mod collide;
mod rect;
mod vec2;

pub use collide::{Contact, collide};
pub use rect::Rect;
pub use vec2::Vec2;
