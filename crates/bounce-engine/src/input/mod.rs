//! Platform-agnostic input identifiers and held-key state.

mod key;
mod keyboard;

pub use key::Key;
pub use keyboard::Keyboard;

pub(crate) use key::map_key;
