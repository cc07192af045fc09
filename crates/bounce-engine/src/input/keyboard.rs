use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::Key;

/// Handle to the currently-held key set.
///
/// Clones share one table. The scheduler updates it as key events arrive;
/// subscribers keep a clone and poll it for "is this key held" movement
/// logic, independent of discrete `KeyPress` events. Single-threaded by
/// design — the whole loop runs on one thread.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: Rc<RefCell<HashSet<Key>>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is currently held down.
    pub fn is_down(&self, key: Key) -> bool {
        self.held.borrow().contains(&key)
    }

    pub(crate) fn press(&self, key: Key) {
        self.held.borrow_mut().insert(key);
    }

    pub(crate) fn release(&self, key: Key) {
        self.held.borrow_mut().remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_round_trip() {
        let keyboard = Keyboard::new();
        assert!(!keyboard.is_down(Key::A));

        keyboard.press(Key::A);
        assert!(keyboard.is_down(Key::A));
        assert!(!keyboard.is_down(Key::D));

        keyboard.release(Key::A);
        assert!(!keyboard.is_down(Key::A));
    }

    #[test]
    fn clones_share_the_table() {
        let keyboard = Keyboard::new();
        let reader = keyboard.clone();

        keyboard.press(Key::Space);
        assert!(reader.is_down(Key::Space));
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let keyboard = Keyboard::new();
        keyboard.press(Key::P);
        keyboard.press(Key::P);
        keyboard.release(Key::P);
        assert!(!keyboard.is_down(Key::P));
    }
}
