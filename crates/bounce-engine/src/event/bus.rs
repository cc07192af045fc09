use super::{Category, Event};

type Callback = Box<dyn FnMut(&Event)>;

/// Per-category subscriber lists.
///
/// Subscribers are registered during setup and never removed; within one
/// category, invocation order is subscription order, every dispatch. The
/// bus owns the boxed callbacks but not the state they capture — whatever
/// scope built a callback must outlive the bus.
///
/// Re-entrancy (subscribing from inside a callback) is unsupported; the
/// lists must not change during a dispatch. A panicking subscriber
/// propagates and takes the loop down with it — there is no per-subscriber
/// isolation.
#[derive(Default)]
pub struct EventBus {
    lists: [Vec<Callback>; Category::COUNT],
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            lists: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Appends `callback` to the list for `category`. O(1) amortized.
    pub fn subscribe(&mut self, category: Category, callback: impl FnMut(&Event) + 'static) {
        self.lists[category.index()].push(Box::new(callback));
    }

    /// Invokes every subscriber of the event's own category, in
    /// subscription order.
    pub fn dispatch(&mut self, event: &Event) {
        for callback in &mut self.lists[event.category().index()] {
            callback(event);
        }
    }

    /// Number of subscribers registered for `category`.
    pub fn subscriber_count(&self, category: Category) -> usize {
        self.lists[category.index()].len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::event::{FrameTick, KeyPress, PointerClick};
    use crate::input::Key;

    fn tick(ms: u64) -> Event {
        Event::from(FrameTick {
            dt: Duration::from_millis(ms),
        })
    }

    #[test]
    fn dispatch_reaches_only_matching_category() {
        let hits = Rc::new(RefCell::new(Vec::new()));

        let h = hits.clone();
        let mut bus = EventBus::new();
        bus.subscribe(Category::Frame, move |_| h.borrow_mut().push("frame"));
        let h = hits.clone();
        bus.subscribe(Category::Key, move |_| h.borrow_mut().push("key"));

        bus.dispatch(&Event::from(KeyPress { key: Key::A }));
        assert_eq!(*hits.borrow(), vec!["key"]);

        bus.dispatch(&tick(16));
        assert_eq!(*hits.borrow(), vec!["key", "frame"]);
    }

    #[test]
    fn subscription_order_replays_every_tick() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        for id in 0..3u8 {
            let order = order.clone();
            bus.subscribe(Category::Frame, move |_| order.borrow_mut().push(id));
        }

        for _ in 0..100 {
            bus.dispatch(&tick(16));
        }

        let recorded = order.borrow();
        assert_eq!(recorded.len(), 300);
        for frame in recorded.chunks(3) {
            assert_eq!(frame, [0, 1, 2]);
        }
    }

    #[test]
    fn later_subscriber_observes_earlier_mutation() {
        // Within one dispatch, subscriber 2 must see state written by
        // subscriber 1 — the ordering is load-bearing for simulation code.
        let value = Rc::new(RefCell::new(0u32));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let v = value.clone();
        bus.subscribe(Category::Frame, move |_| *v.borrow_mut() += 1);
        let (v, s) = (value.clone(), seen.clone());
        bus.subscribe(Category::Frame, move |_| s.borrow_mut().push(*v.borrow()));

        bus.dispatch(&tick(16));
        bus.dispatch(&tick(16));
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn payload_reaches_subscriber_intact() {
        let got = Rc::new(RefCell::new(None));
        let mut bus = EventBus::new();

        let g = got.clone();
        bus.subscribe(Category::Click, move |event| {
            if let Event::PointerClick(click) = event {
                *g.borrow_mut() = Some((click.x, click.y));
            }
        });

        bus.dispatch(&Event::from(PointerClick { x: 12.0, y: 34.0 }));
        assert_eq!(*got.borrow(), Some((12.0, 34.0)));
    }

    #[test]
    fn subscriber_count_tracks_registration() {
        let mut bus = EventBus::new();
        assert_eq!(bus.subscriber_count(Category::Resize), 0);
        bus.subscribe(Category::Resize, |_| {});
        bus.subscribe(Category::Resize, |_| {});
        assert_eq!(bus.subscriber_count(Category::Resize), 2);
        assert_eq!(bus.subscriber_count(Category::Frame), 0);
    }
}
