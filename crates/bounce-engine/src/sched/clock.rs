use std::time::{Duration, Instant};

/// Frame clock producing non-negative deltas between consecutive ticks.
///
/// The baseline is set at construction, so the first tick measures the
/// whole bring-up interval (window and GPU acquisition happen between
/// scheduler construction and the first frame) and can be arbitrarily
/// large. Deliberately no clamping — callers that integrate positions
/// clamp on their side.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
        }
    }

    /// Advances the clock and returns the time since the previous tick.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        self.frames = self.frames.wrapping_add(1);
        dt
    }

    /// Monotonic count of ticks taken so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_count_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frames(), 0);
        clock.tick();
        clock.tick();
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn first_tick_measures_from_construction() {
        let clock_birth = Instant::now();
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(5));

        let dt = clock.tick();
        // No upper bound asserted: the first delta is allowed to be large.
        assert!(dt >= Duration::from_millis(5));
        assert!(dt <= clock_birth.elapsed());
    }

    #[test]
    fn consecutive_ticks_are_disjoint_intervals() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick();

        std::thread::sleep(Duration::from_millis(2));
        let second = clock.tick();

        // The second delta covers only time after the first tick.
        assert!(second >= Duration::from_millis(2));
        assert!(second <= start.elapsed());
    }
}
