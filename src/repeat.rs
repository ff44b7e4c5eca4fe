use std::time::{Duration, Instant};

/// Default spacing between repeated deletes while backspace is held.
pub const BACKSPACE_REPEAT_INTERVAL: Duration = Duration::from_millis(50);

/// A fixed-interval timer driven by the host's event loop.
///
/// The timer does not run on its own thread; the host calls [`RepeatTimer::due`]
/// from its loop and performs one repeat per returned tick.
#[derive(Debug, Clone)]
pub struct RepeatTimer {
    interval: Duration,
    next_fire: Option<Instant>,
}

impl Default for RepeatTimer {
    fn default() -> Self {
        Self::new(BACKSPACE_REPEAT_INTERVAL)
    }
}

impl RepeatTimer {
    pub fn new(interval: Duration) -> Self {
        // a zero interval would fire unboundedly on every poll
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next_fire: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Arm the timer; the first tick is one interval after `now`.
    /// Restarting a running timer re-arms it from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_fire = Some(now + self.interval);
    }

    /// Cancel the timer. Stopping an idle timer does nothing.
    pub fn stop(&mut self) {
        self.next_fire = None;
    }

    /// Number of ticks that elapsed up to `now`, advancing the schedule.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_fire else {
            return 0;
        };
        let mut ticks = 0u32;
        while next <= now {
            ticks = ticks.saturating_add(1);
            next += self.interval;
        }
        self.next_fire = Some(next);
        ticks
    }
}
