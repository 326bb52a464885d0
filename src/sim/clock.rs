//! Wall-clock gated timers
//!
//! Every gate compares the frame's single time sample against the time it
//! last fired. Firing resets `last` to the sample itself, so a long stall
//! produces one catch-up tick rather than a burst.

use crate::tuning::Tuning;

/// A repeating gate with a minimum interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    interval: f64,
    last: f64,
}

impl Timer {
    pub fn new(interval: f64, start: f64) -> Self {
        Self {
            interval,
            last: start,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn last(&self) -> f64 {
        self.last
    }

    /// At least one interval has elapsed since the last firing
    pub fn ready(&self, now: f64) -> bool {
        now - self.last >= self.interval
    }

    /// Fire if ready; `last` becomes `now`
    pub fn fire(&mut self, now: f64) -> bool {
        if self.ready(now) {
            self.last = now;
            true
        } else {
            false
        }
    }
}

/// All simulation timers plus the current frame's time sample
#[derive(Debug, Clone)]
pub struct GameClock {
    now: f64,
    /// Brick spawning
    pub spawn: Timer,
    /// Bullet integration
    pub bullets: Timer,
    /// Brick integration (both lanes)
    pub bricks: Timer,
    /// Held-fire cooldown
    pub fire: Timer,
    /// Shared neutral-brick cooldown
    pub neutral: Timer,
}

impl GameClock {
    pub fn new(tuning: &Tuning, start: f64) -> Self {
        Self {
            now: start,
            spawn: Timer::new(tuning.spawn_interval, start),
            bullets: Timer::new(tuning.bullet_tick, start),
            bricks: Timer::new(tuning.brick_tick, start),
            fire: Timer::new(tuning.fire_cooldown, start),
            neutral: Timer::new(tuning.neutral_cooldown, start),
        }
    }

    /// Take this frame's time sample. Time never runs backwards.
    pub fn sample(&mut self, now: f64) -> f64 {
        if now > self.now {
            self.now = now;
        }
        self.now
    }

    pub fn now(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_gate() {
        let mut timer = Timer::new(0.5, 0.0);
        assert!(!timer.fire(0.25));
        assert!(timer.fire(0.5));
        assert_eq!(timer.last(), 0.5);
        assert!(!timer.fire(0.75));
    }

    #[test]
    fn test_stall_gives_single_catch_up() {
        let mut timer = Timer::new(0.01, 0.0);
        // A 1 second stall fires once, then waits a full interval again
        assert!(timer.fire(1.0));
        assert!(!timer.fire(1.005));
        assert!(timer.fire(1.02));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = GameClock::new(&Tuning::default(), 10.0);
        assert_eq!(clock.sample(12.0), 12.0);
        assert_eq!(clock.sample(11.0), 12.0);
        assert_eq!(clock.now(), 12.0);
        assert_eq!(clock.spawn.interval(), 1.0);
    }
}
