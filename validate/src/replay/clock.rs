//! Tick pacing for replay
//!
//! Supports multiple replay speeds:
//! - Instant (0.0): No delays, for CI
//! - Realtime (1.0): One tick every 600 ms, as in game
//! - Custom speed: Any multiplier (0.5x slow-mo, 10x fast-forward, etc.)

use std::time::Duration;

use spotwatch_core::{TICK_MILLIS, Tick};

#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    current: Tick,
    /// Speed multiplier (1.0 = realtime, 0.0 = instant, 10.0 = 10x speed)
    speed_multiplier: f32,
}

impl TickClock {
    pub fn new(speed_multiplier: f32) -> Self {
        Self {
            current: 0,
            speed_multiplier: speed_multiplier.max(0.0),
        }
    }

    /// Create a clock for instant (accelerated) replay
    pub fn instant() -> Self {
        Self::new(0.0)
    }

    /// Wall-clock delay for advancing `ticks` ticks at this speed
    pub fn delay_for(&self, ticks: Tick) -> Duration {
        if self.speed_multiplier <= 0.0 {
            return Duration::ZERO;
        }
        let millis = f64::from(ticks) * f64::from(TICK_MILLIS) / f64::from(self.speed_multiplier);
        Duration::from_millis(millis as u64)
    }

    /// Advance to `tick`, sleeping for the elapsed game time when paced
    pub fn advance_to(&mut self, tick: Tick) {
        if tick > self.current {
            let delay = self.delay_for(tick - self.current);
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
        self.current = self.current.max(tick);
    }

    pub fn current(&self) -> Tick {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_never_waits() {
        let mut clock = TickClock::instant();
        assert_eq!(clock.delay_for(1000), Duration::ZERO);
        clock.advance_to(500);
        assert_eq!(clock.current(), 500);
        clock.advance_to(10);
        assert_eq!(clock.current(), 500);
    }

    #[test]
    fn test_paced_delay() {
        assert_eq!(TickClock::new(1.0).delay_for(1), Duration::from_millis(600));
        assert_eq!(TickClock::new(10.0).delay_for(10), Duration::from_millis(600));
        assert_eq!(TickClock::new(-3.0).delay_for(10), Duration::ZERO);
    }
}
