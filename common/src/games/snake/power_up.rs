use std::time::Duration;

use super::clock::SimulationClock;
use super::timers::{TimerHandle, TimerKind, TimerQueue};

/// Speed boost with a single pending expiry. Activating again restarts the
/// window instead of stacking.
#[derive(Clone, Debug)]
pub struct PowerUpLifecycle {
    duration: Duration,
    expiry: Option<TimerHandle>,
}

impl PowerUpLifecycle {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            expiry: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.expiry.is_some()
    }

    pub fn activate(&mut self, timers: &mut TimerQueue, clock: &mut SimulationClock) {
        if let Some(previous) = self.expiry.take() {
            timers.cancel(previous);
        }
        clock.apply_speed_boost();
        self.expiry = Some(timers.schedule_once(self.duration, TimerKind::PowerUpExpiry));
    }

    /// Handles a fired expiry timer. Returns false for a handle this
    /// lifecycle no longer owns.
    pub fn on_expired(&mut self, handle: TimerHandle, clock: &mut SimulationClock) -> bool {
        if self.expiry != Some(handle) {
            return false;
        }
        self.expiry = None;
        clock.restore_base_interval();
        true
    }

    pub fn deactivate(&mut self, timers: &mut TimerQueue, clock: &mut SimulationClock) {
        if let Some(handle) = self.expiry.take() {
            timers.cancel(handle);
        }
        clock.restore_base_interval();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn fire_due(timers: &mut TimerQueue, power_up: &mut PowerUpLifecycle, clock: &mut SimulationClock) {
        while let Some((handle, kind)) = timers.pop_due() {
            assert_eq!(kind, TimerKind::PowerUpExpiry);
            power_up.on_expired(handle, clock);
        }
    }

    #[test]
    fn test_activation_halves_interval_until_expiry() {
        let mut timers = TimerQueue::new();
        let mut clock = SimulationClock::new(ms(150));
        let mut power_up = PowerUpLifecycle::new(ms(5000));

        power_up.activate(&mut timers, &mut clock);
        assert!(power_up.is_active());
        assert_eq!(clock.interval(), ms(75));

        timers.advance(ms(4999));
        fire_due(&mut timers, &mut power_up, &mut clock);
        assert_eq!(clock.interval(), ms(75));

        timers.advance(ms(1));
        fire_due(&mut timers, &mut power_up, &mut clock);
        assert_eq!(clock.interval(), ms(150));
        assert!(!power_up.is_active());
    }

    #[test]
    fn test_reactivation_restarts_window() {
        let mut timers = TimerQueue::new();
        let mut clock = SimulationClock::new(ms(150));
        let mut power_up = PowerUpLifecycle::new(ms(5000));

        power_up.activate(&mut timers, &mut clock);
        timers.advance(ms(2000));
        power_up.activate(&mut timers, &mut clock);
        assert_eq!(clock.interval(), ms(75));
        assert_eq!(timers.len(), 1);

        timers.advance(ms(3000));
        fire_due(&mut timers, &mut power_up, &mut clock);
        assert_eq!(clock.interval(), ms(75));

        timers.advance(ms(2000));
        fire_due(&mut timers, &mut power_up, &mut clock);
        assert_eq!(clock.interval(), ms(150));
    }

    #[test]
    fn test_deactivate_cancels_pending_expiry() {
        let mut timers = TimerQueue::new();
        let mut clock = SimulationClock::new(ms(150));
        let mut power_up = PowerUpLifecycle::new(ms(5000));

        power_up.activate(&mut timers, &mut clock);
        power_up.deactivate(&mut timers, &mut clock);
        assert!(timers.is_empty());
        assert_eq!(clock.interval(), ms(150));
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        let mut timers = TimerQueue::new();
        let mut clock = SimulationClock::new(ms(150));
        let mut power_up = PowerUpLifecycle::new(ms(5000));

        let stale = timers.schedule_once(ms(1), TimerKind::PowerUpExpiry);
        power_up.activate(&mut timers, &mut clock);
        assert!(!power_up.on_expired(stale, &mut clock));
        assert_eq!(clock.interval(), ms(75));
    }
}
