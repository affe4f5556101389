use std::time::Duration;

use super::timers::{TimerHandle, TimerKind, TimerQueue};

/// Owns the periodic obstacle timer of a session. Placement itself lives on
/// the game state, which knows the occupied cells.
#[derive(Clone, Debug)]
pub struct ObstacleGenerator {
    period: Duration,
    initial_count: u32,
    timer: Option<TimerHandle>,
}

impl ObstacleGenerator {
    pub fn new(period: Duration, initial_count: u32) -> Self {
        Self {
            period,
            initial_count,
            timer: None,
        }
    }

    pub fn initial_count(&self) -> u32 {
        self.initial_count
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn start(&mut self, timers: &mut TimerQueue) {
        self.stop(timers);
        self.timer = Some(timers.schedule_repeating(self.period, TimerKind::ObstacleSpawn));
    }

    pub fn stop(&mut self, timers: &mut TimerQueue) {
        if let Some(handle) = self.timer.take() {
            timers.cancel(handle);
        }
    }

    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.timer == Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_schedules_single_repeating_timer() {
        let mut timers = TimerQueue::new();
        let mut generator = ObstacleGenerator::new(Duration::from_secs(5), 3);
        generator.start(&mut timers);
        generator.start(&mut timers);
        assert_eq!(timers.len(), 1);
        assert!(generator.is_running());

        timers.advance(Duration::from_secs(5));
        let (handle, kind) = timers.pop_due().unwrap();
        assert_eq!(kind, TimerKind::ObstacleSpawn);
        assert!(generator.owns(handle));
    }

    #[test]
    fn test_stop_cancels_timer() {
        let mut timers = TimerQueue::new();
        let mut generator = ObstacleGenerator::new(Duration::from_secs(5), 3);
        generator.start(&mut timers);
        generator.stop(&mut timers);
        assert!(timers.is_empty());
        assert!(!generator.is_running());
    }
}
