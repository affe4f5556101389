use std::time::Duration;

/// Fixed-step accumulator. Elapsed time is banked and each step withdraws
/// exactly one interval, so leftover time carries into the next step.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    base_interval: Duration,
    interval: Duration,
    accumulated: Duration,
    running: bool,
}

impl SimulationClock {
    pub fn new(base_interval: Duration) -> Self {
        Self {
            base_interval,
            interval: base_interval,
            accumulated: Duration::ZERO,
            running: true,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn base_interval(&self) -> Duration {
        self.base_interval
    }

    pub fn is_boosted(&self) -> bool {
        self.interval != self.base_interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn apply_speed_boost(&mut self) {
        self.interval = self.base_interval / 2;
    }

    pub fn restore_base_interval(&mut self) {
        self.interval = self.base_interval;
    }

    pub fn reset(&mut self) {
        self.interval = self.base_interval;
        self.accumulated = Duration::ZERO;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn accumulate(&mut self, elapsed: Duration) {
        if self.running {
            self.accumulated += elapsed;
        }
    }

    /// Zero when a step is already due. `Duration::MAX` while stopped.
    pub fn time_until_step(&self) -> Duration {
        if !self.running {
            return Duration::MAX;
        }
        self.interval.saturating_sub(self.accumulated)
    }

    pub fn try_consume_step(&mut self) -> bool {
        if !self.running || self.accumulated < self.interval {
            return false;
        }
        self.accumulated -= self.interval;
        true
    }

    /// Banks `elapsed` and drains every step that is due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulate(elapsed);
        let mut steps = 0;
        while self.try_consume_step() {
            steps += 1;
        }
        steps
    }
}
