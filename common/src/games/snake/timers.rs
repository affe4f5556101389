use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    ObstacleSpawn,
    PowerUpExpiry,
}

#[derive(Clone, Debug)]
struct ScheduledTimer {
    handle: TimerHandle,
    kind: TimerKind,
    deadline: Duration,
    period: Option<Duration>,
}

/// Wall-clock timers for one game session, measured from session start.
/// The owner moves time forward with `advance` and drains due timers with
/// `pop_due`; nothing fires on its own.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    timers: Vec<ScheduledTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle {
        self.insert(delay, None, kind)
    }

    /// `period` must be non-zero.
    pub fn schedule_repeating(&mut self, period: Duration, kind: TimerKind) -> TimerHandle {
        self.insert(period, Some(period), kind)
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(ScheduledTimer {
            handle,
            kind,
            deadline: self.now + delay,
            period,
        });
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        self.timers.len() != before
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.timers
            .iter()
            .map(|timer| timer.deadline.saturating_sub(self.now))
            .min()
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    /// Earliest due timer, ties broken by scheduling order. Repeating timers
    /// are rearmed one period after their previous deadline.
    pub fn pop_due(&mut self) -> Option<(TimerHandle, TimerKind)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= self.now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.handle.0))
            .map(|(index, _)| index)?;

        let timer = &mut self.timers[index];
        let fired = (timer.handle, timer.kind);
        match timer.period {
            Some(period) => timer.deadline += period,
            None => {
                self.timers.swap_remove(index);
            }
        }
        Some(fired)
    }
}
