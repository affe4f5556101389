use std::time::Duration;

use crate::best_score::BestScoreStore;
use crate::games::RandomSource;
use crate::log;
use super::clock::SimulationClock;
use super::events::{GameEvent, GamePresenter, GameSnapshot, SessionPhase};
use super::game_state::{SnakeGameState, SpawnedItem, StepOutcome};
use super::obstacles::ObstacleGenerator;
use super::power_up::PowerUpLifecycle;
use super::settings::GameSettings;
use super::timers::{TimerHandle, TimerKind, TimerQueue};
use super::types::{Cell, DeathReason, Direction, ItemKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Restart,
}

impl InputEvent {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            InputEvent::Up => Some(Direction::Up),
            InputEvent::Down => Some(Direction::Down),
            InputEvent::Left => Some(Direction::Left),
            InputEvent::Right => Some(Direction::Right),
            InputEvent::Restart => None,
        }
    }
}

/// One play-through at a time: owns the board, the clock, the session
/// timers and the collaborators. All mutation happens inside
/// `handle_input` and `advance`, which the driver calls from a single
/// thread.
pub struct GameSession<R, S, P>
where
    R: RandomSource,
    S: BestScoreStore,
    P: GamePresenter,
{
    settings: GameSettings,
    state: SnakeGameState,
    phase: SessionPhase,
    clock: SimulationClock,
    timers: TimerQueue,
    power_up: PowerUpLifecycle,
    obstacles: ObstacleGenerator,
    rng: R,
    best_score: u32,
    best_score_store: S,
    presenter: P,
    tick: u64,
    games_played: u64,
}

impl<R, S, P> GameSession<R, S, P>
where
    R: RandomSource,
    S: BestScoreStore,
    P: GamePresenter,
{
    /// Builds the session and runs `initialize`, so it starts `Running`.
    pub fn new(settings: GameSettings, rng: R, best_score_store: S, presenter: P) -> Self {
        let mut session = Self {
            state: SnakeGameState::new(&settings),
            phase: SessionPhase::Running,
            clock: SimulationClock::new(settings.base_tick_interval()),
            timers: TimerQueue::new(),
            power_up: PowerUpLifecycle::new(settings.power_up_duration()),
            obstacles: ObstacleGenerator::new(
                settings.obstacle_period(),
                settings.initial_obstacle_count,
            ),
            settings,
            rng,
            best_score: 0,
            best_score_store,
            presenter,
            tick: 0,
            games_played: 0,
        };
        session.initialize();
        session
    }

    /// Discards every entity and timer of the previous play-through and starts fresh.
    pub fn initialize(&mut self) {
        self.cancel_timers();
        self.timers = TimerQueue::new();

        self.state = SnakeGameState::new(&self.settings);
        self.phase = SessionPhase::Running;
        self.clock.reset();
        self.tick = 0;
        self.games_played += 1;
        self.best_score = self.best_score_store.load_best_score();

        self.emit(GameEvent::SessionStarted {
            best_score: self.best_score,
        });

        let spawned = self.state.decide_food_or_power_up(&mut self.rng);
        self.emit_spawned(spawned);

        let placed = self
            .state
            .spawn_obstacles(self.obstacles.initial_count(), &mut self.rng);
        for cell in placed {
            self.emit(GameEvent::ObstacleAdded { cell });
        }

        self.obstacles.start(&mut self.timers);

        log!(
            "Game #{} started: {}x{} grid, tick {}ms, {} obstacles, best score {}",
            self.games_played,
            self.state.field_size.width,
            self.state.field_size.height,
            self.clock.interval().as_millis(),
            self.state.obstacles.len(),
            self.best_score
        );

        self.draw();
    }

    /// Returns whether the input changed anything.
    pub fn handle_input(&mut self, input: InputEvent) -> bool {
        match (self.phase, input.direction()) {
            (SessionPhase::Running, Some(direction)) => self.state.queue_turn(direction),
            (SessionPhase::GameOver, None) => {
                self.initialize();
                true
            }
            _ => false,
        }
    }

    /// Moves session time forward by real elapsed time, firing timers and
    /// simulation steps in chronological order. A timer due at the same
    /// instant as a step fires first.
    pub fn advance(&mut self, elapsed: Duration) {
        let mut remaining = elapsed;

        while self.phase == SessionPhase::Running {
            let until_step = self.clock.time_until_step();
            let next = match self.timers.time_until_next() {
                Some(until_timer) => until_timer.min(until_step),
                None => until_step,
            };

            if next > remaining {
                self.clock.accumulate(remaining);
                self.timers.advance(remaining);
                return;
            }

            self.clock.accumulate(next);
            self.timers.advance(next);
            remaining -= next;

            while let Some((handle, kind)) = self.timers.pop_due() {
                self.fire_timer(handle, kind);
            }

            if self.clock.try_consume_step() {
                self.step();
            }
        }
    }

    fn fire_timer(&mut self, handle: TimerHandle, kind: TimerKind) {
        match kind {
            TimerKind::ObstacleSpawn if self.obstacles.owns(handle) => {
                for cell in self.state.spawn_obstacles(1, &mut self.rng) {
                    self.emit(GameEvent::ObstacleAdded { cell });
                }
            }
            TimerKind::PowerUpExpiry => {
                if self.power_up.on_expired(handle, &mut self.clock) {
                    log!("Power-up expired, tick back to {}ms", self.clock.interval().as_millis());
                    self.emit(GameEvent::PowerUpExpired);
                }
            }
            TimerKind::ObstacleSpawn => {
                log!("Ignoring stale obstacle timer {:?}", handle);
            }
        }
    }

    fn step(&mut self) {
        self.tick += 1;

        match self.state.step(&mut self.rng) {
            StepOutcome::Moved => {}
            StepOutcome::AteFood { cell, spawned } => {
                self.emit(GameEvent::FoodConsumed {
                    cell,
                    score: self.state.score,
                });
                self.emit_spawned(spawned);
            }
            StepOutcome::AtePowerUp { cell, spawned } => {
                self.power_up.activate(&mut self.timers, &mut self.clock);
                self.emit(GameEvent::PowerUpConsumed {
                    cell,
                    score: self.state.score,
                });
                self.emit_spawned(spawned);
            }
            StepOutcome::Collided { cell, reason } => {
                self.finish(cell, reason);
            }
        }

        self.draw();
    }

    fn finish(&mut self, cell: Cell, reason: DeathReason) {
        self.phase = SessionPhase::GameOver;
        self.clock.stop();
        self.cancel_timers();

        let score = self.state.score;
        let new_best = score > self.best_score;
        if new_best {
            self.best_score = score;
            self.best_score_store.save_best_score(score);
        }

        log!(
            "Game #{} over after {} ticks: snake {} at ({}, {}), score {}{}",
            self.games_played,
            self.tick,
            reason,
            cell.x,
            cell.y,
            score,
            if new_best { " (new best)" } else { "" }
        );

        self.emit(GameEvent::Collided { cell, reason });
        self.emit(GameEvent::GameOver {
            score,
            best_score: self.best_score,
            new_best,
        });
    }

    /// Cancels every outstanding session timer and drops the speed boost.
    fn cancel_timers(&mut self) {
        self.obstacles.stop(&mut self.timers);
        self.power_up.deactivate(&mut self.timers, &mut self.clock);
        debug_assert!(self.timers.is_empty());
    }

    fn emit_spawned(&mut self, spawned: Option<SpawnedItem>) {
        let Some(item) = spawned else {
            return;
        };
        let event = match item.kind {
            ItemKind::Food => GameEvent::FoodSpawned { cell: item.cell },
            ItemKind::PowerUp => GameEvent::PowerUpSpawned { cell: item.cell },
        };
        self.emit(event);
    }

    fn emit(&mut self, event: GameEvent) {
        self.presenter.handle_event(&event);
    }

    fn draw(&mut self) {
        let snapshot = self.snapshot();
        self.presenter.draw_frame(&snapshot);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut obstacles: Vec<Cell> = self.state.obstacles.iter().copied().collect();
        obstacles.sort();

        GameSnapshot {
            phase: self.phase,
            field_size: self.state.field_size,
            snake: self.state.snake.body().iter().copied().collect(),
            food: self.state.food,
            power_up: self.state.power_up,
            obstacles,
            score: self.state.score,
            best_score: self.best_score,
            tick: self.tick,
            tick_interval: self.clock.interval(),
            power_up_active: self.power_up.is_active(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn state(&self) -> &SnakeGameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn tick_interval(&self) -> Duration {
        self.clock.interval()
    }

    pub fn is_power_up_active(&self) -> bool {
        self.power_up.is_active()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Time since the current play-through started.
    pub fn elapsed(&self) -> Duration {
        self.timers.now()
    }

    pub fn time_until_step(&self) -> Duration {
        self.clock.time_until_step()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn best_score_store(&self) -> &S {
        &self.best_score_store
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SnakeGameState {
        &mut self.state
    }
}
