use std::time::Duration;

use super::types::{Cell, DeathReason, FieldSize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    GameOver,
}

/// Domain events for the presentation layer. The engine never draws.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    SessionStarted { best_score: u32 },
    FoodSpawned { cell: Cell },
    PowerUpSpawned { cell: Cell },
    FoodConsumed { cell: Cell, score: u32 },
    PowerUpConsumed { cell: Cell, score: u32 },
    PowerUpExpired,
    ObstacleAdded { cell: Cell },
    Collided { cell: Cell, reason: DeathReason },
    GameOver { score: u32, best_score: u32, new_best: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub phase: SessionPhase,
    pub field_size: FieldSize,
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub power_up: Option<Cell>,
    pub obstacles: Vec<Cell>,
    pub score: u32,
    pub best_score: u32,
    pub tick: u64,
    pub tick_interval: Duration,
    pub power_up_active: bool,
}

pub trait GamePresenter {
    /// Called once per simulation step and once when a session starts.
    fn draw_frame(&mut self, snapshot: &GameSnapshot);

    fn handle_event(&mut self, event: &GameEvent);
}

/// Presenter that drops everything, for headless sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl GamePresenter for NullPresenter {
    fn draw_frame(&mut self, _snapshot: &GameSnapshot) {}

    fn handle_event(&mut self, _event: &GameEvent) {}
}

/// Keeps every frame and event it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    pub frames: Vec<GameSnapshot>,
    pub events: Vec<GameEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&GameSnapshot> {
        self.frames.last()
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GamePresenter for RecordingPresenter {
    fn draw_frame(&mut self, snapshot: &GameSnapshot) {
        self.frames.push(snapshot.clone());
    }

    fn handle_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
