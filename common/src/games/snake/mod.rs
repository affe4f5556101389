mod clock;
mod collision;
mod events;
mod game_state;
mod obstacles;
mod power_up;
mod session;
mod settings;
mod snake;
mod spawner;
mod timers;
mod types;

pub use clock::SimulationClock;
pub use collision::detect_collision;
pub use events::{GameEvent, GamePresenter, GameSnapshot, NullPresenter, RecordingPresenter, SessionPhase};
pub use game_state::{SnakeGameState, SpawnedItem, StepOutcome};
pub use obstacles::ObstacleGenerator;
pub use power_up::PowerUpLifecycle;
pub use session::{GameSession, InputEvent};
pub use settings::GameSettings;
pub use snake::Snake;
pub use spawner::{DEFAULT_SPAWN_ATTEMPTS, Occupancy, Spawner};
pub use timers::{TimerHandle, TimerKind, TimerQueue};
pub use types::{Cell, DeathReason, Direction, FieldSize, ItemKind};
