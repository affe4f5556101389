use std::collections::HashSet;

use crate::games::RandomSource;
use crate::log;
use super::collision::detect_collision;
use super::settings::GameSettings;
use super::snake::Snake;
use super::spawner::Spawner;
use super::types::{Cell, DeathReason, Direction, FieldSize, ItemKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnedItem {
    pub kind: ItemKind,
    pub cell: Cell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    AteFood { cell: Cell, spawned: Option<SpawnedItem> },
    AtePowerUp { cell: Cell, spawned: Option<SpawnedItem> },
    Collided { cell: Cell, reason: DeathReason },
}

/// Board contents of one session: snake, the single item slot, obstacles
/// and score. Timing lives in the session.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    pub field_size: FieldSize,
    pub snake: Snake,
    pub food: Option<Cell>,
    pub power_up: Option<Cell>,
    pub obstacles: HashSet<Cell>,
    pub score: u32,
    food_reward: u32,
    power_up_reward: u32,
    power_up_spawn_chance: f64,
    obstacle_head_clearance: i32,
    spawner: Spawner,
}

impl SnakeGameState {
    /// Snake centred and facing right; no items or obstacles yet.
    pub fn new(settings: &GameSettings) -> Self {
        let field_size = settings.field_size();
        let snake = Snake::new(
            field_size.center(),
            Direction::Right,
            settings.initial_snake_length as usize,
        );

        Self {
            field_size,
            snake,
            food: None,
            power_up: None,
            obstacles: HashSet::new(),
            score: 0,
            food_reward: settings.food_reward,
            power_up_reward: settings.power_up_reward,
            power_up_spawn_chance: settings.power_up_spawn_chance,
            obstacle_head_clearance: settings.obstacle_head_clearance,
            spawner: Spawner::new(field_size, settings.spawn_attempts),
        }
    }

    pub fn queue_turn(&mut self, direction: Direction) -> bool {
        self.snake.queue_turn(direction)
    }

    /// Fills the item slot unless a power-up is already waiting. Either kind
    /// clears the other, so at most one item is ever on the board.
    pub fn decide_food_or_power_up<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Option<SpawnedItem> {
        if self.power_up.is_some() {
            return None;
        }

        let kind = if rng.next_unit() < self.power_up_spawn_chance {
            ItemKind::PowerUp
        } else {
            ItemKind::Food
        };

        let cell = self.spawner.find_free_cell(
            rng,
            &[&self.snake, &self.obstacles, &self.food, &self.power_up],
            None,
        );

        match kind {
            ItemKind::PowerUp => {
                self.food = None;
                self.power_up = cell;
            }
            ItemKind::Food => {
                self.power_up = None;
                if cell.is_some() {
                    self.food = cell;
                }
            }
        }

        match cell {
            Some(cell) => Some(SpawnedItem { kind, cell }),
            None => {
                log!("No free cell for {:?} after {} attempts", kind, self.spawner.attempts());
                None
            }
        }
    }

    /// Tries to place `count` obstacles away from the snake head. Failed
    /// attempts are skipped, so fewer cells than requested may come back.
    pub fn spawn_obstacles<R: RandomSource + ?Sized>(&mut self, count: u32, rng: &mut R) -> Vec<Cell> {
        let mut placed = Vec::new();
        for _ in 0..count {
            let head = self.snake.head();
            let clearance = self.obstacle_head_clearance;
            let away_from_head = move |cell: &Cell| !cell.is_near(&head, clearance);

            let cell = self.spawner.find_free_cell(
                rng,
                &[&self.snake, &self.obstacles, &self.food, &self.power_up],
                Some(&away_from_head),
            );

            match cell {
                Some(cell) => {
                    self.obstacles.insert(cell);
                    placed.push(cell);
                }
                None => log!("Skipping obstacle: no free cell after {} attempts", self.spawner.attempts()),
            }
        }
        placed
    }

    /// Moves the snake one cell. The tail is released before the collision
    /// check, so following the tail into its vacated cell is safe.
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> StepOutcome {
        let new_head = self.snake.begin_step();

        let eaten = if self.food == Some(new_head) {
            Some(ItemKind::Food)
        } else if self.power_up == Some(new_head) {
            Some(ItemKind::PowerUp)
        } else {
            None
        };

        self.snake.push_head(new_head);
        if eaten.is_none() {
            self.snake.drop_tail();
        }

        if let Some(reason) = detect_collision(&self.field_size, self.snake.body(), &self.obstacles) {
            return StepOutcome::Collided {
                cell: new_head,
                reason,
            };
        }

        match eaten {
            Some(ItemKind::Food) => {
                self.score = self.score.saturating_add(self.food_reward);
                self.food = None;
                let spawned = self.decide_food_or_power_up(rng);
                StepOutcome::AteFood {
                    cell: new_head,
                    spawned,
                }
            }
            Some(ItemKind::PowerUp) => {
                self.score = self.score.saturating_add(self.power_up_reward);
                self.power_up = None;
                let spawned = self.decide_food_or_power_up(rng);
                StepOutcome::AtePowerUp {
                    cell: new_head,
                    spawned,
                }
            }
            None => StepOutcome::Moved,
        }
    }
}
