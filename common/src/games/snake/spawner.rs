use std::collections::{HashSet, VecDeque};

use crate::games::RandomSource;
use super::snake::Snake;
use super::types::{Cell, FieldSize};

pub const DEFAULT_SPAWN_ATTEMPTS: u32 = 100;

/// Anything that blocks a cell for placement.
pub trait Occupancy {
    fn occupies(&self, cell: &Cell) -> bool;
}

impl Occupancy for Snake {
    fn occupies(&self, cell: &Cell) -> bool {
        self.contains(cell)
    }
}

impl Occupancy for VecDeque<Cell> {
    fn occupies(&self, cell: &Cell) -> bool {
        self.contains(cell)
    }
}

impl Occupancy for HashSet<Cell> {
    fn occupies(&self, cell: &Cell) -> bool {
        self.contains(cell)
    }
}

impl Occupancy for Option<Cell> {
    fn occupies(&self, cell: &Cell) -> bool {
        self.as_ref() == Some(cell)
    }
}

/// Reject sampling over the grid with a fixed attempt budget. Running out of
/// attempts is a normal outcome on a crowded board.
#[derive(Clone, Debug)]
pub struct Spawner {
    field_size: FieldSize,
    attempts: u32,
}

impl Spawner {
    pub fn new(field_size: FieldSize, attempts: u32) -> Self {
        Self { field_size, attempts }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn find_free_cell<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        excluded: &[&dyn Occupancy],
        constraint: Option<&dyn Fn(&Cell) -> bool>,
    ) -> Option<Cell> {
        if self.field_size.cell_count() == 0 {
            return None;
        }

        for _ in 0..self.attempts {
            let x = rng.next_index(self.field_size.width as usize) as i32;
            let y = rng.next_index(self.field_size.height as usize) as i32;
            let candidate = Cell::new(x, y);

            if excluded.iter().any(|set| set.occupies(&candidate)) {
                continue;
            }
            if let Some(accept) = constraint
                && !accept(&candidate)
            {
                continue;
            }
            return Some(candidate);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::snake::types::Direction;
    use crate::games::test_support::ScriptedRandom;

    #[test]
    fn test_finds_cell_outside_all_exclusions() {
        let field = FieldSize::new(20, 20);
        let spawner = Spawner::new(field, DEFAULT_SPAWN_ATTEMPTS);
        let snake = Snake::new(Cell::new(10, 10), Direction::Right, 3);
        let obstacles: HashSet<Cell> = [Cell::new(1, 1), Cell::new(2, 2)].into_iter().collect();
        let food = Some(Cell::new(3, 3));
        let mut rng = SessionRng::new(42);

        for _ in 0..200 {
            let cell = spawner
                .find_free_cell(&mut rng, &[&snake, &obstacles, &food], None)
                .unwrap();
            assert!(field.contains(&cell));
            assert!(!snake.contains(&cell));
            assert!(!obstacles.contains(&cell));
            assert_ne!(Some(cell), food);
        }
    }

    #[test]
    fn test_rejected_candidates_are_skipped() {
        let spawner = Spawner::new(FieldSize::new(20, 20), DEFAULT_SPAWN_ATTEMPTS);
        let food = Some(Cell::new(4, 4));
        let mut rng = ScriptedRandom::with_indices(&[4, 4, 5, 6]);
        let cell = spawner.find_free_cell(&mut rng, &[&food], None);
        assert_eq!(cell, Some(Cell::new(5, 6)));
    }

    #[test]
    fn test_constraint_filters_candidates() {
        let spawner = Spawner::new(FieldSize::new(20, 20), DEFAULT_SPAWN_ATTEMPTS);
        let head = Cell::new(10, 10);
        let away_from_head = |cell: &Cell| !cell.is_near(&head, 3);
        let mut rng = ScriptedRandom::with_indices(&[11, 11, 12, 8, 13, 10]);
        let cell = spawner.find_free_cell(&mut rng, &[], Some(&away_from_head));
        assert_eq!(cell, Some(Cell::new(13, 10)));
    }

    #[test]
    fn test_exhausted_budget_returns_none() {
        let field = FieldSize::new(8, 8);
        let spawner = Spawner::new(field, DEFAULT_SPAWN_ATTEMPTS);
        let mut occupied = HashSet::new();
        for index in 0..field.cell_count() {
            occupied.insert(field.cell_at(index).unwrap());
        }
        let mut rng = SessionRng::new(1);
        assert_eq!(spawner.find_free_cell(&mut rng, &[&occupied], None), None);
    }

    #[test]
    fn test_budget_bounds_the_number_of_draws() {
        let spawner = Spawner::new(FieldSize::new(8, 8), 5);
        let mut rng = ScriptedRandom::with_indices(&[]);
        let never = |_: &Cell| false;
        assert_eq!(spawner.find_free_cell(&mut rng, &[], Some(&never)), None);
        assert_eq!(rng.index_draws(), 10);
    }
}
