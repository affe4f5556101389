use std::collections::VecDeque;

use super::types::{Cell, Direction};

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    turn_locked: bool,
}

impl Snake {
    /// Head at `head`, remaining segments trailing behind it, opposite to `direction`.
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = head;
        body.push_back(segment);
        for _ in 1..length {
            segment = segment.neighbor(behind);
            body.push_back(segment);
        }

        Self {
            body,
            direction,
            pending_direction: None,
            turn_locked: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: &[Cell], direction: Direction) -> Self {
        Self {
            body: cells.iter().copied().collect(),
            direction,
            pending_direction: None,
            turn_locked: false,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body.contains(cell)
    }

    /// Buffers a turn for the next step. Every request locks turning until
    /// that step, including ones rejected as reversals.
    pub fn queue_turn(&mut self, direction: Direction) -> bool {
        if self.turn_locked {
            return false;
        }
        self.turn_locked = true;

        if direction.is_opposite(&self.direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Applies the buffered turn, releases the lock and returns the cell the head moves to.
    pub fn begin_step(&mut self) -> Cell {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
        self.turn_locked = false;
        self.head().neighbor(self.direction)
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub fn drop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trails_behind_head() {
        let snake = Snake::new(Cell::new(10, 10), Direction::Right, 3);
        let cells: Vec<Cell> = snake.body().iter().copied().collect();
        assert_eq!(cells, vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]);
        assert_eq!(snake.tail(), Cell::new(8, 10));
    }

    #[test]
    fn test_reverse_turn_is_rejected_and_locks_the_tick() {
        let mut snake = Snake::new(Cell::new(10, 10), Direction::Right, 3);
        assert!(!snake.queue_turn(Direction::Left));
        assert!(!snake.queue_turn(Direction::Up));
        assert_eq!(snake.pending_direction(), None);

        let next = snake.begin_step();
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(next, Cell::new(11, 10));
    }

    #[test]
    fn test_only_first_turn_per_tick_applies() {
        let mut snake = Snake::new(Cell::new(10, 10), Direction::Right, 3);
        assert!(snake.queue_turn(Direction::Up));
        assert!(!snake.queue_turn(Direction::Down));
        assert_eq!(snake.begin_step(), Cell::new(10, 9));
        assert_eq!(snake.direction(), Direction::Up);

        assert!(snake.queue_turn(Direction::Left));
        assert_eq!(snake.begin_step(), Cell::new(9, 10));
    }

    #[test]
    fn test_push_head_and_drop_tail_keep_length() {
        let mut snake = Snake::new(Cell::new(10, 10), Direction::Right, 3);
        let next = snake.begin_step();
        snake.push_head(next);
        assert_eq!(snake.drop_tail(), Some(Cell::new(8, 10)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(11, 10));
    }
}
