use serde::{Deserialize, Serialize};

/// A grid coordinate in cell units. Signed so a head that has left the
/// board is still representable for the wall check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn neighbor(&self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// True when both axis distances are below `radius`.
    pub fn is_near(&self, other: &Cell, radius: i32) -> bool {
        (self.x - other.x).abs() < radius && (self.y - other.y).abs() < radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Screen coordinates: `y` grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    ObstacleCollision,
}

impl std::fmt::Display for DeathReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeathReason::WallCollision => write!(f, "hit the wall"),
            DeathReason::SelfCollision => write!(f, "bit its own tail"),
            DeathReason::ObstacleCollision => write!(f, "crashed into an obstacle"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Food,
    PowerUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSize {
    pub width: i32,
    pub height: i32,
}

impl FieldSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions are expected to be multiples of `cell_size_px`;
    /// settings validation enforces it.
    pub fn from_pixels(width_px: u32, height_px: u32, cell_size_px: u32) -> Self {
        Self {
            width: (width_px / cell_size_px) as i32,
            height: (height_px / cell_size_px) as i32,
        }
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Row-major index to coordinate.
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if index >= self.cell_count() {
            return None;
        }
        let width = self.width as usize;
        Some(Cell::new((index % width) as i32, (index / width) as i32))
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }
}
