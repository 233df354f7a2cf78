// Movement directions on the tile grid

use glam::Vec2;

/// A single-axis step on the tile grid, or no step at all.
///
/// Tile rows grow downward, so `Up` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Standing still
    Idle,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Idle
    }
}

impl Direction {
    /// The four directions a character can step in
    pub const STEPS: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Resolve a raw `(x, y)` vector.
    ///
    /// Checks `x == -1`, `x == 1`, `y == -1`, `y == 1` in that order and takes
    /// the first match, so diagonals collapse onto their horizontal part.
    /// Anything else is `Idle`.
    pub fn from_vector(x: i32, y: i32) -> Self {
        match (x, y) {
            (-1, _) => Self::Left,
            (1, _) => Self::Right,
            (_, -1) => Self::Up,
            (_, 1) => Self::Down,
            _ => Self::Idle,
        }
    }

    /// Tile offset for one step
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Idle => (0, 0),
        }
    }

    /// Tile offset as a vector, for interpolating positions
    pub fn delta(self) -> Vec2 {
        let (x, y) = self.offset();
        Vec2::new(x as f32, y as f32)
    }

    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Idle => "idle",
        }
    }
}
