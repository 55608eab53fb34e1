use super::grid::Grid;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Derived from the game state; `Won` means the win prompt is pending.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Playing,
    Won,
    WonContinuing,
    Over,
}

/// Result of sliding a grid in one direction, before any tile is spawned.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    pub grid: Grid,
    pub moved: bool,
    pub score_gained: u64,
    /// Values produced by merges, in line order.
    pub merged_values: Vec<u32>,
}

/// What a session did with a requested move.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MoveResolution {
    /// Game over, or the win prompt has not been acknowledged.
    Locked,
    /// Nothing would slide or merge in that direction.
    Unchanged,
    Applied {
        score_gained: u64,
        merged_values: Vec<u32>,
    },
}

impl MoveResolution {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveResolution::Applied { .. })
    }
}
