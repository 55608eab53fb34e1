use super::grid::Grid;
use crate::games::SpawnSource;

pub const INITIAL_TILES: usize = 2;

/// Live state of one session. Only the owning session mutates it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct GameState {
    pub(crate) grid: Grid,
    pub(crate) score: u64,
    pub(crate) best_score: u64,
    pub(crate) game_over: bool,
    pub(crate) keep_playing: bool,
    pub(crate) moves_made: u32,
}

impl GameState {
    pub(crate) fn new<R: SpawnSource + ?Sized>(grid_size: usize, best_score: u64, rng: &mut R) -> Self {
        let grid = (0..INITIAL_TILES).fold(Grid::empty(grid_size), |grid, _| grid.spawn_tile(rng));
        Self {
            grid,
            score: 0,
            best_score,
            game_over: false,
            keep_playing: false,
            moves_made: 0,
        }
    }

    pub(crate) fn highest_tile(&self) -> u32 {
        self.grid.max_tile()
    }
}

/// Read-only view handed to the presentation layer after each transition.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub score: u64,
    pub best_score: u64,
    pub game_over: bool,
    pub won: bool,
    pub keep_playing: bool,
    pub highest_tile: u32,
    pub target_value: u32,
    pub moves_made: u32,
}

impl GameSnapshot {
    pub fn shows_win_prompt(&self) -> bool {
        self.won && !self.keep_playing
    }
}
