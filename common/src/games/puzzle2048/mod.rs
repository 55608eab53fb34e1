mod best_score;
mod game_state;
mod grid;
mod input;
mod session;
mod settings;
mod types;

pub use best_score::{BestScoreRecord, BestScoreStore, FileBestScoreStore, MemoryBestScoreStore};
pub use game_state::GameSnapshot;
pub use grid::Grid;
pub use input::direction_from_key;
pub use session::Puzzle2048Session;
pub use settings::Puzzle2048Settings;
pub use types::{Direction, GameStatus, MoveOutcome, MoveResolution};
