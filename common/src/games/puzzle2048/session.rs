use super::best_score::BestScoreStore;
use super::game_state::{GameSnapshot, GameState};
use super::input::direction_from_key;
use super::settings::Puzzle2048Settings;
use super::types::{Direction, GameStatus, MoveResolution};
use crate::config::Validate;
use crate::games::{SessionRng, SpawnSource};
use crate::log;

/// Drives one player's game: applies moves, keeps score and the best score,
/// and tracks the win prompt and game over.
pub struct Puzzle2048Session<S: BestScoreStore, R: SpawnSource = SessionRng> {
    settings: Puzzle2048Settings,
    state: GameState,
    store: S,
    rng: R,
}

impl<S: BestScoreStore, R: SpawnSource> Puzzle2048Session<S, R> {
    pub fn new(settings: Puzzle2048Settings, store: S, mut rng: R) -> Result<Self, String> {
        settings.validate()?;

        let best_score = store.read();
        let state = GameState::new(settings.grid_size as usize, best_score, &mut rng);
        log!(
            "New {}x{} game, target {}, best score {}",
            settings.grid_size,
            settings.grid_size,
            settings.target_value,
            best_score
        );

        Ok(Self {
            settings,
            state,
            store,
            rng,
        })
    }

    pub fn is_won(&self) -> bool {
        self.state.highest_tile() >= self.settings.target_value
    }

    pub fn status(&self) -> GameStatus {
        let won = self.is_won();
        if won && !self.state.keep_playing {
            GameStatus::Won
        } else if self.state.game_over {
            GameStatus::Over
        } else if won {
            GameStatus::WonContinuing
        } else {
            GameStatus::Playing
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.state.grid.clone(),
            score: self.state.score,
            best_score: self.state.best_score,
            game_over: self.state.game_over,
            won: self.is_won(),
            keep_playing: self.state.keep_playing,
            highest_tile: self.state.highest_tile(),
            target_value: self.settings.target_value,
            moves_made: self.state.moves_made,
        }
    }

    pub fn apply_move(&mut self, direction: Direction) -> MoveResolution {
        if self.state.game_over || (self.is_won() && !self.state.keep_playing) {
            return MoveResolution::Locked;
        }

        let outcome = self.state.grid.apply_move(direction);
        if !outcome.moved {
            return MoveResolution::Unchanged;
        }

        let was_won = self.is_won();
        let grid = outcome.grid.spawn_tile(&mut self.rng);

        self.state.game_over = !grid.has_moves();
        self.state.grid = grid;
        self.state.score = self.state.score.saturating_add(outcome.score_gained);
        self.state.moves_made += 1;
        self.state.best_score = self.state.best_score.max(self.state.score);
        self.store.write(self.state.best_score);

        if !was_won && self.is_won() {
            log!(
                "Reached {} after {} moves, score {}",
                self.settings.target_value,
                self.state.moves_made,
                self.state.score
            );
        }
        if self.state.game_over {
            log!(
                "Game over: score {}, highest tile {}, {} moves",
                self.state.score,
                self.state.highest_tile(),
                self.state.moves_made
            );
        }

        MoveResolution::Applied {
            score_gained: outcome.score_gained,
            merged_values: outcome.merged_values,
        }
    }

    /// `None` when the key is not a move key.
    pub fn handle_key(&mut self, key: &str) -> Option<MoveResolution> {
        direction_from_key(key).map(|direction| self.apply_move(direction))
    }

    /// Dismisses the win prompt. Does nothing before the target is reached.
    pub fn accept_win(&mut self) {
        if self.is_won() {
            self.state.keep_playing = true;
        }
    }

    pub fn reset(&mut self) {
        log!(
            "Reset after {} moves, score {}",
            self.state.moves_made,
            self.state.score
        );
        self.state = GameState::new(
            self.settings.grid_size as usize,
            self.state.best_score,
            &mut self.rng,
        );
    }

    #[cfg(test)]
    fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    fn set_score(&mut self, score: u64) {
        self.state.score = score;
    }

    #[cfg(test)]
    fn set_grid(&mut self, grid: super::grid::Grid) {
        self.state.grid = grid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ScriptedSpawnSource;
    use crate::games::puzzle2048::best_score::{FileBestScoreStore, MemoryBestScoreStore};
    use crate::games::puzzle2048::grid::Grid;

    type TestSession = Puzzle2048Session<MemoryBestScoreStore, ScriptedSpawnSource>;

    fn grid(rows: &[&[u32]]) -> Grid {
        let rows: Vec<Vec<u32>> = rows.iter().map(|row| row.to_vec()).collect();
        Grid::from_rows(&rows).unwrap()
    }

    fn create_session(grid_size: u32, best_score: u64) -> TestSession {
        let settings = Puzzle2048Settings {
            grid_size,
            ..Default::default()
        };
        Puzzle2048Session::new(
            settings,
            MemoryBestScoreStore::new(best_score),
            ScriptedSpawnSource::default(),
        )
        .unwrap()
    }

    fn two_twos() -> Grid {
        grid(&[
            &[2, 2, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ])
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Puzzle2048Settings {
            grid_size: 1,
            ..Default::default()
        };
        let result = Puzzle2048Session::new(
            settings,
            MemoryBestScoreStore::default(),
            SessionRng::new(42),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_new_session_starts_playing() {
        let session = create_session(4, 12);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.grid.tile_count(), 2);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.best_score, 12);
        assert!(!snapshot.game_over);
        assert!(!snapshot.won);
        assert!(!snapshot.keep_playing);
        assert_eq!(snapshot.target_value, 2048);
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn test_merge_left_scores_and_spawns() {
        let mut session = create_session(4, 0);
        session.set_grid(two_twos());

        let resolution = session.apply_move(Direction::Left);

        assert_eq!(
            resolution,
            MoveResolution::Applied {
                score_gained: 4,
                merged_values: vec![4],
            }
        );
        let snapshot = session.snapshot();
        assert_eq!(snapshot.grid.get(0, 0), 4);
        assert_eq!(snapshot.grid.tile_count(), 2);
        // Scripted spawn takes the first empty cell.
        assert_eq!(snapshot.grid.get(0, 1), 2);
        assert_eq!(snapshot.score, 4);
        assert_eq!(snapshot.moves_made, 1);
    }

    #[test]
    fn test_each_direction_merges() {
        let cases = [
            (Direction::Right, grid(&[&[0, 0, 2, 2], &[0; 4], &[0; 4], &[0; 4]]), (0, 3)),
            (Direction::Up, grid(&[&[2, 0, 0, 0], &[2, 0, 0, 0], &[0; 4], &[0; 4]]), (0, 0)),
            (Direction::Down, grid(&[&[0; 4], &[0; 4], &[2, 0, 0, 0], &[2, 0, 0, 0]]), (3, 0)),
        ];
        for (direction, start, (row, col)) in cases {
            let mut session = create_session(4, 0);
            session.set_grid(start);
            assert!(session.apply_move(direction).is_applied());
            assert_eq!(session.snapshot().grid.get(row, col), 4, "{:?}", direction);
            assert_eq!(session.snapshot().score, 4);
        }
    }

    #[test]
    fn test_unchanged_move_keeps_state() {
        let mut session = create_session(4, 0);
        session.set_grid(grid(&[&[2, 0, 0, 0], &[0; 4], &[0; 4], &[0; 4]]));
        let before = session.snapshot();

        assert_eq!(session.apply_move(Direction::Left), MoveResolution::Unchanged);
        assert_eq!(session.apply_move(Direction::Up), MoveResolution::Unchanged);
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_best_score_written_on_accepted_move() {
        let mut session = create_session(4, 0);
        session.set_grid(two_twos());
        session.apply_move(Direction::Left);
        assert_eq!(session.snapshot().best_score, 4);
        assert_eq!(session.store().read(), 4);
    }

    #[test]
    fn test_best_score_never_decreases() {
        let mut session = create_session(4, 100);
        session.set_grid(two_twos());
        session.apply_move(Direction::Left);
        assert_eq!(session.snapshot().score, 4);
        assert_eq!(session.snapshot().best_score, 100);
        assert_eq!(session.store().read(), 100);
    }

    #[test]
    fn test_largest_merge_scores_without_overflow() {
        let mut session = create_session(4, 0);
        session.set_grid(grid(&[
            &[1 << 30, 1 << 30, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]));
        session.set_score(u64::from(u32::MAX));
        session.accept_win();

        assert!(session.apply_move(Direction::Left).is_applied());

        let snapshot = session.snapshot();
        assert_eq!(snapshot.grid.get(0, 0), 1 << 31);
        assert_eq!(snapshot.score, u64::from(u32::MAX) + (1 << 31));
        assert_eq!(snapshot.best_score, snapshot.score);
        assert_eq!(session.store().read(), snapshot.score);
    }

    #[test]
    fn test_score_saturates_instead_of_wrapping() {
        let mut session = create_session(4, 0);
        session.set_grid(two_twos());
        session.set_score(u64::MAX - 1);

        assert!(session.apply_move(Direction::Left).is_applied());
        assert_eq!(session.snapshot().score, u64::MAX);
    }

    #[test]
    fn test_reset_keeps_best_score() {
        let mut session = create_session(4, 0);
        session.set_grid(two_twos());
        session.apply_move(Direction::Left);

        session.reset();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.best_score, 4);
        assert_eq!(snapshot.moves_made, 0);
        assert_eq!(snapshot.grid.tile_count(), 2);
        assert!(!snapshot.game_over);
        assert!(!snapshot.keep_playing);
    }

    #[test]
    fn test_reaching_target_locks_until_accepted() {
        let mut session = create_session(4, 0);
        session.set_grid(grid(&[
            &[1024, 1024, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 2],
        ]));

        assert!(session.apply_move(Direction::Left).is_applied());
        assert_eq!(session.status(), GameStatus::Won);
        assert!(session.snapshot().shows_win_prompt());

        let before = session.snapshot();
        for direction in Direction::ALL {
            assert_eq!(session.apply_move(direction), MoveResolution::Locked);
        }
        assert_eq!(session.snapshot(), before);

        session.accept_win();
        assert_eq!(session.status(), GameStatus::WonContinuing);
        assert!(!session.snapshot().shows_win_prompt());
        assert!(session.apply_move(Direction::Right).is_applied());
    }

    #[test]
    fn test_accept_win_before_target_does_nothing() {
        let mut session = create_session(4, 0);
        session.accept_win();
        assert!(!session.snapshot().keep_playing);
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn test_game_over_when_no_moves_remain() {
        let mut session = create_session(2, 0);
        session.set_grid(grid(&[&[2, 4], &[0, 8]]));

        assert!(session.apply_move(Direction::Left).is_applied());

        let snapshot = session.snapshot();
        assert_eq!(snapshot.grid, grid(&[&[2, 4], &[8, 2]]));
        assert!(snapshot.game_over);
        assert_eq!(session.status(), GameStatus::Over);
        for direction in Direction::ALL {
            assert_eq!(session.apply_move(direction), MoveResolution::Locked);
        }

        session.reset();
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn test_over_after_continuing_past_target() {
        let settings = Puzzle2048Settings {
            grid_size: 2,
            target_value: 8,
        };
        let mut session = Puzzle2048Session::new(
            settings,
            MemoryBestScoreStore::default(),
            ScriptedSpawnSource::default(),
        )
        .unwrap();
        session.set_grid(grid(&[&[8, 4], &[0, 16]]));
        session.accept_win();

        assert!(session.apply_move(Direction::Left).is_applied());
        let snapshot = session.snapshot();
        assert!(snapshot.won);
        assert!(snapshot.game_over);
        assert_eq!(session.status(), GameStatus::Over);
    }

    #[test]
    fn test_handle_key() {
        let mut session = create_session(4, 0);
        session.set_grid(two_twos());
        assert_eq!(session.handle_key("x"), None);
        assert_eq!(session.snapshot().moves_made, 0);
        assert!(session.handle_key("a").is_some_and(|r| r.is_applied()));
        assert_eq!(session.snapshot().score, 4);
    }

    #[test]
    fn test_store_failure_does_not_interrupt_play() {
        let store = FileBestScoreStore::new(std::env::temp_dir());
        let mut session = Puzzle2048Session::new(
            Puzzle2048Settings::default(),
            store,
            ScriptedSpawnSource::default(),
        )
        .unwrap();
        assert_eq!(session.snapshot().best_score, 0);

        session.set_grid(two_twos());
        assert!(session.apply_move(Direction::Left).is_applied());
        assert_eq!(session.snapshot().best_score, 4);
    }

    #[test]
    fn test_random_playout_keeps_invariants() {
        let mut session = Puzzle2048Session::new(
            Puzzle2048Settings::default(),
            MemoryBestScoreStore::default(),
            SessionRng::new(2024),
        )
        .unwrap();

        let mut previous_score = 0;
        for turn in 0..5000 {
            let direction = Direction::ALL[turn % 4];
            if session.apply_move(direction) == MoveResolution::Locked {
                if session.status() == GameStatus::Won {
                    session.accept_win();
                    continue;
                }
                break;
            }
            let snapshot = session.snapshot();
            assert!(snapshot.score >= previous_score);
            assert!(snapshot.best_score >= snapshot.score);
            assert!(
                snapshot
                    .grid
                    .cells()
                    .iter()
                    .all(|&v| v == 0 || (v >= 2 && v.is_power_of_two()))
            );
            previous_score = snapshot.score;
        }

        assert_eq!(session.store().read(), session.snapshot().best_score);
    }
}
