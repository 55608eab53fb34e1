use super::types::{Direction, MoveOutcome};
use crate::games::SpawnSource;

const FOUR_PROBABILITY: f64 = 0.1;

/// Tiles above this value cannot be doubled within `u32` and never merge.
const MAX_MERGEABLE_TILE: u32 = 1 << 30;

fn can_merge(a: u32, b: u32) -> bool {
    a == b && a != 0 && a <= MAX_MERGEABLE_TILE
}

/// Square board stored row-major. `0` is an empty cell.
///
/// Every operation returns a fresh grid; nothing mutates `self`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// # Panics
    /// If `size < 2`.
    pub fn empty(size: usize) -> Self {
        assert!(size >= 2, "grid size must be at least 2, got {}", size);
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, String> {
        let size = rows.len();
        if size < 2 {
            return Err(format!("Grid size must be at least 2, got {}", size));
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(format!(
                    "Row {} has {} cells, expected {}",
                    row_index,
                    row.len(),
                    size
                ));
            }
            for &value in row {
                if value != 0 && (value < 2 || !value.is_power_of_two()) {
                    return Err(format!(
                        "Tile value must be 0 or a power of 2 starting at 2, got {}",
                        value
                    ));
                }
                cells.push(value);
            }
        }

        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.size + col]
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.size)
    }

    /// Empty coordinates as `(row, col)`, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == 0)
            .map(|(index, _)| (index / self.size, index % self.size))
            .collect()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value != 0).count()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// An empty cell or a mergeable adjacent pair means some direction
    /// changes the grid, as long as the grid holds at least one tile.
    pub fn has_moves(&self) -> bool {
        if self.cells.contains(&0) {
            return true;
        }

        for row in 0..self.size {
            for col in 0..self.size {
                let value = self.get(row, col);
                if col + 1 < self.size && can_merge(value, self.get(row, col + 1)) {
                    return true;
                }
                if row + 1 < self.size && can_merge(value, self.get(row + 1, col)) {
                    return true;
                }
            }
        }

        false
    }

    /// Places a 2 (or, with probability 0.1, a 4) on a uniformly chosen empty
    /// cell. A full grid comes back unchanged.
    pub fn spawn_tile<R: SpawnSource + ?Sized>(&self, rng: &mut R) -> Grid {
        let mut next = self.clone();
        let empty = self.empty_cells();
        if empty.is_empty() {
            return next;
        }

        let (row, col) = empty[rng.choose_index(empty.len())];
        next.cells[row * self.size + col] = if rng.chance(FOUR_PROBABILITY) { 4 } else { 2 };
        next
    }

    pub fn apply_move(&self, direction: Direction) -> MoveOutcome {
        let mut cells = self.cells.clone();
        let mut score_gained: u64 = 0;
        let mut merged_values = Vec::new();

        for line in 0..self.size {
            let indices = line_indices(self.size, direction, line);
            let values: Vec<u32> = indices.iter().map(|&index| self.cells[index]).collect();
            let merged = slide_and_merge_line(&values);

            score_gained += merged.score;
            merged_values.extend(merged.merged_values);
            for (&index, &value) in indices.iter().zip(&merged.cells) {
                cells[index] = value;
            }
        }

        let grid = Grid {
            size: self.size,
            cells,
        };
        let moved = grid != *self;

        MoveOutcome {
            grid,
            moved,
            score_gained,
            merged_values,
        }
    }
}

/// Cell indices of one row or column, ordered so that sliding toward
/// position 0 of the result is a slide in `direction`.
fn line_indices(size: usize, direction: Direction, line: usize) -> Vec<usize> {
    (0..size)
        .map(|k| match direction {
            Direction::Left => line * size + k,
            Direction::Right => line * size + (size - 1 - k),
            Direction::Up => k * size + line,
            Direction::Down => (size - 1 - k) * size + line,
        })
        .collect()
}

struct MergedLine {
    cells: Vec<u32>,
    score: u64,
    merged_values: Vec<u32>,
}

fn slide_and_merge_line(line: &[u32]) -> MergedLine {
    let mut cells: Vec<u32> = Vec::with_capacity(line.len());
    let mut score: u64 = 0;
    let mut merged_values = Vec::new();

    let non_zero: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();

    // A merged tile is never merged again in the same pass.
    let mut i = 0;
    while i < non_zero.len() {
        if i + 1 < non_zero.len() && can_merge(non_zero[i], non_zero[i + 1]) {
            let merged = non_zero[i] * 2;
            cells.push(merged);
            score += u64::from(merged);
            merged_values.push(merged);
            i += 2;
        } else {
            cells.push(non_zero[i]);
            i += 1;
        }
    }

    cells.resize(line.len(), 0);

    MergedLine {
        cells,
        score,
        merged_values,
    }
}
