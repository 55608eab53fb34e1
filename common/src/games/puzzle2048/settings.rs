use serde::{Deserialize, Serialize};

use crate::config::Validate;

const MIN_GRID_SIZE: u32 = 2;
const MAX_GRID_SIZE: u32 = 10;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
pub struct Puzzle2048Settings {
    pub grid_size: u32,
    pub target_value: u32,
}

impl Validate for Puzzle2048Settings {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(format!(
                "Grid size must be between {} and {}, got {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE, self.grid_size
            ));
        }
        if self.target_value < 4 {
            return Err(format!(
                "Target value must be at least 4, got {}",
                self.target_value
            ));
        }
        if !self.target_value.is_power_of_two() {
            return Err(format!(
                "Target value must be a power of 2, got {}",
                self.target_value
            ));
        }
        Ok(())
    }
}

impl Default for Puzzle2048Settings {
    fn default() -> Self {
        Self {
            grid_size: 4,
            target_value: 2048,
        }
    }
}
