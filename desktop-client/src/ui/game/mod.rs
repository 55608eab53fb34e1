mod puzzle2048;

pub use puzzle2048::{Puzzle2048GameUi, UiAction};
