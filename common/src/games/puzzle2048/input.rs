use super::types::Direction;

/// Maps a DOM-style key identifier (`"ArrowUp"`, `"w"`, ...) to a direction.
/// Letters are case-insensitive; anything else is not a move key.
pub fn direction_from_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}
