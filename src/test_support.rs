// Shared fixtures for unit tests.

use crate::model::{ClueEntry, Direction, Position};
use std::collections::BTreeMap;

/// A standalone entry; `length` follows the solution (0 when there is none).
pub(crate) fn entry(
    id: &str,
    number: u32,
    direction: Direction,
    (col, row): (usize, usize),
    solution: Option<&str>,
) -> ClueEntry {
    ClueEntry {
        id: id.to_string(),
        number,
        human_number: number.to_string(),
        clue: String::new(),
        direction,
        length: solution.map_or(0, |s| s.chars().count()),
        group: vec![id.to_string()],
        position: Position::new(col, row),
        separator_locations: BTreeMap::new(),
        solution: solution.map(str::to_string),
    }
}

/// `2-down` (ABC at column 0) continued by `3-down` (DE at column 4) on a 5x5 grid.
pub(crate) fn linked() -> Vec<ClueEntry> {
    let group = vec!["2-down".to_string(), "3-down".to_string()];
    let mut first = entry("2-down", 2, Direction::Down, (0, 0), Some("ABC"));
    let mut second = entry("3-down", 3, Direction::Down, (4, 0), Some("DE"));
    first.group.clone_from(&group);
    second.group = group;
    second.human_number = "3".to_string();
    vec![first, second]
}

/// A small crossing grid on 5x3:
///
/// ```text
/// C A T . .
/// O . O . .
/// W . E A R
/// ```
///
/// `1-across` CAT, `1-down` COW, `2-down` TOE, `3-across` EAR.
pub(crate) fn crossing() -> Vec<ClueEntry> {
    vec![
        entry("1-across", 1, Direction::Across, (0, 0), Some("CAT")),
        entry("1-down", 1, Direction::Down, (0, 0), Some("COW")),
        entry("2-down", 2, Direction::Down, (2, 0), Some("TOE")),
        entry("3-across", 3, Direction::Across, (2, 2), Some("EAR")),
    ]
}
