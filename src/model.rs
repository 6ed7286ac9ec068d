//! Core puzzle types: positions, directions, clue entries and the derived
//! `Cell` / `Clue` view records.
//!
//! Everything here is plain data. Relationships between cells and clues are
//! expressed as ids (`Clue::id`) and positions (`Cell::pos`) and resolved by
//! lookup in [`crate::grid::Grid`] and [`crate::clues::ClueSet`], never by
//! pointers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// A grid square, zero-based. `col` grows rightwards, `row` downwards.
///
/// Puzzle JSON historically spells these `x` / `y`; both spellings deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    #[serde(alias = "x")]
    pub col: usize,
    #[serde(alias = "y")]
    pub row: usize,
}

impl Position {
    #[must_use]
    pub const fn new(col: usize, row: usize) -> Self {
        Position { col, row }
    }

    /// The square `offset` steps from here along `direction`.
    #[must_use]
    pub fn step(self, direction: Direction, offset: usize) -> Position {
        match direction {
            Direction::Across => Position::new(self.col + offset, self.row),
            Direction::Down => Position::new(self.col, self.row + offset),
        }
    }

    /// The squares immediately before and after this one along `direction`.
    /// The "before" square is `None` at the top/left edge.
    #[must_use]
    pub fn neighbours(self, direction: Direction) -> (Option<Position>, Position) {
        match direction {
            Direction::Across => (
                self.col.checked_sub(1).map(|c| Position::new(c, self.row)),
                Position::new(self.col + 1, self.row),
            ),
            Direction::Down => (
                self.row.checked_sub(1).map(|r| Position::new(self.col, r)),
                Position::new(self.col, self.row + 1),
            ),
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    #[must_use]
    pub fn other(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => f.write_str("across"),
            Direction::Down => f.write_str("down"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub cols: usize,
    pub rows: usize,
}

/// One published clue definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClueEntry {
    pub id: String,
    pub number: u32,
    pub human_number: String,
    /// Raw clue text; sanitising it is the host's job.
    #[serde(default)]
    pub clue: String,
    pub direction: Direction,
    pub length: usize,
    /// Ids of every entry printed as this one clue, in typing order.
    pub group: Vec<String>,
    #[serde(alias = "startPosition")]
    pub position: Position,
    /// Separator string (`","`, `"-"`) to offsets within the solution.
    #[serde(default)]
    pub separator_locations: BTreeMap<String, Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl ClueEntry {
    /// Positions covered by this entry, first to last.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.length).map(move |offset| self.position.step(self.direction, offset))
    }

    /// Index of `pos` within this entry's span, if it lies on it.
    #[must_use]
    pub fn offset_of(&self, pos: Position) -> Option<usize> {
        let (along, start, fixed_ok) = match self.direction {
            Direction::Across => (pos.col, self.position.col, pos.row == self.position.row),
            Direction::Down => (pos.row, self.position.row, pos.col == self.position.col),
        };
        if !fixed_ok || along < start {
            return None;
        }
        let offset = along - start;
        (offset < self.length).then_some(offset)
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.offset_of(pos).is_some()
    }

    #[must_use]
    pub fn first_cell(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn last_cell(&self) -> Position {
        self.position.step(self.direction, self.length.saturating_sub(1))
    }
}

/// A whole puzzle as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordData {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    pub dimensions: Dimensions,
    pub entries: Vec<ClueEntry>,
    #[serde(default = "default_true")]
    pub solution_available: bool,
}

fn default_true() -> bool {
    true
}

/// One square of the grid. Derived from the entries, mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub pos: Position,
    /// The correct letter; `None` when solutions are withheld.
    pub value: Option<char>,
    /// Current user letter, empty when blank.
    pub guess: String,
    /// One id per direction that runs through this square (at most two).
    pub clue_ids: Vec<String>,
    pub number: Option<u32>,
    pub selected: bool,
}

impl Cell {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.guess.is_empty()
    }

    /// `true` if the guess is non-empty and differs from a known value.
    #[must_use]
    pub fn is_wrong(&self) -> bool {
        match self.value {
            Some(v) => !self.guess.is_empty() && !guess_is(&self.guess, v),
            None => false,
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.value.is_some_and(|v| guess_is(&self.guess, v))
    }
}

fn guess_is(guess: &str, value: char) -> bool {
    let mut chars = guess.chars();
    chars.next() == Some(value) && chars.next().is_none()
}

/// Clue view state: the entry plus what the UI needs to draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Clue {
    #[serde(flatten)]
    pub entry: ClueEntry,
    pub answered: bool,
    pub selected: bool,
}

impl Clue {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.entry.id
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.entry.direction
    }
}
