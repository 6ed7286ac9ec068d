//! Cursor navigation: which cell and which clue are active, and where the
//! next keypress takes them.
//!
//! Selection is explicit state. Every function here takes the current
//! [`Selection`] and returns the new one; the caller stores it and decides
//! what to emit. A selected cell always carries a selected clue that runs
//! through it.

use crate::clues::ClueSet;
use crate::errors::UsageError;
use crate::events::FocusEvent;
use crate::grid::Grid;
use crate::model::{Cell, Clue, Direction, Position};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub cell: Option<Position>,
    pub clue_id: Option<String>,
}

impl Selection {
    #[must_use]
    pub fn new(cell: Position, clue_id: impl Into<String>) -> Self {
        Selection { cell: Some(cell), clue_id: Some(clue_id.into()) }
    }

    /// The focus event describing this selection, if it is complete.
    #[must_use]
    pub fn focus(&self) -> Option<FocusEvent> {
        Some(FocusEvent { pos: self.cell?, clue_id: self.clue_id.clone()? })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    /// The clue direction this arrow moves along.
    #[must_use]
    pub fn axis(self) -> Direction {
        match self {
            Arrow::Up | Arrow::Down => Direction::Down,
            Arrow::Left | Arrow::Right => Direction::Across,
        }
    }

    /// One step from `pos`, wrapping to the opposite edge of a `cols x rows` grid.
    #[must_use]
    pub fn step_wrapping(self, pos: Position, cols: usize, rows: usize) -> Position {
        match self {
            Arrow::Up => Position::new(pos.col, (pos.row + rows - 1) % rows),
            Arrow::Down => Position::new(pos.col, (pos.row + 1) % rows),
            Arrow::Left => Position::new((pos.col + cols - 1) % cols, pos.row),
            Arrow::Right => Position::new((pos.col + 1) % cols, pos.row),
        }
    }
}

impl FromStr for Arrow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Ok(Arrow::Up),
            "down" | "arrowdown" => Ok(Arrow::Down),
            "left" | "arrowleft" => Ok(Arrow::Left),
            "right" | "arrowright" => Ok(Arrow::Right),
            other => Err(format!("unknown arrow {other:?}")),
        }
    }
}

fn current_clue<'a>(clues: &'a ClueSet, selection: &Selection) -> Option<&'a Clue> {
    selection.clue_id.as_deref().and_then(|id| clues.get(id))
}

fn clue_in_direction(cell: &Cell, clues: &ClueSet, direction: Direction) -> Option<String> {
    cell.clue_ids
        .iter()
        .find(|id| clues.get(id).is_some_and(|c| c.direction() == direction))
        .cloned()
}

/// The clue to select at `cell`: keep `current` if it runs through the cell,
/// else the cell's clue in `direction`, else the cell's first clue.
fn preferred_clue(cell: &Cell, clues: &ClueSet, current: Option<&Clue>, direction: Option<Direction>) -> Option<String> {
    if let Some(clue) = current.filter(|c| cell.clue_ids.iter().any(|id| id == c.id())) {
        return Some(clue.id().to_string());
    }
    direction
        .and_then(|d| clue_in_direction(cell, clues, d))
        .or_else(|| cell.clue_ids.first().cloned())
}

/// Select a clue directly (e.g. from the clue list); the cursor goes to its first cell.
///
/// # Errors
///
/// [`UsageError::UnknownClue`] if no clue has that id.
pub fn select_clue(clues: &ClueSet, id: &str) -> Result<Selection, UsageError> {
    let clue = clues.get(id).ok_or_else(|| UsageError::UnknownClue { id: id.to_string() })?;
    Ok(Selection::new(clue.entry.first_cell(), id))
}

/// A click (or tap) on the cell at `pos`.
///
/// Clicking the already-selected cell flips between its across and down clues.
///
/// # Errors
///
/// [`UsageError::UnknownCell`] if there is no cell at `pos`.
pub fn click(grid: &Grid, clues: &ClueSet, current: &Selection, pos: Position) -> Result<Selection, UsageError> {
    let cell = grid.get(pos).ok_or(UsageError::UnknownCell { pos })?;
    let clue = current_clue(clues, current);

    if current.cell == Some(pos) && cell.clue_ids.len() == 2 {
        let other = cell.clue_ids.iter().find(|id| Some(id.as_str()) != current.clue_id.as_deref()).cloned();
        return Ok(Selection { cell: Some(pos), clue_id: other });
    }

    let clue_id = preferred_clue(cell, clues, clue, clue.map(Clue::direction));
    Ok(Selection { cell: Some(pos), clue_id })
}

/// An arrow key.
///
/// At a crossing, an arrow across the current clue's direction pivots to the
/// other clue without moving. Otherwise the cursor steps along the arrow,
/// wrapping at the edges and skipping black squares.
#[must_use]
pub fn move_directional(grid: &Grid, clues: &ClueSet, current: &Selection, arrow: Arrow) -> Selection {
    let Some(pos) = current.cell else {
        return current.clone();
    };
    let Some(cell) = grid.get(pos) else {
        return current.clone();
    };
    let clue = current_clue(clues, current);
    let direction = clue.map(Clue::direction);

    if cell.clue_ids.len() == 2 && direction.is_some_and(|d| d != arrow.axis()) {
        if let Some(id) = clue_in_direction(cell, clues, arrow.axis()) {
            return Selection { cell: Some(pos), clue_id: Some(id) };
        }
    }

    // terminates: `pos` itself is a cell, so the walk finds one at worst after a full lap
    let mut next = arrow.step_wrapping(pos, grid.cols(), grid.rows());
    while !grid.contains(next) {
        next = arrow.step_wrapping(next, grid.cols(), grid.rows());
    }

    match grid.get(next) {
        Some(landed) => Selection { cell: Some(next), clue_id: preferred_clue(landed, clues, clue, direction) },
        None => current.clone(),
    }
}

/// Advance one cell through the current clue, continuing into the next
/// clue of its group after the last cell. Does nothing at the very end.
#[must_use]
pub fn move_next(clues: &ClueSet, current: &Selection) -> Selection {
    step_within_group(clues, current, true)
}

/// Step back one cell, continuing into the previous clue of the group
/// before the first cell.
#[must_use]
pub fn move_prev(clues: &ClueSet, current: &Selection) -> Selection {
    step_within_group(clues, current, false)
}

fn step_within_group(clues: &ClueSet, current: &Selection, forwards: bool) -> Selection {
    let (Some(pos), Some(clue)) = (current.cell, current_clue(clues, current)) else {
        return current.clone();
    };
    let entry = &clue.entry;
    let Some(offset) = entry.offset_of(pos) else {
        return current.clone();
    };

    if forwards && offset + 1 < entry.length {
        return Selection { cell: Some(entry.position.step(entry.direction, offset + 1)), ..current.clone() };
    }
    if !forwards && offset > 0 {
        return Selection { cell: Some(entry.position.step(entry.direction, offset - 1)), ..current.clone() };
    }

    let Some(i) = entry.group.iter().position(|id| id == &entry.id) else {
        return current.clone();
    };
    let neighbour = if forwards { entry.group.get(i + 1) } else { i.checked_sub(1).and_then(|j| entry.group.get(j)) };
    match neighbour.and_then(|id| clues.get(id)) {
        Some(next) => {
            let cell = if forwards { next.entry.first_cell() } else { next.entry.last_cell() };
            Selection::new(cell, next.id())
        }
        None => current.clone(),
    }
}

/// Tab / Shift+Tab: the next or previous clue in entry order, wrapping.
#[must_use]
pub fn cycle_clue(clues: &ClueSet, current: &Selection, forwards: bool) -> Selection {
    let n = clues.len();
    if n == 0 {
        return current.clone();
    }
    let i = current.clue_id.as_deref().and_then(|id| clues.position_of(id));
    let next = match (i, forwards) {
        (Some(i), true) => (i + 1) % n,
        (Some(i), false) => (i + n - 1) % n,
        (None, true) => 0,
        (None, false) => n - 1,
    };
    let clue = &clues.clues()[next];
    Selection::new(clue.entry.first_cell(), clue.id())
}
