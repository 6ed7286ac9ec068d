//! Grid building: turn a flat list of clue entries into the set of cells they cover.
//!
//! Each entry is walked square by square along its direction. The first entry
//! to reach a square creates its [`Cell`]; any later entry through the same
//! square must agree on the letter and must run in the other direction.
//! Cells keep first-encounter order, which doubles as the tab order for hosts
//! that want one.
//!
//! Any structural problem aborts the build with a single [`PuzzleError`].

use crate::errors::PuzzleError;
use crate::guess_grid::GuessGrid;
use crate::model::{Cell, ClueEntry, Dimensions, Position};
use log::debug;
use std::collections::HashMap;

/// Largest supported number of columns or rows.
pub const MAX_GRID_SIDE: usize = 1024;

/// Reject grids with a zero side or a side over [`MAX_GRID_SIDE`].
///
/// # Errors
///
/// [`PuzzleError::EmptyGrid`] or [`PuzzleError::GridTooLarge`].
pub fn check_dimensions(cols: usize, rows: usize) -> Result<(), PuzzleError> {
    if cols == 0 || rows == 0 {
        return Err(PuzzleError::EmptyGrid { cols, rows });
    }
    if cols > MAX_GRID_SIDE || rows > MAX_GRID_SIDE {
        return Err(PuzzleError::GridTooLarge { cols, rows, max: MAX_GRID_SIDE });
    }
    Ok(())
}

/// The cells of one puzzle, stored flat with a position index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<Cell>,
    index: HashMap<Position, usize>,
}

impl Grid {
    #[must_use]
    pub fn cols(&self) -> usize {
        self.dimensions.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.dimensions.rows
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Cells in first-encounter order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.index.get(&pos).map(|&i| &self.cells[i])
    }

    pub(crate) fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index.get(&pos).map(|&i| &mut self.cells[i])
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.index.contains_key(&pos)
    }

    /// `true` when there is no cell at `pos` or its guess is empty.
    #[must_use]
    pub fn is_blank_at(&self, pos: Position) -> bool {
        self.get(pos).is_none_or(Cell::is_blank)
    }

    /// Every cell has a known value and a guess equal to it.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(Cell::is_correct)
    }

    /// Mark exactly the cell at `pos` as selected (or none, for `None`).
    pub(crate) fn select(&mut self, pos: Option<Position>) {
        for cell in &mut self.cells {
            cell.selected = Some(cell.pos) == pos;
        }
    }
}

/// Build the cells for `entries` on a `cols x rows` grid.
///
/// `guesses`, when given, seeds each new cell's guess from `[col][row]`.
/// With `allow_missing_solutions` false, every entry must carry a solution.
///
/// # Errors
///
/// Returns the first [`PuzzleError`] found; no partial grid is produced.
pub fn build(
    cols: usize,
    rows: usize,
    entries: &[ClueEntry],
    guesses: Option<&GuessGrid>,
    allow_missing_solutions: bool,
) -> Result<Grid, PuzzleError> {
    check_dimensions(cols, rows)?;

    let mut cells: Vec<Cell> = Vec::new();
    let mut index: HashMap<Position, usize> = HashMap::new();
    let by_id = entries_by_id(entries);

    for entry in entries {
        let solution = entry_solution(entry, allow_missing_solutions)?;

        for (offset, pos) in entry.positions().enumerate() {
            if pos.col >= cols || pos.row >= rows {
                return Err(PuzzleError::OutOfBounds { id: entry.id.clone(), pos });
            }
            let letter = solution.as_ref().map(|s| s[offset]);

            if let Some(&i) = index.get(&pos) {
                merge_into(&mut cells[i], entry, offset, letter, &by_id)?;
            } else {
                let guess = guesses
                    .and_then(|g| g.get(pos))
                    .filter(|g| !g.is_empty())
                    .map(str::to_string)
                    .unwrap_or_default();
                index.insert(pos, cells.len());
                cells.push(Cell {
                    pos,
                    value: letter,
                    guess,
                    clue_ids: vec![entry.id.clone()],
                    number: (offset == 0).then_some(entry.number),
                    selected: false,
                });
            }
        }
    }

    debug!("built {} cells for {} entries on a {cols}x{rows} grid", cells.len(), entries.len());
    Ok(Grid { dimensions: Dimensions { cols, rows }, cells, index })
}

/// The entry's solution as chars, checked against its length.
fn entry_solution(entry: &ClueEntry, allow_missing: bool) -> Result<Option<Vec<char>>, PuzzleError> {
    match &entry.solution {
        Some(s) => {
            let chars: Vec<char> = s.chars().collect();
            if chars.len() == entry.length {
                Ok(Some(chars))
            } else {
                Err(PuzzleError::SolutionLength {
                    id: entry.id.clone(),
                    expected: entry.length,
                    found: Some(chars.len()),
                })
            }
        }
        None if allow_missing => Ok(None),
        None => Err(PuzzleError::SolutionLength { id: entry.id.clone(), expected: entry.length, found: None }),
    }
}

fn entries_by_id(entries: &[ClueEntry]) -> HashMap<&str, &ClueEntry> {
    entries.iter().map(|e| (e.id.as_str(), e)).collect()
}

/// Fold a second entry into an existing (crossing) cell.
fn merge_into(
    cell: &mut Cell,
    entry: &ClueEntry,
    offset: usize,
    letter: Option<char>,
    by_id: &HashMap<&str, &ClueEntry>,
) -> Result<(), PuzzleError> {
    if let (Some(existing), Some(incoming)) = (cell.value, letter) {
        if existing != incoming {
            return Err(PuzzleError::CharacterClash {
                id: entry.id.clone(),
                pos: cell.pos,
                existing,
                incoming,
            });
        }
    }

    let same_direction = cell
        .clue_ids
        .iter()
        .filter_map(|id| by_id.get(id.as_str()))
        .any(|other| other.direction == entry.direction);
    if same_direction {
        return Err(PuzzleError::OverlappingDirection {
            id: entry.id.clone(),
            pos: cell.pos,
            direction: entry.direction,
        });
    }

    cell.clue_ids.push(entry.id.clone());
    if cell.value.is_none() {
        cell.value = letter;
    }
    if offset == 0 {
        cell.number = Some(entry.number);
    }
    Ok(())
}
