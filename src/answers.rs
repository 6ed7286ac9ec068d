//! Check, reveal and clear, at letter, word and grid scope.
//!
//! Each operation edits guesses in place and returns one [`CellChange`] per
//! cell whose guess actually changed, then recomputes `answered` for every
//! clue whose group touches the operation's scope. "Word" always means the
//! selected clue's whole group, so linked clues are checked together.
//!
//! Grid-wide operations are destructive and take a [`Confirmation`]; a
//! cancelled one does nothing.

use crate::clues::ClueSet;
use crate::events::CellChange;
use crate::grid::Grid;
use crate::model::{Cell, Position};
use crate::navigation::Selection;
use log::debug;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Letter,
    Word,
    Grid,
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scope::Letter => "letter",
            Scope::Word => "word",
            Scope::Grid => "grid",
        })
    }
}

/// The user's answer to "are you sure?" before a grid-wide operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    Confirm,
    #[default]
    Cancel,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed { Confirmation::Confirm } else { Confirmation::Cancel }
    }
}

/// Squares covered by `scope` under the current selection.
#[must_use]
pub fn scope_positions(grid: &Grid, clues: &ClueSet, selection: &Selection, scope: Scope) -> Vec<Position> {
    match scope {
        Scope::Letter => selection.cell.into_iter().filter(|p| grid.contains(*p)).collect(),
        Scope::Word => selection
            .clue_id
            .as_deref()
            .map(|id| clues.group_positions(id))
            .unwrap_or_default(),
        Scope::Grid => grid.cells().iter().map(|c| c.pos).collect(),
    }
}

/// Set each cell in `positions` to whatever `update` returns, recording real changes.
fn rewrite<F>(grid: &mut Grid, positions: &[Position], update: F) -> Vec<CellChange>
where
    F: Fn(&Cell) -> Option<String>,
{
    let mut changes = Vec::new();
    for &pos in positions {
        let Some(cell) = grid.get_mut(pos) else { continue };
        let Some(guess) = update(&*cell) else { continue };
        if guess != cell.guess {
            let previous_guess = std::mem::replace(&mut cell.guess, guess.clone());
            changes.push(CellChange { pos, guess, previous_guess });
        }
    }
    changes
}

fn gated(scope: Scope, confirmation: Confirmation) -> bool {
    scope == Scope::Grid && confirmation == Confirmation::Cancel
}

/// Clear every wrong guess in scope; correct and blank cells are untouched.
pub fn check(
    grid: &mut Grid,
    clues: &mut ClueSet,
    selection: &Selection,
    scope: Scope,
    confirmation: Confirmation,
) -> Vec<CellChange> {
    if gated(scope, confirmation) {
        debug!("check {scope} cancelled");
        return Vec::new();
    }
    let positions = scope_positions(grid, clues, selection, scope);
    let changes = rewrite(grid, &positions, |cell| cell.is_wrong().then(String::new));
    clues.refresh_answered(grid, &positions);
    debug!("check {scope}: {} of {} cells cleared", changes.len(), positions.len());
    changes
}

/// Fill every cell in scope with its solution letter, where one is known.
pub fn reveal(
    grid: &mut Grid,
    clues: &mut ClueSet,
    selection: &Selection,
    scope: Scope,
    confirmation: Confirmation,
) -> Vec<CellChange> {
    if gated(scope, confirmation) {
        debug!("reveal {scope} cancelled");
        return Vec::new();
    }
    let positions = scope_positions(grid, clues, selection, scope);
    let changes = rewrite(grid, &positions, |cell| cell.value.map(String::from));
    clues.refresh_answered(grid, &positions);
    debug!("reveal {scope}: {} cells changed", changes.len());
    changes
}

/// Clear the selected clue's group.
///
/// Cells shared with a crossing clue are only cleared when the crossing
/// clue's squares on either side of them are blank, so a crossing word the
/// user is part-way through keeps its letter.
pub fn clear_word(grid: &mut Grid, clues: &mut ClueSet, selection: &Selection) -> Vec<CellChange> {
    let Some(id) = selection.clue_id.clone() else {
        return Vec::new();
    };

    let mut to_clear = Vec::new();
    for entry in clues.group_of(&id) {
        for pos in entry.positions() {
            let Some(cell) = grid.get(pos) else { continue };
            let crossing = cell
                .clue_ids
                .iter()
                .filter(|other| **other != entry.id)
                .find_map(|other| clues.get(other));
            let clear = match crossing {
                None => true,
                Some(other) => {
                    let (before, after) = pos.neighbours(other.direction());
                    before.is_none_or(|b| grid.is_blank_at(b)) && grid.is_blank_at(after)
                }
            };
            if clear {
                to_clear.push(pos);
            }
        }
    }

    let changes = rewrite(grid, &to_clear, |_| Some(String::new()));
    let positions = clues.group_positions(&id);
    clues.refresh_answered(grid, &positions);
    clues.unanswer_group(&id);
    debug!("clear word {id}: {} cells cleared", changes.len());
    changes
}

/// Clear every guess in the grid.
pub fn clear_grid(grid: &mut Grid, clues: &mut ClueSet, confirmation: Confirmation) -> Vec<CellChange> {
    if confirmation == Confirmation::Cancel {
        debug!("clear grid cancelled");
        return Vec::new();
    }
    let positions: Vec<Position> = grid.cells().iter().map(|c| c.pos).collect();
    let changes = rewrite(grid, &positions, |_| Some(String::new()));
    clues.unanswer_all();
    debug!("clear grid: {} cells cleared", changes.len());
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clues::project;
    use crate::grid::build;
    use crate::model::{ClueEntry, Direction};
    use crate::test_support::{crossing, entry, linked};

    fn setup(entries: &[ClueEntry], cols: usize, rows: usize) -> (Grid, ClueSet) {
        let grid = build(cols, rows, entries, None, false).unwrap();
        let clues = project(entries, &grid, None).unwrap();
        (grid, clues)
    }

    fn yoyo_yellow() -> Vec<ClueEntry> {
        vec![
            entry("1-across", 1, Direction::Across, (0, 0), Some("YOYO")),
            entry("1-down", 1, Direction::Down, (0, 0), Some("YELLOW")),
        ]
    }

    fn p(col: usize, row: usize) -> Position {
        Position::new(col, row)
    }

    fn set(grid: &mut Grid, pos: Position, guess: &str) {
        grid.get_mut(pos).unwrap().guess = guess.to_string();
    }

    #[test]
    fn test_check_letter_keeps_correct_guess() {
        let (mut grid, mut clues) = setup(&yoyo_yellow(), 13, 13);
        set(&mut grid, p(0, 0), "Y");
        let sel = Selection::new(p(0, 0), "1-across");
        let changes = check(&mut grid, &mut clues, &sel, Scope::Letter, Confirmation::Cancel);
        assert!(changes.is_empty());
        assert_eq!(grid.get(p(0, 0)).unwrap().guess, "Y");
    }

    #[test]
    fn test_check_letter_clears_wrong_guess() {
        let (mut grid, mut clues) = setup(&yoyo_yellow(), 13, 13);
        set(&mut grid, p(0, 0), "X");
        let sel = Selection::new(p(0, 0), "1-across");
        let changes = check(&mut grid, &mut clues, &sel, Scope::Letter, Confirmation::Cancel);
        assert_eq!(
            changes,
            vec![CellChange { pos: p(0, 0), guess: String::new(), previous_guess: "X".to_string() }]
        );
        assert!(grid.get(p(0, 0)).unwrap().is_blank());
    }

    #[test]
    fn test_check_word_unanswers_crossing_clue() {
        let (mut grid, mut clues) = setup(&yoyo_yellow(), 13, 13);
        for (row, ch) in "XELLOW".chars().enumerate() {
            set(&mut grid, p(0, row), &ch.to_string());
        }
        clues.refresh_answered(&grid, &[p(0, 0)]);
        assert!(clues.get("1-down").unwrap().answered);

        let sel = Selection::new(p(1, 0), "1-across");
        let changes = check(&mut grid, &mut clues, &sel, Scope::Word, Confirmation::Cancel);
        assert_eq!(changes.len(), 1);
        assert!(!clues.get("1-down").unwrap().answered);
        assert_eq!(grid.get(p(0, 1)).unwrap().guess, "E", "correct letters stay");
    }

    #[test]
    fn test_check_letter_unanswers_crossing_clue() {
        let (mut grid, mut clues) = setup(&yoyo_yellow(), 13, 13);
        for (row, ch) in "XELLOW".chars().enumerate() {
            set(&mut grid, p(0, row), &ch.to_string());
        }
        clues.refresh_answered(&grid, &[p(0, 0)]);
        assert!(clues.get("1-down").unwrap().answered);

        let sel = Selection::new(p(0, 0), "1-across");
        let changes = check(&mut grid, &mut clues, &sel, Scope::Letter, Confirmation::Cancel);
        assert_eq!(changes.len(), 1);
        assert!(grid.is_blank_at(p(0, 0)));
        assert!(!clues.get("1-down").unwrap().answered);
    }

    #[test]
    fn test_check_word_is_idempotent() {
        let (mut grid, mut clues) = setup(&crossing(), 5, 3);
        set(&mut grid, p(0, 0), "C");
        set(&mut grid, p(1, 0), "Z");
        set(&mut grid, p(2, 0), "Q");
        let sel = Selection::new(p(1, 0), "1-across");

        check(&mut grid, &mut clues, &sel, Scope::Word, Confirmation::Cancel);
        let once = (grid.clone(), clues.clone());
        let again = check(&mut grid, &mut clues, &sel, Scope::Word, Confirmation::Cancel);
        assert!(again.is_empty());
        assert_eq!((grid, clues), once);
    }

    #[test]
    fn test_reveal_word_marks_only_complete_clues() {
        let (mut grid, mut clues) = setup(&yoyo_yellow(), 13, 13);
        let sel = Selection::new(p(0, 0), "1-across");
        let changes = reveal(&mut grid, &mut clues, &sel, Scope::Word, Confirmation::Cancel);
        assert_eq!(changes.len(), 4);
        assert!(clues.get("1-across").unwrap().answered);
        assert!(!clues.get("1-down").unwrap().answered);

        let down = Selection::new(p(0, 0), "1-down");
        let changes = reveal(&mut grid, &mut clues, &down, Scope::Word, Confirmation::Cancel);
        assert_eq!(changes.len(), 5, "the shared Y was already revealed");
        assert!(clues.get("1-down").unwrap().answered);
    }

    #[test]
    fn test_reveal_word_covers_whole_group() {
        let (mut grid, mut clues) = setup(&linked(), 5, 5);
        let sel = Selection::new(p(4, 1), "3-down");
        let changes = reveal(&mut grid, &mut clues, &sel, Scope::Word, Confirmation::Cancel);
        assert_eq!(changes.len(), 5);
        assert!(clues.get("2-down").unwrap().answered);
        assert!(clues.get("3-down").unwrap().answered);
        assert!(grid.is_complete());
    }

    #[test]
    fn test_grid_scope_needs_confirmation() {
        let (mut grid, mut clues) = setup(&crossing(), 5, 3);
        let sel = Selection::default();
        assert!(reveal(&mut grid, &mut clues, &sel, Scope::Grid, Confirmation::Cancel).is_empty());
        assert!(clear_grid(&mut grid, &mut clues, Confirmation::Cancel).is_empty());

        let changes = reveal(&mut grid, &mut clues, &sel, Scope::Grid, Confirmation::Confirm);
        assert_eq!(changes.len(), 9);
        assert!(clues.clues().iter().all(|c| c.answered));

        set(&mut grid, p(4, 2), "X");
        let changes = check(&mut grid, &mut clues, &sel, Scope::Grid, Confirmation::Confirm);
        assert_eq!(changes.len(), 1);
        assert!(!clues.get("3-across").unwrap().answered);
        assert!(clues.get("1-across").unwrap().answered);

        let changes = clear_grid(&mut grid, &mut clues, Confirmation::Confirm);
        assert_eq!(changes.len(), 8);
        assert!(clues.clues().iter().all(|c| !c.answered));
    }

    #[test]
    fn test_check_and_reveal_skip_unknown_values() {
        let mut e = entry("1-across", 1, Direction::Across, (0, 0), None);
        e.length = 2;
        let entries = vec![e];
        let grid = build(2, 1, &entries, None, true).unwrap();
        let mut clues = project(&entries, &grid, None).unwrap();
        let mut grid = grid;
        set(&mut grid, p(0, 0), "Q");
        let sel = Selection::new(p(0, 0), "1-across");
        assert!(check(&mut grid, &mut clues, &sel, Scope::Word, Confirmation::Cancel).is_empty());
        assert!(reveal(&mut grid, &mut clues, &sel, Scope::Word, Confirmation::Cancel).is_empty());
        assert_eq!(grid.get(p(0, 0)).unwrap().guess, "Q");
    }

    #[test]
    fn test_clear_word_keeps_letters_of_crossing_words_in_progress() {
        let (mut grid, mut clues) = setup(&crossing(), 5, 3);
        // 1-across filled, and 2-down has a letter below the shared T
        set(&mut grid, p(0, 0), "C");
        set(&mut grid, p(1, 0), "A");
        set(&mut grid, p(2, 0), "T");
        set(&mut grid, p(2, 1), "O");
        clues.refresh_answered(&grid, &[p(0, 0), p(1, 0), p(2, 0)]);
        assert!(clues.get("1-across").unwrap().answered);

        let sel = Selection::new(p(1, 0), "1-across");
        let changes = clear_word(&mut grid, &mut clues, &sel);

        // (0,0) crosses 1-down whose neighbours (none above, (0,1) below) are blank: cleared.
        // (1,0) is single-direction: cleared. (2,0) has O below in 2-down: kept.
        let cleared: Vec<Position> = changes.iter().map(|c| c.pos).collect();
        assert_eq!(cleared, vec![p(0, 0), p(1, 0)]);
        assert_eq!(grid.get(p(2, 0)).unwrap().guess, "T");
        assert!(!clues.get("1-across").unwrap().answered);
    }

    #[test]
    fn test_clear_word_keeps_letter_when_crossing_word_has_one_before_it() {
        let (mut grid, mut clues) = setup(&crossing(), 5, 3);
        // 3-across filled; 2-down's only other letter is the O above the shared E
        set(&mut grid, p(2, 1), "O");
        set(&mut grid, p(2, 2), "E");
        set(&mut grid, p(3, 2), "A");
        set(&mut grid, p(4, 2), "R");

        let sel = Selection::new(p(3, 2), "3-across");
        let changes = clear_word(&mut grid, &mut clues, &sel);

        let cleared: Vec<Position> = changes.iter().map(|c| c.pos).collect();
        assert_eq!(cleared, vec![p(3, 2), p(4, 2)]);
        assert_eq!(grid.get(p(2, 2)).unwrap().guess, "E");
        assert_eq!(grid.get(p(2, 1)).unwrap().guess, "O");
    }

    #[test]
    fn test_clear_word_marks_group_unanswered_even_if_nothing_cleared() {
        let entries = vec![
            entry("1-across", 1, Direction::Across, (0, 1), Some("AB")),
            entry("1-down", 1, Direction::Down, (0, 0), Some("XAY")),
            entry("2-down", 2, Direction::Down, (1, 0), Some("PBQ")),
        ];
        let (mut grid, mut clues) = setup(&entries, 2, 3);
        for cell in grid.cells_mut() {
            cell.guess = cell.value.unwrap().to_string();
        }
        clues.refresh_answered(&grid, &[p(0, 1)]);
        assert!(clues.get("1-across").unwrap().answered);

        let sel = Selection::new(p(0, 1), "1-across");
        let changes = clear_word(&mut grid, &mut clues, &sel);
        assert!(changes.is_empty(), "both cells sit in the middle of filled down words");
        assert!(!clues.get("1-across").unwrap().answered);
    }

    #[test]
    fn test_clear_grid_on_empty_puzzle_changes_nothing() {
        let (mut grid, mut clues) = setup(&yoyo_yellow(), 13, 13);
        assert!(clear_grid(&mut grid, &mut clues, Confirmation::Confirm).is_empty());
    }
}
