//! A crossword session: one loaded puzzle, its cells and clues, the cursor,
//! and the events waiting for the host.
//!
//! # Examples
//!
//! ```
//! use crossgrid::crossword::{Crossword, CrosswordConfig};
//! use crossgrid::model::CrosswordData;
//! use crossgrid::store::MemoryStore;
//!
//! let json = r#"{
//!   "id": "demo", "dimensions": {"cols": 4, "rows": 1},
//!   "entries": [{
//!     "id": "1-across", "number": 1, "humanNumber": "1", "direction": "across",
//!     "length": 4, "group": ["1-across"], "position": {"x": 0, "y": 0}, "solution": "YOYO"
//!   }]
//! }"#;
//! let data: CrosswordData = serde_json::from_str(json)?;
//! let mut crossword = Crossword::load(data, CrosswordConfig::default(), None, &MemoryStore::default())?;
//!
//! crossword.select_clue("1-across")?;
//! for c in "YOYO".chars() {
//!     crossword.input(c);
//! }
//! assert!(crossword.is_complete());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::answers::{self, Confirmation, Scope};
use crate::clues::{self, ClueSet};
use crate::errors::{LoadError, UsageError};
use crate::events::{CellChange, CrosswordEvent};
use crate::grid::{self, Grid};
use crate::guess_grid::{self, DEFAULT_CELL_MATCHER, GuessGrid};
use crate::model::{Cell, Clue, CrosswordData, Position};
use crate::navigation::{self, Arrow, Selection};
use crate::store::GuessStore;
use fancy_regex::Regex;
use log::{debug, info, warn};
use serde::Deserialize;

/// Per-load settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrosswordConfig {
    /// Accept entries without solutions (check and reveal then skip those cells).
    pub allow_missing_solutions: bool,
    /// Regex every guess character must match.
    pub cell_matcher: String,
    /// Whether [`Crossword::persist`] writes to the store at all.
    pub persist: bool,
}

impl Default for CrosswordConfig {
    fn default() -> Self {
        CrosswordConfig {
            allow_missing_solutions: false,
            cell_matcher: DEFAULT_CELL_MATCHER.to_string(),
            persist: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Crossword {
    data: CrosswordData,
    config: CrosswordConfig,
    matcher: Regex,
    grid: Grid,
    clues: ClueSet,
    selection: Selection,
    guesses: GuessGrid,
    dirty: bool,
    complete: bool,
    events: Vec<CrosswordEvent>,
}

/// Everything a (re)build produces, installed only once all of it succeeded.
struct Built {
    matcher: Regex,
    grid: Grid,
    clues: ClueSet,
    guesses: GuessGrid,
}

fn build_state(
    data: &CrosswordData,
    config: &CrosswordConfig,
    supplied: Option<GuessGrid>,
    store: &dyn GuessStore,
) -> Result<Built, LoadError> {
    let matcher = guess_grid::cell_matcher(&config.cell_matcher)?;
    let (cols, rows) = (data.dimensions.cols, data.dimensions.rows);
    grid::check_dimensions(cols, rows)?;

    let seed = match supplied.or_else(|| store.get(&data.id)) {
        Some(g) => Some(guess_grid::decode(g, cols, rows, &matcher)?),
        None => None,
    };
    let allow_missing = config.allow_missing_solutions || !data.solution_available;
    let grid = grid::build(cols, rows, &data.entries, seed.as_ref(), allow_missing)?;
    let clues = clues::project(&data.entries, &grid, None)?;
    let guesses = guess_grid::encode(cols, rows, &grid);
    Ok(Built { matcher, grid, clues, guesses })
}

impl Crossword {
    /// Build a session for `data`.
    ///
    /// Starting guesses come from `supplied` when given, else from `store`.
    ///
    /// # Errors
    ///
    /// Any structural [`crate::errors::PuzzleError`] or an unusable guess grid.
    pub fn load(
        data: CrosswordData,
        config: CrosswordConfig,
        supplied: Option<GuessGrid>,
        store: &dyn GuessStore,
    ) -> Result<Self, LoadError> {
        let built = build_state(&data, &config, supplied, store).inspect_err(|e| {
            warn!("failed to load puzzle {}: {e}", data.id);
        })?;
        info!("loaded puzzle {} ({} cells, {} clues)", data.id, built.grid.cells().len(), built.clues.len());
        let complete = built.grid.is_complete();
        Ok(Crossword {
            data,
            config,
            matcher: built.matcher,
            grid: built.grid,
            clues: built.clues,
            selection: Selection::default(),
            guesses: built.guesses,
            dirty: false,
            complete,
            events: Vec::new(),
        })
    }

    /// Replace the puzzle (new id or changed entries).
    ///
    /// On error the current state stays exactly as it was. On success the
    /// selection and any undrained events are discarded, and so are edits not
    /// yet written with [`Crossword::persist`]; persist first to keep them.
    ///
    /// # Errors
    ///
    /// As for [`Crossword::load`].
    pub fn rebuild(
        &mut self,
        data: CrosswordData,
        supplied: Option<GuessGrid>,
        store: &dyn GuessStore,
    ) -> Result<(), LoadError> {
        let built = build_state(&data, &self.config, supplied, store).inspect_err(|e| {
            warn!("rebuild of {} rejected, keeping {}: {e}", data.id, self.data.id);
        })?;
        info!("rebuilt puzzle {} ({} cells)", data.id, built.grid.cells().len());
        self.complete = built.grid.is_complete();
        self.data = data;
        self.matcher = built.matcher;
        self.grid = built.grid;
        self.clues = built.clues;
        self.guesses = built.guesses;
        self.selection = Selection::default();
        self.dirty = false;
        self.events.clear();
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.data.id
    }

    #[must_use]
    pub fn data(&self) -> &CrosswordData {
        &self.data
    }

    #[must_use]
    pub fn config(&self) -> &CrosswordConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    #[must_use]
    pub fn clues(&self) -> &[Clue] {
        self.clues.clues()
    }

    #[must_use]
    pub fn clue(&self, id: &str) -> Option<&Clue> {
        self.clues.get(id)
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn selected_clue(&self) -> Option<&Clue> {
        self.selection.clue_id.as_deref().and_then(|id| self.clues.get(id))
    }

    /// Squares of the selected clue's group, for highlighting.
    #[must_use]
    pub fn highlighted(&self) -> Vec<Position> {
        self.selection
            .clue_id
            .as_deref()
            .map(|id| self.clues.group_positions(id))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.grid.is_complete()
    }

    /// The current guesses in persisted layout.
    #[must_use]
    pub fn guess_grid(&self) -> &GuessGrid {
        &self.guesses
    }

    /// Write the guess grid to `store` if anything changed since the last write.
    pub fn persist(&mut self, store: &mut dyn GuessStore) {
        if self.config.persist && self.dirty {
            store.set(&self.data.id, &self.guesses);
            self.dirty = false;
        }
    }

    /// Take the events emitted since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<CrosswordEvent> {
        std::mem::take(&mut self.events)
    }

    // === selection ===

    fn set_selection(&mut self, next: Selection) {
        if next == self.selection {
            return;
        }
        let focus_changed = next.focus() != self.selection.focus();
        self.grid.select(next.cell);
        self.clues.select(next.clue_id.as_deref());
        self.selection = next;
        if focus_changed {
            if let Some(focus) = self.selection.focus() {
                debug!("focus {} {}", focus.pos, focus.clue_id);
                self.events.push(CrosswordEvent::CellFocus(focus));
            }
        }
    }

    /// Mark one cell selected without touching the clue selection.
    ///
    /// # Errors
    ///
    /// [`UsageError::UnknownCell`] if there is no cell at `pos`.
    pub fn select_cell(&mut self, pos: Position) -> Result<(), UsageError> {
        if !self.grid.contains(pos) {
            return Err(UsageError::UnknownCell { pos });
        }
        let next = Selection { cell: Some(pos), ..self.selection.clone() };
        self.set_selection(next);
        Ok(())
    }

    /// # Errors
    ///
    /// [`UsageError::UnknownClue`] if no clue has that id.
    pub fn select_clue(&mut self, id: &str) -> Result<(), UsageError> {
        let next = navigation::select_clue(&self.clues, id)?;
        self.set_selection(next);
        Ok(())
    }

    /// # Errors
    ///
    /// [`UsageError::UnknownCell`] if there is no cell at `pos`.
    pub fn click(&mut self, pos: Position) -> Result<(), UsageError> {
        let next = navigation::click(&self.grid, &self.clues, &self.selection, pos)?;
        self.set_selection(next);
        Ok(())
    }

    pub fn arrow(&mut self, arrow: Arrow) {
        let next = navigation::move_directional(&self.grid, &self.clues, &self.selection, arrow);
        self.set_selection(next);
    }

    pub fn move_next(&mut self) {
        let next = navigation::move_next(&self.clues, &self.selection);
        self.set_selection(next);
    }

    pub fn move_prev(&mut self) {
        let next = navigation::move_prev(&self.clues, &self.selection);
        self.set_selection(next);
    }

    /// Tab (`forwards`) or Shift+Tab.
    pub fn cycle_clue(&mut self, forwards: bool) {
        let next = navigation::cycle_clue(&self.clues, &self.selection, forwards);
        self.set_selection(next);
    }

    // === edits ===

    fn record(&mut self, changes: Vec<CellChange>) -> usize {
        let n = changes.len();
        if n > 0 {
            self.guesses = guess_grid::encode(self.grid.cols(), self.grid.rows(), &self.grid);
            self.dirty = true;
        }
        self.events.extend(changes.into_iter().map(CrosswordEvent::CellChange));

        let complete = self.grid.is_complete();
        if complete && !self.complete {
            info!("puzzle {} complete", self.data.id);
            self.events.push(CrosswordEvent::Complete);
        }
        self.complete = complete;
        n
    }

    fn write_guess(&mut self, pos: Position, guess: String) -> usize {
        let mut changes = Vec::new();
        if let Some(cell) = self.grid.get_mut(pos) {
            if cell.guess != guess {
                let previous_guess = std::mem::replace(&mut cell.guess, guess.clone());
                changes.push(CellChange { pos, guess, previous_guess });
            }
        }
        self.clues.refresh_answered(&self.grid, &[pos]);
        self.record(changes)
    }

    /// Set the guess at `pos` directly (`""` clears it).
    ///
    /// The guess is upper-cased and must pass the cell matcher, so whatever
    /// is written here can be loaded again from the saved grid.
    /// Returns the number of cells that changed (0 or 1).
    ///
    /// # Errors
    ///
    /// [`UsageError::UnknownCell`] if there is no cell at `pos`,
    /// [`UsageError::BadGuess`] if the matcher rejects the guess.
    pub fn set_guess(&mut self, pos: Position, guess: &str) -> Result<usize, UsageError> {
        if !self.grid.contains(pos) {
            return Err(UsageError::UnknownCell { pos });
        }
        let guess = guess.to_uppercase();
        if !guess.is_empty() && !guess_grid::is_allowed(&guess, &self.matcher) {
            return Err(UsageError::BadGuess { pos, guess });
        }
        Ok(self.write_guess(pos, guess))
    }

    /// A typed character: fill the selected cell and advance.
    ///
    /// Lowercase letters are upper-cased; characters the cell matcher rejects
    /// are ignored. Returns `true` if the character was accepted.
    pub fn input(&mut self, c: char) -> bool {
        let Some(pos) = self.selection.cell else {
            return false;
        };
        let guess = c.to_uppercase().collect::<String>();
        if !guess_grid::is_allowed(&guess, &self.matcher) {
            debug!("ignoring input {c:?}");
            return false;
        }
        self.write_guess(pos, guess);
        self.move_next();
        true
    }

    /// Clear the selected cell; if it was already blank, step back and clear that one.
    pub fn backspace(&mut self) {
        let Some(pos) = self.selection.cell else { return };
        if self.grid.is_blank_at(pos) {
            self.move_prev();
            if let Some(prev) = self.selection.cell.filter(|p| *p != pos) {
                self.write_guess(prev, String::new());
            }
        } else {
            self.write_guess(pos, String::new());
        }
    }

    /// Clear the selected cell without moving.
    pub fn delete(&mut self) {
        if let Some(pos) = self.selection.cell {
            self.write_guess(pos, String::new());
        }
    }

    /// Check guesses in `scope`. Returns the number of cells cleared.
    pub fn check(&mut self, scope: Scope, confirmation: Confirmation) -> usize {
        let changes = answers::check(&mut self.grid, &mut self.clues, &self.selection, scope, confirmation);
        self.record(changes)
    }

    /// Reveal solutions in `scope`. Returns the number of cells changed.
    pub fn reveal(&mut self, scope: Scope, confirmation: Confirmation) -> usize {
        let changes = answers::reveal(&mut self.grid, &mut self.clues, &self.selection, scope, confirmation);
        self.record(changes)
    }

    /// Clear guesses in `scope`: the selected cell, the selected word, or (confirmed) the whole grid.
    pub fn clear(&mut self, scope: Scope, confirmation: Confirmation) -> usize {
        let changes = match scope {
            Scope::Letter => {
                let Some(pos) = self.selection.cell else { return 0 };
                return self.write_guess(pos, String::new());
            }
            Scope::Word => answers::clear_word(&mut self.grid, &mut self.clues, &self.selection),
            Scope::Grid => answers::clear_grid(&mut self.grid, &mut self.clues, confirmation),
        };
        self.record(changes)
    }
}
