//! The persisted guess grid: a plain `[col][row]` matrix of single-character
//! strings, and the codec between it and the in-memory cells.
//!
//! The matrix is what hosts store (local storage, a file, a server). It is
//! validated on the way in because it may come from an older puzzle revision
//! or from a user editing storage by hand.

use crate::errors::GuessGridError;
use crate::grid::Grid;
use crate::model::Position;
use fancy_regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, OnceLock};

/// Pattern used when the host does not configure a cell matcher.
pub const DEFAULT_CELL_MATCHER: &str = "^[A-Z0-9]$";

pub(crate) static DEFAULT_CELL_MATCHER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // NB: DEFAULT_CELL_MATCHER is a literal known to compile; see test_default_matcher_compiles
    Regex::new(DEFAULT_CELL_MATCHER).unwrap_or_else(|e| panic!("default cell matcher: {e}"))
});

/// Compiled matchers, keyed by pattern. Hosts tend to reuse one pattern for
/// every load, so this avoids recompiling on each rebuild.
static MATCHER_CACHE: OnceLock<Mutex<HashMap<String, Regex>>> = OnceLock::new();

/// Return a compiled cell matcher for `pattern`, caching the result.
///
/// # Errors
///
/// [`GuessGridError::BadMatcher`] if `pattern` is not a valid regex.
pub fn cell_matcher(pattern: &str) -> Result<Regex, GuessGridError> {
    if pattern == DEFAULT_CELL_MATCHER {
        return Ok(DEFAULT_CELL_MATCHER_RE.clone());
    }
    let cache = MATCHER_CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    // a poisoned lock just means we compile without caching
    if let Ok(guard) = cache.lock() {
        if let Some(re) = guard.get(pattern).cloned() {
            return Ok(re);
        }
    }

    let compiled = Regex::new(pattern).map_err(|e| GuessGridError::BadMatcher {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    if let Ok(mut guard) = cache.lock() {
        guard.entry(pattern.to_string()).or_insert_with(|| compiled.clone());
    }
    Ok(compiled)
}

/// `true` if `entry` is exactly one character accepted by `matcher`.
#[must_use]
pub fn is_allowed(entry: &str, matcher: &Regex) -> bool {
    let mut chars = entry.chars();
    chars.next().is_some() && chars.next().is_none() && matcher.is_match(entry).unwrap_or(false)
}

/// User guesses for every square, indexed `value[col][row]`.
///
/// Squares with no guess, and squares that are not part of the grid, hold `""`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuessGrid {
    pub value: Vec<Vec<String>>,
}

impl GuessGrid {
    /// An all-blank grid of the given size.
    #[must_use]
    pub fn empty(cols: usize, rows: usize) -> Self {
        GuessGrid { value: vec![vec![String::new(); rows]; cols] }
    }

    /// The guess stored for `pos`, if the matrix reaches that far.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&str> {
        self.value.get(pos.col)?.get(pos.row).map(String::as_str)
    }

    fn element_count(&self) -> usize {
        self.value.iter().map(Vec::len).sum()
    }
}

/// Project the cells' guesses onto a `cols x rows` matrix.
#[must_use]
pub fn encode(cols: usize, rows: usize, grid: &Grid) -> GuessGrid {
    let mut out = GuessGrid::empty(cols, rows);
    for cell in grid.cells() {
        if let Some(slot) = out.value.get_mut(cell.pos.col).and_then(|c| c.get_mut(cell.pos.row)) {
            slot.clone_from(&cell.guess);
        }
    }
    out
}

/// Check `guesses` against the grid size and the cell matcher.
///
/// # Errors
///
/// [`GuessGridError::WrongSize`] when the total element count is not
/// `cols * rows`; [`GuessGridError::DisallowedCharacter`] for the first
/// non-empty entry the matcher rejects.
pub fn validate(guesses: &GuessGrid, cols: usize, rows: usize, matcher: &Regex) -> Result<(), GuessGridError> {
    let found = guesses.element_count();
    let expected = cols.checked_mul(rows).unwrap_or(usize::MAX);
    if found != expected {
        return Err(GuessGridError::WrongSize { expected, found });
    }

    for (col, column) in guesses.value.iter().enumerate() {
        for (row, entry) in column.iter().enumerate() {
            if !entry.is_empty() && !is_allowed(entry, matcher) {
                return Err(GuessGridError::DisallowedCharacter { col, row, entry: entry.clone() });
            }
        }
    }
    Ok(())
}

/// Boolean form of [`validate`].
#[must_use]
pub fn is_valid(guesses: &GuessGrid, cols: usize, rows: usize, matcher: &Regex) -> bool {
    validate(guesses, cols, rows, matcher).is_ok()
}

/// Validate and take ownership of a loaded grid.
///
/// # Errors
///
/// See [`validate`].
pub fn decode(guesses: GuessGrid, cols: usize, rows: usize, matcher: &Regex) -> Result<GuessGrid, GuessGridError> {
    validate(&guesses, cols, rows, matcher)?;
    Ok(guesses)
}
