//! Error types for loading and driving a crossword, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Puzzle-data errors ([`PuzzleError`]), fatal to a (re)build:
//!
//! - P001: `OutOfBounds` (Entry runs off the grid)
//! - P002: `SolutionLength` (Solution missing or of the wrong length)
//! - P003: `CharacterClash` (Crossing entries disagree on a letter)
//! - P004: `OverlappingDirection` (Two entries of one direction share a cell)
//! - P005: `MissingFromGroup` (Entry's id absent from its own group)
//! - P006: `GroupIdNotFound` (Group refers to an unknown entry)
//! - P007: `EmptyGrid` (Grid has zero columns or rows)
//! - P008: `GridTooLarge` (Grid wider or taller than the supported maximum)
//!
//! Guess-grid errors ([`GuessGridError`]), shown to users as "Error loading grid":
//!
//! - G001: `WrongSize` (Element count does not match the grid)
//! - G002: `DisallowedCharacter` (Entry rejected by the cell matcher)
//! - G003: `BadMatcher` (Cell matcher pattern does not compile)
//!
//! Host contract errors ([`UsageError`]):
//!
//! - U001: `UnknownCell` (Position has no cell)
//! - U002: `UnknownClue` (No clue with that id)
//! - U003: `BadGuess` (Guess rejected by the cell matcher)
//!
//! Command-script errors ([`CommandError`]):
//!
//! - C001: `Unknown` (Not a recognised command)
//! - C002: `AtLine` (Script statement failed to parse)
//!
//! # Examples
//!
//! ```
//! use crossgrid::errors::PuzzleError;
//!
//! let err = PuzzleError::MissingFromGroup { id: "7-across".to_string() };
//! assert_eq!(err.code(), "P005");
//! println!("{}", err.display_detailed());
//! ```

use crate::model::{Direction, Position};

/// Structural problems in the puzzle data itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("Clue {id} runs out of bounds at {pos}")]
    OutOfBounds { id: String, pos: Position },

    #[error("Solution length mismatch for clue {id}: expected {expected}, found {found:?}")]
    SolutionLength { id: String, expected: usize, found: Option<usize> },

    #[error("Solution character clash at {pos}: '{existing}' vs '{incoming}' (clue {id})")]
    CharacterClash { id: String, pos: Position, existing: char, incoming: char },

    #[error("Overlapping {direction} solutions at {pos} (clue {id})")]
    OverlappingDirection { id: String, pos: Position, direction: Direction },

    #[error("Clue id {id} missing from its own group")]
    MissingFromGroup { id: String },

    #[error("Group clue id {missing} not found (referenced by {id})")]
    GroupIdNotFound { id: String, missing: String },

    #[error("Grid dimensions must be non-zero (got {cols}x{rows})")]
    EmptyGrid { cols: usize, rows: usize },

    #[error("Grid of {cols}x{rows} exceeds the maximum of {max} per side")]
    GridTooLarge { cols: usize, rows: usize, max: usize },
}

impl PuzzleError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PuzzleError::OutOfBounds { .. } => "P001",
            PuzzleError::SolutionLength { .. } => "P002",
            PuzzleError::CharacterClash { .. } => "P003",
            PuzzleError::OverlappingDirection { .. } => "P004",
            PuzzleError::MissingFromGroup { .. } => "P005",
            PuzzleError::GroupIdNotFound { .. } => "P006",
            PuzzleError::EmptyGrid { .. } => "P007",
            PuzzleError::GridTooLarge { .. } => "P008",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            PuzzleError::OutOfBounds { .. } => "Entry runs off the grid",
            PuzzleError::SolutionLength { .. } => "Solution missing or of the wrong length",
            PuzzleError::CharacterClash { .. } => "Crossing entries disagree on a letter",
            PuzzleError::OverlappingDirection { .. } => "Two entries of one direction share a cell",
            PuzzleError::MissingFromGroup { .. } => "Entry's id absent from its own group",
            PuzzleError::GroupIdNotFound { .. } => "Group refers to an unknown entry",
            PuzzleError::EmptyGrid { .. } => "Grid has zero columns or rows",
            PuzzleError::GridTooLarge { .. } => "Grid wider or taller than the supported maximum",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            PuzzleError::OutOfBounds { .. } => "Every square an entry covers, starting at its position and walking its length along its direction, must lie inside the grid.",
            PuzzleError::SolutionLength { .. } => "Unless missing solutions are allowed, every entry must carry a solution, and any solution given must have exactly as many characters as the entry's length.",
            PuzzleError::CharacterClash { .. } => "Where an across and a down entry cross, both solutions must put the same letter in the shared square.",
            PuzzleError::OverlappingDirection { .. } => "A square can belong to at most one across entry and one down entry.",
            PuzzleError::MissingFromGroup { .. } => "An entry's group lists every entry of the printed clue, and must include the entry itself.",
            PuzzleError::GroupIdNotFound { .. } => "Every id in a group must name an entry of the same puzzle.",
            PuzzleError::EmptyGrid { .. } => "A puzzle needs at least one column and one row.",
            PuzzleError::GridTooLarge { .. } => "The saved guess grid holds one string per square, so each side is capped to keep that allocation bounded.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            PuzzleError::SolutionLength { .. } => Some("Fix the solution, or load the puzzle with missing solutions allowed"),
            PuzzleError::MissingFromGroup { .. } => Some("Example: a standalone clue \"1-across\" has group [\"1-across\"]"),
            PuzzleError::GroupIdNotFound { .. } => Some("Check the group for typos in the entry ids (e.g. '7-across' vs '7-down')"),
            _ => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// A persisted or supplied guess grid that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessGridError {
    #[error("Error loading grid: expected {expected} cells, found {found}")]
    WrongSize { expected: usize, found: usize },

    #[error("Error loading grid: disallowed entry {entry:?} at ({col}, {row})")]
    DisallowedCharacter { col: usize, row: usize, entry: String },

    #[error("Error loading grid: invalid cell matcher {pattern:?}: {reason}")]
    BadMatcher { pattern: String, reason: String },
}

impl GuessGridError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GuessGridError::WrongSize { .. } => "G001",
            GuessGridError::DisallowedCharacter { .. } => "G002",
            GuessGridError::BadMatcher { .. } => "G003",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GuessGridError::WrongSize { .. } => "Element count does not match the grid",
            GuessGridError::DisallowedCharacter { .. } => "Entry rejected by the cell matcher",
            GuessGridError::BadMatcher { .. } => "Cell matcher pattern does not compile",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            GuessGridError::WrongSize { .. } => "A saved grid holds one entry per square, cols x rows in total. A different count usually means progress saved for another puzzle.",
            GuessGridError::DisallowedCharacter { .. } => "Each non-empty entry of a saved grid must be one character accepted by the cell matcher.",
            GuessGridError::BadMatcher { .. } => "The configured cell matcher must be a valid regular expression.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GuessGridError::WrongSize { .. } => Some("Discard the saved progress for this puzzle and start again"),
            GuessGridError::DisallowedCharacter { .. } => Some("The default matcher is ^[A-Z0-9]$ (one uppercase letter or digit)"),
            GuessGridError::BadMatcher { .. } => Some("Example: ^[A-Z]$"),
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Anything that stops a puzzle from loading.
///
/// Callers surface `to_string()` verbatim; nothing partial is installed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),

    #[error(transparent)]
    GuessGrid(#[from] GuessGridError),
}

impl LoadError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Puzzle(e) => e.code(),
            LoadError::GuessGrid(e) => e.code(),
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            LoadError::Puzzle(e) => e.description(),
            LoadError::GuessGrid(e) => e.description(),
        }
    }

    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            LoadError::Puzzle(e) => e.details(),
            LoadError::GuessGrid(e) => e.details(),
        }
    }

    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            LoadError::Puzzle(e) => e.help(),
            LoadError::GuessGrid(e) => e.help(),
        }
    }

    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// A host passed a position or clue id the current puzzle does not have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("No cell at {pos}")]
    UnknownCell { pos: Position },

    #[error("No clue with id {id:?}")]
    UnknownClue { id: String },

    #[error("Guess {guess:?} at {pos} is not allowed by the cell matcher")]
    BadGuess { pos: Position, guess: String },
}

impl UsageError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            UsageError::UnknownCell { .. } => "U001",
            UsageError::UnknownClue { .. } => "U002",
            UsageError::BadGuess { .. } => "U003",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            UsageError::UnknownCell { .. } => "Position has no cell",
            UsageError::UnknownClue { .. } => "No clue with that id",
            UsageError::BadGuess { .. } => "Guess rejected by the cell matcher",
        }
    }

    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            UsageError::UnknownCell { .. } => "Black squares and positions outside the grid cannot be selected or edited.",
            UsageError::UnknownClue { .. } => "Clue ids come from the loaded puzzle's entries.",
            UsageError::BadGuess { .. } => "A guess is empty or one character the cell matcher accepts, so saved progress can always be loaded again.",
        }
    }

    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            UsageError::BadGuess { .. } => Some("The default matcher is ^[A-Z0-9]$ (one uppercase letter or digit)"),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Text that does not parse as a session command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command {command:?}")]
    Unknown { command: String },

    #[error("Script error on line {line}: {source}")]
    AtLine { line: usize, source: Box<CommandError> },
}

impl CommandError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Unknown { .. } => "C001",
            CommandError::AtLine { .. } => "C002",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            CommandError::Unknown { .. } => "Not a recognised command",
            CommandError::AtLine { .. } => "Script statement failed to parse",
        }
    }

    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            CommandError::Unknown { .. } => "Commands are click, select, up, down, left, right, next, prev, tab, shift-tab, type, backspace, delete, check, reveal and clear.",
            CommandError::AtLine { .. } => "Scripts are parsed in full before any command runs, so a bad statement leaves the puzzle untouched.",
        }
    }

    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            CommandError::Unknown { .. } | CommandError::AtLine { .. } => {
                Some("Example: click 0 0; type yoyo; check word")
            }
        }
    }

    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
