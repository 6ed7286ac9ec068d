//! Generate error code documentation from the error enums themselves.
//!
//! Codes, descriptions, details and help text come straight from each
//! enum's `code()`, `description()`, `details()` and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use crossgrid::errors::{CommandError, GuessGridError, PuzzleError, UsageError};
use crossgrid::model::{Direction, Position};

/// Print one section per error value; works for any of our error enums.
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            println!("### {}: {}\n", error.code(), error.description());
            println!("**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                println!("**How to fix:**");
                println!("```");
                println!("{help_text}");
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{error}");
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

fn all_puzzle_error_variants() -> Vec<PuzzleError> {
    let pos = Position::new(4, 0);
    vec![
        PuzzleError::OutOfBounds { id: "9-across".to_string(), pos: Position::new(15, 3) },
        PuzzleError::SolutionLength { id: "1-across".to_string(), expected: 5, found: Some(4) },
        PuzzleError::CharacterClash { id: "2-down".to_string(), pos, existing: 'T', incoming: 'E' },
        PuzzleError::OverlappingDirection { id: "5-across".to_string(), pos, direction: Direction::Across },
        PuzzleError::MissingFromGroup { id: "7-across".to_string() },
        PuzzleError::GroupIdNotFound { id: "7-across".to_string(), missing: "20-acros".to_string() },
        PuzzleError::EmptyGrid { cols: 0, rows: 15 },
        PuzzleError::GridTooLarge { cols: 100_000, rows: 15, max: crossgrid::grid::MAX_GRID_SIDE },
    ]
}

fn all_guess_grid_error_variants() -> Vec<GuessGridError> {
    vec![
        GuessGridError::WrongSize { expected: 225, found: 169 },
        GuessGridError::DisallowedCharacter { col: 3, row: 7, entry: "ab".to_string() },
        GuessGridError::BadMatcher { pattern: "^[A-Z".to_string(), reason: "unclosed character class".to_string() },
    ]
}

fn all_usage_error_variants() -> Vec<UsageError> {
    vec![
        UsageError::UnknownCell { pos: Position::new(1, 1) },
        UsageError::UnknownClue { id: "99-down".to_string() },
        UsageError::BadGuess { pos: Position::new(0, 0), guess: "YO!".to_string() },
    ]
}

fn all_command_error_variants() -> Vec<CommandError> {
    let unknown = CommandError::Unknown { command: "jump 3".to_string() };
    vec![
        unknown.clone(),
        CommandError::AtLine { line: 4, source: Box::new(unknown) },
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Puzzle Errors (P001–P008)](#puzzle-errors)");
    println!("- [Guess Grid Errors (G001–G003)](#guess-grid-errors)");
    println!("- [Usage Errors (U001–U003)](#usage-errors)");
    println!("- [Command Errors (C001–C002)](#command-errors)\n");

    println!("## Puzzle Errors\n");
    println!("Problems in the puzzle data. The puzzle does not load.\n");
    generate_error_docs!(all_puzzle_error_variants());

    println!("## Guess Grid Errors\n");
    println!("Saved or supplied progress that does not fit the puzzle. Shown to users as \"Error loading grid\".\n");
    generate_error_docs!(all_guess_grid_error_variants());

    println!("## Usage Errors\n");
    println!("A host asked about a cell or clue the puzzle does not have, or wrote a guess the puzzle cannot save.\n");
    generate_error_docs!(all_usage_error_variants());

    println!("## Command Errors\n");
    println!("Command scripts given to the `crossgrid` CLI that do not parse.\n");
    generate_error_docs!(all_command_error_variants());

    println!("## Error Display Formats\n");
    println!("### Simple Format");
    println!("```");
    println!("Error: <message>");
    println!("```\n");
    println!("### Detailed Format (via `display_detailed()`)");
    println!("```");
    println!("<message> (<code>)");
    println!("<help text if available>");
    println!("```");
}
