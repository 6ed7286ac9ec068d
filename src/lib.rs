//! Interactive crossword engine: builds a grid from clue entries, tracks the
//! cursor and the solver's guesses, and saves progress as a compact guess grid.
//!
//! Start with [`Crossword::load`].

// Library API shared by the CLI and the WASM build
pub mod answers;
pub mod clues;
pub mod command;
pub mod crossword;
pub mod errors;
pub mod events;
pub mod grid;
pub mod guess_grid;
pub mod log;
pub mod model;
pub mod navigation;
pub mod store;

#[cfg(test)]
mod test_support;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crossword::{Crossword, CrosswordConfig};
pub use errors::LoadError;
pub use model::{CrosswordData, Direction, Position};
