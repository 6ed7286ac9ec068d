//! Notifications handed to the host: focus moves, letter changes, completion.

use crate::model::Position;
use serde::Serialize;

/// The selected cell and clue changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusEvent {
    pub pos: Position,
    pub clue_id: String,
}

/// A cell's guess actually changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellChange {
    pub pos: Position,
    pub guess: String,
    pub previous_guess: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CrosswordEvent {
    CellFocus(FocusEvent),
    CellChange(CellChange),
    /// Every cell now holds its correct letter.
    Complete,
}
