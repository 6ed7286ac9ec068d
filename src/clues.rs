//! Clue projection: derive each clue's `answered` / `selected` view state
//! from the entries and the current cells.
//!
//! A clue is answered when every square of every entry in its group holds a
//! guess, so all members of a linked clue ("7, 20 across") share one status.

use crate::errors::PuzzleError;
use crate::grid::Grid;
use crate::model::{Clue, ClueEntry, Position};
use std::collections::{HashMap, HashSet};

/// Clues in entry order with an id index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClueSet {
    clues: Vec<Clue>,
    index: HashMap<String, usize>,
}

impl ClueSet {
    #[must_use]
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Clue> {
        self.index.get(id).map(|&i| &self.clues[i])
    }

    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }

    /// The entries of `id`'s group, in group order.
    pub fn group_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a ClueEntry> + 'a {
        self.get(id)
            .map(|c| c.entry.group.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|gid| self.get(gid))
            .map(|c| &c.entry)
    }

    /// Every square of every entry in `id`'s group, deduplicated, in typing order.
    #[must_use]
    pub fn group_positions(&self, id: &str) -> Vec<Position> {
        let mut seen = HashSet::new();
        self.group_of(id)
            .flat_map(ClueEntry::positions)
            .filter(|p| seen.insert(*p))
            .collect()
    }

    /// Mark exactly the clue `id` as selected (or none).
    pub(crate) fn select(&mut self, id: Option<&str>) {
        for clue in &mut self.clues {
            clue.selected = Some(clue.entry.id.as_str()) == id;
        }
    }

    /// Recompute `answered` for every clue whose group covers any of `touched`.
    pub(crate) fn refresh_answered(&mut self, grid: &Grid, touched: &[Position]) {
        let touched: HashSet<Position> = touched.iter().copied().collect();
        let updates: Vec<(usize, bool)> = self
            .clues
            .iter()
            .enumerate()
            .filter(|(_, clue)| {
                self.group_positions(&clue.entry.id).iter().any(|p| touched.contains(p))
            })
            .map(|(i, clue)| (i, is_answered(self, grid, &clue.entry.id)))
            .collect();
        for (i, answered) in updates {
            self.clues[i].answered = answered;
        }
    }

    /// Force every clue in `id`'s group to unanswered.
    pub(crate) fn unanswer_group(&mut self, id: &str) {
        let members: Vec<usize> = self
            .get(id)
            .map(|c| c.entry.group.iter().filter_map(|g| self.position_of(g)).collect())
            .unwrap_or_default();
        for i in members {
            self.clues[i].answered = false;
        }
    }

    pub(crate) fn unanswer_all(&mut self) {
        for clue in &mut self.clues {
            clue.answered = false;
        }
    }
}

/// Check that every group is self-consistent.
///
/// # Errors
///
/// [`PuzzleError::GroupIdNotFound`] or [`PuzzleError::MissingFromGroup`].
pub fn validate_groups(entries: &[ClueEntry]) -> Result<(), PuzzleError> {
    let ids: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    for entry in entries {
        if let Some(missing) = entry.group.iter().find(|g| !ids.contains(g.as_str())) {
            return Err(PuzzleError::GroupIdNotFound { id: entry.id.clone(), missing: missing.clone() });
        }
        if !entry.group.contains(&entry.id) {
            return Err(PuzzleError::MissingFromGroup { id: entry.id.clone() });
        }
    }
    Ok(())
}

/// Build the clue view for `entries` over `grid`.
///
/// # Errors
///
/// Group integrity errors from [`validate_groups`].
pub fn project(entries: &[ClueEntry], grid: &Grid, selected: Option<&str>) -> Result<ClueSet, PuzzleError> {
    validate_groups(entries)?;

    let mut set = ClueSet {
        clues: entries
            .iter()
            .map(|entry| Clue {
                entry: entry.clone(),
                answered: false,
                selected: Some(entry.id.as_str()) == selected,
            })
            .collect(),
        index: entries.iter().enumerate().map(|(i, e)| (e.id.clone(), i)).collect(),
    };

    let answered: Vec<bool> = set.clues.iter().map(|c| is_answered(&set, grid, &c.entry.id)).collect();
    for (clue, a) in set.clues.iter_mut().zip(answered) {
        clue.answered = a;
    }
    Ok(set)
}

/// The group of `id` covers at least one square and all of them hold a guess.
#[must_use]
pub fn is_answered(clues: &ClueSet, grid: &Grid, id: &str) -> bool {
    let positions = clues.group_positions(id);
    !positions.is_empty()
        && positions.iter().all(|&p| grid.get(p).is_some_and(|c| !c.guess.is_empty()))
}
