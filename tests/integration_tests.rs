//! Integration tests for the crossgrid engine.
//!
//! These drive the public API end to end: loading puzzle JSON, moving the
//! cursor, typing, checking and revealing, and saving progress.

use std::fs;

use crossgrid::answers::{Confirmation, Scope};
use crossgrid::command::parse_script;
use crossgrid::crossword::{Crossword, CrosswordConfig};
use crossgrid::events::CrosswordEvent;
use crossgrid::guess_grid::{self, GuessGrid};
use crossgrid::model::{ClueEntry, CrosswordData, Dimensions, Direction, Position};
use crossgrid::store::{GuessStore, MemoryStore};
use crossgrid::LoadError;

/// Load the YOYO / YELLOW puzzle from fixtures
fn load_fixture() -> CrosswordData {
    let content = fs::read_to_string("tests/fixtures/yoyo.json").expect("Failed to read fixture");
    serde_json::from_str(&content).expect("Invalid fixture JSON")
}

fn open(data: CrosswordData) -> Crossword {
    Crossword::load(data, CrosswordConfig::default(), None, &MemoryStore::default()).unwrap()
}

fn p(col: usize, row: usize) -> Position {
    Position::new(col, row)
}

fn change_count(events: &[CrosswordEvent]) -> usize {
    events.iter().filter(|e| matches!(e, CrosswordEvent::CellChange(_))).count()
}

/// A 13x13 puzzle with one full-width entry per row.
fn thirteen_by_thirteen() -> CrosswordData {
    let entries = (0..13)
        .map(|row| {
            let id = format!("{}-across", row + 1);
            ClueEntry {
                id: id.clone(),
                number: row as u32 + 1,
                human_number: (row + 1).to_string(),
                clue: String::new(),
                direction: Direction::Across,
                length: 13,
                group: vec![id],
                position: p(0, row),
                separator_locations: Default::default(),
                solution: Some("ABCDEFGHIJKLM".to_string()),
            }
        })
        .collect();
    CrosswordData {
        id: "big".to_string(),
        name: None,
        number: None,
        dimensions: Dimensions { cols: 13, rows: 13 },
        entries,
        solution_available: true,
    }
}

#[cfg(test)]
mod building {
    use super::*;

    #[test]
    fn test_one_cell_per_covered_square() {
        let cw = open(load_fixture());
        // 4 + 6 + 3 + 4 squares, two of them shared
        assert_eq!(cw.cells().len(), 15);
        for cell in cw.cells() {
            assert!((1..=2).contains(&cell.clue_ids.len()), "{:?}", cell.pos);
        }
    }

    #[test]
    fn test_shared_first_square() {
        let cw = open(load_fixture());
        let cell = cw.grid().get(p(0, 0)).unwrap();
        assert_eq!(cell.clue_ids, vec!["1-across".to_string(), "1-down".to_string()]);
        assert_eq!(cell.value, Some('Y'));
        assert_eq!(cell.number, Some(1));
        assert!(cw.grid().get(p(1, 1)).is_none());
    }

    #[test]
    fn test_character_clash_is_reported_verbatim() {
        let mut data = load_fixture();
        data.entries[1].solution = Some("XELLOW".to_string());
        let err = Crossword::load(data, CrosswordConfig::default(), None, &MemoryStore::default()).unwrap_err();
        assert!(matches!(err, LoadError::Puzzle(_)));
        assert!(err.to_string().contains("Solution character clash"), "{err}");
    }

    #[test]
    fn test_group_errors() {
        let mut data = load_fixture();
        data.entries[2].group = vec!["3-down".to_string()];
        let err = Crossword::load(data, CrosswordConfig::default(), None, &MemoryStore::default()).unwrap_err();
        assert_eq!(err.to_string(), "Clue id 2-down missing from its own group");

        let mut data = load_fixture();
        data.entries[2].group = vec!["2-down".to_string(), "4-down".to_string()];
        let err = Crossword::load(data, CrosswordConfig::default(), None, &MemoryStore::default()).unwrap_err();
        assert_eq!(err.code(), "P006");
    }

    #[test]
    fn test_missing_solutions_need_permission() {
        let mut data = load_fixture();
        data.entries[3].solution = None;
        assert!(Crossword::load(data.clone(), CrosswordConfig::default(), None, &MemoryStore::default()).is_err());

        let config = CrosswordConfig { allow_missing_solutions: true, ..CrosswordConfig::default() };
        let cw = Crossword::load(data.clone(), config, None, &MemoryStore::default()).unwrap();
        assert_eq!(cw.grid().get(p(5, 3)).unwrap().value, None);

        data.solution_available = false;
        assert!(Crossword::load(data, CrosswordConfig::default(), None, &MemoryStore::default()).is_ok());
    }
}

#[cfg(test)]
mod answering {
    use super::*;

    #[test]
    fn test_check_letter_keeps_right_and_clears_wrong() {
        let mut cw = open(load_fixture());
        cw.select_clue("1-across").unwrap();

        cw.set_guess(p(0, 0), "Y").unwrap();
        cw.drain_events();
        assert_eq!(cw.check(Scope::Letter, Confirmation::Cancel), 0);
        assert_eq!(change_count(&cw.drain_events()), 0);
        assert_eq!(cw.grid().get(p(0, 0)).unwrap().guess, "Y");

        cw.set_guess(p(0, 0), "X").unwrap();
        cw.drain_events();
        cw.check(Scope::Letter, Confirmation::Cancel);
        assert_eq!(change_count(&cw.drain_events()), 1);
        assert!(cw.grid().is_blank_at(p(0, 0)));
    }

    #[test]
    fn test_reveal_word_answers_only_that_clue() {
        let mut cw = open(load_fixture());
        cw.select_clue("1-across").unwrap();
        cw.drain_events();

        assert_eq!(cw.reveal(Scope::Word, Confirmation::Cancel), 4);
        assert_eq!(change_count(&cw.drain_events()), 4);
        assert!(cw.clue("1-across").unwrap().answered);
        assert!(!cw.clue("1-down").unwrap().answered);
    }

    #[test]
    fn test_check_word_is_idempotent() {
        let mut cw = open(load_fixture());
        cw.select_clue("1-down").unwrap();
        for c in "YEXXOW".chars() {
            cw.input(c);
        }
        let first = cw.check(Scope::Word, Confirmation::Cancel);
        let after_first = cw.guess_grid().clone();
        let second = cw.check(Scope::Word, Confirmation::Cancel);

        assert_eq!(first, 2);
        assert_eq!(second, 0);
        assert_eq!(cw.guess_grid(), &after_first);
    }

    #[test]
    fn test_clear_grid_on_empty_puzzle_changes_nothing() {
        let mut cw = open(thirteen_by_thirteen());
        assert_eq!(cw.clear(Scope::Grid, Confirmation::Confirm), 0);
        assert!(cw.drain_events().is_empty());
    }

    #[test]
    fn test_grid_scope_needs_confirmation() {
        let mut cw = open(load_fixture());
        assert_eq!(cw.reveal(Scope::Grid, Confirmation::Cancel), 0);
        assert!(!cw.is_complete());

        assert_eq!(cw.reveal(Scope::Grid, Confirmation::Confirm), 15);
        assert!(cw.is_complete());
        let events = cw.drain_events();
        assert_eq!(events.last(), Some(&CrosswordEvent::Complete));
        assert!(cw.clues().iter().all(|c| c.answered));
    }
}

#[cfg(test)]
mod navigating {
    use super::*;

    #[test]
    fn test_next_chains_into_continuation() {
        let mut cw = open(load_fixture());
        cw.select_clue("2-down").unwrap();
        cw.move_next();
        cw.move_next();
        assert_eq!(cw.selection().cell, Some(p(2, 2)));

        cw.drain_events();
        cw.move_next();
        assert_eq!(cw.selection().cell, Some(p(5, 2)));
        assert_eq!(cw.selection().clue_id.as_deref(), Some("3-down"));
        assert_eq!(cw.drain_events().len(), 1);
    }

    #[test]
    fn test_highlight_covers_whole_group() {
        let mut cw = open(load_fixture());
        cw.select_clue("3-down").unwrap();
        assert_eq!(cw.highlighted().len(), 7);
    }

    #[test]
    fn test_typing_fills_and_advances() {
        let mut cw = open(load_fixture());
        cw.click(p(0, 0)).unwrap();
        assert_eq!(cw.selected_clue().unwrap().id(), "1-across");
        for c in "yoyo".chars() {
            assert!(cw.input(c));
        }
        assert!(cw.clue("1-across").unwrap().answered);
        assert_eq!(cw.selection().cell, Some(p(3, 0)));
        assert!(!cw.input('?'));
    }
}

#[cfg(test)]
mod saving {
    use super::*;

    #[test]
    fn test_guess_grid_round_trip() {
        let data = load_fixture();
        let mut cw = open(data.clone());
        cw.select_clue("1-down").unwrap();
        for c in "YEL".chars() {
            cw.input(c);
        }
        let saved = cw.guess_grid().clone();
        assert_eq!(saved.value.len(), 6);
        assert_eq!(saved.value[0][2], "L");

        let matcher = guess_grid::cell_matcher(guess_grid::DEFAULT_CELL_MATCHER).unwrap();
        let decoded = guess_grid::decode(saved.clone(), 6, 6, &matcher).unwrap();
        let reopened = Crossword::load(data, CrosswordConfig::default(), Some(decoded), &MemoryStore::default()).unwrap();
        assert_eq!(reopened.guess_grid(), &saved);
    }

    #[test]
    fn test_wrong_size_grid_says_error_loading_grid() {
        let err = Crossword::load(load_fixture(), CrosswordConfig::default(), Some(GuessGrid::empty(2, 2)), &MemoryStore::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("Error loading grid"), "{err}");
    }

    #[test]
    fn test_persist_and_resume_from_store() {
        let mut store = MemoryStore::default();
        let mut cw = Crossword::load(load_fixture(), CrosswordConfig::default(), None, &store).unwrap();
        cw.click(p(5, 2)).unwrap();
        cw.input('W');
        cw.persist(&mut store);
        assert!(store.get("crosswords/quick/yoyo").is_some());

        let resumed = Crossword::load(load_fixture(), CrosswordConfig::default(), None, &store).unwrap();
        assert_eq!(resumed.grid().get(p(5, 2)).unwrap().guess, "W");

        // a supplied grid wins over the store
        let fresh = Crossword::load(load_fixture(), CrosswordConfig::default(), Some(GuessGrid::empty(6, 6)), &store).unwrap();
        assert!(fresh.grid().is_blank_at(p(5, 2)));
    }

    #[test]
    fn test_failed_rebuild_keeps_state() {
        let mut cw = open(load_fixture());
        cw.set_guess(p(0, 0), "Y").unwrap();

        let mut bad = load_fixture();
        bad.id = "other".to_string();
        bad.entries[0].position = p(4, 0);
        assert!(cw.rebuild(bad, None, &MemoryStore::default()).is_err());
        assert_eq!(cw.id(), "crosswords/quick/yoyo");
        assert_eq!(cw.grid().get(p(0, 0)).unwrap().guess, "Y");
    }
}

#[cfg(test)]
mod scripts {
    use super::*;

    #[test]
    fn test_script_solves_across_clue() {
        let mut cw = open(load_fixture());
        let commands = parse_script("click 0 0; type yoyo\ncheck word").unwrap();
        for cmd in &commands {
            cmd.apply(&mut cw).unwrap();
        }
        assert!(cw.clue("1-across").unwrap().answered);
        assert_eq!(cw.grid().get(p(3, 0)).unwrap().guess, "O");
    }

    #[test]
    fn test_script_unknown_clue_is_usage_error() {
        let mut cw = open(load_fixture());
        let commands = parse_script("select 9-across").unwrap();
        let err = commands[0].apply(&mut cw).unwrap_err();
        assert_eq!(err.code(), "U002");
    }

    #[test]
    fn test_script_reveal_grid_confirm() {
        let mut cw = open(load_fixture());
        for cmd in &parse_script("reveal grid\n").unwrap() {
            cmd.apply(&mut cw).unwrap();
        }
        assert!(!cw.is_complete());
        for cmd in &parse_script("REVEAL GRID CONFIRM").unwrap() {
            cmd.apply(&mut cw).unwrap();
        }
        assert!(cw.is_complete());
    }
}
