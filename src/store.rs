//! Where saved progress lives between sessions.
//!
//! The engine only needs a get/set pair keyed by puzzle id. When to write
//! (debouncing) is up to the host; see [`crate::crossword::Crossword::persist`].

use crate::guess_grid::GuessGrid;
use std::collections::HashMap;

pub trait GuessStore {
    fn get(&self, puzzle_id: &str) -> Option<GuessGrid>;
    fn set(&mut self, puzzle_id: &str, grid: &GuessGrid);
}

/// Keeps grids in memory; the default for hosts that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    grids: HashMap<String, GuessGrid>,
}

impl GuessStore for MemoryStore {
    fn get(&self, puzzle_id: &str) -> Option<GuessGrid> {
        self.grids.get(puzzle_id).cloned()
    }

    fn set(&mut self, puzzle_id: &str, grid: &GuessGrid) {
        self.grids.insert(puzzle_id.to_string(), grid.clone());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::GuessStore;
    use crate::guess_grid::GuessGrid;
    use log::{debug, warn};
    use std::path::{Path, PathBuf};

    /// One JSON file per puzzle under a directory.
    ///
    /// Unreadable or malformed files count as "no saved progress"; a bad
    /// save should never stop a puzzle from opening.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new<P: AsRef<Path>>(dir: P) -> Self {
            FileStore { dir: dir.as_ref().to_path_buf() }
        }

        /// Puzzle ids look like `crosswords/quick/16000`; flatten them to a file name.
        #[must_use]
        pub fn path_for(&self, puzzle_id: &str) -> PathBuf {
            let name: String = puzzle_id
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                .collect();
            self.dir.join(format!("{name}.json"))
        }
    }

    impl GuessStore for FileStore {
        fn get(&self, puzzle_id: &str) -> Option<GuessGrid> {
            let path = self.path_for(puzzle_id);
            let data = match std::fs::read_to_string(&path) {
                Ok(data) => data,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
                Err(e) => {
                    warn!("failed to read saved grid '{}': {e}", path.display());
                    return None;
                }
            };
            match serde_json::from_str(&data) {
                Ok(grid) => Some(grid),
                Err(e) => {
                    warn!("ignoring malformed saved grid '{}': {e}", path.display());
                    None
                }
            }
        }

        fn set(&mut self, puzzle_id: &str, grid: &GuessGrid) {
            let path = self.path_for(puzzle_id);
            let result = std::fs::create_dir_all(&self.dir)
                .and_then(|()| serde_json::to_string(grid).map_err(std::io::Error::from))
                .and_then(|json| std::fs::write(&path, json));
            match result {
                Ok(()) => debug!("saved grid to '{}'", path.display()),
                Err(e) => warn!("failed to save grid to '{}': {e}", path.display()),
            }
        }
    }
}
