use crate::answers::{Confirmation, Scope};
use crate::crossword::{Crossword, CrosswordConfig};
use crate::errors::{LoadError, UsageError};
use crate::guess_grid::GuessGrid;
use crate::log::init_logger;
use crate::model::{CrosswordData, Position};
use crate::navigation::Arrow;
use crate::store::MemoryStore;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(Debug, Serialize)]
struct WasmError {
    /// Error code (e.g., "P003", "G001")
    code: String,
    /// Display message, shown to users verbatim
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<LoadError> for WasmError {
    fn from(e: LoadError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl From<UsageError> for WasmError {
    fn from(e: UsageError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl WasmError {
    fn bad_argument(code: &str, message: String, details: &str) -> Self {
        WasmError {
            code: code.to_string(),
            message,
            description: "Invalid argument from JavaScript".to_string(),
            details: details.to_string(),
            help: None,
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        // the message stays first so hosts can show it as-is
        let err = js_sys::Error::new(&e.message);
        let _ = js_sys::Reflect::set(&err, &"code".into(), &e.code.into());
        let _ = js_sys::Reflect::set(&err, &"details".into(), &e.details.into());
        if let Some(help) = e.help {
            let _ = js_sys::Reflect::set(&err, &"help".into(), &help.into());
        }
        err.into()
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        WasmError::bad_argument(
            "WASM002",
            format!("serialization failed: {e}"),
            "The engine state could not be converted to JavaScript format.",
        )
        .into()
    })
}

/// Validate the static regex at startup rather than on the first keystroke.
///
/// If you add another `LazyLock<Regex>`, touch it here too.
fn validate_internal_regexes() {
    let _ = &*crate::guess_grid::DEFAULT_CELL_MATCHER_RE;
    log::debug!("Internal regex patterns validated successfully");
}

/// Initialize logging and validation with the specified debug setting.
///
/// Call this from JavaScript once after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    validate_internal_regexes();
    init_logger(debug_enabled);

    log::info!("WASM module initialized");
}

/// A crossword session owned by JavaScript.
///
/// Saved progress is passed in to the constructor and read back with
/// [`WasmCrossword::guess_grid`]; storing it (localStorage, a server) is the
/// page's business.
#[wasm_bindgen]
pub struct WasmCrossword {
    inner: Crossword,
}

#[wasm_bindgen]
impl WasmCrossword {
    /// `data` is the puzzle JSON object, `progress` an optional `{value: string[][]}`,
    /// `config` an optional `{allowMissingSolutions, cellMatcher, persist}`.
    #[wasm_bindgen(constructor)]
    pub fn new(data: JsValue, progress: JsValue, config: JsValue) -> Result<WasmCrossword, JsValue> {
        let data: CrosswordData = serde_wasm_bindgen::from_value(data).map_err(|e| {
            WasmError::bad_argument("WASM001", format!("invalid puzzle data: {e}"), "The puzzle must be an object with id, dimensions and entries.")
        })?;
        let progress = parse_progress(progress)?;
        let config: CrosswordConfig = if config.is_null() || config.is_undefined() {
            CrosswordConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| {
                WasmError::bad_argument("WASM001", format!("invalid config: {e}"), "Config keys are allowMissingSolutions, cellMatcher and persist.")
            })?
        };

        let inner = Crossword::load(data, config, progress, &MemoryStore::default()).map_err(WasmError::from)?;
        Ok(WasmCrossword { inner })
    }

    /// Swap in new puzzle data; on error the current puzzle stays.
    pub fn rebuild(&mut self, data: JsValue, progress: JsValue) -> Result<(), JsValue> {
        let data: CrosswordData = serde_wasm_bindgen::from_value(data).map_err(|e| {
            WasmError::bad_argument("WASM001", format!("invalid puzzle data: {e}"), "The puzzle must be an object with id, dimensions and entries.")
        })?;
        let progress = parse_progress(progress)?;
        self.inner.rebuild(data, progress, &MemoryStore::default()).map_err(WasmError::from)?;
        Ok(())
    }

    pub fn click(&mut self, col: usize, row: usize) -> Result<(), JsValue> {
        self.inner.click(Position::new(col, row)).map_err(WasmError::from)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = selectClue)]
    pub fn select_clue(&mut self, id: &str) -> Result<(), JsValue> {
        self.inner.select_clue(id).map_err(WasmError::from)?;
        Ok(())
    }

    /// `key` is a `KeyboardEvent.key` such as `"ArrowLeft"`; other keys are ignored.
    pub fn arrow(&mut self, key: &str) -> bool {
        match key.parse::<Arrow>() {
            Ok(arrow) => {
                self.inner.arrow(arrow);
                true
            }
            Err(_) => false,
        }
    }

    pub fn tab(&mut self, shift: bool) {
        self.inner.cycle_clue(!shift);
    }

    /// Type one character; returns false if it was ignored.
    pub fn input(&mut self, key: &str) -> bool {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.inner.input(c),
            _ => false,
        }
    }

    pub fn backspace(&mut self) {
        self.inner.backspace();
    }

    pub fn delete(&mut self) {
        self.inner.delete();
    }

    /// `scope` is `"letter"`, `"word"` or `"grid"`; grid needs `confirmed`.
    pub fn check(&mut self, scope: &str, confirmed: bool) -> Result<usize, JsValue> {
        Ok(self.inner.check(parse_scope(scope)?, Confirmation::from(confirmed)))
    }

    pub fn reveal(&mut self, scope: &str, confirmed: bool) -> Result<usize, JsValue> {
        Ok(self.inner.reveal(parse_scope(scope)?, Confirmation::from(confirmed)))
    }

    pub fn clear(&mut self, scope: &str, confirmed: bool) -> Result<usize, JsValue> {
        Ok(self.inner.clear(parse_scope(scope)?, Confirmation::from(confirmed)))
    }

    pub fn cells(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.cells())
    }

    pub fn clues(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.clues())
    }

    /// The cursor as `{cell: {col, row} | null, clueId: string | null}`.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.selection())
    }

    pub fn highlighted(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.highlighted())
    }

    #[wasm_bindgen(js_name = isComplete)]
    pub fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    /// Pending focus, change and complete events, oldest first.
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
        let events = self.inner.drain_events();
        to_js(&events)
    }

    #[wasm_bindgen(js_name = guessGrid)]
    pub fn guess_grid(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.guess_grid())
    }
}

/// `null`/`undefined` mean "no saved progress"; anything else must be a guess grid.
fn parse_progress(progress: JsValue) -> Result<Option<GuessGrid>, WasmError> {
    if progress.is_null() || progress.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(progress).map(Some).map_err(|e| {
        WasmError::bad_argument("WASM001", format!("Error loading grid: {e}"), "Saved progress must look like {value: string[][]}.")
    })
}

fn parse_scope(scope: &str) -> Result<Scope, JsValue> {
    match scope.to_ascii_lowercase().as_str() {
        "letter" => Ok(Scope::Letter),
        "word" => Ok(Scope::Word),
        "grid" => Ok(Scope::Grid),
        other => Err(WasmError::bad_argument(
            "WASM003",
            format!("unknown scope {other:?}"),
            "Scope must be letter, word or grid.",
        )
        .into()),
    }
}

/// Generate a debug report for troubleshooting.
///
/// Users can copy/paste this when reporting issues.
#[wasm_bindgen]
pub fn get_debug_info(puzzle_id: &str, error_message: &str, cols: usize, rows: usize) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // writing to a String never fails
    let _ = writeln!(&mut report, "=== CROSSGRID DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"));
    let _ = writeln!(&mut report, "Generated: {}", js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_else(|| "unknown".to_string()));
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{error_message}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Puzzle");
    let _ = writeln!(&mut report, "Id: {puzzle_id}");
    let _ = writeln!(&mut report, "Dimensions: {cols}x{rows}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {user_agent}");
        }
        let _ = writeln!(&mut report, "Location: {}", window.location().href().unwrap_or_else(|_| "unknown".to_string()));
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}
