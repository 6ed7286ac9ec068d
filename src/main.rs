use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;

use crossgrid::command;
use crossgrid::crossword::{Crossword, CrosswordConfig};
use crossgrid::errors::{CommandError, LoadError, UsageError};
use crossgrid::guess_grid::{GuessGrid, DEFAULT_CELL_MATCHER};
use crossgrid::model::{CrosswordData, Direction, Position};
use crossgrid::store::{FileStore, GuessStore, MemoryStore};

/// Play a crossword from the command line
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// Path to the puzzle JSON
    puzzle: PathBuf,

    /// Commands to run, e.g. "click 0 0; type yoyo; check word"
    #[arg(short, long)]
    commands: Option<String>,

    /// File of commands, one or more per line
    #[arg(short = 'f', long)]
    script: Option<PathBuf>,

    /// Starting guess grid (JSON); takes priority over the store
    #[arg(short, long)]
    guesses: Option<PathBuf>,

    /// Directory to load and save progress in
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Accept entries that carry no solution
    #[arg(long)]
    allow_missing_solutions: bool,

    /// Regex each typed character must match
    #[arg(long, default_value = DEFAULT_CELL_MATCHER)]
    cell_matcher: String,

    /// Print the events each command produced (JSON, one per line)
    #[arg(short, long)]
    events: bool,

    /// Print the final guess grid (JSON) instead of the board
    #[arg(long)]
    print_guess_grid: bool,
}

/// Entry point of the crossgrid CLI.
///
/// Delegates to [`try_main`] and prints any error, with its code and help
/// when it is one of ours, before exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("CROSSGRID_DEBUG").is_ok();
    crossgrid::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        if let Some(load_err) = e.downcast_ref::<LoadError>() {
            eprintln!("Error: {}", load_err.display_detailed());
        } else if let Some(cmd_err) = e.downcast_ref::<CommandError>() {
            eprintln!("Error: {}", cmd_err.display_detailed());
        } else if let Some(usage_err) = e.downcast_ref::<UsageError>() {
            eprintln!("Error: {}", usage_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load the puzzle, run the commands, print the result and save progress.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data: CrosswordData = serde_json::from_str(&fs::read_to_string(&cli.puzzle)?)?;
    let supplied: Option<GuessGrid> = match &cli.guesses {
        Some(path) => Some(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => None,
    };

    // parse everything up front so a typo leaves saved progress alone
    let mut commands = Vec::new();
    if let Some(path) = &cli.script {
        commands.extend(command::parse_script(&fs::read_to_string(path)?)?);
    }
    if let Some(text) = &cli.commands {
        commands.extend(command::parse_script(text)?);
    }

    let config = CrosswordConfig {
        allow_missing_solutions: cli.allow_missing_solutions,
        cell_matcher: cli.cell_matcher.clone(),
        ..CrosswordConfig::default()
    };
    let mut store: Box<dyn GuessStore> = match &cli.store {
        Some(dir) => Box::new(FileStore::new(dir)),
        None => Box::new(MemoryStore::default()),
    };

    let mut crossword = Crossword::load(data, config, supplied, store.as_ref())?;
    log::debug!("running {} commands", commands.len());

    for cmd in &commands {
        cmd.apply(&mut crossword)?;
        let events = crossword.drain_events();
        if cli.events {
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
    }

    if cli.print_guess_grid {
        println!("{}", serde_json::to_string(crossword.guess_grid())?);
    } else {
        print!("{}", render(&crossword));
    }

    crossword.persist(store.as_mut());
    Ok(())
}

/// The board (`#` black, `.` empty, `*` cursor when empty) followed by the clues.
fn render(crossword: &Crossword) -> String {
    let grid = crossword.grid();
    let cursor = crossword.selection().cell;
    let mut out = String::new();

    for row in 0..grid.rows() {
        let line: String = (0..grid.cols())
            .map(|col| {
                let pos = Position::new(col, row);
                match grid.get(pos) {
                    None => '#',
                    Some(cell) => cell.guess.chars().next().unwrap_or(if cursor == Some(pos) { '*' } else { '.' }),
                }
            })
            .collect();
        out.push_str(&line);
        out.push('\n');
    }

    for direction in [Direction::Across, Direction::Down] {
        out.push_str(&format!("\n{}\n", direction.to_string().to_uppercase()));
        for clue in crossword.clues().iter().filter(|c| c.direction() == direction) {
            let marker = if clue.answered { '✓' } else { ' ' };
            out.push_str(&format!(
                "{marker} {:>4} {} ({})\n",
                clue.entry.human_number, clue.entry.clue, clue.entry.length
            ));
        }
    }

    if crossword.is_complete() {
        out.push_str("\nSolved!\n");
    }
    out
}
