//! A tiny command language for driving a [`Crossword`] from text.
//!
//! Commands are separated by `;` or newlines, keywords are case-insensitive:
//!
//! ```text
//! click 0 0; right; type yoyo
//! check word
//! reveal grid confirm
//! ```
//!
//! | command                         | effect                                   |
//! |---------------------------------|------------------------------------------|
//! | `click C R`                     | click the cell at column C, row R        |
//! | `select ID`                     | select clue ID (cursor to its first cell)|
//! | `up` `down` `left` `right`      | arrow keys                               |
//! | `next` `prev`                   | step through the current clue            |
//! | `tab` `shift-tab`               | next / previous clue                     |
//! | `type LETTERS`                  | type each letter                         |
//! | `backspace` `delete`            | erase                                    |
//! | `check\|reveal\|clear SCOPE [confirm]` | SCOPE is `letter`, `word` or `grid` |

use crate::answers::{Confirmation, Scope};
use crate::crossword::Crossword;
use crate::errors::{CommandError, UsageError};
use crate::model::Position;
use crate::navigation::Arrow;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt, value},
    sequence::{delimited, preceded, separated_pair},
    IResult,
    Parser,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Click(Position),
    Select(String),
    Arrow(Arrow),
    Next,
    Prev,
    Tab,
    ShiftTab,
    Type(String),
    Backspace,
    Delete,
    Check(Scope, Confirmation),
    Reveal(Scope, Confirmation),
    Clear(Scope, Confirmation),
}

impl Command {
    /// Run this command against `crossword`.
    ///
    /// # Errors
    ///
    /// A [`UsageError`] if the command names a cell or clue the puzzle lacks.
    pub fn apply(&self, crossword: &mut Crossword) -> Result<(), UsageError> {
        match self {
            Command::Click(pos) => crossword.click(*pos)?,
            Command::Select(id) => crossword.select_clue(id)?,
            Command::Arrow(arrow) => crossword.arrow(*arrow),
            Command::Next => crossword.move_next(),
            Command::Prev => crossword.move_prev(),
            Command::Tab => crossword.cycle_clue(true),
            Command::ShiftTab => crossword.cycle_clue(false),
            Command::Type(letters) => {
                for c in letters.chars() {
                    crossword.input(c);
                }
            }
            Command::Backspace => crossword.backspace(),
            Command::Delete => crossword.delete(),
            Command::Check(scope, confirm) => {
                crossword.check(*scope, *confirm);
            }
            Command::Reveal(scope, confirm) => {
                crossword.reveal(*scope, *confirm);
            }
            Command::Clear(scope, confirm) => {
                crossword.clear(*scope, *confirm);
            }
        }
        Ok(())
    }
}

type PResult<'a, O> = IResult<&'a str, O>;

fn number(input: &str) -> PResult<'_, usize> {
    map_res(digit1, str::parse::<usize>).parse(input)
}

fn word(input: &str) -> PResult<'_, &str> {
    take_while1(|c: char| !c.is_whitespace()).parse(input)
}

fn click(input: &str) -> PResult<'_, Command> {
    map(
        preceded((tag_no_case("click"), space1), separated_pair(number, space1, number)),
        |(col, row)| Command::Click(Position::new(col, row)),
    )
    .parse(input)
}

fn select(input: &str) -> PResult<'_, Command> {
    map(preceded((tag_no_case("select"), space1), word), |id| Command::Select(id.to_string())).parse(input)
}

fn typed(input: &str) -> PResult<'_, Command> {
    map(preceded((tag_no_case("type"), space1), word), |s| Command::Type(s.to_string())).parse(input)
}

fn arrow(input: &str) -> PResult<'_, Command> {
    alt((
        value(Command::Arrow(Arrow::Up), tag_no_case("up")),
        value(Command::Arrow(Arrow::Down), tag_no_case("down")),
        value(Command::Arrow(Arrow::Left), tag_no_case("left")),
        value(Command::Arrow(Arrow::Right), tag_no_case("right")),
    ))
    .parse(input)
}

fn keyword(input: &str) -> PResult<'_, Command> {
    alt((
        value(Command::ShiftTab, tag_no_case("shift-tab")),
        value(Command::Tab, tag_no_case("tab")),
        value(Command::Next, tag_no_case("next")),
        value(Command::Prev, tag_no_case("prev")),
        value(Command::Backspace, tag_no_case("backspace")),
        value(Command::Delete, tag_no_case("delete")),
    ))
    .parse(input)
}

fn scope(input: &str) -> PResult<'_, Scope> {
    alt((
        value(Scope::Letter, tag_no_case("letter")),
        value(Scope::Word, tag_no_case("word")),
        value(Scope::Grid, tag_no_case("grid")),
    ))
    .parse(input)
}

fn confirmation(input: &str) -> PResult<'_, Confirmation> {
    map(opt(preceded(space1, tag_no_case("confirm"))), |c| Confirmation::from(c.is_some())).parse(input)
}

fn answer(input: &str) -> PResult<'_, Command> {
    let (rest, verb) = alt((tag_no_case("check"), tag_no_case("reveal"), tag_no_case("clear"))).parse(input)?;
    let (rest, (scope, confirm)) = (preceded(space1, scope), confirmation).parse(rest)?;
    let command = match verb.to_ascii_lowercase().as_str() {
        "check" => Command::Check(scope, confirm),
        "reveal" => Command::Reveal(scope, confirm),
        _ => Command::Clear(scope, confirm),
    };
    Ok((rest, command))
}

fn command(input: &str) -> PResult<'_, Command> {
    delimited(space0, alt((click, select, typed, answer, keyword, arrow)), space0).parse(input)
}

/// Parse one command.
///
/// # Errors
///
/// [`CommandError::Unknown`] if the text is not a command.
pub fn parse_command(text: &str) -> Result<Command, CommandError> {
    match all_consuming(command).parse(text) {
        Ok((_, cmd)) => Ok(cmd),
        Err(_) => Err(CommandError::Unknown { command: text.trim().to_string() }),
    }
}

/// Parse a whole script. Empty statements and `#` comments are skipped.
///
/// # Errors
///
/// [`CommandError::AtLine`] wrapping the first statement that fails to parse.
pub fn parse_script(script: &str) -> Result<Vec<Command>, CommandError> {
    script
        .lines()
        .enumerate()
        .flat_map(|(n, line)| {
            let line = line.split('#').next().unwrap_or_default();
            line.split(';').map(move |stmt| (n + 1, stmt))
        })
        .filter(|(_, stmt)| !stmt.trim().is_empty())
        .map(|(line, stmt)| {
            parse_command(stmt).map_err(|e| CommandError::AtLine { line, source: Box::new(e) })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_command() {
        assert_eq!(parse_command("click 3 4"), Ok(Command::Click(Position::new(3, 4))));
        assert_eq!(parse_command("  SELECT 1-across "), Ok(Command::Select("1-across".into())));
        assert_eq!(parse_command("Left"), Ok(Command::Arrow(Arrow::Left)));
        assert_eq!(parse_command("tab"), Ok(Command::Tab));
        assert_eq!(parse_command("shift-tab"), Ok(Command::ShiftTab));
        assert_eq!(parse_command("type yoyo"), Ok(Command::Type("yoyo".into())));
        assert_eq!(parse_command("backspace"), Ok(Command::Backspace));
        assert_eq!(parse_command("check word"), Ok(Command::Check(Scope::Word, Confirmation::Cancel)));
        assert_eq!(parse_command("reveal grid confirm"), Ok(Command::Reveal(Scope::Grid, Confirmation::Confirm)));
        assert_eq!(parse_command("clear letter"), Ok(Command::Clear(Scope::Letter, Confirmation::Cancel)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_command("jump"), Err(CommandError::Unknown { command: "jump".into() }));
        assert!(parse_command("click 3").is_err());
        assert!(parse_command("check everything").is_err());
        assert!(parse_command("tab tab").is_err());
    }

    #[test]
    fn test_parse_script_lines_and_comments() {
        let script = "click 0 0; type ab\n# a comment\n\ncheck word # inline\nright;;down";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Click(Position::new(0, 0)),
                Command::Type("ab".into()),
                Command::Check(Scope::Word, Confirmation::Cancel),
                Command::Arrow(Arrow::Right),
                Command::Arrow(Arrow::Down),
            ]
        );
    }

    #[test]
    fn test_parse_script_reports_line() {
        let err = parse_script("tab\nfly away").unwrap_err();
        assert_eq!(err.code(), "C002");
        assert!(err.to_string().contains("line 2"));
    }
}
