//! Parsing of one line of player input into a typed command.
//!
//! Exploration and combat accept different verbs; both are case-insensitive
//! and ignore surrounding whitespace.

use crate::dungeon::Direction;
use thiserror::Error;

/// Malformed input. Reported back to the player, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: {verb} <inventory index>")]
    MissingArgument { verb: &'static str },
    #[error("Invalid index: {0:?}")]
    InvalidIndex(String),
    #[error("Unknown command: {0:?}")]
    Unknown(String),
}

/// Commands available while walking the dungeon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Map,
    Inventory,
    Use(usize),
    Equip(usize),
    Stats,
    Help,
    Quit,
}

/// Commands available inside a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Flee,
    Use(usize),
    Equip(usize),
    Stats,
    Inventory,
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Parses `use N` / `equip N`; `None` when `line` does not start with `verb`.
fn parse_indexed(line: &str, verb: &'static str) -> Option<Result<usize, CommandError>> {
    let rest = line.strip_prefix(verb)?;
    // "user" is not "use"
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }
    let result = match rest.split_whitespace().next() {
        None => Err(CommandError::MissingArgument { verb }),
        Some(arg) => arg
            .parse::<usize>()
            .map_err(|_| CommandError::InvalidIndex(arg.to_string())),
    };
    Some(result)
}

impl Command {
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        let line = normalize(input);
        let command = match line.as_str() {
            "w" => Command::Move(Direction::Up),
            "s" => Command::Move(Direction::Down),
            "a" => Command::Move(Direction::Left),
            "d" => Command::Move(Direction::Right),
            "map" => Command::Map,
            "inv" => Command::Inventory,
            "stats" => Command::Stats,
            "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => {
                if let Some(index) = parse_indexed(other, "use") {
                    return index.map(Command::Use);
                }
                if let Some(index) = parse_indexed(other, "equip") {
                    return index.map(Command::Equip);
                }
                return Err(CommandError::Unknown(other.to_string()));
            }
        };
        Ok(command)
    }
}

impl CombatAction {
    /// An empty line is an attack.
    pub fn parse(input: &str) -> Result<CombatAction, CommandError> {
        let line = normalize(input);
        let action = match line.as_str() {
            "" | "hit" | "h" => CombatAction::Attack,
            "flee" | "run" => CombatAction::Flee,
            "stats" => CombatAction::Stats,
            "inv" => CombatAction::Inventory,
            other => {
                if let Some(index) = parse_indexed(other, "use") {
                    return index.map(CombatAction::Use);
                }
                if let Some(index) = parse_indexed(other, "equip") {
                    return index.map(CombatAction::Equip);
                }
                return Err(CommandError::Unknown(other.to_string()));
            }
        };
        Ok(action)
    }
}
