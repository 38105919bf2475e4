//! Command Parsing
//!
//! Turns tokenised input into a `Command` and holds the help table.

use thiserror::Error;

// == Command ==
/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    /// Next page of location areas
    Map,
    /// Previous page of location areas
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
    CacheStats,
}

/// Reasons a line does not form a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command")]
    Unknown(String),

    #[error("Please provide {what}. Example: {example}")]
    MissingArgument {
        what: &'static str,
        example: &'static str,
    },
}

/// Help table entry.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo { usage: "help", description: "Displays a help message" },
    CommandInfo { usage: "exit", description: "Exit the Pokedex" },
    CommandInfo { usage: "map", description: "Show the next page of location areas" },
    CommandInfo { usage: "mapb", description: "Show the previous page of location areas" },
    CommandInfo { usage: "explore <area>", description: "List the Pokemon found in a location area" },
    CommandInfo { usage: "catch <pokemon>", description: "Throw a Pokeball at a Pokemon" },
    CommandInfo { usage: "inspect <pokemon>", description: "Show details of a caught Pokemon" },
    CommandInfo { usage: "pokedex", description: "List every Pokemon you have caught" },
    CommandInfo { usage: "cache", description: "Show lookup cache statistics" },
];

impl Command {
    /// Parses cleaned words. Returns `Ok(None)` for an empty line.
    ///
    /// Extra words after the expected argument are ignored.
    pub fn parse(words: &[String]) -> Result<Option<Self>, CommandError> {
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };
        let arg = args.first().cloned();

        let command = match name.as_str() {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "explore" => Command::Explore(arg.ok_or(CommandError::MissingArgument {
                what: "a location area name",
                example: "explore pastoria-city-area",
            })?),
            "catch" => Command::Catch(arg.ok_or(CommandError::MissingArgument {
                what: "a pokemon name",
                example: "catch pikachu",
            })?),
            "inspect" => Command::Inspect(arg.ok_or(CommandError::MissingArgument {
                what: "a pokemon name",
                example: "inspect pidgey",
            })?),
            "pokedex" => Command::Pokedex,
            "cache" => Command::CacheStats,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}
