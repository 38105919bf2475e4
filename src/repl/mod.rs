//! REPL Module
//!
//! The interactive command shell: input tokenising, command parsing, the
//! caught-Pokemon registry, and session execution.

mod commands;
mod input;
mod pokedex;
mod session;

pub use commands::{Command, CommandError, CommandInfo, COMMANDS};
pub use input::{clean_input, spawn_line_reader};
pub use pokedex::Pokedex;
pub use session::{roll_catch, Flow, PageCursor, Session, PROMPT};
