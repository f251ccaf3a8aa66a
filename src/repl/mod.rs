//! The interactive command surface: line parsing, dispatch, the help table
//! and the "did you mean" suggestion for unknown commands.

mod command;
mod help;
mod repl;
mod suggest;

pub use command::{Command, ParseError};
pub use repl::Repl;
