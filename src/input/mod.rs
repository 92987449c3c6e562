pub mod command;

pub use command::{parse_line, Action, CommandError};
