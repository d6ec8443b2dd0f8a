//! REPL commands
//!
//! Tokenizing, the command table and the handlers behind each entry.

mod handlers;
mod input;
mod registry;

pub use handlers::{execute, is_caught, CommandContext, Flow};
pub use input::clean_input;
pub use registry::{Command, CommandKind, CommandRegistry};
