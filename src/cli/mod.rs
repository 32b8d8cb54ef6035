// CLI module
// Terminal chat host

mod commands;
mod input;
mod render;
mod repl;

pub use commands::{format_help, Command};
pub use input::InputHandler;
pub use render::{reply_footer, reply_text, CRISIS_BANNER};
pub use repl::ChatRepl;
