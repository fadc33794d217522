//! Output encoders and terminal control.

mod screen;
mod terminal;

pub use screen::{clear_screen, hide_cursor, show_cursor, terminal_size, FALLBACK_SIZE};
pub use terminal::{TerminalEncoder, TerminalMode};
