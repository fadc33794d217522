//! Waiting for the viewer between scenes.

use crate::error::Result;
use crate::output::clear_screen;
use std::fmt::Debug;
use std::io::{BufRead, Write};

/// Prompt shown while waiting for Enter.
pub const PROMPT: &str = "[Press Enter to continue...]";

/// Something that holds the demo until the viewer is ready.
pub trait Pause: Debug {
    /// Block until the next scene may start.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the prompt or reading input fails.
    fn pause(&mut self, out: &mut dyn Write) -> Result<()>;
}

/// Prompt, wait for a line on `input`, then clear the screen.
#[derive(Debug)]
pub struct EnterPause<R> {
    input: R,
}

impl<R: BufRead + Debug> EnterPause<R> {
    /// Read lines from `input`.
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl EnterPause<std::io::StdinLock<'static>> {
    /// Read lines from standard input.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock())
    }
}

impl<R: BufRead + Debug> Pause for EnterPause<R> {
    fn pause(&mut self, out: &mut dyn Write) -> Result<()> {
        write!(out, "\n{PROMPT}")?;
        out.flush()?;
        // End of input counts as Enter so piped runs do not hang.
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        clear_screen(out)?;
        Ok(())
    }
}

/// Continue immediately without output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPause;

impl Pause for NoPause {
    fn pause(&mut self, _out: &mut dyn Write) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_enter_pause_prompts_and_clears() {
        let mut pause = EnterPause::new(Cursor::new(b"\n\n".to_vec()));
        let mut out = Vec::new();
        pause.pause(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\n[Press Enter to continue...]"));
        assert!(text.ends_with("\x1b[J"));
    }

    #[test]
    fn test_enter_pause_consumes_one_line() {
        let mut pause = EnterPause::new(Cursor::new(b"first\nsecond\n".to_vec()));
        let mut out = Vec::new();
        pause.pause(&mut out).unwrap();
        assert_eq!(pause.input.position(), 6);
    }

    #[test]
    fn test_enter_pause_at_end_of_input() {
        let mut pause = EnterPause::new(Cursor::new(Vec::new()));
        let mut out = Vec::new();
        assert!(pause.pause(&mut out).is_ok());
    }

    #[test]
    fn test_no_pause_is_silent() {
        let mut out = Vec::new();
        NoPause.pause(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
