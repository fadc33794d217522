//! Terminal output encoder (plain/ANSI 256/ANSI true color).
//!
//! Renders a [`Canvas`] to terminal-ready text. Escape sequences are only
//! emitted when the style changes between neighbouring cells, and every
//! styled line ends with a reset so a figure never bleeds into the text
//! printed after it.

use crate::canvas::{Canvas, Cell};
use crate::color::Rgba;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// SGR reset.
const RESET: &str = "\x1b[0m";

/// Terminal color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalMode {
    /// Characters only, no escape codes.
    Plain,
    /// xterm 256-color palette.
    Ansi256,
    /// 24-bit color.
    #[default]
    TrueColor,
}

impl FromStr for TerminalMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "none" | "mono" => Ok(Self::Plain),
            "ansi256" | "256" => Ok(Self::Ansi256),
            "truecolor" | "24bit" => Ok(Self::TrueColor),
            other => Err(crate::Error::InvalidColor(format!("unknown color mode '{other}'"))),
        }
    }
}

/// Terminal encoder configuration.
#[derive(Debug, Clone, Default)]
pub struct TerminalEncoder {
    mode: TerminalMode,
}

impl TerminalEncoder {
    /// Create a new terminal encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Render a canvas to a string.
    #[must_use]
    pub fn render(&self, canvas: &Canvas) -> String {
        match self.mode {
            TerminalMode::Plain => canvas.to_plain_string(),
            TerminalMode::Ansi256 | TerminalMode::TrueColor => self.render_styled(canvas),
        }
    }

    fn render_styled(&self, canvas: &Canvas) -> String {
        let mut output =
            String::with_capacity((canvas.width() as usize * 12 + 8) * canvas.height() as usize);

        for y in 0..canvas.height() {
            let Some(row) = canvas.row(y) else { break };
            let mut current: (Option<Rgba>, Option<Rgba>) = (None, None);
            let mut styled = false;

            for cell in row {
                let style = (cell.fg, cell.bg);
                if style != current {
                    output.push_str(RESET);
                    self.push_style(&mut output, cell);
                    current = style;
                    styled = true;
                }
                output.push(cell.ch);
            }

            // Any line that switched style ends reset.
            if styled {
                output.push_str(RESET);
            }
            output.push('\n');
        }

        output
    }

    fn push_style(&self, output: &mut String, cell: &Cell) {
        if let Some(fg) = cell.fg {
            output.push_str(&self.escape(38, fg));
        }
        if let Some(bg) = cell.bg {
            output.push_str(&self.escape(48, bg));
        }
    }

    /// SGR sequence selecting `color` on layer 38 (foreground) or 48 (background).
    fn escape(&self, layer: u8, color: Rgba) -> String {
        match self.mode {
            TerminalMode::TrueColor => format!("\x1b[{layer};2;{};{};{}m", color.r, color.g, color.b),
            _ => format!("\x1b[{layer};5;{}m", color.to_ansi256()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_canvas() -> Canvas {
        let mut canvas = Canvas::new(4, 2).expect("canvas creation should succeed");
        canvas.put_str(0, 0, "ab", Some(Rgba::rgb(255, 0, 0)));
        canvas.set_cell(3, 1, 'z', None, Some(Rgba::rgb(0, 0, 255)));
        canvas
    }

    #[test]
    fn test_plain_has_no_escapes() {
        let output = TerminalEncoder::new().mode(TerminalMode::Plain).render(&sample_canvas());
        assert!(!output.contains('\x1b'));
        assert_eq!(output, "ab  \n   z\n");
    }

    #[test]
    fn test_true_color_escapes() {
        let output = TerminalEncoder::new().mode(TerminalMode::TrueColor).render(&sample_canvas());
        assert!(output.contains("\x1b[38;2;255;0;0m"));
        assert!(output.contains("\x1b[48;2;0;0;255m"));
        assert!(output.lines().all(|l| !l.contains('\x1b') || l.ends_with("\x1b[0m")));
    }

    #[test]
    fn test_style_emitted_once_per_run() {
        let output = TerminalEncoder::new().mode(TerminalMode::TrueColor).render(&sample_canvas());
        assert_eq!(output.matches("38;2;255;0;0").count(), 1);
    }

    #[test]
    fn test_styled_line_ends_with_reset() {
        // Red text followed by unstyled cells still closes with a reset.
        let output = TerminalEncoder::new().mode(TerminalMode::TrueColor).render(&sample_canvas());
        let first = output.lines().next().unwrap();
        assert!(first.starts_with("\x1b[0m\x1b[38;2;255;0;0mab\x1b[0m  "));
        assert!(first.ends_with("  \x1b[0m"));
    }

    #[test]
    fn test_ansi256_escapes() {
        let output = TerminalEncoder::new().mode(TerminalMode::Ansi256).render(&sample_canvas());
        assert!(output.contains("\x1b[38;5;196m"));
        assert!(output.contains("\x1b[48;5;21m"));
    }

    #[test]
    fn test_unstyled_line_has_no_reset() {
        let canvas = Canvas::new(3, 1).expect("canvas creation should succeed");
        let output = TerminalEncoder::new().render(&canvas);
        assert_eq!(output, "   \n");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("plain".parse::<TerminalMode>().unwrap(), TerminalMode::Plain);
        assert_eq!("ANSI256".parse::<TerminalMode>().unwrap(), TerminalMode::Ansi256);
        assert!("sepia".parse::<TerminalMode>().is_err());
    }
}
