//! Terminal screen control: size detection, clearing and cursor visibility.

use crossterm::{cursor, queue, terminal};
use std::io::Write;

/// Fallback when the terminal size cannot be queried (pipes, CI).
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Terminal size in `(columns, rows)`.
#[must_use]
pub fn terminal_size() -> (u16, u16) {
    match terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => (cols, rows),
        _ => FALLBACK_SIZE,
    }
}

/// Move home and clear everything below, like `ESC[H ESC[J`.
pub fn clear_screen<W: Write + ?Sized>(mut out: &mut W) -> std::io::Result<()> {
    queue!(&mut out, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::FromCursorDown))?;
    out.flush()
}

/// Hide the cursor while frames are redrawn.
pub fn hide_cursor<W: Write + ?Sized>(mut out: &mut W) -> std::io::Result<()> {
    queue!(&mut out, cursor::Hide)?;
    out.flush()
}

/// Restore the cursor.
pub fn show_cursor<W: Write + ?Sized>(mut out: &mut W) -> std::io::Result<()> {
    queue!(&mut out, cursor::Show)?;
    out.flush()
}
