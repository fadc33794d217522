//! Character canvas with sub-cell marker resolution.
//!
//! The canvas is the terminal counterpart of a pixel framebuffer: a
//! row-major grid of cells, each holding one character plus optional
//! foreground and background colors. Point and line drawing happens in
//! "sub-cell pixel" space, whose resolution depends on the [`Marker`]; see
//! [`crate::marker`].

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::marker::Marker;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Displayed character.
    pub ch: char,
    /// Foreground color, `None` for the terminal default.
    pub fg: Option<Rgba>,
    /// Background color, `None` for the terminal default.
    pub bg: Option<Rgba>,
    /// Marker family whose sub-cell mask produced `ch`.
    marker: Option<Marker>,
    /// Sub-cell bits set so far.
    mask: u8,
}

impl Cell {
    const BLANK: Self = Self { ch: ' ', fg: None, bg: None, marker: None, mask: 0 };
}

/// Character grid that plots draw into.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Canvas {
    /// Create a blank canvas of `width × height` cells.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        })
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reset every cell to a blank with the given background.
    pub fn clear(&mut self, bg: Option<Rgba>) {
        for cell in &mut self.cells {
            *cell = Cell { bg, ..Cell::BLANK };
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell at `(x, y)`, or `None` outside the canvas.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        self.index(x as i32, y as i32).map(|i| &self.cells[i])
    }

    /// Row `y` as a slice of cells.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Write a character, keeping the cell background. Out-of-bounds writes are ignored.
    pub fn set_char(&mut self, x: i32, y: i32, ch: char, fg: Option<Rgba>) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = fg;
            cell.marker = None;
            cell.mask = 0;
        }
    }

    /// Write a character with both colors.
    pub fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: Option<Rgba>, bg: Option<Rgba>) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { ch, fg, bg, marker: None, mask: 0 };
        }
    }

    /// Fill a rectangle of cells with one character and background.
    pub fn fill_cells(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        ch: char,
        fg: Option<Rgba>,
        bg: Option<Rgba>,
    ) {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.set_cell(x + dx, y + dy, ch, fg, bg);
            }
        }
    }

    /// Write a string starting at `(x, y)`, clipped to the canvas. Returns columns written.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, fg: Option<Rgba>) -> u32 {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let cx = x + i as i32;
            if self.index(cx, y).is_some() {
                self.set_char(cx, y, ch, fg);
                written += 1;
            }
        }
        written
    }

    /// Set one sub-cell pixel.
    ///
    /// Pixels of the same marker family in one cell merge into a single
    /// glyph; a different marker replaces the cell. The most recent color wins.
    pub fn plot_dot(&mut self, px: i32, py: i32, marker: Marker, color: Option<Rgba>) {
        if px < 0 || py < 0 {
            return;
        }
        let (cols, rows) = marker.resolution();
        let (cx, cy) = (px / cols as i32, py / rows as i32);
        let Some(i) = self.index(cx, cy) else {
            return;
        };

        let bit = marker.bit(px as u32 % cols, py as u32 % rows);
        let cell = &mut self.cells[i];
        let mask = match cell.marker {
            Some(existing) if existing.same_family(marker) => cell.mask | bit,
            _ => bit,
        };
        cell.marker = Some(marker);
        cell.mask = mask;
        cell.ch = marker.glyph(mask);
        cell.fg = color;
    }

    /// Draw a line between two sub-cell pixels using Bresenham's algorithm.
    pub fn draw_line(
        &mut self,
        (x0, y0): (i32, i32),
        (x1, y1): (i32, i32),
        marker: Marker,
        color: Option<Rgba>,
    ) {
        for (x, y) in bresenham(x0, y0, x1, y1) {
            self.plot_dot(x, y, marker, color);
        }
    }

    /// Plain text content, one line per row.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.cells.chunks(self.width as usize) {
            out.extend(row.iter().map(|c| c.ch));
            out.push('\n');
        }
        out
    }
}

/// Pixels on the line between two points (Bresenham, 1965).
#[must_use]
pub fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut points = Vec::with_capacity((dx - dy + 1) as usize);
    let (mut x, mut y) = (x0, y0);

    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_rejects_zero_size() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::new(10, 0).is_err());
    }

    #[test]
    fn test_blank_canvas_plain_string() {
        let canvas = Canvas::new(3, 2).unwrap();
        assert_eq!(canvas.to_plain_string(), "   \n   \n");
    }

    #[test]
    fn test_put_str_clips() {
        let mut canvas = Canvas::new(5, 1).unwrap();
        let written = canvas.put_str(3, 0, "hello", None);
        assert_eq!(written, 2);
        assert_eq!(canvas.to_plain_string(), "   he\n");
    }

    #[test]
    fn test_braille_dots_merge() {
        let mut canvas = Canvas::new(1, 1).unwrap();
        canvas.plot_dot(0, 0, Marker::Braille, None);
        canvas.plot_dot(1, 3, Marker::Braille, None);
        assert_eq!(canvas.get(0, 0).unwrap().ch, '⢁');
    }

    #[test]
    fn test_different_marker_replaces() {
        let mut canvas = Canvas::new(1, 1).unwrap();
        canvas.plot_dot(0, 0, Marker::Braille, None);
        canvas.plot_dot(0, 0, Marker::Hd, None);
        assert_eq!(canvas.get(0, 0).unwrap().ch, '▘');
    }

    #[test]
    fn test_set_char_resets_mask() {
        let mut canvas = Canvas::new(1, 1).unwrap();
        canvas.plot_dot(0, 0, Marker::Hd, None);
        canvas.set_char(0, 0, 'x', None);
        canvas.plot_dot(1, 1, Marker::Hd, None);
        assert_eq!(canvas.get(0, 0).unwrap().ch, '▗');
    }

    #[test]
    fn test_plot_dot_out_of_bounds_ignored() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.plot_dot(-1, 0, Marker::Dot, None);
        canvas.plot_dot(100, 100, Marker::Dot, None);
        assert_eq!(canvas.to_plain_string(), "  \n  \n");
    }

    #[test]
    fn test_horizontal_line_fills_row() {
        let mut canvas = Canvas::new(4, 1).unwrap();
        canvas.draw_line((0, 0), (3, 0), Marker::Sd, Some(Rgba::RED));
        assert_eq!(canvas.to_plain_string(), "████\n");
        assert_eq!(canvas.get(2, 0).unwrap().fg, Some(Rgba::RED));
    }

    #[test]
    fn test_bresenham_endpoints() {
        let points = bresenham(0, 0, 5, 2);
        assert_eq!(points.first(), Some(&(0, 0)));
        assert_eq!(points.last(), Some(&(5, 2)));
        assert_eq!(points.len(), 6);
    }

    #[test]
    fn test_clear_sets_background() {
        let mut canvas = Canvas::new(2, 1).unwrap();
        canvas.put_str(0, 0, "ab", None);
        canvas.clear(Some(Rgba::BLACK));
        let cell = canvas.get(1, 0).unwrap();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.bg, Some(Rgba::BLACK));
    }
}
