//! Figures: a grid of plots rendered onto one canvas.
//!
//! ```
//! use termplot::figure::Figure;
//! use termplot::output::TerminalMode;
//! use termplot::plots::LineSeries;
//!
//! let mut fig = Figure::new();
//! fig.size(60, 15);
//! fig.plot()
//!     .add(LineSeries::new().values(&[1.0, 4.0, 9.0, 16.0]))
//!     .unwrap()
//!     .title("Squares");
//! let text = fig.render(TerminalMode::Plain).unwrap();
//! assert!(text.contains("Squares"));
//! ```

mod layout;
mod plot;

pub use layout::draw_plot;
pub use plot::Plot;

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::geometry::Area;
use crate::output::{terminal_size, TerminalEncoder, TerminalMode};
use crate::theme::Theme;
use batuta_common::display::WithDimensions;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// A `rows × cols` grid of plots with a size and a theme.
///
/// One subplot is active at a time; [`Figure::plot`] returns it.
#[derive(Debug)]
pub struct Figure {
    rows: usize,
    cols: usize,
    plots: Vec<Plot>,
    active: usize,
    width: Option<u32>,
    height: Option<u32>,
    theme: Theme,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// A figure with a single empty plot, sized to the terminal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: 1,
            cols: 1,
            plots: vec![Plot::new()],
            active: 0,
            width: None,
            height: None,
            theme: Theme::default(),
        }
    }

    /// Replace the plots with an empty `rows × cols` grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either count is zero.
    pub fn subplots(&mut self, rows: usize, cols: usize) -> Result<&mut Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { width: cols as u32, height: rows as u32 });
        }
        self.rows = rows;
        self.cols = cols;
        self.plots = (0..rows * cols).map(|_| Plot::new()).collect();
        self.active = 0;
        Ok(self)
    }

    /// Activate the subplot at 1-based `(row, col)` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSubplot`] outside the grid.
    pub fn subplot(&mut self, row: usize, col: usize) -> Result<&mut Plot> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return Err(Error::InvalidSubplot { row, col, rows: self.rows, cols: self.cols });
        }
        self.active = (row - 1) * self.cols + (col - 1);
        Ok(&mut self.plots[self.active])
    }

    /// The active plot.
    pub fn plot(&mut self) -> &mut Plot {
        &mut self.plots[self.active]
    }

    /// Reset to a single empty plot, keeping size and theme.
    pub fn clear(&mut self) -> &mut Self {
        self.rows = 1;
        self.cols = 1;
        self.plots = vec![Plot::new()];
        self.active = 0;
        self
    }

    /// Apply a named theme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTheme`] for unknown names.
    pub fn theme(&mut self, name: &str) -> Result<&mut Self> {
        self.theme = Theme::by_name(name)?;
        Ok(self)
    }

    /// Active theme.
    #[must_use]
    pub fn current_theme(&self) -> &Theme {
        &self.theme
    }

    /// Fix the size in cells; unset dimensions follow the terminal.
    pub fn size(&mut self, width: u32, height: u32) -> &mut Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Grid shape `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Size in cells used by [`Figure::build`].
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        let (cols, rows) = terminal_size();
        (
            self.width.unwrap_or(u32::from(cols)),
            // Leave one row for the prompt below the figure.
            self.height.unwrap_or(u32::from(rows).saturating_sub(1).max(1)),
        )
    }

    /// Lay out every subplot on a new canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is zero or a plot's limits are unusable.
    pub fn build(&self) -> Result<Canvas> {
        let (width, height) = self.canvas_size();
        self.build_sized(width, height)
    }

    fn build_sized(&self, width: u32, height: u32) -> Result<Canvas> {
        let mut canvas = Canvas::new(width, height)?;
        canvas.clear(self.theme.paint(self.theme.canvas_bg));

        let tiles = Area::new(0, 0, width, height).grid(self.rows as u32, self.cols as u32);
        debug!(width, height, rows = self.rows, cols = self.cols, "build figure");
        for (plot, tile) in self.plots.iter().zip(tiles) {
            draw_plot(&mut canvas, tile, plot, &self.theme)?;
        }
        Ok(canvas)
    }

    /// Render to a string.
    ///
    /// # Errors
    ///
    /// See [`Figure::build`].
    pub fn render(&self, mode: TerminalMode) -> Result<String> {
        let canvas = self.build()?;
        Ok(TerminalEncoder::new().mode(mode).render(&canvas))
    }

    /// Write the rendered figure and flush.
    ///
    /// # Errors
    ///
    /// Returns an error if building or writing fails.
    pub fn show<W: Write + ?Sized>(&self, out: &mut W, mode: TerminalMode) -> Result<()> {
        out.write_all(self.render(mode)?.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Save the figure as plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if building or writing the file fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.render(TerminalMode::Plain)?)?;
        Ok(())
    }
}

impl WithDimensions for Figure {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = Some(width);
        self.height = Some(height);
    }
}

impl Widget for &Figure {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let canvas = match self.build_sized(u32::from(area.width), u32::from(area.height)) {
            Ok(canvas) => canvas,
            Err(err) => {
                buf.set_string(area.x, area.y, err.to_string(), Style::default());
                return;
            }
        };

        for y in 0..area.height {
            let Some(row) = canvas.row(u32::from(y)) else { break };
            for (x, cell) in row.iter().enumerate().take(area.width as usize) {
                if let Some(target) = buf.cell_mut((area.x + x as u16, area.y + y)) {
                    let mut style = Style::default();
                    if let Some(fg) = cell.fg {
                        style = style.fg(fg.into());
                    }
                    if let Some(bg) = cell.bg {
                        style = style.bg(bg.into());
                    }
                    target.set_char(cell.ch).set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::{BarSeries, LineSeries, ScatterSeries};

    #[test]
    fn test_subplots_rejects_zero() {
        let mut fig = Figure::new();
        assert!(matches!(fig.subplots(0, 2), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_subplot_is_one_based() {
        let mut fig = Figure::new();
        fig.subplots(2, 2).unwrap();
        assert!(fig.subplot(2, 2).is_ok());
        assert!(matches!(
            fig.subplot(3, 1),
            Err(Error::InvalidSubplot { row: 3, col: 1, rows: 2, cols: 2 })
        ));
        assert!(fig.subplot(0, 1).is_err());
    }

    #[test]
    fn test_subplot_makes_plot_active() {
        let mut fig = Figure::new();
        fig.subplots(1, 2).unwrap();
        fig.subplot(1, 2).unwrap().title("right");
        fig.plot().add(ScatterSeries::new().data(&[1.0], &[1.0])).unwrap();
        assert_eq!(fig.plots[1].len(), 1);
        assert!(fig.plots[0].is_empty());
    }

    #[test]
    fn test_clear_keeps_size_and_theme() {
        let mut fig = Figure::new();
        fig.size(30, 10).theme("dark").unwrap();
        fig.subplots(2, 1).unwrap();
        fig.clear();
        assert_eq!(fig.shape(), (1, 1));
        assert_eq!(fig.canvas_size(), (30, 10));
        assert_eq!(fig.current_theme().name, "dark");
    }

    #[test]
    fn test_unknown_theme() {
        assert!(Figure::new().theme("neon").is_err());
    }

    #[test]
    fn test_render_plain_has_requested_size() {
        let mut fig = Figure::new();
        fig.size(50, 12);
        fig.plot().add(BarSeries::new(&["a", "b"], &[1.0, 2.0])).unwrap();
        let text = fig.render(TerminalMode::Plain).unwrap();
        assert_eq!(text.lines().count(), 12);
        assert!(text.lines().all(|l| l.chars().count() == 50));
    }

    #[test]
    fn test_with_dimensions_builder() {
        let fig = Figure::new().dimensions(40, 8);
        assert_eq!(fig.canvas_size(), (40, 8));
    }

    #[test]
    fn test_show_writes_output() {
        let mut fig = Figure::new();
        fig.size(20, 6);
        fig.plot().add(LineSeries::new().values(&[1.0, 2.0])).unwrap();
        let mut out = Vec::new();
        fig.show(&mut out, TerminalMode::TrueColor).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("\x1b["));
    }

    #[test]
    fn test_save_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.txt");
        let mut fig = Figure::new();
        fig.size(30, 8);
        fig.plot().title("saved");
        fig.save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("saved"));
        assert!(!text.contains('\x1b'));
    }
}
