//! Plot series.
//!
//! Every chart type is a builder that implements [`Series`]. A [`crate::figure::Plot`]
//! collects series, unions their [`Extent`]s into axis limits, then hands
//! each one a [`DrawContext`] that maps data coordinates onto the plot area
//! of the canvas.

mod annotation;
mod bar;
mod boxplot;
mod candlestick;
mod errorbar;
mod fill;
mod heatmap;
mod histogram;
mod image;
mod line;
mod polar;
mod scatter;

pub use annotation::TextAnnotation;
pub use bar::{BarSeries, Orientation, StackedBarSeries};
pub use boxplot::{BoxSeries, BoxStats};
pub use candlestick::{CandlestickSeries, Ohlc};
pub use errorbar::ErrorBarSeries;
pub use fill::FillSeries;
pub use heatmap::{HeatmapPalette, MatrixSeries};
pub use histogram::{BinStrategy, Histogram, MAX_BINS};
pub use image::ImageSeries;
pub use line::{douglas_peucker, LineSeries};
pub use polar::PolarSeries;
pub use scatter::ScatterSeries;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Area, Point};
use crate::marker::Marker;
use crate::scale::{LinearScale, Scale};
use crate::stats;
use crate::theme::Theme;
use std::fmt::Debug;
use std::ops::Range;

/// Lower block eighths, index = filled eighths.
const LOWER_EIGHTHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
/// Left block eighths, index = filled eighths.
const LEFT_EIGHTHS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Data range a series needs on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// `(min, max)` on the x axis.
    pub x: (f32, f32),
    /// `(min, max)` on the y axis.
    pub y: (f32, f32),
}

impl Extent {
    /// Extent from explicit bounds.
    #[must_use]
    pub const fn new(x: (f32, f32), y: (f32, f32)) -> Self {
        Self { x, y }
    }

    /// Extent of paired coordinates, ignoring non-finite values.
    #[must_use]
    pub fn of(xs: &[f32], ys: &[f32]) -> Option<Self> {
        Some(Self { x: stats::extent(xs)?, y: stats::extent(ys)? })
    }

    /// Smallest extent containing both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            x: (self.x.0.min(other.x.0), self.x.1.max(other.x.1)),
            y: (self.y.0.min(other.y.0), self.y.1.max(other.y.1)),
        }
    }
}

/// One legend line.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Series label.
    pub label: String,
    /// Series color.
    pub color: Rgba,
    /// Glyph shown before the label.
    pub glyph: char,
}

/// Tick override: positions with their labels.
pub type TickLabels = Vec<(f32, String)>;

/// Colors offered to a series by the plot's theme cycle.
#[derive(Debug, Clone, Copy)]
pub struct SeriesColors<'a> {
    theme: &'a Theme,
    offset: usize,
}

impl<'a> SeriesColors<'a> {
    /// Colors starting at `offset` in the theme cycle.
    #[must_use]
    pub fn new(theme: &'a Theme, offset: usize) -> Self {
        Self { theme, offset }
    }

    /// The first color offered to this series.
    #[must_use]
    pub fn primary(&self) -> Rgba {
        self.nth(0)
    }

    /// The `k`-th color offered to this series (stacked groups, box groups).
    #[must_use]
    pub fn nth(&self, k: usize) -> Rgba {
        self.theme.series_color(self.offset + k)
    }
}

/// Something that can be drawn inside a plot.
pub trait Series: Debug {
    /// Check the series data before it is added to a plot.
    ///
    /// # Errors
    ///
    /// Returns an error for empty or mismatched data.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Data range needed on each axis, `None` if the series does not affect limits.
    fn extent(&self) -> Option<Extent>;

    /// Draw into the plot area.
    fn draw(&self, ctx: &mut DrawContext<'_>, colors: SeriesColors<'_>);

    /// Legend entries; empty when the series is unlabelled.
    fn legend(&self, _colors: SeriesColors<'_>) -> Vec<LegendEntry> {
        Vec::new()
    }

    /// Category labels replacing numeric x ticks.
    fn x_ticks(&self) -> Option<TickLabels> {
        None
    }

    /// Category labels replacing numeric y ticks.
    fn y_ticks(&self) -> Option<TickLabels> {
        None
    }

    /// Number of theme-cycle colors this series takes.
    fn palette_slots(&self) -> usize {
        1
    }

    /// Whether the axes frame should hide numeric ticks (images).
    fn hides_ticks(&self) -> bool {
        false
    }
}

/// Check that paired arrays have matching, non-zero lengths.
pub(crate) fn check_pair(x: &[f32], y: &[f32]) -> Result<()> {
    if x.is_empty() || y.is_empty() {
        return Err(Error::EmptyData);
    }
    if x.len() != y.len() {
        return Err(Error::DataLengthMismatch { x_len: x.len(), y_len: y.len() });
    }
    Ok(())
}

/// Categorical ticks at `1..=n`.
pub(crate) fn category_ticks(labels: &[String]) -> TickLabels {
    labels.iter().enumerate().map(|(i, l)| ((i + 1) as f32, l.clone())).collect()
}

/// Slack allowed past the far edge of the plot area, in cells or pixels.
const EDGE_TOLERANCE: f32 = 1e-3;

/// Map a continuous sub-cell coordinate to a pixel index, keeping the far edge inside.
fn to_sub(v: f32, n: u32) -> i32 {
    let p = v.floor() as i32;
    if p == n as i32 && v <= n as f32 + EDGE_TOLERANCE {
        p - 1
    } else {
        p
    }
}

/// Drawing state for one plot area.
///
/// Coordinates passed to the drawing helpers are data coordinates; the
/// context projects them onto the area and clips everything outside it.
#[derive(Debug)]
pub struct DrawContext<'a> {
    canvas: &'a mut Canvas,
    area: Area,
    x_scale: LinearScale,
    y_scale: LinearScale,
    theme: &'a Theme,
}

impl<'a> DrawContext<'a> {
    /// Create a context mapping `x_domain × y_domain` onto `area`.
    ///
    /// # Errors
    ///
    /// Returns an error if a domain is empty.
    pub fn new(
        canvas: &'a mut Canvas,
        area: Area,
        x_domain: (f32, f32),
        y_domain: (f32, f32),
        theme: &'a Theme,
    ) -> Result<Self> {
        let x_scale = LinearScale::new(x_domain, (0.0, area.width as f32))?;
        let y_scale = LinearScale::new(y_domain, (area.height as f32, 0.0))?;
        Ok(Self { canvas, area, x_scale, y_scale, theme })
    }

    /// Plot area in canvas cells.
    #[must_use]
    pub fn area(&self) -> Area {
        self.area
    }

    /// Active theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        self.theme
    }

    /// Visible x domain.
    #[must_use]
    pub fn x_domain(&self) -> (f32, f32) {
        self.x_scale.domain()
    }

    /// Visible y domain.
    #[must_use]
    pub fn y_domain(&self) -> (f32, f32) {
        self.y_scale.domain()
    }

    /// Data point to continuous cell coordinates relative to the area.
    #[must_use]
    pub fn project(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x_scale.scale(x), self.y_scale.scale(y))
    }

    /// Data point to absolute sub-cell pixel coordinates for a marker.
    #[must_use]
    pub fn to_pixel(&self, x: f32, y: f32, marker: Marker) -> (i32, i32) {
        let (cols, rows) = marker.resolution();
        let (cx, cy) = self.project(x, y);
        let px = to_sub(cx * cols as f32, self.area.width * cols);
        let py = to_sub(cy * rows as f32, self.area.height * rows);
        (self.area.x as i32 * cols as i32 + px, self.area.y as i32 * rows as i32 + py)
    }

    /// Pixel bounds of the area for a marker: `(x0, y0, x1, y1)` exclusive.
    fn pixel_bounds(&self, marker: Marker) -> (i32, i32, i32, i32) {
        let (cols, rows) = marker.resolution();
        let x0 = (self.area.x * cols) as i32;
        let y0 = (self.area.y * rows) as i32;
        (x0, y0, x0 + (self.area.width * cols) as i32, y0 + (self.area.height * rows) as i32)
    }

    /// Plot one sub-cell pixel, clipped to the area.
    pub fn dot_pixel(&mut self, px: i32, py: i32, marker: Marker, color: Rgba) {
        let (x0, y0, x1, y1) = self.pixel_bounds(marker);
        if px >= x0 && px < x1 && py >= y0 && py < y1 {
            let color = self.theme.paint(Some(color));
            self.canvas.plot_dot(px, py, marker, color);
        }
    }

    /// Plot a data point.
    pub fn dot(&mut self, x: f32, y: f32, marker: Marker, color: Rgba) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let (px, py) = self.to_pixel(x, y, marker);
        self.dot_pixel(px, py, marker, color);
    }

    /// Draw a segment between two data points, clipped to the area.
    pub fn line(&mut self, from: Point, to: Point, marker: Marker, color: Rgba) {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return;
        }
        let (cols, rows) = marker.resolution();
        let (fx, fy) = self.project(from.x, from.y);
        let (tx, ty) = self.project(to.x, to.y);
        let (x0, y0, x1, y1) = self.pixel_bounds(marker);

        // Clip in continuous pixel space before rasterizing so far-away
        // endpoints do not produce huge pixel runs.
        let start = Point::new(
            self.area.x as f32 * cols as f32 + fx * cols as f32,
            self.area.y as f32 * rows as f32 + fy * rows as f32,
        );
        let end = Point::new(
            self.area.x as f32 * cols as f32 + tx * cols as f32,
            self.area.y as f32 * rows as f32 + ty * rows as f32,
        );
        let bounds = (x0 as f32, y0 as f32, x1 as f32, y1 as f32);
        let Some((a, b)) = clip_segment(start, end, bounds) else {
            return;
        };

        let snap = |p: Point| {
            (
                (p.x.floor() as i32).clamp(x0, x1 - 1),
                (p.y.floor() as i32).clamp(y0, y1 - 1),
            )
        };
        let color = self.theme.paint(Some(color));
        let (a, b) = (snap(a), snap(b));
        for (px, py) in crate::canvas::bresenham(a.0, a.1, b.0, b.1) {
            self.canvas.plot_dot(px, py, marker, color);
        }
    }

    /// Draw a polyline through data points.
    pub fn polyline(&mut self, points: &[Point], marker: Marker, color: Rgba) {
        match points {
            [] => {}
            [only] => self.dot(only.x, only.y, marker, color),
            _ => {
                for pair in points.windows(2) {
                    self.line(pair[0], pair[1], marker, color);
                }
            }
        }
    }

    /// Write a character at a cell relative to the area, clipped.
    pub fn put_cell(&mut self, col: i32, row: i32, ch: char, fg: Option<Rgba>) {
        if col < 0 || row < 0 || col >= self.area.width as i32 || row >= self.area.height as i32 {
            return;
        }
        let fg = self.theme.paint(fg);
        self.canvas.set_char(self.area.x as i32 + col, self.area.y as i32 + row, ch, fg);
    }

    /// Write a full cell (character, foreground and background), clipped.
    pub fn put_colored_cell(&mut self, col: i32, row: i32, ch: char, fg: Rgba, bg: Rgba) {
        if col < 0 || row < 0 || col >= self.area.width as i32 || row >= self.area.height as i32 {
            return;
        }
        let (fg, bg) = (self.theme.paint(Some(fg)), self.theme.paint(Some(bg)));
        self.canvas.set_cell(self.area.x as i32 + col, self.area.y as i32 + row, ch, fg, bg);
    }

    /// Write text centred on a data point, clipped to the area.
    pub fn text(&mut self, x: f32, y: f32, text: &str, color: Option<Rgba>) {
        let (cx, cy) = self.project(x, y);
        let len = text.chars().count() as i32;
        let col = cx.floor() as i32 - len / 2;
        let row = to_sub(cy, self.area.height);
        for (i, ch) in text.chars().enumerate() {
            self.put_cell(col + i as i32, row, ch, color);
        }
    }

    /// Cell column of a data x value.
    #[must_use]
    pub fn column_of(&self, x: f32) -> i32 {
        to_sub(self.x_scale.scale(x), self.area.width)
    }

    /// Cell row of a data y value.
    #[must_use]
    pub fn row_of(&self, y: f32) -> i32 {
        to_sub(self.y_scale.scale(y), self.area.height)
    }

    /// Column span `[start, end)` covering data `[x0, x1]`, at least one column wide.
    #[must_use]
    pub fn column_span(&self, x0: f32, x1: f32) -> (i32, i32) {
        let a = self.x_scale.scale(x0.min(x1)).round() as i32;
        let b = self.x_scale.scale(x0.max(x1)).round() as i32;
        if b <= a {
            let c = self.column_of((x0 + x1) / 2.0);
            (c, c + 1)
        } else {
            (a, b)
        }
    }

    /// Row span `[start, end)` covering data `[y0, y1]`, at least one row tall.
    #[must_use]
    pub fn row_span(&self, y0: f32, y1: f32) -> (i32, i32) {
        let a = self.y_scale.scale(y0.max(y1)).round() as i32;
        let b = self.y_scale.scale(y0.min(y1)).round() as i32;
        if b <= a {
            let r = self.row_of((y0 + y1) / 2.0);
            (r, r + 1)
        } else {
            (a, b)
        }
    }

    /// Rows of `[start, end)` that lie inside the area.
    #[must_use]
    pub fn visible_rows(&self, start: i32, end: i32) -> Range<i32> {
        start.max(0)..end.min(self.area.height as i32)
    }

    /// Columns of `[start, end)` that lie inside the area.
    #[must_use]
    pub fn visible_columns(&self, start: i32, end: i32) -> Range<i32> {
        start.max(0)..end.min(self.area.width as i32)
    }

    /// Fill a vertical bar from `base` to `value` over data `[x0, x1]`.
    ///
    /// The cell at the growing end uses eighth blocks for sub-cell height.
    pub fn vertical_bar(&mut self, x0: f32, x1: f32, base: f32, value: f32, color: Rgba) {
        let (c0, c1) = self.column_span(x0, x1);
        let (_, b) = self.project(0.0, base);
        let (_, v) = self.project(0.0, value);
        let upward = v <= b;
        let (top, bottom) = if upward { (v, b) } else { (b, v) };

        for row in self.visible_rows(top.floor() as i32, bottom.ceil() as i32) {
            let coverage = (bottom.min(row as f32 + 1.0) - top.max(row as f32)).clamp(0.0, 1.0);
            let ch = if coverage >= 0.999 {
                '█'
            } else if upward && row == top.floor() as i32 {
                LOWER_EIGHTHS[(coverage * 8.0).round() as usize]
            } else if !upward && row == (bottom.ceil() as i32).saturating_sub(1) {
                match coverage {
                    c if c >= 0.75 => '█',
                    c if c >= 0.375 => '▀',
                    _ => '▔',
                }
            } else if coverage >= 0.5 {
                '█'
            } else {
                ' '
            };
            if ch == ' ' {
                continue;
            }
            for col in self.visible_columns(c0, c1) {
                self.put_cell(col, row, ch, Some(color));
            }
        }
    }

    /// Fill a horizontal bar from `base` to `value` over data `[y0, y1]`.
    pub fn horizontal_bar(&mut self, y0: f32, y1: f32, base: f32, value: f32, color: Rgba) {
        let (r0, r1) = self.row_span(y0, y1);
        let (b, _) = self.project(base, 0.0);
        let (v, _) = self.project(value, 0.0);
        let rightward = v >= b;
        let (left, right) = if rightward { (b, v) } else { (v, b) };

        for col in self.visible_columns(left.floor() as i32, right.ceil() as i32) {
            let coverage = (right.min(col as f32 + 1.0) - left.max(col as f32)).clamp(0.0, 1.0);
            let ch = if coverage >= 0.999 {
                '█'
            } else if rightward && col == (right.ceil() as i32).saturating_sub(1) {
                LEFT_EIGHTHS[(coverage * 8.0).round() as usize]
            } else if !rightward && col == left.floor() as i32 {
                match coverage {
                    c if c >= 0.75 => '█',
                    c if c >= 0.375 => '▐',
                    _ => '▕',
                }
            } else if coverage >= 0.5 {
                '█'
            } else {
                ' '
            };
            if ch == ' ' {
                continue;
            }
            for row in self.visible_rows(r0, r1) {
                self.put_cell(col, row, ch, Some(color));
            }
        }
    }
}

/// Liang-Barsky clipping of a segment to `(x0, y0, x1, y1)`.
///
/// The bounds are widened by a small tolerance so a segment lying exactly
/// on the far edge stays visible; callers clamp the result to pixels.
fn clip_segment(a: Point, b: Point, (x0, y0, x1, y1): (f32, f32, f32, f32)) -> Option<(Point, Point)> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    let (min_x, min_y) = (x0 - EDGE_TOLERANCE, y0 - EDGE_TOLERANCE);
    let (max_x, max_y) = (x1 + EDGE_TOLERANCE, y1 + EDGE_TOLERANCE);

    for (p, q) in [(-dx, a.x - min_x), (dx, max_x - a.x), (-dy, a.y - min_y), (dy, max_y - a.y)] {
        if p.abs() < f32::EPSILON {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((a.lerp(b, t0), a.lerp(b, t1)))
}
