//! Matrix (heatmap) series.
//!
//! Each matrix entry fills its share of the plot area with a color sampled
//! from a [`ColorScale`]. Without color (monochrome themes) the intensity is
//! shown with shade glyphs instead.
//!
//! # References
//!
//! - Borland, D., & Taylor, R. M. (2007). "Rainbow Color Map (Still) Considered Harmful."
//!   IEEE Computer Graphics and Applications.

use super::{DrawContext, Extent, Series, SeriesColors, TickLabels};
use crate::error::{Error, Result};
use crate::scale::{pad_domain, ColorScale, Scale};

/// Shade glyphs from empty to full.
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Color palette type for heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeatmapPalette {
    /// Viridis (perceptually uniform, colorblind-safe).
    #[default]
    Viridis,
    /// Sequential blues.
    Blues,
    /// Diverging red-blue.
    RedBlue,
    /// Magma (perceptually uniform).
    Magma,
    /// Heat (black-red-yellow-white).
    Heat,
    /// Greyscale.
    Greyscale,
}

impl HeatmapPalette {
    /// Build the color scale for a value domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is not finite.
    pub fn scale(self, domain: (f32, f32)) -> Result<ColorScale> {
        let domain = pad_domain(domain);
        match self {
            Self::Viridis => ColorScale::viridis(domain),
            Self::Blues => ColorScale::blues(domain),
            Self::RedBlue => ColorScale::red_blue(domain),
            Self::Magma => ColorScale::magma(domain),
            Self::Heat => ColorScale::heat(domain),
            Self::Greyscale => ColorScale::greyscale(domain),
        }
    }
}

/// A rectangular matrix drawn cell by cell, first row at the top.
#[derive(Debug, Clone)]
pub struct MatrixSeries {
    rows: Vec<Vec<f32>>,
    palette: HeatmapPalette,
}

impl MatrixSeries {
    /// Matrix from row vectors.
    #[must_use]
    pub fn new(rows: Vec<Vec<f32>>) -> Self {
        Self { rows, palette: HeatmapPalette::default() }
    }

    /// Set the color palette.
    #[must_use]
    pub fn palette(mut self, palette: HeatmapPalette) -> Self {
        self.palette = palette;
        self
    }

    /// `(rows, cols)` of the matrix.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.rows.first().map_or(0, Vec::len))
    }

    fn value_domain(&self) -> Option<(f32, f32)> {
        let flat: Vec<f32> = self.rows.iter().flatten().copied().collect();
        crate::stats::extent(&flat)
    }
}

impl Series for MatrixSeries {
    fn validate(&self) -> Result<()> {
        let (rows, cols) = self.shape();
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyData);
        }
        if let Some(bad) = self.rows.iter().find(|r| r.len() != cols) {
            return Err(Error::DataLengthMismatch { x_len: cols, y_len: bad.len() });
        }
        Ok(())
    }

    fn extent(&self) -> Option<Extent> {
        let (rows, cols) = self.shape();
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(Extent::new((0.5, cols as f32 + 0.5), (0.5, rows as f32 + 0.5)))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, _colors: SeriesColors<'_>) {
        let Some(domain) = self.value_domain() else {
            return;
        };
        let Ok(scale) = self.palette.scale(domain) else {
            return;
        };
        let monochrome = ctx.theme().monochrome;
        let (low, high) = pad_domain(domain);
        let n = self.rows.len();

        for (r, row) in self.rows.iter().enumerate() {
            let y = (n - r) as f32;
            let (r0, r1) = ctx.row_span(y - 0.5, y + 0.5);
            for (c, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    continue;
                }
                let x = (c + 1) as f32;
                let (c0, c1) = ctx.column_span(x - 0.5, x + 0.5);
                let ch = if monochrome {
                    let t = ((value - low) / (high - low)).clamp(0.0, 1.0);
                    SHADES[(t * (SHADES.len() - 1) as f32).round() as usize]
                } else {
                    '█'
                };
                let color = scale.scale(value);
                for row_cell in ctx.visible_rows(r0, r1) {
                    for col_cell in ctx.visible_columns(c0, c1) {
                        ctx.put_cell(col_cell, row_cell, ch, Some(color));
                    }
                }
            }
        }
    }

    fn x_ticks(&self) -> Option<TickLabels> {
        let (_, cols) = self.shape();
        Some((1..=cols).map(|c| (c as f32, c.to_string())).collect())
    }

    fn y_ticks(&self) -> Option<TickLabels> {
        let (rows, _) = self.shape();
        Some((1..=rows).map(|r| ((rows + 1 - r) as f32, r.to_string())).collect())
    }

    fn palette_slots(&self) -> usize {
        0
    }
}
