//! Points with error bars.

use super::{check_pair, DrawContext, Extent, LegendEntry, Series, SeriesColors};
use crate::color::Rgba;
use crate::error::{Error, Result};

/// Points at `(x, y)` with optional symmetric errors on either axis.
///
/// Vertical errors draw `│` with `─` caps, horizontal errors `─` with `│`
/// caps, and the point itself as `●`.
#[derive(Debug, Clone, Default)]
pub struct ErrorBarSeries {
    x: Vec<f32>,
    y: Vec<f32>,
    yerr: Option<Vec<f32>>,
    xerr: Option<Vec<f32>>,
    label: Option<String>,
    color: Option<Rgba>,
}

impl ErrorBarSeries {
    /// Points without errors.
    #[must_use]
    pub fn new(x: &[f32], y: &[f32]) -> Self {
        Self { x: x.to_vec(), y: y.to_vec(), ..Self::default() }
    }

    /// Symmetric errors on y.
    #[must_use]
    pub fn yerr(mut self, err: &[f32]) -> Self {
        self.yerr = Some(err.iter().map(|e| e.abs()).collect());
        self
    }

    /// Symmetric errors on x.
    #[must_use]
    pub fn xerr(mut self, err: &[f32]) -> Self {
        self.xerr = Some(err.iter().map(|e| e.abs()).collect());
        self
    }

    /// Set the legend label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set an explicit color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    fn err(errors: Option<&Vec<f32>>, i: usize) -> f32 {
        errors.and_then(|e| e.get(i)).copied().filter(|e| e.is_finite()).unwrap_or(0.0)
    }
}

impl Series for ErrorBarSeries {
    fn validate(&self) -> Result<()> {
        check_pair(&self.x, &self.y)?;
        for errors in [&self.yerr, &self.xerr].into_iter().flatten() {
            if errors.len() != self.x.len() {
                return Err(Error::DataLengthMismatch { x_len: self.x.len(), y_len: errors.len() });
            }
        }
        Ok(())
    }

    fn extent(&self) -> Option<Extent> {
        let mut xs = Vec::with_capacity(self.x.len() * 2);
        let mut ys = Vec::with_capacity(self.y.len() * 2);
        for (i, (&x, &y)) in self.x.iter().zip(&self.y).enumerate() {
            let (ex, ey) = (Self::err(self.xerr.as_ref(), i), Self::err(self.yerr.as_ref(), i));
            xs.extend([x - ex, x + ex]);
            ys.extend([y - ey, y + ey]);
        }
        Extent::of(&xs, &ys)
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, colors: SeriesColors<'_>) {
        let color = self.color.unwrap_or_else(|| colors.primary());
        let fg = Some(color);
        for (i, (&x, &y)) in self.x.iter().zip(&self.y).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let (col, row) = (ctx.column_of(x), ctx.row_of(y));

            let ey = Self::err(self.yerr.as_ref(), i);
            if ey > 0.0 {
                let (top, bottom) = (ctx.row_of(y + ey), ctx.row_of(y - ey));
                for r in ctx.visible_rows(top, bottom.saturating_add(1)) {
                    ctx.put_cell(col, r, '│', fg);
                }
                ctx.put_cell(col, top, '─', fg);
                ctx.put_cell(col, bottom, '─', fg);
            }

            let ex = Self::err(self.xerr.as_ref(), i);
            if ex > 0.0 {
                let (left, right) = (ctx.column_of(x - ex), ctx.column_of(x + ex));
                for c in ctx.visible_columns(left, right.saturating_add(1)) {
                    ctx.put_cell(c, row, '─', fg);
                }
                ctx.put_cell(left, row, '│', fg);
                ctx.put_cell(right, row, '│', fg);
            }

            ctx.put_cell(col, row, '●', fg);
        }
    }

    fn legend(&self, colors: SeriesColors<'_>) -> Vec<LegendEntry> {
        self.label
            .iter()
            .map(|label| LegendEntry {
                label: label.clone(),
                color: self.color.unwrap_or_else(|| colors.primary()),
                glyph: '●',
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::geometry::Area;
    use crate::theme::Theme;

    #[test]
    fn test_extent_includes_errors() {
        let series = ErrorBarSeries::new(&[1.0, 2.0], &[5.0, 6.0]).yerr(&[1.0, -2.0]).xerr(&[0.5, 0.5]);
        assert_eq!(series.extent().unwrap(), Extent::new((0.5, 2.5), (4.0, 8.0)));
    }

    #[test]
    fn test_error_lengths_checked() {
        let series = ErrorBarSeries::new(&[1.0, 2.0], &[5.0, 6.0]).yerr(&[1.0]);
        assert!(matches!(series.validate(), Err(Error::DataLengthMismatch { .. })));
    }

    #[test]
    fn test_draws_bar_caps_and_point() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(5, 9).unwrap();
        let series = ErrorBarSeries::new(&[2.5], &[4.5]).yerr(&[3.0]);
        {
            let area = Area::new(0, 0, 5, 9);
            let mut ctx = DrawContext::new(&mut canvas, area, (0.0, 5.0), (0.0, 9.0), &theme).unwrap();
            series.draw(&mut ctx, SeriesColors::new(&theme, 0));
        }
        let column: String = (0..9).map(|y| canvas.get(2, y).unwrap().ch).collect();
        assert_eq!(column, " ─││●││─ ");
    }

    #[test]
    fn test_huge_errors_stay_inside_area() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(5, 9).unwrap();
        let series = ErrorBarSeries::new(&[2.5], &[4.5]).yerr(&[1e30]).xerr(&[1e30]);
        {
            let area = Area::new(0, 0, 5, 9);
            let mut ctx = DrawContext::new(&mut canvas, area, (0.0, 5.0), (0.0, 9.0), &theme).unwrap();
            series.draw(&mut ctx, SeriesColors::new(&theme, 0));
        }
        let column: String = (0..9).map(|y| canvas.get(2, y).unwrap().ch).collect();
        assert_eq!(column, "││││●││││");
        let row: String = (0..5).map(|x| canvas.get(x, 4).unwrap().ch).collect();
        assert_eq!(row, "──●──");
    }
}
