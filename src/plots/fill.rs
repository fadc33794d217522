//! Filled regions between two curves.

use super::{check_pair, DrawContext, Extent, LegendEntry, Series, SeriesColors};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::marker::Marker;

/// The region between `lower(x)` and `upper(x)`, filled column by column.
#[derive(Debug, Clone)]
pub struct FillSeries {
    x: Vec<f32>,
    lower: Vec<f32>,
    upper: Vec<f32>,
    label: Option<String>,
    color: Option<Rgba>,
    marker: Marker,
}

impl FillSeries {
    /// Fill between two curves sharing `x`.
    #[must_use]
    pub fn between(x: &[f32], lower: &[f32], upper: &[f32]) -> Self {
        Self {
            x: x.to_vec(),
            lower: lower.to_vec(),
            upper: upper.to_vec(),
            label: None,
            color: None,
            marker: Marker::Braille,
        }
    }

    /// Fill between `y` and zero.
    #[must_use]
    pub fn to_baseline(x: &[f32], y: &[f32]) -> Self {
        Self::between(x, &vec![0.0; y.len()], y)
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

    /// Set the fill marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    fn finite_rows(&self) -> Vec<(f32, f32, f32)> {
        self.x
            .iter()
            .zip(&self.lower)
            .zip(&self.upper)
            .map(|((&x, &lo), &hi)| (x, lo, hi))
            .filter(|(x, lo, hi)| x.is_finite() && lo.is_finite() && hi.is_finite())
            .collect()
    }
}

impl Series for FillSeries {
    fn validate(&self) -> Result<()> {
        check_pair(&self.x, &self.upper)?;
        if self.lower.len() != self.x.len() {
            return Err(Error::DataLengthMismatch { x_len: self.x.len(), y_len: self.lower.len() });
        }
        Ok(())
    }

    fn extent(&self) -> Option<Extent> {
        let lower = Extent::of(&self.x, &self.lower)?;
        let upper = Extent::of(&self.x, &self.upper)?;
        Some(lower.union(upper))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, colors: SeriesColors<'_>) {
        let color = self.color.unwrap_or_else(|| colors.primary());
        let rows = self.finite_rows();

        for pair in rows.windows(2) {
            let visible = visible_part(pair[0], pair[1], ctx.x_domain());
            let Some(((x0, lo0, hi0), (x1, lo1, hi1))) = visible else {
                continue;
            };
            let (px0, _) = ctx.to_pixel(x0, lo0, self.marker);
            let (px1, _) = ctx.to_pixel(x1, lo1, self.marker);
            let steps = (px1 - px0).unsigned_abs().max(1);
            for step in 0..=steps {
                let t = step as f32 / steps as f32;
                let x = x0 + (x1 - x0) * t;
                let lo = lo0 + (lo1 - lo0) * t;
                let hi = hi0 + (hi1 - hi0) * t;
                ctx.line(Point::new(x, lo), Point::new(x, hi), self.marker, color);
            }
        }
        if let [(x, lo, hi)] = rows.as_slice() {
            ctx.line(Point::new(*x, *lo), Point::new(*x, *hi), self.marker, color);
        }
    }

    fn legend(&self, colors: SeriesColors<'_>) -> Vec<LegendEntry> {
        self.label
            .iter()
            .map(|label| LegendEntry {
                label: label.clone(),
                color: self.color.unwrap_or_else(|| colors.primary()),
                glyph: self.marker.legend_glyph(),
            })
            .collect()
    }
}

type Row = (f32, f32, f32);

/// Part of the segment `a → b` whose x lies inside `domain`.
fn visible_part(a: Row, b: Row, domain: (f32, f32)) -> Option<(Row, Row)> {
    let (min, max) = (domain.0.min(domain.1), domain.0.max(domain.1));
    let dx = b.0 - a.0;
    if dx.abs() < f32::EPSILON {
        return (a.0 >= min && a.0 <= max).then_some((a, b));
    }
    let (ta, tb) = ((min - a.0) / dx, (max - a.0) / dx);
    let (t0, t1) = (ta.min(tb).max(0.0), ta.max(tb).min(1.0));
    if t0 > t1 {
        return None;
    }
    let at = |t: f32| (a.0 + dx * t, a.1 + (b.1 - a.1) * t, a.2 + (b.2 - a.2) * t);
    Some((at(t0), at(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::geometry::Area;
    use crate::theme::Theme;

    #[test]
    fn test_to_baseline_extent_includes_zero() {
        let fill = FillSeries::to_baseline(&[0.0, 1.0], &[2.0, 3.0]);
        assert_eq!(fill.extent().unwrap(), Extent::new((0.0, 1.0), (0.0, 3.0)));
    }

    #[test]
    fn test_validate_lower_length() {
        let fill = FillSeries::between(&[0.0, 1.0], &[0.0], &[1.0, 2.0]);
        assert!(fill.validate().is_err());
    }

    #[test]
    fn test_fills_every_cell_between() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(4, 4).unwrap();
        let fill = FillSeries::between(&[0.0, 4.0], &[0.0, 0.0], &[4.0, 4.0]).marker(Marker::Sd);
        {
            let area = Area::new(0, 0, 4, 4);
            let mut ctx = DrawContext::new(&mut canvas, area, (0.0, 4.0), (0.0, 4.0), &theme).unwrap();
            fill.draw(&mut ctx, SeriesColors::new(&theme, 0));
        }
        assert_eq!(canvas.to_plain_string(), "████\n████\n████\n████\n");
    }

    #[test]
    fn test_far_endpoint_fills_only_visible_part() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(4, 4).unwrap();
        let fill = FillSeries::between(&[0.0, 1e30], &[0.0, 0.0], &[4.0, 4.0]).marker(Marker::Sd);
        {
            let area = Area::new(0, 0, 4, 4);
            let mut ctx = DrawContext::new(&mut canvas, area, (0.0, 4.0), (0.0, 4.0), &theme).unwrap();
            fill.draw(&mut ctx, SeriesColors::new(&theme, 0));
        }
        assert_eq!(canvas.to_plain_string(), "████\n████\n████\n████\n");
    }

    #[test]
    fn test_visible_part_of_segment() {
        assert_eq!(
            visible_part((-2.0, 0.0, 4.0), (2.0, 0.0, 8.0), (0.0, 1.0)),
            Some(((0.0, 0.0, 6.0), (1.0, 0.0, 7.0)))
        );
        assert_eq!(visible_part((5.0, 0.0, 1.0), (6.0, 0.0, 1.0), (0.0, 1.0)), None);
    }
}
