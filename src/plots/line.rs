//! Line series with Douglas-Peucker simplification.
//!
//! Long series are simplified in sub-cell pixel space before drawing, so a
//! 10 000-point signal costs about as much as the canvas is wide.
//!
//! # References
//!
//! - Douglas, D. H., & Peucker, T. K. (1973). "Algorithms for the reduction of
//!   the number of points required to represent a digitized line or its caricature."
//!   Cartographica, 10(2), 112-122.

use super::{check_pair, DrawContext, Extent, LegendEntry, Series, SeriesColors};
use crate::color::Rgba;
use crate::datetime::DateForm;
use crate::error::Result;
use crate::geometry::Point;
use crate::marker::Marker;

/// Epsilon (in sub-cell pixels) used when a long series is simplified automatically.
const AUTO_SIMPLIFY_EPSILON: f32 = 0.5;

// ============================================================================
// Douglas-Peucker Line Simplification
// ============================================================================

/// Simplify a polyline using the Douglas-Peucker algorithm.
///
/// Points whose perpendicular distance to the simplified line stays below
/// `epsilon` are dropped. The first and last points are always kept.
#[must_use]
pub fn douglas_peucker(points: &[Point], epsilon: f32) -> Vec<Point> {
    douglas_peucker_indices(points, epsilon).into_iter().map(|i| points[i]).collect()
}

/// Indices of the points kept by [`douglas_peucker`], ascending.
fn douglas_peucker_indices(points: &[Point], epsilon: f32) -> Vec<usize> {
    if points.len() < 3 {
        return (0..points.len()).collect();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    // Explicit stack instead of recursion: long noisy series would otherwise
    // recurse once per point.
    let mut stack = vec![(0, points.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (max_distance, max_index) = find_max_distance(points, start, end);
        if max_distance > epsilon {
            keep[max_index] = true;
            stack.push((start, max_index));
            stack.push((max_index, end));
        }
    }

    keep.iter().enumerate().filter_map(|(i, &k)| k.then_some(i)).collect()
}

/// Point between `start` and `end` farthest from the chord joining them.
fn find_max_distance(points: &[Point], start: usize, end: usize) -> (f32, usize) {
    let (first, last) = (points[start], points[end]);
    let mut max_distance = 0.0;
    let mut max_index = start;

    for (i, point) in points.iter().enumerate().take(end).skip(start + 1) {
        let distance = point.distance_to_line(first, last);
        if distance > max_distance {
            max_distance = distance;
            max_index = i;
        }
    }

    (max_distance, max_index)
}

// ============================================================================
// Line Series
// ============================================================================

/// A polyline through `(x, y)` pairs.
///
/// Non-finite values break the line into separate runs.
#[derive(Debug, Clone, Default)]
pub struct LineSeries {
    x: Vec<f32>,
    y: Vec<f32>,
    label: Option<String>,
    color: Option<Rgba>,
    marker: Marker,
    simplify: Option<f32>,
}

impl LineSeries {
    /// Create an empty line series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the x and y data.
    #[must_use]
    pub fn data(mut self, x: &[f32], y: &[f32]) -> Self {
        self.x = x.to_vec();
        self.y = y.to_vec();
        self
    }

    /// Set y data with x = 1..=n.
    #[must_use]
    pub fn values(mut self, y: &[f32]) -> Self {
        self.x = (1..=y.len()).map(|i| i as f32).collect();
        self.y = y.to_vec();
        self
    }

    /// Set date strings on the x axis.
    ///
    /// # Errors
    ///
    /// Returns an error if a date does not match `form`.
    pub fn dates<S: AsRef<str>>(mut self, dates: &[S], y: &[f32], form: &DateForm) -> Result<Self> {
        self.x = form.parse_all(dates)?;
        self.y = y.to_vec();
        Ok(self)
    }

    /// Set the legend label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set an explicit color instead of the theme cycle.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    /// Simplify with the given epsilon in sub-cell pixels (0 disables).
    #[must_use]
    pub fn simplify(mut self, epsilon: f32) -> Self {
        self.simplify = Some(epsilon.max(0.0));
        self
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    /// Whether the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs of consecutive finite points.
    fn runs(&self) -> Vec<Vec<Point>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for (&x, &y) in self.x.iter().zip(&self.y) {
            if x.is_finite() && y.is_finite() {
                current.push(Point::new(x, y));
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    fn epsilon_for(&self, ctx: &DrawContext<'_>, points: usize) -> f32 {
        match self.simplify {
            Some(eps) => eps,
            None => {
                let (cols, _) = self.marker.resolution();
                let pixels = (ctx.area().width * cols) as usize;
                if points > pixels * 4 {
                    AUTO_SIMPLIFY_EPSILON
                } else {
                    0.0
                }
            }
        }
    }
}

impl Series for LineSeries {
    fn validate(&self) -> Result<()> {
        check_pair(&self.x, &self.y)
    }

    fn extent(&self) -> Option<Extent> {
        Extent::of(&self.x, &self.y)
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, colors: SeriesColors<'_>) {
        let color = self.color.unwrap_or_else(|| colors.primary());
        let (cols, rows) = self.marker.resolution();

        for run in self.runs() {
            let epsilon = self.epsilon_for(ctx, run.len());
            let points = if epsilon > 0.0 {
                let projected: Vec<Point> = run
                    .iter()
                    .map(|p| {
                        let (cx, cy) = ctx.project(p.x, p.y);
                        Point::new(cx * cols as f32, cy * rows as f32)
                    })
                    .collect();
                douglas_peucker_indices(&projected, epsilon).into_iter().map(|i| run[i]).collect()
            } else {
                run
            };
            ctx.polyline(&points, self.marker, color);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::geometry::Area;
    use crate::theme::Theme;

    fn render(series: &LineSeries, width: u32, height: u32) -> Canvas {
        let theme = Theme::default();
        let mut canvas = Canvas::new(width, height).unwrap();
        let extent = series.extent().unwrap();
        {
            let area = Area::new(0, 0, width, height);
            let mut ctx = DrawContext::new(&mut canvas, area, extent.x, extent.y, &theme).unwrap();
            series.draw(&mut ctx, SeriesColors::new(&theme, 0));
        }
        canvas
    }

    #[test]
    fn test_douglas_peucker_simple() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.1),
            Point::new(2.0, -0.1),
            Point::new(3.0, 5.0),
            Point::new(4.0, 6.0),
            Point::new(5.0, 7.0),
        ];
        let simplified = douglas_peucker(&points, 1.0);
        assert!(simplified.len() < points.len());
        assert_eq!(simplified[0], points[0]);
        assert_eq!(*simplified.last().unwrap(), points[5]);
    }

    #[test]
    fn test_douglas_peucker_straight_line() {
        let points: Vec<Point> = (0..10).map(|i| Point::new(i as f32, i as f32)).collect();
        let simplified = douglas_peucker(&points, 0.1);
        assert_eq!(simplified.len(), 2);
    }

    #[test]
    fn test_douglas_peucker_too_few_points() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(douglas_peucker(&points, 1.0), points);
    }

    #[test]
    fn test_douglas_peucker_long_series_does_not_overflow() {
        let points: Vec<Point> =
            (0..200_000).map(|i| Point::new(i as f32, ((i % 7) as f32) * 3.0)).collect();
        let simplified = douglas_peucker(&points, 0.5);
        assert!(simplified.len() > 2);
    }

    #[test]
    fn test_values_uses_one_based_x() {
        let series = LineSeries::new().values(&[3.0, 4.0, 5.0]);
        assert_eq!(series.extent().unwrap(), Extent::new((1.0, 3.0), (3.0, 5.0)));
    }

    #[test]
    fn test_validate_mismatch() {
        let series = LineSeries::new().data(&[1.0, 2.0], &[1.0]);
        assert!(series.validate().is_err());
        assert!(LineSeries::new().validate().is_err());
    }

    #[test]
    fn test_dates_parse() {
        let form = DateForm::new("Y-m-d");
        let series = LineSeries::new().dates(&["1970-01-01", "1970-01-11"], &[1.0, 2.0], &form).unwrap();
        assert_eq!(series.extent().unwrap().x, (0.0, 10.0));
        assert!(LineSeries::new().dates(&["bad"], &[1.0], &form).is_err());
    }

    #[test]
    fn test_draw_diagonal_touches_corners() {
        let series = LineSeries::new().data(&[0.0, 1.0], &[0.0, 1.0]).marker(Marker::Sd);
        let canvas = render(&series, 5, 5);
        assert_eq!(canvas.get(0, 4).unwrap().ch, '█');
        assert_eq!(canvas.get(4, 0).unwrap().ch, '█');
    }

    #[test]
    fn test_nan_breaks_line() {
        let series = LineSeries::new()
            .data(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 0.0, f32::NAN, 0.0, 0.0])
            .marker(Marker::Sd);
        assert_eq!(series.runs().len(), 2);
    }

    #[test]
    fn test_legend_only_when_labelled() {
        let theme = Theme::default();
        let colors = SeriesColors::new(&theme, 0);
        assert!(LineSeries::new().values(&[1.0]).legend(colors).is_empty());
        let legend = LineSeries::new().values(&[1.0]).label("a").legend(colors);
        assert_eq!(legend[0].label, "a");
        assert_eq!(legend[0].color, theme.series_color(0));
    }
}
