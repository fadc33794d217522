//! Box plot series.
//!
//! Box plots display the distribution of data through quartiles, with
//! whiskers at the last samples inside 1.5 × IQR and outliers beyond.

use super::{category_ticks, DrawContext, Extent, LegendEntry, Series, SeriesColors, TickLabels};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::stats::{percentile, sorted_finite};

/// Statistics computed for a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Minimum value (excluding outliers)
    pub min: f32,
    /// First quartile (25th percentile)
    pub q1: f32,
    /// Median (50th percentile)
    pub median: f32,
    /// Third quartile (75th percentile)
    pub q3: f32,
    /// Maximum value (excluding outliers)
    pub max: f32,
    /// Interquartile range (Q3 - Q1)
    pub iqr: f32,
    /// Outlier values
    pub outliers: Vec<f32>,
}

impl BoxStats {
    /// Compute box plot statistics from data.
    ///
    /// Uses the 1.5 * IQR rule for outlier detection. Returns `None` when
    /// there are no finite values.
    #[must_use]
    pub fn from_data(data: &[f32]) -> Option<Self> {
        let sorted = sorted_finite(data);
        let (&first, &last) = (sorted.first()?, sorted.last()?);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let min = sorted.iter().copied().find(|&x| x >= lower_fence).unwrap_or(first);
        let max = sorted.iter().rev().copied().find(|&x| x <= upper_fence).unwrap_or(last);
        let outliers = sorted.iter().copied().filter(|&x| x < lower_fence || x > upper_fence).collect();

        Some(Self { min, q1, median, q3, max, iqr, outliers })
    }

    /// Lowest value drawn, outliers included.
    fn low(&self) -> f32 {
        self.outliers.iter().copied().fold(self.min, f32::min)
    }

    /// Highest value drawn, outliers included.
    fn high(&self) -> f32 {
        self.outliers.iter().copied().fold(self.max, f32::max)
    }
}

/// One box per group of samples.
#[derive(Debug, Clone)]
pub struct BoxSeries {
    stats: Vec<Option<BoxStats>>,
    labels: Vec<String>,
    color: Option<Rgba>,
    label: Option<String>,
}

impl BoxSeries {
    /// Boxes for each group of samples.
    #[must_use]
    pub fn new(groups: &[Vec<f32>]) -> Self {
        Self {
            stats: groups.iter().map(|g| BoxStats::from_data(g)).collect(),
            labels: (1..=groups.len()).map(|i| i.to_string()).collect(),
            color: None,
            label: None,
        }
    }

    /// Category labels under each box.
    #[must_use]
    pub fn labels<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.labels = labels.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Set an explicit color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the legend label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Statistics of group `index`, `None` for groups without finite data.
    #[must_use]
    pub fn stats(&self, index: usize) -> Option<&BoxStats> {
        self.stats.get(index).and_then(Option::as_ref)
    }

    fn draw_box(ctx: &mut DrawContext<'_>, at: f32, stats: &BoxStats, color: Rgba) {
        let fg = Some(color);
        let (left, right) = ctx.column_span(at - 0.3, at + 0.3);
        let (left, right) = (left, right.saturating_sub(1).max(left.saturating_add(2)));
        let center = ((i64::from(left) + i64::from(right)) / 2) as i32;

        let (top, bottom) = (ctx.row_of(stats.q3), ctx.row_of(stats.q1));
        let (whisker_top, whisker_bottom) = (ctx.row_of(stats.max), ctx.row_of(stats.min));
        let median = ctx.row_of(stats.median);

        for row in ctx.visible_rows(whisker_top, top) {
            ctx.put_cell(center, row, '│', fg);
        }
        for row in ctx.visible_rows(bottom.saturating_add(1), whisker_bottom.saturating_add(1)) {
            ctx.put_cell(center, row, '│', fg);
        }
        for col in ctx.visible_columns(left, right.saturating_add(1)) {
            if whisker_top < top {
                ctx.put_cell(col, whisker_top, '─', fg);
            }
            if whisker_bottom > bottom {
                ctx.put_cell(col, whisker_bottom, '─', fg);
            }
        }

        for row in ctx.visible_rows(top, bottom.saturating_add(1)) {
            let (l, fill, r) = if row == median {
                ('├', '━', '┤')
            } else if row == top {
                ('┌', '─', '┐')
            } else if row == bottom {
                ('└', '─', '┘')
            } else {
                ('│', ' ', '│')
            };
            ctx.put_cell(left, row, l, fg);
            ctx.put_cell(right, row, r, fg);
            if fill != ' ' {
                for col in ctx.visible_columns(left.saturating_add(1), right) {
                    ctx.put_cell(col, row, fill, fg);
                }
            }
        }

        for &outlier in &stats.outliers {
            ctx.put_cell(center, ctx.row_of(outlier), '•', fg);
        }
    }
}

impl Series for BoxSeries {
    fn validate(&self) -> Result<()> {
        if self.stats.iter().all(Option::is_none) {
            return Err(Error::EmptyData);
        }
        if self.labels.len() != self.stats.len() {
            return Err(Error::DataLengthMismatch { x_len: self.labels.len(), y_len: self.stats.len() });
        }
        Ok(())
    }

    fn extent(&self) -> Option<Extent> {
        let present: Vec<&BoxStats> = self.stats.iter().flatten().collect();
        let low = present.iter().map(|s| s.low()).reduce(f32::min)?;
        let high = present.iter().map(|s| s.high()).reduce(f32::max)?;
        Some(Extent::new((0.5, self.stats.len() as f32 + 0.5), (low, high)))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, colors: SeriesColors<'_>) {
        let color = self.color.unwrap_or_else(|| colors.primary());
        for (i, stats) in self.stats.iter().enumerate() {
            if let Some(stats) = stats {
                Self::draw_box(ctx, (i + 1) as f32, stats, color);
            }
        }
    }

    fn legend(&self, colors: SeriesColors<'_>) -> Vec<LegendEntry> {
        self.label
            .iter()
            .map(|label| LegendEntry {
                label: label.clone(),
                color: self.color.unwrap_or_else(|| colors.primary()),
                glyph: '┃',
            })
            .collect()
    }

    fn x_ticks(&self) -> Option<TickLabels> {
        Some(category_ticks(&self.labels))
    }
}
