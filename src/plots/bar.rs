//! Categorical bar series.

use super::{category_ticks, DrawContext, Extent, LegendEntry, Series, SeriesColors, TickLabels};
use crate::color::Rgba;
use crate::error::{Error, Result};

/// Bar direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Bars grow upward from the x axis.
    #[default]
    Vertical,
    /// Bars grow rightward from the y axis.
    Horizontal,
}

/// Category position of bar `index` out of `n` (1-based; horizontal bars list top-down).
fn position(orientation: Orientation, index: usize, n: usize) -> f32 {
    match orientation {
        Orientation::Vertical => (index + 1) as f32,
        Orientation::Horizontal => (n - index) as f32,
    }
}

fn ticks(orientation: Orientation, labels: &[String]) -> TickLabels {
    match orientation {
        Orientation::Vertical => category_ticks(labels),
        Orientation::Horizontal => labels
            .iter()
            .enumerate()
            .map(|(i, l)| (position(orientation, i, labels.len()), l.clone()))
            .collect(),
    }
}

fn category_extent(orientation: Orientation, n: usize, (low, high): (f32, f32)) -> Extent {
    let categories = (0.5, n as f32 + 0.5);
    let values = (low.min(0.0), high.max(0.0));
    match orientation {
        Orientation::Vertical => Extent::new(categories, values),
        Orientation::Horizontal => Extent::new(values, categories),
    }
}

fn draw_bar(ctx: &mut DrawContext<'_>, orientation: Orientation, at: f32, half: f32, base: f32, value: f32, color: Rgba) {
    match orientation {
        Orientation::Vertical => ctx.vertical_bar(at - half, at + half, base, value, color),
        Orientation::Horizontal => ctx.horizontal_bar(at - half, at + half, base, value, color),
    }
}

/// One bar per category.
#[derive(Debug, Clone)]
pub struct BarSeries {
    labels: Vec<String>,
    values: Vec<f32>,
    orientation: Orientation,
    width: f32,
    color: Option<Rgba>,
    label: Option<String>,
}

impl BarSeries {
    /// Bars for `labels` with heights `values`.
    #[must_use]
    pub fn new<S: AsRef<str>>(labels: &[S], values: &[f32]) -> Self {
        Self {
            labels: labels.iter().map(|s| s.as_ref().to_string()).collect(),
            values: values.to_vec(),
            orientation: Orientation::Vertical,
            width: 0.8,
            color: None,
            label: None,
        }
    }

    /// Set the bar direction.
    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Bar width as a fraction of the category slot (0.1 to 1.0).
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = width.clamp(0.1, 1.0);
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
}

impl Series for BarSeries {
    fn validate(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(Error::EmptyData);
        }
        if self.labels.len() != self.values.len() {
            return Err(Error::DataLengthMismatch { x_len: self.labels.len(), y_len: self.values.len() });
        }
        Ok(())
    }

    fn extent(&self) -> Option<Extent> {
        let values = crate::stats::extent(&self.values)?;
        Some(category_extent(self.orientation, self.values.len(), values))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, colors: SeriesColors<'_>) {
        let color = self.color.unwrap_or_else(|| colors.primary());
        let n = self.values.len();
        for (i, &value) in self.values.iter().enumerate() {
            if value.is_finite() {
                let at = position(self.orientation, i, n);
                draw_bar(ctx, self.orientation, at, self.width / 2.0, 0.0, value, color);
            }
        }
    }

    fn legend(&self, colors: SeriesColors<'_>) -> Vec<LegendEntry> {
        self.label
            .iter()
            .map(|label| LegendEntry {
                label: label.clone(),
                color: self.color.unwrap_or_else(|| colors.primary()),
                glyph: '█',
            })
            .collect()
    }

    fn x_ticks(&self) -> Option<TickLabels> {
        (self.orientation == Orientation::Vertical).then(|| ticks(self.orientation, &self.labels))
    }

    fn y_ticks(&self) -> Option<TickLabels> {
        (self.orientation == Orientation::Horizontal).then(|| ticks(self.orientation, &self.labels))
    }
}

/// Bars stacked from several groups of values per category.
#[derive(Debug, Clone)]
pub struct StackedBarSeries {
    labels: Vec<String>,
    groups: Vec<Vec<f32>>,
    names: Vec<String>,
    colors: Vec<Rgba>,
    orientation: Orientation,
    width: f32,
}

impl StackedBarSeries {
    /// `groups[k][i]` is the segment of group `k` in category `labels[i]`.
    #[must_use]
    pub fn new<S: AsRef<str>>(labels: &[S], groups: Vec<Vec<f32>>) -> Self {
        Self {
            labels: labels.iter().map(|s| s.as_ref().to_string()).collect(),
            groups,
            names: Vec::new(),
            colors: Vec::new(),
            orientation: Orientation::Vertical,
            width: 0.8,
        }
    }

    /// Legend names, one per group.
    #[must_use]
    pub fn labels<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.names = names.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Explicit colors, one per group; missing ones come from the theme.
    #[must_use]
    pub fn colors(mut self, colors: Vec<Rgba>) -> Self {
        self.colors = colors;
        self
    }

    /// Set the bar direction.
    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    fn group_color(&self, k: usize, colors: SeriesColors<'_>) -> Rgba {
        self.colors.get(k).copied().unwrap_or_else(|| colors.nth(k))
    }

    /// Lowest and highest cumulative value over all categories.
    fn totals(&self) -> (f32, f32) {
        let mut low = 0.0f32;
        let mut high = 0.0f32;
        for i in 0..self.labels.len() {
            let (mut neg, mut pos) = (0.0, 0.0);
            for group in &self.groups {
                match group.get(i) {
                    Some(&v) if v < 0.0 => neg += v,
                    Some(&v) if v.is_finite() => pos += v,
                    _ => {}
                }
            }
            low = low.min(neg);
            high = high.max(pos);
        }
        (low, high)
    }
}

impl Series for StackedBarSeries {
    fn validate(&self) -> Result<()> {
        if self.labels.is_empty() || self.groups.is_empty() {
            return Err(Error::EmptyData);
        }
        for group in &self.groups {
            if group.len() != self.labels.len() {
                return Err(Error::DataLengthMismatch { x_len: self.labels.len(), y_len: group.len() });
            }
        }
        Ok(())
    }

    fn extent(&self) -> Option<Extent> {
        if self.labels.is_empty() {
            return None;
        }
        Some(category_extent(self.orientation, self.labels.len(), self.totals()))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, colors: SeriesColors<'_>) {
        let n = self.labels.len();
        for i in 0..n {
            let at = position(self.orientation, i, n);
            let (mut neg, mut pos) = (0.0f32, 0.0f32);
            for (k, group) in self.groups.iter().enumerate() {
                let Some(&value) = group.get(i).filter(|v| v.is_finite()) else {
                    continue;
                };
                let color = self.group_color(k, colors);
                let base = if value < 0.0 { &mut neg } else { &mut pos };
                draw_bar(ctx, self.orientation, at, self.width / 2.0, *base, *base + value, color);
                *base += value;
            }
        }
    }

    fn legend(&self, colors: SeriesColors<'_>) -> Vec<LegendEntry> {
        self.names
            .iter()
            .enumerate()
            .map(|(k, name)| LegendEntry { label: name.clone(), color: self.group_color(k, colors), glyph: '█' })
            .collect()
    }

    fn x_ticks(&self) -> Option<TickLabels> {
        (self.orientation == Orientation::Vertical).then(|| ticks(self.orientation, &self.labels))
    }

    fn y_ticks(&self) -> Option<TickLabels> {
        (self.orientation == Orientation::Horizontal).then(|| ticks(self.orientation, &self.labels))
    }

    fn palette_slots(&self) -> usize {
        self.groups.len()
    }
}
