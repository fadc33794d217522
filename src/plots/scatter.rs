//! Scatter series.
//!
//! Points that fall in the same terminal cell merge into one glyph when the
//! marker has sub-cell resolution.

use super::{check_pair, DrawContext, Extent, LegendEntry, Series, SeriesColors};
use crate::color::Rgba;
use crate::error::Result;
use crate::marker::Marker;

/// Unconnected points at `(x, y)`.
#[derive(Debug, Clone, Default)]
pub struct ScatterSeries {
    x: Vec<f32>,
    y: Vec<f32>,
    label: Option<String>,
    color: Option<Rgba>,
    marker: Marker,
}

impl ScatterSeries {
    /// Create an empty scatter series.
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

    /// Set the point marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
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
}

impl Series for ScatterSeries {
    fn validate(&self) -> Result<()> {
        check_pair(&self.x, &self.y)
    }

    fn extent(&self) -> Option<Extent> {
        Extent::of(&self.x, &self.y)
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, colors: SeriesColors<'_>) {
        let color = self.color.unwrap_or_else(|| colors.primary());
        for (&x, &y) in self.x.iter().zip(&self.y) {
            ctx.dot(x, y, self.marker, color);
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
