//! Polar series: a closed curve `r(θ)` over reference rings.

use super::{check_pair, DrawContext, Extent, LegendEntry, Series, SeriesColors};
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::marker::Marker;

/// Segments used to approximate a reference ring.
const RING_SEGMENTS: usize = 72;

/// Curve given by angles (degrees) and radii.
#[derive(Debug, Clone)]
pub struct PolarSeries {
    angles: Vec<f32>,
    radii: Vec<f32>,
    label: Option<String>,
    color: Option<Rgba>,
    marker: Marker,
    rings: usize,
}

impl PolarSeries {
    /// Curve through `(angle_deg, radius)` pairs, closed back to its start.
    #[must_use]
    pub fn new(angles_deg: &[f32], radii: &[f32]) -> Self {
        Self {
            angles: angles_deg.to_vec(),
            radii: radii.to_vec(),
            label: None,
            color: None,
            marker: Marker::Braille,
            rings: 2,
        }
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

    /// Set the curve marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    /// Number of evenly spaced reference rings (0 hides them).
    #[must_use]
    pub fn rings(mut self, rings: usize) -> Self {
        self.rings = rings;
        self
    }

    /// Cartesian points of the closed curve.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        let mut points: Vec<Point> = self
            .angles
            .iter()
            .zip(&self.radii)
            .filter(|(a, r)| a.is_finite() && r.is_finite())
            .map(|(&a, &r)| {
                let theta = a.to_radians();
                Point::new(r * theta.cos(), r * theta.sin())
            })
            .collect();
        if let Some(&first) = points.first() {
            points.push(first);
        }
        points
    }

    fn max_radius(&self) -> Option<f32> {
        let abs: Vec<f32> = self.radii.iter().map(|r| r.abs()).collect();
        crate::stats::extent(&abs).map(|(_, max)| max).filter(|&m| m > 0.0)
    }
}

impl Series for PolarSeries {
    fn validate(&self) -> Result<()> {
        check_pair(&self.angles, &self.radii)
    }

    fn extent(&self) -> Option<Extent> {
        let r = self.max_radius()?;
        Some(Extent::new((-r, r), (-r, r)))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, colors: SeriesColors<'_>) {
        let color = self.color.unwrap_or_else(|| colors.primary());
        if let Some(max) = self.max_radius() {
            let ring_color = ctx.theme().axes_fg.unwrap_or(Rgba::GRAY);
            for k in 1..=self.rings {
                let radius = max * k as f32 / self.rings as f32;
                let ring: Vec<Point> = (0..=RING_SEGMENTS)
                    .map(|i| {
                        let theta = std::f32::consts::TAU * i as f32 / RING_SEGMENTS as f32;
                        Point::new(radius * theta.cos(), radius * theta.sin())
                    })
                    .collect();
                ctx.polyline(&ring, Marker::Braille, ring_color);
            }
        }
        ctx.polyline(&self.points(), self.marker, color);
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
