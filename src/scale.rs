//! Scale functions for data-to-canvas mappings and axis ticks.
//!
//! Scales transform data values to visual properties (position, color).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max or either end is not finite.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain must be finite".to_string()));
        }
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f32) -> f32 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Widen a degenerate or inverted domain so a [`LinearScale`] can be built.
#[must_use]
pub fn pad_domain(domain: (f32, f32)) -> (f32, f32) {
    let (lo, hi) = if domain.0 <= domain.1 { domain } else { (domain.1, domain.0) };
    if (hi - lo).abs() < f32::EPSILON * lo.abs().max(1.0) {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

/// Tick step for roughly `target` ticks over `[min, max]` (1, 2 or 5 × 10ⁿ).
#[must_use]
pub fn nice_step(min: f32, max: f32, target: usize) -> f32 {
    let span = (max - min).abs();
    if span <= 0.0 || !span.is_finite() {
        return 1.0;
    }
    let rough = span / target.max(1) as f32;
    let magnitude = 10f32.powf(rough.log10().floor());
    let residual = rough / magnitude;

    let nice = if residual < 1.5 {
        1.0
    } else if residual < 3.0 {
        2.0
    } else if residual < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick positions at multiples of [`nice_step`] that fall inside `[min, max]`.
#[must_use]
pub fn nice_ticks(min: f32, max: f32, target: usize) -> Vec<f32> {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let step = nice_step(min, max, target);
    let tolerance = step * 1e-4;

    let mut ticks = Vec::new();
    let mut k = (min / step).ceil();
    loop {
        let value = k * step;
        if value > max + tolerance || ticks.len() > 64 {
            break;
        }
        // Normalize -0.0 and float noise around zero.
        ticks.push(if value.abs() < tolerance { 0.0 } else { value });
        k += 1.0;
    }
    ticks
}

/// Format a tick value with as many decimals as its step needs.
#[must_use]
pub fn format_tick(value: f32, step: f32) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    let text = format!("{value:.decimals$}");
    if text.starts_with('-') && text.trim_start_matches(|c| c == '-' || c == '0' || c == '.').is_empty() {
        text[1..].to_string()
    } else {
        text
    }
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }

        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }

    /// Sample the scale at a normalized position in `0.0..=1.0`.
    #[must_use]
    pub fn sample(&self, t: f32) -> Rgba {
        let value = self.domain_min + t.clamp(0.0, 1.0) * (self.domain_max - self.domain_min);
        self.scale(value)
    }

    /// Sequential blues.
    pub fn blues(domain: (f32, f32)) -> Result<Self> {
        Self::new(
            vec![
                Rgba::rgb(247, 251, 255),
                Rgba::rgb(198, 219, 239),
                Rgba::rgb(107, 174, 214),
                Rgba::rgb(33, 113, 181),
                Rgba::rgb(8, 48, 107),
            ],
            domain,
        )
    }

    /// Diverging red-blue.
    pub fn red_blue(domain: (f32, f32)) -> Result<Self> {
        Self::new(
            vec![
                Rgba::rgb(178, 24, 43),
                Rgba::rgb(239, 138, 98),
                Rgba::rgb(247, 247, 247),
                Rgba::rgb(103, 169, 207),
                Rgba::rgb(33, 102, 172),
            ],
            domain,
        )
    }

    /// Viridis (perceptually uniform).
    pub fn viridis(domain: (f32, f32)) -> Result<Self> {
        Self::new(
            vec![
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
            domain,
        )
    }

    /// Magma (sequential, perceptually uniform).
    pub fn magma(domain: (f32, f32)) -> Result<Self> {
        Self::new(
            vec![
                Rgba::rgb(0, 0, 4),
                Rgba::rgb(81, 18, 124),
                Rgba::rgb(183, 55, 121),
                Rgba::rgb(252, 137, 97),
                Rgba::rgb(252, 253, 191),
            ],
            domain,
        )
    }

    /// Black to white.
    pub fn greyscale(domain: (f32, f32)) -> Result<Self> {
        Self::new(vec![Rgba::BLACK, Rgba::WHITE], domain)
    }

    /// Black-red-yellow-white.
    pub fn heat(domain: (f32, f32)) -> Result<Self> {
        Self::new(
            vec![
                Rgba::rgb(0, 0, 0),
                Rgba::rgb(128, 0, 0),
                Rgba::rgb(255, 0, 0),
                Rgba::rgb(255, 128, 0),
                Rgba::rgb(255, 255, 0),
                Rgba::rgb(255, 255, 255),
            ],
            domain,
        )
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = ((t * segment_count as f32).floor() as usize).min(segment_count - 1);
        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(0.0), 0.0);
        assert_relative_eq!(scale.scale(50.0), 0.5);
        assert_relative_eq!(scale.scale(100.0), 1.0);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        let scale = LinearScale::new((0.0, 10.0), (20.0, 0.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(0.0), 20.0);
        assert_relative_eq!(scale.scale(10.0), 0.0);
        assert_relative_eq!(scale.invert(5.0), 7.5);
    }

    #[test]
    fn test_linear_scale_rejects_degenerate() {
        assert!(LinearScale::new((1.0, 1.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((f32::NAN, 1.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_pad_domain() {
        assert_eq!(pad_domain((3.0, 3.0)), (2.0, 4.0));
        assert_eq!(pad_domain((5.0, 1.0)), (1.0, 5.0));
        assert_eq!(pad_domain((0.0, 10.0)), (0.0, 10.0));
    }

    #[test]
    fn test_nice_ticks_round_values() {
        assert_eq!(nice_ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(nice_ticks(-15.0, 15.0, 6), vec![-15.0, -10.0, -5.0, 0.0, 5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_nice_ticks_inside_range() {
        let ticks = nice_ticks(0.3, 9.7, 4);
        assert!(ticks.iter().all(|&t| (0.3..=9.7).contains(&t)));
        assert!(ticks.len() >= 3);
    }

    #[test]
    fn test_format_tick_decimals() {
        assert_eq!(format_tick(20.0, 20.0), "20");
        assert_eq!(format_tick(0.5, 0.5), "0.5");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
        assert_eq!(format_tick(-0.0, 0.5), "0.0");
    }

    #[test]
    fn test_color_scale_endpoints() {
        let scale = ColorScale::viridis((0.0, 1.0)).expect("palette should build");
        assert_eq!(scale.sample(0.0), Rgba::rgb(68, 1, 84));
        assert_eq!(scale.sample(1.0), Rgba::rgb(253, 231, 37));
        // Clamped outside the domain
        assert_eq!(scale.scale(5.0), Rgba::rgb(253, 231, 37));
    }

    #[test]
    fn test_color_scale_midpoint() {
        let scale = ColorScale::greyscale((0.0, 10.0)).expect("palette should build");
        let mid = scale.scale(5.0);
        assert!(mid.r > 100 && mid.r < 150);
    }

    #[test]
    fn test_color_scale_empty() {
        assert!(ColorScale::new(vec![], (0.0, 1.0)).is_err());
    }
}
