//! Histogram series.
//!
//! Supports automatic binning with Sturges, Scott, and Freedman-Diaconis rules.

use super::{DrawContext, Extent, LegendEntry, Series, SeriesColors};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::stats;

/// Upper bound on the number of bins for any strategy.
pub const MAX_BINS: usize = 10_000;

/// Binning strategy for histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinStrategy {
    /// Sturges' rule: ceil(log2(n) + 1)
    #[default]
    Sturges,
    /// Scott's rule: 3.5 * std / n^(1/3)
    Scott,
    /// Freedman-Diaconis rule: 2 * IQR / n^(1/3)
    FreedmanDiaconis,
    /// Fixed number of bins, at most [`MAX_BINS`]
    Fixed(usize),
}

/// One histogram bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Inclusive lower edge.
    pub start: f32,
    /// Upper edge (inclusive for the last bin).
    pub end: f32,
    /// Bar height: a count, or a density when normalized.
    pub value: f32,
}

/// Frequency bars over binned samples.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    data: Vec<f32>,
    bin_strategy: BinStrategy,
    color: Option<Rgba>,
    label: Option<String>,
    normalize: bool,
}

impl Histogram {
    /// Create a new histogram builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the samples. Non-finite values are ignored.
    #[must_use]
    pub fn data(mut self, data: &[f32]) -> Self {
        self.data = data.iter().copied().filter(|v| v.is_finite()).collect();
        self
    }

    /// Set the binning strategy.
    #[must_use]
    pub fn bins(mut self, strategy: BinStrategy) -> Self {
        self.bin_strategy = strategy;
        self
    }

    /// Set the bar color.
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

    /// Scale bar heights to a density (area sums to 1).
    #[must_use]
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Calculate the optimal number of bins.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        let n = self.data.len();
        if n == 0 {
            return 1;
        }
        let sturges = ((n as f32).log2().ceil() + 1.0) as usize;
        let from_width = |width: f32| {
            let range = self.data_range();
            if width > 0.0 && range > 0.0 {
                (range / width).ceil() as usize
            } else {
                sturges
            }
        };

        // Width rules never need more bins than samples.
        match self.bin_strategy {
            BinStrategy::Sturges => sturges,
            BinStrategy::Scott => {
                let std = stats::std_dev(&self.data).unwrap_or(0.0);
                from_width(3.5 * std / (n as f32).powf(1.0 / 3.0)).min(n)
            }
            BinStrategy::FreedmanDiaconis => {
                from_width(2.0 * self.iqr() / (n as f32).powf(1.0 / 3.0)).min(n)
            }
            BinStrategy::Fixed(bins) => bins,
        }
        .clamp(1, MAX_BINS)
    }

    fn data_range(&self) -> f32 {
        stats::extent(&self.data).map_or(0.0, |(min, max)| max - min)
    }

    fn iqr(&self) -> f32 {
        if self.data.len() < 4 {
            return self.data_range();
        }
        let sorted = stats::sorted_finite(&self.data);
        stats::percentile(&sorted, 75.0) - stats::percentile(&sorted, 25.0)
    }

    /// Bin the samples.
    #[must_use]
    pub fn compute_bins(&self) -> Vec<Bin> {
        let Some((min, max)) = stats::extent(&self.data) else {
            return Vec::new();
        };
        let bin_count = self.bin_count();
        // A constant sample still gets a visible unit-wide bar.
        let (min, max) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
        let bin_width = (max - min) / bin_count as f32;

        let mut counts = vec![0usize; bin_count];
        for &value in &self.data {
            let bin = ((value - min) / bin_width).floor() as usize;
            counts[bin.min(bin_count - 1)] += 1;
        }

        let scale = if self.normalize {
            1.0 / (self.data.len() as f32 * bin_width)
        } else {
            1.0
        };
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| Bin {
                start: min + i as f32 * bin_width,
                end: min + (i + 1) as f32 * bin_width,
                value: count as f32 * scale,
            })
            .collect()
    }
}

impl Series for Histogram {
    fn validate(&self) -> Result<()> {
        if self.data.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(())
    }

    fn extent(&self) -> Option<Extent> {
        let bins = self.compute_bins();
        let first = bins.first()?;
        let last = bins.last()?;
        let top = bins.iter().map(|b| b.value).fold(0.0, f32::max);
        Some(Extent::new((first.start, last.end), (0.0, top)))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, colors: SeriesColors<'_>) {
        let color = self.color.unwrap_or_else(|| colors.primary());
        for bin in self.compute_bins() {
            if bin.value > 0.0 {
                ctx.vertical_bar(bin.start, bin.end, 0.0, bin.value, color);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_bins() {
        let hist = Histogram::new().data(&[1.0, 2.0, 3.0, 4.0, 5.0]).bins(BinStrategy::Fixed(5));
        assert_eq!(hist.bin_count(), 5);
        let bins = hist.compute_bins();
        assert!(bins.iter().all(|b| (b.value - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_histogram_sturges() {
        let data: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let hist = Histogram::new().data(&data).bins(BinStrategy::Sturges);

        // log2(100) + 1 ≈ 8
        assert!(hist.bin_count() >= 7 && hist.bin_count() <= 9);
    }

    #[test]
    fn test_scott_and_fd_are_positive() {
        let data: Vec<f32> = (0..500).map(|i| ((i * 37) % 101) as f32).collect();
        assert!(Histogram::new().data(&data).bins(BinStrategy::Scott).bin_count() > 1);
        assert!(Histogram::new().data(&data).bins(BinStrategy::FreedmanDiaconis).bin_count() > 1);
    }

    #[test]
    fn test_histogram_empty_data() {
        assert!(matches!(Histogram::new().validate(), Err(Error::EmptyData)));
        assert!(Histogram::new().data(&[f32::NAN]).validate().is_err());
    }

    #[test]
    fn test_counts_sum_to_samples() {
        let data: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.731).sin()).collect();
        let bins = Histogram::new().data(&data).bins(BinStrategy::Fixed(20)).compute_bins();
        assert_eq!(bins.len(), 20);
        let total: f32 = bins.iter().map(|b| b.value).sum();
        assert_relative_eq!(total, 1000.0);
    }

    #[test]
    fn test_normalized_area_is_one() {
        let data: Vec<f32> = (0..200).map(|i| i as f32 / 10.0).collect();
        let bins = Histogram::new().data(&data).bins(BinStrategy::Fixed(8)).normalize(true).compute_bins();
        let area: f32 = bins.iter().map(|b| b.value * (b.end - b.start)).sum();
        assert_relative_eq!(area, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_constant_sample_gets_width() {
        let ext = Histogram::new().data(&[3.0, 3.0]).extent().unwrap();
        assert!(ext.x.1 > ext.x.0);
        assert_relative_eq!(ext.y.1, 2.0);
    }

    #[test]
    fn test_bin_count_is_bounded() {
        // Tight cluster plus one far outlier: tiny IQR over a huge range.
        let mut data: Vec<f32> = (0..1000).map(|i| i as f32 * 1e-6).collect();
        data.push(1e6);
        let hist = Histogram::new().data(&data).bins(BinStrategy::FreedmanDiaconis);
        assert!(hist.bin_count() <= data.len());
        assert_eq!(hist.compute_bins().len(), hist.bin_count());

        let scott = Histogram::new().data(&data).bins(BinStrategy::Scott);
        assert!(scott.bin_count() <= data.len());

        let fixed = Histogram::new().data(&[1.0, 2.0]).bins(BinStrategy::Fixed(usize::MAX));
        assert_eq!(fixed.bin_count(), MAX_BINS);
    }
}
