//! One set of axes inside a figure.

use crate::datetime::DateForm;
use crate::error::Result;
use crate::plots::{Extent, LegendEntry, Series, SeriesColors, TickLabels};
use crate::scale::{format_tick, nice_step, nice_ticks, pad_domain};
use crate::theme::Theme;

/// Axes with their series, labels and limits.
///
/// Setters take `&mut self` and return `&mut Self` so calls chain on the
/// plot returned by [`crate::figure::Figure::subplot`].
#[derive(Debug)]
pub struct Plot {
    series: Vec<Box<dyn Series>>,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    xlim: Option<(f32, f32)>,
    ylim: Option<(f32, f32)>,
    legend: bool,
    grid: bool,
    date_form: Option<DateForm>,
}

impl Default for Plot {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            title: None,
            xlabel: None,
            ylabel: None,
            xlim: None,
            ylim: None,
            legend: true,
            grid: false,
            date_form: None,
        }
    }
}

impl Plot {
    /// Create empty axes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series after validating its data.
    ///
    /// # Errors
    ///
    /// Returns the series' validation error (empty or mismatched data).
    pub fn add<S: Series + 'static>(&mut self, series: S) -> Result<&mut Self> {
        series.validate()?;
        self.series.push(Box::new(series));
        Ok(self)
    }

    /// Set the title shown centred above the axes.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Set the x axis label.
    pub fn xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.xlabel = Some(label.into());
        self
    }

    /// Set the y axis label.
    pub fn ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.ylabel = Some(label.into());
        self
    }

    /// Fix the x limits instead of fitting the data.
    pub fn xlim(&mut self, min: f32, max: f32) -> &mut Self {
        self.xlim = Some((min, max));
        self
    }

    /// Fix the y limits instead of fitting the data.
    pub fn ylim(&mut self, min: f32, max: f32) -> &mut Self {
        self.ylim = Some((min, max));
        self
    }

    /// Show or hide the legend box.
    pub fn legend(&mut self, show: bool) -> &mut Self {
        self.legend = show;
        self
    }

    /// Show or hide grid lines at the ticks.
    pub fn grid(&mut self, show: bool) -> &mut Self {
        self.grid = show;
        self
    }

    /// Label x ticks as dates.
    pub fn date_form(&mut self, form: DateForm) -> &mut Self {
        self.date_form = Some(form);
        self
    }

    /// Number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no series were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub(crate) fn series(&self) -> &[Box<dyn Series>] {
        &self.series
    }

    pub(crate) fn title_text(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn xlabel_text(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub(crate) fn ylabel_text(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub(crate) fn shows_legend(&self) -> bool {
        self.legend
    }

    pub(crate) fn shows_grid(&self) -> bool {
        self.grid
    }

    /// Axis limits: explicit limits first, then the union of series extents.
    #[must_use]
    pub fn limits(&self) -> ((f32, f32), (f32, f32)) {
        let fitted = self
            .series
            .iter()
            .filter_map(|s| s.extent())
            .reduce(Extent::union)
            .unwrap_or(Extent::new((0.0, 1.0), (0.0, 1.0)));
        (
            pad_domain(self.xlim.unwrap_or(fitted.x)),
            pad_domain(self.ylim.unwrap_or(fitted.y)),
        )
    }

    /// Whether tick labels should be hidden (image plots).
    pub(crate) fn hides_ticks(&self) -> bool {
        self.series.iter().any(|s| s.hides_ticks())
    }

    /// X ticks for a plot area `width` cells wide.
    pub(crate) fn x_ticks(&self, domain: (f32, f32), width: u32) -> TickLabels {
        if self.hides_ticks() {
            return Vec::new();
        }
        if let Some(ticks) = self.series.iter().find_map(|s| s.x_ticks()) {
            return within(ticks, domain);
        }
        let target = (width / 12).max(2) as usize;
        match &self.date_form {
            Some(form) => nice_ticks(domain.0, domain.1, target)
                .into_iter()
                .map(|t| (t, form.format(t)))
                .collect(),
            None => numeric_ticks(domain, target),
        }
    }

    /// Y ticks for a plot area `height` cells tall.
    pub(crate) fn y_ticks(&self, domain: (f32, f32), height: u32) -> TickLabels {
        if self.hides_ticks() {
            return Vec::new();
        }
        if let Some(ticks) = self.series.iter().find_map(|s| s.y_ticks()) {
            return within(ticks, domain);
        }
        numeric_ticks(domain, (height / 3).max(2) as usize)
    }

    /// Legend entries of every series, with theme colors assigned in order.
    pub(crate) fn legend_entries(&self, theme: &Theme) -> Vec<LegendEntry> {
        let mut offset = 0;
        let mut entries = Vec::new();
        for series in &self.series {
            entries.extend(series.legend(SeriesColors::new(theme, offset)));
            offset += series.palette_slots();
        }
        entries
    }
}

fn numeric_ticks(domain: (f32, f32), target: usize) -> TickLabels {
    let step = nice_step(domain.0, domain.1, target);
    nice_ticks(domain.0, domain.1, target).into_iter().map(|t| (t, format_tick(t, step))).collect()
}

fn within(ticks: TickLabels, (min, max): (f32, f32)) -> TickLabels {
    ticks.into_iter().filter(|(t, _)| *t >= min && *t <= max).collect()
}
