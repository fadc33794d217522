//! Candlestick (OHLC) series.

use super::{category_ticks, DrawContext, Extent, LegendEntry, Series, SeriesColors, TickLabels};
use crate::color::Rgba;
use crate::error::{Error, Result};

/// Open, high, low and close of one period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ohlc {
    /// Opening price.
    pub open: f32,
    /// Highest price.
    pub high: f32,
    /// Lowest price.
    pub low: f32,
    /// Closing price.
    pub close: f32,
}

impl Ohlc {
    /// Create a new period.
    #[must_use]
    pub const fn new(open: f32, high: f32, low: f32, close: f32) -> Self {
        Self { open, high, low, close }
    }

    /// Whether the period closed at or above its open.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }

    fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}

/// One candle per labelled period: a `│` wick from low to high and a `█`
/// body between open and close.
#[derive(Debug, Clone)]
pub struct CandlestickSeries {
    labels: Vec<String>,
    data: Vec<Ohlc>,
    up: Rgba,
    down: Rgba,
    label: Option<String>,
}

impl CandlestickSeries {
    /// Candles for `labels`, one [`Ohlc`] each.
    #[must_use]
    pub fn new<S: AsRef<str>>(labels: &[S], data: Vec<Ohlc>) -> Self {
        Self {
            labels: labels.iter().map(|s| s.as_ref().to_string()).collect(),
            data,
            up: Rgba::GREEN,
            down: Rgba::RED,
            label: None,
        }
    }

    /// Colors of rising and falling candles.
    #[must_use]
    pub fn colors(mut self, up: Rgba, down: Rgba) -> Self {
        self.up = up;
        self.down = down;
        self
    }

    /// Set the legend label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Series for CandlestickSeries {
    fn validate(&self) -> Result<()> {
        if self.data.is_empty() {
            return Err(Error::EmptyData);
        }
        if self.labels.len() != self.data.len() {
            return Err(Error::DataLengthMismatch { x_len: self.labels.len(), y_len: self.data.len() });
        }
        Ok(())
    }

    fn extent(&self) -> Option<Extent> {
        let lows: Vec<f32> = self.data.iter().map(|d| d.low.min(d.open).min(d.close)).collect();
        let highs: Vec<f32> = self.data.iter().map(|d| d.high.max(d.open).max(d.close)).collect();
        let (low, _) = crate::stats::extent(&lows)?;
        let (_, high) = crate::stats::extent(&highs)?;
        Some(Extent::new((0.5, self.data.len() as f32 + 0.5), (low, high)))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, _colors: SeriesColors<'_>) {
        for (i, candle) in self.data.iter().enumerate().filter(|(_, c)| c.is_finite()) {
            let at = (i + 1) as f32;
            let color = if candle.is_up() { self.up } else { self.down };
            let col = ctx.column_of(at);

            let (top, bottom) = (ctx.row_of(candle.high), ctx.row_of(candle.low));
            for row in ctx.visible_rows(top, bottom.saturating_add(1)) {
                ctx.put_cell(col, row, '│', Some(color));
            }

            let (body_top, body_bottom) = (
                ctx.row_of(candle.open.max(candle.close)),
                ctx.row_of(candle.open.min(candle.close)),
            );
            let (c0, c1) = ctx.column_span(at - 0.3, at + 0.3);
            for row in ctx.visible_rows(body_top, body_bottom.saturating_add(1)) {
                for c in ctx.visible_columns(c0, c1) {
                    ctx.put_cell(c, row, '█', Some(color));
                }
            }
        }
    }

    fn legend(&self, _colors: SeriesColors<'_>) -> Vec<LegendEntry> {
        self.label
            .iter()
            .map(|label| LegendEntry { label: label.clone(), color: self.up, glyph: '█' })
            .collect()
    }

    fn x_ticks(&self) -> Option<TickLabels> {
        Some(category_ticks(&self.labels))
    }

    fn palette_slots(&self) -> usize {
        0
    }
}
