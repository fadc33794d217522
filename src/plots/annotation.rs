//! Text placed at data coordinates.

use super::{DrawContext, Extent, Series, SeriesColors};
use crate::color::Rgba;

/// Text centred on a data point. Does not affect axis limits.
#[derive(Debug, Clone)]
pub struct TextAnnotation {
    text: String,
    x: f32,
    y: f32,
    color: Option<Rgba>,
}

impl TextAnnotation {
    /// Text at `(x, y)`.
    #[must_use]
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self { text: text.into(), x, y, color: None }
    }

    /// Set the text color (terminal default otherwise).
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }
}

impl Series for TextAnnotation {
    fn extent(&self) -> Option<Extent> {
        None
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, _colors: SeriesColors<'_>) {
        if self.x.is_finite() && self.y.is_finite() {
            ctx.text(self.x, self.y, &self.text, self.color);
        }
    }

    fn palette_slots(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::geometry::Area;
    use crate::theme::Theme;

    #[test]
    fn test_text_is_centred_and_clipped() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(11, 3).unwrap();
        {
            let area = Area::new(0, 0, 11, 3);
            let mut ctx = DrawContext::new(&mut canvas, area, (0.0, 11.0), (0.0, 3.0), &theme).unwrap();
            TextAnnotation::new("peak", 5.5, 2.5).draw(&mut ctx, SeriesColors::new(&theme, 0));
            TextAnnotation::new("edge", 11.0, 0.5).color(Rgba::RED).draw(&mut ctx, SeriesColors::new(&theme, 0));
        }
        let rows: Vec<String> = canvas.to_plain_string().lines().map(str::to_string).collect();
        assert_eq!(rows[0], "   peak    ");
        assert_eq!(rows[2], "         ed");
        assert_eq!(canvas.get(9, 2).unwrap().fg, Some(Rgba::RED));
    }

    #[test]
    fn test_no_extent() {
        assert!(TextAnnotation::new("x", 1.0, 1.0).extent().is_none());
    }
}
