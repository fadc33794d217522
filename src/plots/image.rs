//! Image series.
//!
//! Images are drawn two pixel rows per terminal cell with the upper half
//! block `▀`: the foreground carries the upper pixel, the background the
//! lower one. The image is stretched to fill the plot area.

use super::{DrawContext, Extent, Series, SeriesColors};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Luminance ramp used when the theme strips colors.
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// A raster image.
#[derive(Debug, Clone)]
pub struct ImageSeries {
    image: Framebuffer,
}

impl ImageSeries {
    /// Draw an existing framebuffer.
    #[must_use]
    pub fn from_framebuffer(image: Framebuffer) -> Self {
        Self { image }
    }

    /// Grayscale image from rows of intensities in `0.0..=255.0`.
    ///
    /// # Errors
    ///
    /// Returns an error for empty or ragged rows.
    pub fn from_grayscale(rows: &[Vec<f32>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(Error::EmptyData);
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(Error::DataLengthMismatch { x_len: width, y_len: bad.len() });
        }

        let mut image = Framebuffer::new(width as u32, height as u32)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                let v = if value.is_finite() { value.clamp(0.0, 255.0) as u8 } else { 0 };
                image.set_pixel(x as u32, y as u32, Rgba::rgb(v, v, v));
            }
        }
        Ok(Self::from_framebuffer(image))
    }

    /// Decode a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn from_png(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut decoder = png::Decoder::new(BufReader::new(file));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let bytes = &buf[..info.buffer_size()];

        let rgba: Vec<u8> = match info.color_type {
            png::ColorType::Rgba => bytes.to_vec(),
            png::ColorType::Rgb => {
                bytes.chunks_exact(3).flat_map(|p| [p[0], p[1], p[2], 255]).collect()
            }
            png::ColorType::Grayscale => bytes.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            png::ColorType::GrayscaleAlpha => {
                bytes.chunks_exact(2).flat_map(|p| [p[0], p[0], p[0], p[1]]).collect()
            }
            png::ColorType::Indexed => {
                return Err(Error::UnsupportedImage(format!(
                    "{}: indexed color was not expanded",
                    path.display()
                )));
            }
        };

        tracing::debug!(path = %path.display(), width = info.width, height = info.height, "decoded png");
        Ok(Self::from_framebuffer(Framebuffer::from_rgba_bytes(info.width, info.height, rgba)?))
    }

    /// Source image size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Pixel covering the relative position `(u, v)` in `0.0..1.0`.
    fn sample(&self, u: f32, v: f32) -> Rgba {
        let x = ((u * self.image.width() as f32) as u32).min(self.image.width() - 1);
        let y = ((v * self.image.height() as f32) as u32).min(self.image.height() - 1);
        self.image.get_pixel(x, y).unwrap_or(Rgba::TRANSPARENT)
    }
}

impl Series for ImageSeries {
    fn extent(&self) -> Option<Extent> {
        Some(Extent::new((0.0, self.image.width() as f32), (0.0, self.image.height() as f32)))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, _colors: SeriesColors<'_>) {
        let area = ctx.area();
        let monochrome = ctx.theme().monochrome;
        let rows = area.height * 2;
        // Shades span the image's own luminance range so dim images stay readable.
        let (lo, hi, _) = if monochrome { self.image.luminance_stats() } else { (0.0, 255.0, 0.0) };
        let stretch = |luma: f32| {
            if hi - lo < 1.0 {
                luma
            } else {
                ((luma * 255.0 - lo) / (hi - lo)).clamp(0.0, 1.0)
            }
        };

        for row in 0..area.height {
            let v_top = (row * 2) as f32 / rows as f32;
            let v_bottom = (row * 2 + 1) as f32 / rows as f32;
            for col in 0..area.width {
                let u = (col as f32 + 0.5) / area.width as f32;
                let top = self.sample(u, v_top);
                let bottom = self.sample(u, v_bottom);
                if monochrome {
                    let luma = stretch((top.luma() + bottom.luma()) / 2.0);
                    let ch = SHADES[(luma * (SHADES.len() - 1) as f32).round() as usize];
                    ctx.put_cell(col as i32, row as i32, ch, None);
                } else {
                    ctx.put_colored_cell(col as i32, row as i32, '▀', top, bottom);
                }
            }
        }
    }

    fn palette_slots(&self) -> usize {
        0
    }

    fn hides_ticks(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::geometry::Area;
    use crate::theme::Theme;

    fn render(series: &ImageSeries, theme: &Theme, width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new(width, height).unwrap();
        {
            let area = Area::new(0, 0, width, height);
            let ext = series.extent().unwrap();
            let mut ctx = DrawContext::new(&mut canvas, area, ext.x, ext.y, theme).unwrap();
            series.draw(&mut ctx, SeriesColors::new(theme, 0));
        }
        canvas
    }

    #[test]
    fn test_grayscale_validation() {
        assert!(matches!(ImageSeries::from_grayscale(&[]), Err(Error::EmptyData)));
        assert!(ImageSeries::from_grayscale(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn test_half_blocks_carry_two_rows() {
        let series = ImageSeries::from_grayscale(&[vec![0.0, 0.0], vec![255.0, 255.0]]).unwrap();
        let canvas = render(&series, &Theme::default(), 2, 1);
        let cell = canvas.get(0, 0).unwrap();
        assert_eq!(cell.ch, '▀');
        assert_eq!(cell.fg, Some(Rgba::BLACK));
        assert_eq!(cell.bg, Some(Rgba::WHITE));
    }

    #[test]
    fn test_monochrome_uses_shades() {
        let series = ImageSeries::from_grayscale(&[vec![255.0], vec![255.0]]).unwrap();
        let canvas = render(&series, &Theme::by_name("clear").unwrap(), 1, 1);
        assert_eq!(canvas.get(0, 0).unwrap().ch, '█');
    }

    #[test]
    fn test_monochrome_stretches_dim_images() {
        let series = ImageSeries::from_grayscale(&[vec![0.0, 10.0], vec![0.0, 10.0]]).unwrap();
        let canvas = render(&series, &Theme::by_name("clear").unwrap(), 2, 1);
        assert_eq!(canvas.get(0, 0).unwrap().ch, ' ');
        assert_eq!(canvas.get(1, 0).unwrap().ch, '█');
    }

    #[test]
    fn test_from_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        {
            let file = File::create(&path).unwrap();
            let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), 2, 2);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&[255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255])
                .unwrap();
        }

        let series = ImageSeries::from_png(&path).unwrap();
        assert_eq!(series.size(), (2, 2));
        assert_eq!(series.sample(0.0, 0.0), Rgba::new(255, 0, 0, 255));
        assert_eq!(series.sample(0.99, 0.99), Rgba::WHITE);
    }

    #[test]
    fn test_from_png_missing_file() {
        assert!(matches!(ImageSeries::from_png("/nonexistent/image.png"), Err(Error::Io(_))));
    }
}
