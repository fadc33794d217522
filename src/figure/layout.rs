//! Axes layout: title row, tick labels, frame, legend.
//!
//! ```text
//! ylabel          Title
//!     ┌──────────────────┐
//!  10 ┤ ⠉⠑⠢⡀   ┌───────┐ │
//!     │     ⠈⠢ │⣿ alpha│ │
//!   5 ┤        └───────┘ │
//!     │                  │
//!   0 ┤                  │
//!     └┬────────┬───────┬┘
//!      0        5      10
//!            xlabel
//! ```

use super::plot::Plot;
use crate::canvas::Canvas;
use crate::error::Result;
use crate::geometry::Area;
use crate::plots::{DrawContext, LegendEntry, SeriesColors};
use crate::theme::Theme;
use tracing::debug;

/// Smallest inner plot area worth drawing series into.
const MIN_INNER: u32 = 2;

/// Width of a string in terminal columns.
fn text_width(text: &str) -> u32 {
    text.chars().count() as u32
}

/// Draw one plot with its axes into `area`.
///
/// # Errors
///
/// Returns an error if the plot limits cannot form a scale.
pub fn draw_plot(canvas: &mut Canvas, area: Area, plot: &Plot, theme: &Theme) -> Result<()> {
    let header = u32::from(plot.title_text().is_some() || plot.ylabel_text().is_some());
    let hide_ticks = plot.hides_ticks();
    let x_tick_row = u32::from(!hide_ticks);
    let xlabel_row = u32::from(plot.xlabel_text().is_some());

    let frame_height = area.height.saturating_sub(header + x_tick_row + xlabel_row);
    let inner_height = frame_height.saturating_sub(2);
    let (x_domain, y_domain) = plot.limits();
    let y_ticks = plot.y_ticks(y_domain, inner_height);
    let label_width = y_ticks.iter().map(|(_, l)| text_width(l)).max().map_or(0, |w| w + 1);

    let frame = Area::new(area.x + label_width, area.y + header, area.width.saturating_sub(label_width), frame_height);
    let inner = frame.inset(1, 1, 1, 1);
    debug!(?area, ?inner, series = plot.len(), "layout plot");

    draw_header(canvas, area, plot, theme);

    if inner.width < MIN_INNER || inner.height < MIN_INNER {
        debug!(?inner, "plot area too small, skipping series");
        return Ok(());
    }

    canvas.fill_cells(
        inner.x as i32,
        inner.y as i32,
        inner.width,
        inner.height,
        ' ',
        None,
        theme.paint(theme.axes_bg.or(theme.canvas_bg)),
    );

    let x_ticks = plot.x_ticks(x_domain, inner.width);
    let (tick_cols, tick_rows) = {
        let mut ctx = DrawContext::new(canvas, inner, x_domain, y_domain, theme)?;
        let cols: Vec<(i32, String)> = x_ticks.iter().map(|(t, l)| (ctx.column_of(*t), l.clone())).collect();
        let rows: Vec<(i32, String)> = y_ticks.iter().map(|(t, l)| (ctx.row_of(*t), l.clone())).collect();

        if plot.shows_grid() {
            draw_grid(&mut ctx, &cols, &rows, theme);
        }

        let mut offset = 0;
        for series in plot.series() {
            series.draw(&mut ctx, SeriesColors::new(theme, offset));
            offset += series.palette_slots();
        }
        (cols, rows)
    };

    draw_frame(canvas, frame, &tick_cols, &tick_rows, theme);
    draw_tick_labels(canvas, frame, area, &tick_cols, &tick_rows, theme);

    if let Some(xlabel) = plot.xlabel_text() {
        let row = frame.bottom() + x_tick_row;
        let x = inner.x as i32 + (inner.width as i32 - text_width(xlabel) as i32) / 2;
        canvas.put_str(x.max(area.x as i32), row as i32, xlabel, theme.paint(theme.ticks_fg));
    }

    if plot.shows_legend() {
        draw_legend(canvas, inner, &plot.legend_entries(theme), theme);
    }
    Ok(())
}

fn draw_header(canvas: &mut Canvas, area: Area, plot: &Plot, theme: &Theme) {
    if let Some(ylabel) = plot.ylabel_text() {
        canvas.put_str(area.x as i32, area.y as i32, ylabel, theme.paint(theme.ticks_fg));
    }
    if let Some(title) = plot.title_text() {
        let x = area.x as i32 + (area.width as i32 - text_width(title) as i32) / 2;
        canvas.put_str(x.max(area.x as i32), area.y as i32, title, theme.paint(theme.title_fg));
    }
}

fn draw_grid(ctx: &mut DrawContext<'_>, cols: &[(i32, String)], rows: &[(i32, String)], theme: &Theme) {
    let area = ctx.area();
    let color = theme.axes_fg;
    for &(col, _) in cols {
        for row in 0..area.height as i32 {
            ctx.put_cell(col, row, '│', color);
        }
    }
    for &(row, _) in rows {
        for col in 0..area.width as i32 {
            let crossing = cols.iter().any(|&(c, _)| c == col);
            ctx.put_cell(col, row, if crossing { '┼' } else { '─' }, color);
        }
    }
}

fn draw_frame(canvas: &mut Canvas, frame: Area, cols: &[(i32, String)], rows: &[(i32, String)], theme: &Theme) {
    let fg = theme.paint(theme.axes_fg);
    let (left, top) = (frame.x as i32, frame.y as i32);
    let (right, bottom) = (frame.right() as i32 - 1, frame.bottom() as i32 - 1);

    for x in left + 1..right {
        canvas.set_char(x, top, '─', fg);
        canvas.set_char(x, bottom, '─', fg);
    }
    for y in top + 1..bottom {
        canvas.set_char(left, y, '│', fg);
        canvas.set_char(right, y, '│', fg);
    }
    canvas.set_char(left, top, '┌', fg);
    canvas.set_char(right, top, '┐', fg);
    canvas.set_char(left, bottom, '└', fg);
    canvas.set_char(right, bottom, '┘', fg);

    // Tick positions are relative to the inner area, one cell inside the frame.
    for &(row, _) in rows {
        canvas.set_char(left, top + 1 + row, '┤', fg);
    }
    for &(col, _) in cols {
        canvas.set_char(left + 1 + col, bottom, '┬', fg);
    }
}

fn draw_tick_labels(
    canvas: &mut Canvas,
    frame: Area,
    area: Area,
    cols: &[(i32, String)],
    rows: &[(i32, String)],
    theme: &Theme,
) {
    let fg = theme.paint(theme.ticks_fg);

    for (row, label) in rows {
        let x = frame.x as i32 - 1 - text_width(label) as i32;
        canvas.put_str(x.max(area.x as i32), frame.y as i32 + 1 + row, label, fg);
    }

    // Skip labels that would overlap the previous one.
    let label_row = frame.bottom() as i32;
    let mut next_free = area.x as i32;
    for (col, label) in cols {
        let width = text_width(label) as i32;
        let x = (frame.x as i32 + 1 + col - width / 2).max(area.x as i32);
        if x < next_free || x + width > area.right() as i32 {
            continue;
        }
        canvas.put_str(x, label_row, label, fg);
        next_free = x + width + 1;
    }
}

fn draw_legend(canvas: &mut Canvas, inner: Area, entries: &[LegendEntry], theme: &Theme) {
    if entries.is_empty() {
        return;
    }
    let label_width = entries.iter().map(|e| text_width(&e.label)).max().unwrap_or(0);
    let width = label_width + 4;
    let height = entries.len() as u32 + 2;
    if width > inner.width || height > inner.height {
        return;
    }

    let (x, y) = ((inner.right() - width) as i32, inner.y as i32);
    let frame_fg = theme.paint(theme.axes_fg);
    let bg = theme.paint(theme.axes_bg.or(theme.canvas_bg));
    canvas.fill_cells(x, y, width, height, ' ', None, bg);

    let rule = "─".repeat(width as usize - 2);
    canvas.put_str(x, y, &format!("┌{rule}┐"), frame_fg);
    canvas.put_str(x, y + height as i32 - 1, &format!("└{rule}┘"), frame_fg);
    for (i, entry) in entries.iter().enumerate() {
        let row = y + 1 + i as i32;
        canvas.set_char(x, row, '│', frame_fg);
        canvas.set_char(x + width as i32 - 1, row, '│', frame_fg);
        canvas.set_char(x + 1, row, entry.glyph, theme.paint(Some(entry.color)));
        canvas.put_str(x + 3, row, &entry.label, theme.paint(theme.ticks_fg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::{LineSeries, ScatterSeries};

    fn render(plot: &Plot, width: u32, height: u32) -> String {
        let mut canvas = Canvas::new(width, height).unwrap();
        draw_plot(&mut canvas, Area::new(0, 0, width, height), plot, &Theme::default()).unwrap();
        canvas.to_plain_string()
    }

    #[test]
    fn test_title_centred_and_ylabel_left() {
        let mut plot = Plot::new();
        plot.title("Title").ylabel("y");
        let text = render(&plot, 40, 10);
        let first = text.lines().next().unwrap();
        assert!(first.starts_with('y'));
        assert_eq!(first.find("Title"), Some(17));
    }

    #[test]
    fn test_frame_corners() {
        let mut plot = Plot::new();
        plot.add(LineSeries::new().data(&[0.0, 10.0], &[0.0, 10.0])).unwrap();
        let text = render(&plot, 40, 12);
        assert!(text.contains('┌') && text.contains('┐') && text.contains('┘'));
        assert!(text.contains('┤'));
    }

    #[test]
    fn test_tick_labels_present() {
        let mut plot = Plot::new();
        plot.add(ScatterSeries::new().data(&[0.0, 100.0], &[0.0, 50.0])).unwrap();
        let text = render(&plot, 60, 16);
        assert!(text.contains("100"));
        assert!(text.contains("50"));
    }

    #[test]
    fn test_legend_box_lists_labels() {
        let mut plot = Plot::new();
        plot.add(LineSeries::new().values(&[1.0, 2.0, 3.0]).label("alpha")).unwrap();
        plot.add(LineSeries::new().values(&[3.0, 2.0, 1.0]).label("beta")).unwrap();
        let text = render(&plot, 60, 16);
        assert!(text.contains("alpha"));
        assert!(text.contains("beta"));

        plot.legend(false);
        assert!(!render(&plot, 60, 16).contains("alpha"));
    }

    #[test]
    fn test_xlabel_below_ticks() {
        let mut plot = Plot::new();
        plot.add(LineSeries::new().values(&[1.0, 2.0])).unwrap().xlabel("time");
        let text = render(&plot, 40, 10);
        assert!(text.lines().last().unwrap().contains("time"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let mut plot = Plot::new();
        plot.add(LineSeries::new().values(&[1.0, 2.0])).unwrap().title("t").xlabel("x");
        let _ = render(&plot, 3, 3);
        let _ = render(&plot, 1, 1);
    }
}
