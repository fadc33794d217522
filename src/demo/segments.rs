//! The feature tour, one segment per plotting feature.
//!
//! Each segment prints its header, draws one or more scenes and follows
//! every scene with a note comparing it to the `termgfx` command line tool
//! and a pause.

use super::config::DemoConfig;
use super::pause::Pause;
use crate::color::Rgba;
use crate::datetime::DateForm;
use crate::error::Result;
use crate::figure::Figure;
use crate::marker::Marker;
use crate::output::{clear_screen, hide_cursor, show_cursor};
use crate::plots::{
    BarSeries, BinStrategy, BoxSeries, CandlestickSeries, ErrorBarSeries, FillSeries, Histogram,
    ImageSeries, LineSeries, MatrixSeries, Ohlc, Orientation, PolarSeries, ScatterSeries,
    StackedBarSeries, TextAnnotation,
};
use crate::theme::THEME_NAMES;
use chrono::{Duration as Days, NaiveDate};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::fmt;
use std::io::Write;
use std::time::Duration;

/// Width of the `=` rules around a segment header.
const RULE_WIDTH: usize = 60;

/// One numbered feature of the tour.
#[derive(Clone, Copy)]
pub struct Segment {
    /// Position in the tour, starting at 1.
    pub number: u8,
    /// Header text without the number.
    pub title: &'static str,
    run: fn(&mut Session<'_>) -> Result<()>,
}

impl Segment {
    /// Header line, e.g. `"1. BAR CHARTS"`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{}. {}", self.number, self.title)
    }

    pub(crate) fn run(&self, session: &mut Session<'_>) -> Result<()> {
        (self.run)(session)
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment").field("number", &self.number).field("title", &self.title).finish()
    }
}

/// All segments in tour order.
pub static SEGMENTS: [Segment; 18] = [
    Segment { number: 1, title: "BAR CHARTS", run: bar_charts },
    Segment { number: 2, title: "LINE CHARTS", run: line_charts },
    Segment { number: 3, title: "SCATTER PLOTS", run: scatter_plots },
    Segment { number: 4, title: "HISTOGRAMS", run: histograms },
    Segment { number: 5, title: "CANDLESTICK / OHLC CHARTS", run: candlesticks },
    Segment { number: 6, title: "BOX PLOTS", run: box_plots },
    Segment { number: 7, title: "HEATMAPS / MATRIX PLOTS", run: heatmaps },
    Segment { number: 8, title: "IMAGE FROM DATA", run: image_plot },
    Segment { number: 9, title: "DATETIME PLOTS", run: datetime_plot },
    Segment { number: 10, title: "SUBPLOTS (Multiple Charts)", run: subplots },
    Segment { number: 11, title: "REAL-TIME ANIMATIONS", run: animation },
    Segment { number: 12, title: "THEMES AND COLORS", run: themes },
    Segment { number: 13, title: "MARKER STYLES", run: markers },
    Segment { number: 14, title: "POLAR COORDINATES", run: polar },
    Segment { number: 15, title: "TEXT AND ANNOTATIONS", run: annotations },
    Segment { number: 16, title: "ERROR BARS", run: error_bars },
    Segment { number: 17, title: "FILL BETWEEN (Area Charts)", run: fill_between },
    Segment { number: 18, title: "STREAMING / LIVE DATA", run: streaming },
];

/// Output, pause and sample source shared by the segments of one run.
pub(crate) struct Session<'a> {
    out: &'a mut dyn Write,
    pause: &'a mut dyn Pause,
    config: &'a DemoConfig,
    rng: &'a mut StdRng,
}

impl<'a> Session<'a> {
    pub(crate) fn new(
        out: &'a mut dyn Write,
        pause: &'a mut dyn Pause,
        config: &'a DemoConfig,
        rng: &'a mut StdRng,
    ) -> Self {
        Self { out, pause, config, rng }
    }

    /// Blank line, rule, indented title, rule, blank line.
    pub(crate) fn header(&mut self, title: &str) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "\n{rule}\n  {title}\n{rule}\n")?;
        Ok(())
    }

    pub(crate) fn clear(&mut self) -> Result<()> {
        clear_screen(self.out)?;
        Ok(())
    }

    pub(crate) fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// A note below a scene, marked with the chart emoji.
    fn note(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "\n📊 {text}")?;
        Ok(())
    }

    /// The note for a scene `termgfx` can draw, followed by its command.
    fn equivalent(&mut self, commands: &[&str]) -> Result<()> {
        self.note("termgfx equivalent:")?;
        for command in commands {
            writeln!(self.out, "   {command}")?;
        }
        Ok(())
    }

    pub(crate) fn pause(&mut self) -> Result<()> {
        self.pause.pause(self.out)
    }

    /// An empty figure sized by the configuration.
    fn figure(&self) -> Figure {
        let mut fig = Figure::new();
        if self.config.width.is_some() || self.config.height.is_some() {
            let (width, height) = fig.canvas_size();
            fig.size(self.config.width.unwrap_or(width), self.config.height.unwrap_or(height));
        }
        fig
    }

    fn show(&mut self, fig: &Figure) -> Result<()> {
        fig.show(self.out, self.config.color)?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Redraw in place for animations.
    fn frame(&mut self, fig: &Figure, delay: Duration) -> Result<()> {
        clear_screen(self.out)?;
        self.show(fig)?;
        sleep(delay);
        Ok(())
    }

    /// Run `frames` with the cursor hidden, showing it again even when a frame fails.
    fn hidden_cursor(&mut self, frames: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        hide_cursor(self.out)?;
        let drawn = frames(self);
        let shown = show_cursor(self.out);
        drawn?;
        shown?;
        Ok(())
    }

    fn gauss(&mut self, mean: f32, std_dev: f32, n: usize) -> Vec<f32> {
        let normal = Normal::new(mean, std_dev).expect("standard deviation is positive");
        normal.sample_iter(&mut *self.rng).take(n).collect()
    }
}

fn sleep(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}

/// Green while the load is below 70 %, red from there on.
fn cpu_color(cpu: f32) -> Rgba {
    if cpu < 70.0 {
        Rgba::GREEN
    } else {
        Rgba::RED
    }
}

fn range(from: u32, to: u32) -> Vec<f32> {
    (from..=to).map(|i| i as f32).collect()
}

fn bar_charts(s: &mut Session<'_>) -> Result<()> {
    let mut fig = s.figure();
    fig.plot()
        .add(BarSeries::new(&["Python", "JavaScript", "Rust", "Go", "Java"], &[85.0, 78.0, 92.0, 65.0, 70.0]))?
        .title("Programming Language Scores")
        .xlabel("Language")
        .ylabel("Score");
    s.show(&fig)?;
    s.equivalent(&[r#"termgfx chart bar --data "Python:85,JavaScript:78,Rust:92,Go:65,Java:70""#])?;
    s.pause()?;

    let mut fig = s.figure();
    fig.plot()
        .add(
            BarSeries::new(&["Q1", "Q2", "Q3", "Q4"], &[120.0, 150.0, 180.0, 200.0])
                .orientation(Orientation::Horizontal),
        )?
        .title("Quarterly Revenue ($K)");
    s.show(&fig)?;
    s.note("termgfx: Horizontal bars not yet supported")?;
    s.pause()?;

    let mut fig = s.figure();
    let groups = vec![
        vec![10.0, 20.0, 15.0, 25.0],
        vec![15.0, 10.0, 20.0, 15.0],
        vec![5.0, 15.0, 10.0, 20.0],
    ];
    fig.plot()
        .add(
            StackedBarSeries::new(&["Jan", "Feb", "Mar", "Apr"], groups)
                .labels(&["Product A", "Product B", "Product C"]),
        )?
        .title("Monthly Sales by Product");
    s.show(&fig)?;
    s.note("termgfx: Stacked bars not yet supported")?;
    s.pause()
}

fn line_charts(s: &mut Session<'_>) -> Result<()> {
    let mut fig = s.figure();
    let temps = [12.0, 15.0, 13.0, 18.0, 22.0, 25.0, 28.0, 26.0, 24.0, 20.0, 16.0, 14.0];
    fig.plot()
        .add(LineSeries::new().data(&range(1, 12), &temps).marker(Marker::Braille))?
        .title("Monthly Temperature (°C)")
        .xlabel("Month")
        .ylabel("Temperature");
    s.show(&fig)?;
    s.equivalent(&[
        r#"termgfx chart line --data "12,15,13,18,22,25,28,26,24,20,16,14" --title "Temperature""#,
    ])?;
    s.pause()?;

    let mut fig = s.figure();
    let x = range(1, 10);
    let quadratic: Vec<f32> = x.iter().map(|i| i * i).collect();
    let linear: Vec<f32> = x.iter().map(|i| i * 10.0).collect();
    let exponential: Vec<f32> = x.iter().map(|i| 2f32.powf(*i)).collect();
    fig.plot()
        .add(LineSeries::new().data(&x, &quadratic).label("Quadratic"))?
        .add(LineSeries::new().data(&x, &linear).label("Linear"))?
        .add(LineSeries::new().data(&x, &exponential).label("Exponential"))?
        .title("Growth Comparison")
        .legend(true);
    s.show(&fig)?;
    s.note("termgfx: Multiple lines not yet supported")?;
    s.pause()
}

fn scatter_plots(s: &mut Session<'_>) -> Result<()> {
    let x = s.gauss(50.0, 10.0, 100);
    let y = s.gauss(50.0, 15.0, 100);
    let mut fig = s.figure();
    fig.plot()
        .add(ScatterSeries::new().data(&x, &y).marker(Marker::Dot))?
        .title("Random Distribution")
        .xlabel("X Values")
        .ylabel("Y Values");
    s.show(&fig)?;
    s.note("termgfx: Scatter plots not yet supported")?;
    s.pause()
}

fn histograms(s: &mut Session<'_>) -> Result<()> {
    let data = s.gauss(100.0, 15.0, 1000);
    let mut fig = s.figure();
    fig.plot()
        .add(Histogram::new().data(&data).bins(BinStrategy::Fixed(20)))?
        .title("Normal Distribution Histogram")
        .xlabel("Value")
        .ylabel("Frequency");
    s.show(&fig)?;
    s.note("termgfx: Histograms not yet supported")?;
    s.pause()
}

fn candlesticks(s: &mut Session<'_>) -> Result<()> {
    let opens = [100.0, 105.0, 102.0, 108.0, 110.0];
    let highs = [108.0, 110.0, 109.0, 115.0, 118.0];
    let lows = [98.0, 102.0, 100.0, 106.0, 108.0];
    let closes = [105.0, 103.0, 108.0, 112.0, 115.0];
    let candles = (0..opens.len()).map(|i| Ohlc::new(opens[i], highs[i], lows[i], closes[i])).collect();

    let mut fig = s.figure();
    fig.plot()
        .add(CandlestickSeries::new(&["Mon", "Tue", "Wed", "Thu", "Fri"], candles))?
        .title("Stock Price OHLC");
    s.show(&fig)?;
    s.note("termgfx: Candlestick charts not yet supported")?;
    s.pause()
}

fn box_plots(s: &mut Session<'_>) -> Result<()> {
    let groups = [s.gauss(50.0, 10.0, 100), s.gauss(60.0, 15.0, 100), s.gauss(45.0, 8.0, 100)];
    let mut fig = s.figure();
    fig.plot()
        .add(BoxSeries::new(&groups).labels(&["Group A", "Group B", "Group C"]))?
        .title("Distribution Comparison");
    s.show(&fig)?;
    s.note("termgfx: Box plots not yet supported")?;
    s.pause()
}

fn heatmaps(s: &mut Session<'_>) -> Result<()> {
    let matrix: Vec<Vec<f32>> = (0..10).map(|i| (0..10).map(|j| (i + j) as f32).collect()).collect();
    let mut fig = s.figure();
    fig.plot().add(MatrixSeries::new(matrix))?.title("Heatmap Matrix");
    s.show(&fig)?;
    s.equivalent(&[r#"termgfx heatmap --data "1,2,3;4,5,6;7,8,9" --colors viridis"#])?;
    s.pause()
}

fn image_plot(s: &mut Session<'_>) -> Result<()> {
    const SIZE: usize = 30;
    let pixels: Vec<Vec<f32>> =
        (0..SIZE).map(|i| (0..SIZE).map(|j| ((i + j) % 256) as f32).collect()).collect();
    let mut fig = s.figure();
    fig.plot().add(ImageSeries::from_grayscale(&pixels)?)?.title("Generated Image Pattern");
    s.show(&fig)?;
    s.equivalent(&["termgfx image ./image.png"])?;
    s.pause()
}

fn datetime_plot(s: &mut Session<'_>) -> Result<()> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("2024-01-01 is a valid date");
    let dates: Vec<String> =
        (0..12).map(|i| (start + Days::days(30 * i)).format("%Y-%m-%d").to_string()).collect();
    let values: Vec<f32> =
        (0..12).map(|i| (100 + i * 10 + s.rng.gen_range(-20..=20)) as f32).collect();

    let form = DateForm::new("Y-m-d");
    let mut fig = s.figure();
    fig.plot()
        .add(LineSeries::new().dates(&dates, &values, &form)?.marker(Marker::Braille))?
        .date_form(form)
        .title("2024 Monthly Progress");
    s.show(&fig)?;
    s.note("termgfx: Date-aware plots not yet supported")?;
    s.pause()
}

fn subplots(s: &mut Session<'_>) -> Result<()> {
    let samples = s.gauss(0.0, 1.0, 100);
    let mut fig = s.figure();
    fig.subplots(2, 2)?;
    fig.subplot(1, 1)?.add(BarSeries::new(&["A", "B", "C"], &[10.0, 20.0, 15.0]))?.title("Bar");
    fig.subplot(1, 2)?
        .add(LineSeries::new().data(&[1.0, 2.0, 3.0, 4.0], &[1.0, 4.0, 2.0, 3.0]))?
        .title("Line");
    fig.subplot(2, 1)?
        .add(ScatterSeries::new().data(&range(1, 5), &[5.0, 2.0, 4.0, 1.0, 3.0]))?
        .title("Scatter");
    fig.subplot(2, 2)?
        .add(Histogram::new().data(&samples).bins(BinStrategy::Fixed(10)))?
        .title("Histogram");
    s.show(&fig)?;
    s.equivalent(&[
        r#"termgfx dashboard --layout 2x2 --panels "chart:bar,chart:line,chart:scatter,chart:hist""#,
    ])?;
    s.pause()
}

fn animation(s: &mut Session<'_>) -> Result<()> {
    s.line("Animating a growing line chart...")?;
    s.out.flush()?;
    sleep(s.config.lead_in());

    let frames = s.config.animation_frames;
    let mut data = Vec::with_capacity(frames);
    s.hidden_cursor(|s| {
        for i in 0..frames {
            data.push((i as f32 * 0.3).sin() * 10.0 + s.rng.gen::<f32>() * 2.0);
            let mut fig = s.figure();
            fig.plot()
                .add(LineSeries::new().values(&data).marker(Marker::Braille))?
                .title(format!("Live Data Stream (frame {}/{frames})", i + 1))
                .ylim(-15.0, 15.0);
            s.frame(&fig, s.config.frame_delay())?;
        }
        Ok(())
    })?;

    s.equivalent(&[r#"termgfx sparkline "..." --animate"#, "termgfx progress 75 --animate"])?;
    s.pause()
}

fn themes(s: &mut Session<'_>) -> Result<()> {
    let x = range(0, 9);
    let quadratic: Vec<f32> = x.iter().map(|i| i * i).collect();
    let linear: Vec<f32> = x.iter().map(|i| i * 8.0).collect();

    let mut fig = s.figure();
    fig.theme("pro")?;
    fig.plot()
        .add(LineSeries::new().data(&x, &quadratic).label("Quadratic").color(Rgba::RED))?
        .add(LineSeries::new().data(&x, &linear).label("Linear").color(Rgba::CYAN))?
        .title("Pro Theme with Colors")
        .legend(true);
    s.show(&fig)?;
    s.line(&format!("\nAvailable themes: {}", THEME_NAMES.join(", ")))?;
    s.pause()
}

fn markers(s: &mut Session<'_>) -> Result<()> {
    let x = range(1, 7);
    let shifted = |by: f32| -> Vec<f32> { x.iter().map(|i| i + by).collect() };

    let mut fig = s.figure();
    fig.plot()
        .add(LineSeries::new().data(&x, &shifted(0.0)).marker(Marker::Dot).label("dot"))?
        .add(LineSeries::new().data(&x, &shifted(2.0)).marker(Marker::Hd).label("hd (high-def)"))?
        .add(LineSeries::new().data(&x, &shifted(4.0)).marker(Marker::Braille).label("braille"))?
        .add(LineSeries::new().data(&x, &shifted(6.0)).marker(Marker::Fhd).label("fhd (full-hd)"))?
        .title("Different Marker Resolutions")
        .legend(true);
    s.show(&fig)?;
    s.note("Higher resolution = smoother curves but needs Unicode support")?;
    s.pause()
}

fn polar(s: &mut Session<'_>) -> Result<()> {
    let angles: Vec<f32> = (0..12).map(|i| i as f32 * 30.0).collect();
    let radii = [1.0, 3.0, 2.0, 4.0, 3.0, 5.0, 4.0, 3.0, 2.0, 4.0, 3.0, 2.0];
    let mut fig = s.figure();
    fig.plot().add(PolarSeries::new(&angles, &radii))?.title("Polar Plot");
    s.show(&fig)?;
    s.note("termgfx: Polar charts not yet supported")?;
    s.pause()
}

fn annotations(s: &mut Session<'_>) -> Result<()> {
    let mut fig = s.figure();
    fig.plot()
        .add(LineSeries::new().data(&range(1, 5), &[2.0, 4.0, 3.0, 5.0, 4.0]))?
        .add(TextAnnotation::new("Peak", 4.0, 5.0))?
        .add(TextAnnotation::new("Valley", 3.0, 3.0))?
        .title("Chart with Annotations");
    s.show(&fig)?;
    s.note("termgfx: Annotations not yet supported")?;
    s.pause()
}

fn error_bars(s: &mut Session<'_>) -> Result<()> {
    let mut fig = s.figure();
    fig.plot()
        .add(
            ErrorBarSeries::new(&range(1, 5), &[10.0, 15.0, 12.0, 18.0, 14.0])
                .yerr(&[1.0, 2.0, 1.5, 2.5, 1.0]),
        )?
        .title("Measurements with Error Bars");
    s.show(&fig)?;
    s.note("termgfx: Error bars not yet supported")?;
    s.pause()
}

fn fill_between(s: &mut Session<'_>) -> Result<()> {
    let x = range(1, 10);
    let y2: Vec<f32> = x.iter().map(|i| i.powf(1.5)).collect();
    let mut fig = s.figure();
    fig.plot().add(FillSeries::between(&x, &x, &y2))?.title("Area Between Curves");
    s.show(&fig)?;
    s.note("termgfx: Area charts not yet supported")?;
    s.pause()
}

fn streaming(s: &mut Session<'_>) -> Result<()> {
    s.line("Simulating live CPU monitoring...")?;
    s.out.flush()?;
    sleep(s.config.lead_in());

    let window = s.config.stream_window.max(1);
    let mut cpu_data: Vec<f32> = Vec::with_capacity(window + 1);
    s.hidden_cursor(|s| {
        for i in 0..s.config.stream_frames {
            let cpu = 30.0 + (i as f32 * 0.5).sin() * 20.0 + s.rng.gen_range(-10..=10) as f32;
            cpu_data.push(cpu.clamp(0.0, 100.0));
            if cpu_data.len() > window {
                cpu_data.remove(0);
            }
            let last = cpu_data.last().copied().unwrap_or_default();

            let mut fig = s.figure();
            let series =
                LineSeries::new().values(&cpu_data).marker(Marker::Braille).color(cpu_color(cpu));
            fig.plot()
                .add(series)?
                .title(format!("CPU Usage: {last:.1}%"))
                .ylim(0.0, 100.0)
                .xlim(0.0, window as f32);
            s.frame(&fig, s.config.stream_delay())?;
        }
        Ok(())
    })?;

    s.equivalent(&[r#"termgfx gauge 75 --label "CPU" --animate"#])?;
    s.pause()
}
