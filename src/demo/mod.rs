//! Feature tour of the plotting library.
//!
//! The tour prints an intro banner, walks through the numbered
//! [`SEGMENTS`] and ends with a capability summary. Each scene is followed
//! by a note comparing it to the `termgfx` command line tool and a
//! [`Pause`].
//!
//! ```
//! use termplot::demo::{Demo, DemoConfig};
//!
//! let mut config = DemoConfig::unattended(7);
//! config.width = Some(60);
//! config.height = Some(18);
//! let mut out = Vec::new();
//! Demo::new(config).with_segments(&[7]).run(&mut out).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("7. HEATMAPS / MATRIX PLOTS"));
//! assert!(!text.contains("1. BAR CHARTS"));
//! ```

mod config;
mod pause;
mod segments;

pub use config::DemoConfig;
pub use pause::{EnterPause, NoPause, Pause, PROMPT};
pub use segments::{Segment, SEGMENTS};

use crate::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use segments::Session;
use std::io::Write;
use tracing::{info, warn};

/// Inner width of the intro banner.
const BANNER_WIDTH: usize = 63;

const INTRO: &str = "\nThis demo covers ALL major termplot features.\nCompare each with termgfx equivalent.\n";

const SUMMARY: &str = "
┌─────────────────────────────────────────────────────────────────┐
│                    TERMPLOT CAPABILITIES                        │
├─────────────────────────────────────────────────────────────────┤
│  ✅ Bar Charts (vertical, horizontal, stacked)                  │
│  ✅ Line Charts (single, multiple, with legend)                 │
│  ✅ Scatter Plots                                               │
│  ✅ Histograms                                                  │
│  ✅ Candlestick / OHLC Charts                                   │
│  ✅ Box Plots                                                   │
│  ✅ Heatmaps / Matrix Plots                                     │
│  ✅ Image Plots                                                 │
│  ✅ Datetime-aware Plots                                        │
│  ✅ Subplots (grid layouts)                                     │
│  ✅ Real-time Animations                                        │
│  ✅ Themes and Colors                                           │
│  ✅ Multiple Marker Types                                       │
│  ✅ Polar / Radar Charts                                        │
│  ✅ Text Annotations                                            │
│  ✅ Error Bars                                                  │
│  ✅ Fill/Area Charts                                            │
│  ✅ Streaming Data                                              │
├─────────────────────────────────────────────────────────────────┤
│  ❌ CLI interface (library plus this tour only)                 │
│  ❌ Shell script friendly                                       │
│  ❌ Styled boxes, banners                                       │
│  ❌ Interactive prompts                                         │
│  ❌ Notifications                                               │
│  ❌ Tables, Trees                                               │
│  ❌ Progress bars, spinners                                     │
└─────────────────────────────────────────────────────────────────┘

VERDICT:
  termplot is EXCELLENT for Rust applications that plot data.
  termgfx is BETTER for shell scripts and CLI usage.

  Consider adding to termgfx:
    - Scatter plots
    - Histograms
    - Stacked bar charts
    - Multiple line series
    - Polar/radar charts
    - Error bars
";

/// Runs the feature tour.
#[derive(Debug)]
pub struct Demo {
    config: DemoConfig,
    pause: Box<dyn Pause>,
    selected: Option<Vec<u8>>,
}

impl Demo {
    /// A tour over every segment. Pauses read Enter from stdin when
    /// `config.pause` is set.
    #[must_use]
    pub fn new(config: DemoConfig) -> Self {
        let pause: Box<dyn Pause> =
            if config.pause { Box::new(EnterPause::stdin()) } else { Box::new(NoPause) };
        Self { config, pause, selected: None }
    }

    /// Replace the pause between scenes.
    #[must_use]
    pub fn pause(mut self, pause: impl Pause + 'static) -> Self {
        self.pause = Box::new(pause);
        self
    }

    /// Run only the segments with these numbers, in tour order.
    ///
    /// Numbers outside the tour are ignored with a warning.
    #[must_use]
    pub fn with_segments(mut self, numbers: &[u8]) -> Self {
        let mut selected = Vec::with_capacity(numbers.len());
        for &number in numbers {
            if SEGMENTS.iter().any(|s| s.number == number) {
                selected.push(number);
            } else {
                warn!(segment = number, count = SEGMENTS.len(), "ignoring unknown demo segment");
            }
        }
        self.selected = Some(selected);
        self
    }

    /// Settings of this run.
    #[must_use]
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Segments this run will show.
    pub fn segments(&self) -> impl Iterator<Item = &'static Segment> + '_ {
        SEGMENTS
            .iter()
            .filter(move |s| self.selected.as_ref().map_or(true, |sel| sel.contains(&s.number)))
    }

    /// Print the intro, the selected segments and the summary to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing, reading a pause or building a figure
    /// fails.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let segments: Vec<&'static Segment> = self.segments().collect();
        let mut session = Session::new(out, self.pause.as_mut(), &self.config, &mut rng);

        intro(&mut session)?;
        for segment in segments {
            info!(segment = segment.number, title = segment.title, "demo segment");
            session.header(&segment.heading())?;
            segment.run(&mut session)?;
        }

        session.header("TERMPLOT FEATURE SUMMARY")?;
        session.line(SUMMARY)?;
        session.line("\n🎉 Demo complete!")?;
        Ok(())
    }
}

fn intro(session: &mut Session<'_>) -> Result<()> {
    session.clear()?;
    session.line(&banner(&["TERMPLOT FULL DEMO", "Terminal Plotting Library for Rust"]))?;
    session.line(&format!("termplot version: {}", env!("CARGO_PKG_VERSION")))?;
    session.line(INTRO)?;
    session.pause()
}

/// Double-line box with each line centred.
fn banner(lines: &[&str]) -> String {
    let rule = "═".repeat(BANNER_WIDTH);
    let mut text = format!("\n╔{rule}╗\n");
    for line in lines {
        text.push_str(&format!("║{line:^BANNER_WIDTH$}║\n"));
    }
    text.push_str(&format!("╚{rule}╝"));
    text
}
