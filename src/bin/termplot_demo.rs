//! termplot-demo: guided tour of every termplot chart type.
//!
//! Run: `termplot-demo`, or `termplot-demo --no-pause --segment 7` for one
//! segment without waiting for Enter.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use termplot::demo::{Demo, DemoConfig, SEGMENTS};
use termplot::output::TerminalMode;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// termplot-demo: guided tour of every termplot chart type
#[derive(Parser, Debug)]
#[command(name = "termplot-demo")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Terminal plotting feature tour", long_about = None)]
struct Cli {
    /// Config file path (default: <config dir>/termplot/demo.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not wait for Enter between scenes
    #[arg(long)]
    no_pause: bool,

    /// Run only this segment (repeatable)
    #[arg(short, long = "segment", value_name = "N")]
    segments: Vec<u8>,

    /// List the segments and exit
    #[arg(long)]
    list: bool,

    /// Seed for the random sample data
    #[arg(long)]
    seed: Option<u64>,

    /// Figure width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Figure height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Color mode: truecolor, ansi256 or plain
    #[arg(long, value_name = "MODE")]
    color: Option<TerminalMode>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// File settings overridden by flags.
    fn config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => DemoConfig::default_path()
                .filter(|path| path.exists())
                .map(DemoConfig::load_or_default)
                .unwrap_or_default(),
        };

        if self.no_pause {
            config.pause = false;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.width.is_some() {
            config.width = self.width;
        }
        if self.height.is_some() {
            config.height = self.height;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;

    if cli.list {
        for segment in &SEGMENTS {
            println!("{:>2}  {}", segment.number, segment.title);
        }
        return Ok(());
    }

    let config = cli.config()?;
    debug!(?config, "demo configuration");

    let mut demo = Demo::new(config);
    if !cli.segments.is_empty() {
        demo = demo.with_segments(&cli.segments);
    }

    let mut out = BufWriter::new(stdout().lock());
    demo.run(&mut out).context("running demo")?;
    out.flush()?;
    Ok(())
}
