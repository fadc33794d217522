//! End-to-end runs of the feature tour without pauses or delays.
//!
//! Run: cargo test --test demo_run_test

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Cursor;

use termplot::demo::{Demo, DemoConfig, EnterPause, PROMPT, SEGMENTS};
use termplot::output::TerminalMode;

fn config(color: TerminalMode) -> DemoConfig {
    let mut config = DemoConfig::unattended(2024);
    config.width = Some(80);
    config.height = Some(24);
    config.color = color;
    config
}

fn run(mut demo: Demo) -> String {
    let mut out = Vec::new();
    demo.run(&mut out).expect("demo should run to completion");
    String::from_utf8(out).expect("demo output is UTF-8")
}

#[test]
fn test_full_tour_prints_every_segment() {
    let text = run(Demo::new(config(TerminalMode::Plain)));

    let mut last = 0;
    for segment in &SEGMENTS {
        let heading = format!("  {}\n", segment.heading());
        let at = text.find(&heading).unwrap_or_else(|| panic!("missing {heading:?}"));
        assert!(at > last, "{} out of order", segment.heading());
        last = at;
    }
    assert!(text.contains("TERMPLOT FEATURE SUMMARY"));
    assert!(text.contains("VERDICT:"));
    assert!(text.trim_end().ends_with("🎉 Demo complete!"));
}

#[test]
fn test_same_seed_same_output() {
    let first = run(Demo::new(config(TerminalMode::Plain)).with_segments(&[3, 4, 6]));
    let second = run(Demo::new(config(TerminalMode::Plain)).with_segments(&[3, 4, 6]));
    assert_eq!(first, second);
}

#[test]
fn test_truecolor_tour_emits_colors() {
    let text = run(Demo::new(config(TerminalMode::TrueColor)).with_segments(&[12]));
    assert!(text.contains("\x1b[38;2;"));
    assert!(text.contains("Pro Theme with Colors"));
}

#[test]
fn test_enter_pause_waits_after_every_scene() {
    // Intro, three bar scenes, two line scenes.
    let input = Cursor::new(b"\n".repeat(6));
    let text = run(Demo::new(config(TerminalMode::Plain)).pause(EnterPause::new(input)).with_segments(&[1, 2]));
    assert_eq!(text.matches(PROMPT).count(), 6);
}

#[test]
fn test_config_file_drives_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.yaml");
    std::fs::write(
        &path,
        "width: 70\nheight: 20\ncolor: plain\npause: false\nlead_in_ms: 0\nframe_delay_ms: 0\n\
         stream_delay_ms: 0\nanimation_frames: 3\nstream_frames: 5\nseed: 9\n",
    )
    .unwrap();

    let config = DemoConfig::load(&path).unwrap();
    let text = run(Demo::new(config).with_segments(&[11, 18]));
    assert!(text.contains("Live Data Stream (frame 3/3)"));
    assert!(!text.contains("frame 4/3"));
    assert_eq!(text.matches("CPU Usage: ").count(), 5);
    assert!(!text.contains("\x1b[38;"));
}
