#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for figure building and terminal encoding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use termplot::prelude::*;

fn line_figure_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_figure");

    for size in [100, 1_000, 10_000, 100_000] {
        let x_data: Vec<f32> = (0..size).map(|i| i as f32).collect();
        let y_data: Vec<f32> = (0..size).map(|i| (i as f32 * 0.01).sin() * 100.0).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut fig = Figure::new();
                fig.size(120, 40);
                fig.plot()
                    .add(LineSeries::new().data(black_box(&x_data), black_box(&y_data)))
                    .expect("series should be valid");
                fig.build().expect("figure should build")
            });
        });
    }

    group.finish();
}

fn scatter_markers_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatter_markers");

    let x_data: Vec<f32> = (0..5_000).map(|i| (i as f32 * 0.37).sin() * 50.0).collect();
    let y_data: Vec<f32> = (0..5_000).map(|i| (i as f32 * 0.11).cos() * 50.0).collect();

    for marker in [Marker::Dot, Marker::Hd, Marker::Fhd, Marker::Braille] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{marker:?}")), &marker, |b, &marker| {
            b.iter(|| {
                let mut fig = Figure::new();
                fig.size(120, 40);
                fig.plot()
                    .add(ScatterSeries::new().data(&x_data, &y_data).marker(marker))
                    .expect("series should be valid");
                fig.build().expect("figure should build")
            });
        });
    }

    group.finish();
}

fn subplot_grid_benchmark(c: &mut Criterion) {
    let samples: Vec<f32> = (0..1_000).map(|i| ((i * 7919) % 1000) as f32 / 10.0).collect();
    let matrix: Vec<Vec<f32>> = (0..20).map(|i| (0..20).map(|j| (i * j) as f32).collect()).collect();

    c.bench_function("subplots_2x2", |b| {
        b.iter(|| {
            let mut fig = Figure::new();
            fig.size(160, 48);
            fig.subplots(2, 2).unwrap();
            fig.subplot(1, 1).unwrap().add(BarSeries::new(&["a", "b", "c"], &[3.0, 5.0, 4.0])).unwrap();
            fig.subplot(1, 2).unwrap().add(Histogram::new().data(black_box(&samples))).unwrap();
            fig.subplot(2, 1).unwrap().add(MatrixSeries::new(matrix.clone())).unwrap();
            fig.subplot(2, 2).unwrap().add(BoxSeries::new(&[samples.clone()])).unwrap();
            fig.build().unwrap()
        });
    });
}

fn encoder_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoder");

    let mut fig = Figure::new();
    fig.size(200, 60);
    let y: Vec<f32> = (0..2_000).map(|i| (i as f32 * 0.02).sin()).collect();
    fig.plot().add(LineSeries::new().values(&y)).unwrap();

    for mode in [TerminalMode::Plain, TerminalMode::Ansi256, TerminalMode::TrueColor] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{mode:?}")), &mode, |b, &mode| {
            b.iter(|| fig.render(black_box(mode)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    line_figure_benchmark,
    scatter_markers_benchmark,
    subplot_grid_benchmark,
    encoder_benchmark
);
criterion_main!(benches);
