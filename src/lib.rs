//! # termplot
//!
//! Terminal plotting library: bar, line, scatter, histogram, candlestick,
//! box, heatmap, image, polar, error bar and area charts drawn with
//! braille and block characters, arranged in subplot grids and styled by
//! themes.
//!
//! Built on the [trueno](https://crates.io/crates/trueno) core library for
//! data reductions and on [ratatui](https://crates.io/crates/ratatui) for
//! embedding figures in terminal UIs.
//!
//! ## Features
//!
//! - **Sub-cell markers**: braille (2×4), sextant (2×3) and quadrant (2×2)
//!   glyphs merge several points into one cell
//! - **Subplots**: an even `rows × cols` grid of independent axes
//! - **Themes**: `default`, `clear`, `pro`, `matrix`, `windows`, `girly`,
//!   `dark`, `retro`
//! - **Multiple outputs**: 24-bit color, 256 colors, plain text, or a
//!   ratatui [`Widget`](ratatui::widgets::Widget)
//!
//! ## Quick Start
//!
//! ```rust
//! use termplot::prelude::*;
//!
//! let mut fig = Figure::new();
//! fig.size(60, 16);
//! fig.plot()
//!     .add(LineSeries::new().values(&[12.0, 15.0, 13.0, 18.0, 22.0]).label("temp"))?
//!     .title("Temperature")
//!     .xlabel("Month");
//! let text = fig.render(TerminalMode::Plain)?;
//! assert!(text.contains("Temperature"));
//! # Ok::<(), termplot::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `demo` (default): the `termplot-demo` feature tour binary
//!
//! ## References
//!
//! - Douglas, D. H., & Peucker, T. K. (1973). Line simplification algorithm.
//! - Liang, Y.-D., & Barsky, B. (1984). "A New Concept and Method for Line Clipping."
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and color space conversions.
pub mod color;

/// RGBA pixel buffer used as image source.
pub mod framebuffer;

/// Geometric primitives (points, cell areas).
pub mod geometry;

/// Scale functions and tick placement.
pub mod scale;

/// Sample statistics (extents, percentiles).
pub mod stats;

/// Point markers and sub-cell glyphs.
pub mod marker;

/// Character-cell drawing surface.
pub mod canvas;

/// Date parsing and formatting for date axes.
pub mod datetime;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Series types (bar, line, scatter, histogram, etc.).
pub mod plots;

/// Figures, subplots and axes layout.
pub mod figure;

/// Figure themes.
pub mod theme;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Terminal encoders and screen control.
pub mod output;

// ============================================================================
// Feature Tour
// ============================================================================

/// Guided tour of every chart type.
pub mod demo;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for termplot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use termplot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Hsla, Rgba};
    pub use crate::datetime::DateForm;
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Figure, Plot};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::marker::Marker;
    pub use crate::output::TerminalMode;
    pub use crate::plots::{
        BarSeries, BinStrategy, BoxSeries, CandlestickSeries, ErrorBarSeries, FillSeries,
        HeatmapPalette, Histogram, ImageSeries, LineSeries, MatrixSeries, Ohlc, Orientation,
        PolarSeries, ScatterSeries, Series, StackedBarSeries, TextAnnotation,
    };
    pub use crate::theme::Theme;
    pub use batuta_common::display::WithDimensions;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
