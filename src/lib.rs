//! # anomaly-viz
//!
//! Renders an animated visualization of global temperature anomalies from a
//! public monthly dataset, producing per-frame PNG images that an external
//! tool stitches into a video.
//!
//! The pipeline is three stages:
//!
//! - **Loader** ([`dataset`]): reads the monthly CSV into an ordered
//!   sequence of `(year, month, anomaly)` records.
//! - **Interpolator** ([`series`]): expands the monthly values into a
//!   continuous day-resolution series.
//! - **Renderer** ([`animation`]): draws one colored square per year for
//!   each frame — red for warm anomalies, blue for cold, intensity scaled
//!   by magnitude — and rasterizes to a framebuffer.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use anomaly_viz::prelude::*;
//!
//! let dataset = Dataset::from_path("dataset/1880-2020.csv")?;
//! let anim = Animation::new().size(1000).duration(1080).build(dataset)?;
//!
//! let frame = anim.render_frame(0)?;
//! PngEncoder::write_to_file(&frame, "output/frames/0000000.png")?;
//! ```
//!
//! Rendering a frame is a pure function of the frame index and the built
//! configuration: repeated renders are byte-identical and frames are
//! independent of each other.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

/// Color types for frame rendering.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives for the frame layout.
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Temperature anomaly dataset loading and validation.
pub mod dataset;

/// Daily interpolation over the monthly anomaly sequence.
pub mod series;

/// Frame rendering for the anomaly animation.
pub mod animation;

/// Output encoders (PNG).
pub mod output;

/// Error types for anomaly-viz operations.
pub mod error;

pub use error::{Error, Result};

/// Commonly used types for convenient imports.
///
/// ```rust,ignore
/// use anomaly_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::{Animation, BuiltAnimation, Cell, GridLayout};
    pub use crate::color::Rgba;
    pub use crate::dataset::{AnomalyRecord, Dataset};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::output::PngEncoder;
    pub use crate::scale::{AnomalyScale, LinearScale, Scale};
    pub use crate::series::{Easing, InterpolatedSeries};
}
