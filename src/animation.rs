//! Frame rendering for the anomaly animation.
//!
//! Years are laid out as a square grid of cells; each frame colors every
//! year's square from the interpolated series at that frame's month
//! position. Rendering a frame is a pure function of the frame index and the
//! built configuration, so frames can be produced in any order (or in
//! parallel) and repeated renders are byte-identical.

use crate::color::Rgba;
use crate::dataset::{Dataset, MONTHS_PER_YEAR};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::scale::{AnomalyScale, Scale};
use crate::series::{Easing, InterpolatedSeries};

/// Fraction of each grid cell left empty so squares do not touch.
const CELL_INSET: f32 = 0.1;

/// Default light gray frame background.
const BACKGROUND: Rgba = Rgba::gray(245);

/// One grid cell: a year and the square it is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// The year this cell represents.
    pub year: i32,
    /// Drawing rectangle, already inset within the cell.
    pub rect: Rect,
}

/// Square grid of year cells filling the drawing area.
///
/// The grid is `dim x dim` with `dim = ceil(sqrt(year_count))`; trailing
/// grid positions past the last year stay empty.
#[derive(Debug, Clone)]
pub struct GridLayout {
    dim: u32,
    cells: Vec<Cell>,
}

impl GridLayout {
    /// Lay out `year_count` years starting at `first_year` inside `area`.
    #[must_use]
    pub fn new(first_year: i32, year_count: usize, area: Rect) -> Self {
        let dim = (year_count as f32).sqrt().ceil().max(1.0) as u32;
        let cell_size = (area.width / dim as f32).min(area.height / dim as f32);
        let inset = cell_size * CELL_INSET / 2.0;

        let mut cells = Vec::with_capacity(year_count);
        for i in 0..year_count {
            let col = (i as u32) % dim;
            let row = (i as u32) / dim;

            let outer = Rect::new(
                area.x + col as f32 * cell_size,
                area.y + row as f32 * cell_size,
                cell_size,
                cell_size,
            );

            cells.push(Cell {
                year: first_year + i as i32,
                rect: outer.inset(inset),
            });
        }

        Self { dim, cells }
    }

    /// Cells in year order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells per grid side.
    #[must_use]
    pub const fn dim(&self) -> u32 {
        self.dim
    }
}

/// Builder for the anomaly animation.
#[derive(Debug, Clone)]
pub struct Animation {
    size: u32,
    title_size: u32,
    border: f32,
    duration: u32,
    easing: Easing,
    background: Rgba,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation {
    /// Create a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            size: 1000,
            title_size: 80,
            border: 0.1,
            duration: 1080,
            easing: Easing::default(),
            background: BACKGROUND,
        }
    }

    /// Set the drawing area side in pixels.
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the title band height in pixels (0 disables the band).
    #[must_use]
    pub fn title_size(mut self, title_size: u32) -> Self {
        self.title_size = title_size;
        self
    }

    /// Set the border as a fraction of the canvas in `[0, 1)`.
    #[must_use]
    pub fn border(mut self, border: f32) -> Self {
        self.border = border;
        self
    }

    /// Set the animation length in frames.
    #[must_use]
    pub fn duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Set the within-month blend curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    /// Validate the configuration and precompute the series and layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is zero, the duration is zero, or the
    /// border is outside `[0, 1)`.
    pub fn build(self, dataset: Dataset) -> Result<BuiltAnimation> {
        if self.size == 0 {
            return Err(Error::InvalidDimensions {
                width: self.size,
                height: self.size,
            });
        }
        if self.duration == 0 {
            return Err(Error::Rendering(
                "duration must be at least one frame".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.border) {
            return Err(Error::Rendering(format!(
                "border {} outside [0, 1)",
                self.border
            )));
        }

        let canvas = self.size + self.title_size;
        let margin = canvas as f32 * self.border / 2.0;

        // Drawing area: below the title band, inset by the border margin.
        let area = Rect::new(
            self.title_size as f32 / 2.0 + margin,
            self.title_size as f32 + margin,
            self.size as f32 - 2.0 * margin,
            self.size as f32 - 2.0 * margin,
        );

        let series = InterpolatedSeries::from_dataset(&dataset, self.easing);
        let layout = GridLayout::new(dataset.first_year(), dataset.year_count(), area);

        Ok(BuiltAnimation {
            canvas,
            duration: self.duration,
            background: self.background,
            color_scale: AnomalyScale::new(),
            dataset,
            series,
            layout,
        })
    }
}

/// A validated animation ready to render frames.
#[derive(Debug, Clone)]
pub struct BuiltAnimation {
    canvas: u32,
    duration: u32,
    background: Rgba,
    color_scale: AnomalyScale,
    dataset: Dataset,
    series: InterpolatedSeries,
    layout: GridLayout,
}

impl BuiltAnimation {
    /// Canvas side in pixels (`size + title_size`).
    #[must_use]
    pub const fn canvas_size(&self) -> u32 {
        self.canvas
    }

    /// Number of frames in the animation.
    #[must_use]
    pub const fn frame_count(&self) -> u32 {
        self.duration
    }

    /// The grid layout used for every frame.
    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Render one frame of the animation.
    ///
    /// The frame index maps the animation onto one pass through the twelve
    /// months; every year's square is drawn every frame, colored from the
    /// continuous series at that year's month position.
    ///
    /// # Errors
    ///
    /// Returns an error if the framebuffer cannot be allocated.
    pub fn render_frame(&self, frame: u32) -> Result<Framebuffer> {
        let percent = frame as f32 / self.duration as f32;
        let month_in_year = percent * MONTHS_PER_YEAR as f32;

        self.render_cells(|year_index| {
            self.series
                .value_at_month(year_index as f32 * MONTHS_PER_YEAR as f32 + month_in_year)
        })
    }

    /// Render the static image of per-year mean anomalies.
    ///
    /// # Errors
    ///
    /// Returns an error if the framebuffer cannot be allocated.
    pub fn render_average(&self) -> Result<Framebuffer> {
        let means = self.dataset.normalized_yearly();
        self.render_cells(|year_index| means[year_index])
    }

    fn render_cells(&self, value_for: impl Fn(usize) -> f32) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.canvas, self.canvas)?;
        fb.clear(self.background);

        for (year_index, cell) in self.layout.cells().iter().enumerate() {
            let color = self.color_scale.scale(value_for(year_index));
            fb.blend_rect(
                cell.rect.x.round() as u32,
                cell.rect.y.round() as u32,
                cell.rect.width.round() as u32,
                cell.rect.height.round() as u32,
                color,
            );
        }

        Ok(fb)
    }
}
