use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::dataset::{RawPoint, SeriesSpec};
use crate::error::{ChartError, ChartResult};

/// Per-point row of scaled values, one entry per series.
pub type ValueRow = SmallVec<[f64; 4]>;
/// Per-point row of pixel Y coordinates, one entry per series.
pub type PixelRow = SmallVec<[i32; 4]>;

/// Horizontal inset keeping the first and last markers clear of the plot edge.
pub const POINT_INSET: f64 = 15.0;

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Plot margins in pixels.
///
/// The left margin leaves room for value labels (hosts usually derive it from
/// the measured width of the unit suffix), the bottom one for rotated time
/// labels plus the legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 55.0,
            right: 10.0,
            top: 15.0,
            bottom: 80.0,
        }
    }
}

impl Margins {
    fn validate(self, canvas: CanvasSize) -> ChartResult<()> {
        for (name, value) in [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::Validation(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.left + self.right >= f64::from(canvas.width)
            || self.top + self.bottom >= f64::from(canvas.height)
        {
            return Err(ChartError::Validation(format!(
                "margins leave no plot area inside {}x{} canvas",
                canvas.width, canvas.height
            )));
        }
        Ok(())
    }
}

/// Grid line counts per axis. Positions are evenly spaced across the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub lines_x: u32,
    pub lines_y: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            lines_x: 7,
            lines_y: 4,
        }
    }
}

impl GridSpec {
    fn validate(self) -> ChartResult<()> {
        if self.lines_x < 2 || self.lines_y < 2 {
            return Err(ChartError::Validation(
                "grid needs at least 2 lines per axis".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Inputs of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub canvas: CanvasSize,
    pub margins: Margins,
    pub grid: GridSpec,
    /// Substitute span for a zero time range. `None` keeps the strict
    /// contract: a zero span fails with [`ChartError::DegenerateTimeRange`]
    /// and the caller decides on an epsilon policy.
    pub time_span_floor_ms: Option<i64>,
}

impl LayoutParams {
    #[must_use]
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            margins: Margins::default(),
            grid: GridSpec::default(),
            time_span_floor_ms: None,
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_time_span_floor_ms(mut self, floor: i64) -> Self {
        self.time_span_floor_ms = Some(floor);
        self
    }
}

/// One viewport point mapped into pixel space.
///
/// Rebuilt on every layout pass and never persisted across passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedPoint {
    pub time: i64,
    pub raw_values: ValueRow,
    pub scaled_values: ValueRow,
    pub screen_x: i32,
    pub screen_y: PixelRow,
    pub is_selected: bool,
}

/// Immutable result of one layout pass.
///
/// Produced in a single pass and threaded as a value into the render
/// pipeline, so no mutable scale state is shared between mapping and drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub canvas: CanvasSize,
    pub margins: Margins,
    pub grid: GridSpec,
    /// Global minimum of all scaled values in the viewport.
    pub min_y: f64,
    /// Global maximum of all scaled values in the viewport.
    pub max_y: f64,
    /// Timestamp of the first viewport point.
    pub time_origin: i64,
    /// Time span used for X mapping, after any floor substitution.
    pub time_span_ms: i64,
    /// Horizontal grid spacing.
    pub step_x: f64,
    /// Vertical grid spacing.
    pub step_y: f64,
    /// Pixel Y of value zero; may lie outside the plot area.
    pub zero_y: i32,
    pub points: Vec<MappedPoint>,
}

impl Layout {
    /// Maps the viewport points into pixel space.
    ///
    /// Pure: identical inputs always produce an identical `Layout`.
    pub fn compute(
        points: &[RawPoint],
        specs: &[SeriesSpec],
        params: LayoutParams,
    ) -> ChartResult<Self> {
        if !params.canvas.is_valid() {
            return Err(ChartError::Validation(format!(
                "canvas must be non-empty, got {}x{}",
                params.canvas.width, params.canvas.height
            )));
        }
        params.margins.validate(params.canvas)?;
        params.grid.validate()?;

        if points.is_empty() {
            return Err(ChartError::Validation(
                "layout needs at least one viewport point".to_owned(),
            ));
        }
        if specs.is_empty() {
            return Err(ChartError::Validation(
                "layout needs at least one series spec".to_owned(),
            ));
        }
        for (index, point) in points.iter().enumerate() {
            if point.values.len() != specs.len() {
                return Err(ChartError::Validation(format!(
                    "point {index} has {} values, expected {}",
                    point.values.len(),
                    specs.len()
                )));
            }
        }

        let first_time = points[0].time;
        let last_time = points[points.len() - 1].time;
        let raw_span = last_time - first_time;
        if raw_span < 0 {
            return Err(ChartError::Validation(
                "viewport timestamps must be non-decreasing".to_owned(),
            ));
        }
        let time_span_ms = if raw_span == 0 {
            match params.time_span_floor_ms {
                Some(floor) if floor > 0 => floor,
                _ => return Err(ChartError::DegenerateTimeRange),
            }
        } else {
            raw_span
        };

        let canvas_w = f64::from(params.canvas.width);
        let canvas_h = f64::from(params.canvas.height);
        let plot_w = canvas_w - params.margins.left - params.margins.right;
        let plot_h = canvas_h - params.margins.top - params.margins.bottom;
        let usable_w = plot_w - 2.0 * POINT_INSET;
        if usable_w <= 0.0 {
            return Err(ChartError::Validation(format!(
                "plot width {plot_w}px cannot fit the {POINT_INSET}px point insets"
            )));
        }

        // Scale pass: per-series unit normalization plus global min/max.
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut scaled_rows: Vec<ValueRow> = Vec::with_capacity(points.len());
        for point in points {
            let mut row = ValueRow::with_capacity(specs.len());
            for (value, spec) in point.values.iter().zip(specs) {
                let scaled = value / spec.divisor;
                min_y = min_y.min(scaled);
                max_y = max_y.max(scaled);
                row.push(scaled);
            }
            scaled_rows.push(row);
        }

        // Flat data still gets a drawable band instead of a zero division.
        let y_range = if max_y == min_y { 1.0 } else { max_y - min_y };

        let map_y = |value: f64| -> i32 {
            (canvas_h - ((value - min_y) * plot_h / y_range).trunc() - params.margins.bottom) as i32
        };

        let span = time_span_ms as f64;
        let mut mapped = Vec::with_capacity(points.len());
        for (point, scaled) in points.iter().zip(scaled_rows) {
            let dt = (point.time - first_time) as f64;
            let screen_x = (params.margins.left + POINT_INSET + (dt * usable_w / span).trunc()) as i32;
            let screen_y: PixelRow = scaled.iter().map(|value| map_y(*value)).collect();
            mapped.push(MappedPoint {
                time: point.time,
                raw_values: ValueRow::from_slice(&point.values),
                scaled_values: scaled,
                screen_x,
                screen_y,
                is_selected: false,
            });
        }

        Ok(Self {
            canvas: params.canvas,
            margins: params.margins,
            grid: params.grid,
            min_y,
            max_y,
            time_origin: first_time,
            time_span_ms,
            step_x: plot_w / f64::from(params.grid.lines_x - 1),
            step_y: plot_h / f64::from(params.grid.lines_y - 1),
            zero_y: map_y(0.0),
            points: mapped,
        })
    }

    #[must_use]
    pub fn plot_left(&self) -> f64 {
        self.margins.left
    }

    #[must_use]
    pub fn plot_right(&self) -> f64 {
        f64::from(self.canvas.width) - self.margins.right
    }

    #[must_use]
    pub fn plot_top(&self) -> f64 {
        self.margins.top
    }

    #[must_use]
    pub fn plot_bottom(&self) -> f64 {
        f64::from(self.canvas.height) - self.margins.bottom
    }

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        self.plot_right() - self.plot_left()
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        self.plot_bottom() - self.plot_top()
    }

    /// True when the zero reference line lies above the plot's bottom edge;
    /// consumers skip drawing it otherwise.
    #[must_use]
    pub fn zero_line_visible(&self) -> bool {
        f64::from(self.zero_y) < self.plot_bottom()
    }
}
