use tracing::{debug, trace};

use crate::core::{
    CanvasSize, Dataset, DateFormatter, GridSpec, Layout, LayoutParams, Margins, RawPoint,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    InteractionState, PointerEvent, PointerPhase, SelectionPhase, ViewRange, locate_hovered,
};
use crate::render::{
    ChartStyle, FrameContext, HeuristicTextMeasurer, RenderFrame, TextMeasurer,
    build_display_list,
};

use super::ChartOptions;

/// Extra room next to the measured unit suffix when deriving the left margin.
const UNIT_LABEL_PADDING: f64 = 45.0;

/// Main orchestration facade consumed by host adapters.
///
/// `ChartEngine` owns one chart's state (dataset, view range, selection,
/// pointer) and runs the synchronous layout → hover → display-list
/// recomputation for every event the host forwards. All methods return the
/// fresh frame to paint.
pub struct ChartEngine<M: TextMeasurer> {
    measurer: M,
    dataset: Option<Dataset>,
    canvas: CanvasSize,
    margins: Margins,
    grid: GridSpec,
    description: String,
    style: ChartStyle,
    formatter: DateFormatter,
    interaction: InteractionState,
}

impl ChartEngine<HeuristicTextMeasurer> {
    /// Creates an engine with the built-in heuristic text measurer.
    pub fn with_heuristic_measurer(
        points: Vec<RawPoint>,
        options: ChartOptions,
    ) -> ChartResult<Self> {
        Self::new(points, options, HeuristicTextMeasurer)
    }
}

impl<M: TextMeasurer> ChartEngine<M> {
    /// Validates the dataset and builds a ready-to-render engine.
    pub fn new(points: Vec<RawPoint>, options: ChartOptions, measurer: M) -> ChartResult<Self> {
        let dataset = Dataset::normalize(points, &options.series)?;
        let formatter = DateFormatter::with_offset_minutes(options.utc_offset_minutes)?;

        let canvas = CanvasSize::new(options.width, options.height);
        if !canvas.is_valid() {
            return Err(ChartError::Validation(format!(
                "canvas must be non-empty, got {}x{}",
                canvas.width, canvas.height
            )));
        }

        let margins = options.margins.unwrap_or_else(|| Margins {
            left: measurer.measure(&dataset.specs()[0].unit, options.style.axis_font_px)
                + UNIT_LABEL_PADDING,
            ..Margins::default()
        });

        let interaction = InteractionState::new(dataset.len());
        debug!(
            point_count = dataset.len(),
            series_count = dataset.series_count(),
            "chart engine created"
        );

        Ok(Self {
            measurer,
            dataset: Some(dataset),
            canvas,
            margins,
            grid: options.grid,
            description: options.description,
            style: options.style,
            formatter,
            interaction,
        })
    }

    /// Recomputes the display list for the current state.
    pub fn render(&self) -> ChartResult<RenderFrame> {
        self.build_frame()
    }

    /// Applies new surface dimensions and repaints.
    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<RenderFrame> {
        self.dataset()?;
        let canvas = CanvasSize::new(width, height);
        if !canvas.is_valid() {
            return Err(ChartError::Validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        self.canvas = canvas;
        trace!(width, height, "canvas resized");
        self.build_frame()
    }

    /// Starts a drag selection, superseding any drag in progress.
    pub fn pointer_down(&mut self, x: f64) -> ChartResult<RenderFrame> {
        self.dataset()?;
        let (min_x, max_x) = self.selection_bounds();
        self.interaction.pointer_down(x, min_x, max_x);
        self.build_frame()
    }

    /// Tracks the pointer for hover and, while dragging, the selection edge.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<RenderFrame> {
        self.dataset()?;
        let (min_x, max_x) = self.selection_bounds();
        self.interaction.pointer_move(x, y, min_x, max_x);
        self.build_frame()
    }

    /// Commits the drag selection into a zoomed view range.
    pub fn pointer_up(&mut self) -> ChartResult<RenderFrame> {
        self.dataset()?;
        if self.interaction.is_dragging() {
            let layout = self.compute_view_layout()?;
            if self.interaction.pointer_up(&layout.points) {
                let view = self.interaction.view();
                debug!(
                    origin_index = view.origin_index,
                    end_index = view.end_index,
                    "zoom committed"
                );
            }
        }
        self.build_frame()
    }

    /// Dispatches one unified pointer sample.
    pub fn pointer_event(&mut self, event: PointerEvent) -> ChartResult<RenderFrame> {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event.x),
            PointerPhase::Move => self.pointer_move(event.x, event.y),
            PointerPhase::Up => self.pointer_up(),
        }
    }

    /// Clears any zoom and restores the full-dataset view.
    pub fn reset(&mut self) -> ChartResult<RenderFrame> {
        self.dataset()?;
        self.interaction.reset();
        debug!("view reset");
        self.build_frame()
    }

    /// Releases dataset storage. Idempotent; every other operation on a
    /// disposed handle fails with [`ChartError::Disposed`].
    pub fn dispose(&mut self) {
        if self.dataset.take().is_some() {
            debug!("chart disposed");
        }
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.dataset.is_none()
    }

    #[must_use]
    pub fn view_range(&self) -> ViewRange {
        self.interaction.view()
    }

    #[must_use]
    pub fn selection_phase(&self) -> SelectionPhase {
        self.interaction.phase()
    }

    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    #[must_use]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// The mapped layout of the current view range, before hover flagging.
    pub fn current_layout(&self) -> ChartResult<Layout> {
        self.compute_view_layout()
    }

    fn dataset(&self) -> ChartResult<&Dataset> {
        self.dataset.as_ref().ok_or(ChartError::Disposed)
    }

    fn selection_bounds(&self) -> (f64, f64) {
        (
            self.margins.left,
            f64::from(self.canvas.width) - self.margins.right,
        )
    }

    fn layout_params(&self) -> LayoutParams {
        LayoutParams::new(self.canvas)
            .with_margins(self.margins)
            .with_grid(self.grid)
    }

    fn compute_view_layout(&self) -> ChartResult<Layout> {
        let dataset = self.dataset()?;
        let view = self.interaction.view();
        let points = &dataset.points()[view.origin_index..=view.end_index];
        match Layout::compute(points, dataset.specs(), self.layout_params()) {
            // Single-point viewport after a narrow zoom: substitute a
            // minimal span instead of surfacing the degenerate range.
            Err(ChartError::DegenerateTimeRange) => Layout::compute(
                points,
                dataset.specs(),
                self.layout_params().with_time_span_floor_ms(1),
            ),
            other => other,
        }
    }

    fn build_frame(&self) -> ChartResult<RenderFrame> {
        let dataset = self.dataset()?;
        let mut layout = self.compute_view_layout()?;
        let (pointer_x, pointer_y) = self.interaction.pointer();
        let hovered = locate_hovered(pointer_x, &layout.points);
        if let Some(index) = hovered {
            layout.points[index].is_selected = true;
        }
        let ctx = FrameContext {
            description: &self.description,
            selection: self.interaction.active_selection(),
            hovered,
            pointer_x,
            pointer_y,
            formatter: self.formatter,
            style: &self.style,
        };
        Ok(build_display_list(&layout, dataset.specs(), &ctx, &self.measurer))
    }
}
