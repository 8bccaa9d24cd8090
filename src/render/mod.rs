mod frame;
mod measure;
mod null_renderer;
mod pipeline;
mod primitives;
mod style;

pub use frame::{DrawCommand, RenderFrame};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use null_renderer::NullRenderer;
pub use pipeline::{FrameContext, build_display_list};
pub use primitives::{
    CirclePrimitive, Color, DashPattern, LinePrimitive, PolylinePrimitive, RectPrimitive, Stroke,
    TextHAlign, TextPrimitive,
};
pub use style::ChartStyle;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic [`RenderFrame`] so
/// drawing code remains isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
