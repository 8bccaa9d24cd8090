pub mod dataset;
pub mod format;
pub mod layout;

pub use dataset::{DEFAULT_PALETTE, Dataset, RawPoint, SeriesKind, SeriesOverrides, SeriesSpec};
pub use format::DateFormatter;
pub use layout::{
    CanvasSize, GridSpec, Layout, LayoutParams, MappedPoint, Margins, POINT_INSET, PixelRow,
    ValueRow,
};
