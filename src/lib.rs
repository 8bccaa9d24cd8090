//! timechart: backend-agnostic interactive time-series chart engine.
//!
//! The crate keeps a strict split between the pure chart core (dataset
//! normalization, viewport-to-pixel layout), interaction state (drag-to-zoom,
//! hover), and the render pipeline that turns mapped geometry into an ordered
//! display list. Host adapters own the drawing surface and input events; they
//! feed pointer/resize calls into [`api::ChartEngine`] and execute the
//! returned frames through a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartOptions};
pub use error::{ChartError, ChartResult};
