use serde::{Deserialize, Serialize};

use crate::render::{Color, DashPattern};

/// Visual tuning for the render pipeline.
///
/// Defaults reproduce the stock look: faint black grid with emphasized
/// boundary lines, dashed light-blue zero line, rose hover highlight, and a
/// translucent blue drag selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Background for the clear command; `None` clears to transparent.
    pub background: Option<Color>,
    pub title_color: Color,
    pub title_font_px: f64,
    pub grid_color: Color,
    pub grid_boundary_width: f64,
    pub grid_interior_width: f64,
    pub series_stroke_width: f64,
    pub zero_line_color: Color,
    pub zero_line_dash: DashPattern,
    pub highlight_color: Color,
    pub highlight_width: f64,
    pub marker_radius: f64,
    pub marker_radius_hovered: f64,
    pub axis_font_px: f64,
    pub axis_text_color: Color,
    pub legend_font_px: f64,
    pub tooltip_font_px: f64,
    pub tooltip_width: f64,
    pub tooltip_line_height: f64,
    pub tooltip_fill: Color,
    pub tooltip_border: Color,
    pub tooltip_time_color: Color,
    pub selection_fill: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: None,
            title_color: Color::from_rgb8(0x00, 0x45, 0x8B),
            title_font_px: 20.0,
            grid_color: Color::BLACK,
            grid_boundary_width: 1.0,
            grid_interior_width: 0.2,
            series_stroke_width: 1.0,
            zero_line_color: Color::from_rgb8(0x4A, 0xA8, 0xFF),
            zero_line_dash: DashPattern { on: 5.0, off: 10.0 },
            highlight_color: Color::from_rgb8(0xEB, 0xC1, 0xBE),
            highlight_width: 3.0,
            marker_radius: 4.0,
            marker_radius_hovered: 6.0,
            axis_font_px: 12.0,
            axis_text_color: Color::BLACK,
            legend_font_px: 14.0,
            tooltip_font_px: 14.0,
            tooltip_width: 140.0,
            tooltip_line_height: 20.0,
            tooltip_fill: Color::WHITE.with_alpha(0.9),
            tooltip_border: Color::from_rgb8(0x00, 0x00, 0xFF),
            tooltip_time_color: Color::from_rgb8(0xFF, 0x00, 0x00),
            selection_fill: Color::from_rgb8(0x00, 0x00, 0xFF).with_alpha(0.1),
        }
    }
}
