//! Turns one layout pass into the ordered display list.
//!
//! Draw order is the visual precedence contract: grid under series, markers
//! over series, tooltip over everything except the live drag selection.

use ordered_float::OrderedFloat;

use crate::core::{DateFormatter, Layout, SeriesKind, SeriesSpec};
use crate::interaction::SelectionRect;
use crate::render::{
    ChartStyle, CirclePrimitive, Color, DrawCommand, LinePrimitive, PolylinePrimitive,
    RectPrimitive, RenderFrame, Stroke, TextHAlign, TextMeasurer, TextPrimitive,
};

/// Horizontal space reserved per legend entry in addition to its label.
const LEGEND_CELL: f64 = 50.0;
/// Swatch line padding inside a legend cell.
const LEGEND_PAD_LEFT: f64 = 10.0;
const LEGEND_PAD_RIGHT: f64 = 5.0;
/// Rotation applied to X-axis tick labels.
const TICK_ROTATION_DEG: f64 = 300.0;
/// Local offset of the time line below the date line of one tick, before
/// rotation.
const TICK_TIME_OFFSET: (f64, f64) = (25.0, 12.0);

/// Per-frame inputs that are not part of the layout.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Vertical axis title; empty string draws nothing.
    pub description: &'a str,
    /// Live drag rectangle, present only while dragging.
    pub selection: Option<SelectionRect>,
    /// Index of the hovered point in the layout's point list.
    pub hovered: Option<usize>,
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub formatter: DateFormatter,
    pub style: &'a ChartStyle,
}

/// Builds the ordered display list for one frame.
///
/// Pure geometry derivation: no I/O, no event handling, all text extents
/// come from the injected measurer.
#[must_use]
pub fn build_display_list(
    layout: &Layout,
    specs: &[SeriesSpec],
    ctx: &FrameContext<'_>,
    measurer: &dyn TextMeasurer,
) -> RenderFrame {
    let style = ctx.style;
    let mut frame = RenderFrame::new(layout.canvas);

    frame.push(DrawCommand::Clear {
        color: style.background,
    });

    push_title(&mut frame, layout, ctx);
    push_grid(&mut frame, layout, style);
    push_series_polylines(&mut frame, layout, specs, style);
    push_zero_line(&mut frame, layout, style);
    push_hover_highlight(&mut frame, layout, style);
    push_markers(&mut frame, layout, specs, style);
    push_value_labels(&mut frame, layout, specs, style);
    push_time_labels(&mut frame, layout, ctx);
    push_legend(&mut frame, layout, specs, style, measurer);
    push_tooltip(&mut frame, layout, specs, ctx, measurer);
    push_selection(&mut frame, layout, ctx);

    frame
}

fn series_color(spec: &SeriesSpec) -> Color {
    Color::parse_hex(&spec.color).unwrap_or(Color::BLACK)
}

fn push_title(frame: &mut RenderFrame, layout: &Layout, ctx: &FrameContext<'_>) {
    if ctx.description.is_empty() {
        return;
    }
    let mid_y = (layout.plot_top() + layout.plot_bottom()) / 2.0;
    frame.push(DrawCommand::Text(
        TextPrimitive::new(
            ctx.description,
            15.0,
            mid_y,
            ctx.style.title_font_px,
            ctx.style.title_color,
        )
        .aligned(TextHAlign::Center)
        .rotated(270.0),
    ));
}

fn push_grid(frame: &mut RenderFrame, layout: &Layout, style: &ChartStyle) {
    // Horizontal lines first, top to bottom; the topmost boundary line is
    // emphasized. The left overhang leaves a short tick next to the value
    // labels.
    for i in 0..layout.grid.lines_y {
        let y = layout.plot_top() + layout.step_y * f64::from(i);
        let width = if i == 0 {
            style.grid_boundary_width
        } else {
            style.grid_interior_width
        };
        frame.push(DrawCommand::Line(LinePrimitive::new(
            layout.plot_left() - 7.0,
            y,
            layout.plot_right(),
            y,
            Stroke::new(width, style.grid_color),
        )));
    }

    // Vertical lines, left to right; the rightmost boundary line is
    // emphasized.
    for i in 0..layout.grid.lines_x {
        let x = layout.plot_left() + layout.step_x * f64::from(i);
        let width = if i == layout.grid.lines_x - 1 {
            style.grid_boundary_width
        } else {
            style.grid_interior_width
        };
        frame.push(DrawCommand::Line(LinePrimitive::new(
            x,
            layout.plot_top(),
            x,
            layout.plot_bottom(),
            Stroke::new(width, style.grid_color),
        )));
    }
}

fn push_series_polylines(
    frame: &mut RenderFrame,
    layout: &Layout,
    specs: &[SeriesSpec],
    style: &ChartStyle,
) {
    if layout.points.len() < 2 {
        return;
    }
    for (series, spec) in specs.iter().enumerate() {
        let mut vertices = Vec::with_capacity(match spec.kind {
            SeriesKind::Line => layout.points.len(),
            SeriesKind::Step => layout.points.len() * 2 - 1,
        });
        let first = &layout.points[0];
        vertices.push((f64::from(first.screen_x), f64::from(first.screen_y[series])));
        for pair in layout.points.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);
            let x = f64::from(current.screen_x);
            if spec.kind == SeriesKind::Step {
                // Hold the previous value until the new X, then jump.
                vertices.push((x, f64::from(previous.screen_y[series])));
            }
            vertices.push((x, f64::from(current.screen_y[series])));
        }
        frame.push(DrawCommand::Polyline(PolylinePrimitive::new(
            vertices,
            Stroke::new(style.series_stroke_width, series_color(spec)),
        )));
    }
}

fn push_zero_line(frame: &mut RenderFrame, layout: &Layout, style: &ChartStyle) {
    if !layout.zero_line_visible() {
        return;
    }
    let y = f64::from(layout.zero_y);
    frame.push(DrawCommand::Line(
        LinePrimitive::new(
            layout.plot_left() + 1.0,
            y,
            layout.plot_right() - 1.0,
            y,
            Stroke::new(1.0, style.zero_line_color),
        )
        .with_dash(style.zero_line_dash),
    ));
}

fn push_hover_highlight(frame: &mut RenderFrame, layout: &Layout, style: &ChartStyle) {
    for point in &layout.points {
        if !point.is_selected {
            continue;
        }
        let x = f64::from(point.screen_x);
        frame.push(DrawCommand::Line(LinePrimitive::new(
            x,
            layout.plot_top() + 1.0,
            x,
            layout.plot_bottom() - 1.0,
            Stroke::new(style.highlight_width, style.highlight_color),
        )));
    }
}

fn push_markers(
    frame: &mut RenderFrame,
    layout: &Layout,
    specs: &[SeriesSpec],
    style: &ChartStyle,
) {
    for point in &layout.points {
        let radius = if point.is_selected {
            style.marker_radius_hovered
        } else {
            style.marker_radius
        };
        for (series, spec) in specs.iter().enumerate() {
            let color = series_color(spec);
            frame.push(DrawCommand::Circle(
                CirclePrimitive::filled(
                    f64::from(point.screen_x),
                    f64::from(point.screen_y[series]),
                    radius,
                    color,
                )
                .with_stroke(Stroke::new(1.0, color)),
            ));
        }
    }
}

fn push_value_labels(
    frame: &mut RenderFrame,
    layout: &Layout,
    specs: &[SeriesSpec],
    style: &ChartStyle,
) {
    let unit = &specs[0].unit;
    let step_value = (layout.max_y - layout.min_y) / f64::from(layout.grid.lines_y - 1);
    for i in 0..layout.grid.lines_y {
        let value = (layout.min_y + step_value * f64::from(i)).trunc() as i64;
        frame.push(DrawCommand::Text(
            TextPrimitive::new(
                format!("{value}{unit}"),
                layout.plot_left() - 3.0,
                layout.plot_bottom() - layout.step_y * f64::from(i),
                style.axis_font_px,
                style.axis_text_color,
            )
            .aligned(TextHAlign::Right),
        ));
    }
}

fn push_time_labels(frame: &mut RenderFrame, layout: &Layout, ctx: &FrameContext<'_>) {
    let style = ctx.style;
    let first_time = layout.points[0].time;
    let last_time = layout.points[layout.points.len() - 1].time;
    let step_time = (last_time - first_time) as f64 / f64::from(layout.grid.lines_x - 1);

    // The two lines of one tick keep their relative placement under
    // rotation, so the time anchor is the date anchor plus the local offset
    // rotated by the same angle.
    let theta = TICK_ROTATION_DEG.to_radians();
    let (u, v) = TICK_TIME_OFFSET;
    let time_dx = u * theta.cos() - v * theta.sin();
    let time_dy = u * theta.sin() + v * theta.cos();

    for i in 0..layout.grid.lines_x {
        let timestamp = first_time + (step_time * f64::from(i)).trunc() as i64;
        let anchor_x = layout.plot_left() - 35.0 + layout.step_x * f64::from(i);
        let anchor_y = layout.plot_bottom() + 60.0;
        frame.push(DrawCommand::Text(
            TextPrimitive::new(
                ctx.formatter.format_date(timestamp),
                anchor_x,
                anchor_y,
                style.axis_font_px,
                style.axis_text_color,
            )
            .rotated(TICK_ROTATION_DEG),
        ));
        frame.push(DrawCommand::Text(
            TextPrimitive::new(
                ctx.formatter.format_time(timestamp),
                anchor_x + time_dx,
                anchor_y + time_dy,
                style.axis_font_px,
                style.axis_text_color,
            )
            .rotated(TICK_ROTATION_DEG),
        ));
    }
}

fn push_legend(
    frame: &mut RenderFrame,
    layout: &Layout,
    specs: &[SeriesSpec],
    style: &ChartStyle,
    measurer: &dyn TextMeasurer,
) {
    let canvas_w = f64::from(layout.canvas.width);
    let canvas_h = f64::from(layout.canvas.height);
    let font = style.legend_font_px;

    let box_size: f64 = specs
        .iter()
        .map(|spec| measurer.measure(&spec.label, font) + LEGEND_CELL)
        .sum();
    let box_x = (canvas_w - box_size) / 2.0;

    let mut text_x = 0.0;
    for (i, spec) in specs.iter().enumerate() {
        text_x += if i > 0 {
            measurer.measure(&specs[i - 1].label, font) + LEGEND_CELL
        } else {
            LEGEND_CELL
        };
        let color = series_color(spec);

        frame.push(DrawCommand::Text(
            TextPrimitive::new(
                spec.label.clone(),
                box_x + text_x,
                canvas_h - 4.0,
                font,
                style.axis_text_color,
            )
            .bold(),
        ));

        let swatch_y = canvas_h - 8.0;
        let swatch_start = box_x + text_x - LEGEND_CELL + LEGEND_PAD_LEFT;
        let swatch_end = box_x + text_x - LEGEND_PAD_RIGHT;
        frame.push(DrawCommand::Line(LinePrimitive::new(
            swatch_start,
            swatch_y,
            swatch_end,
            swatch_y,
            Stroke::new(3.0, color),
        )));
        frame.push(DrawCommand::Circle(
            CirclePrimitive::filled(
                swatch_start + (LEGEND_CELL - LEGEND_PAD_LEFT - LEGEND_PAD_RIGHT) / 2.0,
                swatch_y,
                4.0,
                color,
            )
            .with_stroke(Stroke::new(3.0, color)),
        ));
    }
}

fn push_tooltip(
    frame: &mut RenderFrame,
    layout: &Layout,
    specs: &[SeriesSpec],
    ctx: &FrameContext<'_>,
    measurer: &dyn TextMeasurer,
) {
    let Some(hovered) = ctx.hovered else {
        return;
    };
    let Some(point) = layout.points.get(hovered) else {
        return;
    };
    let style = ctx.style;
    let canvas_w = f64::from(layout.canvas.width);
    let font = style.tooltip_font_px;
    let line_height = style.tooltip_line_height;
    let top_pad = 10.0;
    let box_height = specs.len() as f64 * line_height + line_height + top_pad;

    // Flip to the cursor's left when the box would clip past the right margin.
    let x_offset = if ctx.pointer_x > canvas_w - layout.margins.right - style.tooltip_width {
        -5.0 - style.tooltip_width
    } else {
        10.0
    };
    let box_x = ctx.pointer_x + x_offset;
    let box_y = ctx.pointer_y + 10.0;

    frame.push(DrawCommand::Rect(
        RectPrimitive::filled(box_x, box_y, style.tooltip_width, box_height, style.tooltip_fill)
            .with_stroke(Stroke::new(1.0, style.tooltip_border)),
    ));

    let header_y = ctx.pointer_y + top_pad + line_height;
    frame.push(DrawCommand::Text(TextPrimitive::new(
        ctx.formatter.format_date(point.time),
        box_x + 5.0,
        header_y,
        font,
        style.axis_text_color,
    )));
    frame.push(DrawCommand::Text(
        TextPrimitive::new(
            ctx.formatter.format_time(point.time),
            box_x + 80.0,
            header_y,
            font,
            style.tooltip_time_color,
        )
        .bold(),
    ));

    let mut rows: Vec<(f64, &SeriesSpec)> = point
        .raw_values
        .iter()
        .copied()
        .zip(specs)
        .collect();
    rows.sort_by_key(|(value, _)| std::cmp::Reverse(OrderedFloat(*value)));

    let mut value_y = ctx.pointer_y + top_pad + line_height * 2.0;
    for (value, spec) in rows {
        let label_width = measurer.measure(&spec.label, font) + 10.0;
        frame.push(DrawCommand::Text(TextPrimitive::new(
            format!("{}:", spec.label),
            box_x + 5.0,
            value_y,
            font,
            series_color(spec),
        )));
        frame.push(DrawCommand::Text(
            TextPrimitive::new(
                format!("{} {}", value, spec.unit),
                box_x + label_width,
                value_y,
                font,
                style.axis_text_color,
            )
            .bold(),
        ));
        value_y += line_height;
    }
}

fn push_selection(frame: &mut RenderFrame, layout: &Layout, ctx: &FrameContext<'_>) {
    let Some(selection) = ctx.selection else {
        return;
    };
    let (low, high) = selection.normalized();
    frame.push(DrawCommand::Rect(RectPrimitive::filled(
        low,
        layout.plot_top(),
        high - low,
        layout.plot_height(),
        ctx.style.selection_fill,
    )));
}
