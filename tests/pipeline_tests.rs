use approx::assert_relative_eq;
use timechart::core::{
    CanvasSize, Dataset, DateFormatter, Layout, LayoutParams, Margins, RawPoint, SeriesKind,
    SeriesOverrides,
};
use timechart::interaction::SelectionRect;
use timechart::render::{
    ChartStyle, DrawCommand, FrameContext, HeuristicTextMeasurer, RenderFrame,
    build_display_list,
};

fn margins() -> Margins {
    Margins {
        left: 55.0,
        right: 10.0,
        top: 15.0,
        bottom: 80.0,
    }
}

fn scenario_dataset() -> Dataset {
    let points = vec![
        RawPoint::new(0, vec![3.0, 15.0, 8.0]),
        RawPoint::new(1_000, vec![6.0, 17.0, 7.0]),
        RawPoint::new(2_000, vec![4.0, 13.0, 8.0]),
    ];
    let overrides = SeriesOverrides {
        kinds: vec![SeriesKind::Line, SeriesKind::Step, SeriesKind::Line],
        units: vec!["kW".to_owned()],
        ..SeriesOverrides::default()
    };
    Dataset::normalize(points, &overrides).expect("valid dataset")
}

fn scenario_layout(dataset: &Dataset) -> Layout {
    let params = LayoutParams::new(CanvasSize::new(400, 250)).with_margins(margins());
    Layout::compute(dataset.points(), dataset.specs(), params).expect("layout")
}

fn idle_context(style: &ChartStyle) -> FrameContext<'_> {
    FrameContext {
        description: "",
        selection: None,
        hovered: None,
        pointer_x: 0.0,
        pointer_y: 0.0,
        formatter: DateFormatter::utc(),
        style,
    }
}

fn build_idle_frame() -> RenderFrame {
    let dataset = scenario_dataset();
    let layout = scenario_layout(&dataset);
    let style = ChartStyle::default();
    let frame = build_display_list(
        &layout,
        dataset.specs(),
        &idle_context(&style),
        &HeuristicTextMeasurer,
    );
    frame.validate().expect("valid frame");
    frame
}

fn tags(frame: &RenderFrame) -> String {
    frame
        .commands
        .iter()
        .map(|command| match command {
            DrawCommand::Clear { .. } => 'C',
            DrawCommand::Line(_) => 'L',
            DrawCommand::Polyline(_) => 'P',
            DrawCommand::Rect(_) => 'R',
            DrawCommand::Circle(_) => 'O',
            DrawCommand::Text(_) => 'T',
        })
        .collect()
}

#[test]
fn command_sequence_follows_draw_order() {
    let frame = build_idle_frame();

    // clear, 4 + 7 grid lines, 3 polylines, 9 markers, 4 value labels,
    // 14 tick labels, then one text/swatch-line/dot triple per legend entry.
    let expected = format!(
        "C{}{}{}{}{}",
        "L".repeat(11),
        "P".repeat(3),
        "O".repeat(9),
        "T".repeat(18),
        "TLO".repeat(3),
    );
    assert_eq!(tags(&frame), expected);
}

#[test]
fn boundary_grid_lines_are_emphasized() {
    let frame = build_idle_frame();
    let lines: Vec<_> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
        .collect();

    // Horizontal lines come first, topmost emphasized.
    assert_eq!(lines[0].stroke.width, 1.0);
    for line in &lines[1..4] {
        assert_eq!(line.stroke.width, 0.2);
    }
    // Vertical lines follow, rightmost emphasized.
    for line in &lines[4..10] {
        assert_eq!(line.stroke.width, 0.2);
    }
    assert_eq!(lines[10].stroke.width, 1.0);
    assert_eq!(lines[10].x1, 390.0);
}

#[test]
fn line_series_connects_points_directly() {
    let frame = build_idle_frame();
    let polylines: Vec<_> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Polyline(polyline) => Some(polyline),
            _ => None,
        })
        .collect();
    assert_eq!(polylines.len(), 3);

    assert_eq!(
        polylines[0].vertices,
        vec![(70.0, 170.0), (222.0, 137.0), (375.0, 159.0)]
    );
}

#[test]
fn step_series_holds_value_then_jumps() {
    let frame = build_idle_frame();
    let polylines: Vec<_> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Polyline(polyline) => Some(polyline),
            _ => None,
        })
        .collect();

    // Series 1 is Step: horizontal hold to the new x at the previous value,
    // then a vertical jump, at every point including index 2.
    assert_eq!(
        polylines[1].vertices,
        vec![
            (70.0, 38.0),
            (222.0, 38.0),
            (222.0, 15.0),
            (375.0, 15.0),
            (375.0, 60.0),
        ]
    );
}

#[test]
fn zero_line_skipped_when_zero_is_off_screen() {
    let frame = build_idle_frame();
    let dashed = frame.commands.iter().any(|command| {
        matches!(command, DrawCommand::Line(line) if line.dash.is_some())
    });
    assert!(!dashed);
}

#[test]
fn zero_line_dashed_inside_the_plot() {
    let points = vec![
        RawPoint::new(0, vec![-5.0]),
        RawPoint::new(1_000, vec![5.0]),
    ];
    let dataset = Dataset::normalize(points, &SeriesOverrides::default()).expect("valid dataset");
    let layout = scenario_layout(&dataset);
    let style = ChartStyle::default();
    let frame = build_display_list(
        &layout,
        dataset.specs(),
        &idle_context(&style),
        &HeuristicTextMeasurer,
    );

    let zero_line = frame
        .commands
        .iter()
        .find_map(|command| match command {
            DrawCommand::Line(line) if line.dash.is_some() => Some(line),
            _ => None,
        })
        .expect("dashed zero line");
    assert_eq!(zero_line.y1, 93.0);
    assert_eq!(zero_line.x1, 56.0);
    assert_eq!(zero_line.x2, 389.0);
}

#[test]
fn hover_adds_highlight_grown_marker_and_tooltip() {
    let dataset = scenario_dataset();
    let mut layout = scenario_layout(&dataset);
    layout.points[1].is_selected = true;
    let style = ChartStyle::default();
    let ctx = FrameContext {
        description: "",
        selection: None,
        hovered: Some(1),
        pointer_x: 222.0,
        pointer_y: 100.0,
        formatter: DateFormatter::utc(),
        style: &style,
    };
    let frame = build_display_list(&layout, dataset.specs(), &ctx, &HeuristicTextMeasurer);
    frame.validate().expect("valid frame");

    let highlight = frame
        .commands
        .iter()
        .find_map(|command| match command {
            DrawCommand::Line(line) if line.stroke.width == 3.0 && line.x1 == line.x2 => Some(line),
            _ => None,
        })
        .expect("hover highlight");
    assert_eq!(highlight.x1, 222.0);
    assert_eq!(highlight.y1, 16.0);
    assert_eq!(highlight.y2, 169.0);

    // Markers only; legend dots sit below the plot area.
    let radii: Vec<f64> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Circle(circle) if circle.cy < 200.0 => Some(circle.radius),
            _ => None,
        })
        .collect();
    assert_eq!(radii.iter().filter(|r| **r == 6.0).count(), 3);
    assert_eq!(radii.iter().filter(|r| **r == 4.0).count(), 6);

    // Tooltip box sits right of the cursor and fits three value rows.
    let tooltip = frame
        .commands
        .iter()
        .find_map(|command| match command {
            DrawCommand::Rect(rect) if rect.stroke.is_some() => Some(rect),
            _ => None,
        })
        .expect("tooltip box");
    assert_eq!(tooltip.x, 232.0);
    assert_eq!(tooltip.y, 110.0);
    assert_eq!(tooltip.width, 140.0);
    assert_eq!(tooltip.height, 90.0);

    // Rows are sorted descending by raw value: 17, 7, then 6.
    let row_labels: Vec<&str> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text(text) if text.text.ends_with(':') => Some(text.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(row_labels, vec!["input 2:", "input 3:", "input 1:"]);

    let row_values: Vec<&str> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text(text) if text.bold && text.rotation_deg == 0.0 => {
                Some(text.text.as_str())
            }
            _ => None,
        })
        .filter(|text| !text.starts_with("input"))
        .collect();
    // Header time first, then the sorted values with series-0's unit suffix.
    assert_eq!(row_values, vec!["00:00:01", "17 ", "7 ", "6 kW"]);
}

#[test]
fn tooltip_flips_left_near_the_right_margin() {
    let dataset = scenario_dataset();
    let mut layout = scenario_layout(&dataset);
    layout.points[2].is_selected = true;
    let style = ChartStyle::default();
    let ctx = FrameContext {
        description: "",
        selection: None,
        hovered: Some(2),
        pointer_x: 380.0,
        pointer_y: 50.0,
        formatter: DateFormatter::utc(),
        style: &style,
    };
    let frame = build_display_list(&layout, dataset.specs(), &ctx, &HeuristicTextMeasurer);

    let tooltip = frame
        .commands
        .iter()
        .find_map(|command| match command {
            DrawCommand::Rect(rect) if rect.stroke.is_some() => Some(rect),
            _ => None,
        })
        .expect("tooltip box");
    assert_eq!(tooltip.x, 380.0 - 5.0 - 140.0);
    assert!(tooltip.x + tooltip.width < 380.0);
}

#[test]
fn drag_selection_is_painted_last() {
    let dataset = scenario_dataset();
    let layout = scenario_layout(&dataset);
    let style = ChartStyle::default();
    let ctx = FrameContext {
        description: "",
        selection: Some(SelectionRect { x1: 120.0, x2: 60.0 }),
        hovered: None,
        pointer_x: 60.0,
        pointer_y: 0.0,
        formatter: DateFormatter::utc(),
        style: &style,
    };
    let frame = build_display_list(&layout, dataset.specs(), &ctx, &HeuristicTextMeasurer);

    let last = frame.commands.last().expect("non-empty frame");
    match last {
        DrawCommand::Rect(rect) => {
            assert_eq!(rect.x, 60.0);
            assert_eq!(rect.width, 60.0);
            assert_eq!(rect.y, 15.0);
            assert_eq!(rect.height, 155.0);
            assert_eq!(rect.fill, Some(style.selection_fill));
        }
        other => panic!("expected selection rect last, got {other:?}"),
    }
}

#[test]
fn legend_group_is_horizontally_centered() {
    let frame = build_idle_frame();
    let legend_texts: Vec<_> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text(text) if text.bold => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(legend_texts.len(), 3);

    // Each "input N" label measures 7 * 0.6 * 14 = 58.8px under the
    // heuristic measurer, so the 326.4px group starts at 36.8.
    assert_relative_eq!(legend_texts[0].x, 86.8, epsilon = 1e-9);
    assert_relative_eq!(legend_texts[1].x, 86.8 + 108.8, epsilon = 1e-9);
    assert_relative_eq!(legend_texts[2].x, 86.8 + 2.0 * 108.8, epsilon = 1e-9);
    assert_eq!(legend_texts[0].y, 246.0);
}

#[test]
fn value_labels_span_min_to_max_with_unit_suffix() {
    let frame = build_idle_frame();
    let value_labels: Vec<_> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text(text) if text.text.ends_with("kW") => Some(text),
            _ => None,
        })
        .collect();

    let texts: Vec<&str> = value_labels.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["3kW", "7kW", "12kW", "17kW"]);
    // Bottom label sits on the plot bottom, top label on the plot top.
    assert_eq!(value_labels[0].y, 170.0);
    assert_relative_eq!(value_labels[3].y, 15.0, epsilon = 1e-9);
    assert_eq!(value_labels[0].x, 52.0);
}

#[test]
fn tick_labels_are_rotated_pairs() {
    let frame = build_idle_frame();
    let rotated: Vec<_> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text(text) if text.rotation_deg == 300.0 => Some(text),
            _ => None,
        })
        .collect();

    // 7 ticks, each a date line plus a time line.
    assert_eq!(rotated.len(), 14);
    assert_eq!(rotated[0].text, "1970/1/1");
    assert_eq!(rotated[1].text, "00:00:00");
    // Last tick lands on the final viewport timestamp (2000ms).
    assert_eq!(rotated[13].text, "00:00:02");
}

#[test]
fn description_adds_rotated_title() {
    let dataset = scenario_dataset();
    let layout = scenario_layout(&dataset);
    let style = ChartStyle::default();
    let ctx = FrameContext {
        description: "power draw",
        ..idle_context(&style)
    };
    let frame = build_display_list(&layout, dataset.specs(), &ctx, &HeuristicTextMeasurer);

    let title = frame
        .commands
        .iter()
        .find_map(|command| match command {
            DrawCommand::Text(text) if text.rotation_deg == 270.0 => Some(text),
            _ => None,
        })
        .expect("axis title");
    assert_eq!(title.text, "power draw");
    assert_eq!(title.font_size_px, 20.0);
    // Centered on the plot's vertical extent.
    assert_relative_eq!(title.y, (15.0 + 170.0) / 2.0);
}
