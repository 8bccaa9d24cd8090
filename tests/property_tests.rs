use proptest::prelude::*;
use timechart::api::{ChartEngine, ChartOptions};
use timechart::core::{
    CanvasSize, Dataset, Layout, LayoutParams, MappedPoint, Margins, PixelRow, RawPoint,
    SeriesOverrides, ValueRow,
};
use timechart::interaction::locate_hovered;

fn margins() -> Margins {
    Margins {
        left: 55.0,
        right: 10.0,
        top: 15.0,
        bottom: 80.0,
    }
}

fn points_from_deltas(deltas: &[i64]) -> Vec<RawPoint> {
    let mut time = 0i64;
    let mut points = vec![RawPoint::new(0, vec![0.0, 50.0])];
    for (i, delta) in deltas.iter().enumerate() {
        time += delta;
        let value = ((i * 37) % 100) as f64 - 25.0;
        points.push(RawPoint::new(time, vec![value, value / 2.0 + 10.0]));
    }
    points
}

fn synthetic_point(index: usize, screen_x: i32) -> MappedPoint {
    MappedPoint {
        time: index as i64,
        raw_values: ValueRow::new(),
        scaled_values: ValueRow::new(),
        screen_x,
        screen_y: PixelRow::new(),
        is_selected: false,
    }
}

proptest! {
    #[test]
    fn screen_x_is_monotonic_in_time(
        deltas in prop::collection::vec(1i64..10_000, 1..40),
    ) {
        let dataset = Dataset::normalize(points_from_deltas(&deltas), &SeriesOverrides::default())
            .expect("valid dataset");
        let params = LayoutParams::new(CanvasSize::new(400, 250)).with_margins(margins());
        let layout = Layout::compute(dataset.points(), dataset.specs(), params).expect("layout");

        for pair in layout.points.windows(2) {
            prop_assert!(pair[0].screen_x <= pair[1].screen_x);
        }
    }

    #[test]
    fn hover_window_is_exactly_ten_pixels(
        gaps in prop::collection::vec(21i32..200, 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        // Gaps above 20px keep the ±10px windows disjoint, so each probe
        // resolves to exactly one point.
        let mut screen_x = 30i32;
        let mut points = Vec::with_capacity(gaps.len());
        for (index, gap) in gaps.iter().enumerate() {
            screen_x += gap;
            points.push(synthetic_point(index, screen_x));
        }

        let index = pick.index(points.len());
        let x = f64::from(points[index].screen_x);
        prop_assert_eq!(locate_hovered(x - 10.0, &points), Some(index));
        prop_assert_eq!(locate_hovered(x + 10.0, &points), Some(index));
        prop_assert_eq!(locate_hovered(x, &points), Some(index));
        prop_assert_ne!(locate_hovered(x - 11.0, &points), Some(index));
        prop_assert_ne!(locate_hovered(x + 11.0, &points), Some(index));
    }

    #[test]
    fn zoom_reset_round_trip_is_bit_for_bit(
        deltas in prop::collection::vec(1i64..100_000, 2..30),
        edge_a in 55.0f64..390.0,
        edge_b in 55.0f64..390.0,
    ) {
        let options = ChartOptions::new().with_size(400, 250).with_margins(margins());
        let mut engine =
            ChartEngine::with_heuristic_measurer(points_from_deltas(&deltas), options)
                .expect("engine");

        let before = engine.pointer_move(0.0, 0.0).expect("baseline frame");

        engine.pointer_down(edge_a).expect("down");
        engine.pointer_move(edge_b, 0.0).expect("move");
        engine.pointer_up().expect("up");

        engine.reset().expect("reset");
        let after = engine.pointer_move(0.0, 0.0).expect("restored frame");

        prop_assert_eq!(before, after);
    }

    #[test]
    fn divisor_matches_pre_scaled_input(
        base in -1.0e6f64..1.0e6,
        divisor in 0.1f64..1_000.0,
    ) {
        let raw = vec![
            RawPoint::new(0, vec![base]),
            RawPoint::new(1_000, vec![base * 0.5 - 1.0]),
        ];
        let pre_scaled = vec![
            RawPoint::new(0, vec![base / divisor]),
            RawPoint::new(1_000, vec![(base * 0.5 - 1.0) / divisor]),
        ];

        let divided = Dataset::normalize(
            raw,
            &SeriesOverrides {
                divisors: vec![divisor],
                ..SeriesOverrides::default()
            },
        )
        .expect("valid dataset");
        let plain =
            Dataset::normalize(pre_scaled, &SeriesOverrides::default()).expect("valid dataset");

        let params = LayoutParams::new(CanvasSize::new(400, 250)).with_margins(margins());
        let divided_layout =
            Layout::compute(divided.points(), divided.specs(), params).expect("layout");
        let plain_layout = Layout::compute(plain.points(), plain.specs(), params).expect("layout");

        prop_assert_eq!(divided_layout.min_y, plain_layout.min_y);
        prop_assert_eq!(divided_layout.max_y, plain_layout.max_y);
        for (a, b) in divided_layout.points.iter().zip(&plain_layout.points) {
            prop_assert_eq!(&a.screen_y, &b.screen_y);
        }
    }
}
