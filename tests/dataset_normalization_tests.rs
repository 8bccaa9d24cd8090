use timechart::core::{DEFAULT_PALETTE, Dataset, RawPoint, SeriesKind, SeriesOverrides};
use timechart::error::ChartError;

fn three_points() -> Vec<RawPoint> {
    vec![
        RawPoint::new(0, vec![3.0, 15.0, 8.0]),
        RawPoint::new(1_000, vec![6.0, 17.0, 7.0]),
        RawPoint::new(2_000, vec![4.0, 13.0, 8.0]),
    ]
}

#[test]
fn defaults_fill_missing_metadata() {
    let dataset =
        Dataset::normalize(three_points(), &SeriesOverrides::default()).expect("valid dataset");

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.series_count(), 3);
    for (i, spec) in dataset.specs().iter().enumerate() {
        assert_eq!(spec.label, format!("input {}", i + 1));
        assert_eq!(spec.color, DEFAULT_PALETTE[i]);
        assert_eq!(spec.unit, "");
        assert_eq!(spec.kind, SeriesKind::Line);
        assert_eq!(spec.divisor, 1.0);
    }
}

#[test]
fn palette_wraps_past_its_length() {
    let columns = DEFAULT_PALETTE.len() + 1;
    let points = vec![
        RawPoint::new(0, vec![1.0; columns]),
        RawPoint::new(1, vec![2.0; columns]),
    ];
    let dataset = Dataset::normalize(points, &SeriesOverrides::default()).expect("valid dataset");

    assert_eq!(dataset.specs()[columns - 1].color, DEFAULT_PALETTE[0]);
}

#[test]
fn overrides_take_precedence_over_defaults() {
    let overrides = SeriesOverrides {
        colors: vec!["#123456".to_owned()],
        labels: vec!["load".to_owned(), "peak".to_owned()],
        units: vec!["kW".to_owned()],
        kinds: vec![SeriesKind::Line, SeriesKind::Step],
        divisors: vec![1.0, 2.0],
    };
    let dataset = Dataset::normalize(three_points(), &overrides).expect("valid dataset");

    assert_eq!(dataset.specs()[0].color, "#123456");
    assert_eq!(dataset.specs()[1].color, DEFAULT_PALETTE[1]);
    assert_eq!(dataset.specs()[0].label, "load");
    assert_eq!(dataset.specs()[2].label, "input 3");
    assert_eq!(dataset.specs()[0].unit, "kW");
    assert_eq!(dataset.specs()[1].unit, "");
    assert_eq!(dataset.specs()[1].kind, SeriesKind::Step);
    assert_eq!(dataset.specs()[2].kind, SeriesKind::Line);
    assert_eq!(dataset.specs()[1].divisor, 2.0);
    assert_eq!(dataset.specs()[2].divisor, 1.0);
}

#[test]
fn rejects_fewer_than_two_points() {
    let result = Dataset::normalize(
        vec![RawPoint::new(0, vec![1.0])],
        &SeriesOverrides::default(),
    );
    assert!(matches!(result, Err(ChartError::Validation(_))));
}

#[test]
fn rejects_ragged_value_rows() {
    let points = vec![
        RawPoint::new(0, vec![1.0, 2.0]),
        RawPoint::new(1, vec![1.0]),
    ];
    let result = Dataset::normalize(points, &SeriesOverrides::default());
    assert!(matches!(result, Err(ChartError::Validation(_))));
}

#[test]
fn rejects_metadata_longer_than_value_columns() {
    let overrides = SeriesOverrides {
        labels: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        ..SeriesOverrides::default()
    };
    let result = Dataset::normalize(three_points(), &overrides);
    assert!(matches!(result, Err(ChartError::Validation(_))));
}

#[test]
fn rejects_duplicate_timestamps() {
    let points = vec![
        RawPoint::new(0, vec![1.0]),
        RawPoint::new(0, vec![2.0]),
    ];
    let result = Dataset::normalize(points, &SeriesOverrides::default());
    assert!(matches!(result, Err(ChartError::Validation(_))));
}

#[test]
fn rejects_backwards_timestamps() {
    let points = vec![
        RawPoint::new(1_000, vec![1.0]),
        RawPoint::new(0, vec![2.0]),
    ];
    let result = Dataset::normalize(points, &SeriesOverrides::default());
    assert!(matches!(result, Err(ChartError::Validation(_))));
}

#[test]
fn rejects_non_positive_divisor() {
    let overrides = SeriesOverrides {
        divisors: vec![0.0],
        ..SeriesOverrides::default()
    };
    let result = Dataset::normalize(three_points(), &overrides);
    assert!(matches!(result, Err(ChartError::Validation(_))));
}

#[test]
fn rejects_non_finite_values() {
    let points = vec![
        RawPoint::new(0, vec![1.0]),
        RawPoint::new(1, vec![f64::NAN]),
    ];
    let result = Dataset::normalize(points, &SeriesOverrides::default());
    assert!(matches!(result, Err(ChartError::Validation(_))));
}
