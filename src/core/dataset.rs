use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Default series palette, strongest hues first.
pub const DEFAULT_PALETTE: [&str; 9] = [
    "#00458B", // blue (strong)
    "#FB8122", // orange (strong)
    "#3EB650", // green (strong)
    "#5626C4", // violet (middle)
    "#2CCCC3", // ocean (middle)
    "#FCC133", // yellow (middle)
    "#E5BACE", // pink (light)
    "#8DA242", // olive (light)
    "#7DA2A9", // grey (light)
];

/// One sample shared by every series: a millisecond timestamp plus one value
/// per value column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub time: i64,
    pub values: Vec<f64>,
}

impl RawPoint {
    #[must_use]
    pub fn new(time: i64, values: Vec<f64>) -> Self {
        Self { time, values }
    }
}

/// Rendering style of one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeriesKind {
    /// Direct interpolation between consecutive points.
    #[default]
    Line,
    /// Holds the previous value flat until the new time, then jumps.
    Step,
}

/// Resolved per-series presentation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub label: String,
    pub color: String,
    pub unit: String,
    pub kind: SeriesKind,
    /// Scale factor normalizing this series onto the shared Y axis.
    pub divisor: f64,
}

/// Optional per-series overrides supplied by the host.
///
/// Each array is positional; entries beyond its length fall back to defaults.
/// An array longer than the dataset's value-column count is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesOverrides {
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub units: Vec<String>,
    #[serde(default)]
    pub kinds: Vec<SeriesKind>,
    #[serde(default)]
    pub divisors: Vec<f64>,
}

/// Validated, fully defaulted dataset owned by one chart instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    points: Vec<RawPoint>,
    specs: Vec<SeriesSpec>,
}

impl Dataset {
    /// Validates raw input and resolves per-series metadata.
    ///
    /// Rejects datasets with fewer than two points, ragged value rows,
    /// non-finite values, non-increasing timestamps, override arrays longer
    /// than the value-column count, and non-positive divisors.
    pub fn normalize(points: Vec<RawPoint>, overrides: &SeriesOverrides) -> ChartResult<Self> {
        if points.len() < 2 {
            return Err(ChartError::Validation(format!(
                "dataset needs at least 2 points, got {}",
                points.len()
            )));
        }

        let series_count = points[0].values.len();
        if series_count == 0 {
            return Err(ChartError::Validation(
                "dataset needs at least one value column".to_owned(),
            ));
        }

        for (index, point) in points.iter().enumerate() {
            if point.values.len() != series_count {
                return Err(ChartError::Validation(format!(
                    "point {index} has {} values, expected {series_count}",
                    point.values.len()
                )));
            }
            for (column, value) in point.values.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ChartError::Validation(format!(
                        "point {index} column {column} is not finite"
                    )));
                }
            }
        }

        for pair in points.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(ChartError::Validation(format!(
                    "timestamps must be strictly increasing, got {} after {}",
                    pair[1].time, pair[0].time
                )));
            }
        }

        for (name, len) in [
            ("colors", overrides.colors.len()),
            ("labels", overrides.labels.len()),
            ("units", overrides.units.len()),
            ("kinds", overrides.kinds.len()),
            ("divisors", overrides.divisors.len()),
        ] {
            if len > series_count {
                return Err(ChartError::Validation(format!(
                    "{name} has {len} entries but the dataset has {series_count} value columns"
                )));
            }
        }

        for (index, divisor) in overrides.divisors.iter().enumerate() {
            if !divisor.is_finite() || *divisor <= 0.0 {
                return Err(ChartError::Validation(format!(
                    "divisor for series {index} must be finite and > 0"
                )));
            }
        }

        let specs = (0..series_count)
            .map(|i| SeriesSpec {
                label: overrides
                    .labels
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("input {}", i + 1)),
                color: overrides
                    .colors
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_PALETTE[i % DEFAULT_PALETTE.len()].to_owned()),
                unit: overrides.units.get(i).cloned().unwrap_or_default(),
                kind: overrides.kinds.get(i).copied().unwrap_or_default(),
                divisor: overrides.divisors.get(i).copied().unwrap_or(1.0),
            })
            .collect();

        Ok(Self { points, specs })
    }

    #[must_use]
    pub fn points(&self) -> &[RawPoint] {
        &self.points
    }

    #[must_use]
    pub fn specs(&self) -> &[SeriesSpec] {
        &self.specs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.specs.len()
    }
}
