use serde::{Deserialize, Serialize};

use crate::core::{GridSpec, Margins, SeriesKind, SeriesOverrides};
use crate::error::{ChartError, ChartResult};
use crate::render::ChartStyle;

/// Host-facing chart options.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format. Per-series arrays are
/// positional; anything missing falls back to built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Vertical axis title; empty string draws nothing.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub series: SeriesOverrides,
    /// Explicit plot margins. `None` derives the left margin from the
    /// measured width of the first series' unit suffix.
    #[serde(default)]
    pub margins: Option<Margins>,
    #[serde(default)]
    pub grid: GridSpec,
    /// Host-local UTC offset for axis and tooltip timestamps, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default)]
    pub style: ChartStyle,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            description: String::new(),
            series: SeriesOverrides::default(),
            margins: None,
            grid: GridSpec::default(),
            utc_offset_minutes: 0,
            style: ChartStyle::default(),
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.series.colors = colors;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.series.labels = labels;
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: Vec<String>) -> Self {
        self.series.units = units;
        self
    }

    #[must_use]
    pub fn with_kinds(mut self, kinds: Vec<SeriesKind>) -> Self {
        self.series.kinds = kinds;
        self
    }

    #[must_use]
    pub fn with_divisors(mut self, divisors: Vec<f64>) -> Self {
        self.series.divisors = divisors;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = Some(margins);
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Serializes options to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Validation(format!("failed to serialize options: {e}")))
    }

    /// Deserializes options from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::Validation(format!("failed to parse options: {e}")))
    }
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    300
}
