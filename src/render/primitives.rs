use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Parses `#RGB` and `#RRGGBB` hex notation.
    ///
    /// Returns `None` for anything else; callers pick their own fallback.
    #[must_use]
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        let channels = match digits.len() {
            3 => {
                let mut values = [0u8; 3];
                for (slot, ch) in values.iter_mut().zip(digits.chars()) {
                    let nibble = ch.to_digit(16)? as u8;
                    *slot = nibble * 16 + nibble;
                }
                values
            }
            6 => {
                let mut values = [0u8; 3];
                for (slot, pair) in values.iter_mut().zip(digits.as_bytes().chunks(2)) {
                    let text = std::str::from_utf8(pair).ok()?;
                    *slot = u8::from_str_radix(text, 16).ok()?;
                }
                values
            }
            _ => return None,
        };
        Some(Self::from_rgb8(channels[0], channels[1], channels[2]))
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidGeometry(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// On/off run lengths for dashed strokes, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub on: f64,
    pub off: f64,
}

impl DashPattern {
    pub fn validate(self) -> ChartResult<()> {
        if !self.on.is_finite() || !self.off.is_finite() || self.on <= 0.0 || self.off < 0.0 {
            return Err(ChartError::InvalidGeometry(
                "dash pattern runs must be finite, on > 0, off >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Stroke weight and color shared by outlined primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
}

impl Stroke {
    #[must_use]
    pub const fn new(width: f64, color: Color) -> Self {
        Self { width, color }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidGeometry(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
    pub dash: Option<DashPattern>,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke,
            dash: None,
        }
    }

    #[must_use]
    pub const fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidGeometry(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if let Some(dash) = self.dash {
            dash.validate()?;
        }
        self.stroke.validate()
    }
}

/// Draw command for one open polyline in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylinePrimitive {
    pub vertices: Vec<(f64, f64)>,
    pub stroke: Stroke,
}

impl PolylinePrimitive {
    #[must_use]
    pub fn new(vertices: Vec<(f64, f64)>, stroke: Stroke) -> Self {
        Self { vertices, stroke }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.vertices.len() < 2 {
            return Err(ChartError::InvalidGeometry(
                "polyline needs at least 2 vertices".to_owned(),
            ));
        }
        for (x, y) in &self.vertices {
            if !x.is_finite() || !y.is_finite() {
                return Err(ChartError::InvalidGeometry(
                    "polyline vertices must be finite".to_owned(),
                ));
            }
        }
        self.stroke.validate()
    }
}

/// Draw command for one axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl RectPrimitive {
    #[must_use]
    pub const fn filled(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
        }
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidGeometry(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidGeometry(
                "rect extents must be >= 0".to_owned(),
            ));
        }
        if self.fill.is_none() && self.stroke.is_none() {
            return Err(ChartError::InvalidGeometry(
                "rect needs a fill or a stroke".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Draw command for one circle (point marker, legend swatch dot).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn filled(cx: f64, cy: f64, radius: f64, fill: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill: Some(fill),
            stroke: None,
        }
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(ChartError::InvalidGeometry(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidGeometry(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        if self.fill.is_none() && self.stroke.is_none() {
            return Err(ChartError::InvalidGeometry(
                "circle needs a fill or a stroke".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
///
/// `rotation_deg` rotates clockwise around the anchor point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub bold: bool,
    pub color: Color,
    pub h_align: TextHAlign,
    pub rotation_deg: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, font_size_px: f64, color: Color) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            bold: false,
            color,
            h_align: TextHAlign::Left,
            rotation_deg: 0.0,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn aligned(mut self, h_align: TextHAlign) -> Self {
        self.h_align = h_align;
        self
    }

    #[must_use]
    pub fn rotated(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidGeometry(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_deg.is_finite() {
            return Err(ChartError::InvalidGeometry(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidGeometry(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
