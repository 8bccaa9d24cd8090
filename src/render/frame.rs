use serde::{Deserialize, Serialize};

use crate::core::CanvasSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive,
};

/// One backend-agnostic drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Resets the surface; `None` clears to transparent.
    Clear { color: Option<Color> },
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Clear { color: Some(color) } => color.validate(),
            Self::Clear { color: None } => Ok(()),
            Self::Line(line) => line.validate(),
            Self::Polyline(polyline) => polyline.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// Backend-agnostic display list for one chart draw pass.
///
/// Command order is the painting contract: adapters must execute commands
/// front to back, later commands painting over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub canvas: CanvasSize,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.canvas.is_valid() {
            return Err(ChartError::InvalidGeometry(format!(
                "frame canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        for command in &self.commands {
            command.validate()?;
        }
        Ok(())
    }
}
