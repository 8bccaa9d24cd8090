//! Drag-to-zoom and hover state for one chart instance.
//!
//! The host adapter translates every input modality (mouse, touch, pen) into
//! [`PointerEvent`] values; nothing in here branches on input source.

use serde::{Deserialize, Serialize};

use crate::core::MappedPoint;

/// Pointer window for hover selection, in pixels on each side of a point.
pub const HOVER_WINDOW_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Unified pointer sample fed by host input adapters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub phase: PointerPhase,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f64, y: f64, phase: PointerPhase) -> Self {
        Self { x, y, phase }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPhase {
    Idle,
    Dragging,
    Zoomed,
}

/// Horizontal drag extent in pixel space.
///
/// `x1`/`x2` stay unordered while the drag is live; [`SelectionRect::normalized`]
/// orders them at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x1: f64,
    pub x2: f64,
}

impl SelectionRect {
    #[must_use]
    pub fn normalized(self) -> (f64, f64) {
        if self.x1 <= self.x2 {
            (self.x1, self.x2)
        } else {
            (self.x2, self.x1)
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.x2 - self.x1).abs()
    }
}

/// Inclusive index range of the dataset currently in view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRange {
    pub origin_index: usize,
    pub end_index: usize,
}

impl ViewRange {
    /// Full-dataset range. `point_count` must be non-zero.
    #[must_use]
    pub fn full(point_count: usize) -> Self {
        Self {
            origin_index: 0,
            end_index: point_count.saturating_sub(1),
        }
    }

    #[must_use]
    pub fn point_count(self) -> usize {
        self.end_index - self.origin_index + 1
    }
}

/// Selection and pointer state machine: `Idle -> Dragging -> {Idle, Zoomed}`.
///
/// Zoom commits are a pure view filter over already-mapped pixel positions,
/// so any zoom sequence followed by [`InteractionState::reset`] restores the
/// original mapping exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    phase: SelectionPhase,
    /// Phase restored when a drag commits nothing (zero width, empty filter).
    return_phase: SelectionPhase,
    selection: Option<SelectionRect>,
    view: ViewRange,
    full_point_count: usize,
    pointer_x: f64,
    pointer_y: f64,
}

impl InteractionState {
    #[must_use]
    pub fn new(full_point_count: usize) -> Self {
        Self {
            phase: SelectionPhase::Idle,
            return_phase: SelectionPhase::Idle,
            selection: None,
            view: ViewRange::full(full_point_count),
            full_point_count,
            pointer_x: 0.0,
            pointer_y: 0.0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    #[must_use]
    pub fn view(&self) -> ViewRange {
        self.view
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == SelectionPhase::Dragging
    }

    /// The live selection rectangle, present only while dragging.
    #[must_use]
    pub fn active_selection(&self) -> Option<SelectionRect> {
        self.is_dragging().then_some(self.selection).flatten()
    }

    #[must_use]
    pub fn pointer(&self) -> (f64, f64) {
        (self.pointer_x, self.pointer_y)
    }

    /// Starts a drag, superseding any drag already in progress.
    ///
    /// `x` is clamped to the plot's horizontal extent `[min_x, max_x]`.
    pub fn pointer_down(&mut self, x: f64, min_x: f64, max_x: f64) {
        if self.phase != SelectionPhase::Dragging {
            self.return_phase = self.phase;
        }
        let clamped = x.clamp(min_x, max_x);
        self.phase = SelectionPhase::Dragging;
        self.selection = Some(SelectionRect {
            x1: clamped,
            x2: clamped,
        });
    }

    /// Tracks the pointer and, while dragging, extends the selection.
    ///
    /// The hover position stays unclamped; only the selection edge is pinned
    /// to the plot.
    pub fn pointer_move(&mut self, x: f64, y: f64, min_x: f64, max_x: f64) {
        self.pointer_x = x;
        self.pointer_y = y;
        if self.phase == SelectionPhase::Dragging {
            if let Some(selection) = self.selection.as_mut() {
                selection.x2 = x.clamp(min_x, max_x);
            }
        }
    }

    /// Commits the drag against the current viewport's mapped points.
    ///
    /// `mapped` must be the layout output for the current view range; matched
    /// indices are translated back into dataset indices. A zero-width drag or
    /// a selection containing no points leaves the view unchanged and returns
    /// to the pre-drag phase.
    ///
    /// Returns `true` when the view range changed.
    pub fn pointer_up(&mut self, mapped: &[MappedPoint]) -> bool {
        if self.phase != SelectionPhase::Dragging {
            return false;
        }
        let Some(selection) = self.selection.take() else {
            self.phase = self.return_phase;
            return false;
        };

        if selection.width() == 0.0 {
            self.phase = self.return_phase;
            return false;
        }

        let (low, high) = selection.normalized();
        let mut first_match = None;
        let mut last_match = None;
        for (index, point) in mapped.iter().enumerate() {
            let x = f64::from(point.screen_x);
            if x >= low && x <= high {
                if first_match.is_none() {
                    first_match = Some(index);
                }
                last_match = Some(index);
            }
        }

        match (first_match, last_match) {
            (Some(first), Some(last)) => {
                self.view = ViewRange {
                    origin_index: self.view.origin_index + first,
                    end_index: self.view.origin_index + last,
                };
                self.phase = SelectionPhase::Zoomed;
                true
            }
            // Empty selection: keep the previous viewport untouched.
            _ => {
                self.phase = self.return_phase;
                false
            }
        }
    }

    /// Discards any drag and restores the full-dataset view.
    pub fn reset(&mut self) {
        self.phase = SelectionPhase::Idle;
        self.return_phase = SelectionPhase::Idle;
        self.selection = None;
        self.view = ViewRange::full(self.full_point_count);
    }
}

/// Resolves the hovered point for a pointer position.
///
/// A point qualifies when `pointer_x` lies within [`HOVER_WINDOW_PX`] of its
/// `screen_x`, bounds inclusive. When several qualify the last one in time
/// order wins; callers set `is_selected` on exactly that point.
#[must_use]
pub fn locate_hovered(pointer_x: f64, mapped: &[MappedPoint]) -> Option<usize> {
    let mut hit = None;
    for (index, point) in mapped.iter().enumerate() {
        let x = f64::from(point.screen_x);
        if pointer_x >= x - HOVER_WINDOW_PX && pointer_x <= x + HOVER_WINDOW_PX {
            hit = Some(index);
        }
    }
    hit
}
