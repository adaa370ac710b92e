//! Cover overlay model: percentage geometry, clamping, and drag protocol.
//!
//! Coordinates are percentages of the page container, so the same style
//! renders identically at any physical size. `left` is the overlay's left
//! edge; `top` is its vertical centre. Height depends on the rendered text
//! and is not clamped.
//!
//! Dragging is an explicit three-call protocol:
//!
//! 1. [`OverlayDrag::begin`] captures the baseline position and the pointer
//!    origin.
//! 2. [`OverlayStyle::apply_drag`] recomputes the position from that fixed
//!    baseline for every pointer move, so repeated calls never drift.
//! 3. Dropping the [`OverlayDrag`] ends the drag; the last position stays.

use serde::{Deserialize, Serialize};

use crate::error::ComposeError;
use crate::style::{Color, FontFamily, FontSize, FontWeight, TextAlign};

pub const MIN_WIDTH_PCT: f32 = 20.0;
pub const MAX_WIDTH_PCT: f32 = 100.0;

pub const DEFAULT_TOP_PCT: f32 = 50.0;
pub const DEFAULT_LEFT_PCT: f32 = 10.0;
pub const DEFAULT_WIDTH_PCT: f32 = 80.0;

// ---------------------------------------------------------------------------
// Geometry primitives (pixels, in whatever space the host renders in)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

/// Clamp a width percentage to `[MIN_WIDTH_PCT, MAX_WIDTH_PCT]`.
pub fn clamp_width(width: f32) -> f32 {
    width.clamp(MIN_WIDTH_PCT, MAX_WIDTH_PCT)
}

/// Clamp a position so the overlay stays inside its container horizontally
/// and its anchor stays inside vertically. Idempotent.
///
/// Returns `(left, top)`.
pub fn clamp_position(left: f32, top: f32, width: f32) -> (f32, f32) {
    let max_left = MAX_WIDTH_PCT - clamp_width(width);
    (left.clamp(0.0, max_left), top.clamp(0.0, 100.0))
}

// ---------------------------------------------------------------------------
// Overlay style
// ---------------------------------------------------------------------------

/// Position and typography of a page's text overlay.
///
/// Fields are private so every mutation passes through the clamp rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    position_top: f32,
    position_left: f32,
    width: f32,
    #[serde(default)]
    font_family: FontFamily,
    #[serde(default)]
    font_size: FontSize,
    #[serde(default)]
    font_weight: FontWeight,
    #[serde(default)]
    text_align: TextAlign,
    #[serde(default)]
    color: Color,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            position_top: DEFAULT_TOP_PCT,
            position_left: DEFAULT_LEFT_PCT,
            width: DEFAULT_WIDTH_PCT,
            font_family: FontFamily::default(),
            font_size: FontSize::default(),
            font_weight: FontWeight::default(),
            text_align: TextAlign::default(),
            color: Color::default(),
        }
    }
}

impl OverlayStyle {
    pub fn position_top(&self) -> f32 {
        self.position_top
    }

    pub fn position_left(&self) -> f32 {
        self.position_left
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn font_family(&self) -> FontFamily {
        self.font_family
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight
    }

    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Move the overlay, clamping into the container. Non-finite input is
    /// ignored.
    pub fn set_position(&mut self, left: f32, top: f32) {
        if !left.is_finite() || !top.is_finite() {
            log::debug!("ignoring non-finite overlay position ({left}, {top})");
            return;
        }
        let (left, top) = clamp_position(left, top, self.width);
        self.position_left = left;
        self.position_top = top;
    }

    /// Resize the overlay. The width is clamped to `[20, 100]` and the left
    /// edge is pulled in if the new width would push the overlay out.
    pub fn set_width(&mut self, width: f32) -> Result<(), ComposeError> {
        if !width.is_finite() {
            return Err(ComposeError::InvalidStyle(format!(
                "overlay width must be finite, got {width}"
            )));
        }
        self.width = clamp_width(width);
        let (left, top) = clamp_position(self.position_left, self.position_top, self.width);
        self.position_left = left;
        self.position_top = top;
        Ok(())
    }

    pub fn set_font_family(&mut self, family: FontFamily) {
        self.font_family = family;
    }

    pub fn set_font_size(&mut self, size: FontSize) {
        self.font_size = size;
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_weight = weight;
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.text_align = align;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Re-establish the geometry invariants, e.g. after deserialising a
    /// style from an untrusted snapshot.
    pub fn clamped(mut self) -> Self {
        self.width = if self.width.is_finite() {
            clamp_width(self.width)
        } else {
            DEFAULT_WIDTH_PCT
        };
        let left = if self.position_left.is_finite() {
            self.position_left
        } else {
            DEFAULT_LEFT_PCT
        };
        let top = if self.position_top.is_finite() {
            self.position_top
        } else {
            DEFAULT_TOP_PCT
        };
        let (left, top) = clamp_position(left, top, self.width);
        self.position_left = left;
        self.position_top = top;
        self
    }

    /// Start a drag from the overlay's on-screen rectangle.
    pub fn begin_drag(
        &self,
        pointer_start: Point,
        container: Rect,
        overlay: Rect,
    ) -> Result<OverlayDrag, ComposeError> {
        OverlayDrag::begin(pointer_start, container, overlay)
    }

    /// Reposition for the current pointer of an active drag.
    pub fn apply_drag(&mut self, drag: &OverlayDrag, pointer: Point) {
        let (left, top) = drag.position_at(pointer);
        self.set_position(left, top);
    }
}

// ---------------------------------------------------------------------------
// Drag protocol
// ---------------------------------------------------------------------------

/// State captured when a drag begins. Holds no reference to the style, so
/// the style stays freely editable by its owner between pointer moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayDrag {
    baseline_left: f32,
    baseline_top: f32,
    pointer_start: Point,
    container_width: f32,
    container_height: f32,
}

impl OverlayDrag {
    /// Capture the overlay's offset from the container's top-left corner as
    /// a percentage baseline (left edge, vertical centre).
    pub fn begin(pointer_start: Point, container: Rect, overlay: Rect) -> Result<Self, ComposeError> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(container.width) || !usable(container.height) {
            return Err(ComposeError::DegenerateContainer);
        }
        let baseline_left = (overlay.x - container.x) / container.width * 100.0;
        let baseline_top = (overlay.y + overlay.height / 2.0 - container.y) / container.height * 100.0;
        if !baseline_left.is_finite() || !baseline_top.is_finite() {
            return Err(ComposeError::DegenerateContainer);
        }
        Ok(Self {
            baseline_left,
            baseline_top,
            pointer_start,
            container_width: container.width,
            container_height: container.height,
        })
    }

    pub fn baseline(&self) -> (f32, f32) {
        (self.baseline_left, self.baseline_top)
    }

    /// Unclamped `(left, top)` for a pointer position:
    /// `baseline + (pointer − start) / container × 100`.
    pub fn position_at(&self, pointer: Point) -> (f32, f32) {
        drag_position(
            (self.baseline_left, self.baseline_top),
            self.pointer_start,
            pointer,
            (self.container_width, self.container_height),
        )
    }
}

/// Pure drag geometry, independent of any input-event plumbing.
pub fn drag_position(
    baseline: (f32, f32),
    pointer_start: Point,
    pointer_current: Point,
    container_size: (f32, f32),
) -> (f32, f32) {
    let dx = (pointer_current.x - pointer_start.x) / container_size.0 * 100.0;
    let dy = (pointer_current.y - pointer_start.y) / container_size.1 * 100.0;
    (baseline.0 + dx, baseline.1 + dy)
}
