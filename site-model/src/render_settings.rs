//! Fixed overlay drawing parameters shared between projection and compositing.

/// Stroke width in surface pixels for overlay rectangles.
pub const STROKE_LINE_WIDTH: f32 = 3.0;

/// Vertical gap in surface pixels between a rectangle's top-left corner and its label.
pub const LABEL_OFFSET_PX: f32 = 5.0;

pub const LABEL_FONT_SIZE: f32 = 14.0;

// Z layering for the composited 2D scene. The camera feed sits at the back,
// labels draw over the stroked rectangles.
pub const CAMERA_FEED_LAYER: f32 = 0.0;
pub const LABEL_LAYER: f32 = 2.0;
