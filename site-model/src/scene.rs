use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Real-world footprint of the construction site in metres.
/// Every screen-space normalisation divides by these values, so a snapshot
/// with a zero or negative dimension must be rejected before rendering starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteDimensions {
    pub length: f32,
    pub width: f32,
    pub height: f32,
}

impl SiteDimensions {
    /// Reject dimensions that would produce NaN or infinite screen coordinates.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (field, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SceneError::InvalidSite { field, value });
            }
        }
        Ok(())
    }
}

/// Offset of an element within the site, metres from the site origin.
/// `z` is carried by the upstream payload but unused by the 2D projection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Real-world extent of an element in metres.
/// `length` is carried but unused by the 2D projection (top-down mapping
/// consumes width and height only).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementDimensions {
    pub width: f32,
    pub length: f32,
    pub height: f32,
}

/// One structural item to overlay on the camera feed.
/// Field names mirror the JSON emitted by the upstream calculation service
/// (`footing`, `column`, `beam` and `slab` elements in current payloads).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    pub position: ElementPosition,
    pub dimensions: ElementDimensions,
    /// Normalised RGBA, each component in [0, 1].
    pub color: [f32; 4],
    /// True strokes an outline. Filled drawing is an extension point; the
    /// engine currently strokes in both cases.
    pub wireframe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl Element {
    /// Uppercased category tag drawn just above the element's rectangle.
    pub fn label(&self) -> String {
        self.kind.to_uppercase()
    }
}

/// Complete overlay payload for one AR session. Mirrors the upstream JSON
/// structure exactly and is immutable once a session starts; the render loop
/// only reads it.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub elements: Vec<Element>,
    pub site_dimensions: SiteDimensions,
    /// Carried from the upstream payload. Not consumed by the projection
    /// maths, which normalises against `site_dimensions` directly.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl SceneSnapshot {
    pub fn validate(&self) -> Result<(), SceneError> {
        self.site_dimensions.validate()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SceneError {
    #[error("site dimension `{field}` must be a positive number of metres, got {value}")]
    InvalidSite { field: &'static str, value: f32 },
}
