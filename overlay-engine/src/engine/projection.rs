//! Pure mapping from site-space geometry to surface-space drawing commands.
//!
//! The camera frame is treated as a flat top-down canvas matching the site
//! footprint: an orthographic, axis-aligned mapping, not a perspective one.
//! `position.z` and `dimensions.length` are accepted by the data model but
//! deliberately unused here. Nothing is cached; callers pass the surface's
//! current pixel size every frame, so a resized surface realigns immediately.

use bevy::prelude::*;
use site_model::render_settings::LABEL_OFFSET_PX;
use site_model::{Element, SiteDimensions};

/// Axis-aligned rectangle in surface pixels, origin at the top-left of the
/// surface, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Project one element onto a surface of `surface` pixels.
///
/// `site` must already be validated (§ positive dimensions); this function
/// performs no division-by-zero handling of its own.
pub fn project_element(element: &Element, site: &SiteDimensions, surface: Vec2) -> ScreenRect {
    ScreenRect {
        x: element.position.x / site.width * surface.x,
        y: element.position.y / site.length * surface.y,
        width: element.dimensions.width / site.width * surface.x,
        height: element.dimensions.height / site.height * surface.y,
    }
}

/// Anchor point for the element's label, just above the rectangle's top-left
/// corner.
pub fn label_anchor(rect: &ScreenRect) -> Vec2 {
    Vec2::new(rect.x, rect.y - LABEL_OFFSET_PX)
}

/// Scale a normalised colour component to the 0..=255 integer range, clamping
/// the rounded value so out-of-range payload data cannot overflow.
pub fn channel_to_u8(component: f32) -> u8 {
    (component * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Stroke colour for an element: the first three components quantised to
/// 0..=255, the fourth used directly as alpha.
pub fn stroke_color(color: [f32; 4]) -> Color {
    Color::srgba(
        channel_to_u8(color[0]) as f32 / 255.0,
        channel_to_u8(color[1]) as f32 / 255.0,
        channel_to_u8(color[2]) as f32 / 255.0,
        color[3],
    )
}

#[cfg(test)]
mod tests {
    use site_model::{ElementDimensions, ElementPosition};

    use super::*;

    fn element(position: ElementPosition, dimensions: ElementDimensions) -> Element {
        Element {
            kind: "column".to_owned(),
            position,
            dimensions,
            color: [0.6, 0.6, 0.6, 0.7],
            wireframe: true,
            material: None,
        }
    }

    #[test]
    fn projects_reference_scenario() {
        // Element at (5,5) with dims (2,2,3) on a 10x10x5 site, 200x200
        // surface: expected rectangle x=100, y=100, w=40, h=120.
        let element = element(
            ElementPosition {
                x: 5.0,
                y: 5.0,
                z: 0.0,
            },
            ElementDimensions {
                width: 2.0,
                length: 2.0,
                height: 3.0,
            },
        );
        let site = SiteDimensions {
            length: 10.0,
            width: 10.0,
            height: 5.0,
        };

        let rect = project_element(&element, &site, Vec2::new(200.0, 200.0));
        assert_eq!(rect.x, 100.0);
        assert_eq!(rect.y, 100.0);
        assert_eq!(rect.width, 40.0);
        assert_eq!(rect.height, 120.0);
    }

    #[test]
    fn projection_is_exact_for_positive_sites() {
        let element = element(
            ElementPosition {
                x: 1.5,
                y: 4.0,
                z: 9.0,
            },
            ElementDimensions {
                width: 0.3,
                length: 7.0,
                height: 2.5,
            },
        );
        let site = SiteDimensions {
            length: 16.0,
            width: 12.0,
            height: 5.0,
        };
        let surface = Vec2::new(1280.0, 720.0);

        let rect = project_element(&element, &site, surface);
        assert_eq!(rect.x, 1.5 / 12.0 * 1280.0);
        assert_eq!(rect.y, 4.0 / 16.0 * 720.0);
        assert_eq!(rect.width, 0.3 / 12.0 * 1280.0);
        assert_eq!(rect.height, 2.5 / 5.0 * 720.0);
    }

    #[test]
    fn depth_and_length_do_not_affect_projection() {
        let site = SiteDimensions {
            length: 10.0,
            width: 10.0,
            height: 5.0,
        };
        let surface = Vec2::new(400.0, 400.0);

        let flat = element(
            ElementPosition {
                x: 2.0,
                y: 2.0,
                z: 0.0,
            },
            ElementDimensions {
                width: 1.0,
                length: 1.0,
                height: 1.0,
            },
        );
        let mut raised = flat.clone();
        raised.position.z = 42.0;
        raised.dimensions.length = 99.0;

        assert_eq!(
            project_element(&flat, &site, surface),
            project_element(&raised, &site, surface)
        );
    }

    #[test]
    fn label_sits_above_the_top_left_corner() {
        let rect = ScreenRect {
            x: 100.0,
            y: 100.0,
            width: 40.0,
            height: 120.0,
        };
        assert_eq!(label_anchor(&rect), Vec2::new(100.0, 100.0 - LABEL_OFFSET_PX));
    }

    #[test]
    fn maps_opaque_red_and_half_alpha_blue() {
        assert_eq!(
            stroke_color([1.0, 0.0, 0.0, 1.0]),
            Color::srgba(1.0, 0.0, 0.0, 1.0)
        );
        assert_eq!(
            stroke_color([0.0, 0.0, 1.0, 0.5]),
            Color::srgba(0.0, 0.0, 1.0, 0.5)
        );
    }

    #[test]
    fn clamps_out_of_range_components() {
        assert_eq!(channel_to_u8(1.2), 255);
        assert_eq!(channel_to_u8(-0.3), 0);
        assert_eq!(channel_to_u8(0.5), 128);
    }
}
