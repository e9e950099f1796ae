use bevy::prelude::*;
use bevy::sprite::Anchor;
use site_model::render_settings::{LABEL_FONT_SIZE, LABEL_LAYER};

use super::camera_feed::FeedSurface;
use super::surface_to_world;
use crate::engine::projection::{label_anchor, project_element, stroke_color};
use crate::engine::session::ArSession;

/// Uppercased element tag drawn just above its rectangle's top-left corner.
#[derive(Component)]
pub struct ElementLabel;

/// Per-frame compositing step 4a: stroke one rectangle per element, in
/// snapshot order so later elements draw on top. Wireframe and filled
/// elements are both stroked; filled drawing is an extension point.
pub fn draw_overlay_elements(
    session: Res<ArSession>,
    surface: Res<FeedSurface>,
    mut gizmos: Gizmos,
) {
    if !session.is_active() {
        return;
    }
    let Some(scene) = session.scene() else {
        return;
    };
    // No frame composited yet, nothing to align the overlay against.
    let Some(surface_size) = surface.size() else {
        return;
    };

    for element in &scene.elements {
        let rect = project_element(element, &scene.site_dimensions, surface_size);
        let center = surface_to_world(rect.center(), surface_size);
        gizmos.rect_2d(
            Isometry2d::from_translation(center),
            rect.size(),
            stroke_color(element.color),
        );
    }
}

/// Per-frame compositing step 4b: position the text labels. Elements are
/// immutable for the session, so labels only need re-laying-out when the
/// surface dimensions change (first frame, device rotation).
pub fn layout_element_labels(
    mut commands: Commands,
    session: Res<ArSession>,
    surface: Res<FeedSurface>,
    existing: Query<Entity, With<ElementLabel>>,
) {
    if !surface.is_changed() || !session.is_active() {
        return;
    }
    let Some(scene) = session.scene() else {
        return;
    };
    let Some(surface_size) = surface.size() else {
        return;
    };

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    for element in &scene.elements {
        let rect = project_element(element, &scene.site_dimensions, surface_size);
        let anchor = surface_to_world(label_anchor(&rect), surface_size);

        commands.spawn((
            Text2d::new(element.label()),
            TextFont {
                font_size: LABEL_FONT_SIZE,
                ..default()
            },
            TextColor(Color::WHITE),
            Anchor::BottomLeft,
            Transform::from_translation(anchor.extend(LABEL_LAYER)),
            ElementLabel,
        ));
    }
}
