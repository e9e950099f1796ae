pub mod camera_feed;
pub mod elements;
pub mod hud;

use bevy::prelude::*;

pub use camera_feed::{FeedSurface, spawn_camera_feed, update_camera_feed};
pub use elements::{draw_overlay_elements, layout_element_labels};
pub use hud::{spawn_hud, update_status_text};

use camera_feed::CameraFeed;
use elements::ElementLabel;

/// Convert a point in surface pixels (origin top-left, y down) to 2D world
/// coordinates (origin at surface centre, y up).
pub(crate) fn surface_to_world(point: Vec2, surface: Vec2) -> Vec2 {
    Vec2::new(point.x - surface.x * 0.5, surface.y * 0.5 - point.y)
}

/// Stroke overlay rectangles at the width the source blueprint viewer used.
pub fn configure_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = site_model::render_settings::STROKE_LINE_WIDTH;
}

/// Drop every overlay entity when capturing ends so nothing lingers on the
/// next session or on the error screen.
pub fn teardown_overlay(
    mut commands: Commands,
    mut surface: ResMut<FeedSurface>,
    overlay_entities: Query<Entity, Or<(With<CameraFeed>, With<ElementLabel>)>>,
) {
    for entity in &overlay_entities {
        commands.entity(entity).despawn();
    }
    *surface = FeedSurface::default();
}
