use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use site_model::render_settings::CAMERA_FEED_LAYER;

use crate::engine::session::ArSession;

/// Full-surface sprite showing the live camera image.
#[derive(Component)]
pub struct CameraFeed;

/// Compositing surface bookkeeping. `width`/`height` stay zero until the
/// first frame arrives; the surface always tracks the live video's native
/// pixel dimensions, never a design-time size.
#[derive(Resource, Default)]
pub struct FeedSurface {
    pub handle: Handle<Image>,
    pub width: u32,
    pub height: u32,
}

impl FeedSurface {
    pub fn size(&self) -> Option<Vec2> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(Vec2::new(self.width as f32, self.height as f32))
    }
}

/// Entering `Capturing`: allocate the feed image and its sprite. The real
/// dimensions are adopted from the first delivered frame.
pub fn spawn_camera_feed(
    mut commands: Commands,
    mut surface: ResMut<FeedSurface>,
    mut images: ResMut<Assets<Image>>,
) {
    surface.handle = images.add(frame_image(1, 1, vec![0, 0, 0, 0]));
    surface.width = 0;
    surface.height = 0;

    commands.spawn((
        Sprite::from_image(surface.handle.clone()),
        Transform::from_xyz(0.0, 0.0, CAMERA_FEED_LAYER),
        CameraFeed,
    ));
}

/// Per-frame compositing step 1-3: poll the latest camera frame, resize the
/// surface to its native dimensions when they change, and draw the raw image
/// across the full surface. Frames that are not ready are skipped, not
/// queued; every pass recomputes from the most recent frame.
pub fn update_camera_feed(
    mut session: ResMut<ArSession>,
    mut surface: ResMut<FeedSurface>,
    mut images: ResMut<Assets<Image>>,
) {
    // Cancellation guard: a frame callback that was already scheduled when
    // stop_session ran must do no capture calls and no drawing.
    if !session.is_active() {
        return;
    }

    let Some(frame) = session.latest_frame() else {
        return;
    };

    if frame.width != surface.width || frame.height != surface.height {
        info!(
            "Compositing surface resized to {}x{}",
            frame.width, frame.height
        );
        surface.width = frame.width;
        surface.height = frame.height;
    }

    images.insert(
        surface.handle.id(),
        frame_image(frame.width, frame.height, frame.pixels),
    );
}

fn frame_image(width: u32, height: u32, pixels: Vec<u8>) -> Image {
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        pixels,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}
