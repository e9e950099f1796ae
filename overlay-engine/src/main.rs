// AR blueprint viewer: composites the live camera feed with projected site
// elements. Scene snapshots come from the upstream calculation service as a
// JSON asset; Space starts and stops the capture session.

mod engine;

use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use site_model::SceneSnapshot;

use engine::capture::CaptureDeviceManager;
use engine::core::window_config::create_default_plugins;
use engine::core::{ViewerState, sync_viewer_state};
use engine::loading::{SceneLoader, start_scene_loading, watch_scene_loading};
use engine::overlay::{
    FeedSurface, configure_gizmos, draw_overlay_elements, layout_element_labels,
    spawn_camera_feed, spawn_hud, teardown_overlay, update_camera_feed, update_status_text,
};
use engine::session::{ArSession, handle_session_toggle};

fn main() {
    create_app(ArSession::new(CaptureDeviceManager::nokhwa())).run();
}

fn create_app(session: ArSession) -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(JsonAssetPlugin::<SceneSnapshot>::new(&["json"]))
        .init_state::<ViewerState>()
        .init_resource::<SceneLoader>()
        .init_resource::<FeedSurface>()
        .insert_resource(session)
        .add_systems(Startup, (setup, configure_gizmos, start_scene_loading))
        .add_systems(
            Update,
            (
                watch_scene_loading,
                handle_session_toggle,
                sync_viewer_state,
                update_status_text,
            ),
        )
        .add_systems(
            Update,
            (update_camera_feed, layout_element_labels, draw_overlay_elements)
                .chain()
                .run_if(in_state(ViewerState::Capturing)),
        )
        .add_systems(OnEnter(ViewerState::Capturing), spawn_camera_feed)
        .add_systems(OnExit(ViewerState::Capturing), teardown_overlay);

    app
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
    spawn_hud(&mut commands);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use bevy::state::app::StatesPlugin;
    use site_model::{Element, ElementDimensions, ElementPosition, SiteDimensions};

    use super::*;
    use crate::engine::capture::CaptureError;
    use crate::engine::capture::manager::test_support::{FakeBackend, FakeCounters, test_frame};

    fn snapshot() -> SceneSnapshot {
        SceneSnapshot {
            project_name: None,
            elements: vec![Element {
                kind: "slab".to_owned(),
                position: ElementPosition {
                    x: 0.0,
                    y: 0.0,
                    z: 0.0,
                },
                dimensions: ElementDimensions {
                    width: 3.0,
                    length: 3.0,
                    height: 0.1,
                },
                color: [0.8, 0.8, 0.8, 0.5],
                wireframe: false,
                material: None,
            }],
            site_dimensions: SiteDimensions {
                length: 10.0,
                width: 10.0,
                height: 5.0,
            },
            scale: 1.0,
        }
    }

    /// Headless app running the real state-sync and compositing-poll systems
    /// against a scripted capture backend.
    fn harness(backend: FakeBackend) -> App {
        let session = ArSession::new(CaptureDeviceManager::with_backend(Box::new(backend)));

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, AssetPlugin::default()))
            .init_asset::<Image>()
            .init_state::<ViewerState>()
            .init_resource::<FeedSurface>()
            .insert_resource(session)
            .add_systems(
                Update,
                (
                    sync_viewer_state,
                    update_camera_feed.run_if(in_state(ViewerState::Capturing)),
                ),
            )
            .add_systems(OnEnter(ViewerState::Capturing), spawn_camera_feed);
        app
    }

    fn current_state(app: &App) -> ViewerState {
        *app.world().resource::<State<ViewerState>>().get()
    }

    #[test]
    fn viewer_follows_the_session_lifecycle() {
        let (backend, _) = FakeBackend::streaming(640, 480);
        let mut app = harness(backend);

        app.update();
        assert_eq!(current_state(&app), ViewerState::Idle);

        app.world_mut()
            .resource_mut::<ArSession>()
            .start_session(snapshot())
            .unwrap();
        app.update();
        app.update();
        assert_eq!(current_state(&app), ViewerState::Capturing);

        app.world_mut().resource_mut::<ArSession>().stop_session();
        app.update();
        app.update();
        assert_eq!(current_state(&app), ViewerState::Idle);
    }

    #[test]
    fn failed_acquisition_enters_the_error_state() {
        let (backend, counters) = FakeBackend::failing(CaptureError::PermissionDenied);
        let mut app = harness(backend);

        app.update();
        let result = app
            .world_mut()
            .resource_mut::<ArSession>()
            .start_session(snapshot());
        assert!(result.is_err());

        app.update();
        app.update();
        assert_eq!(current_state(&app), ViewerState::Error);
        assert_eq!(counters.opens.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn surface_adopts_the_native_frame_dimensions() {
        let (backend, _) = FakeBackend::streaming(640, 480);
        let frames = backend.frame_handle();
        let mut app = harness(backend);

        app.world_mut()
            .resource_mut::<ArSession>()
            .start_session(snapshot())
            .unwrap();
        app.update();
        app.update();

        let surface = app.world().resource::<FeedSurface>();
        assert_eq!((surface.width, surface.height), (640, 480));
        let handle = surface.handle.clone();

        let images = app.world().resource::<Assets<Image>>();
        let image = images.get(&handle).unwrap();
        assert_eq!(image.texture_descriptor.size.width, 640);
        assert_eq!(image.texture_descriptor.size.height, 480);

        // Device rotation mid-session: the next frame arrives with swapped
        // dimensions and the surface must follow, not keep a cached size.
        *frames.lock().unwrap() = Some(test_frame(480, 640));
        app.update();

        let surface = app.world().resource::<FeedSurface>();
        assert_eq!((surface.width, surface.height), (480, 640));

        let images = app.world().resource::<Assets<Image>>();
        let image = images.get(&handle).unwrap();
        assert_eq!(image.texture_descriptor.size.width, 480);
        assert_eq!(image.texture_descriptor.size.height, 640);
    }

    #[test]
    fn pending_frame_after_stop_does_no_work() {
        let (backend, counters) = FakeBackend::streaming(640, 480);
        let mut app = harness(backend);

        app.world_mut()
            .resource_mut::<ArSession>()
            .start_session(snapshot())
            .unwrap();
        app.update();
        app.update();
        assert_eq!(current_state(&app), ViewerState::Capturing);
        assert!(counters.polls.load(Ordering::SeqCst) > 0);

        // Stop while the viewer is still in Capturing: the already-scheduled
        // compositing pass for the next frame must not reach the device.
        app.world_mut().resource_mut::<ArSession>().stop_session();
        let polls_after_stop = polls(&counters);
        app.update();
        assert_eq!(polls(&counters), polls_after_stop);

        app.update();
        assert_eq!(current_state(&app), ViewerState::Idle);
        assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
    }

    fn polls(counters: &Arc<FakeCounters>) -> usize {
        counters.polls.load(Ordering::SeqCst)
    }
}
