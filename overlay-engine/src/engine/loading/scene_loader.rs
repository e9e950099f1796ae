use bevy::prelude::*;
use site_model::SceneSnapshot;

/// Path of the bundled snapshot standing in for the upstream calculation
/// service's AR payload.
const RELATIVE_SCENE_PATH: &str = "scenes/demo_site.json";

#[derive(Resource, Default)]
pub struct SceneLoader {
    handle: Option<Handle<SceneSnapshot>>,
    announced: bool,
}

impl SceneLoader {
    /// The loaded snapshot, once the JSON asset is available.
    pub fn snapshot<'a>(&self, scenes: &'a Assets<SceneSnapshot>) -> Option<&'a SceneSnapshot> {
        scenes.get(self.handle.as_ref()?)
    }
}

/// Kick off the JSON asset load at startup.
pub fn start_scene_loading(mut loader: ResMut<SceneLoader>, asset_server: Res<AssetServer>) {
    info!("Loading scene snapshot from: {RELATIVE_SCENE_PATH}");
    loader.handle = Some(asset_server.load(RELATIVE_SCENE_PATH));
}

/// Announce the snapshot once it arrives and surface validation problems
/// early, before the user tries to start a session against it.
pub fn watch_scene_loading(mut loader: ResMut<SceneLoader>, scenes: Res<Assets<SceneSnapshot>>) {
    if loader.announced {
        return;
    }

    let Some(scene) = loader.handle.as_ref().and_then(|handle| scenes.get(handle)) else {
        return;
    };

    match scene.validate() {
        Ok(()) => info!(
            "✓ Scene snapshot loaded: {} ({} elements)",
            scene.project_name.as_deref().unwrap_or("unnamed project"),
            scene.element_count()
        ),
        Err(err) => warn!("Scene snapshot loaded but will be rejected at start: {err}"),
    }
    loader.announced = true;
}
