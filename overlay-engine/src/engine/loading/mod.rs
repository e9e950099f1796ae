pub mod scene_loader;

pub use scene_loader::{SceneLoader, start_scene_loading, watch_scene_loading};
