pub mod render_settings;
pub mod scene;

pub use scene::{
    Element, ElementDimensions, ElementPosition, SceneError, SceneSnapshot, SiteDimensions,
};
