pub mod viewer_state;
pub mod window_config;

pub use viewer_state::{ViewerState, sync_viewer_state};
