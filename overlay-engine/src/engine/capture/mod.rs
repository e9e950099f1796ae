pub mod backend;
pub mod manager;

pub use backend::{CameraFrame, CaptureBackend, CaptureError, StreamInfo};
pub use manager::CaptureDeviceManager;
