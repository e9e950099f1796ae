use bevy::prelude::*;

use super::backend::{CameraFrame, CaptureBackend, CaptureError, NokhwaBackend, StreamInfo};

/// Owns the camera as an exclusively-held resource for the duration of an AR
/// session. While a stream is open no other consumer in the process may also
/// hold the device.
pub struct CaptureDeviceManager {
    backend: Box<dyn CaptureBackend>,
    stream: Option<StreamInfo>,
}

impl CaptureDeviceManager {
    /// Production manager over the host platform camera API.
    pub fn nokhwa() -> Self {
        Self::with_backend(Box::new(NokhwaBackend::new()))
    }

    pub fn with_backend(backend: Box<dyn CaptureBackend>) -> Self {
        Self {
            backend,
            stream: None,
        }
    }

    /// Acquire the capture stream. Idempotent: a second call while streaming
    /// returns the existing stream info without touching the device again.
    pub fn start(&mut self) -> Result<StreamInfo, CaptureError> {
        if let Some(info) = self.stream {
            return Ok(info);
        }
        let info = self.backend.open()?;
        info!("Capture stream open at {}x{}", info.width, info.height);
        self.stream = Some(info);
        Ok(info)
    }

    /// Release the device. Safe to call repeatedly and before any successful
    /// `start` (no-op). Runs on every session exit path so the camera is never
    /// left open.
    pub fn stop(&mut self) {
        if self.stream.take().is_some() {
            self.backend.close();
            info!("Capture stream released");
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }

    /// Non-blocking poll for the most recent frame. Returns `None` when the
    /// stream is closed or no new frame has arrived since the last poll.
    pub fn latest_frame(&mut self) -> Option<CameraFrame> {
        if self.stream.is_none() {
            return None;
        }
        self.backend.poll_frame()
    }
}

impl Drop for CaptureDeviceManager {
    // Last-resort guard for the resource-leak invariant; normal teardown goes
    // through `stop`.
    fn drop(&mut self) {
        self.stop();
    }
}
