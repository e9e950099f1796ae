use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use nokhwa::pixel_format::RgbAFormat;
use nokhwa::utils::{ApiBackend, RequestedFormat, RequestedFormatType};
use nokhwa::{CallbackCamera, NokhwaError, query};
use thiserror::Error;

/// Camera acquisition failures. The viewer shows one generic message for all
/// of these; the distinct kinds exist for diagnostics and logging.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaptureError {
    #[error("camera access denied")]
    PermissionDenied,
    #[error("no suitable camera device available")]
    DeviceUnavailable,
    #[error("camera acquisition failed: {0}")]
    Unknown(String),
}

/// Pixel dimensions granted by the device when the stream opened. The engine
/// does not negotiate resolution; it renders whatever the device delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
}

/// One decoded RGBA8 frame from the capture device.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Seam between the device manager and the host camera API. The production
/// backend wraps nokhwa; tests script a fake.
pub trait CaptureBackend: Send + Sync + 'static {
    /// Open the device and start streaming frames.
    fn open(&mut self) -> Result<StreamInfo, CaptureError>;

    /// Stop streaming and release the device. Must tolerate being called when
    /// nothing is open.
    fn close(&mut self);

    /// Non-blocking poll for the most recent frame. `None` means nothing new
    /// is ready and the caller should skip this render pass.
    fn poll_frame(&mut self) -> Option<CameraFrame>;
}

/// nokhwa-backed capture. Frames are decoded on nokhwa's delivery thread and
/// published into a latest-frame slot; the engine only ever does a
/// non-blocking read of that slot, so there is no frame backlog.
#[derive(Default)]
pub struct NokhwaBackend {
    camera: Option<CallbackCamera>,
    slot: Arc<Mutex<Option<CameraFrame>>>,
}

impl NokhwaBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CaptureBackend for NokhwaBackend {
    fn open(&mut self) -> Result<StreamInfo, CaptureError> {
        if let Some(camera) = &self.camera {
            // Already streaming: report the granted format without
            // re-acquiring the device.
            let resolution = camera.resolution().map_err(map_nokhwa_error)?;
            return Ok(StreamInfo {
                width: resolution.width(),
                height: resolution.height(),
            });
        }

        let devices = query(ApiBackend::Auto).map_err(map_nokhwa_error)?;
        let device = devices.first().ok_or(CaptureError::DeviceUnavailable)?;
        info!("Opening capture device: {}", device.human_name());

        let slot = Arc::clone(&self.slot);
        let format = RequestedFormat::new::<RgbAFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = CallbackCamera::new(device.index().clone(), format, move |buffer| {
            if let Ok(decoded) = buffer.decode_image::<RgbAFormat>() {
                let frame = CameraFrame {
                    width: decoded.width(),
                    height: decoded.height(),
                    pixels: decoded.into_raw(),
                };
                if let Ok(mut latest) = slot.lock() {
                    *latest = Some(frame);
                }
            }
        })
        .map_err(map_nokhwa_error)?;

        camera.open_stream().map_err(map_nokhwa_error)?;
        let resolution = camera.resolution().map_err(map_nokhwa_error)?;
        self.camera = Some(camera);

        Ok(StreamInfo {
            width: resolution.width(),
            height: resolution.height(),
        })
    }

    fn close(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(err) = camera.stop_stream() {
                warn!("Capture stream did not stop cleanly: {err}");
            }
        }
        if let Ok(mut latest) = self.slot.lock() {
            *latest = None;
        }
    }

    fn poll_frame(&mut self) -> Option<CameraFrame> {
        // try_lock keeps the render schedule non-blocking; contention with the
        // delivery thread counts as "frame not ready yet".
        self.slot.try_lock().ok()?.take()
    }
}

/// Collapse nokhwa's error surface into the three kinds the viewer tracks.
/// Permission failures are only distinguishable by message on some platforms.
fn map_nokhwa_error(err: NokhwaError) -> CaptureError {
    let message = err.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("permission") || lowered.contains("denied") || lowered.contains("access") {
        return CaptureError::PermissionDenied;
    }
    match err {
        NokhwaError::OpenDeviceError(_, _) | NokhwaError::OpenStreamError(_) => {
            CaptureError::DeviceUnavailable
        }
        _ => CaptureError::Unknown(message),
    }
}
