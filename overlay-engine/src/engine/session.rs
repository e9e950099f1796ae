use bevy::prelude::*;
use site_model::{SceneError, SceneSnapshot};
use thiserror::Error;

use crate::engine::capture::{CameraFrame, CaptureDeviceManager, CaptureError};
use crate::engine::loading::SceneLoader;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("scene rejected: {0}")]
    InvalidScene(SceneError),
    #[error(transparent)]
    Capture(CaptureError),
}

/// Orchestrates one AR session: validates the snapshot, drives the capture
/// device lifecycle and carries the read-only scene for the render systems.
/// The snapshot never changes while a session is active.
#[derive(Resource)]
pub struct ArSession {
    capture: CaptureDeviceManager,
    scene: Option<SceneSnapshot>,
    active: bool,
    last_error: Option<SessionError>,
}

impl ArSession {
    pub fn new(capture: CaptureDeviceManager) -> Self {
        Self {
            capture,
            scene: None,
            active: false,
            last_error: None,
        }
    }

    /// Validate the snapshot and acquire the camera. The zero-dimension guard
    /// runs before any device call; acquisition failures leave no resources
    /// held. A second call while active is a no-op returning `Ok`.
    pub fn start_session(&mut self, scene: SceneSnapshot) -> Result<(), SessionError> {
        if self.active {
            return Ok(());
        }

        scene.validate().map_err(SessionError::InvalidScene)?;

        match self.capture.start() {
            Ok(info) => {
                info!(
                    "→ AR session started: {} elements over a {}x{} feed",
                    scene.element_count(),
                    info.width,
                    info.height
                );
                self.scene = Some(scene);
                self.active = true;
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                error!("Camera acquisition failed: {err}");
                let err = SessionError::Capture(err);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Cancel the render loop and release the camera. Always succeeds, always
    /// idempotent, callable before any `start_session`.
    pub fn stop_session(&mut self) {
        if self.active {
            info!("→ AR session stopped");
        }
        self.active = false;
        self.scene = None;
        self.capture.stop();
    }

    /// Start/stop based on current state; returns whether the session is
    /// active afterwards. Backs the single on-screen control.
    pub fn toggle(&mut self, scene: SceneSnapshot) -> Result<bool, SessionError> {
        if self.active {
            self.stop_session();
            Ok(false)
        } else {
            self.last_error = None;
            self.start_session(scene)?;
            Ok(true)
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn scene(&self) -> Option<&SceneSnapshot> {
        self.scene.as_ref()
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Non-blocking poll of the capture device, gated on the session being
    /// active so a pending frame callback after `stop_session` never reaches
    /// the device.
    pub fn latest_frame(&mut self) -> Option<CameraFrame> {
        if !self.active {
            return None;
        }
        self.capture.latest_frame()
    }
}

/// Single on-screen control: Space toggles the session, doubling as the retry
/// action after an acquisition failure.
pub fn handle_session_toggle(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<ArSession>,
    loader: Res<SceneLoader>,
    scenes: Res<Assets<SceneSnapshot>>,
) {
    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }

    if session.is_active() {
        session.stop_session();
        return;
    }

    let Some(scene) = loader.snapshot(&scenes) else {
        warn!("Scene snapshot not loaded yet, ignoring toggle");
        return;
    };

    if let Err(err) = session.toggle(scene.clone()) {
        // The acquisition failure is already logged with its internal kind;
        // the HUD shows the generic message via the Error state.
        debug!("Session toggle rejected: {err}");
    }
}
