use bevy::prelude::*;

use crate::engine::session::ArSession;

/// Overlay renderer lifecycle. Idle → Capturing → Idle on a normal session;
/// a failed acquisition routes through Error until the user retries.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum ViewerState {
    #[default]
    Idle,
    Capturing,
    Error,
}

/// Map the session resource onto renderer state transitions. Runs every frame
/// so a `stop_session` from any call site is reflected before the next draw.
pub fn sync_viewer_state(
    session: Res<ArSession>,
    state: Res<State<ViewerState>>,
    mut next_state: ResMut<NextState<ViewerState>>,
) {
    let target = if session.is_active() {
        ViewerState::Capturing
    } else if session.last_error().is_some() {
        ViewerState::Error
    } else {
        ViewerState::Idle
    };

    if *state.get() != target {
        info!("→ Viewer state: {target:?}");
        next_state.set(target);
    }
}
