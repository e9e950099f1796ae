use bevy::prelude::*;
use site_model::SceneSnapshot;

use crate::engine::core::ViewerState;
use crate::engine::loading::SceneLoader;
use crate::engine::session::ArSession;

#[derive(Component)]
pub struct StatusText;

/// Single status line, standing in for the original viewer's banner, error
/// panel and start/stop button caption.
pub fn spawn_hud(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("AR Blueprint Viewer"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
        });
}

pub fn update_status_text(
    state: Res<State<ViewerState>>,
    session: Res<ArSession>,
    loader: Res<SceneLoader>,
    scenes: Res<Assets<SceneSnapshot>>,
    mut query: Query<&mut Text, With<StatusText>>,
) {
    for mut text in &mut query {
        text.0 = match state.get() {
            ViewerState::Idle => match loader.snapshot(&scenes) {
                Some(scene) => format!(
                    "{}: press Space to start the AR view",
                    scene.project_name.as_deref().unwrap_or("AR Blueprint Viewer")
                ),
                None => "Loading scene snapshot...".to_owned(),
            },
            ViewerState::Capturing => {
                let count = session.scene().map(SceneSnapshot::element_count).unwrap_or(0);
                format!("Overlaying {count} elements. Press Space to stop.")
            }
            // One generic message for every acquisition failure; the precise
            // kind is in the logs.
            ViewerState::Error => {
                "Camera unavailable. Allow camera access and press Space to retry.".to_owned()
            }
        };
    }
}
