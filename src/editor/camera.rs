use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::constants::{FIT_MARGIN, MAX_ZOOM, MIN_ZOOM};
use crate::map::BackgroundImage;

use super::tools::{CurrentTool, EditorTool};

#[derive(Component)]
pub struct EditorCamera;

/// Screen pixels per world unit. The orthographic projection scale is
/// the reciprocal, applied in [`apply_camera_zoom`].
#[derive(Component)]
pub struct CameraZoom {
    pub zoom: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        CameraZoom::default(),
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

/// Middle-drag pans with any tool. Left-drag pans only when the pan or
/// solar tool is active, so drawing tools keep the left button.
pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    current_tool: Res<CurrentTool>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<EditorCamera>>,
    mut contexts: EguiContexts,
) {
    let tool_pans = matches!(
        current_tool.tool,
        EditorTool::Pan | EditorTool::SunAnalysis
    );
    let panning = mouse_button.pressed(MouseButton::Middle)
        || (tool_pans && mouse_button.pressed(MouseButton::Left));

    if !panning {
        mouse_motion.clear();
        return;
    }

    // Leave the pointer to egui while it is interacting with a widget
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_pointer_input()
    {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta / zoom.zoom;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

/// Multiplicative wheel zoom that keeps the world point under the
/// cursor fixed.
pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut camera_query: Query<
        (&mut Transform, &mut CameraZoom, &Camera, &GlobalTransform),
        With<EditorCamera>,
    >,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        scroll_events.clear();
        return;
    }

    let Ok((mut transform, mut zoom, camera, camera_transform)) = camera_query.single_mut()
    else {
        return;
    };

    let cursor_world = window_query
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok());

    for event in scroll_events.read() {
        let delta = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };

        let old_zoom = zoom.zoom;
        let new_zoom = (old_zoom * (1.0 + delta)).clamp(MIN_ZOOM, MAX_ZOOM);
        if new_zoom == old_zoom {
            continue;
        }
        zoom.zoom = new_zoom;

        if let Some(world) = cursor_world {
            let center = transform.translation.truncate();
            let shifted = world - (world - center) * (old_zoom / new_zoom);
            transform.translation.x = shifted.x;
            transform.translation.y = shifted.y;
        }
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<EditorCamera>, Changed<CameraZoom>)>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = 1.0 / zoom.zoom;
        }
    }
}

/// Re-frame the viewport when a background image arrives or goes away.
///
/// A freshly loaded plan is centered and scaled to fit inside the
/// window with a small margin, never magnified past 1:1. Clearing the
/// image returns to the default view.
pub fn fit_viewport_to_background(
    background: Res<BackgroundImage>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut camera_query: Query<(&mut Transform, &mut CameraZoom), With<EditorCamera>>,
) {
    if !background.is_changed() || background.is_added() {
        return;
    }

    let Ok((mut transform, mut zoom)) = camera_query.single_mut() else {
        return;
    };

    match background.size {
        Some(size) => {
            if let Ok(window) = window_query.single() {
                let fit = (window.width() / size.x)
                    .min(window.height() / size.y)
                    .min(1.0)
                    * FIT_MARGIN;
                zoom.zoom = fit.clamp(MIN_ZOOM, MAX_ZOOM);
            }
        }
        None => {
            zoom.zoom = 1.0;
        }
    }

    transform.translation.x = 0.0;
    transform.translation.y = 0.0;
}
