//! Common SystemParam bundles to reduce parameter counts in editor systems.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::camera::{CameraZoom, EditorCamera};

/// Bundled camera and window queries for cursor-to-world calculations
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<
        'w,
        's,
        (&'static Camera, &'static GlobalTransform, &'static CameraZoom),
        With<EditorCamera>,
    >,
}

impl CameraParams<'_, '_> {
    /// Get the world position of the cursor, if available
    pub fn cursor_world_pos(&self) -> Option<Vec2> {
        let window = self.window.single().ok()?;
        let (camera, transform, _) = self.camera.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        camera.viewport_to_world_2d(transform, cursor_pos).ok()
    }

    /// Screen pixels per world unit, 1.0 if the camera is missing.
    pub fn zoom(&self) -> f32 {
        self.camera
            .single()
            .map(|(_, _, zoom)| zoom.zoom)
            .unwrap_or(1.0)
    }

    /// Convert a screen-space pixel threshold to world units.
    pub fn world_threshold(&self, pixels: f32) -> f32 {
        pixels / self.zoom()
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}
