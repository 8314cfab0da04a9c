mod camera;
mod conditions;
mod draft;
pub mod params;
mod render;
mod selection;
mod solar;
pub mod tools;

pub use solar::SunSettings;
pub use tools::{CurrentTool, EditorTool};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use conditions::{no_dialog_open, solar_overlay_active, tool_is};

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<tools::CurrentTool>()
            .init_resource::<draft::DraftState>()
            .init_resource::<solar::SunSettings>()
            .init_gizmo_group::<render::MapGizmoGroup>()
            .init_gizmo_group::<render::AccentGizmoGroup>()
            .init_gizmo_group::<render::GridGizmoGroup>()
            .init_gizmo_group::<solar::ShadowGizmoGroup>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    render::configure_map_gizmos,
                    solar::configure_shadow_gizmos,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    camera::fit_viewport_to_background,
                    tools::update_cursor_icon,
                ),
            )
            // Input pipeline: shortcuts may switch the tool, the draft reacts
            // to the switch, then clicks land on the up-to-date draft
            .add_systems(
                Update,
                (
                    tools::handle_tool_shortcuts,
                    draft::reset_draft_on_tool_change,
                    draft::update_draft_cursor,
                    draft::handle_draw_clicks,
                )
                    .chain()
                    .run_if(no_dialog_open),
            )
            .add_systems(
                Update,
                (
                    selection::handle_select_click
                        .run_if(no_dialog_open)
                        .run_if(tool_is(EditorTool::Select)),
                    selection::handle_delete.run_if(no_dialog_open),
                    selection::select_created_object,
                ),
            )
            .add_systems(
                Update,
                (
                    render::draw_reference_grid,
                    render::draw_objects,
                    render::draw_draft_preview,
                    solar::draw_shadow_overlay.run_if(solar_overlay_active),
                ),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    render::draw_canvas_labels,
                    solar::draw_solar_hud.run_if(solar_overlay_active),
                ),
            );
    }
}
