mod calibration;
mod help;
mod materials;
mod sidebar;
mod status_bar;
mod sun_panel;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::map::CalibrationMeasured;

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers check this to avoid processing clicks and
/// shortcuts while the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// Aggregates all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    calibration: Res<calibration::CalibrationDialogState>,
    materials: Res<materials::MaterialsWindowState>,
    help: Res<help::HelpWindowState>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = calibration.is_open || materials.is_open || help.is_open;
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<calibration::CalibrationDialogState>()
            .init_resource::<materials::MaterialsWindowState>()
            .init_resource::<help::HelpWindowState>()
            .add_systems(
                Update,
                calibration::open_calibration_dialog.run_if(on_message::<CalibrationMeasured>),
            )
            // The side panel renders first so the toolbar fits beside it
            .add_systems(EguiPrimaryContextPass, sidebar::sidebar_ui)
            .add_systems(
                EguiPrimaryContextPass,
                toolbar::toolbar_ui.after(sidebar::sidebar_ui),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs/overlays
                    calibration::calibration_dialog_ui,
                    materials::materials_window_ui,
                    help::help_popup_ui,
                    sun_panel::sun_panel_ui,
                    status_bar::status_bar_ui,
                )
                    .after(toolbar::toolbar_ui),
            )
            .add_systems(First, update_dialog_state);
    }
}
