use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::{CurrentTool, EditorTool};
use crate::map::{CalibrationMeasured, CalibrationState};
use crate::theme;

/// Scale dialog state. `pixel_distance` holds the traced line length until
/// the user confirms or cancels.
#[derive(Resource, Default)]
pub struct CalibrationDialogState {
    pub is_open: bool,
    pub pixel_distance: f32,
    pub feet_input: String,
    pub error: Option<String>,
}

/// Opens the dialog when the calibrate tool finishes its reference line.
/// The endpoints are remembered so the scale survives a save.
pub fn open_calibration_dialog(
    mut measured: MessageReader<CalibrationMeasured>,
    mut dialog: ResMut<CalibrationDialogState>,
    mut calibration: ResMut<CalibrationState>,
) {
    let Some(message) = measured.read().last() else {
        return;
    };
    calibration.point1 = Some(message.point1);
    calibration.point2 = Some(message.point2);
    dialog.pixel_distance = message.pixel_distance;
    dialog.feet_input.clear();
    dialog.error = None;
    dialog.is_open = true;
}

/// Modal asking for the real-world length of the traced line.
pub fn calibration_dialog_ui(
    mut contexts: EguiContexts,
    mut dialog: ResMut<CalibrationDialogState>,
    mut calibration: ResMut<CalibrationState>,
    mut current_tool: ResMut<CurrentTool>,
) -> Result {
    if !dialog.is_open {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    let mut close_dialog = false;
    let mut do_commit = false;

    let parsed = dialog.feet_input.trim().parse::<f32>().ok();
    let valid = parsed.is_some_and(|feet| feet.is_finite() && feet > 0.0);

    egui::Window::new("Calibrate Scale")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "You drew a line of {:.1} pixels.",
                    dialog.pixel_distance
                ))
                .strong(),
            );
            ui.label("How many feet does this represent in the real world?");
            ui.add_space(8.0);

            ui.label(egui::RichText::new("Distance (Feet)").size(11.0).weak());
            let response = ui.add(
                egui::TextEdit::singleline(&mut dialog.feet_input).hint_text("e.g. 100"),
            );

            // Request focus only when first opened (not every frame)
            if !response.has_focus() {
                response.request_focus();
            }

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                do_commit = true;
            }

            if let Some(ref error) = dialog.error {
                ui.add_space(4.0);
                ui.colored_label(theme::ui::ERROR_TEXT, error);
            }

            ui.add_space(8.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_enabled_ui(valid, |ui| {
                    if ui.button("Set Scale").clicked() {
                        do_commit = true;
                    }
                });
                if ui.button("Cancel").clicked() {
                    close_dialog = true;
                }
            });
        });

    if do_commit && let Some(feet) = parsed {
        match calibration.commit(dialog.pixel_distance, feet) {
            Ok(()) => {
                dialog.is_open = false;
                current_tool.tool = EditorTool::Select;
            }
            Err(message) => dialog.error = Some(message),
        }
    }

    if close_dialog || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        dialog.is_open = false;
    }

    Ok(())
}
