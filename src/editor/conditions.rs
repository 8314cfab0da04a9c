//! Run conditions for controlling when editor systems execute.
//!
//! These conditions help optimize performance by preventing systems from running
//! when they have no work to do.

use bevy::prelude::*;

use crate::editor::tools::{CurrentTool, EditorTool};
use crate::map::CalibrationState;
use crate::ui::DialogState;

/// Run condition: returns true when the current tool matches the specified tool.
///
/// Usage: `.run_if(tool_is(EditorTool::Select))`
pub fn tool_is(tool: EditorTool) -> impl FnMut(Res<CurrentTool>) -> bool + Clone {
    move |current: Res<CurrentTool>| current.tool == tool
}

/// Run condition: returns true when no modal dialog is open.
///
/// Use this to prevent editor input handlers from processing when
/// the user is interacting with a dialog.
///
/// Usage: `.run_if(no_dialog_open)`
pub fn no_dialog_open(dialog_state: Res<DialogState>) -> bool {
    !dialog_state.any_modal_open
}

/// Run condition: returns true while the solar tool is active on a calibrated
/// map. The shadow overlay has nothing meaningful to draw without a scale.
///
/// Usage: `.run_if(solar_overlay_active)`
pub fn solar_overlay_active(
    current_tool: Res<CurrentTool>,
    calibration: Res<CalibrationState>,
) -> bool {
    current_tool.tool == EditorTool::SunAnalysis && calibration.is_calibrated
}
