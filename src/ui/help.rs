//! Help popup window with controls and a quick-start walkthrough.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Resource to track whether the help window is open
#[derive(Resource, Default)]
pub struct HelpWindowState {
    pub is_open: bool,
}

pub fn help_popup_ui(
    mut contexts: EguiContexts,
    mut help_state: ResMut<HelpWindowState>,
) -> Result {
    if !help_state.is_open {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Help & Controls")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(400.0)
        .max_height(700.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                render_mouse_section(ui);

                ui.add_space(10.0);
                ui.separator();

                render_tools_section(ui);

                ui.add_space(10.0);
                ui.separator();

                render_shortcuts_section(ui);

                ui.add_space(10.0);
                ui.separator();

                render_quick_start_section(ui);

                ui.add_space(10.0);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    if ui.button("Close").clicked() {
                        help_state.is_open = false;
                    }
                });
            });
        });

    // Close on Escape key
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        help_state.is_open = false;
    }

    Ok(())
}

fn render_mouse_section(ui: &mut egui::Ui) {
    ui.heading("Mouse & Touch");
    egui::Grid::new("mouse_grid")
        .num_columns(2)
        .spacing([20.0, 4.0])
        .show(ui, |ui| {
            ui.strong("Left Click");
            ui.label("Draw / Select");
            ui.end_row();

            ui.strong("Right Click");
            ui.label("Finish Shape");
            ui.end_row();

            ui.strong("Scroll / Pinch");
            ui.label("Zoom");
            ui.end_row();

            ui.strong("Drag / Middle Click");
            ui.label("Pan Map");
            ui.end_row();
        });
}

fn render_tools_section(ui: &mut egui::Ui) {
    ui.heading("Tools");
    egui::Grid::new("tools_grid")
        .num_columns(2)
        .spacing([20.0, 4.0])
        .show(ui, |ui| {
            ui.strong("V");
            ui.label("Select - Click objects to select them");
            ui.end_row();

            ui.strong("H");
            ui.label("Pan - Drag to move the map");
            ui.end_row();

            ui.strong("Z");
            ui.label("Zone - Trace a field or paddock outline");
            ui.end_row();

            ui.strong("F");
            ui.label("Fence - Trace a fence run");
            ui.end_row();

            ui.strong("M");
            ui.label("Point - Drop a marker for a gate or trough");
            ui.end_row();

            ui.strong("S");
            ui.label("Slope - Two clicks, high point then low point");
            ui.end_row();

            ui.strong("C");
            ui.label("Scale - Trace a known distance to calibrate");
            ui.end_row();

            ui.strong("U");
            ui.label("Solar - Shadow length at a date and time");
            ui.end_row();
        });
}

fn render_shortcuts_section(ui: &mut egui::Ui) {
    ui.heading("Keyboard Shortcuts");
    egui::Grid::new("shortcuts_grid")
        .num_columns(2)
        .spacing([20.0, 4.0])
        .show(ui, |ui| {
            ui.strong("Del / Backspace");
            ui.label("Delete selected object");
            ui.end_row();

            ui.strong("Esc");
            ui.label("Cancel drawing / deselect");
            ui.end_row();
        });
}

fn render_quick_start_section(ui: &mut egui::Ui) {
    ui.heading("Quick Start");
    ui.label("1. Upload a map image or screenshot of your property.");
    ui.label(
        "2. Select the Scale tool. Draw a line over a known distance \
         (e.g., a 10ft gate) and enter \"10\".",
    );
    ui.label("3. Draw Zones (Polygons) for acres and Fences (Polylines) for length.");
}
