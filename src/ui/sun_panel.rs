use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::{CurrentTool, EditorTool, SunSettings};

/// Floating parameter strip for the solar tool, anchored under the toolbar.
/// Only shown while the tool is active.
pub fn sun_panel_ui(
    mut contexts: EguiContexts,
    current_tool: Res<CurrentTool>,
    mut sun: ResMut<SunSettings>,
) -> Result {
    if current_tool.tool != EditorTool::SunAnalysis {
        return Ok(());
    }

    egui::Window::new("Sun Analysis")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 60.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("Date").size(11.0).weak());
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::DragValue::new(&mut sun.year)
                                .range(1900..=2200)
                                .speed(0.2),
                        );
                        ui.add(egui::DragValue::new(&mut sun.month).range(1..=12).speed(0.2));
                        ui.add(egui::DragValue::new(&mut sun.day).range(1..=31).speed(0.2));
                    });
                });
                ui.separator();
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("Time").size(11.0).weak());
                    ui.horizontal(|ui| {
                        ui.add(egui::DragValue::new(&mut sun.hour).range(0..=23).speed(0.2));
                        ui.add(egui::DragValue::new(&mut sun.minute).range(0..=59).speed(0.5));
                    });
                });
                ui.separator();
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("Latitude").size(11.0).weak());
                    ui.add(
                        egui::DragValue::new(&mut sun.latitude_deg)
                            .range(-90.0..=90.0)
                            .speed(0.5)
                            .suffix("\u{00b0}"),
                    );
                });
                ui.separator();
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("Obj Height (ft)").size(11.0).weak());
                    ui.add(
                        egui::DragValue::new(&mut sun.object_height_ft)
                            .range(0.0..=500.0)
                            .speed(0.5),
                    );
                });
            });
        });

    Ok(())
}
