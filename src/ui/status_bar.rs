use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::{CurrentTool, EditorTool};
use crate::theme;

/// Bottom-center pill telling the user what the active tool expects next.
pub fn status_bar_ui(mut contexts: EguiContexts, current_tool: Res<CurrentTool>) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::Area::new(egui::Id::new("status_hint"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -16.0])
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(theme::ui::LABEL_BACKGROUND)
                .corner_radius(12.0)
                .inner_margin(egui::Margin::symmetric(12, 6))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let dot_color = if current_tool.tool == EditorTool::Select {
                            theme::ui::STATUS_DOT_SELECT
                        } else {
                            theme::ui::STATUS_DOT_ACTIVE
                        };
                        let (rect, _response) =
                            ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                        ui.painter().circle_filled(rect.center(), 3.0, dot_color);
                        ui.label(
                            egui::RichText::new(current_tool.tool.status_hint())
                                .size(12.0)
                                .color(egui::Color32::WHITE),
                        );
                    });
                });
        });

    Ok(())
}
