use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::{CurrentTool, EditorTool};
use crate::map::{
    BackgroundImage, BackgroundLoadError, ClearBackgroundRequest, LoadBackgroundRequest,
    IMAGE_EXTENSIONS,
};
use crate::theme;

use super::help::HelpWindowState;
use super::materials::MaterialsWindowState;

/// Main toolbar showing tools, background image controls, and window toggles
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut current_tool: ResMut<CurrentTool>,
    background: Res<BackgroundImage>,
    load_error: Res<BackgroundLoadError>,
    mut load_requests: MessageWriter<LoadBackgroundRequest>,
    mut clear_requests: MessageWriter<ClearBackgroundRequest>,
    mut materials_window: ResMut<MaterialsWindowState>,
    mut help_window: ResMut<HelpWindowState>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                // Tool buttons with keyboard shortcuts
                for tool in EditorTool::all() {
                    let selected = current_tool.tool == *tool;

                    let button = egui::Button::new(
                        egui::RichText::new(tool.display_name()).size(14.0).strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(selected);

                    let response = ui.add(button);
                    if response.clicked() {
                        current_tool.tool = *tool;
                    }
                    response.on_hover_text(tool.status_hint());
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if ui
                    .add(egui::Button::new("Load Image…").min_size(egui::vec2(0.0, 28.0)))
                    .clicked()
                    && let Some(path) = rfd::FileDialog::new()
                        .add_filter("Images", IMAGE_EXTENSIONS)
                        .set_title("Select a background image")
                        .pick_file()
                {
                    load_requests.write(LoadBackgroundRequest { path });
                }

                if background.is_loaded()
                    && ui
                        .add(egui::Button::new("Clear Image").min_size(egui::vec2(0.0, 28.0)))
                        .clicked()
                {
                    clear_requests.write(ClearBackgroundRequest);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add(egui::Button::new("Help").min_size(egui::vec2(0.0, 28.0)))
                        .clicked()
                    {
                        help_window.is_open = true;
                    }
                    if ui
                        .add(egui::Button::new("Materials").min_size(egui::vec2(0.0, 28.0)))
                        .clicked()
                    {
                        materials_window.is_open = true;
                    }

                    ui.add_space(8.0);
                    if let Some(message) = &load_error.message {
                        ui.colored_label(theme::ui::ERROR_TEXT, message);
                    } else if let Some(name) = background.file_name() {
                        ui.label(egui::RichText::new(name).weak());
                    }
                });
            });
        });
    Ok(())
}
