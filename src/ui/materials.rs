use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::map::{MaterialId, MaterialKind, MaterialLibrary};
use crate::theme;

/// Materials window state. The draft fields hold the preset being composed
/// until Add moves it into the library.
#[derive(Resource)]
pub struct MaterialsWindowState {
    pub is_open: bool,
    pub name: String,
    pub kind: MaterialKind,
    pub unit_cost: f32,
    pub color: Color,
}

impl Default for MaterialsWindowState {
    fn default() -> Self {
        Self {
            is_open: false,
            name: String::new(),
            kind: MaterialKind::Linear,
            unit_cost: 0.0,
            color: Color::WHITE,
        }
    }
}

/// Library editor: compose new presets and delete old ones.
pub fn materials_window_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<MaterialsWindowState>,
    mut library: ResMut<MaterialLibrary>,
) -> Result {
    if !state.is_open {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    let mut remove: Option<MaterialId> = None;

    egui::Window::new("Materials Library")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.add(
                    egui::TextEdit::singleline(&mut state.name)
                        .hint_text("e.g. Woven Wire")
                        .desired_width(140.0),
                );
                ui.label("Type:");
                egui::ComboBox::from_id_salt("new_material_kind")
                    .selected_text(state.kind.picker_label())
                    .show_ui(ui, |ui| {
                        for kind in MaterialKind::all() {
                            if ui
                                .selectable_label(state.kind == *kind, kind.picker_label())
                                .clicked()
                            {
                                state.kind = *kind;
                            }
                        }
                    });
            });
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Cost ($):");
                ui.add(
                    egui::DragValue::new(&mut state.unit_cost)
                        .range(0.0..=f32::MAX)
                        .speed(0.1),
                );
                ui.label("Color:");
                for (color, name, egui_color) in theme::object_colors() {
                    let current = state.color.to_srgba();
                    let srgba = color.to_srgba();
                    let is_current = (current.red - srgba.red).abs() < 0.01
                        && (current.green - srgba.green).abs() < 0.01
                        && (current.blue - srgba.blue).abs() < 0.01;

                    let button = egui::Button::new("")
                        .fill(egui_color)
                        .min_size(egui::vec2(14.0, 14.0))
                        .stroke(if is_current {
                            egui::Stroke::new(2.0, egui::Color32::WHITE)
                        } else {
                            egui::Stroke::new(1.0, egui::Color32::DARK_GRAY)
                        });

                    let response = ui.add(button);
                    if response.clicked() {
                        state.color = color;
                    }
                    response.on_hover_text(name);
                }
            });
            ui.add_space(4.0);

            let can_add = !state.name.trim().is_empty();
            ui.add_enabled_ui(can_add, |ui| {
                if ui.button("Add").clicked() {
                    let name = state.name.trim().to_string();
                    library.add(name, state.kind, state.unit_cost, state.color);
                    state.name.clear();
                    state.kind = MaterialKind::Linear;
                    state.unit_cost = 0.0;
                    state.color = Color::WHITE;
                }
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            if library.is_empty() {
                ui.label(egui::RichText::new("No materials defined.").weak().italics());
            } else {
                egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    for material in library.iter() {
                        ui.horizontal(|ui| {
                            let (rect, _response) = ui.allocate_exact_size(
                                egui::vec2(14.0, 14.0),
                                egui::Sense::hover(),
                            );
                            ui.painter().circle_filled(
                                rect.center(),
                                5.0,
                                theme::bevy_to_egui_opaque(material.color),
                            );
                            ui.label(egui::RichText::new(&material.name).size(13.0).strong());
                            ui.label(
                                egui::RichText::new(material.kind.unit_label()).size(10.0).weak(),
                            );
                            ui.label(
                                egui::RichText::new(format!("${:.2}", material.unit_cost))
                                    .size(12.0)
                                    .color(theme::ui::COST_TEXT),
                            );
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("Remove").clicked() {
                                        remove = Some(material.id);
                                    }
                                },
                            );
                        });
                    }
                });
            }

            ui.add_space(8.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                if ui.button("Close").clicked() {
                    state.is_open = false;
                }
            });
        });

    if let Some(id) = remove {
        library.remove(id);
    }

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.is_open = false;
    }

    Ok(())
}
