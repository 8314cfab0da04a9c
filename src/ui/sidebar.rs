use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::map::{
    CalibrationState, MapObject, MaterialLibrary, ObjectId, ObjectMetrics, OverlaySettings,
    Selected, SelectionChanged, Shape, ShapeKind,
};
use crate::theme;

use super::materials::MaterialsWindowState;

/// Left panel: app header, object list, budget summary, and the properties
/// editor for the selected object.
#[allow(clippy::too_many_arguments)]
pub fn sidebar_ui(
    mut contexts: EguiContexts,
    mut commands: Commands,
    calibration: Res<CalibrationState>,
    library: Res<MaterialLibrary>,
    mut overlays: ResMut<OverlaySettings>,
    mut materials_window: ResMut<MaterialsWindowState>,
    mut objects: Query<(Entity, &mut MapObject, &ObjectMetrics, Has<Selected>)>,
    mut selection_changed: MessageWriter<SelectionChanged>,
) -> Result {
    let mut clicked: Option<(Entity, ObjectId)> = None;
    let mut deleted: Option<Entity> = None;

    let mut total_cost = 0.0;
    let mut total_acres = 0.0;
    let mut total_fence_ft = 0.0;
    for (_, object, metrics, _) in objects.iter() {
        total_cost += metrics.total_cost;
        match object.shape {
            Shape::Polygon(_) => total_acres += metrics.area_acres.unwrap_or(0.0),
            Shape::Polyline(_) => total_fence_ft += metrics.length_ft.unwrap_or(0.0),
            _ => {}
        }
    }

    egui::SidePanel::left("sidebar")
        .default_width(260.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Acreage Mapper").heading().size(18.0));
            let (chip_text, chip_color) = if calibration.is_calibrated {
                (
                    format!("Scale: 1 ft = {:.3} px", calibration.pixels_per_foot),
                    theme::ui::CALIBRATED_TEXT,
                )
            } else {
                ("Scale Not Calibrated".to_string(), theme::ui::UNCALIBRATED_TEXT)
            };
            ui.label(egui::RichText::new(chip_text).size(11.0).color(chip_color).strong());
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);

            // List rows are sorted by id so the panel mirrors draw order
            let mut rows: Vec<_> = objects.iter_mut().collect();
            rows.sort_by_key(|(_, object, _, _)| object.id);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Layers").heading().size(15.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(rows.len().to_string()).size(12.0).weak());
                });
            });
            ui.add_space(4.0);

            if rows.is_empty() {
                ui.label(egui::RichText::new("No objects drawn").size(13.0).weak());
            }

            egui::ScrollArea::vertical()
                .max_height(280.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for (entity, object, metrics, is_selected) in rows.iter_mut() {
                        egui::Frame::new()
                            .inner_margin(egui::Margin::symmetric(4, 4))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    let swatch = egui::Button::new("")
                                        .fill(theme::bevy_to_egui_opaque(object.color))
                                        .min_size(egui::vec2(12.0, 12.0))
                                        .stroke(if *is_selected {
                                            egui::Stroke::new(2.0, theme::ui::SELECTED_BORDER)
                                        } else {
                                            egui::Stroke::new(1.0, theme::ui::UNSELECTED_BORDER)
                                        });
                                    if ui.add(swatch).clicked() {
                                        clicked = Some((*entity, object.id));
                                    }

                                    ui.vertical(|ui| {
                                        let name =
                                            egui::RichText::new(&object.name).size(13.0).strong();
                                        if ui.selectable_label(*is_selected, name).clicked() {
                                            clicked = Some((*entity, object.id));
                                        }
                                        let kind_label = object.shape.kind().label();
                                        let subtitle = if metrics.total_cost > 0.0 {
                                            format!(
                                                "{} \u{2022} ${:.2}",
                                                kind_label, metrics.total_cost
                                            )
                                        } else {
                                            kind_label.to_string()
                                        };
                                        ui.label(egui::RichText::new(subtitle).size(10.0).weak());
                                    });

                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            let mut visible = object.visible;
                                            if ui
                                                .checkbox(&mut visible, "")
                                                .on_hover_text("Toggle visibility")
                                                .changed()
                                            {
                                                object.visible = visible;
                                            }
                                        },
                                    );
                                });
                            });
                    }
                });

            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);

            egui::CollapsingHeader::new(
                egui::RichText::new("Project Budget & Analysis").size(13.0).strong(),
            )
            .default_open(true)
            .show(ui, |ui| {
                metric_row(ui, "Est. Total", format!("${total_cost:.2}"), theme::ui::COST_TEXT);
                metric_row(
                    ui,
                    "Total Acres",
                    format!("{total_acres:.2} ac"),
                    theme::ui::LABEL_TEXT,
                );
                metric_row(
                    ui,
                    "Total Fence",
                    format!("{total_fence_ft:.0} ft"),
                    theme::ui::LABEL_TEXT,
                );
                ui.add_space(4.0);
                ui.checkbox(&mut overlays.show_water_flow, "Water Flow Viz")
                    .on_hover_text("Draw flow arrows on fences, following the nearest slope");
            });

            let selected = rows.iter_mut().find(|(_, _, _, is_selected)| *is_selected);
            if let Some((entity, object, metrics, _)) = selected {
                ui.add_space(4.0);
                ui.separator();
                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Properties").heading().size(15.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Delete").on_hover_text("Delete Object").clicked() {
                            deleted = Some(*entity);
                        }
                    });
                });
                ui.add_space(4.0);

                ui.label(egui::RichText::new("Name").size(11.0).weak());
                ui.text_edit_singleline(&mut object.name);
                ui.add_space(4.0);

                let kind = object.shape.kind();
                if kind != ShapeKind::Slope {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Material Preset").size(11.0).weak());
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.small_button("Manage").clicked() {
                                    materials_window.is_open = true;
                                }
                            },
                        );
                    });
                    let current = object
                        .material
                        .and_then(|id| library.get(id))
                        .map(|m| m.name.clone())
                        .unwrap_or_else(|| "Custom / None".to_string());
                    egui::ComboBox::from_id_salt("material_preset")
                        .selected_text(current)
                        .show_ui(ui, |ui| {
                            if ui
                                .selectable_label(object.material.is_none(), "Custom / None")
                                .clicked()
                            {
                                object.clear_material();
                            }
                            for material in library.for_shape(kind) {
                                let is_current = object.material == Some(material.id);
                                let text =
                                    format!("{} (${})", material.name, material.unit_cost);
                                if ui.selectable_label(is_current, text).clicked() {
                                    material.apply_to(object);
                                }
                            }
                        });
                    ui.add_space(4.0);

                    let cost_label = match kind {
                        ShapeKind::Polygon => "Cost per Acre",
                        ShapeKind::Polyline => "Cost per Ft",
                        _ => "Item Cost",
                    };
                    ui.label(egui::RichText::new(cost_label).size(11.0).weak());
                    let mut unit_cost = object.unit_cost;
                    if ui
                        .add(
                            egui::DragValue::new(&mut unit_cost)
                                .range(0.0..=f32::MAX)
                                .speed(0.1)
                                .prefix("$"),
                        )
                        .changed()
                    {
                        // A manual cost overrides the preset but keeps the color
                        object.unit_cost = unit_cost;
                        object.material = None;
                    }
                    ui.add_space(4.0);
                }

                ui.label(egui::RichText::new("Color").size(11.0).weak());
                ui.horizontal(|ui| {
                    for (color, name, egui_color) in theme::object_colors() {
                        let current_srgba = object.color.to_srgba();
                        let srgba = color.to_srgba();
                        let is_current = (current_srgba.red - srgba.red).abs() < 0.01
                            && (current_srgba.green - srgba.green).abs() < 0.01
                            && (current_srgba.blue - srgba.blue).abs() < 0.01;

                        let button = egui::Button::new("")
                            .fill(egui_color)
                            .min_size(egui::vec2(18.0, 18.0))
                            .stroke(if is_current {
                                egui::Stroke::new(2.0, egui::Color32::WHITE)
                            } else {
                                egui::Stroke::new(1.0, egui::Color32::DARK_GRAY)
                            });

                        let response = ui.add(button);
                        if response.clicked() {
                            object.color = color;
                        }
                        response.on_hover_text(name);
                    }
                });
                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Opacity").size(11.0).weak());
                    ui.add(
                        egui::DragValue::new(&mut object.opacity)
                            .range(0.0..=1.0)
                            .speed(0.05)
                            .fixed_decimals(2),
                    );
                });
                ui.add_space(4.0);

                if kind == ShapeKind::Polygon {
                    let area = metrics
                        .area_sq_ft
                        .map_or_else(|| "-".to_string(), |sq_ft| format!("{sq_ft:.0}"));
                    metric_row(ui, "Area (sq ft)", area, theme::ui::LABEL_TEXT);
                    let acres = metrics
                        .area_acres
                        .map_or_else(|| "-".to_string(), |acres| format!("{acres:.3}"));
                    metric_row(ui, "Acres", acres, theme::ui::CALIBRATED_TEXT);
                }
                if matches!(kind, ShapeKind::Polygon | ShapeKind::Polyline) {
                    let length = metrics
                        .length_ft
                        .map_or_else(|| "-".to_string(), |feet| format!("{feet:.1}"));
                    metric_row(ui, "Length (ft)", length, theme::ui::LABEL_TEXT);
                }
                if metrics.total_cost > 0.0 {
                    metric_row(
                        ui,
                        "Est. Cost",
                        format!("${:.2}", metrics.total_cost),
                        theme::ui::COST_TEXT,
                    );
                }
            }
        });

    if let Some((entity, id)) = clicked {
        for (other, _, _, was_selected) in objects.iter() {
            if was_selected && other != entity {
                commands.entity(other).remove::<Selected>();
            }
        }
        commands.entity(entity).insert(Selected);
        selection_changed.write(SelectionChanged { id: Some(id) });
    }
    if let Some(entity) = deleted {
        commands.entity(entity).despawn();
        selection_changed.write(SelectionChanged { id: None });
    }

    Ok(())
}

fn metric_row(ui: &mut egui::Ui, label: &str, value: String, value_color: egui::Color32) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).size(12.0).weak());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(value).size(12.0).color(value_color).strong());
        });
    });
}
