//! Object picking and deletion.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::{LINE_HIT_THRESHOLD_PX, POINT_HIT_RADIUS_PX};
use crate::geometry::{distance, point_in_polygon, point_near_polyline};
use crate::map::{MapObject, ObjectCreated, ObjectId, Selected, SelectionChanged, Shape};

use super::params::{is_cursor_over_ui, CameraParams};
use super::tools::{CurrentTool, EditorTool};

/// Whether a click at `point` counts as hitting `shape`.
///
/// Pick radii are screen-space pixels divided by zoom, so the feel is
/// constant at any magnification. Slope vectors use an ellipse test:
/// the detour through the click exceeds the segment length by less
/// than the tolerance only near the segment.
fn shape_hit(shape: &Shape, point: Vec2, zoom: f32) -> bool {
    match shape {
        Shape::Point(p) => distance(point, *p) < POINT_HIT_RADIUS_PX / zoom,
        Shape::Polygon(points) => point_in_polygon(point, points),
        Shape::Polyline(points) => {
            point_near_polyline(point, points, LINE_HIT_THRESHOLD_PX / zoom)
        }
        Shape::Slope([a, b]) => {
            let detour = distance(point, *a) + distance(point, *b);
            detour - distance(*a, *b) < LINE_HIT_THRESHOLD_PX / zoom
        }
    }
}

/// Pick the topmost object under `point`, newest creation first.
///
/// Ids allocate monotonically, so the highest id among the hits is the
/// most recently drawn object.
pub fn hit_test<'a, I>(objects: I, point: Vec2, zoom: f32) -> Option<ObjectId>
where
    I: IntoIterator<Item = (ObjectId, &'a Shape)>,
{
    let mut hit: Option<ObjectId> = None;
    for (id, shape) in objects {
        if shape_hit(shape, point, zoom) && hit.is_none_or(|best| id > best) {
            hit = Some(id);
        }
    }
    hit
}

pub fn handle_select_click(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    camera: CameraParams,
    objects: Query<(Entity, &MapObject)>,
    selected: Query<Entity, With<Selected>>,
    mut selection_changed: MessageWriter<SelectionChanged>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(cursor) = camera.cursor_world_pos() else {
        return;
    };

    let found = hit_test(
        objects.iter().map(|(_, object)| (object.id, &object.shape)),
        cursor,
        camera.zoom(),
    );

    for entity in selected.iter() {
        commands.entity(entity).remove::<Selected>();
    }
    if let Some(id) = found
        && let Some((entity, _)) = objects.iter().find(|(_, object)| object.id == id)
    {
        commands.entity(entity).insert(Selected);
    }

    selection_changed.write(SelectionChanged { id: found });
}

/// Delete and Backspace remove the selected object.
pub fn handle_delete(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    selected: Query<(Entity, &MapObject), With<Selected>>,
    mut selection_changed: MessageWriter<SelectionChanged>,
    mut contexts: EguiContexts,
) {
    if !keyboard.just_pressed(KeyCode::Delete) && !keyboard.just_pressed(KeyCode::Backspace) {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let mut deleted = false;
    for (entity, object) in selected.iter() {
        info!("Deleted {} \"{}\"", object.shape.kind().label(), object.name);
        commands.entity(entity).despawn();
        deleted = true;
    }

    if deleted {
        selection_changed.write(SelectionChanged { id: None });
    }
}

/// A finished drawing becomes the selection and hands control back to
/// the select tool.
pub fn select_created_object(
    mut commands: Commands,
    mut created: MessageReader<ObjectCreated>,
    selected: Query<Entity, With<Selected>>,
    mut current_tool: ResMut<CurrentTool>,
    mut selection_changed: MessageWriter<SelectionChanged>,
) {
    let Some(message) = created.read().last() else {
        return;
    };

    for entity in selected.iter() {
        commands.entity(entity).remove::<Selected>();
    }
    commands.entity(message.entity).insert(Selected);
    current_tool.tool = EditorTool::Select;
    selection_changed.write(SelectionChanged {
        id: Some(message.id),
    });
}
