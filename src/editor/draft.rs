//! In-progress drawing state for the multi-click tools.
//!
//! Zones, fences, slope vectors, and calibration lines accumulate
//! vertices one left click at a time. A right click finishes the draft,
//! except for slope vectors which complete themselves on the second
//! click. Point markers skip the draft entirely.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::{POLYGON_CLOSE_EPSILON, SNAP_THRESHOLD_PX};
use crate::geometry::{distance, find_nearest_point};
use crate::map::{
    CalibrationMeasured, MapObject, ObjectCreated, ObjectIds, ObjectMetrics, Shape,
};

use super::params::{is_cursor_over_ui, CameraParams};
use super::tools::{CurrentTool, EditorTool};

/// Vertices committed so far, plus the live cursor and snap candidate
/// used for preview rendering.
#[derive(Resource, Default)]
pub struct DraftState {
    /// Tool the committed points belong to. A mismatch with the active
    /// tool clears the draft.
    pub tool: Option<EditorTool>,
    pub points: Vec<Vec2>,
    pub cursor_world: Option<Vec2>,
    pub snap_target: Option<Vec2>,
}

impl DraftState {
    pub fn clear(&mut self) {
        self.tool = None;
        self.points.clear();
        self.snap_target = None;
    }

    /// The position a click would commit: the snap candidate if one is
    /// active, otherwise the raw cursor position.
    pub fn commit_pos(&self) -> Option<Vec2> {
        self.snap_target.or(self.cursor_world)
    }
}

/// Abandon leftover vertices when the user switches tools mid-draft.
pub fn reset_draft_on_tool_change(
    current_tool: Res<CurrentTool>,
    mut draft: ResMut<DraftState>,
) {
    if !current_tool.is_changed() {
        return;
    }
    if draft.tool.is_some_and(|tool| tool != current_tool.tool) {
        draft.clear();
    }
}

/// Track the cursor in world space and look for a snap candidate.
///
/// Snapping considers every vertex of every committed object plus the
/// current draft, within a screen-constant radius.
pub fn update_draft_cursor(
    camera: CameraParams,
    current_tool: Res<CurrentTool>,
    objects: Query<&MapObject>,
    mut draft: ResMut<DraftState>,
) {
    let cursor = camera.cursor_world_pos();
    draft.cursor_world = cursor;

    let Some(cursor) = cursor else {
        draft.snap_target = None;
        return;
    };

    if current_tool.tool.uses_snapping() {
        let mut candidates: Vec<Vec2> = objects
            .iter()
            .flat_map(|object| object.shape.points().iter().copied())
            .collect();
        candidates.extend(draft.points.iter().copied());

        let threshold = camera.world_threshold(SNAP_THRESHOLD_PX);
        draft.snap_target = find_nearest_point(&candidates, cursor, threshold);
    } else {
        draft.snap_target = None;
    }
}

/// Feed mouse clicks into the active drawing tool.
pub fn handle_draw_clicks(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    current_tool: Res<CurrentTool>,
    objects: Query<&MapObject>,
    mut draft: ResMut<DraftState>,
    mut ids: ResMut<ObjectIds>,
    mut created: MessageWriter<ObjectCreated>,
    mut measured: MessageWriter<CalibrationMeasured>,
    mut contexts: EguiContexts,
) {
    let tool = current_tool.tool;
    if !tool.is_draft_tool() && tool != EditorTool::DrawPoint {
        return;
    }

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let left = mouse_button.just_pressed(MouseButton::Left);
    let right = mouse_button.just_pressed(MouseButton::Right);
    if !left && !right {
        return;
    }

    if tool == EditorTool::DrawPoint {
        if left && let Some(commit) = draft.commit_pos() {
            spawn_object(&mut commands, &mut ids, &objects, Shape::Point(commit), &mut created);
        }
        return;
    }

    if left {
        let Some(commit) = draft.commit_pos() else {
            return;
        };
        draft.tool = Some(tool);
        draft.points.push(commit);

        if let Some(policy) = tool.finalize_policy()
            && policy.auto_finish_at == Some(draft.points.len())
        {
            finish_draft(&mut commands, &mut ids, &objects, &mut draft, tool, &mut created, &mut measured);
        }
    } else {
        finish_draft(&mut commands, &mut ids, &objects, &mut draft, tool, &mut created, &mut measured);
    }
}

/// Close out the draft: absorb the live snap candidate, then emit an
/// object or a calibration measurement if enough vertices were placed.
///
/// A snap candidate within [`POLYGON_CLOSE_EPSILON`] of a zone's first
/// vertex is the closing click and is not duplicated into the ring.
fn finish_draft(
    commands: &mut Commands,
    ids: &mut ObjectIds,
    objects: &Query<&MapObject>,
    draft: &mut DraftState,
    tool: EditorTool,
    created: &mut MessageWriter<ObjectCreated>,
    measured: &mut MessageWriter<CalibrationMeasured>,
) {
    if draft.points.is_empty() {
        return;
    }

    let mut final_points = draft.points.clone();
    if let Some(snap) = draft.snap_target {
        let closes_zone = tool == EditorTool::DrawZone
            && final_points.len() > 2
            && distance(snap, final_points[0]) < POLYGON_CLOSE_EPSILON;
        if !closes_zone {
            final_points.push(snap);
        }
    }

    match tool {
        EditorTool::Calibrate => {
            if final_points.len() >= 2 {
                let point1 = final_points[0];
                let point2 = final_points[final_points.len() - 1];
                let pixel_distance = distance(point1, point2);
                measured.write(CalibrationMeasured {
                    point1,
                    point2,
                    pixel_distance,
                });
            }
        }
        EditorTool::DrawSlope => {
            if final_points.len() >= 2 {
                let shape = Shape::Slope([final_points[0], final_points[1]]);
                spawn_object(commands, ids, objects, shape, created);
            }
        }
        EditorTool::DrawZone => {
            if let Some(shape) = Shape::polygon(final_points) {
                spawn_object(commands, ids, objects, shape, created);
            }
        }
        EditorTool::DrawFence => {
            if let Some(shape) = Shape::polyline(final_points) {
                spawn_object(commands, ids, objects, shape, created);
            }
        }
        _ => {}
    }

    draft.clear();
}

fn spawn_object(
    commands: &mut Commands,
    ids: &mut ObjectIds,
    objects: &Query<&MapObject>,
    shape: Shape,
    created: &mut MessageWriter<ObjectCreated>,
) {
    let kind = shape.kind();
    let ordinal = objects
        .iter()
        .filter(|object| object.shape.kind() == kind)
        .count()
        + 1;

    let id = ids.allocate();
    let object = MapObject::new(id, ordinal, shape);
    info!("Created {} \"{}\"", kind.label(), object.name);

    let entity = commands.spawn((object, ObjectMetrics::default())).id();
    created.write(ObjectCreated { entity, id });
}
