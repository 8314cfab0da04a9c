//! Canvas rendering for map objects, draft previews, and floating labels.
//!
//! World geometry is drawn with gizmos. Text that must stay screen-sized
//! (slope tags, the live measurement readout) goes through egui areas
//! positioned via `world_to_viewport`.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::constants::{GRID_SPACING, POINT_RADIUS};
use crate::geometry;
use crate::map::{BackgroundImage, CalibrationState, MapObject, OverlaySettings, Selected, Shape};
use crate::theme;

use super::camera::EditorCamera;
use super::draft::DraftState;
use super::params::CameraParams;
use super::tools::{CurrentTool, EditorTool};

/// Screen-space dash length for selected outlines
const DASH_LENGTH_PX: f32 = 5.0;

/// Screen-space arrowhead length on slope vectors
const SLOPE_TIP_PX: f32 = 15.0;

/// Screen-space shaft length of a water flow arrow
const FLOW_ARROW_LENGTH_PX: f32 = 10.0;

/// Screen-space arrowhead length on water flow arrows
const FLOW_TIP_PX: f32 = 4.0;

/// Screen-space radius of draft vertex handles
const DRAFT_VERTEX_RADIUS_PX: f32 = 4.0;

/// Screen-space radius of the snap target ring
const SNAP_RING_RADIUS_PX: f32 = 8.0;

/// Screen-space spacing between fill scanlines, matched to the line width
/// so fills read as solid
const FILL_SPACING_PX: f32 = 2.0;

// ============================================================================
// Gizmo Configuration
// ============================================================================

/// Standard-weight strokes: object outlines, fills, drafts, flow arrows
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct MapGizmoGroup;

/// Heavier strokes: slope arrows and selection outlines
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct AccentGizmoGroup;

/// Hairline grid for the empty canvas
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct GridGizmoGroup;

pub fn configure_map_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (map_config, _) = config_store.config_mut::<MapGizmoGroup>();
    map_config.line.width = 2.0;

    let (accent_config, _) = config_store.config_mut::<AccentGizmoGroup>();
    accent_config.line.width = 3.0;

    let (grid_config, _) = config_store.config_mut::<GridGizmoGroup>();
    grid_config.line.width = 0.5;
}

// ============================================================================
// Reference Grid
// ============================================================================

/// Draw the fallback grid while no background image is loaded.
pub fn draw_reference_grid(
    mut gizmos: Gizmos<GridGizmoGroup>,
    background: Res<BackgroundImage>,
    params: CameraParams,
) {
    if background.is_loaded() {
        return;
    }

    let Ok(window) = params.window.single() else {
        return;
    };
    let Ok((_, camera_transform, zoom)) = params.camera.single() else {
        return;
    };

    let view_width = window.width() / zoom.zoom;
    let view_height = window.height() / zoom.zoom;
    let camera_pos = camera_transform.translation().truncate();

    let start_x = ((camera_pos.x - view_width / 2.0) / GRID_SPACING).floor() as i32;
    let end_x = ((camera_pos.x + view_width / 2.0) / GRID_SPACING).ceil() as i32;
    let start_y = ((camera_pos.y - view_height / 2.0) / GRID_SPACING).floor() as i32;
    let end_y = ((camera_pos.y + view_height / 2.0) / GRID_SPACING).ceil() as i32;

    for x in start_x..=end_x {
        let x_pos = x as f32 * GRID_SPACING;
        gizmos.line_2d(
            Vec2::new(x_pos, start_y as f32 * GRID_SPACING),
            Vec2::new(x_pos, end_y as f32 * GRID_SPACING),
            theme::GRID_COLOR,
        );
    }

    for y in start_y..=end_y {
        let y_pos = y as f32 * GRID_SPACING;
        gizmos.line_2d(
            Vec2::new(start_x as f32 * GRID_SPACING, y_pos),
            Vec2::new(end_x as f32 * GRID_SPACING, y_pos),
            theme::GRID_COLOR,
        );
    }
}

// ============================================================================
// Map Objects
// ============================================================================

/// Draw all visible map objects in creation order, oldest first, so newer
/// objects paint over older ones the same way hit testing resolves them.
pub fn draw_objects(
    mut map_gizmos: Gizmos<MapGizmoGroup>,
    mut accent_gizmos: Gizmos<AccentGizmoGroup>,
    objects: Query<(&MapObject, Has<Selected>)>,
    overlay: Res<OverlaySettings>,
    params: CameraParams,
) {
    let zoom = params.zoom();

    let mut ordered: Vec<(&MapObject, bool)> = objects.iter().collect();
    ordered.sort_by_key(|(object, _)| object.id);

    // Flow arrows follow the nearest slope, hidden slopes included
    let slopes: Vec<[Vec2; 2]> = ordered
        .iter()
        .filter_map(|(object, _)| match &object.shape {
            Shape::Slope(points) => Some(*points),
            _ => None,
        })
        .collect();

    for (object, selected) in ordered {
        if !object.visible {
            continue;
        }

        match &object.shape {
            Shape::Point(position) => {
                fill_circle(&mut map_gizmos, *position, POINT_RADIUS, object.color, zoom);
                if selected {
                    map_gizmos.circle_2d(
                        Isometry2d::from_translation(*position),
                        POINT_RADIUS,
                        theme::SELECTED_POINT_RING,
                    );
                }
            }
            Shape::Slope([start, end]) => {
                accent_gizmos
                    .arrow_2d(*start, *end, theme::SLOPE_COLOR)
                    .with_tip_length(SLOPE_TIP_PX / zoom);
            }
            Shape::Polyline(points) => {
                draw_path(
                    &mut map_gizmos,
                    &mut accent_gizmos,
                    points,
                    false,
                    object.color,
                    selected,
                    zoom,
                );
                if overlay.show_water_flow && !slopes.is_empty() {
                    draw_flow_arrows(&mut map_gizmos, points, &slopes, zoom);
                }
            }
            Shape::Polygon(points) => {
                fill_polygon(
                    &mut map_gizmos,
                    points,
                    object.color.with_alpha(object.opacity),
                    zoom,
                );
                draw_path(
                    &mut map_gizmos,
                    &mut accent_gizmos,
                    points,
                    true,
                    object.color,
                    selected,
                    zoom,
                );
            }
        }
    }
}

fn draw_path(
    solid: &mut Gizmos<MapGizmoGroup>,
    accent: &mut Gizmos<AccentGizmoGroup>,
    points: &[Vec2],
    closed: bool,
    color: Color,
    selected: bool,
    zoom: f32,
) {
    if selected {
        dashed_path(
            accent,
            points,
            closed,
            DASH_LENGTH_PX / zoom,
            theme::SELECTION_COLOR,
        );
    } else if closed {
        let ring = points.iter().copied().chain(points.first().copied());
        solid.linestrip_2d(ring, color);
    } else {
        solid.linestrip_2d(points.iter().copied(), color);
    }
}

/// Draw a path as alternating on/off dashes of equal length, carrying the
/// dash phase across vertices.
fn dashed_path<Config: GizmoConfigGroup>(
    gizmos: &mut Gizmos<Config>,
    points: &[Vec2],
    closed: bool,
    dash: f32,
    color: Color,
) {
    if points.len() < 2 || dash <= 0.0 {
        return;
    }

    let mut drawing = true;
    let mut budget = dash;
    let segments = if closed {
        points.len()
    } else {
        points.len() - 1
    };

    for i in 0..segments {
        let mut from = points[i];
        let to = points[(i + 1) % points.len()];
        let mut remaining = from.distance(to);
        if remaining <= f32::EPSILON {
            continue;
        }
        let direction = (to - from) / remaining;

        while remaining > 0.0 {
            let run = budget.min(remaining);
            let next = from + direction * run;
            if drawing {
                gizmos.line_2d(from, next, color);
            }
            from = next;
            remaining -= run;
            budget -= run;
            if budget <= 0.0 {
                drawing = !drawing;
                budget = dash;
            }
        }
    }
}

/// Fill a disc with concentric circles spaced to overlap at the configured
/// line width.
pub(super) fn fill_circle<Config: GizmoConfigGroup>(
    gizmos: &mut Gizmos<Config>,
    center: Vec2,
    radius: f32,
    color: Color,
    zoom: f32,
) {
    let step = FILL_SPACING_PX / zoom;
    let mut r = radius;
    while r > 0.0 {
        gizmos.circle_2d(Isometry2d::from_translation(center), r, color);
        r -= step;
    }
}

/// Fill a polygon with horizontal scanlines using even-odd spans.
fn fill_polygon(gizmos: &mut Gizmos<MapGizmoGroup>, points: &[Vec2], color: Color, zoom: f32) {
    let Some(min_y) = points.iter().map(|p| p.y).reduce(f32::min) else {
        return;
    };
    let Some(max_y) = points.iter().map(|p| p.y).reduce(f32::max) else {
        return;
    };

    let step = FILL_SPACING_PX / zoom;
    let mut y = min_y + step / 2.0;
    while y < max_y {
        for (x0, x1) in scanline_spans(points, y) {
            gizmos.line_2d(Vec2::new(x0, y), Vec2::new(x1, y), color);
        }
        y += step;
    }
}

/// Interior spans of a polygon along the horizontal line at `y`, as sorted
/// (start_x, end_x) pairs.
fn scanline_spans(points: &[Vec2], y: f32) -> Vec<(f32, f32)> {
    let mut crossings = Vec::new();
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        if (a.y > y) != (b.y > y) {
            crossings.push(a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x));
        }
    }
    crossings.sort_by(f32::total_cmp);
    crossings
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

// ============================================================================
// Water Flow Arrows
// ============================================================================

fn draw_flow_arrows(
    gizmos: &mut Gizmos<MapGizmoGroup>,
    points: &[Vec2],
    slopes: &[[Vec2; 2]],
    zoom: f32,
) {
    let Some(direction) = flow_direction(points, slopes) else {
        return;
    };

    let length = FLOW_ARROW_LENGTH_PX / zoom;
    for pair in points.windows(2) {
        let center = (pair[0] + pair[1]) / 2.0;
        gizmos
            .arrow_2d(
                center - direction * length / 2.0,
                center + direction * length,
                theme::FLOW_ARROW,
            )
            .with_tip_length(FLOW_TIP_PX / zoom);
    }
}

/// Downhill direction of the slope nearest to the fence, measured between
/// midpoints. None when no slope exists or the nearest one is degenerate.
fn flow_direction(points: &[Vec2], slopes: &[[Vec2; 2]]) -> Option<Vec2> {
    let first = points.first()?;
    let last = points.last()?;
    let midpoint = (*first + *last) / 2.0;

    let nearest = slopes.iter().min_by(|a, b| {
        let da = midpoint.distance_squared((a[0] + a[1]) / 2.0);
        let db = midpoint.distance_squared((b[0] + b[1]) / 2.0);
        da.total_cmp(&db)
    })?;

    (nearest[1] - nearest[0]).try_normalize()
}

// ============================================================================
// Draft Preview
// ============================================================================

/// Draw the in-progress drawing: committed vertices, the path between them,
/// an elastic segment to the cursor, and the snap target ring.
pub fn draw_draft_preview(
    mut map_gizmos: Gizmos<MapGizmoGroup>,
    draft: Res<DraftState>,
    current_tool: Res<CurrentTool>,
    params: CameraParams,
) {
    let zoom = params.zoom();

    if !draft.points.is_empty() {
        let color = if current_tool.tool == EditorTool::DrawSlope {
            theme::SLOPE_COLOR
        } else {
            theme::DRAFT_STROKE
        };

        let path = draft.points.iter().copied().chain(draft.commit_pos());
        map_gizmos.linestrip_2d(path, color);

        let vertex_radius = DRAFT_VERTEX_RADIUS_PX / zoom;
        for &point in &draft.points {
            fill_circle(&mut map_gizmos, point, vertex_radius, theme::DRAFT_VERTEX, zoom);
            map_gizmos.circle_2d(Isometry2d::from_translation(point), vertex_radius, color);
        }
    }

    if let Some(snap) = draft.snap_target {
        map_gizmos.circle_2d(
            Isometry2d::from_translation(snap),
            SNAP_RING_RADIUS_PX / zoom,
            theme::SNAP_INDICATOR,
        );
    }
}

// ============================================================================
// Floating Labels (egui)
// ============================================================================

/// Screen-anchored text tied to world positions: the DOWN tag on slope
/// vectors and the live distance readout while drawing.
pub fn draw_canvas_labels(
    mut contexts: EguiContexts,
    objects: Query<&MapObject>,
    draft: Res<DraftState>,
    current_tool: Res<CurrentTool>,
    calibration: Res<CalibrationState>,
    camera_query: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    for object in objects.iter() {
        if !object.visible {
            continue;
        }
        let Shape::Slope([start, end]) = object.shape else {
            continue;
        };
        let midpoint = (start + end) / 2.0;
        let Ok(screen) = camera.world_to_viewport(camera_transform, midpoint.extend(0.0)) else {
            continue;
        };

        egui::Area::new(egui::Id::new(("slope_label", object.id)))
            .fixed_pos(egui::pos2(screen.x + 5.0, screen.y))
            .pivot(egui::Align2::LEFT_CENTER)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("DOWN")
                        .color(theme::ui::SLOPE_LABEL)
                        .size(10.0)
                        .strong(),
                );
            });
    }

    // Distance from the last placed vertex to the cursor, in feet. Slope
    // drafts measure nothing useful so they get no readout.
    if calibration.is_calibrated
        && current_tool.tool != EditorTool::DrawSlope
        && !draft.points.is_empty()
    {
        let (Some(&last), Some(active)) = (draft.points.last(), draft.commit_pos()) else {
            return;
        };
        let feet = geometry::distance(last, active) / calibration.pixels_per_foot;
        let Ok(screen) = camera.world_to_viewport(camera_transform, active.extend(0.0)) else {
            return;
        };

        egui::Area::new(egui::Id::new("draft_measurement"))
            .fixed_pos(egui::pos2(screen.x + 10.0, screen.y - 25.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::ui::LABEL_BACKGROUND)
                    .corner_radius(4.0)
                    .inner_margin(egui::Margin::symmetric(6, 3))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(format!("{feet:.1} ft"))
                                .color(egui::Color32::WHITE)
                                .size(12.0)
                                .strong(),
                        );
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]
    }

    // scanline_spans tests
    #[test]
    fn test_scanline_through_square() {
        let spans = scanline_spans(&square(), 5.0);
        assert_eq!(spans.len(), 1);
        let (x0, x1) = spans[0];
        assert!((x0 - 0.0).abs() < 1e-5);
        assert!((x1 - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_scanline_outside_square_is_empty() {
        assert!(scanline_spans(&square(), 15.0).is_empty());
        assert!(scanline_spans(&square(), -5.0).is_empty());
    }

    #[test]
    fn test_scanline_through_triangle_narrows() {
        let triangle = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 10.0),
        ];
        let low = scanline_spans(&triangle, 1.0);
        let high = scanline_spans(&triangle, 8.0);
        assert_eq!(low.len(), 1);
        assert_eq!(high.len(), 1);
        let low_width = low[0].1 - low[0].0;
        let high_width = high[0].1 - high[0].0;
        assert!(low_width > high_width);
    }

    #[test]
    fn test_scanline_concave_polygon_two_spans() {
        // U shape: the scanline at y=5 crosses both arms
        let u_shape = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(7.0, 10.0),
            Vec2::new(7.0, 3.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(3.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let spans = scanline_spans(&u_shape, 5.0);
        assert_eq!(spans.len(), 2);
        assert!(spans[0].1 <= spans[1].0, "spans must be sorted: {spans:?}");
    }

    #[test]
    fn test_scanline_spans_sorted_left_to_right() {
        let spans = scanline_spans(&square(), 2.0);
        for (x0, x1) in spans {
            assert!(x0 <= x1);
        }
    }

    // flow_direction tests
    #[test]
    fn test_flow_direction_no_slopes() {
        let fence = [Vec2::ZERO, Vec2::new(10.0, 0.0)];
        assert_eq!(flow_direction(&fence, &[]), None);
    }

    #[test]
    fn test_flow_direction_follows_slope() {
        let fence = [Vec2::ZERO, Vec2::new(10.0, 0.0)];
        let slopes = [[Vec2::new(0.0, 10.0), Vec2::new(0.0, 0.0)]];
        let dir = flow_direction(&fence, &slopes).unwrap();
        assert!(dir.abs_diff_eq(Vec2::new(0.0, -1.0), 1e-5), "{dir:?}");
    }

    #[test]
    fn test_flow_direction_picks_nearest_slope() {
        let fence = [Vec2::ZERO, Vec2::new(10.0, 0.0)];
        // Fence midpoint is (5, 0); the second slope is closer
        let slopes = [
            [Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0)],
            [Vec2::new(5.0, 5.0), Vec2::new(5.0, -5.0)],
        ];
        let dir = flow_direction(&fence, &slopes).unwrap();
        assert!(dir.abs_diff_eq(Vec2::new(0.0, -1.0), 1e-5), "{dir:?}");
    }

    #[test]
    fn test_flow_direction_degenerate_slope() {
        let fence = [Vec2::ZERO, Vec2::new(10.0, 0.0)];
        let slopes = [[Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0)]];
        assert_eq!(flow_direction(&fence, &slopes), None);
    }

    #[test]
    fn test_flow_direction_uses_endpoint_midpoint() {
        // Midpoint is between first and last vertices, interior points ignored
        let fence = [
            Vec2::new(0.0, 0.0),
            Vec2::new(500.0, 500.0),
            Vec2::new(10.0, 0.0),
        ];
        let near_endpoints = [[Vec2::new(5.0, 1.0), Vec2::new(6.0, 1.0)]];
        let near_interior = [[Vec2::new(500.0, 499.0), Vec2::new(501.0, 499.0)]];
        let both = [near_interior[0], near_endpoints[0]];
        let dir = flow_direction(&fence, &both).unwrap();
        // Picks the slope near (5, 0), which points +x
        assert!(dir.abs_diff_eq(Vec2::new(1.0, 0.0), 1e-5), "{dir:?}");
    }
}
