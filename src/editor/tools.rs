use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::map::{Selected, SelectionChanged, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTool {
    Select,
    #[default]
    Pan,
    DrawZone,
    DrawFence,
    DrawPoint,
    DrawSlope,
    Calibrate,
    SunAnalysis,
}

/// Finish rules for a drafting tool: the fewest committed vertices a
/// shape needs, and whether the draft completes by itself at a fixed
/// count instead of waiting for a right click.
pub struct FinalizePolicy {
    pub min_points: usize,
    pub auto_finish_at: Option<usize>,
}

impl EditorTool {
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorTool::Select => "Select (V)",
            EditorTool::Pan => "Pan (H)",
            EditorTool::DrawZone => "Zone (Z)",
            EditorTool::DrawFence => "Fence (F)",
            EditorTool::DrawPoint => "Point (M)",
            EditorTool::DrawSlope => "Slope (S)",
            EditorTool::Calibrate => "Scale (C)",
            EditorTool::SunAnalysis => "Solar (U)",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            EditorTool::Pan | EditorTool::SunAnalysis => {
                CursorIcon::System(SystemCursorIcon::Move)
            }
            _ => CursorIcon::System(SystemCursorIcon::Crosshair),
        }
    }

    pub fn all() -> &'static [EditorTool] {
        &[
            EditorTool::Select,
            EditorTool::Pan,
            EditorTool::DrawZone,
            EditorTool::DrawFence,
            EditorTool::DrawPoint,
            EditorTool::DrawSlope,
            EditorTool::Calibrate,
            EditorTool::SunAnalysis,
        ]
    }

    /// Tools that accumulate draft vertices across clicks.
    pub fn is_draft_tool(&self) -> bool {
        matches!(
            self,
            EditorTool::DrawZone
                | EditorTool::DrawFence
                | EditorTool::DrawSlope
                | EditorTool::Calibrate
        )
    }

    /// Tools whose clicks snap to nearby existing vertices.
    pub fn uses_snapping(&self) -> bool {
        matches!(
            self,
            EditorTool::DrawZone | EditorTool::DrawFence | EditorTool::Calibrate
        )
    }

    pub fn finalize_policy(&self) -> Option<FinalizePolicy> {
        match self {
            EditorTool::DrawZone => Some(FinalizePolicy {
                min_points: 3,
                auto_finish_at: None,
            }),
            EditorTool::DrawFence => Some(FinalizePolicy {
                min_points: 2,
                auto_finish_at: None,
            }),
            EditorTool::DrawSlope => Some(FinalizePolicy {
                min_points: 2,
                auto_finish_at: Some(2),
            }),
            EditorTool::Calibrate => Some(FinalizePolicy {
                min_points: 2,
                auto_finish_at: None,
            }),
            _ => None,
        }
    }

    /// Which shape the tool produces, if any.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            EditorTool::DrawZone => Some(ShapeKind::Polygon),
            EditorTool::DrawFence => Some(ShapeKind::Polyline),
            EditorTool::DrawPoint => Some(ShapeKind::Point),
            EditorTool::DrawSlope => Some(ShapeKind::Slope),
            _ => None,
        }
    }

    /// Status line shown at the bottom of the viewport.
    pub fn status_hint(&self) -> &'static str {
        match self {
            EditorTool::Select => "Click object to select",
            EditorTool::Pan => "Drag to pan • Scroll to zoom",
            EditorTool::DrawZone | EditorTool::DrawFence => {
                "Click to add point • Near points snap • Right-click to finish"
            }
            EditorTool::DrawPoint => "Click to place marker",
            EditorTool::DrawSlope => "Click Top of hill -> Click Bottom of hill",
            EditorTool::Calibrate => "Draw line between known points • Right-click to finish",
            EditorTool::SunAnalysis => "Visualize sun and shadows based on time of day",
        }
    }
}

#[derive(Resource, Default)]
pub struct CurrentTool {
    pub tool: EditorTool,
}

pub fn handle_tool_shortcuts(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut current_tool: ResMut<CurrentTool>,
    selected_query: Query<Entity, With<Selected>>,
    mut selection_changed: MessageWriter<SelectionChanged>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    // Escape abandons whatever is in progress and returns to select
    if keyboard.just_pressed(KeyCode::Escape) {
        current_tool.tool = EditorTool::Select;
        for entity in selected_query.iter() {
            commands.entity(entity).remove::<Selected>();
        }
        selection_changed.write(SelectionChanged { id: None });
        return;
    }

    let new_tool = if keyboard.just_pressed(KeyCode::KeyV) {
        Some(EditorTool::Select)
    } else if keyboard.just_pressed(KeyCode::KeyH) {
        Some(EditorTool::Pan)
    } else if keyboard.just_pressed(KeyCode::KeyZ) {
        Some(EditorTool::DrawZone)
    } else if keyboard.just_pressed(KeyCode::KeyF) {
        Some(EditorTool::DrawFence)
    } else if keyboard.just_pressed(KeyCode::KeyM) {
        Some(EditorTool::DrawPoint)
    } else if keyboard.just_pressed(KeyCode::KeyS) {
        Some(EditorTool::DrawSlope)
    } else if keyboard.just_pressed(KeyCode::KeyC) {
        Some(EditorTool::Calibrate)
    } else if keyboard.just_pressed(KeyCode::KeyU) {
        Some(EditorTool::SunAnalysis)
    } else {
        None
    };

    if let Some(tool) = new_tool {
        current_tool.tool = tool;
    }
}

pub fn update_cursor_icon(
    current_tool: Res<CurrentTool>,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok(entity) = window_query.single() else {
        return;
    };

    // Use default cursor over UI, tool cursor in editor space
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    commands.entity(entity).insert(current_tool.tool.cursor_icon());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_contain_shortcuts() {
        // Each display name should contain its keyboard shortcut in parentheses
        for tool in EditorTool::all() {
            let name = tool.display_name();
            assert!(name.contains('('), "Display name should contain shortcut: {}", name);
            assert!(name.contains(')'), "Display name should contain shortcut: {}", name);
        }
    }

    #[test]
    fn test_all_returns_all_tools() {
        let all = EditorTool::all();
        assert_eq!(all.len(), 8);
        assert!(all.contains(&EditorTool::Select));
        assert!(all.contains(&EditorTool::Pan));
        assert!(all.contains(&EditorTool::DrawZone));
        assert!(all.contains(&EditorTool::DrawFence));
        assert!(all.contains(&EditorTool::DrawPoint));
        assert!(all.contains(&EditorTool::DrawSlope));
        assert!(all.contains(&EditorTool::Calibrate));
        assert!(all.contains(&EditorTool::SunAnalysis));
    }

    #[test]
    fn test_default_tool_is_pan() {
        assert_eq!(EditorTool::default(), EditorTool::Pan);
        assert_eq!(CurrentTool::default().tool, EditorTool::Pan);
    }

    #[test]
    fn test_draft_tools() {
        assert!(EditorTool::DrawZone.is_draft_tool());
        assert!(EditorTool::DrawFence.is_draft_tool());
        assert!(EditorTool::DrawSlope.is_draft_tool());
        assert!(EditorTool::Calibrate.is_draft_tool());

        assert!(!EditorTool::Select.is_draft_tool());
        assert!(!EditorTool::Pan.is_draft_tool());
        assert!(!EditorTool::DrawPoint.is_draft_tool());
        assert!(!EditorTool::SunAnalysis.is_draft_tool());
    }

    #[test]
    fn test_snapping_tools() {
        // Zones, fences, and calibration snap; slope vectors do not
        assert!(EditorTool::DrawZone.uses_snapping());
        assert!(EditorTool::DrawFence.uses_snapping());
        assert!(EditorTool::Calibrate.uses_snapping());
        assert!(!EditorTool::DrawSlope.uses_snapping());
        assert!(!EditorTool::DrawPoint.uses_snapping());
    }

    #[test]
    fn test_finalize_policies() {
        let zone = EditorTool::DrawZone.finalize_policy().unwrap();
        assert_eq!(zone.min_points, 3);
        assert_eq!(zone.auto_finish_at, None);

        let fence = EditorTool::DrawFence.finalize_policy().unwrap();
        assert_eq!(fence.min_points, 2);

        let slope = EditorTool::DrawSlope.finalize_policy().unwrap();
        assert_eq!(slope.auto_finish_at, Some(2));

        let calibrate = EditorTool::Calibrate.finalize_policy().unwrap();
        assert_eq!(calibrate.min_points, 2);
        assert_eq!(calibrate.auto_finish_at, None);

        assert!(EditorTool::Select.finalize_policy().is_none());
        assert!(EditorTool::DrawPoint.finalize_policy().is_none());
    }

    #[test]
    fn test_shape_kinds() {
        assert_eq!(EditorTool::DrawZone.shape_kind(), Some(ShapeKind::Polygon));
        assert_eq!(EditorTool::DrawFence.shape_kind(), Some(ShapeKind::Polyline));
        assert_eq!(EditorTool::DrawPoint.shape_kind(), Some(ShapeKind::Point));
        assert_eq!(EditorTool::DrawSlope.shape_kind(), Some(ShapeKind::Slope));
        assert_eq!(EditorTool::Calibrate.shape_kind(), None);
        assert_eq!(EditorTool::SunAnalysis.shape_kind(), None);
    }

    #[test]
    fn test_pan_tools_use_move_cursor() {
        assert_eq!(
            EditorTool::Pan.cursor_icon(),
            CursorIcon::System(SystemCursorIcon::Move)
        );
        assert_eq!(
            EditorTool::SunAnalysis.cursor_icon(),
            CursorIcon::System(SystemCursorIcon::Move)
        );
        assert_eq!(
            EditorTool::DrawZone.cursor_icon(),
            CursorIcon::System(SystemCursorIcon::Crosshair)
        );
    }

    #[test]
    fn test_status_hints_present() {
        for tool in EditorTool::all() {
            assert!(!tool.status_hint().is_empty());
        }
    }
}
