//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor UI and rendering.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Grid Colors
// ============================================================================

/// Dark slate grid lines for the empty-canvas fallback grid
pub const GRID_COLOR: Color = Color::srgb(0.118, 0.161, 0.231);

// ============================================================================
// Object Colors
// ============================================================================

/// Default point marker color (red)
pub const POINT_DEFAULT: Color = Color::srgb(0.937, 0.267, 0.267);

/// Default zone color (emerald)
pub const ZONE_DEFAULT: Color = Color::srgb(0.063, 0.725, 0.506);

/// Default fence color (amber)
pub const FENCE_DEFAULT: Color = Color::srgb(0.961, 0.620, 0.043);

/// Slope vectors are always blue
pub const SLOPE_COLOR: Color = Color::srgb(0.231, 0.510, 0.965);

/// Default zone fill opacity
pub const DEFAULT_ZONE_OPACITY: f32 = 0.4;

/// Object color palette for the properties picker
pub fn object_colors() -> [(Color, &'static str, egui::Color32); 8] {
    [
        (
            Color::srgb(0.937, 0.267, 0.267),
            "Red",
            egui::Color32::from_rgb(239, 68, 68),
        ),
        (
            Color::srgb(0.063, 0.725, 0.506),
            "Emerald",
            egui::Color32::from_rgb(16, 185, 129),
        ),
        (
            Color::srgb(0.961, 0.620, 0.043),
            "Amber",
            egui::Color32::from_rgb(245, 158, 11),
        ),
        (
            Color::srgb(0.231, 0.510, 0.965),
            "Blue",
            egui::Color32::from_rgb(59, 130, 246),
        ),
        (
            Color::srgb(0.055, 0.647, 0.914),
            "Sky",
            egui::Color32::from_rgb(14, 165, 233),
        ),
        (
            Color::srgb(0.545, 0.361, 0.965),
            "Violet",
            egui::Color32::from_rgb(139, 92, 246),
        ),
        (
            Color::srgb(0.925, 0.282, 0.600),
            "Pink",
            egui::Color32::from_rgb(236, 72, 153),
        ),
        (
            Color::srgb(0.518, 0.800, 0.086),
            "Lime",
            egui::Color32::from_rgb(132, 204, 22),
        ),
    ]
}

// ============================================================================
// Selection Colors
// ============================================================================

/// Sky blue dashed outline for the selected object
pub const SELECTION_COLOR: Color = Color::srgb(0.055, 0.647, 0.914);

/// White ring around a selected point marker
pub const SELECTED_POINT_RING: Color = Color::WHITE;

// ============================================================================
// Draft Colors
// ============================================================================

/// Amber stroke for in-progress drawings
pub const DRAFT_STROKE: Color = Color::srgb(0.984, 0.749, 0.141);

/// White fill for draft vertex handles
pub const DRAFT_VERTEX: Color = Color::WHITE;

/// Pink ring marking the active snap target
pub const SNAP_INDICATOR: Color = Color::srgb(0.925, 0.282, 0.600);

// ============================================================================
// Overlay Colors
// ============================================================================

/// Semi-transparent blue for water flow arrows
pub const FLOW_ARROW: Color = Color::srgba(0.231, 0.510, 0.965, 0.8);

/// Semi-transparent black shadow bar
pub const SHADOW_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.5);

/// White dot marking the shadow caster base
pub const SHADOW_BASE: Color = Color::WHITE;

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Emerald for the calibrated-scale status chip
    pub const CALIBRATED_TEXT: egui::Color32 = egui::Color32::from_rgb(52, 211, 153);

    /// Amber for the uncalibrated status chip
    pub const UNCALIBRATED_TEXT: egui::Color32 = egui::Color32::from_rgb(251, 191, 36);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// White for selected button borders
    pub const SELECTED_BORDER: egui::Color32 = egui::Color32::WHITE;

    /// Dark grey for unselected button borders
    pub const UNSELECTED_BORDER: egui::Color32 = egui::Color32::DARK_GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Emerald for cost figures
    pub const COST_TEXT: egui::Color32 = egui::Color32::from_rgb(52, 211, 153);

    /// Light blue for the slope DOWN tag
    pub const SLOPE_LABEL: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);

    /// Sky status dot while the select tool is active
    pub const STATUS_DOT_SELECT: egui::Color32 = egui::Color32::from_rgb(14, 165, 233);

    /// Emerald status dot for every other tool
    pub const STATUS_DOT_ACTIVE: egui::Color32 = egui::Color32::from_rgb(16, 185, 129);

    /// Dark translucent background for floating canvas labels
    pub const LABEL_BACKGROUND: egui::Color32 = egui::Color32::from_black_alpha(178);

    /// Dark translucent compass rose disc
    pub const COMPASS_BACKGROUND: egui::Color32 = egui::Color32::from_black_alpha(128);

    /// White compass outline and cardinal letters
    pub const COMPASS_OUTLINE: egui::Color32 = egui::Color32::WHITE;

    /// Yellow sun needle and sun dot
    pub const SUN_NEEDLE: egui::Color32 = egui::Color32::from_rgb(251, 191, 36);
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (fully opaque)
pub fn bevy_to_egui_opaque(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        255,
    )
}
