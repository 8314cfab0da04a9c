//! Solar shadow overlay: a compass rose with the sun bearing, a cast shadow
//! preview at the viewport center, and the shadow length readout.
//!
//! The overlay only runs while the solar tool is active and the map scale is
//! calibrated, since shadow length in feet is meaningless without a scale.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts};
use chrono::{Datelike, Local, NaiveDate, NaiveTime};

use crate::map::CalibrationState;
use crate::sun::{azimuth_to_world_dir, shadow_length, sun_position};
use crate::theme;

use super::params::CameraParams;
use super::render::fill_circle;

/// Default observer latitude, mid United States
const DEFAULT_LATITUDE_DEG: f64 = 40.0;

/// Default shadow caster height in feet
const DEFAULT_OBJECT_HEIGHT_FT: f64 = 15.0;

/// World-space half width of the shadow bar
const SHADOW_HALF_WIDTH: f32 = 5.0;

/// Screen-space radius of the white caster marker
const CASTER_MARKER_RADIUS_PX: f32 = 5.0;

/// Compass rose layout, in screen points from the top-right corner
const COMPASS_OFFSET: f32 = 60.0;
const COMPASS_RADIUS: f32 = 40.0;
const NEEDLE_LENGTH: f32 = 30.0;

// ============================================================================
// Settings
// ============================================================================

/// Date, time, and observer parameters for the shadow preview.
///
/// The calendar fields are stored raw as the panel edits them; `date()` and
/// `time()` fall back to the nearest valid value rather than failing.
#[derive(Resource)]
pub struct SunSettings {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub latitude_deg: f64,
    pub object_height_ft: f64,
}

impl Default for SunSettings {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
            day: today.day(),
            hour: 12,
            minute: 0,
            latitude_deg: DEFAULT_LATITUDE_DEG,
            object_height_ft: DEFAULT_OBJECT_HEIGHT_FT,
        }
    }
}

impl SunSettings {
    /// The configured date, clamping day overflow (e.g. Feb 31) back into
    /// the month.
    pub fn date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .or_else(|| NaiveDate::from_ymd_opt(self.year, self.month, 28))
            .unwrap_or_default()
    }

    /// The configured time of day.
    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }

    /// The configured time as "HH:MM" for the shadow caption.
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

// ============================================================================
// Gizmo Configuration
// ============================================================================

/// Gizmo group for the shadow bar
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ShadowGizmoGroup;

pub fn configure_shadow_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<ShadowGizmoGroup>();
    config.line.width = 2.0;
}

// ============================================================================
// Overlay Systems
// ============================================================================

/// Draw the cast shadow from the viewport center: a translucent bar pointing
/// away from the sun, with a white marker at the caster position.
pub fn draw_shadow_overlay(
    mut gizmos: Gizmos<ShadowGizmoGroup>,
    settings: Res<SunSettings>,
    calibration: Res<CalibrationState>,
    params: CameraParams,
) {
    let Ok((_, camera_transform, zoom)) = params.camera.single() else {
        return;
    };

    let sun = sun_position(settings.date(), settings.time(), settings.latitude_deg);
    let shadow_ft = shadow_length(settings.object_height_ft, sun.altitude_deg);
    let length = shadow_ft as f32 * calibration.pixels_per_foot;

    // The shadow falls opposite the sun bearing
    let direction = azimuth_to_world_dir(sun.azimuth_deg + 180.0);
    let base = camera_transform.translation().truncate();
    let tip = base + direction * length;

    // Parallel lines spaced to the stroke width stand in for a thick bar
    let normal = direction.perp();
    let spacing = 2.0 / zoom.zoom;
    let mut offset = -SHADOW_HALF_WIDTH;
    while offset <= SHADOW_HALF_WIDTH {
        let shift = normal * offset;
        gizmos.line_2d(base + shift, tip + shift, theme::SHADOW_COLOR);
        offset += spacing;
    }

    fill_circle(
        &mut gizmos,
        base,
        CASTER_MARKER_RADIUS_PX / zoom.zoom,
        theme::SHADOW_BASE,
        zoom.zoom,
    );
}

/// Draw the screen-fixed parts of the overlay: the compass rose with the sun
/// needle in the top-right corner and the shadow length caption.
pub fn draw_solar_hud(
    mut contexts: EguiContexts,
    settings: Res<SunSettings>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let sun = sun_position(settings.date(), settings.time(), settings.latitude_deg);
    let shadow_ft = shadow_length(settings.object_height_ft, sun.altitude_deg);

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("solar_hud"),
    ));

    // Compass rose
    let center = egui::pos2(window.width() - COMPASS_OFFSET, COMPASS_OFFSET);
    painter.circle(
        center,
        COMPASS_RADIUS,
        theme::ui::COMPASS_BACKGROUND,
        egui::Stroke::new(2.0, theme::ui::COMPASS_OUTLINE),
    );
    painter.text(
        egui::pos2(center.x, center.y - COMPASS_RADIUS - 10.0),
        egui::Align2::CENTER_CENTER,
        "N",
        egui::FontId::proportional(12.0),
        theme::ui::COMPASS_OUTLINE,
    );

    // Sun needle, bearing 0 pointing up the screen
    let bearing = sun.azimuth_deg.to_radians();
    let needle = egui::vec2(bearing.sin() as f32, -bearing.cos() as f32) * NEEDLE_LENGTH;
    painter.line_segment(
        [center, center + needle],
        egui::Stroke::new(3.0, theme::ui::SUN_NEEDLE),
    );
    painter.circle_filled(center + needle, 4.0, theme::ui::SUN_NEEDLE);

    // Shadow caption beside the caster marker
    let caption = format!("Shadow: {shadow_ft:.1}ft @ {}", settings.time_label());
    painter.text(
        egui::pos2(window.width() / 2.0 + 10.0, window.height() / 2.0 + 20.0),
        egui::Align2::LEFT_TOP,
        caption,
        egui::FontId::proportional(14.0),
        egui::Color32::WHITE,
    );
}
