//! Centralized constants used across the application.
//!
//! This module contains magic numbers and tuning values that are used in
//! multiple places or would benefit from being named constants.

/// Default window width in pixels (also used for grid viewport calculations)
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels (also used for grid viewport calculations)
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Zoom bounds, in screen pixels per world unit
pub const MIN_ZOOM: f32 = 0.05;
pub const MAX_ZOOM: f32 = 20.0;

/// Margin factor applied when fitting a background image to the window
pub const FIT_MARGIN: f32 = 0.95;

/// Vertex snap radius while drawing, in screen pixels
pub const SNAP_THRESHOLD_PX: f32 = 15.0;

/// Selection hit radius for markers, in screen pixels
pub const POINT_HIT_RADIUS_PX: f32 = 15.0;

/// Selection hit distance for fences and slope vectors, in screen pixels
pub const LINE_HIT_THRESHOLD_PX: f32 = 10.0;

/// Distance below which a finishing click on the first vertex closes a zone
/// instead of adding a duplicate vertex, in world units
pub const POLYGON_CLOSE_EPSILON: f32 = 0.001;

/// Fallback grid spacing when no background image is loaded, in world units
pub const GRID_SPACING: f32 = 50.0;

/// Marker disc radius, in world units
pub const POINT_RADIUS: f32 = 6.0;

/// Square feet per acre
pub const SQ_FT_PER_ACRE: f32 = 43_560.0;

/// Shadow length reported while the sun is at or below the horizon, in feet
pub const SHADOW_SENTINEL_FT: f64 = 1000.0;
