//! Measurements and cost estimates derived from object shapes.

use bevy::prelude::*;

use crate::constants::SQ_FT_PER_ACRE;
use crate::geometry;
use crate::map::calibration::CalibrationState;
use crate::map::object::{MapObject, Shape};

/// Real-world measurements for one object under the current calibration.
///
/// This component is a cache. `update_metrics` recomputes it whenever the
/// object or the calibration changes; nothing else writes it, and nothing
/// reads it as authoritative state.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ObjectMetrics {
    pub area_sq_ft: Option<f32>,
    pub area_acres: Option<f32>,
    pub length_ft: Option<f32>,
    pub total_cost: f32,
}

/// Compute measurements and cost for one object.
///
/// Measurements need calibration. Costs need a positive unit cost plus the
/// quantity they scale with: acres for zones, feet for fences, nothing for
/// flat-priced points. A missing quantity yields a cost of 0, never a stale
/// value.
pub fn compute_object_metrics(object: &MapObject, calibration: &CalibrationState) -> ObjectMetrics {
    let mut metrics = ObjectMetrics::default();

    if calibration.is_calibrated {
        let ppf = calibration.pixels_per_foot;
        match &object.shape {
            Shape::Polygon(points) => {
                let area_sq_ft = geometry::polygon_area(points) / (ppf * ppf);
                metrics.area_sq_ft = Some(area_sq_ft);
                metrics.area_acres = Some(area_sq_ft / SQ_FT_PER_ACRE);

                // Perimeter includes the closing edge
                let mut perimeter_px = geometry::polyline_length(points);
                perimeter_px += geometry::distance(points[points.len() - 1], points[0]);
                metrics.length_ft = Some(perimeter_px / ppf);
            }
            Shape::Polyline(points) => {
                metrics.length_ft = Some(geometry::polyline_length(points) / ppf);
            }
            Shape::Point(_) | Shape::Slope(_) => {}
        }
    }

    if object.unit_cost > 0.0 {
        metrics.total_cost = match object.shape {
            Shape::Polygon(_) => metrics
                .area_acres
                .map_or(0.0, |acres| acres * object.unit_cost),
            Shape::Polyline(_) => metrics
                .length_ft
                .map_or(0.0, |feet| feet * object.unit_cost),
            Shape::Point(_) => object.unit_cost,
            Shape::Slope(_) => 0.0,
        };
    }

    metrics
}

/// Recompute metrics for changed objects, and for everything when the
/// calibration itself changes.
pub fn update_metrics(
    calibration: Res<CalibrationState>,
    mut objects: Query<(Ref<MapObject>, &mut ObjectMetrics)>,
) {
    let recompute_all = calibration.is_changed();
    for (object, mut metrics) in &mut objects {
        if recompute_all || object.is_changed() {
            let fresh = compute_object_metrics(&object, &calibration);
            metrics.set_if_neq(fresh);
        }
    }
}
