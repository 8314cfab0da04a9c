mod background;
mod calibration;
mod materials;
mod metrics;
mod object;

pub use background::{
    BackgroundImage, BackgroundLoadError, BackgroundSprite, ClearBackgroundRequest,
    LoadBackgroundRequest, IMAGE_EXTENSIONS,
};
pub use calibration::{CalibrationMeasured, CalibrationState};
pub use materials::{Material, MaterialId, MaterialKind, MaterialLibrary};
pub use metrics::{compute_object_metrics, ObjectMetrics};
pub use object::{
    MapObject, ObjectCreated, ObjectId, ObjectIds, Selected, SelectionChanged, Shape, ShapeKind,
};

use bevy::prelude::*;

/// Toggles for optional overlays drawn on top of the map.
#[derive(Resource, Default)]
pub struct OverlaySettings {
    pub show_water_flow: bool,
}

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObjectIds>()
            .init_resource::<CalibrationState>()
            .init_resource::<MaterialLibrary>()
            .init_resource::<BackgroundImage>()
            .init_resource::<BackgroundLoadError>()
            .init_resource::<OverlaySettings>()
            .add_message::<ObjectCreated>()
            .add_message::<SelectionChanged>()
            .add_message::<CalibrationMeasured>()
            .add_message::<LoadBackgroundRequest>()
            .add_message::<ClearBackgroundRequest>()
            .add_systems(
                Update,
                (
                    background::handle_load_background.run_if(on_message::<LoadBackgroundRequest>),
                    background::handle_clear_background
                        .run_if(on_message::<ClearBackgroundRequest>),
                    metrics::update_metrics,
                ),
            );
    }
}
