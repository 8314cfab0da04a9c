//! Background site plan image loading and lifecycle.
//!
//! Images are decoded on the main thread with the `image` crate and
//! inserted directly into `Assets<Image>`, since the file lives at an
//! arbitrary user-picked path rather than under an asset root. The
//! sprite is centered on the origin at one world unit per image pixel.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use super::CalibrationState;

/// File extensions accepted by the background image picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff", "tif"];

/// Z depth for the background sprite, below every drawn overlay.
const BACKGROUND_Z: f32 = -10.0;

/// Request to load a site plan image from disk.
#[derive(Message)]
pub struct LoadBackgroundRequest {
    pub path: PathBuf,
}

/// Request to remove the current background image.
#[derive(Message)]
pub struct ClearBackgroundRequest;

/// Marker for the spawned background sprite entity.
#[derive(Component)]
pub struct BackgroundSprite;

/// The currently loaded background image, if any.
///
/// `size` is in image pixels, which is also the world-space extent of
/// the sprite.
#[derive(Resource, Default)]
pub struct BackgroundImage {
    pub size: Option<Vec2>,
    pub path: Option<PathBuf>,
}

impl BackgroundImage {
    pub fn is_loaded(&self) -> bool {
        self.size.is_some()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
    }
}

/// Most recent background load failure, surfaced in the toolbar.
#[derive(Resource, Default)]
pub struct BackgroundLoadError {
    pub message: Option<String>,
}

/// Decode an image file into a GPU-ready texture plus its pixel size.
fn decode_image(path: &Path) -> Result<(Image, Vec2), String> {
    let dynamic = image::open(path).map_err(|e| format!("Could not read image: {e}"))?;
    let rgba = dynamic.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err("Image has zero size".to_string());
    }

    let texture = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        default(),
    );

    Ok((texture, Vec2::new(width as f32, height as f32)))
}

/// Load the requested image and replace any existing background sprite.
///
/// A failed load leaves the current background in place and records the
/// error for the toolbar to display. A successful load drops the old
/// calibration status but keeps the last ratio as the dialog default.
pub fn handle_load_background(
    mut commands: Commands,
    mut requests: MessageReader<LoadBackgroundRequest>,
    mut images: ResMut<Assets<Image>>,
    mut background: ResMut<BackgroundImage>,
    mut load_error: ResMut<BackgroundLoadError>,
    mut calibration: ResMut<CalibrationState>,
    existing: Query<Entity, With<BackgroundSprite>>,
) {
    // Only the newest request matters if several arrive in one frame.
    let Some(request) = requests.read().last() else {
        return;
    };

    match decode_image(&request.path) {
        Ok((texture, size)) => {
            for entity in existing.iter() {
                commands.entity(entity).despawn();
            }

            let handle = images.add(texture);
            commands.spawn((
                Sprite::from_image(handle),
                Transform::from_translation(Vec2::ZERO.extend(BACKGROUND_Z)),
                BackgroundSprite,
            ));

            background.size = Some(size);
            background.path = Some(request.path.clone());
            load_error.message = None;
            calibration.invalidate();

            info!(
                "Loaded background image {:?} ({}x{} px)",
                request.path, size.x as u32, size.y as u32
            );
        }
        Err(message) => {
            warn!(
                "Failed to load background image {:?}: {}",
                request.path, message
            );
            load_error.message = Some(message);
        }
    }
}

/// Despawn the background sprite and forget the loaded image.
pub fn handle_clear_background(
    mut commands: Commands,
    mut requests: MessageReader<ClearBackgroundRequest>,
    mut background: ResMut<BackgroundImage>,
    mut load_error: ResMut<BackgroundLoadError>,
    existing: Query<Entity, With<BackgroundSprite>>,
) {
    requests.clear();

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    if background.is_loaded() {
        background.size = None;
        background.path = None;
        info!("Cleared background image");
    }
    load_error.message = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_extensions_cover_common_plan_formats() {
        for ext in ["png", "jpg", "jpeg", "webp", "tif"] {
            assert!(IMAGE_EXTENSIONS.contains(&ext));
        }
        assert!(!IMAGE_EXTENSIONS.contains(&"pdf"));
    }

    #[test]
    fn file_name_strips_directories() {
        let background = BackgroundImage {
            size: Some(Vec2::new(800.0, 600.0)),
            path: Some(PathBuf::from("/plans/2024/site-north.png")),
        };
        assert_eq!(background.file_name(), Some("site-north.png"));
        assert!(background.is_loaded());
    }

    #[test]
    fn empty_background_reports_unloaded() {
        let background = BackgroundImage::default();
        assert!(!background.is_loaded());
        assert_eq!(background.file_name(), None);
    }

    #[test]
    fn decode_rejects_missing_file() {
        let result = decode_image(Path::new("/nonexistent/plan.png"));
        assert!(result.is_err());
        assert!(result.unwrap_err().starts_with("Could not read image"));
    }
}
