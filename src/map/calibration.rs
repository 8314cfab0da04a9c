//! Scale calibration between background-image pixels and real-world feet.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Emitted when the calibrate tool finishes tracing a reference line.
/// Opens the scale dialog, which asks for the real-world distance.
#[derive(Message)]
pub struct CalibrationMeasured {
    pub point1: Vec2,
    pub point2: Vec2,
    pub pixel_distance: f32,
}

/// Current pixel-to-feet mapping.
///
/// `pixels_per_foot` keeps its last value while `is_calibrated` is false, so
/// downstream readers must check the flag before dividing.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationState {
    pub is_calibrated: bool,
    pub pixels_per_foot: f32,
    pub point1: Option<Vec2>,
    pub point2: Option<Vec2>,
    pub distance_ft: f32,
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self {
            is_calibrated: false,
            pixels_per_foot: 1.0,
            point1: None,
            point2: None,
            distance_ft: 0.0,
        }
    }
}

impl CalibrationState {
    /// Derive the scale from a measured pixel span and its real-world length.
    ///
    /// Rejects non-positive or non-finite input without touching state; the
    /// returned message is shown inline in the dialog.
    pub fn commit(&mut self, pixel_distance: f32, feet: f32) -> Result<(), String> {
        if !feet.is_finite() || feet <= 0.0 {
            return Err("Distance must be a positive number of feet".to_string());
        }
        if !pixel_distance.is_finite() || pixel_distance <= 0.0 {
            return Err("Reference line has no length, trace it again".to_string());
        }

        self.pixels_per_foot = pixel_distance / feet;
        self.distance_ft = feet;
        self.is_calibrated = true;
        info!(
            "Calibrated scale: 1 ft = {:.3} px ({} px over {} ft)",
            self.pixels_per_foot, pixel_distance, feet
        );
        Ok(())
    }

    /// Drop the calibrated flag, keeping the last ratio for reference.
    /// Used when a new background image replaces the one the scale was
    /// measured against.
    pub fn invalidate(&mut self) {
        if self.is_calibrated {
            info!("Calibration invalidated");
        }
        self.is_calibrated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_uncalibrated() {
        let state = CalibrationState::default();
        assert!(!state.is_calibrated);
        assert_eq!(state.pixels_per_foot, 1.0);
        assert!(state.point1.is_none());
        assert!(state.point2.is_none());
    }

    #[test]
    fn test_commit_derives_pixels_per_foot() {
        let mut state = CalibrationState::default();
        state.commit(200.0, 50.0).unwrap();
        assert!(state.is_calibrated);
        assert_eq!(state.pixels_per_foot, 4.0);
        assert_eq!(state.distance_ft, 50.0);
    }

    #[test]
    fn test_commit_rejects_zero_feet() {
        let mut state = CalibrationState::default();
        assert!(state.commit(200.0, 0.0).is_err());
        assert!(!state.is_calibrated);
        assert_eq!(state.pixels_per_foot, 1.0);
    }

    #[test]
    fn test_commit_rejects_negative_feet() {
        let mut state = CalibrationState::default();
        assert!(state.commit(200.0, -5.0).is_err());
        assert!(!state.is_calibrated);
    }

    #[test]
    fn test_commit_rejects_nan_feet() {
        let mut state = CalibrationState::default();
        assert!(state.commit(200.0, f32::NAN).is_err());
        assert!(!state.is_calibrated);
    }

    #[test]
    fn test_commit_rejects_zero_pixel_span() {
        let mut state = CalibrationState::default();
        assert!(state.commit(0.0, 50.0).is_err());
        assert!(!state.is_calibrated);
    }

    #[test]
    fn test_failed_commit_preserves_existing_scale() {
        let mut state = CalibrationState::default();
        state.commit(200.0, 50.0).unwrap();
        assert!(state.commit(300.0, -1.0).is_err());
        assert!(state.is_calibrated);
        assert_eq!(state.pixels_per_foot, 4.0);
    }

    #[test]
    fn test_invalidate_keeps_last_ratio() {
        let mut state = CalibrationState::default();
        state.commit(200.0, 50.0).unwrap();
        state.invalidate();
        assert!(!state.is_calibrated);
        assert_eq!(state.pixels_per_foot, 4.0);
    }

    #[test]
    fn test_recommit_replaces_scale() {
        let mut state = CalibrationState::default();
        state.commit(200.0, 50.0).unwrap();
        state.commit(100.0, 100.0).unwrap();
        assert_eq!(state.pixels_per_foot, 1.0);
        assert_eq!(state.distance_ft, 100.0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut state = CalibrationState::default();
        state.point1 = Some(Vec2::new(10.0, 20.0));
        state.point2 = Some(Vec2::new(210.0, 20.0));
        state.commit(200.0, 50.0).unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let back: CalibrationState = serde_json::from_str(&json).unwrap();
        assert!(back.is_calibrated);
        assert_eq!(back.pixels_per_foot, 4.0);
        assert_eq!(back.point1, state.point1);
    }
}
