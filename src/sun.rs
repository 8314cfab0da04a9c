//! Simplified solar position model for the shadow overlay.
//!
//! Standard astronomical approximations (declination, equation of time, hour
//! angle) with the observer longitude fixed at 0, so the configured time is
//! treated as local solar-zone time. Accuracy is visualization grade, which is
//! all the shadow overlay needs.

use bevy::prelude::*;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::constants::SHADOW_SENTINEL_FT;

/// Sun direction for a given moment, in degrees.
///
/// `azimuth_deg` is a compass bearing in the map convention (0 = up/north,
/// 90 = right/east), normalized to [0, 360). It carries the historical +180
/// rotation of the compass presentation; the compass rose and the shadow
/// direction both use it, so the pair stays consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
}

/// Compute sun altitude and presentation azimuth for a date, local time, and
/// latitude.
pub fn sun_position(date: NaiveDate, time: NaiveTime, latitude_deg: f64) -> SunPosition {
    let rad = std::f64::consts::PI / 180.0;

    let day = date.ordinal() as f64;

    // Solar declination
    let declination = 23.45 * (rad * (360.0 / 365.0) * (day - 81.0)).sin();

    // Equation of time, in minutes
    let b = (360.0 / 365.0) * (day - 81.0);
    let eot = 9.87 * (2.0 * b * rad).sin() - 7.53 * (b * rad).cos() - 1.5 * (b * rad).sin();

    // Solar time and hour angle, longitude fixed at 0
    let local_minutes = (time.hour() * 60 + time.minute()) as f64;
    let solar_minutes = local_minutes + eot;
    let hour_angle = solar_minutes / 4.0 - 180.0;

    let sin_alt = (latitude_deg * rad).sin() * (declination * rad).sin()
        + (latitude_deg * rad).cos() * (declination * rad).cos() * (hour_angle * rad).cos();
    let altitude = sin_alt.asin() / rad;

    let denom = (latitude_deg * rad).cos() * (altitude * rad).cos();
    let mut azimuth = if denom.abs() < 1e-9 {
        // Sun at the zenith or observer at a pole; bearing is arbitrary there
        0.0
    } else {
        let cos_azi = ((declination * rad).sin() - (latitude_deg * rad).sin() * (altitude * rad).sin())
            / denom;
        cos_azi.clamp(-1.0, 1.0).acos() / rad
    };

    if (hour_angle * rad).sin() > 0.0 {
        azimuth = 360.0 - azimuth;
    }

    SunPosition {
        altitude_deg: altitude,
        azimuth_deg: (azimuth + 180.0).rem_euclid(360.0),
    }
}

/// Shadow length cast by an object of the given height, in the same unit as
/// the height. Below the horizon the shadow is effectively infinite and the
/// sentinel length is returned.
pub fn shadow_length(object_height: f64, altitude_deg: f64) -> f64 {
    if altitude_deg <= 0.0 {
        return SHADOW_SENTINEL_FT;
    }
    let rad = std::f64::consts::PI / 180.0;
    object_height / (altitude_deg * rad).tan()
}

/// Map a compass bearing (0 = up, clockwise) to a world-space unit direction.
pub fn azimuth_to_world_dir(azimuth_deg: f64) -> Vec2 {
    let rad = azimuth_deg.to_radians();
    Vec2::new(rad.sin() as f32, rad.cos() as f32)
}
