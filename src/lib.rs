//! Dino Dash - A tilt-controlled endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, round state)
//! - `platform`: Presentation hooks the host implements
//! - `audio`: Background music track swapping
//! - `tuning`: Data-driven game balance
//! - `settings`: Player-facing preferences

pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Longest physics step; larger frames are sub-stepped
    pub const MAX_STEP_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Health pool at round start
    pub const MAX_HEALTH: u8 = 3;
    /// Round length in whole seconds
    pub const ROUND_SECONDS: u32 = 60;

    /// Obstacle visual scale range (arbitrary units, radius = scale / 2)
    pub const OBSTACLE_SCALE_MIN: f32 = 20.0;
    pub const OBSTACLE_SCALE_MAX: f32 = 72.0;

    /// Player sprite is 52x52, collision circle fills it
    pub const PLAYER_RADIUS: f32 = 26.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Bearing (radians) of the line from `from` to `to`
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
