//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host can tweak feel without a
//! rebuild. Missing JSON keys fall back to the defaults in [`Tuning::default`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Round ===
    /// Health at round start
    pub max_health: u8,
    /// Countdown length in whole seconds
    pub round_seconds: u32,

    // === World ===
    /// Gravity acceleration (points/s²)
    pub gravity: Vec2,
    /// Mass per unit of circle area for every body
    pub body_density: f32,
    /// Bounciness of contacts and walls (0 = dead stop, 1 = perfect bounce)
    pub restitution: f32,

    // === Player ===
    pub player_radius: f32,
    /// Tilt vector -> force multiplier
    pub drive_gain: f32,
    /// Upward impulse per tap
    pub jump_impulse: f32,
    /// Linear damping (1/s)
    pub player_damping: f32,
    /// Horizontal speed above which the run animation plays
    pub run_speed_threshold: f32,

    // === Obstacles ===
    /// Mean spawn interval (seconds)
    pub spawn_interval: f32,
    /// Spawn interval varies by ± this much (seconds)
    pub spawn_jitter: f32,
    /// Seconds an obstacle lives before it is removed
    pub obstacle_lifetime: f32,
    pub obstacle_scale_min: f32,
    pub obstacle_scale_max: f32,
    /// Initial sideways impulse toward the player
    pub deflection_impulse: f32,
    /// Fraction of play-area height where a falling obstacle bursts
    /// (0 = on touching the floor, 0.5 = on entering the bottom half)
    pub destroy_line_fraction: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_health: MAX_HEALTH,
            round_seconds: ROUND_SECONDS,

            gravity: Vec2::new(0.0, -980.0),
            body_density: 1.0e-5,
            restitution: 0.2,

            player_radius: PLAYER_RADIUS,
            drive_gain: 100.0,
            jump_impulse: 10.0,
            player_damping: 2.0,
            run_speed_threshold: 15.0,

            spawn_interval: 1.0,
            spawn_jitter: 0.2,
            obstacle_lifetime: 2.0,
            obstacle_scale_min: OBSTACLE_SCALE_MIN,
            obstacle_scale_max: OBSTACLE_SCALE_MAX,
            deflection_impulse: 4.0,
            destroy_line_fraction: 0.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::OutOfRange {
                name: "max_health",
                value: 0.0,
                expected: "[1, 255]",
            });
        }
        if self.round_seconds == 0 {
            return Err(ConfigError::OutOfRange {
                name: "round_seconds",
                value: 0.0,
                expected: "[1, ∞)",
            });
        }
        finite("gravity.x", self.gravity.x)?;
        finite("gravity.y", self.gravity.y)?;
        finite("drive_gain", self.drive_gain)?;
        finite("jump_impulse", self.jump_impulse)?;
        finite("run_speed_threshold", self.run_speed_threshold)?;
        finite("deflection_impulse", self.deflection_impulse)?;
        finite("spawn_jitter", self.spawn_jitter)?;
        finite("obstacle_scale_max", self.obstacle_scale_max)?;
        finite("player_damping", self.player_damping)?;

        positive("body_density", self.body_density)?;
        positive("player_radius", self.player_radius)?;
        positive("spawn_interval", self.spawn_interval)?;
        positive("obstacle_lifetime", self.obstacle_lifetime)?;
        positive("obstacle_scale_min", self.obstacle_scale_min)?;
        unit("restitution", self.restitution)?;
        unit("destroy_line_fraction", self.destroy_line_fraction)?;

        if self.spawn_jitter < 0.0 || self.spawn_jitter >= self.spawn_interval {
            return Err(ConfigError::OutOfRange {
                name: "spawn_jitter",
                value: self.spawn_jitter,
                expected: "[0, spawn_interval)",
            });
        }
        if self.obstacle_scale_max < self.obstacle_scale_min {
            return Err(ConfigError::OutOfRange {
                name: "obstacle_scale_max",
                value: self.obstacle_scale_max,
                expected: "[obstacle_scale_min, ∞)",
            });
        }
        if self.player_damping < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "player_damping",
                value: self.player_damping,
                expected: "[0, ∞)",
            });
        }
        Ok(())
    }
}

/// JSON numbers past f32::MAX parse as infinity
fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "a finite number",
        })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "(0, ∞)",
        })
    }
}

fn unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "[0, 1]",
        })
    }
}
