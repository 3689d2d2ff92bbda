//! Falling meteorites
//!
//! An obstacle spawns on the top edge, gets one sideways shove toward where the
//! player stands at that moment, and then falls under gravity until its
//! lifetime runs out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::{Body, EntityTag};
use crate::tuning::Tuning;
use crate::{bearing, normalize_angle};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub body: Body,
    /// Visual scale; the collision radius is half of it
    pub scale: f32,
    /// Direction of travel at launch (radians)
    pub heading: f32,
    /// Round time (seconds) when spawned
    pub spawned_at: f32,
    /// Seconds alive
    pub age: f32,
    /// Already handled by the collision resolver; inert from here on
    pub resolved: bool,
}

impl Obstacle {
    pub const TAG: EntityTag = EntityTag::Obstacle;

    pub fn new(id: u32, pos: Vec2, scale: f32, spawned_at: f32, tuning: &Tuning) -> Self {
        let mut body = Body::new(pos, scale / 2.0, tuning.body_density);
        body.restitution = tuning.restitution;
        Self {
            id,
            body,
            scale,
            heading: -std::f32::consts::FRAC_PI_2,
            spawned_at,
            age: 0.0,
            resolved: false,
        }
    }

    /// Shove the obstacle sideways toward `target`. With no target it drops
    /// straight down.
    pub fn launch_toward(&mut self, target: Option<Vec2>, impulse: f32) {
        let Some(target) = target else {
            self.heading = -std::f32::consts::FRAC_PI_2;
            return;
        };
        self.heading = bearing(self.body.pos, target);
        self.body
            .apply_impulse(Vec2::new(impulse * self.heading.cos(), 0.0));
    }

    /// Sprite rotation so the meteor points along its travel direction
    #[inline]
    pub fn rotation(&self) -> f32 {
        normalize_angle(self.heading + std::f32::consts::FRAC_PI_2)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Advance age; true once the lifetime is spent
    pub fn age_by(&mut self, dt: f32, lifetime: f32) -> bool {
        self.age += dt;
        self.age >= lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn obstacle_at(x: f32) -> Obstacle {
        Obstacle::new(7, Vec2::new(x, 800.0), 40.0, 3.0, &Tuning::default())
    }

    #[test]
    fn test_radius_is_half_scale() {
        let o = obstacle_at(100.0);
        assert_eq!(o.body.radius, 20.0);
        assert!(!o.resolved);
        assert_eq!(o.spawned_at, 3.0);
    }

    #[test]
    fn test_impulse_points_toward_player() {
        let mut left = obstacle_at(300.0);
        left.launch_toward(Some(Vec2::new(100.0, 100.0)), 4.0);
        assert!(left.body.vel.x < 0.0);
        assert_eq!(left.body.vel.y, 0.0);

        let mut right = obstacle_at(50.0);
        right.launch_toward(Some(Vec2::new(100.0, 100.0)), 4.0);
        assert!(right.body.vel.x > 0.0);
    }

    #[test]
    fn test_no_player_falls_straight() {
        let mut o = obstacle_at(100.0);
        o.launch_toward(None, 4.0);
        assert_eq!(o.body.vel, Vec2::ZERO);
        assert!((o.heading + FRAC_PI_2).abs() < 1e-6);
        assert!(o.rotation().abs() < 1e-6);
    }

    #[test]
    fn test_lifetime_expiry() {
        let mut o = obstacle_at(100.0);
        assert!(!o.age_by(1.0, 2.0));
        assert!(o.age_by(1.0, 2.0));
    }
}
