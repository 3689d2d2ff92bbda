//! Minimal motion provider
//!
//! Circular point-mass bodies with a force accumulator, impulses, gravity and
//! linear damping, plus the play-area rectangle that bounds them. Only what the
//! gameplay layer needs: push things, step them, keep them on screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_STEP_DT, MAX_SUBSTEPS};

/// Collision category of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    Player,
    Obstacle,
    Boundary,
}

/// Play-area rectangle. Origin is bottom-left, y grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Height of the line at `fraction` of the area (0 = floor, 1 = top)
    #[inline]
    pub fn line_at(&self, fraction: f32) -> f32 {
        self.height * fraction
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        // Portrait phone in points
        Self::new(390.0, 844.0)
    }
}

/// A circular rigid body (no rotation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Linear damping (1/s)
    pub damping: f32,
    pub restitution: f32,
    pub alive: bool,
    /// Forces accumulated for the current frame
    force: Vec2,
}

impl Body {
    /// Create a body whose mass follows its area
    pub fn new(pos: Vec2, radius: f32, density: f32) -> Self {
        let mass = (density * std::f32::consts::PI * radius * radius).max(f32::EPSILON);
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            mass,
            damping: 0.0,
            restitution: 0.0,
            alive: true,
            force: Vec2::ZERO,
        }
    }

    /// Accumulate a continuous force for this frame
    pub fn apply_force(&mut self, force: Vec2) {
        if self.alive {
            self.force += force;
        }
    }

    /// Instantly change momentum
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.alive {
            self.vel += impulse / self.mass;
        }
    }

    /// Force accumulated so far this frame
    pub fn pending_force(&self) -> Vec2 {
        self.force
    }

    pub fn clear_forces(&mut self) {
        self.force = Vec2::ZERO;
    }

    /// Semi-implicit Euler step
    pub fn integrate(&mut self, dt: f32, gravity: Vec2) {
        if !self.alive {
            return;
        }
        let accel = gravity + self.force / self.mass;
        self.vel += accel * dt;
        if self.damping > 0.0 {
            self.vel /= 1.0 + self.damping * dt;
        }
        self.pos += self.vel * dt;
    }

    /// Circle overlap test
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        let r = self.radius + other.radius;
        self.pos.distance_squared(other.pos) < r * r
    }

    /// Keep the body inside `area`, bouncing off walls.
    /// With `open_top` the body may sit above the top edge (spawn line).
    /// Returns true if any wall was touched.
    pub fn confine(&mut self, area: &PlayArea, open_top: bool) -> bool {
        let mut touched = false;
        let r = self.radius;
        let bounce = self.restitution;

        if self.pos.x < r {
            self.pos.x = r;
            self.vel.x = self.vel.x.abs() * bounce;
            touched = true;
        } else if self.pos.x > area.width - r {
            self.pos.x = area.width - r;
            self.vel.x = -self.vel.x.abs() * bounce;
            touched = true;
        }

        if self.pos.y < r {
            self.pos.y = r;
            self.vel.y = self.vel.y.abs() * bounce;
            touched = true;
        } else if !open_top && self.pos.y > area.height - r {
            self.pos.y = area.height - r;
            self.vel.y = -self.vel.y.abs() * bounce;
            touched = true;
        }

        touched
    }
}

/// Push two overlapping bodies apart and exchange momentum along the contact
/// normal. Returns false if they weren't touching.
pub fn separate(a: &mut Body, b: &mut Body) -> bool {
    if !a.alive || !b.alive || !a.overlaps(b) {
        return false;
    }

    let delta = b.pos - a.pos;
    let dist = delta.length();
    let normal = if dist > 1e-4 { delta / dist } else { Vec2::Y };
    let penetration = a.radius + b.radius - dist;

    // Positional correction split by inverse mass
    let inv_a = 1.0 / a.mass;
    let inv_b = 1.0 / b.mass;
    let inv_sum = inv_a + inv_b;
    a.pos -= normal * penetration * (inv_a / inv_sum);
    b.pos += normal * penetration * (inv_b / inv_sum);

    let closing = (b.vel - a.vel).dot(normal);
    if closing < 0.0 {
        let e = a.restitution.min(b.restitution);
        let j = -(1.0 + e) * closing / inv_sum;
        a.vel -= normal * j * inv_a;
        b.vel += normal * j * inv_b;
    }

    true
}

/// Split a frame into physics steps: (count, step length)
pub fn substeps(dt: f32) -> (u32, f32) {
    if dt <= 0.0 {
        return (0, 0.0);
    }
    // Tolerance keeps 1/60 from rounding up to three steps
    let n = ((dt / MAX_STEP_DT - 1e-3).ceil() as u32).clamp(1, MAX_SUBSTEPS);
    (n, dt / n as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_scales_with_mass() {
        let mut body = Body::new(Vec2::ZERO, 10.0, 1.0);
        body.mass = 2.0;
        body.apply_impulse(Vec2::new(0.0, 10.0));
        assert_eq!(body.vel, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_dead_body_ignores_forces() {
        let mut body = Body::new(Vec2::ZERO, 10.0, 1.0);
        body.alive = false;
        body.apply_force(Vec2::X * 100.0);
        body.apply_impulse(Vec2::Y * 100.0);
        body.integrate(0.1, Vec2::new(0.0, -980.0));
        assert_eq!(body.vel, Vec2::ZERO);
        assert_eq!(body.pos, Vec2::ZERO);
        assert_eq!(body.pending_force(), Vec2::ZERO);
    }

    #[test]
    fn test_integrate_applies_gravity_and_force() {
        let mut body = Body::new(Vec2::ZERO, 1.0, 1.0);
        body.mass = 1.0;
        body.apply_force(Vec2::new(10.0, 0.0));
        body.integrate(0.5, Vec2::new(0.0, -10.0));
        assert_eq!(body.vel, Vec2::new(5.0, -5.0));
        assert_eq!(body.pos, Vec2::new(2.5, -2.5));
    }

    #[test]
    fn test_confine_floor_and_open_top() {
        let area = PlayArea::new(100.0, 100.0);
        let mut body = Body::new(Vec2::new(50.0, -5.0), 10.0, 1.0);
        body.vel = Vec2::new(0.0, -50.0);
        assert!(body.confine(&area, false));
        assert_eq!(body.pos.y, 10.0);
        assert!(body.vel.y >= 0.0);

        let mut above = Body::new(Vec2::new(50.0, 100.0), 10.0, 1.0);
        assert!(!above.confine(&area, true));
        assert_eq!(above.pos.y, 100.0);
        assert!(above.confine(&area, false));
        assert_eq!(above.pos.y, 90.0);
    }

    #[test]
    fn test_separate_pushes_apart() {
        let mut a = Body::new(Vec2::new(0.0, 0.0), 10.0, 1.0);
        let mut b = Body::new(Vec2::new(15.0, 0.0), 10.0, 1.0);
        b.vel = Vec2::new(-100.0, 0.0);
        assert!(separate(&mut a, &mut b));
        assert!((b.pos.x - a.pos.x - 20.0).abs() < 1e-3);
        assert!(b.vel.x >= a.vel.x);

        let mut far = Body::new(Vec2::new(100.0, 0.0), 10.0, 1.0);
        assert!(!separate(&mut a, &mut far));
    }

    #[test]
    fn test_substeps() {
        assert_eq!(substeps(0.0).0, 0);
        let (n, step) = substeps(1.0 / 60.0);
        assert_eq!(n, 2);
        assert!((step - 1.0 / 120.0).abs() < 1e-6);
        let (n, _) = substeps(10.0);
        assert_eq!(n, MAX_SUBSTEPS);
    }
}
