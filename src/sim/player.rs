//! The player-controlled dino

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::{Body, EntityTag};
use crate::tuning::Tuning;

/// Animation the renderer should loop for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationCue {
    Idle,
    Run,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub body: Body,
    /// Last drive vector fed in (normalized tilt)
    pub drive: Vec2,
    drive_gain: f32,
    jump_impulse: f32,
    run_speed_threshold: f32,
}

impl Player {
    pub fn new(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        let mut body = Body::new(pos, tuning.player_radius, tuning.body_density);
        body.damping = tuning.player_damping;
        body.restitution = tuning.restitution;
        Self {
            id,
            body,
            drive: Vec2::ZERO,
            drive_gain: tuning.drive_gain,
            jump_impulse: tuning.jump_impulse,
            run_speed_threshold: tuning.run_speed_threshold,
        }
    }

    pub const TAG: EntityTag = EntityTag::Player;

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Push the player along the tilt vector. Call once per frame.
    pub fn apply_drive(&mut self, tilt: Vec2) {
        if !self.is_alive() {
            return;
        }
        self.drive = tilt;
        self.body.apply_force(tilt * self.drive_gain);
    }

    /// Upward kick. No grounded check: taps can be chained mid-air.
    pub fn jump(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.body.apply_impulse(Vec2::new(0.0, self.jump_impulse));
    }

    pub fn anim_cue(&self) -> AnimationCue {
        if self.body.vel.x.abs() > self.run_speed_threshold {
            AnimationCue::Run
        } else {
            AnimationCue::Idle
        }
    }

    pub fn despawn(&mut self) {
        self.body.alive = false;
        self.body.vel = Vec2::ZERO;
        self.body.clear_forces();
    }
}
