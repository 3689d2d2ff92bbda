//! Per-frame simulation step
//!
//! The host calls [`tick`] once per rendered frame with the real frame time.
//! Physics is sub-stepped internally; the round timer runs off accumulated
//! time so a round lasts the same wall-clock time at any frame rate.

use glam::Vec2;

use super::collision::{Collider, Contact, player_contacts};
use super::physics::{separate, substeps};
use super::state::GameState;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Device tilt, roughly in [-1, 1] per axis
    pub drive: Vec2,
    /// Primary action (screen tap) this frame
    pub tap: bool,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.max(0.0);

    if input.tap {
        state.tap();
    }

    // Only a running round moves
    if !state.is_playing() {
        return;
    }

    state.elapsed += dt;

    if let Some(player) = state.player.as_mut() {
        player.apply_drive(input.drive);
    }

    step_physics(state, dt);
    if !state.is_playing() {
        return;
    }

    state.advance_timer(dt);
    if !state.is_playing() {
        return;
    }

    state.tick_spawner(dt);
    state.expire_obstacles(dt);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Integrate bodies, keep them on screen and resolve contacts
fn step_physics(state: &mut GameState, dt: f32) {
    let (steps, h) = substeps(dt);
    let gravity = state.tuning.gravity;

    for _ in 0..steps {
        if let Some(player) = state.player.as_mut() {
            player.body.integrate(h, gravity);
            player.body.confine(&state.area, false);
        }
        for obstacle in &mut state.obstacles {
            obstacle.body.integrate(h, gravity);
            obstacle.body.confine(&state.area, true);
        }

        let contacts = match state.player.as_ref() {
            Some(player) => player_contacts(player, &state.obstacles),
            None => Vec::new(),
        };
        for contact in contacts {
            push_apart(state, contact);
            state.handle_contact(contact);
            if !state.is_playing() {
                return;
            }
        }

        for contact in state.resolver.boundary_contacts(&state.obstacles) {
            state.handle_contact(contact);
        }
    }

    if let Some(player) = state.player.as_mut() {
        player.body.clear_forces();
    }
}

/// Physical response between the player and the obstacle in `contact`
fn push_apart(state: &mut GameState, contact: Contact) {
    let Collider::Obstacle(id) = contact.b else {
        return;
    };
    let Some(player) = state.player.as_mut() else {
        return;
    };
    if let Ok(idx) = state.obstacles.binary_search_by_key(&id, |o| o.id) {
        separate(&mut player.body, &mut state.obstacles[idx].body);
    }
}
