//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod physics;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{
    Collider, CollisionResolver, Contact, Resolution, ResolveCause, player_contacts,
};
pub use obstacle::Obstacle;
pub use physics::{Body, EntityTag, PlayArea};
pub use player::{AnimationCue, Player};
pub use spawner::Spawner;
pub use state::{EndCause, GameEvent, GameState, RoundState};
pub use tick::{TickInput, tick};
