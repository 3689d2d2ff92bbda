//! Contact detection and gameplay resolution
//!
//! Physics reports raw overlaps; this module decides what they mean. A meteor
//! touching the player costs one health, a meteor reaching the destroy line
//! just bursts. Either way an obstacle is resolved at most once.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::physics::{EntityTag, PlayArea};
use super::player::Player;
use crate::tuning::Tuning;

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collider {
    Player,
    Obstacle(u32),
    Boundary,
}

impl Collider {
    pub fn tag(&self) -> EntityTag {
        match self {
            Collider::Player => Player::TAG,
            Collider::Obstacle(_) => Obstacle::TAG,
            Collider::Boundary => EntityTag::Boundary,
        }
    }
}

/// An unordered pair of touching entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: Collider,
    pub b: Collider,
}

impl Contact {
    pub fn new(a: Collider, b: Collider) -> Self {
        Self { a, b }
    }

    /// Split into (obstacle id, other side's tag) when exactly one side is an
    /// obstacle
    fn obstacle_and_other(&self) -> Option<(u32, EntityTag)> {
        match (self.a, self.b) {
            (Collider::Obstacle(_), Collider::Obstacle(_)) => None,
            (Collider::Obstacle(id), other) | (other, Collider::Obstacle(id)) => {
                Some((id, other.tag()))
            }
            _ => None,
        }
    }
}

/// Why an obstacle was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveCause {
    /// Hit the player
    PlayerHit,
    /// Reached the destroy line without touching the player
    Grounded,
}

/// Outcome of resolving one obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub obstacle_id: u32,
    pub pos: Vec2,
    pub cause: ResolveCause,
    /// Health to remove
    pub damage: u8,
}

/// Turns contacts into gameplay outcomes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionResolver {
    /// Obstacles whose bottom edge drops to this height burst
    pub destroy_line_y: f32,
}

impl CollisionResolver {
    pub fn new(area: &PlayArea, tuning: &Tuning) -> Self {
        Self {
            destroy_line_y: area.line_at(tuning.destroy_line_fraction),
        }
    }

    #[inline]
    pub fn below_destroy_line(&self, obstacle: &Obstacle) -> bool {
        obstacle.body.pos.y - obstacle.body.radius <= self.destroy_line_y
    }

    /// Resolve a contact. `obstacles` must be sorted by id.
    ///
    /// Returns `None` for pairs with no gameplay meaning, unknown obstacles,
    /// and obstacles that were already resolved.
    pub fn resolve(
        &self,
        contact: Contact,
        obstacles: &mut [Obstacle],
        resolved: &mut BTreeSet<u32>,
    ) -> Option<Resolution> {
        let (id, other) = contact.obstacle_and_other()?;
        let idx = obstacles.binary_search_by_key(&id, |o| o.id).ok()?;
        let obstacle = &mut obstacles[idx];

        if obstacle.resolved || resolved.contains(&id) {
            return None;
        }

        let (cause, damage) = match other {
            EntityTag::Player => (ResolveCause::PlayerHit, 1),
            EntityTag::Boundary if self.below_destroy_line(obstacle) => {
                (ResolveCause::Grounded, 0)
            }
            _ => return None,
        };

        obstacle.resolved = true;
        resolved.insert(id);
        log::debug!("Obstacle {} resolved: {:?}", id, cause);

        Some(Resolution {
            obstacle_id: id,
            pos: obstacle.pos(),
            cause,
            damage,
        })
    }

    /// Contacts for every unresolved obstacle past the destroy line
    pub fn boundary_contacts(&self, obstacles: &[Obstacle]) -> Vec<Contact> {
        obstacles
            .iter()
            .filter(|o| !o.resolved && self.below_destroy_line(o))
            .map(|o| Contact::new(Collider::Obstacle(o.id), Collider::Boundary))
            .collect()
    }
}

/// Overlap contacts between the player and any obstacle
pub fn player_contacts(player: &Player, obstacles: &[Obstacle]) -> Vec<Contact> {
    if !player.is_alive() {
        return Vec::new();
    }
    obstacles
        .iter()
        .filter(|o| o.body.alive && player.body.overlaps(&o.body))
        .map(|o| Contact::new(Collider::Player, Collider::Obstacle(o.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (CollisionResolver, Vec<Obstacle>, BTreeSet<u32>) {
        let tuning = Tuning {
            destroy_line_fraction: 0.5,
            ..Default::default()
        };
        let area = PlayArea::new(400.0, 800.0);
        let obstacles = vec![
            Obstacle::new(2, Vec2::new(100.0, 700.0), 40.0, 0.0, &tuning),
            Obstacle::new(5, Vec2::new(300.0, 300.0), 40.0, 0.0, &tuning),
        ];
        (CollisionResolver::new(&area, &tuning), obstacles, BTreeSet::new())
    }

    #[test]
    fn test_player_hit_resolves_once() {
        let (resolver, mut obstacles, mut resolved) = setup();
        let contact = Contact::new(Collider::Player, Collider::Obstacle(2));

        let first = resolver.resolve(contact, &mut obstacles, &mut resolved);
        let first = first.expect("first contact resolves");
        assert_eq!(first.cause, ResolveCause::PlayerHit);
        assert_eq!(first.damage, 1);
        assert!(obstacles[0].resolved);
        assert!(resolved.contains(&2));

        // Same overlap reported again, in either order
        let flipped = Contact::new(Collider::Obstacle(2), Collider::Player);
        assert!(resolver.resolve(contact, &mut obstacles, &mut resolved).is_none());
        assert!(resolver.resolve(flipped, &mut obstacles, &mut resolved).is_none());
    }

    #[test]
    fn test_boundary_only_below_line() {
        let (resolver, mut obstacles, mut resolved) = setup();

        // Obstacle 2 is high up: a boundary report means a wall touch, ignore it
        let high = Contact::new(Collider::Boundary, Collider::Obstacle(2));
        assert!(resolver.resolve(high, &mut obstacles, &mut resolved).is_none());
        assert!(!obstacles[0].resolved);

        let low = Contact::new(Collider::Obstacle(5), Collider::Boundary);
        let res = resolver
            .resolve(low, &mut obstacles, &mut resolved)
            .expect("low obstacle bursts");
        assert_eq!(res.cause, ResolveCause::Grounded);
        assert_eq!(res.damage, 0);
    }

    #[test]
    fn test_grounded_obstacle_cannot_hurt_player() {
        let (resolver, mut obstacles, mut resolved) = setup();
        let low = Contact::new(Collider::Obstacle(5), Collider::Boundary);
        assert!(resolver.resolve(low, &mut obstacles, &mut resolved).is_some());

        let hit = Contact::new(Collider::Player, Collider::Obstacle(5));
        assert!(resolver.resolve(hit, &mut obstacles, &mut resolved).is_none());
    }

    #[test]
    fn test_meaningless_pairs_ignored() {
        let (resolver, mut obstacles, mut resolved) = setup();
        for contact in [
            Contact::new(Collider::Player, Collider::Boundary),
            Contact::new(Collider::Obstacle(2), Collider::Obstacle(5)),
            Contact::new(Collider::Player, Collider::Obstacle(99)),
        ] {
            assert!(resolver.resolve(contact, &mut obstacles, &mut resolved).is_none());
        }
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_boundary_contacts_skip_resolved() {
        let (resolver, mut obstacles, _) = setup();
        assert_eq!(resolver.boundary_contacts(&obstacles).len(), 1);
        obstacles[1].resolved = true;
        assert!(resolver.boundary_contacts(&obstacles).is_empty());
    }

    #[test]
    fn test_player_contacts_detect_overlap() {
        let tuning = Tuning::default();
        let (_, obstacles, _) = setup();
        let mut player = Player::new(1, Vec2::new(110.0, 690.0), &tuning);
        let contacts = player_contacts(&player, &obstacles);
        assert_eq!(
            contacts,
            vec![Contact::new(Collider::Player, Collider::Obstacle(2))]
        );

        player.despawn();
        assert!(player_contacts(&player, &obstacles).is_empty());
    }
}
