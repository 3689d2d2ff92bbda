//! Round state and the transitions between screens
//!
//! `GameState` owns everything a round needs: health, countdown, the player,
//! live obstacles and the seeded RNG. Transitions push [`GameEvent`]s that the
//! host drains each frame to drive screens and music.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionResolver, Contact, ResolveCause, Resolution};
use super::obstacle::Obstacle;
use super::physics::PlayArea;
use super::player::Player;
use super::spawner::Spawner;
use crate::audio::Track;
use crate::tuning::Tuning;

/// Current screen / phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Logo screen, waiting for a tap
    ShowingHome,
    /// Active round
    Playing,
    /// Terminal screen kept for hosts that end rounds themselves
    Dead,
    /// Declared but nothing enters it; only `reset` leaves it
    Paused,
    /// Round over, waiting for a tap
    Ended,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    HealthDepleted,
    /// Survived the full countdown
    TimeUp,
}

/// Things the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShowHome,
    ShowGameOver,
    RoundStarted,
    RoundEnded { cause: EndCause },
    HealthChanged { health: u8, max: u8 },
    TimerChanged { seconds: u32 },
    PlayTrack(Track),
    Jumped,
    ObstacleSpawned { id: u32, pos: Vec2, scale: f32 },
    ObstacleExploded { id: u32, pos: Vec2, cause: ResolveCause },
    ObstacleDespawned { id: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub round: RoundState,
    /// Remaining health, 0..=tuning.max_health
    pub health: u8,
    /// Whole seconds left on the countdown
    pub timer: u32,
    /// Seconds accumulated toward the next timer decrement
    timer_accum: f32,
    /// Seconds since round start
    pub elapsed: f32,
    /// Area used by the running round
    pub area: PlayArea,
    /// Area to latch at the next round start
    pending_area: Option<PlayArea>,
    pub player: Option<Player>,
    /// Live obstacles, sorted by id
    pub obstacles: Vec<Obstacle>,
    /// Ids of obstacles already handled by the resolver
    pub resolved: BTreeSet<u32>,
    pub spawner: Spawner,
    pub resolver: CollisionResolver,
    /// How the last round ended
    pub end_cause: Option<EndCause>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh state on the home screen.
    ///
    /// `tuning` must pass [`Tuning::validate`]; out-of-range values can make
    /// spawning panic.
    pub fn new(seed: u64, tuning: Tuning, area: PlayArea) -> Self {
        debug_assert!(tuning.validate().is_ok(), "invalid tuning: {:?}", tuning);
        let spawner = Spawner::new(&tuning);
        let resolver = CollisionResolver::new(&area, &tuning);
        let health = tuning.max_health;
        let timer = tuning.round_seconds;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            round: RoundState::ShowingHome,
            health,
            timer,
            timer_accum: 0.0,
            elapsed: 0.0,
            area,
            pending_area: None,
            player: None,
            obstacles: Vec::new(),
            resolved: BTreeSet::new(),
            spawner,
            resolver,
            end_cause: None,
            events: vec![GameEvent::ShowHome, GameEvent::PlayTrack(Track::Home)],
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Record the screen size. Applied at the next round start.
    pub fn set_play_area(&mut self, area: PlayArea) {
        if self.round == RoundState::Playing {
            self.pending_area = Some(area);
        } else {
            self.area = area;
            self.pending_area = None;
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.round == RoundState::Playing
    }

    /// Home -> Playing. No-op from any other state.
    pub fn start_round(&mut self) {
        if self.round != RoundState::ShowingHome {
            return;
        }

        if let Some(area) = self.pending_area.take() {
            self.area = area;
        }
        self.health = self.tuning.max_health;
        self.timer = self.tuning.round_seconds;
        self.timer_accum = 0.0;
        self.elapsed = 0.0;
        self.obstacles.clear();
        self.resolved.clear();
        self.end_cause = None;
        self.resolver = CollisionResolver::new(&self.area, &self.tuning);
        self.spawner = Spawner::new(&self.tuning);
        self.spawner.reset(&mut self.rng);

        let id = self.next_entity_id();
        self.player = Some(Player::new(id, self.area.center(), &self.tuning));

        self.round = RoundState::Playing;
        log::info!(
            "Round started: health={} timer={} area={}x{}",
            self.health,
            self.timer,
            self.area.width,
            self.area.height
        );

        self.events.push(GameEvent::RoundStarted);
        self.events.push(GameEvent::PlayTrack(Track::Gameplay));
        self.events.push(GameEvent::HealthChanged {
            health: self.health,
            max: self.tuning.max_health,
        });
        self.events.push(GameEvent::TimerChanged {
            seconds: self.timer,
        });
    }

    /// Playing -> Ended. Fires once per round.
    pub fn end_round(&mut self, cause: EndCause) {
        if self.round != RoundState::Playing {
            return;
        }
        self.round = RoundState::Ended;
        self.end_cause = Some(cause);
        if let Some(player) = self.player.as_mut() {
            player.despawn();
        }
        log::info!(
            "Round ended: {:?} (health={}, timer={})",
            cause,
            self.health,
            self.timer
        );

        self.events.push(GameEvent::RoundEnded { cause });
        self.events.push(GameEvent::ShowGameOver);
        self.events.push(GameEvent::PlayTrack(Track::Home));
    }

    /// Ended/Dead -> Home on acknowledgement. Health and timer are left as
    /// they were until the next start.
    pub fn acknowledge(&mut self) {
        if !matches!(self.round, RoundState::Ended | RoundState::Dead) {
            return;
        }
        self.go_home();
    }

    /// Host-driven return to the home screen from any state
    pub fn reset(&mut self) {
        if self.round == RoundState::ShowingHome {
            return;
        }
        self.go_home();
    }

    fn go_home(&mut self) {
        self.round = RoundState::ShowingHome;
        self.player = None;
        log::info!("Back to home screen");
        self.events.push(GameEvent::ShowHome);
        self.events.push(GameEvent::PlayTrack(Track::Home));
    }

    /// The single primary action, interpreted by state
    pub fn tap(&mut self) {
        match self.round {
            RoundState::ShowingHome => self.start_round(),
            RoundState::Playing => {
                if let Some(player) = self.player.as_mut().filter(|p| p.is_alive()) {
                    player.jump();
                    self.events.push(GameEvent::Jumped);
                }
            }
            RoundState::Dead | RoundState::Ended => self.acknowledge(),
            RoundState::Paused => {}
        }
    }

    /// Remove `amount` health, ending the round when it runs out
    pub fn apply_damage(&mut self, amount: u8) {
        if !self.is_playing() || amount == 0 {
            return;
        }
        self.health = self.health.saturating_sub(amount);
        self.events.push(GameEvent::HealthChanged {
            health: self.health,
            max: self.tuning.max_health,
        });
        if self.health == 0 {
            self.end_round(EndCause::HealthDepleted);
        }
    }

    /// Feed elapsed time to the 1 Hz countdown. Each whole second removes one
    /// from the timer; hitting zero ends the round.
    pub fn advance_timer(&mut self, dt: f32) {
        if !self.is_playing() || dt <= 0.0 {
            return;
        }
        self.timer_accum += dt;
        while self.timer_accum >= 1.0 && self.is_playing() {
            self.timer_accum -= 1.0;
            self.timer = self.timer.saturating_sub(1);
            self.events.push(GameEvent::TimerChanged {
                seconds: self.timer,
            });
            if self.timer == 0 {
                self.end_round(EndCause::TimeUp);
            }
        }
    }

    /// Run a contact through the resolver and apply its outcome
    pub fn handle_contact(&mut self, contact: Contact) -> Option<Resolution> {
        if !self.is_playing() {
            return None;
        }
        let resolution = self
            .resolver
            .resolve(contact, &mut self.obstacles, &mut self.resolved)?;

        self.events.push(GameEvent::ObstacleExploded {
            id: resolution.obstacle_id,
            pos: resolution.pos,
            cause: resolution.cause,
        });
        self.apply_damage(resolution.damage);
        Some(resolution)
    }

    /// Create one obstacle on the top edge and aim it at the player
    pub fn spawn_obstacle(&mut self) -> u32 {
        let t = &self.tuning;
        let scale = self
            .rng
            .random_range(t.obstacle_scale_min..=t.obstacle_scale_max);
        let x = self.rng.random_range(0.0..=self.area.width);
        let pos = Vec2::new(x, self.area.height);

        let id = self.next_entity_id();
        let mut obstacle = Obstacle::new(id, pos, scale, self.elapsed, &self.tuning);
        let target = self
            .player
            .as_ref()
            .filter(|p| p.is_alive())
            .map(|p| p.pos());
        obstacle.launch_toward(target, self.tuning.deflection_impulse);

        log::debug!("Spawned obstacle {} at ({:.0}, {:.0}) scale {:.1}", id, x, pos.y, scale);
        self.events.push(GameEvent::ObstacleSpawned { id, pos, scale });
        // Ids are monotonic so pushing keeps the list sorted
        self.obstacles.push(obstacle);
        id
    }

    /// Advance the spawn countdown; spawns at most one obstacle
    pub fn tick_spawner(&mut self, dt: f32) -> Option<u32> {
        if !self.is_playing() {
            return None;
        }
        if self.spawner.tick(dt, &mut self.rng) {
            Some(self.spawn_obstacle())
        } else {
            None
        }
    }

    /// Age obstacles and drop the ones whose lifetime ran out
    pub fn expire_obstacles(&mut self, dt: f32) {
        let lifetime = self.tuning.obstacle_lifetime;
        let mut expired = Vec::new();
        self.obstacles.retain_mut(|o| {
            if o.age_by(dt, lifetime) {
                expired.push(o.id);
                false
            } else {
                true
            }
        });
        for id in expired {
            self.resolved.remove(&id);
            self.events.push(GameEvent::ObstacleDespawned { id });
        }
    }

    /// Ensure deterministic iteration order
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
    }
}
