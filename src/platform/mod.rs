//! Platform abstraction layer
//!
//! The simulation never draws or plays anything itself. Each frame the host
//! drains [`GameEvent`]s and hands them to [`present`], which forwards them to:
//! - a [`Presentation`] (screens, HUD, effects)
//! - [`BackgroundMusic`] (track swaps)

pub mod fps;

pub use fps::FpsCounter;

use glam::Vec2;

use crate::audio::{BackgroundMusic, TrackSink};
use crate::sim::{GameEvent, ResolveCause};

/// Hooks a host implements to show the game
pub trait Presentation {
    fn render_home(&mut self);
    fn render_game_over(&mut self);
    /// `filled` of `max` health pips are lit
    fn update_health(&mut self, filled: u8, max: u8);
    fn update_timer(&mut self, seconds: u32);

    fn update_fps(&mut self, _fps: u32) {}

    /// Burst effect where an obstacle was resolved
    fn obstacle_exploded(&mut self, _id: u32, _pos: Vec2, _cause: ResolveCause) {}
}

/// Dispatch one frame's events to the presentation and music
pub fn present<P, S>(events: &[GameEvent], view: &mut P, music: &mut BackgroundMusic<S>)
where
    P: Presentation + ?Sized,
    S: TrackSink,
{
    for event in events {
        match *event {
            GameEvent::ShowHome => view.render_home(),
            GameEvent::ShowGameOver => view.render_game_over(),
            GameEvent::HealthChanged { health, max } => view.update_health(health, max),
            GameEvent::TimerChanged { seconds } => view.update_timer(seconds),
            GameEvent::PlayTrack(track) => music.play(track),
            GameEvent::ObstacleExploded { id, pos, cause } => {
                view.obstacle_exploded(id, pos, cause)
            }
            GameEvent::RoundStarted
            | GameEvent::RoundEnded { .. }
            | GameEvent::Jumped
            | GameEvent::ObstacleSpawned { .. }
            | GameEvent::ObstacleDespawned { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Track;
    use crate::settings::Settings;
    use crate::sim::{GameState, PlayArea, TickInput, tick};
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Hud {
        screen: &'static str,
        health: (u8, u8),
        timer: u32,
        bursts: Vec<ResolveCause>,
    }

    impl Presentation for Hud {
        fn render_home(&mut self) {
            self.screen = "home";
        }
        fn render_game_over(&mut self) {
            self.screen = "game over";
        }
        fn update_health(&mut self, filled: u8, max: u8) {
            self.health = (filled, max);
        }
        fn update_timer(&mut self, seconds: u32) {
            self.timer = seconds;
        }
        fn obstacle_exploded(&mut self, _id: u32, _pos: Vec2, cause: ResolveCause) {
            self.bursts.push(cause);
        }
    }

    #[derive(Default)]
    struct Tracks(Vec<String>);

    impl TrackSink for Tracks {
        fn start(&mut self, name: &str) -> bool {
            self.0.push(name.to_string());
            true
        }
        fn stop(&mut self, _name: &str) {}
        fn set_volume(&mut self, _volume: f32) {}
    }

    #[test]
    fn test_round_drives_screens_and_music() {
        let mut state = GameState::new(3, Tuning::default(), PlayArea::default());
        let mut hud = Hud::default();
        let mut music = BackgroundMusic::new(Tracks::default(), &Settings::default());

        present(&state.drain_events(), &mut hud, &mut music);
        assert_eq!(hud.screen, "home");
        assert_eq!(music.current(), Some(Track::Home));

        let tap = TickInput {
            tap: true,
            ..Default::default()
        };
        tick(&mut state, &tap, 1.0 / 60.0);
        present(&state.drain_events(), &mut hud, &mut music);
        assert_eq!(hud.health, (3, 3));
        assert_eq!(hud.timer, 60);
        assert_eq!(music.current(), Some(Track::Gameplay));

        state.apply_damage(3);
        present(&state.drain_events(), &mut hud, &mut music);
        assert_eq!(hud.health, (0, 3));
        assert_eq!(hud.screen, "game over");
        assert_eq!(music.sink().0, vec!["home.wav", "bgm.mp3", "home.wav"]);
    }

    #[test]
    fn test_explosions_forwarded() {
        let mut hud = Hud::default();
        let mut music = BackgroundMusic::new(Tracks::default(), &Settings::default());
        let events = [GameEvent::ObstacleExploded {
            id: 7,
            pos: Vec2::new(1.0, 2.0),
            cause: ResolveCause::Grounded,
        }];
        present(&events, &mut hud, &mut music);
        assert_eq!(hud.bursts, vec![ResolveCause::Grounded]);
        assert!(music.sink().0.is_empty());
    }
}
