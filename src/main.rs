//! Dino Dash entry point
//!
//! Runs a headless scripted session: a wobbling tilt with periodic jumps,
//! rendered to the log instead of a screen. Pass a tuning JSON file as the
//! first argument to try different balance values, and a settings JSON file
//! as the second.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use dino_dash::audio::{BackgroundMusic, TrackSink};
    use dino_dash::platform::{FpsCounter, Presentation, present};
    use dino_dash::sim::{GameState, PlayArea, ResolveCause, RoundState, TickInput, tick};
    use dino_dash::{Settings, Tuning};
    use glam::Vec2;

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up if a round somehow never ends
    const MAX_FRAMES: u32 = 60 * 120;

    /// Presentation that writes to the log
    #[derive(Default)]
    struct LogPresenter {
        show_fps: bool,
        fps: u32,
    }

    impl Presentation for LogPresenter {
        fn render_home(&mut self) {
            log::info!("[screen] home");
        }

        fn render_game_over(&mut self) {
            log::info!("[screen] game over");
        }

        fn update_health(&mut self, filled: u8, max: u8) {
            let pips: String = (0..max)
                .map(|i| if i < filled { '♥' } else { '·' })
                .collect();
            log::info!("[hud] health {}", pips);
        }

        fn update_timer(&mut self, seconds: u32) {
            if seconds % 10 == 0 {
                log::info!("[hud] {}s left", seconds);
            }
        }

        fn update_fps(&mut self, fps: u32) {
            if self.show_fps && fps != self.fps {
                log::debug!("[hud] {} fps", fps);
            }
            self.fps = fps;
        }

        fn obstacle_exploded(&mut self, id: u32, pos: Vec2, cause: ResolveCause) {
            log::debug!(
                "[fx] obstacle {} burst at ({:.0}, {:.0}): {:?}",
                id,
                pos.x,
                pos.y,
                cause
            );
        }
    }

    /// Music output that only reports what it would play
    struct LogSink;

    impl TrackSink for LogSink {
        fn start(&mut self, name: &str) -> bool {
            log::info!("[music] start {}", name);
            true
        }

        fn stop(&mut self, name: &str) {
            log::info!("[music] stop {}", name);
        }

        fn set_volume(&mut self, volume: f32) {
            log::debug!("[music] volume {:.2}", volume);
        }
    }

    fn load_tuning() -> Tuning {
        match std::env::args().nth(1) {
            Some(path) => match Tuning::load(&path) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Failed to load tuning from {}: {} - using defaults", path, e);
                    Tuning::default()
                }
            },
            None => Tuning::default(),
        }
    }

    fn load_settings() -> Settings {
        match std::env::args().nth(2) {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        }
    }

    fn seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(42)
    }

    fn trace_events(state: &mut GameState) -> Vec<dino_dash::sim::GameEvent> {
        let events = state.drain_events();
        for event in &events {
            match serde_json::to_string(event) {
                Ok(json) => log::trace!("event {}", json),
                Err(e) => log::warn!("Failed to encode event: {}", e),
            }
        }
        events
    }

    pub fn run() {
        let settings = load_settings();
        let seed = seed();
        let mut state = GameState::new(seed, load_tuning(), PlayArea::default());
        let mut view = LogPresenter {
            show_fps: settings.show_fps,
            ..Default::default()
        };
        let mut music = BackgroundMusic::new(LogSink, &settings);
        let mut fps = FpsCounter::new();

        log::info!(
            "Seed: {}, music volume {:.2}",
            seed,
            settings.effective_music_volume()
        );
        present(&trace_events(&mut state), &mut view, &mut music);

        let mut frame = 0u32;
        let mut started = false;
        while frame < MAX_FRAMES {
            let t = frame as f32 * FRAME_DT;
            let input = TickInput {
                drive: Vec2::new((t * 0.7).sin(), 0.0),
                // First tap starts the round, then hop every 1.5s
                tap: frame == 0 || frame % 90 == 45,
            };
            tick(&mut state, &input, FRAME_DT);

            let events = trace_events(&mut state);
            present(&events, &mut view, &mut music);
            view.update_fps(fps.record(f64::from(frame + 1) * 1000.0 / 60.0));

            if let Some(player) = state.player.as_ref().filter(|_| frame % 60 == 0) {
                log::debug!(
                    "[player] ({:.0}, {:.0}) {:?}",
                    player.pos().x,
                    player.pos().y,
                    player.anim_cue()
                );
            }

            started |= state.is_playing();
            if started && state.round == RoundState::Ended {
                break;
            }
            frame += 1;
        }

        log::info!(
            "Session over after {:.1}s: {:?}, health {}/{}, timer {}",
            frame as f32 * FRAME_DT,
            state.end_cause,
            state.health,
            state.tuning.max_health,
            state.timer
        );
        music.stop();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Dash (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library directly; nothing to do here
}
