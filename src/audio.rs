//! Background music
//!
//! The core only decides *which* track should be playing. Decoding and output
//! belong to the host, reached through [`TrackSink`].

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    /// Home screen loop
    Home,
    /// In-round loop
    Gameplay,
}

impl Track {
    /// Asset file name the host loads for this track
    pub fn file_name(&self) -> &'static str {
        match self {
            Track::Home => "home.wav",
            Track::Gameplay => "bgm.mp3",
        }
    }
}

/// Host audio output for looping tracks
pub trait TrackSink {
    /// Start looping `name`. Returns false if the asset can't be played.
    fn start(&mut self, name: &str) -> bool;
    fn stop(&mut self, name: &str);
    /// Volume in [0, 1]
    fn set_volume(&mut self, volume: f32);
}

/// Plays one background track at a time
pub struct BackgroundMusic<S: TrackSink> {
    sink: S,
    current: Option<Track>,
    music_volume: f32,
    muted: bool,
}

impl<S: TrackSink> BackgroundMusic<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        let mut music = Self {
            sink,
            current: None,
            music_volume: settings.music_volume,
            muted: settings.muted,
        };
        music.push_volume();
        music
    }

    /// Track currently playing, if any
    pub fn current(&self) -> Option<Track> {
        self.current
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.push_volume();
    }

    /// Mute/unmute music
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.push_volume();
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    fn push_volume(&mut self) {
        let vol = self.effective_volume();
        self.sink.set_volume(vol);
    }

    /// Switch to `track`, stopping whatever was playing first.
    ///
    /// Asking for the track that is already playing does nothing. If the new
    /// track fails to start, nothing plays.
    pub fn play(&mut self, track: Track) {
        if self.current == Some(track) {
            return;
        }
        self.stop();

        if self.sink.start(track.file_name()) {
            log::debug!("Playing {:?} ({})", track, track.file_name());
            self.current = Some(track);
        } else {
            log::warn!("Track {} unavailable - music disabled", track.file_name());
        }
    }

    pub fn stop(&mut self) {
        if let Some(prev) = self.current.take() {
            self.sink.stop(prev.file_name());
        }
    }
}
