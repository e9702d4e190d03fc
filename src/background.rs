use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::ClockError;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum BackgroundId {
    #[default]
    Gradient,
    NewYork,
    Forest,
    London,
    Tokyo,
    LosAngeles,
    MonteCarlo,
}

impl BackgroundId {
    pub const ALL: [BackgroundId; 7] = [
        BackgroundId::Gradient,
        BackgroundId::NewYork,
        BackgroundId::Forest,
        BackgroundId::London,
        BackgroundId::Tokyo,
        BackgroundId::LosAngeles,
        BackgroundId::MonteCarlo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BackgroundId::Gradient => "gradient",
            BackgroundId::NewYork => "new-york",
            BackgroundId::Forest => "forest",
            BackgroundId::London => "london",
            BackgroundId::Tokyo => "tokyo",
            BackgroundId::LosAngeles => "los-angeles",
            BackgroundId::MonteCarlo => "monte-carlo",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            BackgroundId::Gradient => "Gradient",
            BackgroundId::NewYork => "New York",
            BackgroundId::Forest => "Forest",
            BackgroundId::London => "London",
            BackgroundId::Tokyo => "Tokyo",
            BackgroundId::LosAngeles => "Los Angeles",
            BackgroundId::MonteCarlo => "Monte Carlo",
        }
    }

    pub fn is_neutral(self) -> bool {
        self == BackgroundId::Gradient
    }

    pub fn video_key(self) -> Option<&'static str> {
        match self {
            BackgroundId::Gradient => None,
            BackgroundId::NewYork => Some("Hb08uAeYf6g"),
            BackgroundId::Forest => Some("hMxlDbv-rec"),
            BackgroundId::London => Some("sXJLT3kYdhk"),
            BackgroundId::Tokyo => Some("MkdsvjGZv7U"),
            BackgroundId::LosAngeles => Some("3ecyAHQDsIU"),
            BackgroundId::MonteCarlo => Some("oS-rwVafano"),
        }
    }
}

impl fmt::Display for BackgroundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackgroundId {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        BackgroundId::ALL
            .into_iter()
            .find(|bg| bg.name() == wanted)
            .ok_or_else(|| ClockError::UnknownBackground(s.to_string()))
    }
}

/// The two-call contract the menu drives.
pub trait BackgroundVideo {
    fn play(&mut self, video_key: &str);
    fn stop(&mut self);
    fn current(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Logical looping, muted player. Tracks what a real embedded player would be
/// asked to do; decoding and fetching are not its concern.
#[derive(Debug, Clone, Default)]
pub struct LoopingVideoPlayer {
    ready: bool,
    state: PlaybackState,
    current_key: Option<String>,
    loads: u32,
    loops: u32,
}

impl LoopingVideoPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready() -> Self {
        let mut player = Self::new();
        player.on_ready();
        player
    }

    pub fn on_ready(&mut self) {
        self.ready = true;
    }

    pub fn on_ended(&mut self) {
        if self.state == PlaybackState::Playing {
            self.loops += 1;
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_muted(&self) -> bool {
        true
    }

    #[cfg(test)]
    pub fn loads(&self) -> u32 {
        self.loads
    }

    pub fn loops(&self) -> u32 {
        self.loops
    }
}

impl BackgroundVideo for LoopingVideoPlayer {
    fn play(&mut self, video_key: &str) {
        if !self.ready {
            debug!("video player not ready, ignoring play({video_key})");
            return;
        }
        if self.current_key.as_deref() != Some(video_key) {
            self.current_key = Some(video_key.to_string());
            self.loads += 1;
            debug!("loading background video {video_key} (load #{})", self.loads);
            self.loops = 0;
        }
        self.state = PlaybackState::Playing;
    }

    fn stop(&mut self) {
        if self.ready && self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        self.current_key = None;
    }

    fn current(&self) -> Option<&str> {
        self.current_key.as_deref()
    }
}

/// Wall-clock position inside the loaded video. A new key restarts from zero.
#[derive(Debug, Clone)]
pub struct LoopTimer {
    length: Duration,
    key: Option<String>,
    started: Option<Instant>,
    loops_seen: u32,
}

impl LoopTimer {
    pub fn new(length: Duration) -> Self {
        Self {
            length,
            key: None,
            started: None,
            loops_seen: 0,
        }
    }

    /// Returns the phase within the current loop (0.0..1.0) and how many loops
    /// ended since the previous call.
    pub fn advance(&mut self, key: Option<&str>, now: Instant) -> (f32, u32) {
        if self.key.as_deref() != key {
            self.key = key.map(str::to_string);
            self.started = key.map(|_| now);
            self.loops_seen = 0;
        }
        let Some(started) = self.started else {
            return (0.0, 0);
        };
        let length = self.length.as_secs_f32();
        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        let loops = (elapsed / length) as u32;
        let ended = loops.saturating_sub(self.loops_seen);
        self.loops_seen = loops;
        ((elapsed % length) / length, ended)
    }
}
