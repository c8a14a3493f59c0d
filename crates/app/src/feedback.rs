//! Routes outbound game events to the presentation layer, honoring the player's settings.

use std::mem;

use arcade_core::{EventSink, GameEvent};

use crate::settings_file::SettingsFile;

/// Buffers the events a frame produced, minus sound and haptics the player switched off.
#[derive(Debug)]
pub struct FeedbackRouter {
    pub sound_enabled: bool,
    pub haptics_enabled: bool,
    pending: Vec<GameEvent>,
}

impl FeedbackRouter {
    pub fn new(settings: &SettingsFile) -> Self {
        Self {
            sound_enabled: settings.sound_enabled,
            haptics_enabled: settings.haptics_enabled,
            pending: Vec::new(),
        }
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.pending)
    }
}

impl EventSink for FeedbackRouter {
    fn emit(&mut self, event: GameEvent) {
        let allowed = match event {
            GameEvent::SoundRequested(_) => self.sound_enabled,
            GameEvent::HapticRequested(_) => self.haptics_enabled,
            GameEvent::ScoreChanged { .. }
            | GameEvent::GameEnded { .. }
            | GameEvent::PauseRequested => true,
        };
        if allowed {
            self.pending.push(event);
        }
    }
}
