//! Sound cues for simulation events
//!
//! The simulation only raises `GameEvent`s. `AudioManager` maps them to sound
//! effects and hands those to an `AudioSink`, which is whatever the host can
//! actually play through. The headless runner uses `LogSink`.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Laser fired
    Fire,
    /// Bullet destroyed a brick
    Shatter,
    /// Bullet bounced off a mirror
    Ricochet,
    /// Neutral brick fell into a bin
    Miss,
    /// Colored brick sorted
    Sort,
}

/// Synth voice for an effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_s: f32,
    /// Relative loudness before master/sfx volume
    pub gain: f32,
}

impl SoundEffect {
    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::BulletFired => SoundEffect::Fire,
            GameEvent::BulletDestroyedBrick => SoundEffect::Shatter,
            GameEvent::BulletReflected => SoundEffect::Ricochet,
            GameEvent::BrickMissed => SoundEffect::Miss,
            GameEvent::BrickSorted => SoundEffect::Sort,
        }
    }

    pub fn tone(self) -> Tone {
        let (freq_hz, duration_s, gain) = match self {
            SoundEffect::Fire => (880.0, 0.08, 0.3),
            SoundEffect::Shatter => (220.0, 0.2, 0.5),
            SoundEffect::Ricochet => (1320.0, 0.06, 0.25),
            SoundEffect::Miss => (110.0, 0.4, 0.6),
            SoundEffect::Sort => (660.0, 0.15, 0.4),
        };
        Tone {
            freq_hz,
            duration_s,
            gain,
        }
    }
}

/// Something that can play a tone
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32);
}

/// Writes each cue to the log instead of a speaker
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32) {
        log::debug!(
            "♪ {effect:?}: {:.0} Hz for {:.2}s at {:.2}",
            tone.freq_hz,
            tone.duration_s,
            volume
        );
    }
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _tone: Tone, _volume: f32) {}
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Number of cues sent to the sink so far
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let tone = effect.tone();
        let vol = self.effective_volume() * tone.gain;
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, tone, vol);
        self.played += 1;
    }

    /// Play the cue for every event, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for &event in events {
            self.play(SoundEffect::for_event(event));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    type Log = Arc<Mutex<Vec<(SoundEffect, f32)>>>;

    struct RecordingSink(Log);

    impl AudioSink for RecordingSink {
        fn play(&mut self, effect: SoundEffect, _tone: Tone, volume: f32) {
            self.0.lock().unwrap().push((effect, volume));
        }
    }

    fn recording() -> (AudioManager, Log) {
        let log: Log = Arc::default();
        (AudioManager::new(Box::new(RecordingSink(log.clone()))), log)
    }

    #[test]
    fn test_events_map_to_effects() {
        let (mut audio, log) = recording();
        audio.handle_events(&[
            GameEvent::BulletFired,
            GameEvent::BulletReflected,
            GameEvent::BulletDestroyedBrick,
            GameEvent::BrickSorted,
            GameEvent::BrickMissed,
        ]);
        let effects: Vec<_> = log.lock().unwrap().iter().map(|(e, _)| *e).collect();
        assert_eq!(
            effects,
            vec![
                SoundEffect::Fire,
                SoundEffect::Ricochet,
                SoundEffect::Shatter,
                SoundEffect::Sort,
                SoundEffect::Miss,
            ]
        );
        assert_eq!(audio.played(), 5);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let (mut audio, log) = recording();
        audio.set_muted(true);
        audio.play(SoundEffect::Fire);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(audio.played(), 0);
    }

    #[test]
    fn test_volume_scales_tone_gain() {
        let (mut audio, log) = recording();
        audio.set_master_volume(2.0);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::Miss);
        let (_, volume) = log.lock().unwrap()[0];
        assert!((volume - 0.3).abs() < 1e-6);
    }
}
