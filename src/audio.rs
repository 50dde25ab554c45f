//! Audio playback handle
//!
//! Scenes own an explicit `Rc<dyn Audio>` instead of reaching for a global
//! mixer. Effects are fire-and-forget one-shots at the volume the sound was
//! registered with; music is a single looping track with pause/resume.

use crate::assets::Sound;

/// The playback interface scenes drive their sound through.
pub trait Audio {
    /// Play a sound effect once at its registered volume.
    fn play(&self, sound: &Sound);
    /// Start (or replace) the looping music track at the given volume.
    fn play_looping(&self, sound: &Sound, volume: f32);
    /// Pause the looping track, keeping its position.
    fn pause_music(&self);
    /// Resume the looping track if paused.
    fn resume_music(&self);
    /// Stop the looping track entirely.
    fn stop_music(&self);
}
