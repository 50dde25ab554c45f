//! Headless platform backend
//!
//! Records what the game would have drawn and played instead of touching a
//! real display or mixer. Drives the whole scene machine in tests and in
//! the native smoke binary.

use std::cell::RefCell;
use std::collections::VecDeque;

use glam::IVec2;

use crate::assets::{Image, Sound, Text};
use crate::audio::Audio;
use crate::input::{InputEvent, PressedKeys};
use crate::platform::{Clock, Color, InputSource, Rect, Surface};
use crate::settings::Settings;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill(Color),
    Image { source: String, pos: IVec2 },
    Text { content: String, pos: IVec2 },
}

/// A surface that records draw calls for the frame in progress and counts
/// how each frame was presented.
pub struct HeadlessSurface {
    width: i32,
    height: i32,
    /// Draw calls since the last present
    pub ops: Vec<DrawOp>,
    /// Dirty-rect count per presented frame; `None` means full repaint
    pub presents: Vec<Option<usize>>,
}

impl HeadlessSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            presents: Vec::new(),
        }
    }

    /// True if the frame in progress blitted the image asset `source`.
    pub fn drew_image(&self, source: &str) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, DrawOp::Image { source: s, .. } if s == source))
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) {
        self.ops.push(DrawOp::Fill(color));
    }

    fn blit_image(&mut self, image: &Image, pos: IVec2) {
        self.ops.push(DrawOp::Image {
            source: image.source.clone(),
            pos,
        });
    }

    fn blit_text(&mut self, text: &Text, pos: IVec2) {
        self.ops.push(DrawOp::Text {
            content: text.content.clone(),
            pos,
        });
    }

    fn present(&mut self, dirty: Option<&[Rect]>) {
        self.presents.push(dirty.map(<[Rect]>::len));
        self.ops.clear();
    }
}

/// An input source that replays a prepared list of per-frame event batches,
/// then reports no input forever.
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
    held: PressedKeys,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into(),
            held: PressedKeys::new(),
        }
    }

    /// Same script, but with `held` reported as the pressed snapshot on
    /// every frame.
    pub fn with_held(frames: Vec<Vec<InputEvent>>, held: PressedKeys) -> Self {
        Self {
            frames: frames.into(),
            held,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }

    fn pressed(&self) -> PressedKeys {
        self.held.clone()
    }
}

/// A clock that never sleeps; counts ticks so tests can assert frame counts.
#[derive(Default)]
pub struct NullClock {
    pub ticks: u32,
}

impl NullClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for NullClock {
    fn tick(&mut self, _fps: u32) {
        self.ticks += 1;
    }
}

/// Audio backend that logs playback and records an event trace.
pub struct HeadlessAudio {
    settings: Settings,
    events: RefCell<Vec<String>>,
}

impl HeadlessAudio {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            events: RefCell::new(Vec::new()),
        }
    }

    /// The playback trace so far ("play zap", "music theme", "pause", ...)
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn record(&self, event: String) {
        log::debug!("audio: {event}");
        self.events.borrow_mut().push(event);
    }
}

impl Audio for HeadlessAudio {
    fn play(&self, sound: &Sound) {
        let vol = self.settings.effective_sfx(sound.volume);
        self.record(format!("play {} ({vol:.2})", sound.name));
    }

    fn play_looping(&self, sound: &Sound, volume: f32) {
        let vol = self.settings.effective_music(volume);
        self.record(format!("music {} ({vol:.2})", sound.name));
    }

    fn pause_music(&self) {
        self.record("pause".to_owned());
    }

    fn resume_music(&self) {
        self.record("resume".to_owned());
    }

    fn stop_music(&self) {
        self.record("stop".to_owned());
    }
}
