//! Platform abstraction layer
//!
//! The collaborator interfaces the game core draws through and reads input
//! from. The core never owns a display device, audio device, or event queue;
//! it owns handles to these traits and nothing else. `headless` provides the
//! backend used by tests and the native smoke binary.

pub mod headless;

use std::thread;
use std::time::{Duration, Instant};

use glam::IVec2;

use crate::input::{InputEvent, PressedKeys};

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const RED: Color = Color(255, 0, 0);
    pub const BLUE: Color = Color(0, 0, 255);
    pub const YELLOW: Color = Color(255, 255, 0);
    /// The transparent color key used by the wizard/explosion sprite sheets
    pub const SPRITE_KEY: Color = Color(128, 128, 128);
}

/// A screen-space rectangle (position + size, in pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

/// The drawing surface a scene renders into.
///
/// `present` flips the finished frame to the player: given a dirty-rect list
/// it may repaint only those regions, given `None` it must repaint
/// everything.
pub trait Surface {
    /// Pixel dimensions of the surface
    fn size(&self) -> (i32, i32);
    /// Fill the whole surface with one color
    fn fill(&mut self, color: Color);
    /// Draw an image with its top-left corner at `pos`
    fn blit_image(&mut self, image: &crate::assets::Image, pos: IVec2);
    /// Draw a rendered text surface with its top-left corner at `pos`
    fn blit_text(&mut self, text: &crate::assets::Text, pos: IVec2);
    /// Show the frame, repainting only `dirty` when given
    fn present(&mut self, dirty: Option<&[Rect]>);
}

/// Per-frame input: discrete events since the last poll plus a snapshot of
/// which keys are currently held.
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
    fn pressed(&self) -> PressedKeys;
}

/// Frame pacing. `tick` blocks long enough to hold the loop at `fps`.
pub trait Clock {
    fn tick(&mut self, fps: u32);
}

/// Wall-clock pacing via sleep. Not used by tests.
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn tick(&mut self, fps: u32) {
        let frame = Duration::from_secs(1) / fps.max(1);
        let now = Instant::now();
        if let Some(last) = self.last {
            let elapsed = now.duration_since(last);
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}
