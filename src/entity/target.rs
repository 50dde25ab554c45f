//! Target value sequencing
//!
//! Each level asks the player to match one target value. The full set
//! 0..=MAX_TARGET is shuffled up front and walked through exactly once;
//! running off the end is how a play session ends.

use glam::IVec2;
use rand::seq::SliceRandom;

use crate::assets::{Font, Text};
use crate::consts;
use crate::platform::{Color, Rect, Surface};
use crate::rng::GameRng;

/// A randomized, non-repeating ordering of target values.
pub struct TargetSequencer {
    targets: Vec<i32>,
    next_idx: usize,
    current: Option<i32>,
    font: Font,
    text: Option<Text>,
}

impl TargetSequencer {
    pub fn new(font: Font, rng: &mut GameRng) -> Self {
        let mut targets: Vec<i32> = (0..=consts::MAX_TARGET).collect();
        targets.shuffle(&mut rng.system);
        Self {
            targets,
            next_idx: 0,
            current: None,
            font,
            text: None,
        }
    }

    /// Advance to the next target value.
    ///
    /// Returns false once the sequence is exhausted; from then on `value`
    /// reports no target and the sequencer never recovers.
    pub fn next_target(&mut self) -> bool {
        if self.next_idx >= self.targets.len() {
            self.current = None;
            return false;
        }
        let value = self.targets[self.next_idx];
        self.next_idx += 1;
        self.current = Some(value);
        self.text = Some(self.font.render(&value.to_string(), Color::BLUE));
        true
    }

    /// The target in play, or None once the sequence is exhausted.
    pub fn value(&self) -> Option<i32> {
        self.current
    }

    pub fn render(&self, screen: &mut dyn Surface, width: i32) -> Rect {
        let Some(text) = &self.text else {
            return Rect::default();
        };
        screen.blit_text(
            text,
            IVec2::new((width - text.width()) / 2, text.height() + 10),
        );
        Rect::new(
            width - text.width(),
            text.height() + 20,
            text.width(),
            text.height(),
        )
    }
}
