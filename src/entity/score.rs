//! Player score

use glam::IVec2;

use crate::assets::{Font, Text};
use crate::platform::{Color, Rect, Surface};

/// The player's running score. May go negative; the display text is
/// regenerated on every change.
pub struct Score {
    font: Font,
    text: Text,
    score: i32,
}

impl Score {
    pub fn new(font: Font) -> Self {
        let text = font.render("Score 0", Color::YELLOW);
        Self {
            font,
            text,
            score: 0,
        }
    }

    /// Add `by_val` (negative to penalize) and refresh the display text.
    pub fn increment_score(&mut self, by_val: i32) {
        self.score += by_val;
        self.text = self
            .font
            .render(&format!("Score {}", self.score), Color::YELLOW);
    }

    pub fn value(&self) -> i32 {
        self.score
    }

    pub fn render(&self, screen: &mut dyn Surface) -> Rect {
        screen.blit_text(&self.text, IVec2::new(10, 10));
        Rect::new(10, 10, self.text.width(), self.text.height())
    }
}
