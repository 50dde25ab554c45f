//! Falling equation entities
//!
//! The game scene owns a fixed pool of these; an equation is never
//! destroyed, only `reset` against the current target once it reaches the
//! floor or finishes exploding. Resetting re-rolls everything: pre-fall
//! delay, correctness, fall step, expression text, and lane.

use std::rc::Rc;

use glam::IVec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::assets::{Font, Image, Text};
use crate::consts;
use crate::lane_to_pixel;
use crate::platform::{Color, Rect, Surface};
use crate::rng::GameRng;

/// Explosion animation regions in the explosion sprite sheet
pub const EXPLOSION_REGIONS: [Rect; 4] = [
    Rect::new(0, 250, 110, 120),
    Rect::new(0, 380, 110, 120),
    Rect::new(0, 510, 110, 120),
    Rect::new(0, 650, 110, 120),
];

const TICKS_PER_IMAGE: u32 = 2;

/// Generation re-draws operator and operand on an empty candidate set; with
/// the worst-case target the per-attempt failure odds are about one half,
/// so running out of attempts means the domain constants changed.
const MAX_GENERATION_ATTEMPTS: u32 = 64;

/// The two operators an equation can use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
}

impl Op {
    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
        }
    }

    pub fn apply(self, a: i32, b: i32) -> i32 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
        }
    }
}

/// Right operands in `[0, MAX_TARGET)` that make `a op b == target` come out
/// `correct` (all solutions when true, all non-solutions when false).
pub(crate) fn candidates_for(op: Op, a: i32, target: i32, correct: bool) -> Vec<i32> {
    (0..consts::MAX_TARGET)
        .filter(|&b| (op.apply(a, b) == target) == correct)
        .collect()
}

/// One pooled falling expression.
///
/// At most one of falling / exploding / just-finished-exploding is active at
/// a time; the lane is stable from `reset` to `reset`.
pub struct Equation {
    font: Font,
    frames: Rc<Vec<Image>>,
    pub(crate) text: Option<Text>,
    pub(crate) correct: bool,
    pub(crate) pos: IVec2,
    prev_pos: IVec2,
    pub(crate) step: i32,
    animation_index: usize,
    tick: u32,
    pub(crate) exploding: bool,
    has_exploded: bool,
    pub(crate) lane: i32,
    pub(crate) delay: i32,
}

impl Equation {
    /// A dormant pool slot. `frames` is the explosion animation, sliced once
    /// by the scene and shared read-only across the whole pool.
    pub fn new(font: Font, frames: Rc<Vec<Image>>) -> Self {
        Self {
            font,
            frames,
            text: None,
            correct: false,
            pos: IVec2::ZERO,
            prev_pos: IVec2::ZERO,
            step: 1,
            animation_index: 0,
            tick: 0,
            exploding: false,
            has_exploded: false,
            lane: 0,
            delay: 0,
        }
    }

    /// Re-roll this slot against `target` and drop it back at the top of the
    /// screen in a fresh random lane.
    pub fn reset(&mut self, target: i32, screen_width: i32, rng: &mut GameRng) {
        self.delay = rng.game.random_range(0..=consts::MAX_DELAY);
        self.animation_index = 0;
        self.tick = 0;
        if self.exploding {
            // remember for one render pass so the last frame gets erased
            self.has_exploded = true;
        }
        self.exploding = false;
        let cor = rng.game.random_range(1..=10);
        self.correct = cor > consts::INCORRECT_ANSWER_RATIO;
        self.step = rng.game.random_range(1..=consts::MAX_STEP);
        self.text = Some(self.generate_text(target, rng));
        self.lane = rng.game.random_range(1..=consts::MAX_POS - 5);
        self.pos = IVec2::new(lane_to_pixel(self.lane, screen_width), 0);
    }

    /// Roll an expression whose truth against `target` matches the
    /// correctness flag set by `reset`.
    ///
    /// A drawn operator/operand pair can have no usable right operand (e.g.
    /// `a - b = MAX_TARGET` with a small `a`), so the draw repeats until a
    /// candidate set exists. The pick itself comes from the `system` stream.
    fn generate_text(&self, target: i32, rng: &mut GameRng) -> Text {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let op = if rng.game.random_range(0..2) == 0 {
                Op::Add
            } else {
                Op::Sub
            };
            let a = match op {
                Op::Add => rng.game.random_range(0..=target),
                Op::Sub => rng.game.random_range(0..=consts::MAX_TARGET),
            };
            let candidates = candidates_for(op, a, target, self.correct);
            if let Some(&b) = candidates.choose(&mut rng.system) {
                return self
                    .font
                    .render(&format!("{a} {} {b}", op.symbol()), Color::RED);
            }
        }
        panic!(
            "no operand candidates for target {target} (correct={}) after {MAX_GENERATION_ATTEMPTS} attempts",
            self.correct
        );
    }

    /// Start the explosion animation.
    pub fn explode(&mut self) {
        self.exploding = true;
    }

    /// Advance one frame: count down the pre-fall delay, fall, or play the
    /// explosion. Returns true when the slot needs a `reset` (it reached the
    /// floor or the explosion finished).
    pub fn update(&mut self, top_of_floor: i32) -> bool {
        if self.delay <= 1 && !self.exploding {
            self.has_exploded = false;
            self.prev_pos = self.pos;
            self.pos.y += self.step;
            if self.pos.y >= top_of_floor {
                return true;
            }
        } else if self.exploding {
            self.prev_pos = self.pos;
            self.tick += 1;
            if self.tick > TICKS_PER_IMAGE {
                self.tick = 0;
                self.animation_index += 1;
                if self.animation_index >= self.frames.len() {
                    self.animation_index = 0;
                    return true;
                }
            }
        }

        self.delay -= 1;
        false
    }

    /// Draw the expression text or the current explosion frame and report
    /// the rectangles that changed (current position plus the previous one,
    /// which needs erasing).
    pub fn render(&self, screen: &mut dyn Surface) -> Vec<Rect> {
        if self.delay <= 0 && !self.exploding {
            let Some(text) = &self.text else {
                return Vec::new();
            };
            screen.blit_text(text, self.pos);
            vec![
                Rect::new(self.pos.x, self.pos.y, text.width(), text.height()),
                Rect::new(self.prev_pos.x, self.prev_pos.y, text.width(), text.height()),
            ]
        } else if self.exploding {
            let frame = &self.frames[self.animation_index];
            screen.blit_image(frame, self.pos);
            let mut rects = vec![Rect::new(self.pos.x, self.pos.y, frame.width(), frame.height())];
            if let Some(text) = &self.text {
                rects.push(Rect::new(
                    self.prev_pos.x,
                    self.prev_pos.y,
                    text.width(),
                    text.height(),
                ));
            }
            rects
        } else if self.has_exploded {
            // one extra erase rect for the final explosion frame
            match self.frames.last() {
                Some(last) => vec![Rect::new(
                    self.prev_pos.x,
                    self.prev_pos.y,
                    last.width(),
                    last.height(),
                )],
                None => Vec::new(),
            }
        } else {
            Vec::new()
        }
    }

    pub fn is_correct(&self) -> bool {
        self.correct
    }

    pub fn is_exploding(&self) -> bool {
        self.exploding
    }

    /// Lane index, stable for the lifetime of one fall
    pub fn lane(&self) -> i32 {
        self.lane
    }

    pub fn pos(&self) -> IVec2 {
        self.pos
    }
}
