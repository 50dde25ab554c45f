//! The game scene
//!
//! One playable level at a time: the avatar walks the floor, a fixed pool
//! of equations falls from the top, and zapping a correct one scores a
//! point toward the level quota. Composes the avatar, target sequencer,
//! score tracker, and equation pool, and owns the level/pause/win/game-over
//! state machine.

use std::rc::Rc;

use glam::IVec2;

use crate::assets::ResourceBundle;
use crate::audio::Audio;
use crate::consts;
use crate::consts::{JOY_BUTTON_JUMP, JOY_BUTTON_LEFT, JOY_BUTTON_RIGHT};
use crate::entity::equation::EXPLOSION_REGIONS;
use crate::entity::{Avatar, Equation, Score, TargetSequencer};
use crate::input::{InputEvent, Key, PressedKeys};
use crate::platform::{Color, Rect, Surface};
use crate::rng::GameRng;
use crate::scene::{Scene, render_centered};

const MUSIC_VOLUME: f32 = 0.2;

pub struct GameScene {
    assets: Rc<ResourceBundle>,
    audio: Rc<dyn Audio>,
    rng: GameRng,
    avatar: Avatar,
    first_draw: bool,
    paused: bool,
    won_level: bool,
    display_win: bool,
    wait_tick: i32,
    target: TargetSequencer,
    window_w: i32,
    window_h: i32,
    top_of_floor: i32,
    score: Score,
    equations: Vec<Equation>,
    level_score: u32,
    move_dir: i32,
    joy_tick: u32,
    game_over: bool,
}

impl GameScene {
    /// Builds the level state (avatar, sequencer, score, equation pool),
    /// starts the play music, and enters the first level. The explosion
    /// frames are sliced once here and shared by every pool slot.
    pub fn new(assets: Rc<ResourceBundle>, audio: Rc<dyn Audio>, mut rng: GameRng) -> Self {
        audio.play_looping(assets.sound("gamemusic"), MUSIC_VOLUME);
        let avatar = Avatar::new(assets.sheet("sprites"));
        let target = TargetSequencer::new(assets.font("targetfont").clone(), &mut rng);
        let score = Score::new(assets.font("scorefont").clone());
        let window_w = consts::WIDTH;
        let window_h = consts::HEIGHT;
        let top_of_floor = window_h - assets.image("floor").height();
        let frames = Rc::new(
            assets
                .sheet("explosion")
                .images_at(&EXPLOSION_REGIONS, Some(Color::SPRITE_KEY)),
        );
        let equations = (0..consts::MAX_CONCURRENT)
            .map(|_| Equation::new(assets.font("eqfont").clone(), frames.clone()))
            .collect();

        let mut scene = Self {
            assets,
            audio,
            rng,
            avatar,
            first_draw: true,
            paused: false,
            won_level: false,
            display_win: false,
            wait_tick: 0,
            target,
            window_w,
            window_h,
            top_of_floor,
            score,
            equations,
            level_score: 0,
            move_dir: 0,
            joy_tick: 0,
            game_over: false,
        };
        scene.start_level();
        scene
    }

    /// Advance to the next target and re-roll the whole pool against it.
    /// Running out of targets flips the game-over flag instead; the pool is
    /// left alone since there is no value to generate against.
    fn start_level(&mut self) {
        self.audio.resume_music();
        self.won_level = false;
        self.display_win = false;
        self.paused = false;
        self.wait_tick = 0;
        self.game_over = !self.target.next_target();
        if let Some(target) = self.target.value() {
            log::info!("level started, target {target}");
            for eq in &mut self.equations {
                eq.reset(target, self.window_w, &mut self.rng);
            }
        } else {
            log::info!("target values exhausted, game over");
        }
        self.level_score = 0;
    }

    /// Jump and fire. A hit explodes the equation and moves the score by
    /// +1/-1 for correct/incorrect; the level is won once the per-level
    /// counter reaches the quota.
    fn handle_jump(&mut self) {
        self.avatar.jump();
        self.audio.play(self.assets.sound("zap"));
        if let Some(idx) = self.get_collision() {
            if self.equations[idx].is_correct() {
                self.score.increment_score(1);
                self.level_score += 1;
                if self.level_score >= consts::SCORE_PER_LEVEL {
                    log::info!("level complete");
                    self.won_level = true;
                    self.wait_tick = consts::WIN_DELAY;
                }
            } else {
                self.score.increment_score(-1);
            }
            self.audio.play(self.assets.sound("boom"));
            self.equations[idx].explode();
        }
    }

    /// The equation the zap hits, if any: among non-exploding equations
    /// within ZAP_WIDTH lanes of the avatar, the one closest to the floor.
    /// Equal heights keep the first one encountered in pool order.
    fn get_collision(&self) -> Option<usize> {
        let avatar_lane = self.avatar.lane();
        let mut hit: Option<usize> = None;
        for (i, eq) in self.equations.iter().enumerate() {
            if (eq.lane() - avatar_lane).abs() <= consts::ZAP_WIDTH && !eq.is_exploding() {
                match hit {
                    Some(h) if eq.pos().y > self.equations[h].pos().y => hit = Some(i),
                    None => hit = Some(i),
                    _ => {}
                }
            }
        }
        hit
    }
}

impl Scene for GameScene {
    fn name(&self) -> &'static str {
        "game"
    }

    /// Left/right arrows (or joystick left/right) walk the avatar, up (or
    /// the jump button) zaps, "p" toggles pause, and once a won level's
    /// wait has elapsed any key starts the next one. Movement keys double
    /// as unpause. A held joystick direction repeats its move every
    /// JOYSTICK_REPEAT frames.
    fn process_input(
        &mut self,
        events: &[InputEvent],
        _pressed: &PressedKeys,
    ) -> Option<Box<dyn Scene>> {
        for event in events {
            if self.won_level && self.wait_tick <= 0 {
                if matches!(event, InputEvent::KeyDown(_) | InputEvent::ButtonDown(_)) {
                    if !self.game_over {
                        self.start_level();
                    }
                    return None;
                }
            }

            match *event {
                InputEvent::KeyDown(Key::Right) | InputEvent::ButtonDown(JOY_BUTTON_RIGHT) => {
                    if self.paused {
                        self.paused = false;
                    } else {
                        if matches!(event, InputEvent::ButtonDown(_)) {
                            self.move_dir = 1;
                        }
                        self.joy_tick = 0;
                        self.avatar.move_by(1);
                    }
                }
                InputEvent::KeyDown(Key::Left) | InputEvent::ButtonDown(JOY_BUTTON_LEFT) => {
                    if self.paused {
                        self.paused = false;
                    } else {
                        if matches!(event, InputEvent::ButtonDown(_)) {
                            self.move_dir = -1;
                        }
                        self.joy_tick = 0;
                        self.avatar.move_by(-1);
                    }
                }
                InputEvent::KeyDown(Key::P) => {
                    self.paused = !self.paused;
                }
                InputEvent::KeyDown(Key::Up) | InputEvent::ButtonDown(JOY_BUTTON_JUMP) => {
                    if self.paused {
                        self.paused = false;
                    } else {
                        self.handle_jump();
                    }
                }
                InputEvent::ButtonUp(_) => {
                    self.move_dir = 0;
                    self.joy_tick = 0;
                }
                _ => {}
            }
        }

        if self.move_dir != 0 && !self.paused {
            self.joy_tick += 1;
            if self.joy_tick % consts::JOYSTICK_REPEAT == 0 {
                self.avatar.move_by(self.move_dir);
            }
        }
        None
    }

    /// Entity state only moves while actually playing; pause, game over,
    /// and the win/loss banner all freeze it. The banner countdown runs
    /// independently of that gate.
    fn update(&mut self) {
        if !self.paused && !self.game_over && !self.display_win {
            self.avatar.update();
            let target = self.target.value();
            for eq in &mut self.equations {
                if eq.update(self.top_of_floor) {
                    if let Some(target) = target {
                        eq.reset(target, self.window_w, &mut self.rng);
                    }
                }
            }
        }
        if self.won_level || self.game_over {
            self.wait_tick -= 1;
            if !self.display_win && self.wait_tick <= 0 {
                self.audio.pause_music();
                self.audio.play(self.assets.sound("fanfare"));
                self.wait_tick = consts::WON_MSG_TICKS;
                self.display_win = true;
            }
        }
    }

    fn render(&mut self, screen: &mut dyn Surface) -> Option<Vec<Rect>> {
        screen.fill(Color::BLACK);
        let floor = self.assets.image("floor");
        let mut x = 0;
        while x < self.window_w {
            screen.blit_image(floor, IVec2::new(x, self.top_of_floor));
            x += floor.width().max(1);
        }

        let dirty = if self.paused {
            render_centered(screen, self.window_w, self.window_h, self.assets.image("pause"))
        } else if self.display_win {
            if self.wait_tick > 0 {
                if self.game_over {
                    render_centered(
                        screen,
                        self.window_w,
                        self.window_h,
                        self.assets.image("gameover"),
                    )
                } else {
                    render_centered(
                        screen,
                        self.window_w,
                        self.window_h,
                        self.assets.image("leveldone"),
                    )
                }
            } else {
                render_centered(
                    screen,
                    self.window_w,
                    self.window_h,
                    self.assets.image("anykey"),
                )
            }
        } else {
            let mut rects = vec![Rect::new(
                0,
                self.top_of_floor - 100,
                self.window_w,
                self.top_of_floor,
            )];
            rects.push(self.avatar.render(screen, self.window_w, self.top_of_floor));
            rects.push(self.target.render(screen, self.window_w));
            rects.push(self.score.render(screen));
            for eq in &self.equations {
                rects.extend(eq.render(screen));
            }
            rects
        };

        if self.first_draw {
            self.first_draw = false;
            None
        } else {
            Some(dirty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessSurface;
    use crate::scene::testutil;

    fn scene() -> GameScene {
        GameScene::new(testutil::bundle(), testutil::audio(), GameRng::seeded(42))
    }

    /// Park every equation far from the avatar so nothing collides unless a
    /// test arranges it.
    fn park_all(scene: &mut GameScene) {
        let lane = scene.avatar.lane();
        for eq in &mut scene.equations {
            eq.lane = lane + consts::ZAP_WIDTH + 20;
            eq.exploding = false;
        }
    }

    /// Put equation `idx` directly over the avatar at height `y`.
    fn arm(scene: &mut GameScene, idx: usize, y: i32, correct: bool) {
        let lane = scene.avatar.lane();
        let eq = &mut scene.equations[idx];
        eq.lane = lane;
        eq.pos.y = y;
        eq.correct = correct;
        eq.exploding = false;
    }

    fn key(k: Key) -> Vec<InputEvent> {
        vec![InputEvent::KeyDown(k)]
    }

    #[test]
    fn test_pool_size_is_constant() {
        let mut s = scene();
        assert_eq!(s.equations.len(), consts::MAX_CONCURRENT);
        for _ in 0..300 {
            s.update();
        }
        assert_eq!(s.equations.len(), consts::MAX_CONCURRENT);
    }

    #[test]
    fn test_collision_prefers_equation_closest_to_floor() {
        let mut s = scene();
        park_all(&mut s);
        arm(&mut s, 0, 100, true);
        arm(&mut s, 1, 300, true);
        assert_eq!(s.get_collision(), Some(1));
    }

    #[test]
    fn test_collision_tie_keeps_pool_order() {
        let mut s = scene();
        park_all(&mut s);
        arm(&mut s, 0, 300, true);
        arm(&mut s, 1, 300, true);
        assert_eq!(s.get_collision(), Some(0));
    }

    #[test]
    fn test_collision_ignores_exploding_equations() {
        let mut s = scene();
        park_all(&mut s);
        arm(&mut s, 0, 100, true);
        arm(&mut s, 1, 300, true);
        s.equations[1].exploding = true;
        assert_eq!(s.get_collision(), Some(0));
    }

    #[test]
    fn test_collision_respects_zap_width() {
        let mut s = scene();
        park_all(&mut s);
        arm(&mut s, 0, 100, true);
        s.equations[0].lane = s.avatar.lane() + consts::ZAP_WIDTH;
        assert_eq!(s.get_collision(), Some(0));
        s.equations[0].lane = s.avatar.lane() + consts::ZAP_WIDTH + 1;
        assert_eq!(s.get_collision(), None);
    }

    #[test]
    fn test_score_is_hit_difference() {
        let mut s = scene();
        park_all(&mut s);
        // 3 correct hits, 2 incorrect, re-arming the same slot each time
        for correct in [true, true, true, false, false] {
            arm(&mut s, 0, 200, correct);
            s.handle_jump();
            assert!(s.equations[0].is_exploding());
        }
        assert_eq!(s.score.value(), 3 - 2);
    }

    #[test]
    fn test_missed_zap_leaves_score_alone() {
        let mut s = scene();
        park_all(&mut s);
        s.handle_jump();
        assert_eq!(s.score.value(), 0);
    }

    #[test]
    fn test_level_quota_wins_the_level() {
        let mut s = scene();
        park_all(&mut s);
        s.level_score = consts::SCORE_PER_LEVEL - 1;
        arm(&mut s, 0, 200, true);
        s.handle_jump();
        assert!(s.won_level);
        assert_eq!(s.wait_tick, consts::WIN_DELAY);
        assert!(!s.display_win);
    }

    #[test]
    fn test_banner_then_any_key_restarts_level() {
        let mut s = scene();
        park_all(&mut s);
        s.level_score = consts::SCORE_PER_LEVEL - 1;
        arm(&mut s, 0, 200, true);
        s.handle_jump();

        // WIN_DELAY frames until the banner, then it must be showing
        for _ in 0..consts::WIN_DELAY {
            s.update();
        }
        assert!(s.display_win);
        assert_eq!(s.wait_tick, consts::WON_MSG_TICKS);

        // input during the banner is ignored
        let before = s.target.value();
        s.process_input(&key(Key::Space), &PressedKeys::new());
        assert_eq!(s.target.value(), before);

        // once the banner wait elapses, any key starts the next level
        for _ in 0..consts::WON_MSG_TICKS {
            s.update();
        }
        s.process_input(&key(Key::Space), &PressedKeys::new());
        assert!(!s.won_level);
        assert!(!s.display_win);
        assert_eq!(s.level_score, 0);
        assert_ne!(s.target.value(), before);
    }

    #[test]
    fn test_pause_freezes_entities() {
        let mut s = scene();
        for eq in &mut s.equations {
            eq.delay = 0;
        }
        s.process_input(&key(Key::P), &PressedKeys::new());
        assert!(s.paused);

        let positions: Vec<_> = s.equations.iter().map(|eq| eq.pos()).collect();
        for _ in 0..10 {
            s.update();
        }
        let frozen: Vec<_> = s.equations.iter().map(|eq| eq.pos()).collect();
        assert_eq!(positions, frozen);

        s.process_input(&key(Key::P), &PressedKeys::new());
        assert!(!s.paused);
        s.update();
        let moved: Vec<_> = s.equations.iter().map(|eq| eq.pos()).collect();
        assert_ne!(positions, moved);
    }

    #[test]
    fn test_movement_key_unpauses_without_moving() {
        let mut s = scene();
        let lane = s.avatar.lane();
        s.process_input(&key(Key::P), &PressedKeys::new());
        s.process_input(&key(Key::Right), &PressedKeys::new());
        assert!(!s.paused);
        assert_eq!(s.avatar.lane(), lane);
        // a second press actually walks
        s.process_input(&key(Key::Right), &PressedKeys::new());
        assert_eq!(s.avatar.lane(), lane + 1);
    }

    #[test]
    fn test_held_joystick_direction_repeats() {
        let mut s = scene();
        let lane = s.avatar.lane();
        // the press moves once, and the repeat block fires on the same
        // frame (JOYSTICK_REPEAT is one frame at 25 fps)
        s.process_input(&[InputEvent::ButtonDown(JOY_BUTTON_RIGHT)], &PressedKeys::new());
        assert_eq!(s.avatar.lane(), lane + 2);
        // no events, but the held direction keeps walking
        s.process_input(&[], &PressedKeys::new());
        s.process_input(&[], &PressedKeys::new());
        assert_eq!(s.avatar.lane(), lane + 4);
        // releasing the button stops the repeat
        s.process_input(&[InputEvent::ButtonUp(JOY_BUTTON_RIGHT)], &PressedKeys::new());
        s.process_input(&[], &PressedKeys::new());
        assert_eq!(s.avatar.lane(), lane + 4);
    }

    #[test]
    fn test_game_over_after_all_targets() {
        let mut s = scene();
        // the constructor consumed the first target
        for _ in 0..consts::MAX_TARGET {
            s.start_level();
            assert!(!s.game_over);
        }
        s.start_level();
        assert!(s.game_over);

        // the banner machinery takes over on the next update
        s.update();
        assert!(s.display_win);

        // no path restarts a game-over session
        for _ in 0..=consts::WON_MSG_TICKS {
            s.update();
        }
        s.process_input(&key(Key::Space), &PressedKeys::new());
        assert!(s.game_over);
    }

    #[test]
    fn test_first_render_requests_full_repaint() {
        let mut s = scene();
        let mut screen = HeadlessSurface::new(consts::WIDTH, consts::HEIGHT);
        assert!(s.render(&mut screen).is_none());
        let dirty = s.render(&mut screen);
        assert!(dirty.is_some());
        assert!(!dirty.unwrap().is_empty());
    }

    #[test]
    fn test_render_branches_on_state() {
        let mut s = scene();
        let mut screen = HeadlessSurface::new(consts::WIDTH, consts::HEIGHT);
        s.render(&mut screen);
        assert!(screen.drew_image("floor"));
        assert!(!screen.drew_image("pause"));

        screen.present(None);
        s.paused = true;
        s.render(&mut screen);
        assert!(screen.drew_image("pause"));

        screen.present(None);
        s.paused = false;
        s.display_win = true;
        s.wait_tick = 5;
        s.game_over = true;
        s.render(&mut screen);
        assert!(screen.drew_image("gameover"));

        screen.present(None);
        s.game_over = false;
        s.render(&mut screen);
        assert!(screen.drew_image("leveldone"));

        screen.present(None);
        s.wait_tick = 0;
        s.render(&mut screen);
        assert!(screen.drew_image("anykey"));
    }

    #[test]
    fn test_resets_keep_equations_live() {
        let mut s = scene();
        // run long enough for every slot to hit the floor at least once
        for _ in 0..2000 {
            s.update();
        }
        for eq in &s.equations {
            assert!(eq.pos().y < s.top_of_floor);
            assert!((1..=consts::MAX_POS - 5).contains(&eq.lane()));
        }
    }
}
