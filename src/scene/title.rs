//! Title scene
//!
//! Displays the title artwork over the background and plays the theme
//! music. After `TITLE_TICKS` frames a "press any key" prompt appears along
//! the bottom of the screen; any key or button starts a game.

use std::rc::Rc;

use glam::IVec2;

use crate::assets::ResourceBundle;
use crate::audio::Audio;
use crate::consts;
use crate::input::{InputEvent, PressedKeys};
use crate::platform::{Color, Rect, Surface};
use crate::rng::GameRng;
use crate::scene::{GameScene, Scene, render_centered};

const THEME_VOLUME: f32 = 0.25;

pub struct TitleScene {
    assets: Rc<ResourceBundle>,
    audio: Rc<dyn Audio>,
    wait_tick: i32,
}

impl TitleScene {
    /// Starts the theme music and the prompt countdown.
    pub fn new(assets: Rc<ResourceBundle>, audio: Rc<dyn Audio>) -> Self {
        audio.play_looping(assets.sound("theme"), THEME_VOLUME);
        Self {
            assets,
            audio,
            wait_tick: consts::TITLE_TICKS,
        }
    }
}

impl Scene for TitleScene {
    fn name(&self) -> &'static str {
        "title"
    }

    /// Any key or button starts the game.
    fn process_input(
        &mut self,
        events: &[InputEvent],
        _pressed: &PressedKeys,
    ) -> Option<Box<dyn Scene>> {
        for event in events {
            if matches!(event, InputEvent::KeyDown(_) | InputEvent::ButtonDown(_)) {
                log::info!("starting game");
                return Some(Box::new(GameScene::new(
                    self.assets.clone(),
                    self.audio.clone(),
                    GameRng::from_entropy(),
                )));
            }
        }
        None
    }

    fn update(&mut self) {
        // counts past zero; only <= 0 is ever observed
        self.wait_tick -= 1;
    }

    /// Always requests a full repaint.
    fn render(&mut self, screen: &mut dyn Surface) -> Option<Vec<Rect>> {
        screen.fill(Color::WHITE);
        screen.blit_image(self.assets.image("background"), IVec2::ZERO);
        let (w, h) = screen.size();
        render_centered(screen, w, h, self.assets.image("title"));
        if self.wait_tick <= 0 {
            let anykey = self.assets.image("anykey");
            let (img_w, img_h) = anykey.size();
            screen.blit_image(anykey, IVec2::new((w - img_w) / 2, h - img_h));
        }
        None
    }

    fn terminate(&mut self) -> bool {
        self.audio.stop_music();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessSurface;
    use crate::scene::testutil;

    fn title() -> TitleScene {
        TitleScene::new(testutil::bundle(), testutil::audio())
    }

    #[test]
    fn test_any_key_starts_a_game() {
        let mut scene = title();
        let next = scene.process_input(
            &[InputEvent::KeyDown(crate::input::Key::Space)],
            &PressedKeys::new(),
        );
        assert_eq!(next.map(|s| s.name()), Some("game"));
    }

    #[test]
    fn test_any_button_starts_a_game() {
        let mut scene = title();
        let next = scene.process_input(&[InputEvent::ButtonDown(17)], &PressedKeys::new());
        assert_eq!(next.map(|s| s.name()), Some("game"));
    }

    #[test]
    fn test_key_up_does_not_start_a_game() {
        let mut scene = title();
        let next = scene.process_input(
            &[InputEvent::KeyUp(crate::input::Key::Space)],
            &PressedKeys::new(),
        );
        assert!(next.is_none());
    }

    #[test]
    fn test_prompt_appears_after_countdown() {
        let mut scene = title();
        let mut screen = HeadlessSurface::new(consts::WIDTH, consts::HEIGHT);

        assert!(scene.render(&mut screen).is_none());
        assert!(screen.drew_image("title"));
        assert!(!screen.drew_image("anykey"));

        for _ in 0..consts::TITLE_TICKS {
            scene.update();
        }
        screen.present(None);
        assert!(scene.render(&mut screen).is_none());
        assert!(screen.drew_image("anykey"));
    }
}
