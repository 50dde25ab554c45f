//! Scenes and the frame driver
//!
//! A scene is a mutually-exclusive mode of the application (title screen,
//! active gameplay) owning its own input/update/render behavior. The driver
//! in `driver` holds exactly one live scene and runs the per-frame cycle.

pub mod driver;
pub mod game;
pub mod title;

pub use driver::run_game;
pub use game::GameScene;
pub use title::TitleScene;

use glam::IVec2;

use crate::assets::Image;
use crate::input::{InputEvent, PressedKeys};
use crate::platform::{Rect, Surface};

/// One mode of the application.
///
/// A scene requests a transition by returning its replacement from
/// `process_input`; returning `None` keeps it active for the next frame.
pub trait Scene {
    /// Short identifier ("title", "game") used by the driver's quit handling
    fn name(&self) -> &'static str;

    /// Handle this frame's filtered events plus the held-key snapshot.
    fn process_input(
        &mut self,
        events: &[InputEvent],
        pressed: &PressedKeys,
    ) -> Option<Box<dyn Scene>>;

    /// Advance internal state one frame.
    fn update(&mut self);

    /// Draw the scene. `Some(rects)` lists the dirty regions to repaint;
    /// `None` asks for a full repaint.
    fn render(&mut self, screen: &mut dyn Surface) -> Option<Vec<Rect>>;

    /// The driver wants to shut down from this scene. Returning true ends
    /// the loop immediately; override to veto (e.g. a confirmation prompt).
    fn terminate(&mut self) -> bool {
        true
    }
}

/// Blit `image` centered in a `win_w` x `win_h` screen and return the dirty
/// rect it covered.
pub fn render_centered(
    screen: &mut dyn Surface,
    win_w: i32,
    win_h: i32,
    image: &Image,
) -> Vec<Rect> {
    let (img_w, img_h) = image.size();
    let x = (win_w - img_w) / 2;
    let y = (win_h - img_h) / 2;
    screen.blit_image(image, IVec2::new(x, y));
    vec![Rect::new(x, y, img_w, img_h)]
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::rc::Rc;

    use crate::assets::{Font, Image, ResourceBundle, Sound, SpriteSheet};
    use crate::platform::headless::HeadlessAudio;
    use crate::settings::Settings;

    /// A bundle with every key the scenes look up, sized like the real
    /// assets.
    pub fn bundle() -> Rc<ResourceBundle> {
        let mut bundle = ResourceBundle::new();
        bundle.register_font("targetfont", Font::monospace(75, true));
        bundle.register_font("eqfont", Font::monospace(25, true));
        bundle.register_font("scorefont", Font::monospace(30, false));
        bundle.register_image("title", Image::new("title", 800, 300));
        bundle.register_image("gameover", Image::new("gameover", 700, 250));
        bundle.register_image("pause", Image::new("pause", 500, 200));
        bundle.register_image("leveldone", Image::new("leveldone", 700, 250));
        bundle.register_image("anykey", Image::new("anykey", 600, 100));
        bundle.register_image("background", Image::new("background", 1500, 1000));
        bundle.register_image("floor", Image::new("floor", 250, 250));
        bundle.register_sheet("sprites", SpriteSheet::new(Image::new("sprites", 900, 800)));
        bundle.register_sheet("explosion", SpriteSheet::new(Image::new("explosion", 110, 800)));
        bundle.register_sound("boom", Sound::new("boom", 0.2));
        bundle.register_sound("zap", Sound::new("zap", 1.0));
        bundle.register_sound("fanfare", Sound::new("fanfare", 2.0));
        bundle.register_sound("theme", Sound::new("theme", 1.0));
        bundle.register_sound("gamemusic", Sound::new("gamemusic", 1.0));
        Rc::new(bundle)
    }

    pub fn audio() -> Rc<HeadlessAudio> {
        Rc::new(HeadlessAudio::new(Settings::default()))
    }
}
