//! The frame driver
//!
//! Owns the one live scene and runs the per-frame cycle: capture the
//! pressed-key snapshot, drain and filter events, forward the rest, update,
//! render, present, pace. Quit intent (window close, Escape, alt-F4) is
//! handled here, not in the scenes: mid-game it bails back to a fresh title
//! scene; on the title it asks the scene to terminate and ends the loop.

use std::rc::Rc;

use crate::assets::ResourceBundle;
use crate::audio::Audio;
use crate::consts;
use crate::input::{InputEvent, Key};
use crate::platform::{Clock, InputSource, Surface};
use crate::scene::{Scene, TitleScene};

/// Run the scene machine until a quit is accepted from the title scene.
pub fn run_game(
    screen: &mut dyn Surface,
    input: &mut dyn InputSource,
    clock: &mut dyn Clock,
    assets: &Rc<ResourceBundle>,
    audio: &Rc<dyn Audio>,
    starting_scene: Box<dyn Scene>,
) {
    let mut active = Some(starting_scene);
    while let Some(mut scene) = active.take() {
        let pressed = input.pressed();

        let mut filtered = Vec::new();
        let mut forced: Option<Box<dyn Scene>> = None;
        let mut has_quit = false;
        for event in input.poll() {
            let quit_attempt = match event {
                InputEvent::Quit => true,
                InputEvent::KeyDown(Key::Escape) => true,
                InputEvent::KeyDown(Key::F4) => pressed.alt_held(),
                _ => false,
            };
            if quit_attempt {
                if scene.name() == "title" {
                    has_quit = scene.terminate();
                } else {
                    log::info!("quit requested mid-game, returning to title");
                    forced = Some(Box::new(TitleScene::new(assets.clone(), audio.clone())));
                }
            } else {
                filtered.push(event);
            }
        }
        if has_quit {
            log::info!("shutting down");
            break;
        }

        let requested = scene.process_input(&filtered, &pressed);
        scene.update();
        let dirty = scene.render(screen);
        screen.present(dirty.as_deref());
        clock.tick(consts::FPS);

        // A transition the scene itself requested wins over a quit-forced
        // title switch in the same frame.
        active = Some(requested.or(forced).unwrap_or(scene));
    }
}
