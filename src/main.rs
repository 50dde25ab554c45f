//! Math Wizard entry point
//!
//! Registers the resource bundle the way the asset loader would, wires up
//! the headless platform backend, and runs a short scripted tour of the
//! scene machine. A windowed backend plugs in by swapping the `Surface`,
//! `InputSource`, and `Audio` implementations handed to `run_game`.

use std::env;
use std::rc::Rc;

use math_wizard::assets::{Font, Image, Sound, SpriteSheet};
use math_wizard::audio::Audio;
use math_wizard::consts;
use math_wizard::input::{InputEvent, Key};
use math_wizard::platform::FrameClock;
use math_wizard::platform::headless::{HeadlessAudio, HeadlessSurface, ScriptedInput};
use math_wizard::scene::{TitleScene, run_game};
use math_wizard::{ResourceBundle, Settings};

/// Register every asset the scenes look up, mirroring what the real loader
/// reads from the resource directory.
fn load_resources() -> ResourceBundle {
    log::info!("registering resources from {}/", consts::RESOURCE_DIR);
    let mut bundle = ResourceBundle::new();

    // fonts
    bundle.register_font("targetfont", Font::monospace(75, true));
    bundle.register_font("eqfont", Font::monospace(25, true));
    bundle.register_font("scorefont", Font::monospace(30, false));

    // regular images
    bundle.register_image("title", Image::new("title", 800, 300));
    bundle.register_image("gameover", Image::new("gameover", 700, 250));
    bundle.register_image("pause", Image::new("pause", 500, 200));
    bundle.register_image("leveldone", Image::new("leveldone", 700, 250));
    bundle.register_image("anykey", Image::new("anykey", 600, 100));
    bundle.register_image("background", Image::new("background", 1500, 1000));
    bundle.register_image("floor", Image::new("floor", 250, 250));

    // sprite sheets
    bundle.register_sheet("sprites", SpriteSheet::new(Image::new("sprites", 900, 800)));
    bundle.register_sheet("explosion", SpriteSheet::new(Image::new("explosion", 110, 800)));

    // sound effects and music
    bundle.register_sound("boom", Sound::new("boom", 0.2));
    bundle.register_sound("zap", Sound::new("zap", 1.0));
    bundle.register_sound("fanfare", Sound::new("fanfare", 2.0));
    bundle.register_sound("theme", Sound::new("theme", 1.0));
    bundle.register_sound("gamemusic", Sound::new("gamemusic", 1.0));

    bundle
}

/// A canned input script that walks the whole scene machine: wait on the
/// title, start a game, walk and zap a bit, pause and resume, then escape
/// back to the title and quit.
fn demo_script() -> Vec<Vec<InputEvent>> {
    let mut frames: Vec<Vec<InputEvent>> = Vec::new();
    frames.resize(consts::TITLE_TICKS as usize + 2, Vec::new());
    frames.push(vec![InputEvent::KeyDown(Key::Space)]);
    for _ in 0..6 {
        frames.push(vec![InputEvent::KeyDown(Key::Right)]);
    }
    frames.push(vec![InputEvent::KeyDown(Key::Up)]);
    for _ in 0..4 {
        frames.push(vec![InputEvent::KeyDown(Key::Left)]);
    }
    frames.push(vec![InputEvent::KeyDown(Key::Up)]);
    frames.push(vec![InputEvent::KeyDown(Key::P)]);
    frames.resize(frames.len() + 10, Vec::new());
    frames.push(vec![InputEvent::KeyDown(Key::P)]);
    frames.resize(frames.len() + 10, Vec::new());
    frames.push(vec![InputEvent::KeyDown(Key::Escape)]);
    frames.push(vec![InputEvent::KeyDown(Key::Escape)]);
    frames
}

fn main() {
    env_logger::init();
    log::info!("Math Wizard starting...");
    log::info!(
        "display {}x{} at {} fps, key repeat {}ms/{}ms",
        consts::WIDTH,
        consts::HEIGHT,
        consts::FPS,
        consts::KEY_REPEAT_DELAY,
        consts::KEY_REPEAT_INTERVAL,
    );

    let settings = match env::var("MATH_WIZARD_SETTINGS") {
        Ok(json) => Settings::from_json(&json).unwrap_or_else(|err| {
            log::warn!("ignoring malformed MATH_WIZARD_SETTINGS: {err}");
            Settings::default()
        }),
        Err(_) => Settings::default(),
    };

    let assets = Rc::new(load_resources());
    let audio: Rc<dyn Audio> = Rc::new(HeadlessAudio::new(settings));
    let mut screen = HeadlessSurface::new(consts::WIDTH, consts::HEIGHT);
    let mut input = ScriptedInput::new(demo_script());
    let mut clock = FrameClock::new();

    let title = Box::new(TitleScene::new(assets.clone(), audio.clone()));
    run_game(&mut screen, &mut input, &mut clock, &assets, &audio, title);

    log::info!("demo finished, {} frames presented", screen.presents.len());
}
