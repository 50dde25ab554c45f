//! Math Wizard - an arcade math game
//!
//! A wizard walks a lane at the bottom of the screen and zaps falling
//! equations, scoring points for expressions that match the target value.
//!
//! Core modules:
//! - `scene`: Scene state machine (title, game) and the frame driver
//! - `entity`: Falling equations, avatar, target sequencer, score
//! - `assets`: Resource bundle, sprite sheets, fonts, sounds
//! - `platform`: Surface/input/clock collaborator traits + headless backend
//! - `audio`: Playback handle passed explicitly to every scene
//! - `rng`: The two seeded random streams the gameplay draws from

pub mod assets;
pub mod audio;
pub mod entity;
pub mod input;
pub mod platform;
pub mod rng;
pub mod scene;
pub mod settings;

pub use assets::ResourceBundle;
pub use rng::GameRng;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Screen width in pixels
    pub const WIDTH: i32 = 1500;
    /// Screen height in pixels
    pub const HEIGHT: i32 = 1000;
    /// Target frames per second (the whole game is tuned to this tick rate)
    pub const FPS: u32 = 25;

    /// Directory for game resources
    pub const RESOURCE_DIR: &str = "resources";

    /// Delay in ms after a key is held down until the input backend repeats it
    pub const KEY_REPEAT_DELAY: u32 = 100;
    /// Interval in ms for repeated keys
    pub const KEY_REPEAT_INTERVAL: u32 = 30;

    /// Number of horizontal lanes the game board is divided into
    pub const MAX_POS: i32 = 150;
    /// Correct answers required to finish a level
    pub const SCORE_PER_LEVEL: u32 = 10;
    /// Maximum value for the target
    pub const MAX_TARGET: i32 = 25;
    /// Number of equations live at once (the pool size)
    pub const MAX_CONCURRENT: usize = (WIDTH / 300) as usize;
    /// Max pixels an equation moves down per frame
    pub const MAX_STEP: i32 = HEIGHT / 300;
    /// Max frames an equation waits before starting to descend
    pub const MAX_DELAY: i32 = (FPS * 4) as i32;
    /// Frames until a held joystick direction repeats the movement
    pub const JOYSTICK_REPEAT: u32 = 40 / (1000 / FPS);
    /// Frames the level-complete/game-over banner shows before "press any key"
    pub const WON_MSG_TICKS: i32 = (FPS * 3) as i32;
    /// Frames until the "press any key" prompt appears on the title screen
    pub const TITLE_TICKS: i32 = (FPS * 4) as i32;
    /// Frames between zapping the last correct equation and the win banner
    pub const WIN_DELAY: i32 = FPS as i32;
    /// Number of lanes a zap reaches to either side
    pub const ZAP_WIDTH: i32 = 4;
    /// A fresh equation is incorrect with probability RATIO/10
    pub const INCORRECT_ANSWER_RATIO: i32 = 3;

    /// Joystick button mapped to "move right"
    pub const JOY_BUTTON_RIGHT: u8 = 61;
    /// Joystick button mapped to "move left"
    pub const JOY_BUTTON_LEFT: u8 = 63;
    /// Joystick button mapped to "jump/zap"
    pub const JOY_BUTTON_JUMP: u8 = 60;
}

/// Pixel x-position of a lane on a board `screen_width` pixels wide
#[inline]
pub fn lane_to_pixel(lane: i32, screen_width: i32) -> i32 {
    (screen_width / consts::MAX_POS) * lane
}
