//! Resource bundle and asset handles
//!
//! All decoding and pixel storage lives in the platform backend; the game
//! core only holds handles carrying the metadata it needs (dimensions, sheet
//! regions, volumes). The bundle is filled at startup and read-only from
//! then on. A lookup of an unregistered key is a programmer error and
//! panics: successful startup loading is a precondition of running the game.

use std::collections::HashMap;

use crate::platform::{Color, Rect};

/// Handle to a drawable image, possibly a region sliced out of a sprite
/// sheet. Dimensions are always queryable without touching the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Key of the asset the pixels come from
    pub source: String,
    /// Region within the source sheet, when sliced from one
    pub region: Option<Rect>,
    /// Transparent color key applied when slicing
    pub color_key: Option<Color>,
    /// Draw mirrored around the vertical axis
    pub flip_x: bool,
    width: i32,
    height: i32,
}

impl Image {
    pub fn new(source: &str, width: i32, height: i32) -> Self {
        Self {
            source: source.to_owned(),
            region: None,
            color_key: None,
            flip_x: false,
            width,
            height,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// A copy of this handle mirrored around the vertical axis. Sliced once
    /// at load time for left-facing sprites, never in the render loop.
    pub fn flipped(&self) -> Image {
        let mut img = self.clone();
        img.flip_x = !img.flip_x;
        img
    }
}

/// Helper for cutting sets of sprites out of one larger sheet image.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    sheet: Image,
}

impl SpriteSheet {
    pub fn new(sheet: Image) -> Self {
        Self { sheet }
    }

    /// One cropped image for `region`, keyed transparent on `color_key`.
    pub fn image_at(&self, region: Rect, color_key: Option<Color>) -> Image {
        Image {
            source: self.sheet.source.clone(),
            region: Some(region),
            color_key,
            flip_x: false,
            width: region.w,
            height: region.h,
        }
    }

    /// Multiple cropped images, preserving the order of `regions`.
    pub fn images_at(&self, regions: &[Rect], color_key: Option<Color>) -> Vec<Image> {
        regions
            .iter()
            .map(|&rect| self.image_at(rect, color_key))
            .collect()
    }
}

/// Monospace font handle. The game only ever uses monospace faces, so text
/// metrics are a pure function of the point size and the glyph count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    px: i32,
    bold: bool,
}

impl Font {
    pub fn monospace(px: i32, bold: bool) -> Self {
        Self { px, bold }
    }

    fn glyph_width(&self) -> i32 {
        self.px * 3 / 5
    }

    /// Lay out `text` in `color`, producing a drawable surface with
    /// queryable pixel dimensions.
    pub fn render(&self, text: &str, color: Color) -> Text {
        Text {
            width: self.glyph_width() * text.chars().count() as i32,
            height: self.px,
            content: text.to_owned(),
            color,
        }
    }
}

/// A rendered line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub content: String,
    pub color: Color,
    width: i32,
    height: i32,
}

impl Text {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

/// Handle to a loaded sound effect or music track, with the playback volume
/// it was registered with.
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    pub name: String,
    pub volume: f32,
}

impl Sound {
    pub fn new(name: &str, volume: f32) -> Self {
        Self {
            name: name.to_owned(),
            volume,
        }
    }
}

/// One registered asset
#[derive(Debug, Clone)]
pub enum Asset {
    Image(Image),
    Sheet(SpriteSheet),
    Font(Font),
    Sound(Sound),
}

impl Asset {
    fn kind(&self) -> &'static str {
        match self {
            Asset::Image(_) => "image",
            Asset::Sheet(_) => "sprite sheet",
            Asset::Font(_) => "font",
            Asset::Sound(_) => "sound",
        }
    }
}

/// The shared, read-only key→asset map handed to every scene.
#[derive(Debug, Default)]
pub struct ResourceBundle {
    resources: HashMap<String, Asset>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: &str, asset: Asset) {
        self.resources.insert(key.to_owned(), asset);
    }

    pub fn register_image(&mut self, key: &str, image: Image) {
        self.register(key, Asset::Image(image));
    }

    pub fn register_sheet(&mut self, key: &str, sheet: SpriteSheet) {
        self.register(key, Asset::Sheet(sheet));
    }

    pub fn register_font(&mut self, key: &str, font: Font) {
        self.register(key, Asset::Font(font));
    }

    pub fn register_sound(&mut self, key: &str, sound: Sound) {
        self.register(key, Asset::Sound(sound));
    }

    /// Look up a raw asset. Panics on an unregistered key.
    pub fn get(&self, key: &str) -> &Asset {
        match self.resources.get(key) {
            Some(asset) => asset,
            None => panic!("resource '{key}' is not registered"),
        }
    }

    pub fn image(&self, key: &str) -> &Image {
        match self.get(key) {
            Asset::Image(image) => image,
            other => panic!("resource '{key}' is a {}, not an image", other.kind()),
        }
    }

    pub fn sheet(&self, key: &str) -> &SpriteSheet {
        match self.get(key) {
            Asset::Sheet(sheet) => sheet,
            other => panic!("resource '{key}' is a {}, not a sprite sheet", other.kind()),
        }
    }

    pub fn font(&self, key: &str) -> &Font {
        match self.get(key) {
            Asset::Font(font) => font,
            other => panic!("resource '{key}' is a {}, not a font", other.kind()),
        }
    }

    pub fn sound(&self, key: &str) -> &Sound {
        match self.get(key) {
            Asset::Sound(sound) => sound,
            other => panic!("resource '{key}' is a {}, not a sound", other.kind()),
        }
    }
}
