//! Tee rendering and layer compositing
//!
//! Renders are built as a layer stack: an ordered list of buffers with
//! signed canvas positions, flattened back to front with source-over
//! blending. The tee itself always fits its 4×4 unit canvas; weapon layers
//! may reach past it, so weapon renders grow the canvas instead of clipping.
//!
//! # Module Structure
//!
//! - [`tee`] - Body, feet and eye placement
//! - [`weapon`] - [`SkinWeapon`] compositor

pub mod tee;
pub mod weapon;

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::part::GameskinPart;

pub use weapon::SkinWeapon;

/// Prefix of files written by `save_render_as`.
pub const RENDER_PREFIX: &str = "render_";

/// Map any angle in degrees into `0..360`.
pub fn normalize_orientation(degrees: i32) -> u32 {
    degrees.rem_euclid(360) as u32
}

/// Whether a tee at `orientation` looks to the left.
pub fn is_facing_left(orientation: u32) -> bool {
    orientation > 90 && orientation < 270
}

/// Unit vector of the look direction in screen space (y down).
pub fn aim_direction(orientation: u32) -> (f32, f32) {
    let (sin, cos) = (orientation as f32).to_radians().sin_cos();
    (cos, -sin)
}

/// `dir/render_<name>` for a requested output path `dir/<name>`.
pub fn render_path(path: &Path) -> PathBuf {
    let name = match path.file_name() {
        Some(name) => format!("{}{}", RENDER_PREFIX, name.to_string_lossy()),
        None => format!("{}tee.png", RENDER_PREFIX),
    };
    path.with_file_name(name)
}

/// Where the weapon ended up in a weapon render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponPlacement {
    pub weapon: GameskinPart,
    /// Grip point in output pixels
    pub anchor: (i32, i32),
    /// Rotation applied to the sprite, in degrees
    pub rotation: u32,
    pub behind_hand: bool,
}

/// Output of a render: the image plus what produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    image: PixelBuffer,
    orientation: u32,
    weapon: Option<WeaponPlacement>,
}

impl RenderResult {
    pub(crate) fn new(image: PixelBuffer, orientation: u32, weapon: Option<WeaponPlacement>) -> Self {
        Self { image, orientation, weapon }
    }

    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn into_image(self) -> PixelBuffer {
        self.image
    }

    pub fn orientation(&self) -> u32 {
        self.orientation
    }

    pub fn weapon(&self) -> Option<&WeaponPlacement> {
        self.weapon.as_ref()
    }

    /// Encode the render as PNG at `path`.
    pub fn save_as(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<&Self> {
        let path = path.as_ref();
        self.image.save_png(path, overwrite)?;
        debug!(path = %path.display(), orientation = self.orientation, "render saved");
        Ok(self)
    }

    /// Save as `render_<file name>` next to `path`, never overwriting.
    pub fn save_render_as(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let target = render_path(path.as_ref());
        self.save_as(&target, false)?;
        Ok(target)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Layer {
    name: &'static str,
    buffer: PixelBuffer,
    x: i32,
    y: i32,
}

/// Ordered layers over a fixed-size canvas, back to front.
#[derive(Debug, Clone)]
pub(crate) struct LayerStack {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
}

impl LayerStack {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self { width, height, layers: Vec::new() }
    }

    pub(crate) fn push(&mut self, name: &'static str, buffer: PixelBuffer, x: i32, y: i32) {
        trace!(layer = name, x, y, width = buffer.width(), height = buffer.height(), "push layer");
        self.layers.push(Layer { name, buffer, x, y });
    }

    /// Insert below the first layer called `before`, or on top if there is none.
    pub(crate) fn insert_before(&mut self, before: &str, name: &'static str, buffer: PixelBuffer, x: i32, y: i32) {
        let index = self.layers.iter().position(|layer| layer.name == before).unwrap_or(self.layers.len());
        trace!(layer = name, index, x, y, "insert layer");
        self.layers.insert(index, Layer { name, buffer, x, y });
    }

    pub(crate) fn len(&self) -> usize {
        self.layers.len()
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.layers.iter().map(|layer| layer.name)
    }

    /// Composite onto the canvas, clipping anything outside it.
    pub(crate) fn flatten(&self) -> PixelBuffer {
        let mut canvas = PixelBuffer::new(self.width, self.height);
        for layer in &self.layers {
            canvas.blit(&layer.buffer, layer.x, layer.y);
        }
        canvas
    }

    /// Composite onto a canvas grown to contain every layer.
    ///
    /// Returns the image and the offset added to every canvas position.
    pub(crate) fn flatten_grown(&self) -> (PixelBuffer, (i32, i32)) {
        let (mut min_x, mut min_y) = (0i32, 0i32);
        let (mut max_x, mut max_y) = (self.width as i32, self.height as i32);
        for layer in &self.layers {
            min_x = min_x.min(layer.x);
            min_y = min_y.min(layer.y);
            max_x = max_x.max(layer.x + layer.buffer.width() as i32);
            max_y = max_y.max(layer.y + layer.buffer.height() as i32);
        }

        let offset = (-min_x, -min_y);
        trace!(layers = ?self.names().collect::<Vec<_>>(), ?offset, "flatten grown");
        let mut canvas = PixelBuffer::new((max_x - min_x) as u32, (max_y - min_y) as u32);
        for layer in &self.layers {
            canvas.blit(&layer.buffer, layer.x + offset.0, layer.y + offset.1);
        }
        (canvas, offset)
    }
}
