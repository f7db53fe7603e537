//! Generic sprite-sheet asset
//!
//! [`Asset`] owns a decoded sheet and its unit size, and implements every
//! operation that only needs a part layout: extracting, replacing,
//! recoloring and copying parts. Kind-specific behavior (rendering, weapon
//! anchors, part save directories) lives in [`crate::skin`] and
//! [`crate::gameskin`] as `impl` blocks on `Asset<SkinKind>` and
//! `Asset<GameskinKind>`.
//!
//! Mutating operations return `&mut Self` so calls chain with `?`:
//!
//! ```no_run
//! use teesheet::{Color, Gameskin, GameskinPart};
//!
//! # fn main() -> teesheet::Result<()> {
//! let mut source = Gameskin::new();
//! source.load_from_path("data/gameskins/4k.png")?;
//!
//! let mut gameskin = Gameskin::new();
//! gameskin
//!     .load_from_path("data/gameskins/ahl_red.png")?
//!     .copy_parts(&source, &[GameskinPart::Hammer, GameskinPart::Grenade])?
//!     .color_part(Color::rgb(0, 127, 0), GameskinPart::Gun)?
//!     .save_as("out.png", true)?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::buffer::{PixelBuffer, Rect};
use crate::color::Color;
use crate::error::{AssetError, Result};
use crate::part::{PartLayout, PartSpec, PartTag};

/// Static description of an asset kind plus its per-asset state.
pub trait AssetKind: Default {
    /// Kind name used in errors and logs
    const NAME: &'static str;

    /// Part registry for this kind.
    fn layout() -> &'static PartLayout;
}

/// A loaded sheet: pixels plus the unit size derived from them.
#[derive(Debug, Clone)]
struct Sheet {
    buffer: PixelBuffer,
    unit: u32,
}

/// A sprite-sheet asset of kind `K`.
///
/// Created empty, populated by exactly one load call, then mutated in place.
#[derive(Debug, Clone, Default)]
pub struct Asset<K: AssetKind> {
    sheet: Option<Sheet>,
    state: K,
}

impl<K: AssetKind> Asset<K> {
    /// Create an empty, unloaded asset.
    pub fn new() -> Self {
        Self { sheet: None, state: K::default() }
    }

    /// Create a loaded asset from an existing buffer.
    pub fn from_buffer(buffer: PixelBuffer) -> Result<Self> {
        let mut asset = Self::new();
        asset.adopt(buffer)?;
        Ok(asset)
    }

    /// Decode and load a sheet from a file.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        self.ensure_unloaded()?;
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound(path.to_path_buf()),
            _ => AssetError::Io(e),
        })?;
        debug!(path = %path.display(), kind = K::NAME, "loading sheet");
        self.load_from_bytes(&bytes)
    }

    /// Load from a location given as a URL.
    ///
    /// `file://` URLs and bare paths are read from disk; any other scheme
    /// fails with [`AssetError::Fetch`].
    pub fn load_from_url(&mut self, url: &str) -> Result<&mut Self> {
        let path = match url.split_once("://") {
            Some(("file", rest)) => PathBuf::from(rest),
            Some((scheme, _)) => {
                return Err(AssetError::Fetch {
                    url: url.to_string(),
                    reason: format!("unsupported scheme '{}'", scheme),
                })
            }
            None => PathBuf::from(url),
        };
        self.load_from_path(path)
    }

    /// Decode and load a sheet from encoded image bytes.
    pub fn load_from_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.ensure_unloaded()?;
        let buffer = PixelBuffer::decode(bytes)?;
        self.adopt(buffer)?;
        Ok(self)
    }

    fn ensure_unloaded(&self) -> Result<()> {
        match self.sheet {
            Some(_) => Err(AssetError::AlreadyLoaded(K::NAME)),
            None => Ok(()),
        }
    }

    fn adopt(&mut self, buffer: PixelBuffer) -> Result<()> {
        self.ensure_unloaded()?;
        let (width, height) = buffer.dimensions();
        let layout = K::layout();
        let unit = layout.unit_for(width, height).ok_or(AssetError::InvalidDimensions {
            width,
            height,
            columns: layout.grid.0,
            rows: layout.grid.1,
            kind: K::NAME,
        })?;
        debug!(width, height, unit, kind = K::NAME, "sheet loaded");
        self.sheet = Some(Sheet { buffer, unit });
        Ok(())
    }

    fn sheet(&self) -> Result<&Sheet> {
        self.sheet.as_ref().ok_or(AssetError::Uninitialized(K::NAME))
    }

    fn sheet_mut(&mut self) -> Result<&mut Sheet> {
        self.sheet.as_mut().ok_or(AssetError::Uninitialized(K::NAME))
    }

    pub fn is_loaded(&self) -> bool {
        self.sheet.is_some()
    }

    /// Pixel size of one grid cell.
    pub fn unit(&self) -> Result<u32> {
        Ok(self.sheet()?.unit)
    }

    /// The whole sheet.
    pub fn buffer(&self) -> Result<&PixelBuffer> {
        Ok(&self.sheet()?.buffer)
    }

    pub fn layout(&self) -> &'static PartLayout {
        K::layout()
    }

    pub(crate) fn state(&self) -> &K {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut K {
        &mut self.state
    }

    /// Pixel rectangle of `tag` on this sheet.
    pub fn region_for(&self, tag: impl Into<PartTag>) -> Result<Rect> {
        let unit = self.unit()?;
        K::layout().region_for(tag, unit)
    }

    fn resolve(&self, tag: PartTag) -> Result<(&'static PartSpec, Rect)> {
        let unit = self.unit()?;
        let spec = K::layout().spec(tag)?;
        Ok((spec, spec.cells.to_pixels(unit)))
    }

    /// Copy of the pixels of `tag`.
    pub fn get_part(&self, tag: impl Into<PartTag>) -> Result<PixelBuffer> {
        let rect = self.region_for(tag)?;
        self.buffer()?.region(rect)
    }

    /// Replace the pixels of `tag`, resampling `src` if its size differs.
    pub fn set_part(&mut self, tag: impl Into<PartTag>, src: &PixelBuffer) -> Result<&mut Self> {
        let rect = self.region_for(tag)?;
        self.sheet_mut()?.buffer.write_region_resampled(rect, src)?;
        Ok(self)
    }

    /// Recolor one part.
    pub fn color_part(&mut self, color: Color, tag: impl Into<PartTag>) -> Result<&mut Self> {
        self.color_parts(color, &[tag.into()])
    }

    /// Recolor several parts with one color.
    ///
    /// Every tag is resolved before any pixel changes, so an unknown tag
    /// leaves the sheet untouched.
    pub fn color_parts<T>(&mut self, color: Color, tags: &[T]) -> Result<&mut Self>
    where
        T: Into<PartTag> + Copy,
    {
        let targets = tags
            .iter()
            .map(|tag| self.resolve((*tag).into()))
            .collect::<Result<Vec<_>>>()?;

        let buffer = &mut self.sheet_mut()?.buffer;
        for (spec, rect) in targets {
            debug!(part = %spec.tag, %color, "coloring part");
            buffer.tint_region(rect, color, spec.flags.maskable)?;
        }
        Ok(self)
    }

    /// Copy one part from `other`, see [`Asset::copy_parts`].
    pub fn copy_part(&mut self, other: &Asset<K>, tag: impl Into<PartTag>) -> Result<&mut Self> {
        self.copy_parts(other, &[tag.into()])
    }

    /// Copy parts from another sheet of the same kind.
    ///
    /// Source rectangles are resolved with `other`'s unit size and
    /// destination rectangles with this sheet's, so sheets of different
    /// resolutions copy in both directions. All parts are extracted and
    /// resampled before the first write.
    pub fn copy_parts<T>(&mut self, other: &Asset<K>, tags: &[T]) -> Result<&mut Self>
    where
        T: Into<PartTag> + Copy,
    {
        let source_unit = other.unit()?;
        let target_unit = self.unit()?;

        let mut staged = Vec::with_capacity(tags.len());
        for tag in tags {
            let (_, rect) = self.resolve((*tag).into())?;
            let part = other.get_part(*tag)?.resampled(rect.width, rect.height)?;
            staged.push((rect, part));
        }

        debug!(parts = tags.len(), source_unit, target_unit, kind = K::NAME, "copying parts");
        let buffer = &mut self.sheet_mut()?.buffer;
        for (rect, part) in &staged {
            buffer.write_region(*rect, part)?;
        }
        Ok(self)
    }

    /// Encode the sheet as PNG at `path`.
    pub fn save_as(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<&Self> {
        let path = path.as_ref();
        self.buffer()?.save_png(path, overwrite)?;
        debug!(path = %path.display(), kind = K::NAME, "sheet saved");
        Ok(self)
    }

    /// Save one part as `<dir>/<name>.png`, creating `dir` if needed.
    ///
    /// Existing part files are overwritten.
    pub fn save_part_to(&self, dir: impl AsRef<Path>, tag: impl Into<PartTag>) -> Result<PathBuf> {
        let tag = tag.into();
        let dir = dir.as_ref();
        let part = self.get_part(tag)?;

        if !dir.as_os_str().is_empty() && !dir.is_dir() {
            std::fs::create_dir_all(dir)
                .map_err(|source| AssetError::Directory { path: dir.to_path_buf(), source })?;
        }

        let path = part_file_path(dir, tag);
        part.save_png(&path, true)?;
        debug!(part = %tag, path = %path.display(), "part saved");
        Ok(path)
    }
}

/// `<dir>/<name>.png` for a part tag.
pub(crate) fn part_file_path(dir: &Path, tag: PartTag) -> PathBuf {
    dir.join(format!("{}.png", tag.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{GameskinPart, SkinPart};
    use crate::{Gameskin, Skin};
    use image::Rgba;

    /// Skin sheet where every pixel encodes its own coordinates.
    fn coordinate_skin(unit: u32) -> Skin {
        let mut buffer = PixelBuffer::new(8 * unit, 4 * unit);
        for y in 0..4 * unit {
            for x in 0..8 * unit {
                buffer.put_pixel(x, y, Rgba([(x % 251) as u8, (y % 251) as u8, 90, 255]));
            }
        }
        Skin::from_buffer(buffer).unwrap()
    }

    #[test]
    fn test_unloaded_asset_rejects_part_access() {
        let skin = Skin::new();
        assert!(!skin.is_loaded());
        assert!(matches!(skin.get_part(SkinPart::Body), Err(AssetError::Uninitialized("skin"))));
        assert!(matches!(skin.unit(), Err(AssetError::Uninitialized(_))));
    }

    #[test]
    fn test_second_load_is_rejected() {
        let mut skin = coordinate_skin(32);
        let bytes = skin.buffer().unwrap().encode_png().unwrap();
        assert!(matches!(skin.load_from_bytes(&bytes), Err(AssetError::AlreadyLoaded("skin"))));
    }

    #[test]
    fn test_bad_dimensions_rejected() {
        let result = Skin::from_buffer(PixelBuffer::new(100, 100));
        assert!(matches!(result, Err(AssetError::InvalidDimensions { width: 100, .. })));
    }

    #[test]
    fn test_unit_follows_resolution() {
        assert_eq!(coordinate_skin(32).unit().unwrap(), 32);
        assert_eq!(coordinate_skin(64).unit().unwrap(), 64);
    }

    #[test]
    fn test_get_part_matches_region() {
        let skin = coordinate_skin(32);
        let foot = skin.get_part(SkinPart::Foot).unwrap();
        assert_eq!(foot.dimensions(), (64, 32));
        assert_eq!(foot.pixel(0, 0), Some(Rgba([192, 32, 90, 255])));
    }

    #[test]
    fn test_get_then_set_is_noop() {
        let mut skin = coordinate_skin(32);
        let before = skin.buffer().unwrap().clone();
        for tag in SkinPart::ALL {
            let part = skin.get_part(*tag).unwrap();
            skin.set_part(*tag, &part).unwrap();
        }
        assert_eq!(skin.buffer().unwrap(), &before);
    }

    #[test]
    fn test_set_part_resamples() {
        let mut skin = coordinate_skin(32);
        skin.set_part(SkinPart::Hand, &PixelBuffer::filled(4, 4, Rgba([1, 2, 3, 255]))).unwrap();
        let hand = skin.get_part(SkinPart::Hand).unwrap();
        assert!(hand.as_image().pixels().all(|p| *p == Rgba([1, 2, 3, 255])));
    }

    #[test]
    fn test_wrong_kind_tag_is_unknown() {
        let mut skin = coordinate_skin(32);
        assert!(matches!(skin.get_part(GameskinPart::Gun), Err(AssetError::UnknownPart { .. })));
        assert!(matches!(
            skin.color_part(Color::rgb(1, 1, 1), GameskinPart::Gun),
            Err(AssetError::UnknownPart { .. })
        ));
    }

    #[test]
    fn test_color_parts_is_atomic_on_unknown_tag() {
        let mut gameskin = Gameskin::from_buffer(PixelBuffer::filled(1024, 512, Rgba([9, 9, 9, 255]))).unwrap();
        let before = gameskin.buffer().unwrap().clone();
        let tags = [PartTag::from(GameskinPart::Gun), PartTag::from(SkinPart::Body)];
        assert!(gameskin.color_parts(Color::rgb(255, 0, 0), &tags).is_err());
        assert_eq!(gameskin.buffer().unwrap(), &before);
    }

    #[test]
    fn test_copy_part_across_resolutions() {
        let big = coordinate_skin(64);
        let mut small = coordinate_skin(32);
        small.copy_part(&big, SkinPart::Hand).unwrap();
        let hand = small.get_part(SkinPart::Hand).unwrap();
        assert_eq!(hand.dimensions(), (32, 32));
        // Each small pixel averages a 2x2 block of the 64-unit hand at x=384:
        // red channels 133 and 134 average to 133.5 and round up
        let p = hand.pixel(0, 0).unwrap();
        assert_eq!(p[0], 134);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_save_part_to_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("parts/nested");
        let skin = coordinate_skin(32);
        let path = skin.save_part_to(&target, SkinPart::AngryEye).unwrap();
        assert_eq!(path, target.join("angry_eye.png"));
        let saved = image::open(&path).unwrap().to_rgba8();
        assert_eq!(saved.dimensions(), (32, 32));
    }

    #[test]
    fn test_load_missing_file() {
        let mut skin = Skin::new();
        assert!(matches!(skin.load_from_path("/definitely/missing.png"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_load_from_url_schemes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skin.png");
        coordinate_skin(32).save_as(&path, false).unwrap();

        let mut skin = Skin::new();
        skin.load_from_url(&format!("file://{}", path.display())).unwrap();
        assert!(skin.is_loaded());

        let mut remote = Skin::new();
        assert!(matches!(
            remote.load_from_url("https://example.com/skin.png"),
            Err(AssetError::Fetch { .. })
        ));
    }
}
