//! Owned RGBA pixel grids with region, blit and resampling operations

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};

use crate::color::{flat_pixel, tint_pixel, Color};
use crate::error::{AssetError, Result};

/// Largest per-axis scale factor accepted when resampling, in either direction.
pub const MAX_SCALE_RATIO: u32 = 16;

/// Transparent color used for empty canvas space
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Pixel rectangle inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether the pixel lies inside this rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }
}

/// An owned 2D grid of RGBA pixels.
///
/// Wraps an [`RgbaImage`]; every region access is bounds-checked and fails
/// with [`AssetError::OutOfBounds`] instead of clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Create a buffer filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, color) }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode PNG (or any format the `image` crate recognizes) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|e| AssetError::Decode(e.to_string()))?;
        let image = decoded.to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(AssetError::Decode("image has no pixels".to_string()));
        }
        Ok(Self { image })
    }

    /// Encode as lossless PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(self.image.as_raw(), self.width(), self.height(), ColorType::Rgba8)
            .map_err(|e| AssetError::Encode(e.to_string()))?;
        Ok(bytes)
    }

    /// Encode as PNG and write to `path`, creating parent directories.
    ///
    /// Fails with [`AssetError::FileExists`] when the target exists and
    /// `overwrite` is false.
    pub fn save_png(&self, path: &Path, overwrite: bool) -> Result<()> {
        if !overwrite && path.exists() {
            return Err(AssetError::FileExists(path.to_path_buf()));
        }

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|source| AssetError::Directory { path: parent.to_path_buf(), source })?;
            }
        }

        std::fs::write(path, self.encode_png()?)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Full buffer rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pixel at `(x, y)`, `None` when outside.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.width() && y < self.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Rgba<u8>) {
        if x < self.width() && y < self.height() {
            self.image.put_pixel(x, y, pixel);
        }
    }

    fn check(&self, rect: Rect) -> Result<()> {
        let fits = rect.width > 0
            && rect.height > 0
            && rect.x.checked_add(rect.width).is_some_and(|r| r <= self.width())
            && rect.y.checked_add(rect.height).is_some_and(|b| b <= self.height());
        if fits {
            Ok(())
        } else {
            Err(AssetError::OutOfBounds { rect: rect.as_tuple(), bounds: self.dimensions() })
        }
    }

    /// Copy a region out into a new buffer.
    pub fn region(&self, rect: Rect) -> Result<PixelBuffer> {
        self.check(rect)?;
        let view = image::imageops::crop_imm(&self.image, rect.x, rect.y, rect.width, rect.height);
        Ok(Self { image: view.to_image() })
    }

    /// Replace a region with `src`, which must have exactly the region size.
    pub fn write_region(&mut self, rect: Rect, src: &PixelBuffer) -> Result<()> {
        self.check(rect)?;
        if src.dimensions() != (rect.width, rect.height) {
            return Err(AssetError::SizeMismatch {
                from: src.dimensions(),
                to: (rect.width, rect.height),
                max: 1,
            });
        }
        image::imageops::replace(&mut self.image, &src.image, rect.x as i64, rect.y as i64);
        Ok(())
    }

    /// Replace a region with `src`, resampling it to the region size first.
    pub fn write_region_resampled(&mut self, rect: Rect, src: &PixelBuffer) -> Result<()> {
        self.check(rect)?;
        let fitted = src.resampled(rect.width, rect.height)?;
        self.write_region(rect, &fitted)
    }

    /// Recolor a region.
    ///
    /// With `maskable` set, hue and saturation are replaced and lightness
    /// kept; otherwise RGB is overwritten. Alpha is never changed.
    pub fn tint_region(&mut self, rect: Rect, color: Color, maskable: bool) -> Result<()> {
        self.check(rect)?;
        let hsl = color.to_hsl();
        let rgb = color.to_rgb();
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                let pixel = *self.image.get_pixel(x, y);
                let recolored = if maskable { tint_pixel(pixel, hsl) } else { flat_pixel(pixel, rgb) };
                self.image.put_pixel(x, y, recolored);
            }
        }
        Ok(())
    }

    /// Alpha-blend `src` over this buffer with its top-left at `(x, y)`.
    ///
    /// Offsets may be negative; whatever falls outside is clipped.
    pub fn blit(&mut self, src: &PixelBuffer, x: i32, y: i32) {
        let (width, height) = (self.width() as i64, self.height() as i64);

        for (sy, row) in src.image.rows().enumerate() {
            let dest_y = y as i64 + sy as i64;
            if dest_y < 0 {
                continue;
            }
            if dest_y >= height {
                break;
            }

            for (sx, pixel) in row.enumerate() {
                let dest_x = x as i64 + sx as i64;
                if dest_x < 0 {
                    continue;
                }
                if dest_x >= width {
                    break;
                }
                // Fully transparent source, skip
                if pixel[3] == 0 {
                    continue;
                }
                let dst = self.image.get_pixel(dest_x as u32, dest_y as u32);
                let blended = blend_over(pixel, dst);
                self.image.put_pixel(dest_x as u32, dest_y as u32, blended);
            }
        }
    }

    /// Mirror left-right.
    pub fn flipped_horizontal(&self) -> PixelBuffer {
        Self { image: image::imageops::flip_horizontal(&self.image) }
    }

    /// Mirror top-bottom.
    pub fn flipped_vertical(&self) -> PixelBuffer {
        Self { image: image::imageops::flip_vertical(&self.image) }
    }

    /// Resample to `width` x `height`.
    ///
    /// Nearest-neighbor when neither axis shrinks, premultiplied area
    /// average otherwise. Each axis ratio must stay within
    /// [`MAX_SCALE_RATIO`].
    pub fn resampled(&self, width: u32, height: u32) -> Result<PixelBuffer> {
        let (src_w, src_h) = self.dimensions();
        if (src_w, src_h) == (width, height) {
            return Ok(self.clone());
        }
        if !ratio_supported(src_w, width) || !ratio_supported(src_h, height) {
            return Err(AssetError::SizeMismatch {
                from: (src_w, src_h),
                to: (width, height),
                max: MAX_SCALE_RATIO,
            });
        }

        let image = if width >= src_w && height >= src_h {
            image::imageops::resize(&self.image, width, height, image::imageops::FilterType::Nearest)
        } else {
            area_average(&self.image, width, height)
        };
        Ok(Self { image })
    }

    /// Rotate counterclockwise by `degrees` around `pivot`.
    ///
    /// The result is sized to the rotated bounding box. Returns the rotated
    /// buffer and the pivot's position inside it. Nearest-neighbor sampling.
    pub fn rotated(&self, degrees: f32, pivot: (f32, f32)) -> (PixelBuffer, (f32, f32)) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        if degrees.rem_euclid(360.0) == 0.0 {
            return (self.clone(), pivot);
        }

        // Screen y points down, so a counterclockwise turn uses -sin on y
        let (sin, cos) = (-degrees.to_radians()).sin_cos();
        let rotate = |x: f32, y: f32| (x * cos - y * sin, x * sin + y * cos);

        // Snap so right angles do not pick up an extra row from float noise
        let snap = |v: f32| (v * 1e4).round() / 1e4;
        let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)].map(|(x, y)| {
            let (rx, ry) = rotate(x, y);
            (snap(rx), snap(ry))
        });
        let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min).floor();
        let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min).floor();
        let max_x = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max).ceil();
        let max_y = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max).ceil();

        let out_w = ((max_x - min_x) as u32).max(1);
        let out_h = ((max_y - min_y) as u32).max(1);
        let mut out = RgbaImage::from_pixel(out_w, out_h, TRANSPARENT);

        // Inverse mapping: for each output pixel center, find the source pixel
        for oy in 0..out_h {
            for ox in 0..out_w {
                let rx = ox as f32 + 0.5 + min_x;
                let ry = oy as f32 + 0.5 + min_y;
                let sx = rx * cos + ry * sin;
                let sy = -rx * sin + ry * cos;
                if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
                    out.put_pixel(ox, oy, *self.image.get_pixel(sx as u32, sy as u32));
                }
            }
        }

        let (px, py) = rotate(pivot.0, pivot.1);
        (Self { image: out }, (px - min_x, py - min_y))
    }
}

fn ratio_supported(from: u32, to: u32) -> bool {
    if from == 0 || to == 0 {
        return false;
    }
    let (small, big) = if from < to { (from, to) } else { (to, from) };
    big <= small.saturating_mul(MAX_SCALE_RATIO)
}

/// Source-over compositing of one pixel onto another.
fn blend_over(src: &Rgba<u8>, dst: &Rgba<u8>) -> Rgba<u8> {
    let src_alpha = src[3] as f32 / 255.0;
    let dst_alpha = dst[3] as f32 / 255.0;

    // out_alpha = src_alpha + dst_alpha * (1 - src_alpha)
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha == 0.0 {
        return TRANSPARENT;
    }

    let composite = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        composite(src[0], dst[0]),
        composite(src[1], dst[1]),
        composite(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

/// Box-filter resample weighting every source pixel by its overlap with the
/// destination footprint. Color is averaged premultiplied by alpha so that
/// transparent neighbors do not darken edges.
fn area_average(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (src_w, src_h) = src.dimensions();
    let scale_x = src_w as f64 / width as f64;
    let scale_y = src_h as f64 / height as f64;
    let mut out = RgbaImage::from_pixel(width, height, TRANSPARENT);

    for oy in 0..height {
        let y0 = oy as f64 * scale_y;
        let y1 = y0 + scale_y;
        for ox in 0..width {
            let x0 = ox as f64 * scale_x;
            let x1 = x0 + scale_x;

            let mut acc = [0.0f64; 4];
            let mut area = 0.0f64;
            for sy in (y0.floor() as u32)..(y1.ceil() as u32).min(src_h) {
                let wy = (y1.min(sy as f64 + 1.0) - y0.max(sy as f64)).max(0.0);
                for sx in (x0.floor() as u32)..(x1.ceil() as u32).min(src_w) {
                    let wx = (x1.min(sx as f64 + 1.0) - x0.max(sx as f64)).max(0.0);
                    let weight = wx * wy;
                    let p = src.get_pixel(sx, sy);
                    let alpha = p[3] as f64 / 255.0;
                    acc[0] += p[0] as f64 * alpha * weight;
                    acc[1] += p[1] as f64 * alpha * weight;
                    acc[2] += p[2] as f64 * alpha * weight;
                    acc[3] += alpha * weight;
                    area += weight;
                }
            }

            if area == 0.0 || acc[3] == 0.0 {
                continue;
            }
            let alpha = acc[3] / area;
            let channel = |c: f64| (c / acc[3]).round().clamp(0.0, 255.0) as u8;
            out.put_pixel(
                ox,
                oy,
                Rgba([channel(acc[0]), channel(acc[1]), channel(acc[2]), (alpha * 255.0).round() as u8]),
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn quadrants(size: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::filled(size, size, RED);
        for y in 0..size {
            for x in size / 2..size {
                buffer.put_pixel(x, y, BLUE);
            }
        }
        buffer
    }

    #[test]
    fn test_region_out_of_bounds_fails() {
        let buffer = PixelBuffer::new(4, 4);
        assert!(buffer.region(Rect::new(0, 0, 4, 4)).is_ok());
        assert!(matches!(buffer.region(Rect::new(1, 0, 4, 4)), Err(AssetError::OutOfBounds { .. })));
        assert!(matches!(buffer.region(Rect::new(0, 0, 0, 1)), Err(AssetError::OutOfBounds { .. })));
    }

    #[test]
    fn test_region_then_write_is_identity() {
        let mut buffer = quadrants(8);
        let before = buffer.clone();
        let rect = Rect::new(2, 1, 4, 5);
        let part = buffer.region(rect).unwrap();
        buffer.write_region(rect, &part).unwrap();
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_write_region_requires_exact_size() {
        let mut buffer = PixelBuffer::new(4, 4);
        let small = PixelBuffer::new(1, 1);
        assert!(matches!(
            buffer.write_region(Rect::new(0, 0, 2, 2), &small),
            Err(AssetError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_resample_upscale_is_nearest() {
        let up = quadrants(2).resampled(8, 8).unwrap();
        assert_eq!(up.pixel(0, 0), Some(RED));
        assert_eq!(up.pixel(3, 7), Some(RED));
        assert_eq!(up.pixel(4, 0), Some(BLUE));
        assert_eq!(up.pixel(7, 7), Some(BLUE));
    }

    #[test]
    fn test_resample_downscale_averages_area() {
        let mut checker = PixelBuffer::new(2, 2);
        checker.put_pixel(0, 0, Rgba([200, 0, 0, 255]));
        checker.put_pixel(1, 1, Rgba([200, 0, 0, 255]));
        let down = checker.resampled(1, 1).unwrap();
        // Half coverage, color not darkened by the transparent pixels
        assert_eq!(down.pixel(0, 0), Some(Rgba([200, 0, 0, 128])));
    }

    #[test]
    fn test_resample_round_trip_integer_ratio() {
        let original = quadrants(8);
        let back = original.resampled(2, 2).unwrap().resampled(8, 8).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_resample_ratio_limit() {
        let buffer = PixelBuffer::new(1, 1);
        assert!(buffer.resampled(MAX_SCALE_RATIO, MAX_SCALE_RATIO).is_ok());
        assert!(matches!(
            buffer.resampled(MAX_SCALE_RATIO + 1, 1),
            Err(AssetError::SizeMismatch { .. })
        ));
        assert!(buffer.resampled(0, 1).is_err());
    }

    #[test]
    fn test_blit_clips_negative_offsets() {
        let mut canvas = PixelBuffer::new(4, 4);
        let sprite = PixelBuffer::filled(3, 3, RED);
        canvas.blit(&sprite, -2, -2);
        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 0), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(0, 1), Some(TRANSPARENT));
    }

    #[test]
    fn test_blit_blends_alpha() {
        let mut canvas = PixelBuffer::filled(1, 1, BLUE);
        canvas.blit(&PixelBuffer::filled(1, 1, Rgba([255, 0, 0, 128])), 0, 0);
        let p = canvas.pixel(0, 0).unwrap();
        assert_eq!(p[3], 255);
        assert!(p[0] > 120 && p[0] < 135);
        assert!(p[2] > 120 && p[2] < 135);
    }

    #[test]
    fn test_tint_region_leaves_outside_untouched() {
        let mut buffer = quadrants(4);
        buffer.tint_region(Rect::new(0, 0, 2, 2), Color::rgb(0, 255, 0), false).unwrap();
        assert_eq!(buffer.pixel(0, 0), Some(Rgba([0, 255, 0, 255])));
        assert_eq!(buffer.pixel(0, 2), Some(RED));
        assert_eq!(buffer.pixel(2, 0), Some(BLUE));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        // 2x1 strip: red left, blue right
        let mut strip = PixelBuffer::new(2, 1);
        strip.put_pixel(0, 0, RED);
        strip.put_pixel(1, 0, BLUE);
        let (rotated, pivot) = strip.rotated(90.0, (0.0, 0.0));
        assert_eq!(rotated.dimensions(), (1, 2));
        // Counterclockwise: the right end now points up
        assert_eq!(rotated.pixel(0, 0), Some(BLUE));
        assert_eq!(rotated.pixel(0, 1), Some(RED));
        assert!((pivot.0 - 0.0).abs() < 1e-4 && (pivot.1 - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_right_angles_keep_exact_size() {
        let buffer = PixelBuffer::filled(3, 2, RED);
        for (degrees, size) in [(90.0, (2, 3)), (180.0, (3, 2)), (270.0, (2, 3)), (-90.0, (2, 3))] {
            let (rotated, _) = buffer.rotated(degrees, (0.0, 0.0));
            assert_eq!(rotated.dimensions(), size, "{} degrees", degrees);
            assert_eq!(rotated, PixelBuffer::filled(size.0, size.1, RED), "{} degrees", degrees);
        }
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let buffer = quadrants(4);
        let (rotated, pivot) = buffer.rotated(360.0, (1.0, 2.0));
        assert_eq!(rotated, buffer);
        assert_eq!(pivot, (1.0, 2.0));
    }

    #[test]
    fn test_png_round_trip() {
        let buffer = quadrants(6);
        let decoded = PixelBuffer::decode(&buffer.encode_png().unwrap()).unwrap();
        assert_eq!(decoded, buffer);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(PixelBuffer::decode(b"not an image"), Err(AssetError::Decode(_))));
    }

    #[test]
    fn test_save_png_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        let buffer = quadrants(2);
        buffer.save_png(&path, false).unwrap();
        assert!(matches!(buffer.save_png(&path, false), Err(AssetError::FileExists(_))));
        assert!(buffer.save_png(&path, true).is_ok());
    }
}
