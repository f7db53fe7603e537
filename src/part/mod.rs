//! Part tags and resolution-independent part layouts
//!
//! A sheet is a grid of square cells whose size (the unit) depends on the
//! sheet resolution. Every part is declared once as a rectangle of whole
//! cells, so one tag resolves to different pixel rectangles on 1×, 2× or 4×
//! sheets of the same family.
//!
//! # Module Structure
//!
//! - [`skin`] - Character sheet parts and layout
//! - [`gameskin`] - Weapon/UI sheet parts and layout

use std::fmt;
use std::str::FromStr;

use crate::buffer::Rect;
use crate::error::{AssetError, Result};

pub use gameskin::{GameskinPart, GAMESKIN_LAYOUT};
pub use skin::{SkinPart, SKIN_LAYOUT};

/// A part tag of either asset kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartTag {
    Skin(SkinPart),
    Gameskin(GameskinPart),
}

impl PartTag {
    /// Stable snake_case name, used for file names and CLI arguments.
    pub fn name(&self) -> &'static str {
        match self {
            PartTag::Skin(part) => part.name(),
            PartTag::Gameskin(part) => part.name(),
        }
    }
}

impl fmt::Display for PartTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<SkinPart> for PartTag {
    fn from(part: SkinPart) -> Self {
        PartTag::Skin(part)
    }
}

impl From<GameskinPart> for PartTag {
    fn from(part: GameskinPart) -> Self {
        PartTag::Gameskin(part)
    }
}

impl FromStr for PartTag {
    type Err = String;

    /// Parse a part name, trying skin parts before gameskin parts.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<SkinPart>()
            .map(PartTag::Skin)
            .or_else(|_| s.parse::<GameskinPart>().map(PartTag::Gameskin))
            .map_err(|_| format!("unknown part '{}'", s))
    }
}

/// Per-part behavior flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartFlags {
    /// May be drawn mirrored when the tee faces left
    pub mirrorable: bool,
    /// Recoloring keeps shading (HSL tint) instead of a flat overwrite
    pub maskable: bool,
}

impl PartFlags {
    pub const SHADED: PartFlags = PartFlags { mirrorable: false, maskable: true };
    pub const MIRRORED: PartFlags = PartFlags { mirrorable: true, maskable: true };
    pub const FLAT: PartFlags = PartFlags { mirrorable: false, maskable: false };
    pub const FLAT_MIRRORED: PartFlags = PartFlags { mirrorable: true, maskable: false };
}

/// Rectangle of a part in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Scale to pixels for a given unit size.
    pub fn to_pixels(&self, unit: u32) -> Rect {
        Rect::new(self.x * unit, self.y * unit, self.width * unit, self.height * unit)
    }
}

/// One registered part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartSpec {
    pub tag: PartTag,
    pub cells: CellRect,
    pub flags: PartFlags,
}

/// Registry of parts for one asset kind.
///
/// Layouts are static data; lookups are pure functions of the tag and the
/// unit size.
#[derive(Debug)]
pub struct PartLayout {
    /// Asset kind name, for error messages
    pub kind: &'static str,
    /// Grid size in cells (columns, rows)
    pub grid: (u32, u32),
    pub parts: &'static [PartSpec],
}

impl PartLayout {
    /// Registered entry for `tag`.
    pub fn spec(&self, tag: impl Into<PartTag>) -> Result<&PartSpec> {
        let tag = tag.into();
        self.parts
            .iter()
            .find(|spec| spec.tag == tag)
            .ok_or(AssetError::UnknownPart { tag, kind: self.kind })
    }

    /// Pixel rectangle of `tag` on a sheet with the given unit size.
    ///
    /// ```
    /// use teesheet::part::{SkinPart, SKIN_LAYOUT};
    ///
    /// let small = SKIN_LAYOUT.region_for(SkinPart::Body, 32).unwrap();
    /// let large = SKIN_LAYOUT.region_for(SkinPart::Body, 128).unwrap();
    /// assert_eq!((small.width, large.width), (96, 384));
    /// ```
    pub fn region_for(&self, tag: impl Into<PartTag>, unit: u32) -> Result<Rect> {
        Ok(self.spec(tag)?.cells.to_pixels(unit))
    }

    /// Whether `tag` belongs to this layout.
    pub fn contains(&self, tag: impl Into<PartTag>) -> bool {
        self.spec(tag).is_ok()
    }

    /// Unit size for a sheet of the given pixel size.
    ///
    /// Returns `None` unless the sheet is an exact whole-unit multiple of
    /// the grid on both axes.
    pub fn unit_for(&self, width: u32, height: u32) -> Option<u32> {
        let (columns, rows) = self.grid;
        if width == 0 || width % columns != 0 {
            return None;
        }
        let unit = width / columns;
        (height == unit * rows).then_some(unit)
    }

    /// All registered tags in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = PartTag> + '_ {
        self.parts.iter().map(|spec| spec.tag)
    }
}

/// Declare a closed tag enum with stable names, `ALL`, and `FromStr`.
macro_rules! part_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every tag, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Stable snake_case name.
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
                $name::ALL
                    .iter()
                    .copied()
                    .find(|tag| tag.name() == wanted)
                    .ok_or_else(|| format!("unknown {} '{}'", stringify!($name), s))
            }
        }
    };
}


pub mod gameskin;
pub mod skin;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_scales_with_unit() {
        for unit in [32, 64, 128] {
            let rect = SKIN_LAYOUT.region_for(SkinPart::Foot, unit).unwrap();
            assert_eq!(rect, Rect::new(6 * unit, unit, 2 * unit, unit));
        }
    }

    #[test]
    fn test_cross_kind_lookup_fails() {
        assert!(matches!(
            GAMESKIN_LAYOUT.region_for(SkinPart::Body, 32),
            Err(AssetError::UnknownPart { kind: "gameskin", .. })
        ));
        assert!(matches!(
            SKIN_LAYOUT.region_for(GameskinPart::Gun, 32),
            Err(AssetError::UnknownPart { kind: "skin", .. })
        ));
    }

    #[test]
    fn test_every_tag_registered_once() {
        for tag in SkinPart::ALL {
            assert_eq!(SKIN_LAYOUT.tags().filter(|t| *t == PartTag::from(*tag)).count(), 1, "{}", tag);
        }
        for tag in GameskinPart::ALL {
            assert_eq!(GAMESKIN_LAYOUT.tags().filter(|t| *t == PartTag::from(*tag)).count(), 1, "{}", tag);
        }
    }

    #[test]
    fn test_parts_fit_inside_grid() {
        for layout in [&SKIN_LAYOUT, &GAMESKIN_LAYOUT] {
            for spec in layout.parts {
                assert!(spec.cells.x + spec.cells.width <= layout.grid.0, "{}", spec.tag);
                assert!(spec.cells.y + spec.cells.height <= layout.grid.1, "{}", spec.tag);
            }
        }
    }

    #[test]
    fn test_unit_for_requires_exact_grid() {
        assert_eq!(SKIN_LAYOUT.unit_for(256, 128), Some(32));
        assert_eq!(SKIN_LAYOUT.unit_for(512, 256), Some(64));
        assert_eq!(SKIN_LAYOUT.unit_for(256, 129), None);
        assert_eq!(SKIN_LAYOUT.unit_for(250, 125), None);
        assert_eq!(GAMESKIN_LAYOUT.unit_for(1024, 512), Some(32));
        assert_eq!(GAMESKIN_LAYOUT.unit_for(4096, 2048), Some(128));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("gun".parse::<PartTag>().unwrap(), PartTag::Gameskin(GameskinPart::Gun));
        assert_eq!("SCARY-EYE".parse::<PartTag>().unwrap(), PartTag::Skin(SkinPart::ScaryEye));
        assert!("tail".parse::<PartTag>().is_err());
    }
}
