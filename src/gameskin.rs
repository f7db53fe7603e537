//! Weapon and UI sheets
//!
//! A [`Gameskin`] is an [`Asset`] over the 32×16 gameskin grid. On top of
//! the generic part operations it can dump parts into a save directory and
//! carries the anchor table used to put a weapon into a tee's hand.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::asset::{part_file_path, Asset, AssetKind};
use crate::error::{AssetError, Result};
use crate::part::{GameskinPart, PartLayout, PartTag, GAMESKIN_LAYOUT};

/// Per-gameskin state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameskinKind {
    part_dir: Option<PathBuf>,
}

impl AssetKind for GameskinKind {
    const NAME: &'static str = "gameskin";

    fn layout() -> &'static PartLayout {
        &GAMESKIN_LAYOUT
    }
}

/// A weapon/UI sheet.
pub type Gameskin = Asset<GameskinKind>;

/// How a weapon sprite sits in the hand.
///
/// Lengths are in skin units and measured in the aim frame: `offset.0`
/// along the aim direction, `offset.1` perpendicular to it (positive is
/// below the aim line when facing right).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponAnchor {
    pub weapon: GameskinPart,
    /// Grip position relative to the hand center
    pub offset: (f32, f32),
    /// Grip pivot inside the sprite, as fractions of its width and height
    pub grip: (f32, f32),
    /// Sprite size in skin units per gameskin cell
    pub scale: f32,
    /// Draw the weapon before the hand
    pub behind_hand: bool,
}

const fn anchor(weapon: GameskinPart, offset: (f32, f32), grip: (f32, f32), scale: f32, behind_hand: bool) -> WeaponAnchor {
    WeaponAnchor { weapon, offset, grip, scale, behind_hand }
}

static WEAPON_ANCHORS: [WeaponAnchor; 6] = [
    anchor(GameskinPart::Hammer, (0.1, -0.3), (0.2, 0.75), 0.75, false),
    anchor(GameskinPart::Gun, (0.15, 0.05), (0.25, 0.55), 0.5, true),
    anchor(GameskinPart::Shotgun, (0.2, 0.05), (0.3, 0.5), 0.5, true),
    anchor(GameskinPart::Grenade, (0.2, 0.05), (0.3, 0.5), 0.5, true),
    anchor(GameskinPart::Ninja, (0.0, 0.0), (0.1, 0.5), 0.5, false),
    anchor(GameskinPart::Laser, (0.2, 0.05), (0.3, 0.45), 0.5, true),
];

/// Anchor data for a weapon part.
pub fn weapon_anchor(weapon: GameskinPart) -> Result<&'static WeaponAnchor> {
    WEAPON_ANCHORS
        .iter()
        .find(|a| a.weapon == weapon)
        .ok_or(AssetError::InvalidPart { tag: PartTag::Gameskin(weapon), reason: "not a weapon part" })
}

impl Asset<GameskinKind> {
    /// Directory used by [`save_part`](Self::save_part). Defaults to the
    /// working directory.
    pub fn set_part_save_directory(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.state_mut().part_dir = Some(dir.into());
        self
    }

    pub fn part_save_directory(&self) -> &Path {
        self.state().part_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// File a part is written to by [`save_part`](Self::save_part).
    pub fn part_path(&self, tag: impl Into<PartTag>) -> PathBuf {
        part_file_path(self.part_save_directory(), tag.into())
    }

    /// Save one part as `<part dir>/<name>.png`.
    pub fn save_part(&self, tag: impl Into<PartTag>) -> Result<&Self> {
        self.save_part_to(self.part_save_directory(), tag)?;
        Ok(self)
    }

    /// Save several parts; stops at the first failure.
    pub fn save_parts<T>(&self, tags: &[T]) -> Result<&Self>
    where
        T: Into<PartTag> + Copy,
    {
        for tag in tags {
            self.save_part(*tag)?;
        }
        info!(count = tags.len(), dir = %self.part_save_directory().display(), "gameskin parts saved");
        Ok(self)
    }

    /// Anchor data for a weapon part of this gameskin.
    pub fn weapon_anchor(&self, weapon: GameskinPart) -> Result<&'static WeaponAnchor> {
        weapon_anchor(weapon)
    }
}
