//! Tee holding a weapon
//!
//! [`SkinWeapon`] borrows a skin and a gameskin and never mutates them, so
//! `process` can be called any number of times with identical output.

use tracing::debug;

use super::tee::{self, HAND_SHADOW_LAYER};
use super::{RenderResult, WeaponPlacement};
use crate::error::{AssetError, Result};
use crate::gameskin::Gameskin;
use crate::part::{GameskinPart, PartTag};
use crate::skin::Skin;

/// Builder for a weapon render.
///
/// ```no_run
/// use teesheet::{Gameskin, GameskinPart, Skin, SkinWeapon};
///
/// # fn main() -> teesheet::Result<()> {
/// let mut skin = Skin::new();
/// skin.load_from_path("default.png")?.set_orientation(30);
/// let mut gameskin = Gameskin::new();
/// gameskin.load_from_path("gameskin.png")?;
///
/// let render = SkinWeapon::new().skin(&skin).gameskin(&gameskin).weapon(GameskinPart::Grenade)?.process()?;
/// render.save_as("grenade.png", true)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SkinWeapon<'a> {
    skin: Option<&'a Skin>,
    gameskin: Option<&'a Gameskin>,
    weapon: Option<GameskinPart>,
}

impl<'a> SkinWeapon<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skin(mut self, skin: &'a Skin) -> Self {
        self.skin = Some(skin);
        self
    }

    pub fn gameskin(mut self, gameskin: &'a Gameskin) -> Self {
        self.gameskin = Some(gameskin);
        self
    }

    /// Select the weapon part; fails for any non-weapon tag.
    pub fn weapon(mut self, tag: impl Into<PartTag>) -> Result<Self> {
        let tag = tag.into();
        match tag {
            PartTag::Gameskin(weapon) if weapon.is_weapon() => {
                self.weapon = Some(weapon);
                Ok(self)
            }
            _ => Err(AssetError::InvalidPart { tag, reason: "not a weapon part" }),
        }
    }

    /// Render the skin at its orientation holding the weapon.
    pub fn process(&self) -> Result<RenderResult> {
        let skin = self.skin.ok_or(AssetError::Uninitialized("skin"))?;
        let gameskin = self.gameskin.ok_or(AssetError::Uninitialized("gameskin"))?;
        let weapon = self.weapon.ok_or(AssetError::Uninitialized("weapon"))?;
        let anchor = gameskin.weapon_anchor(weapon)?;

        let orientation = skin.orientation();
        let mut frame = tee::compose(skin, orientation)?;
        let (dir_x, dir_y) = frame.direction;
        // Perpendicular to the aim, pointing down when facing right
        let (side_x, side_y) = (-dir_y, dir_x);

        let hand_center = frame.hand_center;

        let cells = gameskin.layout().spec(weapon)?.cells;
        let width = (frame.px(cells.width as f32 * anchor.scale).round() as u32).max(1);
        let height = (frame.px(cells.height as f32 * anchor.scale).round() as u32).max(1);
        let mut sprite = gameskin.get_part(weapon)?.resampled(width, height)?;

        let (grip_x, mut grip_y) = anchor.grip;
        let (offset_x, mut offset_y) = anchor.offset;
        if frame.facing_left {
            sprite = sprite.flipped_vertical();
            grip_y = 1.0 - grip_y;
            offset_y = -offset_y;
        }
        let pivot = (grip_x * width as f32, grip_y * height as f32);
        let (sprite, pivot) = sprite.rotated(orientation as f32, pivot);

        let grip_point = (
            hand_center.0 + dir_x * frame.px(offset_x) + side_x * frame.px(offset_y),
            hand_center.1 + dir_y * frame.px(offset_x) + side_y * frame.px(offset_y),
        );
        let weapon_pos = ((grip_point.0 - pivot.0).round() as i32, (grip_point.1 - pivot.1).round() as i32);

        if anchor.behind_hand {
            frame.stack.insert_before(HAND_SHADOW_LAYER, "weapon", sprite, weapon_pos.0, weapon_pos.1);
        } else {
            frame.stack.push("weapon", sprite, weapon_pos.0, weapon_pos.1);
        }

        let (image, offset) = frame.stack.flatten_grown();
        let placement = WeaponPlacement {
            weapon,
            anchor: (grip_point.0.round() as i32 + offset.0, grip_point.1.round() as i32 + offset.1),
            rotation: orientation,
            behind_hand: anchor.behind_hand,
        };
        debug!(%weapon, orientation, width = image.width(), height = image.height(), "weapon rendered");
        Ok(RenderResult::new(image, orientation, Some(placement)))
    }
}
