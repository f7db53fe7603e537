//! Character skins
//!
//! A [`Skin`] is an [`Asset`] over the 8×4 skin grid with three pieces of
//! render state: the orientation, the selected eye and the last tee colors.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::asset::{Asset, AssetKind};
use crate::color::Color;
use crate::error::{AssetError, Result};
use crate::part::{PartLayout, PartTag, SkinPart, SKIN_LAYOUT};
use crate::render::{normalize_orientation, tee, RenderResult};

/// Per-skin render state.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinKind {
    orientation: u32,
    eye: SkinPart,
    tee_colors: Option<(Color, Color)>,
}

impl Default for SkinKind {
    fn default() -> Self {
        Self { orientation: 0, eye: SkinPart::DefaultEye, tee_colors: None }
    }
}

impl AssetKind for SkinKind {
    const NAME: &'static str = "skin";

    fn layout() -> &'static PartLayout {
        &SKIN_LAYOUT
    }
}

/// A character sheet.
pub type Skin = Asset<SkinKind>;

impl Asset<SkinKind> {
    /// Set the facing angle in degrees. Any integer is accepted and stored
    /// modulo 360.
    pub fn set_orientation(&mut self, degrees: i32) -> &mut Self {
        self.state_mut().orientation = normalize_orientation(degrees);
        self
    }

    /// Facing angle in `0..360`, counterclockwise from facing right.
    pub fn orientation(&self) -> u32 {
        self.state().orientation
    }

    /// Select the eye variant drawn by renders.
    pub fn set_eye_asset_part(&mut self, tag: impl Into<PartTag>) -> Result<&mut Self> {
        let tag = tag.into();
        match tag {
            PartTag::Skin(eye) if eye.is_eye() => {
                self.state_mut().eye = eye;
                Ok(self)
            }
            _ => Err(AssetError::InvalidPart { tag, reason: "not an eye part" }),
        }
    }

    pub fn eye(&self) -> SkinPart {
        self.state().eye
    }

    /// Tint the body and the feet, keeping their shading.
    ///
    /// Only the body and foot regions change; shadows, hands and eyes keep
    /// their pixels.
    pub fn color_tee(&mut self, body: Color, feet: Color) -> Result<&mut Self> {
        self.unit()?;
        self.color_part(body, SkinPart::Body)?.color_part(feet, SkinPart::Foot)?;
        self.state_mut().tee_colors = Some((body, feet));
        debug!(%body, %feet, "tee colored");
        Ok(self)
    }

    /// [`color_tee`](Self::color_tee) with one color for body and feet.
    pub fn color_tee_single(&mut self, color: Color) -> Result<&mut Self> {
        self.color_tee(color, color)
    }

    /// Colors passed to the last successful `color_tee`.
    pub fn tee_colors(&self) -> Option<(Color, Color)> {
        self.state().tee_colors
    }

    /// Render the tee at the current orientation.
    pub fn render(&self) -> Result<RenderResult> {
        self.render_at(self.orientation() as i32)
    }

    /// Render the tee at `degrees` without changing the stored orientation.
    pub fn render_at(&self, degrees: i32) -> Result<RenderResult> {
        let orientation = normalize_orientation(degrees);
        let frame = tee::compose(self, orientation)?;
        Ok(RenderResult::new(frame.stack.flatten(), orientation, None))
    }

    /// Render and save next to `path` as `render_<file name>`.
    ///
    /// Never overwrites.
    pub fn save_render_as(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.render()?.save_render_as(path)
    }
}
