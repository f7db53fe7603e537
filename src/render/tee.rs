//! Tee body, feet, hand and eye placement
//!
//! All positions are in skin units on a 4×4 unit canvas and are converted to
//! pixels with the skin's unit size, so one skin renders identically (up to
//! scale) at every resolution.

use tracing::debug;

use super::{aim_direction, is_facing_left, LayerStack};
use crate::error::Result;
use crate::part::SkinPart;
use crate::skin::Skin;

/// Canvas edge in skin units.
pub const CANVAS_UNITS: f32 = 4.0;

const BODY_POS: (f32, f32) = (0.5, 0.25);
const BODY_SIZE: f32 = 3.0;

/// Top-left of the back and front foot when facing right.
const BACK_FOOT_POS: (f32, f32) = (0.45, 2.4);
const FRONT_FOOT_POS: (f32, f32) = (1.55, 2.4);
const FOOT_WIDTH: f32 = 2.0;

/// Distance of the hand center from the body center, in skin units.
const HAND_REACH: f32 = 1.0;
const HAND_SIZE: f32 = 1.0;

/// Eye pair center relative to the body center, before the look shift.
const EYE_CENTER: (f32, f32) = (0.0, -0.3);
/// Horizontal distance of each eye from the pair center.
const EYE_SPREAD: f32 = 0.25;
/// Maximum look shift on each axis.
const EYE_LOOK: (f32, f32) = (0.3, 0.2);
const EYE_SIZE: f32 = 1.0;

/// Name of the first hand layer; weapons drawn behind the hand go here.
pub(crate) const HAND_SHADOW_LAYER: &str = "hand_shadow";

/// A composed tee plus the geometry later layers attach to.
#[derive(Debug, Clone)]
pub(crate) struct TeeFrame {
    pub stack: LayerStack,
    pub unit: u32,
    /// Body center in canvas pixels
    pub body_center: (f32, f32),
    /// Hand center in canvas pixels, along the look direction
    pub hand_center: (f32, f32),
    pub direction: (f32, f32),
    pub facing_left: bool,
}

impl TeeFrame {
    /// Convert a length in skin units to pixels.
    pub fn px(&self, units: f32) -> f32 {
        units * self.unit as f32
    }
}

fn round(v: f32) -> i32 {
    v.round() as i32
}

/// Build the tee layers for `skin` at a normalized `orientation`.
pub(crate) fn compose(skin: &Skin, orientation: u32) -> Result<TeeFrame> {
    let unit = skin.unit()?;
    let u = unit as f32;
    let canvas = (CANVAS_UNITS * u) as u32;
    let facing_left = is_facing_left(orientation);
    let direction = aim_direction(orientation);

    let mut stack = LayerStack::new(canvas, canvas);

    let body_x = round(BODY_POS.0 * u);
    let body_y = round(BODY_POS.1 * u);
    stack.push("body_shadow", skin.get_part(SkinPart::BodyShadow)?, body_x, body_y);
    stack.push("body", skin.get_part(SkinPart::Body)?, body_x, body_y);

    let mut foot_shadow = skin.get_part(SkinPart::FootShadow)?;
    let mut foot = skin.get_part(SkinPart::Foot)?;
    if facing_left {
        foot_shadow = foot_shadow.flipped_horizontal();
        foot = foot.flipped_horizontal();
    }
    let foot_positions = [BACK_FOOT_POS, FRONT_FOOT_POS].map(|(x, y)| {
        let x = if facing_left { CANVAS_UNITS - x - FOOT_WIDTH } else { x };
        (round(x * u), round(y * u))
    });
    for (x, y) in foot_positions {
        stack.push("foot_shadow", foot_shadow.clone(), x, y);
    }
    for (x, y) in foot_positions {
        stack.push("foot", foot.clone(), x, y);
    }

    let body_center = ((BODY_POS.0 + BODY_SIZE / 2.0) * u, (BODY_POS.1 + BODY_SIZE / 2.0) * u);

    let hand_center = (body_center.0 + direction.0 * HAND_REACH * u, body_center.1 + direction.1 * HAND_REACH * u);
    let mut hand_shadow = skin.get_part(SkinPart::HandShadow)?;
    let mut hand = skin.get_part(SkinPart::Hand)?;
    if facing_left {
        hand_shadow = hand_shadow.flipped_horizontal();
        hand = hand.flipped_horizontal();
    }
    let half_hand = HAND_SIZE / 2.0 * u;
    let (hand_x, hand_y) = (round(hand_center.0 - half_hand), round(hand_center.1 - half_hand));
    stack.push(HAND_SHADOW_LAYER, hand_shadow, hand_x, hand_y);
    stack.push("hand", hand, hand_x, hand_y);

    let eyes_x = body_center.0 + (EYE_CENTER.0 + direction.0 * EYE_LOOK.0) * u;
    let eyes_y = body_center.1 + (EYE_CENTER.1 + direction.1 * EYE_LOOK.1) * u;
    let half_eye = EYE_SIZE / 2.0 * u;

    let eye = skin.get_part(skin.eye())?;
    let mirrored = eye.flipped_horizontal();
    stack.push("eye", eye, round(eyes_x - EYE_SPREAD * u - half_eye), round(eyes_y - half_eye));
    stack.push("eye", mirrored, round(eyes_x + EYE_SPREAD * u - half_eye), round(eyes_y - half_eye));

    debug!(orientation, facing_left, layers = stack.len(), "tee composed");
    Ok(TeeFrame { stack, unit, body_center, hand_center, direction, facing_left })
}
