//! Character sheet parts
//!
//! Skins are laid out on an 8×4 grid (256×128 at 1×).

use super::{CellRect, PartFlags, PartLayout, PartSpec, PartTag};

part_enum! {
    /// A named region of a skin sheet.
    SkinPart {
        Body => "body",
        BodyShadow => "body_shadow",
        Hand => "hand",
        HandShadow => "hand_shadow",
        Foot => "foot",
        FootShadow => "foot_shadow",
        DefaultEye => "default_eye",
        AngryEye => "angry_eye",
        BlinkEye => "blink_eye",
        HappyEye => "happy_eye",
        CrossEye => "cross_eye",
        ScaryEye => "scary_eye",
    }
}

impl SkinPart {
    /// The six eye variants.
    pub const EYES: &'static [SkinPart] = &[
        SkinPart::DefaultEye,
        SkinPart::AngryEye,
        SkinPart::BlinkEye,
        SkinPart::HappyEye,
        SkinPart::CrossEye,
        SkinPart::ScaryEye,
    ];

    pub fn is_eye(&self) -> bool {
        Self::EYES.contains(self)
    }
}

const fn part(tag: SkinPart, cells: CellRect, flags: PartFlags) -> PartSpec {
    PartSpec { tag: PartTag::Skin(tag), cells, flags }
}

const fn eye(tag: SkinPart, column: u32) -> PartSpec {
    part(tag, CellRect::new(column, 3, 1, 1), PartFlags::MIRRORED)
}

static SKIN_PARTS: [PartSpec; 12] = [
    part(SkinPart::Body, CellRect::new(0, 0, 3, 3), PartFlags::SHADED),
    part(SkinPart::BodyShadow, CellRect::new(3, 0, 3, 3), PartFlags::FLAT),
    part(SkinPart::Hand, CellRect::new(6, 0, 1, 1), PartFlags::MIRRORED),
    part(SkinPart::HandShadow, CellRect::new(7, 0, 1, 1), PartFlags::FLAT_MIRRORED),
    part(SkinPart::Foot, CellRect::new(6, 1, 2, 1), PartFlags::MIRRORED),
    part(SkinPart::FootShadow, CellRect::new(6, 2, 2, 1), PartFlags::FLAT_MIRRORED),
    eye(SkinPart::DefaultEye, 2),
    eye(SkinPart::AngryEye, 3),
    eye(SkinPart::BlinkEye, 4),
    eye(SkinPart::HappyEye, 5),
    eye(SkinPart::CrossEye, 6),
    eye(SkinPart::ScaryEye, 7),
];

/// Layout of every skin sheet.
pub static SKIN_LAYOUT: PartLayout = PartLayout { kind: "skin", grid: (8, 4), parts: &SKIN_PARTS };
