//! Weapon and UI sheet parts
//!
//! Gameskins are laid out on a 32×16 grid (1024×512 at 1×).

use super::{CellRect, PartFlags, PartLayout, PartSpec, PartTag};

part_enum! {
    /// A named region of a gameskin sheet.
    GameskinPart {
        Hook => "hook",
        HookChain => "hook_chain",
        HammerCursor => "hammer_cursor",
        GunCursor => "gun_cursor",
        ShotgunCursor => "shotgun_cursor",
        GrenadeCursor => "grenade_cursor",
        NinjaCursor => "ninja_cursor",
        LaserCursor => "laser_cursor",
        Hammer => "hammer",
        Gun => "gun",
        Shotgun => "shotgun",
        Grenade => "grenade",
        Ninja => "ninja",
        Laser => "laser",
        GunAmmo => "gun_ammo",
        ShotgunAmmo => "shotgun_ammo",
        GrenadeAmmo => "grenade_ammo",
        LaserAmmo => "laser_ammo",
        GunParticle1 => "gun_particle_1",
        GunParticle2 => "gun_particle_2",
        GunParticle3 => "gun_particle_3",
        ShotgunParticle1 => "shotgun_particle_1",
        ShotgunParticle2 => "shotgun_particle_2",
        ShotgunParticle3 => "shotgun_particle_3",
        NinjaParticle1 => "ninja_particle_1",
        NinjaParticle2 => "ninja_particle_2",
        NinjaParticle3 => "ninja_particle_3",
        Heart => "heart",
        Shield => "shield",
        HealthFull => "health_full",
        HealthEmpty => "health_empty",
        ArmorFull => "armor_full",
        ArmorEmpty => "armor_empty",
        Star1 => "star_1",
        Star2 => "star_2",
        Star3 => "star_3",
        FlagBlue => "flag_blue",
        FlagRed => "flag_red",
    }
}

impl GameskinPart {
    /// Parts a tee can hold.
    pub const WEAPONS: &'static [GameskinPart] = &[
        GameskinPart::Hammer,
        GameskinPart::Gun,
        GameskinPart::Shotgun,
        GameskinPart::Grenade,
        GameskinPart::Ninja,
        GameskinPart::Laser,
    ];

    pub fn is_weapon(&self) -> bool {
        Self::WEAPONS.contains(self)
    }
}

const fn part(tag: GameskinPart, x: u32, y: u32, width: u32, height: u32) -> PartSpec {
    PartSpec { tag: PartTag::Gameskin(tag), cells: CellRect::new(x, y, width, height), flags: PartFlags::SHADED }
}

const fn flat(tag: GameskinPart, x: u32, y: u32, width: u32, height: u32) -> PartSpec {
    PartSpec { tag: PartTag::Gameskin(tag), cells: CellRect::new(x, y, width, height), flags: PartFlags::FLAT }
}

static GAMESKIN_PARTS: [PartSpec; 38] = [
    part(GameskinPart::Hook, 3, 0, 2, 1),
    flat(GameskinPart::HookChain, 2, 0, 1, 1),
    part(GameskinPart::HammerCursor, 0, 0, 2, 2),
    part(GameskinPart::GunCursor, 0, 4, 2, 2),
    part(GameskinPart::ShotgunCursor, 0, 6, 2, 2),
    part(GameskinPart::GrenadeCursor, 0, 8, 2, 2),
    part(GameskinPart::NinjaCursor, 0, 10, 2, 2),
    part(GameskinPart::LaserCursor, 0, 12, 2, 2),
    part(GameskinPart::Hammer, 2, 1, 4, 3),
    part(GameskinPart::Gun, 2, 4, 4, 2),
    part(GameskinPart::Shotgun, 2, 6, 8, 2),
    part(GameskinPart::Grenade, 2, 8, 7, 2),
    part(GameskinPart::Ninja, 2, 10, 8, 2),
    part(GameskinPart::Laser, 2, 12, 7, 3),
    part(GameskinPart::GunAmmo, 6, 4, 2, 2),
    part(GameskinPart::ShotgunAmmo, 10, 6, 2, 2),
    part(GameskinPart::GrenadeAmmo, 10, 8, 2, 2),
    part(GameskinPart::LaserAmmo, 10, 12, 2, 2),
    part(GameskinPart::GunParticle1, 8, 4, 4, 2),
    part(GameskinPart::GunParticle2, 12, 4, 4, 2),
    part(GameskinPart::GunParticle3, 16, 4, 4, 2),
    part(GameskinPart::ShotgunParticle1, 12, 6, 4, 2),
    part(GameskinPart::ShotgunParticle2, 16, 6, 4, 2),
    part(GameskinPart::ShotgunParticle3, 20, 6, 4, 2),
    part(GameskinPart::NinjaParticle1, 25, 0, 7, 4),
    part(GameskinPart::NinjaParticle2, 25, 4, 7, 4),
    part(GameskinPart::NinjaParticle3, 25, 8, 7, 4),
    part(GameskinPart::Heart, 10, 2, 2, 2),
    part(GameskinPart::Shield, 12, 2, 2, 2),
    part(GameskinPart::HealthFull, 21, 0, 2, 2),
    part(GameskinPart::HealthEmpty, 23, 0, 2, 2),
    part(GameskinPart::ArmorFull, 21, 2, 2, 2),
    part(GameskinPart::ArmorEmpty, 23, 2, 2, 2),
    part(GameskinPart::Star1, 15, 0, 2, 2),
    part(GameskinPart::Star2, 17, 0, 2, 2),
    part(GameskinPart::Star3, 19, 0, 2, 2),
    part(GameskinPart::FlagBlue, 12, 8, 4, 8),
    part(GameskinPart::FlagRed, 16, 8, 4, 8),
];

/// Layout of every gameskin sheet.
pub static GAMESKIN_LAYOUT: PartLayout = PartLayout { kind: "gameskin", grid: (32, 16), parts: &GAMESKIN_PARTS };
