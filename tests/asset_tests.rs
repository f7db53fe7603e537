//! Integration tests for sheet loading, part editing and rendering
//!
//! Sheets are synthesized in memory and written to temporary directories;
//! no binary fixtures are checked in.

use image::Rgba;
use sha2::{Digest, Sha256};
use tempfile::TempDir;

use teesheet::{
    create_skin_overview, AssetError, Color, Gameskin, GameskinPart, PixelBuffer, Skin, SkinPart, SkinWeapon,
};

/// Sheet with a distinct color per grid cell, so copied parts are traceable.
fn cell_pattern(columns: u32, rows: u32, unit: u32, seed: u8) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(columns * unit, rows * unit);
    for y in 0..rows * unit {
        for x in 0..columns * unit {
            let (cx, cy) = (x / unit, y / unit);
            let pixel = Rgba([(cx * 7) as u8 ^ seed, (cy * 31) as u8, seed, 255]);
            buffer.put_pixel(x, y, pixel);
        }
    }
    buffer
}

fn skin_sheet(unit: u32, seed: u8) -> PixelBuffer {
    cell_pattern(8, 4, unit, seed)
}

fn gameskin_sheet(unit: u32, seed: u8) -> PixelBuffer {
    cell_pattern(32, 16, unit, seed)
}

/// Sheet made of 4×4 pixel blocks with slowly varying colors.
fn block_pattern(columns: u32, rows: u32, unit: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(columns * unit, rows * unit);
    for y in 0..rows * unit {
        for x in 0..columns * unit {
            let (bx, by) = (x / 4, y / 4);
            buffer.put_pixel(x, y, Rgba([(bx % 256) as u8, (by % 256) as u8, ((bx + by) % 256) as u8, 255]));
        }
    }
    buffer
}

/// Largest per-channel difference between two same-sized buffers.
fn max_channel_diff(a: &PixelBuffer, b: &PixelBuffer) -> u8 {
    assert_eq!(a.dimensions(), b.dimensions());
    a.as_image()
        .as_raw()
        .iter()
        .zip(b.as_image().as_raw())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}

fn write_png(dir: &TempDir, name: &str, buffer: &PixelBuffer) -> std::path::PathBuf {
    let path = dir.path().join(name);
    buffer.save_png(&path, false).expect("should write fixture");
    path
}

fn digest(buffer: &PixelBuffer) -> Vec<u8> {
    Sha256::digest(buffer.as_image().as_raw()).to_vec()
}

#[test]
fn test_save_then_reload_is_identical() {
    let temp = TempDir::new().unwrap();
    let source = write_png(&temp, "gameskin.png", &gameskin_sheet(32, 3));

    let mut gameskin = Gameskin::new();
    gameskin.load_from_path(&source).unwrap();
    let copy = temp.path().join("copy.png");
    gameskin.save_as(&copy, false).unwrap();

    let mut reloaded = Gameskin::new();
    reloaded.load_from_path(&copy).unwrap();
    assert_eq!(gameskin.buffer().unwrap(), reloaded.buffer().unwrap());
}

#[test]
fn test_save_refuses_overwrite() {
    let temp = TempDir::new().unwrap();
    let path = write_png(&temp, "skin.png", &skin_sheet(32, 1));
    let mut skin = Skin::new();
    skin.load_from_path(&path).unwrap();
    assert!(matches!(skin.save_as(&path, false), Err(AssetError::FileExists(_))));
    skin.save_as(&path, true).unwrap();
}

#[test]
fn test_save_gun_and_grenade_parts() {
    let temp = TempDir::new().unwrap();
    let mut gameskin = Gameskin::from_buffer(gameskin_sheet(64, 5)).unwrap();
    gameskin.set_part_save_directory(temp.path().join("out"));

    gameskin.save_parts(&[GameskinPart::Gun, GameskinPart::Grenade]).unwrap();
    for tag in [GameskinPart::Gun, GameskinPart::Grenade] {
        let bytes = std::fs::read(gameskin.part_path(tag)).unwrap();
        assert!(!bytes.is_empty());
        let part = PixelBuffer::decode(&bytes).unwrap();
        assert_eq!(&part, &gameskin.get_part(tag).unwrap());
    }
}

#[test]
fn test_copy_bigger_into_smaller() {
    let big = Gameskin::from_buffer(gameskin_sheet(128, 9)).unwrap();
    let mut small = Gameskin::from_buffer(gameskin_sheet(32, 1)).unwrap();

    small.copy_parts(&big, &[GameskinPart::Hammer, GameskinPart::Grenade]).unwrap();

    // Each cell is flat, so downsampling keeps cell colors exactly
    let expected = big.get_part(GameskinPart::Hammer).unwrap().resampled(128, 96).unwrap();
    assert_eq!(small.get_part(GameskinPart::Hammer).unwrap(), expected);
    let grenade = small.region_for(GameskinPart::Grenade).unwrap();
    assert_eq!(
        small.buffer().unwrap().pixel(grenade.x, grenade.y),
        big.buffer().unwrap().pixel(2 * 128, 8 * 128)
    );
}

#[test]
fn test_copy_smaller_into_bigger() {
    let small = Gameskin::from_buffer(gameskin_sheet(32, 4)).unwrap();
    let mut big = Gameskin::from_buffer(gameskin_sheet(128, 8)).unwrap();
    let untouched = big.get_part(GameskinPart::Shotgun).unwrap();

    big.copy_part(&small, GameskinPart::Gun).unwrap();

    let gun = big.region_for(GameskinPart::Gun).unwrap();
    assert_eq!(big.buffer().unwrap().pixel(gun.x + 5, gun.y + 5), small.buffer().unwrap().pixel(2 * 32, 4 * 32));
    assert_eq!(big.get_part(GameskinPart::Shotgun).unwrap(), untouched);
}

#[test]
fn test_copy_down_and_back_up_preserves_parts() {
    let original = Gameskin::from_buffer(block_pattern(32, 16, 128)).unwrap();
    let mut small = Gameskin::from_buffer(gameskin_sheet(32, 1)).unwrap();
    small.copy_parts(&original, GameskinPart::ALL).unwrap();

    let mut restored = Gameskin::from_buffer(gameskin_sheet(128, 2)).unwrap();
    restored.copy_parts(&small, GameskinPart::ALL).unwrap();

    for tag in GameskinPart::ALL {
        let diff = max_channel_diff(&original.get_part(*tag).unwrap(), &restored.get_part(*tag).unwrap());
        assert!(diff <= 2, "{} differs by {}", tag, diff);
    }
}

#[test]
fn test_copy_up_and_back_down_preserves_parts() {
    let original = Skin::from_buffer(block_pattern(8, 4, 32)).unwrap();
    let mut big = Skin::from_buffer(skin_sheet(128, 3)).unwrap();
    big.copy_parts(&original, SkinPart::ALL).unwrap();

    let mut restored = Skin::from_buffer(skin_sheet(32, 4)).unwrap();
    restored.copy_parts(&big, SkinPart::ALL).unwrap();

    for tag in SkinPart::ALL {
        let diff = max_channel_diff(&original.get_part(*tag).unwrap(), &restored.get_part(*tag).unwrap());
        assert!(diff <= 2, "{} differs by {}", tag, diff);
    }
}

#[test]
fn test_get_then_set_every_gameskin_part() {
    let mut gameskin = Gameskin::from_buffer(block_pattern(32, 16, 64)).unwrap();
    let before = gameskin.buffer().unwrap().clone();
    for tag in GameskinPart::ALL {
        let part = gameskin.get_part(*tag).unwrap();
        gameskin.set_part(*tag, &part).unwrap();
    }
    assert_eq!(gameskin.buffer().unwrap(), &before);
}

#[test]
fn test_copy_skin_parts_across_resolutions() {
    let source = Skin::from_buffer(skin_sheet(64, 2)).unwrap();
    let mut target = Skin::from_buffer(skin_sheet(32, 6)).unwrap();
    target.copy_parts(&source, &[SkinPart::Body, SkinPart::AngryEye]).unwrap();
    assert_eq!(
        target.get_part(SkinPart::AngryEye).unwrap(),
        source.get_part(SkinPart::AngryEye).unwrap().resampled(32, 32).unwrap()
    );
}

#[test]
fn test_color_tee_only_changes_body_and_feet() {
    let mut skin = Skin::from_buffer(skin_sheet(32, 7)).unwrap();
    let before = skin.buffer().unwrap().clone();
    let color = Color::rgb(255, 0, 0);
    skin.color_tee(color, color).unwrap();

    let body = skin.region_for(SkinPart::Body).unwrap();
    let foot = skin.region_for(SkinPart::Foot).unwrap();
    let after = skin.buffer().unwrap();
    for y in 0..128 {
        for x in 0..256 {
            if !body.contains(x, y) && !foot.contains(x, y) {
                assert_eq!(before.pixel(x, y), after.pixel(x, y), "pixel {},{} outside tee parts changed", x, y);
            }
        }
    }
}

#[test]
fn test_render_is_deterministic() {
    let mut skin = Skin::from_buffer(skin_sheet(64, 11)).unwrap();
    skin.set_orientation(75).set_eye_asset_part(SkinPart::ScaryEye).unwrap();

    let first = skin.render().unwrap();
    let second = skin.render().unwrap();
    assert_eq!(digest(first.image()), digest(second.image()));
    assert_eq!(first.image().dimensions(), (256, 256));
}

#[test]
fn test_save_render_uses_prefix() {
    let temp = TempDir::new().unwrap();
    let skin = Skin::from_buffer(skin_sheet(32, 12)).unwrap();
    let saved = skin.save_render_as(temp.path().join("tee.png")).unwrap();
    assert_eq!(saved, temp.path().join("render_tee.png"));
    assert!(saved.exists());

    // The prefixed file is never overwritten
    assert!(matches!(skin.save_render_as(temp.path().join("tee.png")), Err(AssetError::FileExists(_))));
}

#[test]
fn test_weapon_render_is_repeatable_for_every_weapon() {
    let mut skin = Skin::from_buffer(skin_sheet(32, 13)).unwrap();
    let gameskin = Gameskin::from_buffer(gameskin_sheet(32, 14)).unwrap();

    for degrees in [0, 60, 180, 300] {
        skin.set_orientation(degrees);
        for weapon in GameskinPart::WEAPONS {
            let builder = SkinWeapon::new().skin(&skin).gameskin(&gameskin).weapon(*weapon).unwrap();
            let first = builder.process().unwrap();
            let second = builder.process().unwrap();
            assert_eq!(digest(first.image()), digest(second.image()), "{} at {}", weapon, degrees);
            assert_eq!(first.weapon().map(|w| w.weapon), Some(*weapon));
        }
    }
}

#[test]
fn test_weapon_with_mixed_resolutions() {
    let skin = Skin::from_buffer(skin_sheet(128, 15)).unwrap();
    let gameskin = Gameskin::from_buffer(gameskin_sheet(32, 16)).unwrap();
    let render = SkinWeapon::new().skin(&skin).gameskin(&gameskin).weapon(GameskinPart::Grenade).unwrap().process();
    assert!(render.is_ok());
}

#[test]
fn test_board_from_loaded_files() {
    let temp = TempDir::new().unwrap();
    let skin_path = write_png(&temp, "skin.png", &skin_sheet(32, 17));
    let gameskin_path = write_png(&temp, "gameskin.png", &gameskin_sheet(32, 18));

    let mut skin = Skin::new();
    skin.load_from_url(&format!("file://{}", skin_path.display())).unwrap();
    let mut gameskin = Gameskin::new();
    gameskin.load_from_path(&gameskin_path).unwrap();

    let board = create_skin_overview(&skin, &gameskin).unwrap();
    let out = temp.path().join("board.png");
    board.save_as(&out, false).unwrap();
    board.save_legend(temp.path().join("board.json")).unwrap();

    let reloaded = PixelBuffer::decode(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!(&reloaded, board.image());
    assert!(board.cell("flag_red").is_some());
}

#[test]
fn test_off_grid_sheet_is_rejected() {
    let mut gameskin = Gameskin::new();
    let bytes = PixelBuffer::new(1000, 500).encode_png().unwrap();
    assert!(matches!(gameskin.load_from_bytes(&bytes), Err(AssetError::InvalidDimensions { kind: "gameskin", .. })));
    assert!(!gameskin.is_loaded());
}
