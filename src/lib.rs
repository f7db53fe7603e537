//! teesheet - Library for reading, editing and rendering game skin sheets
//!
//! This library provides functionality to:
//! - Load skin (character) and gameskin (weapon/UI) sprite sheets at any
//!   supported resolution
//! - Extract, replace, recolor and copy named parts between sheets
//! - Render a tee at any orientation, optionally holding a weapon
//! - Compose an overview board of a skin and a gameskin

pub mod asset;
pub mod board;
pub mod buffer;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod gameskin;
pub mod part;
pub mod render;
pub mod skin;

pub use asset::{Asset, AssetKind};
pub use board::{create_skin_overview, create_skin_overview_with, BoardCell, Overview};
pub use buffer::{PixelBuffer, Rect};
pub use color::{parse_color, Color, ColorError};
pub use error::{AssetError, Result};
pub use gameskin::{Gameskin, GameskinKind, WeaponAnchor};
pub use part::{GameskinPart, PartTag, SkinPart};
pub use render::{RenderResult, SkinWeapon, WeaponPlacement};
pub use skin::{Skin, SkinKind};
