//! Overview board of a skin and a gameskin
//!
//! The board is a grid of square cells, each the size of one tee render.
//! The first section holds renders of the skin (its own orientation, then
//! the eight compass directions); the second holds every gameskin part,
//! scaled to fit its cell. A JSON legend names every cell.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::Rgba;
use serde::Serialize;
use tracing::info;

use crate::buffer::PixelBuffer;
use crate::config::BoardConfig;
use crate::error::Result;
use crate::gameskin::Gameskin;
use crate::part::GameskinPart;
use crate::skin::Skin;

/// Compass orientations rendered after the skin's own orientation.
pub const BOARD_ORIENTATIONS: [i32; 8] = [0, 45, 90, 135, 180, 225, 270, 315];

/// One labeled board cell, in board pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardCell {
    pub label: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize)]
struct Legend<'a> {
    cell_size: u32,
    columns: u32,
    cells: &'a [BoardCell],
}

/// A composed overview board.
#[derive(Debug, Clone)]
pub struct Overview {
    image: PixelBuffer,
    cell_size: u32,
    columns: u32,
    cells: Vec<BoardCell>,
}

impl Overview {
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn into_image(self) -> PixelBuffer {
        self.image
    }

    pub fn cells(&self) -> &[BoardCell] {
        &self.cells
    }

    /// Cell with the given label.
    pub fn cell(&self, label: &str) -> Option<&BoardCell> {
        self.cells.iter().find(|cell| cell.label == label)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Encode the board as PNG at `path`.
    pub fn save_as(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<&Self> {
        self.image.save_png(path.as_ref(), overwrite)?;
        Ok(self)
    }

    /// Write the cell labels as pretty JSON.
    pub fn save_legend(&self, path: impl AsRef<Path>) -> Result<()> {
        let legend = Legend { cell_size: self.cell_size, columns: self.columns, cells: &self.cells };
        let json = serde_json::to_string_pretty(&legend)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Build a board with the default layout.
pub fn create_skin_overview(skin: &Skin, gameskin: &Gameskin) -> Result<Overview> {
    create_skin_overview_with(skin, gameskin, &BoardConfig::default())
}

/// Build a board with an explicit layout. Neither asset is modified.
pub fn create_skin_overview_with(skin: &Skin, gameskin: &Gameskin, config: &BoardConfig) -> Result<Overview> {
    let columns = config.columns.max(1);
    let padding = config.padding;

    let mut renders = Vec::with_capacity(BOARD_ORIENTATIONS.len() + 1);
    renders.push(("render_current".to_string(), skin.render()?.into_image()));
    for degrees in BOARD_ORIENTATIONS {
        renders.push((format!("render_{}", degrees), skin.render_at(degrees)?.into_image()));
    }
    let cell_size = renders.iter().map(|(_, image)| image.width().max(image.height())).max().unwrap_or(1);

    let mut swatches = Vec::with_capacity(GameskinPart::ALL.len());
    for part in GameskinPart::ALL {
        let image = gameskin.get_part(*part)?;
        swatches.push((part.name().to_string(), fit_into(&image, cell_size)));
    }

    let render_rows = (renders.len() as u32).div_ceil(columns);
    let part_rows = (swatches.len() as u32).div_ceil(columns);
    let stride = cell_size + padding;
    let width = columns * stride + padding;
    let height = (render_rows + part_rows) * stride + padding;

    let mut image = PixelBuffer::filled(width, height, Rgba(config.background));
    let frame = Rgba(config.frame);
    let mut cells = Vec::with_capacity(renders.len() + swatches.len());

    let sections = [(0, renders), (render_rows, swatches)];
    for (first_row, items) in sections {
        for (i, (label, item)) in items.into_iter().enumerate() {
            let i = i as u32;
            let x = padding + (i % columns) * stride;
            let y = padding + (first_row + i / columns) * stride;
            if padding > 0 {
                draw_frame(&mut image, x, y, cell_size, frame);
            }
            let inset_x = (cell_size - item.width()) / 2;
            let inset_y = (cell_size - item.height()) / 2;
            image.blit(&item, (x + inset_x) as i32, (y + inset_y) as i32);
            cells.push(BoardCell { label, x, y, width: cell_size, height: cell_size });
        }
    }

    info!(width, height, cells = cells.len(), "overview composed");
    Ok(Overview { image, cell_size, columns, cells })
}

/// Scale `image` to fit a `size`×`size` square, keeping its aspect ratio.
///
/// Display scaling only, so any ratio is allowed.
fn fit_into(image: &PixelBuffer, size: u32) -> PixelBuffer {
    let (w, h) = image.dimensions();
    let scale = (size as f32 / w as f32).min(size as f32 / h as f32);
    let width = ((w as f32 * scale).round() as u32).clamp(1, size);
    let height = ((h as f32 * scale).round() as u32).clamp(1, size);
    let filter = if width >= w && height >= h { FilterType::Nearest } else { FilterType::Triangle };
    PixelBuffer::from_image(imageops::resize(image.as_image(), width, height, filter))
}

/// One-pixel ring just outside the cell at `(x, y)`.
fn draw_frame(image: &mut PixelBuffer, x: u32, y: u32, size: u32, color: Rgba<u8>) {
    let (left, top) = (x - 1, y - 1);
    let (right, bottom) = (x + size, y + size);
    for px in left..=right {
        image.put_pixel(px, top, color);
        image.put_pixel(px, bottom, color);
    }
    for py in top..=bottom {
        image.put_pixel(left, py, color);
        image.put_pixel(right, py, color);
    }
}
