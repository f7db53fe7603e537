//! Render, weapon and board command implementations

use std::path::Path;
use std::process::ExitCode;

use crate::board::create_skin_overview_with;
use crate::color::Color;
use crate::config::TeesheetConfig;
use crate::gameskin::Gameskin;
use crate::part::PartTag;
use crate::render::SkinWeapon;
use crate::skin::Skin;

use super::{EXIT_ERROR, EXIT_SUCCESS};

fn finish(result: Result<String, Box<dyn std::error::Error>>) -> ExitCode {
    match result {
        Ok(message) => {
            println!("{}", message);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load a skin and apply the configured orientation and eye.
fn load_skin(path: &Path, config: &TeesheetConfig) -> Result<Skin, Box<dyn std::error::Error>> {
    let eye = config.eye()?;
    let mut skin = Skin::new();
    skin.load_from_path(path)?.set_orientation(config.render.orientation).set_eye_asset_part(eye)?;
    Ok(skin)
}

/// Execute the render command
pub fn run_render(
    skin_path: &Path,
    output: Option<&Path>,
    colors: Option<(Color, Color)>,
    config: &TeesheetConfig,
) -> ExitCode {
    finish(render_skin(skin_path, output, colors, config))
}

fn render_skin(
    skin_path: &Path,
    output: Option<&Path>,
    colors: Option<(Color, Color)>,
    config: &TeesheetConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut skin = load_skin(skin_path, config)?;
    if let Some((body, feet)) = colors {
        skin.color_tee(body, feet)?;
    }

    let saved = match output {
        Some(path) => {
            skin.render()?.save_as(path, config.output.overwrite)?;
            path.to_path_buf()
        }
        None => skin.save_render_as(skin_path)?,
    };
    Ok(format!("Rendered {} at {} degrees", saved.display(), skin.orientation()))
}

/// Execute the weapon command
pub fn run_weapon(skin_path: &Path, gameskin_path: &Path, weapon: PartTag, output: &Path, config: &TeesheetConfig) -> ExitCode {
    finish(render_weapon(skin_path, gameskin_path, weapon, output, config))
}

fn render_weapon(
    skin_path: &Path,
    gameskin_path: &Path,
    weapon: PartTag,
    output: &Path,
    config: &TeesheetConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let skin = load_skin(skin_path, config)?;
    let mut gameskin = Gameskin::new();
    gameskin.load_from_path(gameskin_path)?;

    let render = SkinWeapon::new().skin(&skin).gameskin(&gameskin).weapon(weapon)?.process()?;
    render.save_as(output, config.output.overwrite)?;
    Ok(format!("Rendered {} holding {}", output.display(), weapon))
}

/// Execute the board command
pub fn run_board(
    skin_path: &Path,
    gameskin_path: &Path,
    output: &Path,
    legend: Option<&Path>,
    config: &TeesheetConfig,
) -> ExitCode {
    finish(compose_board(skin_path, gameskin_path, output, legend, config))
}

fn compose_board(
    skin_path: &Path,
    gameskin_path: &Path,
    output: &Path,
    legend: Option<&Path>,
    config: &TeesheetConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let skin = load_skin(skin_path, config)?;
    let mut gameskin = Gameskin::new();
    gameskin.load_from_path(gameskin_path)?;

    let board = create_skin_overview_with(&skin, &gameskin, &config.board)?;
    board.save_as(output, config.output.overwrite)?;
    if let Some(legend) = legend {
        board.save_legend(legend)?;
    }
    let (width, height) = board.image().dimensions();
    Ok(format!("Board {} ({}x{}, {} cells)", output.display(), width, height, board.cells().len()))
}
