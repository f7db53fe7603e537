//! Extract command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::TeesheetConfig;
use crate::gameskin::Gameskin;
use crate::part::PartTag;
use crate::skin::Skin;

use super::{SheetKind, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the extract command
pub fn run_extract(input: &Path, kind: SheetKind, parts: &[PartTag], config: &TeesheetConfig) -> ExitCode {
    let dir = &config.output.part_dir;
    let saved = match kind {
        SheetKind::Skin => extract_skin(input, parts, dir),
        SheetKind::Gameskin => extract_gameskin(input, parts, dir),
    };

    match saved {
        Ok(paths) => {
            for path in &paths {
                println!("Saved {}", path.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn extract_skin(input: &Path, parts: &[PartTag], dir: &Path) -> crate::Result<Vec<std::path::PathBuf>> {
    let mut skin = Skin::new();
    skin.load_from_path(input)?;
    let tags: Vec<PartTag> = if parts.is_empty() { skin.layout().tags().collect() } else { parts.to_vec() };
    tags.iter().map(|tag| skin.save_part_to(dir, *tag)).collect()
}

fn extract_gameskin(input: &Path, parts: &[PartTag], dir: &Path) -> crate::Result<Vec<std::path::PathBuf>> {
    let mut gameskin = Gameskin::new();
    gameskin.load_from_path(input)?.set_part_save_directory(dir);
    let tags: Vec<PartTag> = if parts.is_empty() { gameskin.layout().tags().collect() } else { parts.to_vec() };
    gameskin.save_parts(&tags)?;
    Ok(tags.iter().map(|tag| gameskin.part_path(*tag)).collect())
}
