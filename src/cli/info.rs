//! Info command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::asset::{Asset, AssetKind};
use crate::gameskin::GameskinKind;
use crate::skin::SkinKind;

use super::{display_name, expand_inputs, SheetKind, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the info command
pub fn run_info(inputs: &[String], kind: SheetKind, parts: bool) -> ExitCode {
    let files = match expand_inputs(inputs) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut failed = false;
    for file in &files {
        let described = match kind {
            SheetKind::Skin => describe::<SkinKind>(file, parts),
            SheetKind::Gameskin => describe::<GameskinKind>(file, parts),
        };
        if let Err(e) = described {
            eprintln!("Error: {}: {}", file.display(), e);
            failed = true;
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn describe<K: AssetKind>(path: &Path, parts: bool) -> crate::Result<()> {
    let mut asset = Asset::<K>::new();
    asset.load_from_path(path)?;
    let (width, height) = asset.buffer()?.dimensions();
    println!("{}: {} {}x{}, unit {}px", display_name(path), K::NAME, width, height, asset.unit()?);

    if parts {
        for tag in asset.layout().tags() {
            let rect = asset.region_for(tag)?;
            println!("  {:<20} {:>5},{:<5} {}x{}", tag.name(), rect.x, rect.y, rect.width, rect.height);
        }
    }
    Ok(())
}
