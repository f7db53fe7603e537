//! Copy command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::asset::{Asset, AssetKind};
use crate::config::TeesheetConfig;
use crate::gameskin::GameskinKind;
use crate::part::PartTag;
use crate::skin::SkinKind;

use super::{SheetKind, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the copy command
pub fn run_copy(
    from: &Path,
    to: &Path,
    kind: SheetKind,
    parts: &[PartTag],
    output: &Path,
    config: &TeesheetConfig,
) -> ExitCode {
    let overwrite = config.output.overwrite;
    let copied = match kind {
        SheetKind::Skin => copy_between::<SkinKind>(from, to, parts, output, overwrite),
        SheetKind::Gameskin => copy_between::<GameskinKind>(from, to, parts, output, overwrite),
    };

    match copied {
        Ok(()) => {
            println!("Copied {} part(s) into {}", parts.len(), output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn copy_between<K: AssetKind>(from: &Path, to: &Path, parts: &[PartTag], output: &Path, overwrite: bool) -> crate::Result<()> {
    let mut source = Asset::<K>::new();
    source.load_from_path(from)?;

    let mut target = Asset::<K>::new();
    target.load_from_path(to)?.copy_parts(&source, parts)?.save_as(output, overwrite)?;
    Ok(())
}
