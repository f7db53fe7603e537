//! Color command implementation
//!
//! Skins are independent, so a batch is recolored in parallel with one
//! asset per task.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rayon::prelude::*;
use tracing::info;

use crate::color::Color;
use crate::config::TeesheetConfig;
use crate::skin::Skin;

use super::{display_name, expand_inputs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the color command
pub fn run_color(inputs: &[String], body: Color, feet: Color, out: &Path, config: &TeesheetConfig) -> ExitCode {
    let files = match expand_inputs(inputs) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let overwrite = config.output.overwrite;
    let results: Vec<(PathBuf, crate::Result<PathBuf>)> = files
        .par_iter()
        .map(|input| (input.clone(), color_one(input, body, feet, out, overwrite)))
        .collect();

    let mut failed = 0;
    for (input, result) in &results {
        match result {
            Ok(path) => println!("{} -> {}", display_name(input), path.display()),
            Err(e) => {
                eprintln!("Error: {}: {}", input.display(), e);
                failed += 1;
            }
        }
    }
    info!(total = results.len(), failed, "batch recolored");

    if failed > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn color_one(input: &Path, body: Color, feet: Color, out: &Path, overwrite: bool) -> crate::Result<PathBuf> {
    let target = out.join(input.file_name().unwrap_or(input.as_os_str()));
    let mut skin = Skin::new();
    skin.load_from_path(input)?.color_tee(body, feet)?.save_as(&target, overwrite)?;
    Ok(target)
}
