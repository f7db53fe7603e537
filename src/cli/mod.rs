//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations. Every command is a thin wrapper
//! over the library; settings come from `teesheet.toml` with flags taking
//! precedence.

mod color;
mod copy;
mod extract;
mod info;
mod render;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use crate::color::{parse_color, Color};
use crate::config::{load_config, merge_cli_overrides, CliOverrides, TeesheetConfig};
use crate::part::{PartTag, SkinPart};

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Which grid a sheet is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SheetKind {
    /// 8×4 character sheet
    Skin,
    /// 32×16 weapon/UI sheet
    Gameskin,
}

/// teesheet - Inspect, recolor, combine and render game skin sheets
#[derive(Parser)]
#[command(name = "teesheet")]
#[command(about = "teesheet - Inspect, recolor, combine and render skin and gameskin sheets")]
#[command(version)]
pub struct Cli {
    /// Path to teesheet.toml (default: search upwards from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print size, unit and part regions of sheets
    Info {
        /// Sheets to inspect (glob patterns allowed)
        #[arg(required = true)]
        inputs: Vec<String>,

        #[arg(long, value_enum, default_value = "skin")]
        kind: SheetKind,

        /// Also list the pixel rectangle of every part
        #[arg(long)]
        parts: bool,
    },

    /// Save parts of a sheet as individual PNG files
    Extract {
        input: PathBuf,

        #[arg(long, value_enum, default_value = "gameskin")]
        kind: SheetKind,

        /// Comma-separated part names (default: every part)
        #[arg(long, value_delimiter = ',')]
        parts: Vec<PartTag>,

        /// Output directory (default: output.part_dir from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Tint the body and feet of skins
    Color {
        /// Skins to recolor (glob patterns allowed)
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Body color: "#RRGGBB", "#RGB", "r,g,b" or "code:N"
        #[arg(long, value_parser = parse_color)]
        body: Color,

        /// Feet color (default: body color)
        #[arg(long, value_parser = parse_color)]
        feet: Option<Color>,

        /// Output directory; files keep their names
        #[arg(short, long)]
        out: PathBuf,

        /// Replace existing output files
        #[arg(long)]
        overwrite: bool,
    },

    /// Copy parts from one sheet into another of the same kind
    Copy {
        /// Sheet the parts are taken from
        #[arg(long)]
        from: PathBuf,

        /// Sheet the parts are written into
        #[arg(long)]
        to: PathBuf,

        #[arg(long, value_enum, default_value = "gameskin")]
        kind: SheetKind,

        /// Comma-separated part names
        #[arg(long, value_delimiter = ',', required = true)]
        parts: Vec<PartTag>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        overwrite: bool,
    },

    /// Render a tee from a skin
    Render {
        skin: PathBuf,

        /// Output file (default: render_<skin name> next to the skin)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Facing angle in degrees
        #[arg(long, allow_hyphen_values = true)]
        orientation: Option<i32>,

        /// Eye part name
        #[arg(long, value_parser = parse_eye)]
        eye: Option<SkinPart>,

        #[arg(long, value_parser = parse_color)]
        body: Option<Color>,

        #[arg(long, value_parser = parse_color)]
        feet: Option<Color>,

        #[arg(long)]
        overwrite: bool,
    },

    /// Render a tee holding a weapon
    Weapon {
        skin: PathBuf,
        gameskin: PathBuf,

        /// Weapon part name
        #[arg(long, default_value = "gun")]
        weapon: PartTag,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        orientation: Option<i32>,

        #[arg(long, value_parser = parse_eye)]
        eye: Option<SkinPart>,

        #[arg(long)]
        overwrite: bool,
    },

    /// Compose an overview board of a skin and a gameskin
    Board {
        skin: PathBuf,
        gameskin: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Also write the cell labels as JSON
        #[arg(long)]
        legend: Option<PathBuf>,

        #[arg(long, allow_hyphen_values = true)]
        orientation: Option<i32>,

        #[arg(long)]
        overwrite: bool,
    },
}

/// Run the CLI and return the process exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match cli.command {
        Commands::Info { inputs, kind, parts } => info::run_info(&inputs, kind, parts),
        Commands::Extract { input, kind, parts, out } => {
            let overrides = CliOverrides { part_dir: out, ..Default::default() };
            extract::run_extract(&input, kind, &parts, &with_overrides(config, &overrides))
        }
        Commands::Color { inputs, body, feet, out, overwrite } => {
            let overrides = CliOverrides { overwrite: overwrite.then_some(true), ..Default::default() };
            color::run_color(&inputs, body, feet.unwrap_or(body), &out, &with_overrides(config, &overrides))
        }
        Commands::Copy { from, to, kind, parts, output, overwrite } => {
            let overrides = CliOverrides { overwrite: overwrite.then_some(true), ..Default::default() };
            copy::run_copy(&from, &to, kind, &parts, &output, &with_overrides(config, &overrides))
        }
        Commands::Render { skin, output, orientation, eye, body, feet, overwrite } => {
            let overrides =
                CliOverrides { orientation, eye, overwrite: overwrite.then_some(true), ..Default::default() };
            let colors = body.map(|body| (body, feet.unwrap_or(body)));
            render::run_render(&skin, output.as_deref(), colors, &with_overrides(config, &overrides))
        }
        Commands::Weapon { skin, gameskin, weapon, output, orientation, eye, overwrite } => {
            let overrides =
                CliOverrides { orientation, eye, overwrite: overwrite.then_some(true), ..Default::default() };
            render::run_weapon(&skin, &gameskin, weapon, &output, &with_overrides(config, &overrides))
        }
        Commands::Board { skin, gameskin, output, legend, orientation, overwrite } => {
            let overrides = CliOverrides { orientation, overwrite: overwrite.then_some(true), ..Default::default() };
            render::run_board(&skin, &gameskin, &output, legend.as_deref(), &with_overrides(config, &overrides))
        }
    }
}

fn init_logging(verbose: bool, no_color: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: logging was already initialized");
    }
}

fn with_overrides(mut config: TeesheetConfig, overrides: &CliOverrides) -> TeesheetConfig {
    merge_cli_overrides(&mut config, overrides);
    config
}

/// Parse an eye part name, rejecting every other skin part.
fn parse_eye(s: &str) -> Result<SkinPart, String> {
    let part = s.parse::<SkinPart>()?;
    if part.is_eye() {
        Ok(part)
    } else {
        Err(format!("'{}' is not an eye part", part))
    }
}

/// Expand input arguments, treating any argument with glob characters as a
/// pattern. A pattern that matches nothing is an error.
pub(crate) fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            files.push(PathBuf::from(input));
            continue;
        }

        let paths = glob(input).map_err(|e| format!("invalid pattern '{}': {}", input, e))?;
        let before = files.len();
        files.extend(paths.filter_map(std::result::Result::ok));
        if files.len() == before {
            return Err(format!("no files match '{}'", input));
        }
    }
    debug!(count = files.len(), "inputs expanded");
    Ok(files)
}

/// Display name of a path for progress output.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| path.display().to_string())
}
