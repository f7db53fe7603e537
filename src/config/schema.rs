//! Configuration schema types for `teesheet.toml`
//!
//! Every section is optional; a missing file or section means defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::part::SkinPart;

/// Render defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Facing angle in degrees, any integer
    #[serde(default)]
    pub orientation: i32,
    /// Eye part name (e.g. "angry_eye")
    #[serde(default = "default_eye")]
    pub eye: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { orientation: 0, eye: default_eye() }
    }
}

fn default_eye() -> String {
    SkinPart::DefaultEye.name().to_string()
}

/// Overview board layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Gap between cells and around the board, in pixels
    #[serde(default = "default_board_padding")]
    pub padding: u32,
    /// Cells per row
    #[serde(default = "default_board_columns")]
    pub columns: u32,
    /// Board background, RGBA
    #[serde(default)]
    pub background: [u8; 4],
    /// Cell frame color, RGBA
    #[serde(default = "default_frame")]
    pub frame: [u8; 4],
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            padding: default_board_padding(),
            columns: default_board_columns(),
            background: [0, 0, 0, 0],
            frame: default_frame(),
        }
    }
}

fn default_board_padding() -> u32 {
    8
}

fn default_board_columns() -> u32 {
    9
}

fn default_frame() -> [u8; 4] {
    [64, 64, 64, 255]
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for extracted parts
    #[serde(default = "default_part_dir")]
    pub part_dir: PathBuf,
    /// Replace existing sheet and render files
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { part_dir: default_part_dir(), overwrite: false }
    }
}

fn default_part_dir() -> PathBuf {
    PathBuf::from("parts")
}

/// Complete `teesheet.toml` configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeesheetConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "board.columns")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "teesheet.toml: '{}' {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

impl TeesheetConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = self.eye() {
            errors.push(e);
        }

        if self.board.columns == 0 {
            errors.push(ConfigValidationError {
                field: "board.columns".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.output.part_dir.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "output.part_dir".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        errors
    }

    /// The configured eye part.
    pub fn eye(&self) -> Result<SkinPart, ConfigValidationError> {
        match self.render.eye.parse::<SkinPart>() {
            Ok(part) if part.is_eye() => Ok(part),
            _ => Err(ConfigValidationError {
                field: "render.eye".to_string(),
                message: format!("'{}' is not an eye part", self.render.eye),
            }),
        }
    }
}
