use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::{CanvasError, Result};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "FREEHAND_CONFIG";

/// Startup configuration of the canvas.
///
/// Every field has a default, so a configuration file only needs the values
/// it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct CanvasConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    pub initial_color: HexColor,
    pub initial_stroke_width: f32,
    /// Lower bound of the width slider
    pub min_stroke_width: f32,
    /// Upper bound of the width slider
    pub max_stroke_width: f32,
    /// Color the eraser paints with; should match the background
    pub eraser_color: HexColor,
    pub background_color: HexColor,
    pub export_file_name: String,
    /// Directory the PNG is written to on native targets
    pub export_dir: PathBuf,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            initial_color: HexColor::BLACK,
            initial_stroke_width: 5.0,
            min_stroke_width: 1.0,
            max_stroke_width: 50.0,
            eraser_color: HexColor::WHITE,
            background_color: HexColor::WHITE,
            export_file_name: "illustration.png".to_owned(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl CanvasConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when it is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CanvasError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.min_stroke_width > 0.0 && self.min_stroke_width <= self.max_stroke_width) {
            return Err(CanvasError::InvalidConfig(format!(
                "stroke width range {}..={} is empty or not positive",
                self.min_stroke_width, self.max_stroke_width
            )));
        }
        if !(self.min_stroke_width..=self.max_stroke_width).contains(&self.initial_stroke_width) {
            return Err(CanvasError::InvalidConfig(format!(
                "initial stroke width {} is outside {}..={}",
                self.initial_stroke_width, self.min_stroke_width, self.max_stroke_width
            )));
        }
        for (name, color) in [
            ("initial_color", &self.initial_color),
            ("eraser_color", &self.eraser_color),
            ("background_color", &self.background_color),
        ] {
            if color.to_rgba().is_none() {
                return Err(CanvasError::InvalidConfig(format!(
                    "{name} {color:?} is not a hex color"
                )));
            }
        }
        if self.export_file_name.is_empty() {
            return Err(CanvasError::InvalidConfig("export_file_name is empty".to_owned()));
        }
        Ok(())
    }
}
