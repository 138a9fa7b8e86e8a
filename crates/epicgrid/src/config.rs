use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::layout::{BatchCellConfig, TaskCellConfig};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "epicgrid";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Output format when none is given on the command line: svg or json.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Overrides for the built-in layout dimensions. Anything unset falls back
/// to the engine defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_height: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_gap: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_gap: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_horizontal_gap: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_vertical_gap: Option<f64>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `epicgrid config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents =
            format!("# Epicgrid configuration - https://github.com/epicgrid/epicgrid\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.format" => {
                match value {
                    "svg" | "json" => {}
                    _ => anyhow::bail!("Invalid format: {value}. Must be 'svg' or 'json'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .format = Some(value.to_string());
            }
            "layout.cell_width" => self.layout_mut().cell_width = Some(parse_dimension(key, value)?),
            "layout.cell_height" => {
                self.layout_mut().cell_height = Some(parse_dimension(key, value)?)
            }
            "layout.horizontal_gap" => {
                self.layout_mut().horizontal_gap = Some(parse_dimension(key, value)?)
            }
            "layout.vertical_gap" => {
                self.layout_mut().vertical_gap = Some(parse_dimension(key, value)?)
            }
            "layout.batch_horizontal_gap" => {
                self.layout_mut().batch_horizontal_gap = Some(parse_dimension(key, value)?)
            }
            "layout.batch_vertical_gap" => {
                self.layout_mut().batch_vertical_gap = Some(parse_dimension(key, value)?)
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.format, layout.cell_width, \
                 layout.cell_height, layout.horizontal_gap, layout.vertical_gap, \
                 layout.batch_horizontal_gap, layout.batch_vertical_gap"
            ),
        }
        Ok(())
    }

    fn layout_mut(&mut self) -> &mut LayoutConfig {
        self.layout.get_or_insert_with(LayoutConfig::default)
    }

    /// Task cell dimensions: engine defaults overlaid with the file's
    /// layout section.
    pub fn task_cell_config(&self) -> TaskCellConfig {
        let mut config = TaskCellConfig::default();
        if let Some(layout) = &self.layout {
            if let Some(v) = layout.cell_width {
                config.cell_width = v;
            }
            if let Some(v) = layout.cell_height {
                config.cell_height = v;
            }
            if let Some(v) = layout.horizontal_gap {
                config.horizontal_gap = v;
            }
            if let Some(v) = layout.vertical_gap {
                config.vertical_gap = v;
            }
        }
        config
    }

    pub fn batch_cell_config(&self) -> BatchCellConfig {
        let mut config = BatchCellConfig::default();
        if let Some(layout) = &self.layout {
            if let Some(v) = layout.batch_horizontal_gap {
                config.horizontal_gap = v;
            }
            if let Some(v) = layout.batch_vertical_gap {
                config.vertical_gap = v;
            }
        }
        config
    }
}

fn parse_dimension(key: &str, value: &str) -> Result<f64> {
    let number: f64 = value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid value for {key}: {value} is not a number"))?;
    if !number.is_finite() || number <= 0.0 {
        anyhow::bail!("Invalid value for {key}: must be a positive number");
    }
    Ok(number)
}
