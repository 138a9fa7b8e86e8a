use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::diagram::{self, DiagramConfig};
use crate::epic::Epic;
use crate::render::{json, svg};

pub struct RenderOptions {
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub derived_edges: bool,
    pub cell_width: Option<f64>,
    pub cell_height: Option<f64>,
    pub horizontal_gap: Option<f64>,
    pub vertical_gap: Option<f64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output: None,
            format: None,
            derived_edges: true,
            cell_width: None,
            cell_height: None,
            horizontal_gap: None,
            vertical_gap: None,
        }
    }
}

pub fn run(file: &Path, options: RenderOptions) -> Result<()> {
    let epic = Epic::from_path(file)?;
    let app_config = Config::load_or_default();

    // Config file first, command line on top.
    let mut task = app_config.task_cell_config();
    if let Some(v) = options.cell_width {
        task.cell_width = v;
    }
    if let Some(v) = options.cell_height {
        task.cell_height = v;
    }
    if let Some(v) = options.horizontal_gap {
        task.horizontal_gap = v;
    }
    if let Some(v) = options.vertical_gap {
        task.vertical_gap = v;
    }

    let config = DiagramConfig {
        task,
        batch: app_config.batch_cell_config(),
        derived_edges: options.derived_edges,
    };

    let built = diagram::build(&epic, &config)
        .with_context(|| format!("Could not lay out {}", file.display()))?;

    let format = options.format.unwrap_or_else(|| default_format(&app_config));
    let rendered = match format {
        OutputFormat::Svg => svg::render(&epic, &built),
        OutputFormat::Json => json::render(&epic, &built)?,
    };

    match &options.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("  {} {}", "Saved".green(), path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn default_format(config: &Config) -> OutputFormat {
    let configured = config.defaults.as_ref().and_then(|d| d.format.as_deref());
    match configured {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Svg,
    }
}
