use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let config = Config::load_or_default();
    if let Ok(path) = Config::path() {
        eprintln!("{} {}", "Config:".dimmed(), path.display());
    }

    let yaml = serde_yaml::to_string(&config)?;
    if yaml.trim() == "{}" {
        println!("No overrides set; built-in defaults apply.");
        println!();
        println!("Keys: defaults.format, layout.cell_width, layout.cell_height,");
        println!("      layout.horizontal_gap, layout.vertical_gap,");
        println!("      layout.batch_horizontal_gap, layout.batch_vertical_gap");
    } else {
        println!("{yaml}");
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    eprintln!("  {} {key} = {value} ({})", "Set".green(), path.display());
    Ok(())
}
