mod arrows;
mod cli;
mod commands;
mod config;
mod diagram;
mod epic;
mod layout;
mod render;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }
    if let Err(err) = cli.run() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
