use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands;
use crate::commands::render::RenderOptions;

#[derive(Parser)]
#[command(name = "epicgrid")]
#[command(author, version, about)]
#[command(long_about = "Render GitHub epic dependency graphs.\n\n\
    Feed it a resolved epic document (JSON) and get back an SVG diagram of\n\
    batches, tasks and dependency arrows, or the raw layout as JSON.\n\n\
    Examples:\n  \
    epicgrid epic.json                Render SVG to stdout\n  \
    epicgrid epic.json -o epic.svg    Render SVG to a file\n  \
    epicgrid inspect epic.json        Summarize the dependency graph")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Epic document to render
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render an epic document as SVG or JSON
    Render {
        /// Epic document to render
        file: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Do not derive inter-batch edges from cross-batch task dependencies
        #[arg(long)]
        no_derived_edges: bool,

        /// Task cell width in pixels
        #[arg(long)]
        cell_width: Option<f64>,

        /// Task cell height in pixels
        #[arg(long)]
        cell_height: Option<f64>,

        /// Gap between task columns in pixels
        #[arg(long)]
        horizontal_gap: Option<f64>,

        /// Gap between task rows in pixels
        #[arg(long)]
        vertical_gap: Option<f64>,
    },

    /// Summarize an epic's dependency graph
    Inspect {
        /// Epic document to inspect
        file: PathBuf,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. layout.cell_width, defaults.format)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Json,
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Render {
                file,
                output,
                format,
                no_derived_edges,
                cell_width,
                cell_height,
                horizontal_gap,
                vertical_gap,
            }) => {
                if !file.exists() {
                    anyhow::bail!("File not found: {}", file.display());
                }
                commands::render::run(
                    &file,
                    RenderOptions {
                        output,
                        format,
                        derived_edges: !no_derived_edges,
                        cell_width,
                        cell_height,
                        horizontal_gap,
                        vertical_gap,
                    },
                )
            }
            Some(Commands::Inspect { file }) => {
                if !file.exists() {
                    anyhow::bail!("File not found: {}", file.display());
                }
                commands::inspect::run(&file)
            }
            Some(Commands::Config { command }) => commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                commands::completion::run(shell);
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    commands::render::run(
                        &file,
                        RenderOptions {
                            output: self.output,
                            ..RenderOptions::default()
                        },
                    )
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
