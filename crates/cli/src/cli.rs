use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{load_config, show_command, targets_command, watch_command};

#[derive(Parser, Debug)]
#[command(name = "buildium")]
#[command(version, about = "List and inspect the build targets of your projects", long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Read manager settings from this file instead of searching for one
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh and list the targets of each project path
    #[command(visible_alias = "t")]
    Targets {
        /// Project directories (defaults to the current directory)
        paths: Vec<PathBuf>,

        /// Print the targets as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Print the command a target would run, without running it
    #[command(visible_alias = "s")]
    Show {
        /// Project directory
        path: PathBuf,

        /// Target name (defaults to the active target)
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Keep listing targets as build files change, until Ctrl-C
    #[command(visible_alias = "w")]
    Watch {
        /// Project directories (defaults to the current directory)
        paths: Vec<PathBuf>,
    },
}

impl Cli {
    /// Execute the command
    pub async fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;

        match self.command {
            Commands::Targets { paths, json } => targets_command(&paths, json, config).await,
            Commands::Show { path, target } => show_command(&path, target.as_deref(), config).await,
            Commands::Watch { paths } => watch_command(&paths, config).await,
        }
    }
}
