// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "driftdeck", version, about = "Model drift dashboard client")]
pub struct Cli {
    #[arg(long, global = true, help = "Print the dashboard as JSON instead of text")]
    pub json: bool,
    #[arg(long, global = true, help = "TOML file overriding environment settings")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Disable ANSI colours")]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a reference and a current dataset and render the verdict
    Analyze {
        #[arg(long, help = "Reference (baseline) dataset")]
        reference: Option<PathBuf>,
        #[arg(long, help = "Current (production) dataset")]
        current: Option<PathBuf>,
        #[arg(long, value_name = "ADDR", help = "Keep a browser preview running, e.g. 127.0.0.1:8080")]
        serve: Option<String>,
    },
    /// Render a saved analysis response without calling the service
    Inspect {
        response: PathBuf,
        #[arg(long, default_value_t = 200, help = "HTTP status the response arrived with")]
        status: u16,
    },
}
