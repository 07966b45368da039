//! # atelier CLI
//!
//! Command-line interface for Atelier - generative design tools.
//!
//! ## Usage
//!
//! - `atelier tools` - Show available tools
//! - `atelier run <tool> [--input key=value]... [--image path]` - Run one tool
//!
//! Results are printed as JSON; generated images appear as data URIs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{run_command, tools_command};
use config::CliConfigLoader;

/// atelier - Generative design tools
#[derive(Parser)]
#[command(name = "atelier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generative design tools backed by Gemini and Imagen")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API key override
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Base URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Text model override
    #[arg(long, global = true)]
    text_model: Option<String>,

    /// Image model override
    #[arg(long, global = true)]
    image_model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show available tools
    Tools,

    /// Run one tool invocation
    Run {
        /// Tool name (see `atelier tools`)
        tool: String,

        /// Tool input as key=value (repeatable)
        #[arg(short, long = "input", value_name = "KEY=VALUE")]
        inputs: Vec<String>,

        /// Image to analyze (png, jpeg, webp or gif)
        #[arg(long)]
        image: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(api_key) = &cli.api_key {
        loader = loader.with_api_key_override(api_key.clone());
    }

    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url_override(base_url.clone());
    }

    if let Some(model) = &cli.text_model {
        loader = loader.with_text_model_override(model.clone());
    }

    if let Some(model) = &cli.image_model {
        loader = loader.with_image_model_override(model.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    atelier_core::init_tracing(cli.verbose);

    let config_loader = build_config_loader(&cli);

    match cli.command {
        Commands::Tools => tools_command().await,
        Commands::Run {
            tool,
            inputs,
            image,
            pretty,
        } => run_command(tool, inputs, image, pretty, config_loader).await,
    }
}
