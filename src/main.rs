mod cli;
mod commands;
mod error;
mod mcp;
mod ocr;
mod pdf;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the MCP transport owns stdout
    let default_level = if cli.verbose {
        "pagesplit=debug"
    } else {
        "pagesplit=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Split {
            path,
            output_dir,
            ocr,
        } => {
            commands::split::run(
                &path,
                &output_dir,
                &ocr.raster_config(),
                &ocr.recognizer_config(),
            )?;
        }
        Commands::Detect { path, ocr } => {
            commands::detect::run(&path, &ocr.raster_config(), &ocr.recognizer_config())?;
        }
        Commands::ToJson { path, output_dir } => {
            commands::to_json::run(&path, &output_dir)?;
        }
    }

    Ok(())
}
