mod annotate_cmd;
mod check_config_cmd;
mod document;
mod terminal_output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use chronoforge_config::{
    config_dir, config_file_path, load_and_prepare, ChronoForgeConfig, OutputFormat,
    ValidationReport,
};
use chronoforge_logging::{init_console_logger, init_logger};

#[derive(Parser)]
#[command(name = "chronoforge")]
#[command(about = "ChronoForge: temporal expression extraction into SCATE entities")]
#[command(version)]
struct Cli {
    /// Config file (defaults to config.yaml in the ChronoForge config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract temporal entities from a tokenized document
    Annotate {
        /// Input document JSON
        #[arg(short, long)]
        input: PathBuf,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// json, ann or scate; overrides the configured format
        #[arg(short, long)]
        format: Option<OutputFormat>,
        /// First entity id to allocate
        #[arg(long, default_value_t = 0)]
        start_id: u64,
    },
    /// Print the temporal phrases detected in a document
    Phrases {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Validate the config file
    CheckConfig,
}

async fn load(path: &Path) -> Result<(ChronoForgeConfig, ValidationReport)> {
    let (config, report) = load_and_prepare(path).await?;
    let level = config.log_level().unwrap_or("info");
    match config.log_dir() {
        Some(dir) => init_logger(dir, level),
        None => init_console_logger(level),
    }
    debug!(path = %path.display(), "Config loaded");
    Ok((config, report))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let (config, report) = load(&path).await?;

    match cli.command {
        Commands::Annotate { input, output, format, start_id } => {
            if !report.is_valid() {
                check_config_cmd::print_report(&path, &config, &report);
                anyhow::bail!("Refusing to annotate with an invalid config");
            }
            let format = format.unwrap_or_else(|| config.output_format());
            annotate_cmd::annotate(&config, &input, output.as_deref(), format, start_id).await?;
        }
        Commands::Phrases { input } => {
            annotate_cmd::phrases(&input).await?;
        }
        Commands::CheckConfig => {
            check_config_cmd::run(&path, &config, &report)?;
        }
    }

    Ok(())
}
