//! Literally CLI - literate programming compiler

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use literally::commands::{self, BuildOptions, WatchOptions};
use literally::config::{self, ConfigUpdate, Format};
use literally::interface::Context;
use literally::Result;

#[derive(Parser)]
#[command(name = "literally")]
#[command(author, version, about = "Compile literate markdown into web assets", long_about = None)]
struct Cli {
    /// Markdown documents or glob patterns (defaults to `files` from the config)
    #[arg(value_name = "INPUT")]
    inputs: Vec<String>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Asset base name (defaults to the input file stem)
    #[arg(short, long)]
    name: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Recompile whenever an input changes
    #[arg(long)]
    watch: bool,

    /// Show what would be written without writing
    #[arg(long)]
    dry_run: bool,

    /// Working directory
    #[arg(short = 'C', long)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config_update(&self) -> ConfigUpdate {
        ConfigUpdate {
            files: (!self.inputs.is_empty()).then(|| self.inputs.clone()),
            output: self.output.clone(),
            name: self.name.clone(),
            format: self.format,
            ..ConfigUpdate::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Determine working directory
    let base_dir = match &cli.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let file_config = match &cli.config {
        Some(path) => config::read_config_file(path)?,
        None => config::read_config(&base_dir)?,
    };
    let config = cli.config_update().merge_into(&file_config);
    let watch = cli.watch || config.watch.enabled;

    let ctx = Context::new(config, base_dir)?;

    if watch && !cli.dry_run {
        return commands::watch(&ctx, WatchOptions::default());
    }

    let options = BuildOptions {
        dry_run: cli.dry_run,
        files: Vec::new(),
    };
    commands::build(&ctx, &options)?;
    Ok(())
}
