mod remote;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use dialoguer::Confirm;
use log::warn;

use swagtype_core::config::{self, CONFIG_FILE_NAME};
use swagtype_core::error::ConfigError;
use swagtype_core::pipeline::{generate, write_files};
use swagtype_core::source::fetch_all;
use swagtype_typescript::TypeScriptEmitter;

use crate::remote::RemoteSource;

#[derive(Parser)]
#[command(
    name = "swagtype",
    about = "Generate TypeScript request/response types from OpenAPI documents",
    version
)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every configured document and write the generated types (default)
    Generate,

    /// Initialize a new swagtype configuration
    Init {
        /// Overwrite an existing config without asking
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => cmd_generate(&cli.config).await,

        Commands::Init { force } => cmd_init(&cli.config, force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swagtype", &mut std::io::stdout());
            Ok(())
        }
    }
}

async fn cmd_generate(config_path: &Path) -> Result<()> {
    let cfg = match config::load_config(config_path) {
        Err(ConfigError::NotFound(path)) => bail!(
            "{} not found. Run `swagtype init` to create one.",
            path.display()
        ),
        other => other?,
    };

    if cfg.servers.is_empty() {
        eprintln!("No servers configured. Add a `servers` section to your config.");
        return Ok(());
    }

    let source = RemoteSource::new().context("failed to build HTTP client")?;
    let fetched = fetch_all(&source, &cfg.servers).await;
    if fetched.len() < cfg.servers.len() {
        warn!(
            "{} of {} servers could not be fetched",
            cfg.servers.len() - fetched.len(),
            cfg.servers.len()
        );
    }

    let files = generate(&fetched, &cfg.policy(), &TypeScriptEmitter::new())?;

    let output_dir = PathBuf::from(&cfg.output_path);
    let report = write_files(&output_dir, &files).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;

    if !report.is_success() {
        bail!(
            "{} of {} files failed to write",
            report.failed.len(),
            files.len()
        );
    }

    eprintln!(
        "Generated {} files in {}",
        report.written.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite it?", config_path.display()))
            .default(false)
            .interact()
            .context("failed to read overwrite confirmation")?;
        if !overwrite {
            eprintln!("Left {} unchanged.", config_path.display());
            return Ok(());
        }
    }

    fs::write(config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
