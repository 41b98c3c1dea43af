//! gatewayts CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use gatewayts_core::Config;

#[derive(Parser)]
#[command(name = "gatewayts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate TypeScript clients from a schema registry dump
    Generate {
        /// Path to the registry dump (JSON or YAML)
        ///
        /// Required unless a config file provides `registry_path`
        #[arg(long)]
        registry: Option<PathBuf>,
        /// Output directory for generated code (default: gen)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Keep declared field names instead of lowerCamelCase
        #[arg(long)]
        use_proto_names: bool,
        /// YAML or TOML config file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            registry,
            output_dir,
            use_proto_names,
            config,
        } => {
            let mut resolved = match &config {
                Some(path) => Config::from_file(path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => {
                    let registry = registry
                        .clone()
                        .context("--registry is required when no --config is given")?;
                    Config::new(registry, "gen")
                }
            };
            if let Some(registry) = registry {
                resolved.registry_path = registry;
            }
            if let Some(output_dir) = output_dir {
                resolved.output_dir = output_dir;
            }
            if use_proto_names {
                resolved.use_proto_names = Some(true);
            }

            tracing::info!(
                registry = %resolved.registry_path.display(),
                output_dir = %resolved.output_dir.display(),
                "generating TypeScript clients"
            );

            let files = gatewayts_core::run(&resolved).await.with_context(|| {
                format!(
                    "Failed to generate from {}",
                    resolved.registry_path.display()
                )
            })?;

            for file in &files {
                tracing::debug!(file = %file.name, "wrote");
            }
            println!(
                "Generated {} files in: {}",
                files.len(),
                resolved.output_dir.display()
            );
        }
    }
    Ok(())
}
