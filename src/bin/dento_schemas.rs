//! Dento Schemas CLI
//!
//! Validates payloads against record schemas, exports the JSON Schema
//! contract, and manages configuration.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dento_schemas::{EntityKind, ParseMode, RegistryConfig, SchemaRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dento-schemas")]
#[command(about = "Validate Dento records and export their schemas")]
struct Cli {
    /// Config file to load on top of the default locations
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered records and their fields
    List,

    /// Validate a JSON payload (object or array of objects)
    Validate {
        /// Record name, e.g. Patient
        entity: String,
        /// Input file, or "-" for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Reject fields the record does not declare
        #[arg(long)]
        strict: bool,
    },

    /// Export the JSON Schema contract
    Export {
        /// Output directory (defaults to the configured export dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show {
        /// Output as TOML
        #[arg(long)]
        toml: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a default config file
    Init {
        #[arg(short, long, default_value = "dento-schemas.toml")]
        output: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match RegistryConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but found invalid input
fn run(command: Commands, config: RegistryConfig) -> anyhow::Result<bool> {
    match command {
        Commands::List => {
            let registry = SchemaRegistry::from_config(&config);
            for kind in registry.kinds() {
                println!("{}", kind);
                for field in kind.fields() {
                    println!("  {}", field.summary());
                }
            }
            Ok(true)
        }

        Commands::Validate { entity, input, strict } => {
            let mode = if strict { ParseMode::Strict } else { config.parse.mode };
            let registry = SchemaRegistry::with_mode(mode);
            let kind: EntityKind = registry.lookup(&entity)?;

            let raw = read_input(&input)?;
            let payload: serde_json::Value =
                serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", input))?;

            let results = registry.validate_batch(kind, &payload);
            let mut all_valid = true;
            for (index, result) in results.iter().enumerate() {
                match result {
                    Ok(record) => {
                        println!("{}", serde_json::to_string_pretty(&record.encode())?);
                    }
                    Err(err) => {
                        all_valid = false;
                        eprintln!("❌ {} #{} - {} error(s)", kind, index, err.len());
                        for field_error in &err.errors {
                            eprintln!("   └─ {}", field_error);
                        }
                    }
                }
            }

            if all_valid {
                eprintln!("✅ {} {} record(s) valid", results.len(), kind);
            }
            Ok(all_valid)
        }

        Commands::Export { out, compact } => {
            let mut options = config.export.clone();
            if compact {
                options.output_format = dento_schemas::OutputFormat::Compact;
            }
            let dir = out.unwrap_or_else(|| config.export_dir());

            let manifest = SchemaRegistry::from_config(&config)
                .export(&dir, &options)
                .with_context(|| format!("exporting to {}", dir.display()))?;

            println!("📦 Exported {} schemas to {:?}", manifest.entities.len(), dir);
            for entry in &manifest.entities {
                println!("  {}  {}", &entry.checksum.as_str()[..12], entry.file);
            }
            println!("  manifest checksum: {}", manifest.manifest_checksum);
            Ok(true)
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show { toml, json } => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                } else if toml {
                    println!("{}", ::toml::to_string_pretty(&config)?);
                } else {
                    println!("📋 Dento Schemas Configuration\n");
                    println!("Parse:");
                    println!("  Mode: {:?}", config.parse.mode);
                    println!("\nExport:");
                    println!("  Dir: {:?}", config.export.dir);
                    println!("  Format: {:?}", config.export.output_format);
                    println!("  Checksums: {}", config.export.include_checksums);
                    println!("  Manifest: {}", config.export.include_manifest);
                    println!("\nLogging:");
                    println!("  Level: {}", config.logging.level);
                }
                Ok(true)
            }
            ConfigCommands::Init { output } => {
                RegistryConfig::default()
                    .save(&output)
                    .with_context(|| format!("writing {}", output))?;
                println!("✅ Created config file: {}", output);
                Ok(true)
            }
        },
    }
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input))
    }
}
