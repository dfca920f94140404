//! yang-render CLI
//!
//! Renders the bundled OpenConfig interfaces model to XML.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use yang_nodes::{InterfacesModel, YangConfig};

#[derive(Parser)]
#[command(name = "yang-render")]
#[command(about = "Render YANG node trees to XML")]
#[command(version)]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the interfaces document
    Render {
        /// Interface name (repeatable, replaces the configured list)
        #[arg(short, long)]
        interface: Vec<String>,

        /// Module namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// NETCONF operation attribute for every interface entry
        #[arg(long)]
        operation: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the compiled field tables as JSON
    Describe,

    /// Show or create configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new config file
    Init {
        /// Output path
        #[arg(short, long, default_value = "yang.toml")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = YangConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Render {
            interface,
            namespace,
            operation,
            output,
        } => {
            if !interface.is_empty() {
                cfg.model.interfaces = interface;
            }
            if let Some(namespace) = namespace {
                cfg.model.namespace = namespace;
            }
            if operation.is_some() {
                cfg.model.operation = operation;
            }

            let model = InterfacesModel::from_config(&cfg.model).context("declaring interfaces model")?;
            let document = model
                .document(cfg.model.interfaces.iter().cloned())
                .context("building interfaces document")?;
            let xml = cfg.render.finish(&document.to_xml());

            match output.or(cfg.render.output) {
                Some(path) => {
                    std::fs::write(&path, xml).with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "wrote document");
                }
                None => print!("{}", xml),
            }
        }

        Commands::Describe => {
            let model = InterfacesModel::from_config(&cfg.model).context("declaring interfaces model")?;
            let descriptions: Vec<_> = model.types().iter().map(|ty| ty.describe()).collect();
            println!("{}", serde_json::to_string_pretty(&descriptions)?);
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show { json } => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&cfg)?);
                } else {
                    println!("{}", toml::to_string_pretty(&cfg)?);
                }
            }
            ConfigCommands::Init { output } => {
                YangConfig::default().save(&output)?;
                println!("Created config file: {}", output);
            }
        },
    }

    Ok(())
}
