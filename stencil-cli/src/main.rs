//! stencil CLI tool

#![forbid(unsafe_code)]

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;

use commands::{ListCommand, ModuleCommand, NewCommand};

#[derive(Parser)]
#[command(name = "stencil")]
#[command(version)]
#[command(about = "Scaffold projects and modules from template sets", long_about = None)]
struct Cli {
    /// Path to the template registry definition file
    #[arg(long, global = true, default_value = "stencil.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project from a template set
    New {
        /// Project name
        name: Option<String>,
        /// Directory to create the project under (default: current directory)
        #[arg(short, long)]
        location: Option<PathBuf>,
        /// Template set to use (default: the registry's default set)
        #[arg(short, long)]
        template_set: Option<String>,
        /// Remote repository URL to initialize and push to
        #[arg(long)]
        remote: Option<String>,
    },
    /// Create a new module from a template set
    Module {
        /// Module name (snake_case; other shapes are normalized)
        name: Option<String>,
        /// Directory to create the module under (default: current directory)
        #[arg(short, long)]
        location: Option<PathBuf>,
        /// Module type
        #[arg(long = "type")]
        module_type: Option<stencil::ModuleType>,
        /// Template set to use (default: the registry's default set)
        #[arg(short, long)]
        template_set: Option<String>,
        /// Remote repository URL to initialize and push to
        #[arg(long)]
        remote: Option<String>,
    },
    /// List the template sets known to the registry
    List,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::New {
            name,
            location,
            template_set,
            remote,
        } => NewCommand {
            config: cli.config,
            name,
            location,
            template_set,
            remote,
        }
        .execute(),
        Commands::Module {
            name,
            location,
            module_type,
            template_set,
            remote,
        } => ModuleCommand {
            config: cli.config,
            name,
            location,
            module_type,
            template_set,
            remote,
        }
        .execute(),
        Commands::List => ListCommand { config: cli.config }.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("✗").red().bold());
            ExitCode::FAILURE
        }
    }
}
