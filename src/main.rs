#![forbid(unsafe_code)]

//! `deskdriver` — automation service inspection binary.
//!
//! Prints each service's composed operation catalog and runs a scripted
//! lifecycle self-check, so a deployment can verify its composition
//! before pointing the outer request layer at a real application.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Map;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use deskdriver::backend::scripted::ScriptedAutomation;
use deskdriver::capability::document::DocumentOps;
use deskdriver::ops::Catalog;
use deskdriver::service::{ExcelService, MailService, SlidesService, WordService};
use deskdriver::{AutomationConfig, CompositionError, ServiceError};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum App {
    Word,
    Excel,
    Slides,
    Mail,
}

impl App {
    const ALL: [Self; 4] = [Self::Word, Self::Excel, Self::Slides, Self::Mail];

    fn name(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Excel => "excel",
            Self::Slides => "slides",
            Self::Mail => "mail",
        }
    }

    fn catalog(self) -> Result<Catalog, CompositionError> {
        match self {
            Self::Word => WordService::compose_catalog(),
            Self::Excel => ExcelService::compose_catalog(),
            Self::Slides => SlidesService::compose_catalog(),
            Self::Mail => MailService::compose_catalog(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "deskdriver", about = "Desktop automation service inspector", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the composed operation catalog for one or all services.
    Catalog {
        /// Restrict output to one service.
        #[arg(long, value_enum)]
        app: Option<App>,
    },
    /// Verify every service composes and survives a scripted lifecycle.
    Check,
}

fn main() -> std::process::ExitCode {
    let args = Cli::parse();
    init_tracing(args.log_format);

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("deskdriver: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let outcome = match args.command {
        Command::Catalog { app } => print_catalogs(app),
        Command::Check => run_check(&config),
    };

    match outcome {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("deskdriver: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => fmt().with_env_filter(filter).init(),
        LogFormat::Json => fmt().json().with_env_filter(filter).init(),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<AutomationConfig, ServiceError> {
    match path {
        Some(path) => AutomationConfig::load_from_path(path),
        None => Ok(AutomationConfig::default()),
    }
}

fn print_catalogs(app: Option<App>) -> Result<(), Box<dyn std::error::Error>> {
    let apps: Vec<App> = app.map_or_else(|| App::ALL.to_vec(), |a| vec![a]);
    for app in apps {
        let catalog = app.catalog()?;
        println!("{} ({} operations)", app.name(), catalog.len());
        for (operation, group) in catalog.iter() {
            println!("  {operation:<24} [{group}]");
        }
    }
    Ok(())
}

/// Compose every service against the scripted backend and run one
/// initialize → operate → cleanup pass per service.
fn run_check(config: &AutomationConfig) -> Result<(), Box<dyn std::error::Error>> {
    for app in App::ALL {
        let backend = ScriptedAutomation::new();
        let automation = Arc::new(backend);
        match app {
            App::Word => {
                let mut service = WordService::new(automation, config)?;
                service.initialize()?;
                service.create_document()?;
                service.close_document(false)?;
                service.cleanup()?;
            }
            App::Excel => {
                let mut service = ExcelService::new(automation, config)?;
                service.initialize()?;
                service.create_document()?;
                service.cleanup()?;
            }
            App::Slides => {
                let mut service = SlidesService::new(automation, config)?;
                service.initialize()?;
                service.create_document()?;
                service.cleanup()?;
            }
            App::Mail => {
                let mut service = MailService::new(automation, config)?;
                service.initialize()?;
                service.call("list_folders", &Map::new())?;
                service.cleanup()?;
            }
        }
        info!(app = app.name(), "lifecycle check passed");
    }
    println!("all services composed and completed a scripted lifecycle");
    Ok(())
}
