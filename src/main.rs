//! County Choropleth CLI
//!
//! Usage:
//!   county-choropleth [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>      Configuration file (TOML format)
//!   -t, --topology <SOURCE>  County topology URL or file path
//!   -e, --education <SOURCE> Education statistics URL or file path
//!   -o, --output <FILE>      Write the page to a file instead of stdout
//!   --compact                Emit SVG without indentation
//!   -v, --verbose            Debug logging
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use county_choropleth::{AppConfig, Error, HttpFetcher, ViewController};

#[derive(Parser)]
#[command(name = "county-choropleth")]
#[command(about = "Choropleth map of bachelor's degree attainment in US counties")]
struct Cli {
    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// County topology URL or file path
    #[arg(short, long)]
    topology: Option<String>,

    /// Education statistics URL or file path
    #[arg(short, long)]
    education: Option<String>,

    /// Write the page to this file (stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit SVG without indentation
    #[arg(long)]
    compact: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn app_config(&self) -> Result<AppConfig, Error> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        if let Some(topology) = &self.topology {
            config = config.with_topology(topology.as_str());
        }
        if let Some(education) = &self.education {
            config = config.with_education(education.as_str());
        }
        if self.compact {
            config.svg = config.svg.with_pretty_print(false);
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_page(output: Option<&Path>, html: &str) -> Result<(), Error> {
    match output {
        Some(path) => fs::write(path, html)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.app_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "could not load configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut controller = ViewController::new(HttpFetcher::new(), &config);
    controller.mount().await;

    // The pre-render page is still written when loading failed
    if let Err(e) = write_page(cli.output.as_deref(), &controller.to_html()) {
        tracing::error!(error = %e, "could not write page");
        return ExitCode::FAILURE;
    }
    if let Some(path) = &cli.output {
        tracing::info!(path = %path.display(), "page written");
    }

    if controller.load_error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
