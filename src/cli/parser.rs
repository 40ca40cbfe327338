use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::build;
use crate::config::Environment;
use crate::logger::LogLevel;

/// HTTP API for a product catalogue held in memory.
///
/// Settings come from config/default.toml, config/{environment}.toml,
/// config/local.toml and PRODUCT_API_* variables, in that order; the flags
/// below override all of them.
#[derive(Debug, Parser)]
#[command(name = "product-api", version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Read only this TOML file instead of the layered config/ directory
    #[arg(short, long, value_name = "FILE", value_parser = existing_file)]
    pub config: Option<PathBuf>,

    /// Environment whose overlay file is applied [default: $PRODUCT_API_APP_ENV or development]
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (what runs when no subcommand is given)
    Serve(ServeArgs),
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Address to bind, e.g. 0.0.0.0 for every interface
    #[arg(long, value_name = "ADDRESS")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Log level; wins over --verbose and --quiet
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Print the resolved settings and exit without serving
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn serve_args(&self) -> Option<&ServeArgs> {
        match &self.command {
            Some(Command::Serve(args)) => Some(args),
            None => None,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.serve_args().is_some_and(|args| args.dry_run)
    }
}

fn existing_file(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("no configuration file at `{raw}`"))
    }
}
