//! Tracing subscriber setup plus the append-only error log.
//!
//! [`init`] installs a console layer and, when enabled, a file layer in the
//! configured [`LogFormat`]. The error log in [`error_log`] is separate from
//! tracing and records only unexpected request failures.

pub mod error;
pub mod error_log;
mod format;
mod writer;

#[cfg(test)]
mod tests;

pub use error::LoggerError;
pub use error_log::ErrorLog;
pub use format::{LogFormat, LogLevel};

use std::io::IsTerminal;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::{ConsoleOutput, FileOutput, LoggerSettings};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(settings: &LoggerSettings) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(build_layers(settings)?)
        .with(EnvFilter::new(settings.level.as_str()))
        .try_init()?;
    Ok(())
}

fn build_layers(settings: &LoggerSettings) -> anyhow::Result<Vec<BoxedLayer>> {
    let mut layers = Vec::with_capacity(2);
    // File first, or the console's ANSI codes end up in span fields written to the file
    if settings.file.enabled {
        layers.push(file_layer(&settings.file)?);
    }
    if settings.console.enabled {
        layers.push(console_layer(&settings.console));
    }
    anyhow::ensure!(!layers.is_empty(), "at least one log output must be enabled");
    Ok(layers)
}

fn console_layer(output: &ConsoleOutput) -> BoxedLayer {
    fmt::layer()
        .with_ansi(output.colored && std::io::stdout().is_terminal())
        .boxed()
}

fn file_layer(output: &FileOutput) -> Result<BoxedLayer, LoggerError> {
    let layer = fmt::layer()
        .with_ansi(false)
        .with_writer(writer::open_log_file(output)?);

    Ok(match output.format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    })
}
