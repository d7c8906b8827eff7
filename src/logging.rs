//! Tracing subscriber setup.
//!
//! Logs go to a file, never to the terminal: the demo owns the screen while
//! it runs. Filtering follows `RUST_LOG` with an INFO default.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber, writing to the given log file.
pub fn init_global(log_file_path: &Path) -> Result<()> {
    let log_file = File::create(log_file_path)
        .with_context(|| format!("creating log file {}", log_file_path.display()))?;
    build_subscriber(log_file).init();
    tracing::debug!("logging initialized");
    Ok(())
}

/// Core subscriber configuration, shared with tests.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let fmt_layer = fmt::layer().with_writer(Arc::new(log_file)).with_ansi(false);

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
