//! Tracing setup. Logs go to stderr for CLI commands and to a file while the
//! terminal UI owns the screen.

use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::filesystem::secure::open_private_append;

fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("passdeck=debug");
    }
    EnvFilter::try_from_env("PASSDECK_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install a stderr subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Install a subscriber that appends to `path`.
pub fn init_to_file(path: &Path, verbose: bool) -> anyhow::Result<()> {
    let file = open_private_append(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
