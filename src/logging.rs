//! Process-wide `tracing` subscriber setup.

use crate::error::{AlgoError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global `tracing` subscriber filtered by `level`.
///
/// `level` accepts any `EnvFilter` directive, e.g. `info` or
/// `algokit::tree=trace,warn`.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| AlgoError::InvalidArgument(format!("Invalid log level: {e}")))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| AlgoError::InvalidArgument("Logging already initialized".into()))
}
