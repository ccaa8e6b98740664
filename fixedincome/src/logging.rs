//! Subscriber setup for the `tracing` events emitted across the workspace.

use fi_core::{errors::Result, Error};
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` (a level such as
/// `"info"` or a full filter directive) is used. Fails if the directive does
/// not parse or a global subscriber is already installed.
pub fn init_tracing(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| Error::Validation(format!("invalid log filter {default_level:?}: {e}")))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Runtime(format!("could not install tracing subscriber: {e}")))
}
