//! Logger setup shared by the binaries

use std::sync::Once;

use env_logger::Builder;
use log::{LevelFilter, debug};

/// Guards the one-time logger installation
static INIT: Once = Once::new();

/// Installs `env_logger` at `Info` level, overridable through `RUST_LOG`.
///
/// Calling it more than once is harmless.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("chainmap", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        if builder.try_init().is_err() {
            debug!("a logger was already installed");
        }
    });
}
