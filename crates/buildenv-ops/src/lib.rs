//! Operations a host process runs on a project directory: find its
//! `Buildenv.toml`, resolve it against the real filesystem, and maintain
//! `Buildenv.lock`.
//!
//! Unlike the resolver, these functions perform I/O and report progress
//! through `tracing`; installing a subscriber is left to the host.

pub mod ops_lock;
pub mod ops_resolve;

use std::path::PathBuf;

/// Options shared by the resolve and lock operations.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Resolver config file. `None` reads `~/.buildenv/config.toml`.
    pub config_path: Option<PathBuf>,
    /// Log each version conflict at `warn` instead of `debug`.
    pub verbose: bool,
}
