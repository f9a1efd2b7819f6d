//! Core data types for buildenv.
//!
//! This crate defines the values a resolution works on: the parsed
//! `Buildenv.toml` manifest, registry and local-file dependency
//! declarations, Maven-style coordinates, the pinned toolchain version,
//! the resolver configuration, and the lockfile format.
//!
//! This crate is intentionally free of resolution logic and network I/O.

/// File name of a project manifest.
pub const MANIFEST_FILE: &str = "Buildenv.toml";

/// File name of the lockfile written next to the manifest.
pub const LOCKFILE_FILE: &str = "Buildenv.lock";

pub mod config;
pub mod dependency;
pub mod lockfile;
pub mod manifest;
pub mod properties;
pub mod toolchain;
