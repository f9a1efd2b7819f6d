//! Failures a resolution can end in. Every variant is terminal for the call.

use std::fmt;
use std::path::PathBuf;

use buildenv_core::dependency::Coordinate;
use buildenv_core::toolchain::ToolchainVersion;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ResolveError {
    /// The manifest pins a toolchain outside the configured allow-list.
    #[error("Toolchain version {version} is not supported (supported: {})", list(.supported))]
    #[diagnostic(
        code(buildenv::unsupported_toolchain),
        help("Pin one of the supported versions in [toolchain], or extend `supported-toolchains`")
    )]
    UnsupportedToolchain {
        version: ToolchainVersion,
        supported: Vec<ToolchainVersion>,
    },

    /// No repository source can supply a registry dependency.
    #[error("No repository source can supply {coordinate}{}", requested_suffix(.requested, .searched))]
    #[diagnostic(
        code(buildenv::unresolved_dependency),
        help("Declare the source under `repositories`, or add it to `default-repositories`")
    )]
    UnresolvedDependency {
        coordinate: Coordinate,
        /// Source the declaration asked for, if any.
        requested: Option<String>,
        /// Every source that was considered, manifest sources first.
        searched: Vec<String>,
    },

    /// A local file dependency is absent or cannot be read.
    #[error("Local artifact {} {reason}", .path.display())]
    #[diagnostic(code(buildenv::missing_local_artifact))]
    MissingLocalArtifact { path: PathBuf, reason: MissingReason },
}

/// Why a local artifact failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    NotFound,
    Unreadable,
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("does not exist"),
            Self::Unreadable => f.write_str("is not readable"),
        }
    }
}

fn list(versions: &[ToolchainVersion]) -> String {
    if versions.is_empty() {
        return "none".to_string();
    }
    versions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn requested_suffix(requested: &Option<String>, searched: &[String]) -> String {
    match (requested, searched.is_empty()) {
        (Some(source), _) => format!(": source '{source}' is not declared"),
        (None, true) => ": no repository sources are declared".to_string(),
        (None, false) => format!(" (searched {})", searched.join(", ")),
    }
}
