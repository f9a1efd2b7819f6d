use std::path::{Path, PathBuf};

use buildenv_util::errors::BuildEnvError;
use serde::{Deserialize, Serialize};

use crate::toolchain::ToolchainVersion;

/// Current lockfile format revision.
pub const LOCKFILE_VERSION: u32 = 1;

/// Deterministic record of a resolved environment, written as `Buildenv.lock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lockfile {
    pub version: u32,
    pub toolchain: ToolchainVersion,
    /// Fingerprint of the resolved environment this lockfile was generated from.
    pub fingerprint: String,
    #[serde(default)]
    pub package: Vec<LockedPackage>,
}

/// A single locked dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LockedPackage {
    Registry {
        group: String,
        name: String,
        version: String,
        source: String,
    },
    LocalFile {
        path: PathBuf,
        /// SHA-256 of the file contents at lock time.
        #[serde(default)]
        checksum: Option<String>,
    },
}

impl Lockfile {
    pub fn generate(
        toolchain: ToolchainVersion,
        fingerprint: String,
        package: Vec<LockedPackage>,
    ) -> Self {
        Self {
            version: LOCKFILE_VERSION,
            toolchain,
            fingerprint,
            package,
        }
    }

    /// Load and parse a `Buildenv.lock` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BuildEnvError::Lockfile {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let lock: Self = toml::from_str(&content).map_err(|e| BuildEnvError::Lockfile {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?;
        if lock.version != LOCKFILE_VERSION {
            return Err(BuildEnvError::Lockfile {
                message: format!(
                    "Unsupported lockfile version {} (expected {LOCKFILE_VERSION})",
                    lock.version
                ),
            }
            .into());
        }
        Ok(lock)
    }

    /// Serialize the lockfile to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Write the lockfile to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> miette::Result<()> {
        let body = self.to_string_pretty().map_err(|e| BuildEnvError::Lockfile {
            message: format!("Failed to serialize lockfile: {e}"),
        })?;
        let content = format!("# This file is generated by buildenv. Do not edit.\n{body}");
        std::fs::write(path, content).map_err(|e| {
            BuildEnvError::Lockfile {
                message: format!("Failed to write {}: {e}", path.display()),
            }
            .into()
        })
    }
}
