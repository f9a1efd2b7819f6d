use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use buildenv_util::errors::BuildEnvError;
use serde::{Deserialize, Serialize};

use crate::toolchain::ToolchainVersion;

/// Environment variable overriding the buildenv data directory.
pub const HOME_ENV: &str = "BUILDENV_HOME";

/// Resolver configuration, usually loaded from `~/.buildenv/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Allow-list of toolchain versions. Unset means permissive: whatever
    /// version a manifest declares is accepted.
    #[serde(
        default,
        rename = "supported-toolchains",
        skip_serializing_if = "Option::is_none"
    )]
    pub supported_toolchain_versions: Option<BTreeSet<ToolchainVersion>>,

    /// Sources consulted when a manifest's own repositories cannot supply a
    /// registry dependency, in order.
    #[serde(default, rename = "default-repositories")]
    pub default_repository_sources: Vec<String>,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_supported_toolchains(
        mut self,
        versions: impl IntoIterator<Item = ToolchainVersion>,
    ) -> Self {
        self.supported_toolchain_versions = Some(versions.into_iter().collect());
        self
    }

    pub fn with_default_sources<S: Into<String>>(
        mut self,
        sources: impl IntoIterator<Item = S>,
    ) -> Self {
        self.default_repository_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `version` passes the allow-list.
    pub fn supports(&self, version: ToolchainVersion) -> bool {
        self.supported_toolchain_versions
            .as_ref()
            .map_or(true, |allowed| allowed.contains(&version))
    }

    /// Load from the default location, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| BuildEnvError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            BuildEnvError::Config {
                message: format!("Failed to parse resolver config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the buildenv data directory: `$BUILDENV_HOME`, else `~/.buildenv/`.
pub fn dirs_path() -> PathBuf {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".buildenv")
}
