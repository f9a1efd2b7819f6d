use std::path::Path;

use buildenv_util::errors::BuildEnvError;
use serde::{Deserialize, Serialize};

use crate::dependency::{DependencyDeclaration, DependencySpec};
use crate::toolchain::ToolchainVersion;

/// A build manifest: the pinned toolchain, where registry dependencies come
/// from, and the ordered dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectMetadata>,
    pub toolchain_version: ToolchainVersion,
    pub repository_sources: Vec<String>,
    pub dependencies: Vec<DependencyDeclaration>,
}

/// Project identity from the optional `[project]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// On-disk shape of `Buildenv.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    repositories: Vec<String>,
    #[serde(default)]
    dependencies: Vec<DependencySpec>,
    #[serde(default)]
    project: Option<ProjectMetadata>,
    toolchain: ToolchainSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToolchainSection {
    version: ToolchainVersion,
}

impl Manifest {
    pub fn new(
        toolchain_version: ToolchainVersion,
        repository_sources: Vec<String>,
        dependencies: Vec<DependencyDeclaration>,
    ) -> Self {
        Self {
            project: None,
            toolchain_version,
            repository_sources,
            dependencies,
        }
    }

    /// Load and parse a `Buildenv.toml` file from the given path.
    ///
    /// Before parsing, `${env:VAR}` references in the manifest content are
    /// resolved using `.buildenv.env` (if present alongside the manifest) and
    /// process environment variables.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BuildEnvError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let env_vars = crate::properties::load_env_file(&dir.join(crate::properties::ENV_FILE))?;
        let resolved = crate::properties::interpolate(&content, &env_vars);

        Self::parse_toml(&resolved)
    }

    /// Parse a `Buildenv.toml` from a string (no interpolation).
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        let file: ManifestFile = toml::from_str(content).map_err(|e| BuildEnvError::Manifest {
            message: format!("Failed to parse Buildenv.toml: {e}"),
        })?;

        let mut repository_sources = Vec::with_capacity(file.repositories.len());
        for source in file.repositories {
            let source = source.trim();
            if source.is_empty() {
                return Err(BuildEnvError::Manifest {
                    message: "repository source names must not be empty".to_string(),
                }
                .into());
            }
            repository_sources.push(source.to_string());
        }

        let mut dependencies = Vec::with_capacity(file.dependencies.len());
        for (index, spec) in file.dependencies.into_iter().enumerate() {
            let expanded = spec
                .into_declarations()
                .map_err(|message| BuildEnvError::Manifest {
                    message: format!("dependencies[{index}]: {message}"),
                })?;
            dependencies.extend(expanded);
        }

        Ok(Self {
            project: file.project,
            toolchain_version: file.toolchain.version,
            repository_sources,
            dependencies,
        })
    }
}
