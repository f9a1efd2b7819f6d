//! Manifest resolution: toolchain check, source selection, local artifact
//! validation, and highest-version-wins deduplication.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use buildenv_core::config::ResolverConfig;
use buildenv_core::dependency::{
    Coordinate, DependencyDeclaration, LocalFileDependency, RegistryDependency,
};
use buildenv_core::manifest::Manifest;
use buildenv_core::toolchain::ToolchainVersion;
use buildenv_util::fs::FileSystem;
use buildenv_util::hash::sha256_bytes;
use serde::{Deserialize, Serialize};

use crate::conflict::{ConflictReport, VersionConflict};
use crate::error::{MissingReason, ResolveError};
use crate::version::MavenVersion;

/// Resolves manifests against a fixed configuration.
///
/// Holds no per-call state, so one resolver can serve any number of
/// concurrent [`resolve`](Self::resolve) calls.
#[derive(Debug, Clone)]
pub struct Resolver<F> {
    config: ResolverConfig,
    fs: F,
}

/// A validated, deduplicated build environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEnvironment {
    toolchain_version: ToolchainVersion,
    resolved_dependencies: Vec<ResolvedDependency>,
}

/// One entry of a [`ResolvedEnvironment`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResolvedDependency {
    /// A registry artifact pinned to the source it will be fetched from.
    Registry { coordinate: Coordinate, source: String },
    LocalFile { path: PathBuf },
}

/// The environment together with the collisions settled to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub environment: ResolvedEnvironment,
    pub conflicts: ConflictReport,
}

/// Working entry while walking the declarations.
enum Slot {
    Registry {
        coordinate: Coordinate,
        version: MavenVersion,
        source: String,
    },
    Local(PathBuf),
}

impl<F: FileSystem> Resolver<F> {
    pub fn new(config: ResolverConfig, fs: F) -> Self {
        Self { config, fs }
    }

    /// Resolve `manifest` into an environment.
    pub fn resolve(&self, manifest: Manifest) -> Result<ResolvedEnvironment, ResolveError> {
        self.resolve_with_report(manifest).map(|r| r.environment)
    }

    /// Resolve `manifest`, also returning the version collisions settled on the way.
    ///
    /// Declarations are validated in manifest order and the first failure
    /// aborts the call.
    pub fn resolve_with_report(&self, manifest: Manifest) -> Result<Resolution, ResolveError> {
        let Manifest {
            toolchain_version,
            repository_sources,
            dependencies,
            ..
        } = manifest;

        self.check_toolchain(toolchain_version)?;

        let mut slots: Vec<Slot> = Vec::with_capacity(dependencies.len());
        let mut by_key: HashMap<String, usize> = HashMap::new();
        let mut seen_paths: HashSet<PathBuf> = HashSet::new();
        let mut conflicts = ConflictReport::new();

        for declaration in dependencies {
            match declaration {
                DependencyDeclaration::Registry(dep) => {
                    let source = self.select_source(&dep, &repository_sources)?;
                    let RegistryDependency { coordinate, .. } = dep;
                    let version = MavenVersion::parse(&coordinate.version);

                    if let Some(&index) = by_key.get(&coordinate.key()) {
                        if let Slot::Registry {
                            coordinate: kept,
                            version: kept_version,
                            source: kept_source,
                        } = &mut slots[index]
                        {
                            settle(
                                &mut conflicts,
                                (kept, kept_version, kept_source),
                                (coordinate, version, source),
                            );
                        }
                        continue;
                    }

                    by_key.insert(coordinate.key(), slots.len());
                    slots.push(Slot::Registry {
                        coordinate,
                        version,
                        source,
                    });
                }
                DependencyDeclaration::LocalFile(LocalFileDependency { path }) => {
                    self.check_local(&path)?;
                    if seen_paths.insert(path.clone()) {
                        slots.push(Slot::Local(path));
                    }
                }
            }
        }

        let resolved_dependencies = slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Registry {
                    coordinate, source, ..
                } => ResolvedDependency::Registry { coordinate, source },
                Slot::Local(path) => ResolvedDependency::LocalFile { path },
            })
            .collect();

        Ok(Resolution {
            environment: ResolvedEnvironment {
                toolchain_version,
                resolved_dependencies,
            },
            conflicts,
        })
    }

    fn check_toolchain(&self, version: ToolchainVersion) -> Result<(), ResolveError> {
        if self.config.supports(version) {
            return Ok(());
        }
        Err(ResolveError::UnsupportedToolchain {
            version,
            supported: self
                .config
                .supported_toolchain_versions
                .iter()
                .flatten()
                .copied()
                .collect(),
        })
    }

    /// Pick the source a registry dependency will be fetched from.
    ///
    /// An explicit source must be declared by the manifest or the configured
    /// defaults. Otherwise the first manifest source is used, then the first
    /// default.
    fn select_source(
        &self,
        dep: &RegistryDependency,
        manifest_sources: &[String],
    ) -> Result<String, ResolveError> {
        let defaults = &self.config.default_repository_sources;
        let mut candidates = manifest_sources.iter().chain(defaults.iter());

        let chosen = match &dep.source {
            Some(wanted) => candidates.find(|s| *s == wanted),
            None => candidates.next(),
        };

        chosen.cloned().ok_or_else(|| ResolveError::UnresolvedDependency {
            coordinate: dep.coordinate.clone(),
            requested: dep.source.clone(),
            searched: manifest_sources.iter().chain(defaults.iter()).cloned().collect(),
        })
    }

    fn check_local(&self, path: &Path) -> Result<(), ResolveError> {
        let reason = if !self.fs.exists(path) {
            MissingReason::NotFound
        } else if !self.fs.is_readable(path) {
            MissingReason::Unreadable
        } else {
            return Ok(());
        };
        Err(ResolveError::MissingLocalArtifact {
            path: path.to_path_buf(),
            reason,
        })
    }
}

/// Keep the higher of two colliding declarations in the first one's slot.
/// On equal versions the earlier declaration wins.
fn settle(
    conflicts: &mut ConflictReport,
    kept: (&mut Coordinate, &mut MavenVersion, &mut String),
    incoming: (Coordinate, MavenVersion, String),
) {
    let (kept_coord, kept_version, kept_source) = kept;
    let (coord, version, source) = incoming;

    if kept_coord.version == coord.version {
        return;
    }

    let discarded = if version > *kept_version {
        let old = std::mem::replace(&mut kept_coord.version, coord.version);
        *kept_version = version;
        *kept_source = source;
        old
    } else {
        coord.version
    };

    conflicts.add(VersionConflict {
        group: kept_coord.group.clone(),
        artifact: kept_coord.artifact.clone(),
        kept: kept_coord.version.clone(),
        discarded,
    });
}

impl ResolvedEnvironment {
    pub fn toolchain_version(&self) -> ToolchainVersion {
        self.toolchain_version
    }

    pub fn resolved_dependencies(&self) -> &[ResolvedDependency] {
        &self.resolved_dependencies
    }

    pub fn len(&self) -> usize {
        self.resolved_dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved_dependencies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedDependency> {
        self.resolved_dependencies.iter()
    }

    /// Registry coordinates, in resolved order.
    pub fn coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.iter().filter_map(|d| match d {
            ResolvedDependency::Registry { coordinate, .. } => Some(coordinate),
            ResolvedDependency::LocalFile { .. } => None,
        })
    }

    /// Local artifact paths, in resolved order.
    pub fn local_paths(&self) -> impl Iterator<Item = &Path> {
        self.iter().filter_map(|d| match d {
            ResolvedDependency::LocalFile { path } => Some(path.as_path()),
            ResolvedDependency::Registry { .. } => None,
        })
    }

    /// SHA-256 over a canonical line-per-entry rendering.
    ///
    /// Equal environments always produce equal fingerprints.
    pub fn fingerprint(&self) -> String {
        let mut canonical = format!("toolchain {}\n", self.toolchain_version);
        for dep in &self.resolved_dependencies {
            let line = match dep {
                ResolvedDependency::Registry { coordinate, source } => {
                    format!("registry {coordinate} {source}\n")
                }
                ResolvedDependency::LocalFile { path } => {
                    format!("file {}\n", path.to_string_lossy())
                }
            };
            canonical.push_str(&line);
        }
        sha256_bytes(canonical.as_bytes())
    }

    /// Pretty JSON rendering of the descriptor.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a ResolvedEnvironment {
    type Item = &'a ResolvedDependency;
    type IntoIter = std::slice::Iter<'a, ResolvedDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl ResolvedDependency {
    /// The declaration this entry pins: registry entries name their chosen source.
    pub fn to_declaration(&self) -> DependencyDeclaration {
        match self {
            Self::Registry { coordinate, source } => {
                DependencyDeclaration::registry_from(coordinate.clone(), source.clone())
            }
            Self::LocalFile { path } => DependencyDeclaration::local(path.clone()),
        }
    }
}

impl std::fmt::Display for ResolvedDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry { coordinate, source } => write!(f, "{coordinate} @ {source}"),
            Self::LocalFile { path } => write!(f, "{}", path.display()),
        }
    }
}
