//! Operation: locate a project manifest and resolve it.

use std::path::{Path, PathBuf};

use buildenv_core::config::ResolverConfig;
use buildenv_core::manifest::Manifest;
use buildenv_core::MANIFEST_FILE;
use buildenv_resolver::{Resolution, Resolver};
use buildenv_util::errors::BuildEnvError;
use buildenv_util::fs::{find_ancestor_with, StdFileSystem};

use crate::ResolveOptions;

/// A project located on disk.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory containing `Buildenv.toml`.
    pub root: PathBuf,
    pub manifest: Manifest,
}

impl Project {
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Filesystem view anchored at the project root, so relative local
    /// dependencies resolve against the manifest directory.
    pub fn filesystem(&self) -> StdFileSystem {
        StdFileSystem::rooted_at(&self.root)
    }
}

/// Find the nearest `Buildenv.toml` at or above `start` and load it.
pub fn locate_project(start: &Path) -> miette::Result<Project> {
    let root = find_ancestor_with(start, MANIFEST_FILE).ok_or_else(|| BuildEnvError::Manifest {
        message: format!(
            "No {MANIFEST_FILE} found in {} or any parent directory",
            start.display()
        ),
    })?;
    let manifest = Manifest::from_path(&root.join(MANIFEST_FILE))?;
    tracing::debug!(root = %root.display(), "loaded manifest");
    Ok(Project { root, manifest })
}

/// Load the resolver configuration named by `opts`, or the default one.
pub fn load_config(opts: &ResolveOptions) -> miette::Result<ResolverConfig> {
    let config = match &opts.config_path {
        Some(path) => ResolverConfig::load_from(path)?,
        None => ResolverConfig::load()?,
    };
    tracing::debug!(
        supported = ?config.supported_toolchain_versions,
        defaults = ?config.default_repository_sources,
        "loaded resolver config"
    );
    Ok(config)
}

/// Resolve an already-located project with `config`.
pub fn resolve(
    project: &Project,
    config: ResolverConfig,
    opts: &ResolveOptions,
) -> miette::Result<Resolution> {
    let resolver = Resolver::new(config, project.filesystem());
    let resolution = resolver.resolve_with_report(project.manifest.clone())?;

    for conflict in resolution.conflicts.iter() {
        if opts.verbose {
            tracing::warn!("{conflict}");
        } else {
            tracing::debug!("{conflict}");
        }
    }
    for dep in resolution.environment.iter() {
        tracing::debug!(%dep, "resolved");
    }
    tracing::info!(
        toolchain = %resolution.environment.toolchain_version(),
        dependencies = resolution.environment.len(),
        conflicts = resolution.conflicts.len(),
        "Resolved build environment"
    );

    Ok(resolution)
}

/// Locate the project containing `start`, load the configuration, and resolve.
pub fn resolve_project(
    start: &Path,
    opts: &ResolveOptions,
) -> miette::Result<(Project, Resolution)> {
    let project = locate_project(start)?;
    let config = load_config(opts)?;
    let resolution = resolve(&project, config, opts)?;
    Ok((project, resolution))
}
