//! Operation: resolve a project and write or check `Buildenv.lock`.

use std::path::Path;

use buildenv_core::lockfile::{LockedPackage, Lockfile};
use buildenv_core::LOCKFILE_FILE;
use buildenv_resolver::{ResolvedDependency, ResolvedEnvironment};
use buildenv_util::errors::BuildEnvError;
use buildenv_util::fs::StdFileSystem;
use buildenv_util::hash::sha256_file;

use crate::ops_resolve::resolve_project;
use crate::ResolveOptions;

/// Resolve the project containing `start` and regenerate its lockfile.
pub fn lock(start: &Path, opts: &ResolveOptions) -> miette::Result<Lockfile> {
    let (project, resolution) = resolve_project(start, opts)?;
    let lockfile = environment_to_lockfile(&resolution.environment, &project.filesystem())?;

    let path = project.root.join(LOCKFILE_FILE);
    lockfile.write_to(&path)?;
    tracing::info!(
        path = %path.display(),
        packages = lockfile.package.len(),
        "Wrote lockfile"
    );

    Ok(lockfile)
}

/// Whether the project's lockfile matches a fresh resolution, including
/// the current contents of local artifacts.
///
/// A missing lockfile is never current.
pub fn is_lock_current(start: &Path, opts: &ResolveOptions) -> miette::Result<bool> {
    let (project, resolution) = resolve_project(start, opts)?;
    let path = project.root.join(LOCKFILE_FILE);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no lockfile");
        return Ok(false);
    }

    let existing = Lockfile::from_path(&path)?;
    let fresh = environment_to_lockfile(&resolution.environment, &project.filesystem())?;
    let current = existing == fresh;
    if !current {
        tracing::info!(path = %path.display(), "Lockfile is out of date");
    }
    Ok(current)
}

/// Convert a resolved environment into lockfile form, checksumming each
/// local artifact as it is on disk now.
pub fn environment_to_lockfile(
    env: &ResolvedEnvironment,
    fs: &StdFileSystem,
) -> miette::Result<Lockfile> {
    let mut packages = Vec::with_capacity(env.len());
    for dep in env {
        let package = match dep {
            ResolvedDependency::Registry { coordinate, source } => LockedPackage::Registry {
                group: coordinate.group.clone(),
                name: coordinate.artifact.clone(),
                version: coordinate.version.clone(),
                source: source.clone(),
            },
            ResolvedDependency::LocalFile { path } => {
                let on_disk = fs.locate(path);
                let checksum = if on_disk.is_file() {
                    let digest = sha256_file(&on_disk).map_err(|e| BuildEnvError::Lockfile {
                        message: format!("Failed to checksum {}: {e}", on_disk.display()),
                    })?;
                    Some(digest)
                } else {
                    None
                };
                LockedPackage::LocalFile {
                    path: path.clone(),
                    checksum,
                }
            }
        };
        packages.push(package);
    }

    Ok(Lockfile::generate(
        env.toolchain_version(),
        env.fingerprint(),
        packages,
    ))
}
