use std::path::{Path, PathBuf};

/// Read-only view of the filesystem used to validate local artifacts.
///
/// The resolver never touches the disk itself; it asks an implementation of
/// this trait instead, so tests can substitute an in-memory fake.
pub trait FileSystem: Send + Sync {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` can be opened for reading by the current process.
    fn is_readable(&self, path: &Path) -> bool;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_readable(&self, path: &Path) -> bool {
        (**self).is_readable(path)
    }
}

/// [`FileSystem`] backed by `std::fs`.
///
/// Relative paths are joined onto `base` when one is set, so a manifest's
/// local dependencies resolve against the manifest directory rather than the
/// process working directory.
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem {
    base: Option<PathBuf>,
}

impl StdFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// A filesystem view whose relative paths are anchored at `base`.
    pub fn rooted_at(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    /// The on-disk location `path` refers to.
    pub fn locate(&self, path: &Path) -> PathBuf {
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.locate(path).exists()
    }

    fn is_readable(&self, path: &Path) -> bool {
        let full = self.locate(path);
        if full.is_dir() {
            std::fs::read_dir(&full).is_ok()
        } else {
            std::fs::File::open(&full).is_ok()
        }
    }
}

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}
