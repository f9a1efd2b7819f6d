use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Maven coordinates: `group:artifact:version`, every part non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl Coordinate {
    /// Build coordinates from parts. Returns `None` if any part is blank.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Option<Self> {
        let coord = Self {
            group: group.into().trim().to_string(),
            artifact: artifact.into().trim().to_string(),
            version: version.into().trim().to_string(),
        };
        if coord.group.is_empty() || coord.artifact.is_empty() || coord.version.is_empty() {
            return None;
        }
        Some(coord)
    }

    /// Parse `"group:artifact:version"` into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version] => Self::new(*group, *artifact, *version),
            _ => None,
        }
    }

    /// The `group:artifact` identity two coordinates collide on.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// A dependency fetched from a named repository source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistryDependency {
    pub coordinate: Coordinate,
    /// Repository the dependency must come from. `None` lets the resolver
    /// pick the first available source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A dependency supplied as a file on disk (typically a prebuilt JAR).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalFileDependency {
    pub path: PathBuf,
}

/// One entry of a manifest's dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DependencyDeclaration {
    Registry(RegistryDependency),
    LocalFile(LocalFileDependency),
}

impl DependencyDeclaration {
    pub fn registry(coordinate: Coordinate) -> Self {
        Self::Registry(RegistryDependency {
            coordinate,
            source: None,
        })
    }

    pub fn registry_from(coordinate: Coordinate, source: impl Into<String>) -> Self {
        Self::Registry(RegistryDependency {
            coordinate,
            source: Some(source.into()),
        })
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::LocalFile(LocalFileDependency { path: path.into() })
    }

    pub fn as_local(&self) -> Option<&Path> {
        match self {
            Self::LocalFile(dep) => Some(&dep.path),
            Self::Registry(_) => None,
        }
    }
}

impl fmt::Display for DependencyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(dep) => match &dep.source {
                Some(source) => write!(f, "{} (from {source})", dep.coordinate),
                None => write!(f, "{}", dep.coordinate),
            },
            Self::LocalFile(dep) => write!(f, "file {}", dep.path.display()),
        }
    }
}

/// A dependency entry as written in `Buildenv.toml`.
///
/// Supports the shorthand string form (coordinates or a file path) and the
/// table forms below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencySpec {
    Short(String),
    Coordinates(CoordinatesSpec),
    Detailed(DetailedSpec),
    File(FileSpec),
    Files(FilesSpec),
}

/// `{ coordinates = "g:a:v", source = "google" }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoordinatesSpec {
    pub coordinates: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// `{ group = "g", artifact = "a", version = "v" }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedSpec {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// `{ file = "libs/a.jar" }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSpec {
    pub file: PathBuf,
}

/// `{ files = ["libs/a.jar", "libs/b.jar"] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesSpec {
    pub files: Vec<PathBuf>,
}

impl DependencySpec {
    /// Expand into declarations, preserving order.
    ///
    /// A `files` table yields one declaration per path; every other form
    /// yields exactly one.
    pub fn into_declarations(self) -> Result<Vec<DependencyDeclaration>, String> {
        match self {
            Self::Short(s) => classify_short(&s).map(|d| vec![d]),
            Self::Coordinates(spec) => {
                let coordinate = Coordinate::parse(&spec.coordinates).ok_or_else(|| {
                    format!(
                        "invalid coordinates '{}': expected group:artifact:version",
                        spec.coordinates
                    )
                })?;
                registry_with(coordinate, spec.source).map(|d| vec![d])
            }
            Self::Detailed(spec) => {
                let coordinate = Coordinate::new(&spec.group, &spec.artifact, &spec.version)
                    .ok_or_else(|| {
                        format!(
                            "group, artifact and version must be non-empty (got '{}:{}:{}')",
                            spec.group, spec.artifact, spec.version
                        )
                    })?;
                registry_with(coordinate, spec.source).map(|d| vec![d])
            }
            Self::File(spec) => local_path(spec.file).map(|d| vec![d]),
            Self::Files(spec) => spec.files.into_iter().map(local_path).collect(),
        }
    }
}

fn classify_short(s: &str) -> Result<DependencyDeclaration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("dependency entry must not be empty".to_string());
    }
    let looks_like_path = s.contains('/') || s.contains('\\');
    if s.contains(':') && !looks_like_path {
        return Coordinate::parse(s)
            .map(DependencyDeclaration::registry)
            .ok_or_else(|| {
                format!("invalid coordinates '{s}': expected group:artifact:version")
            });
    }
    Ok(DependencyDeclaration::local(s))
}

fn registry_with(
    coordinate: Coordinate,
    source: Option<String>,
) -> Result<DependencyDeclaration, String> {
    match source.map(|s| s.trim().to_string()) {
        Some(s) if s.is_empty() => Err(format!("empty source for {coordinate}")),
        Some(s) => Ok(DependencyDeclaration::registry_from(coordinate, s)),
        None => Ok(DependencyDeclaration::registry(coordinate)),
    }
}

fn local_path(path: PathBuf) -> Result<DependencyDeclaration, String> {
    if path.as_os_str().is_empty() {
        return Err("local file dependency must have a non-empty path".to_string());
    }
    Ok(DependencyDeclaration::local(path))
}
