use std::fs;
use std::path::Path;

use buildenv_core::dependency::{Coordinate, DependencyDeclaration};
use buildenv_core::manifest::Manifest;
use tempfile::TempDir;

const LAUNCHER_TOML: &str = r#"
repositories = ["mavenCentral"]
dependencies = [
    "com.google.code.gson:gson:2.11.0",
    { files = ["libraries/com/github/hdvtdev/schliph/1.0.2/schliph-1.0.2.jar"] },
]

[project]
name = "hclauncher"
group = "com.github.hdvtdev"
version = "1.0-SNAPSHOT"

[toolchain]
version = 21
"#;

#[test]
fn test_parse_launcher_manifest() {
    let manifest = Manifest::parse_toml(LAUNCHER_TOML).unwrap();
    assert_eq!(manifest.toolchain_version.get(), 21);
    assert_eq!(manifest.repository_sources, vec!["mavenCentral"]);
    assert_eq!(manifest.dependencies.len(), 2);
    assert_eq!(
        manifest.dependencies[0],
        DependencyDeclaration::registry(Coordinate::parse("com.google.code.gson:gson:2.11.0").unwrap())
    );
    assert_eq!(
        manifest.dependencies[1].as_local(),
        Some(Path::new(
            "libraries/com/github/hdvtdev/schliph/1.0.2/schliph-1.0.2.jar"
        ))
    );
    let project = manifest.project.unwrap();
    assert_eq!(project.group.as_deref(), Some("com.github.hdvtdev"));
    assert_eq!(project.version.as_deref(), Some("1.0-SNAPSHOT"));
}

#[test]
fn test_parse_minimal_manifest() {
    let manifest = Manifest::parse_toml("[toolchain]\nversion = 17\n").unwrap();
    assert_eq!(manifest.toolchain_version.get(), 17);
    assert!(manifest.repository_sources.is_empty());
    assert!(manifest.dependencies.is_empty());
    assert!(manifest.project.is_none());
}

#[test]
fn test_parse_all_dependency_forms_in_order() {
    let toml = r#"
repositories = ["mavenCentral", "google"]
dependencies = [
    { coordinates = "org.example:a:1.0", source = "google" },
    { group = "org.example", artifact = "b", version = "2.0" },
    { file = "libs/c.jar" },
    { files = ["libs/d.jar", "libs/e.jar"] },
    "org.example:f:3.0",
]

[toolchain]
version = 21
"#;
    let manifest = Manifest::parse_toml(toml).unwrap();
    let rendered: Vec<String> = manifest.dependencies.iter().map(|d| d.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "org.example:a:1.0 (from google)",
            "org.example:b:2.0",
            "file libs/c.jar",
            "file libs/d.jar",
            "file libs/e.jar",
            "org.example:f:3.0",
        ]
    );
}

#[test]
fn test_parse_missing_toolchain_fails() {
    assert!(Manifest::parse_toml("repositories = [\"mavenCentral\"]\n").is_err());
}

#[test]
fn test_parse_zero_toolchain_fails() {
    assert!(Manifest::parse_toml("[toolchain]\nversion = 0\n").is_err());
}

#[test]
fn test_parse_empty_string_fails() {
    assert!(Manifest::parse_toml("").is_err());
}

#[test]
fn test_parse_empty_detailed_part_fails() {
    let toml = r#"
dependencies = [{ group = "org.example", artifact = "", version = "1.0" }]

[toolchain]
version = 21
"#;
    let err = Manifest::parse_toml(toml).unwrap_err();
    assert!(err.to_string().contains("dependencies[0]"), "got: {err}");
}

#[test]
fn test_parse_unknown_dependency_table_fails() {
    let toml = r#"
dependencies = [{ jar = "x.jar" }]

[toolchain]
version = 21
"#;
    assert!(Manifest::parse_toml(toml).is_err());
}

#[test]
fn test_parse_blank_repository_fails() {
    let toml = "repositories = [\" \"]\n[toolchain]\nversion = 21\n";
    assert!(Manifest::parse_toml(toml).is_err());
}

#[test]
fn test_from_path_resolves_env_references() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("Buildenv.toml"),
        r#"
repositories = ["${env:BUILDENV_TEST_REPO}"]

[toolchain]
version = 21
"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join(".buildenv.env"),
        "BUILDENV_TEST_REPO=internalNexus\n",
    )
    .unwrap();

    let manifest = Manifest::from_path(&tmp.path().join("Buildenv.toml")).unwrap();
    assert_eq!(manifest.repository_sources, vec!["internalNexus"]);
}

#[test]
fn test_from_path_without_env_file_still_works() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Buildenv.toml"), LAUNCHER_TOML).unwrap();
    assert!(Manifest::from_path(&tmp.path().join("Buildenv.toml")).is_ok());
}

#[test]
fn test_from_path_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    let err = Manifest::from_path(&tmp.path().join("Buildenv.toml")).unwrap_err();
    assert!(err.to_string().contains("Manifest error"));
}
