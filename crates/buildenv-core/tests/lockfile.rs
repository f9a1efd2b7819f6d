use std::path::PathBuf;

use buildenv_core::lockfile::{LockedPackage, Lockfile, LOCKFILE_VERSION};
use buildenv_core::toolchain::ToolchainVersion;
use tempfile::TempDir;

fn java21() -> ToolchainVersion {
    ToolchainVersion::new(21).unwrap()
}

fn sample() -> Lockfile {
    Lockfile::generate(
        java21(),
        "abc123".to_string(),
        vec![
            LockedPackage::Registry {
                group: "com.google.code.gson".to_string(),
                name: "gson".to_string(),
                version: "2.11.0".to_string(),
                source: "mavenCentral".to_string(),
            },
            LockedPackage::LocalFile {
                path: PathBuf::from("libraries/schliph-1.0.2.jar"),
                checksum: Some("deadbeef".to_string()),
            },
        ],
    )
}

#[test]
fn round_trip_serialize_deserialize() {
    let lockfile = sample();
    let serialized = lockfile.to_string_pretty().unwrap();
    let deserialized: Lockfile = toml::from_str(&serialized).unwrap();
    assert_eq!(deserialized, lockfile);
}

#[test]
fn lockfile_empty_packages_serializes_deserializes() {
    let lockfile = Lockfile::generate(java21(), "x".to_string(), vec![]);
    let serialized = lockfile.to_string_pretty().unwrap();
    let deserialized: Lockfile = toml::from_str(&serialized).unwrap();
    assert!(deserialized.package.is_empty());
    assert_eq!(deserialized.version, LOCKFILE_VERSION);
}

#[test]
fn write_then_read_back() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Buildenv.lock");
    let lockfile = sample();
    lockfile.write_to(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# This file is generated by buildenv"));
    assert_eq!(Lockfile::from_path(&path).unwrap(), lockfile);
}

#[test]
fn unsupported_version_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Buildenv.lock");
    std::fs::write(&path, "version = 99\ntoolchain = 21\nfingerprint = \"x\"\n").unwrap();
    let err = Lockfile::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported lockfile version"));
}

#[test]
fn zero_toolchain_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Buildenv.lock");
    std::fs::write(&path, "version = 1\ntoolchain = 0\nfingerprint = \"x\"\n").unwrap();
    let err = Lockfile::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"), "got: {err}");
}
