use std::path::Path;

use buildenv_core::dependency::{Coordinate, DependencyDeclaration, DependencySpec};

#[test]
fn coordinate_parse_valid() {
    let coord = Coordinate::parse("com.google.code.gson:gson:2.11.0").unwrap();
    assert_eq!(coord.group, "com.google.code.gson");
    assert_eq!(coord.artifact, "gson");
    assert_eq!(coord.version, "2.11.0");
    assert_eq!(coord.key(), "com.google.code.gson:gson");
}

#[test]
fn coordinate_parse_two_parts_returns_none() {
    assert!(Coordinate::parse("group:artifact").is_none());
}

#[test]
fn coordinate_parse_empty_string() {
    assert!(Coordinate::parse("").is_none());
}

#[test]
fn coordinate_parse_four_parts_returns_none() {
    assert!(Coordinate::parse("group:artifact:version:extra").is_none());
}

#[test]
fn coordinate_parse_rejects_blank_parts() {
    assert!(Coordinate::parse("group::1.0").is_none());
    assert!(Coordinate::parse(":artifact:1.0").is_none());
    assert!(Coordinate::parse("group:artifact: ").is_none());
}

#[test]
fn coordinate_display_roundtrip() {
    let s = "com.example:my-lib:1.0.0";
    let coord = Coordinate::parse(s).unwrap();
    assert_eq!(coord.to_string(), s);
}

#[test]
fn short_string_with_colons_is_registry() {
    let decls = DependencySpec::Short("org.example:lib:1.0".to_string())
        .into_declarations()
        .unwrap();
    assert_eq!(
        decls,
        vec![DependencyDeclaration::registry(
            Coordinate::parse("org.example:lib:1.0").unwrap()
        )]
    );
}

#[test]
fn short_string_path_is_local() {
    let decls = DependencySpec::Short("libraries/schliph-1.0.2.jar".to_string())
        .into_declarations()
        .unwrap();
    assert_eq!(decls.len(), 1);
    assert_eq!(
        decls[0].as_local(),
        Some(Path::new("libraries/schliph-1.0.2.jar"))
    );
}

#[test]
fn short_bare_file_name_is_local() {
    let decls = DependencySpec::Short("lib.jar".to_string())
        .into_declarations()
        .unwrap();
    assert_eq!(decls[0].as_local(), Some(Path::new("lib.jar")));
}

#[test]
fn short_malformed_coordinates_is_error() {
    let err = DependencySpec::Short("org.example:lib".to_string())
        .into_declarations()
        .unwrap_err();
    assert!(err.contains("group:artifact:version"), "got: {err}");
}

#[test]
fn short_empty_string_is_error() {
    assert!(DependencySpec::Short("  ".to_string())
        .into_declarations()
        .is_err());
}

#[test]
fn display_forms() {
    let coord = Coordinate::parse("g:a:1").unwrap();
    assert_eq!(DependencyDeclaration::registry(coord.clone()).to_string(), "g:a:1");
    assert_eq!(
        DependencyDeclaration::registry_from(coord, "google").to_string(),
        "g:a:1 (from google)"
    );
    assert_eq!(DependencyDeclaration::local("x.jar").to_string(), "file x.jar");
}
