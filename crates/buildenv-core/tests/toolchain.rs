use std::str::FromStr;

use buildenv_core::toolchain::{ToolchainVersion, ToolchainVersionError};

#[test]
fn new_rejects_zero() {
    assert!(ToolchainVersion::new(0).is_none());
    assert_eq!(ToolchainVersion::new(21).unwrap().get(), 21);
}

#[test]
fn parse_valid_version() {
    let v = ToolchainVersion::from_str("21").unwrap();
    assert_eq!(v.get(), 21);
    assert_eq!(v.to_string(), "21");
}

#[test]
fn parse_invalid_version() {
    assert_eq!(
        ToolchainVersion::from_str("0"),
        Err(ToolchainVersionError::Zero)
    );
    assert!(matches!(
        ToolchainVersion::from_str("21.0"),
        Err(ToolchainVersionError::NotANumber(_))
    ));
    assert!(ToolchainVersion::from_str("").is_err());
    assert!(ToolchainVersion::from_str("-1").is_err());
}

#[test]
fn version_ordering() {
    let v17 = ToolchainVersion::new(17).unwrap();
    let v21 = ToolchainVersion::new(21).unwrap();
    assert!(v17 < v21);
}
