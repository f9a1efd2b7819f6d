//! Toolchain version pinning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A pinned toolchain language version, e.g. `21` for Java 21.
///
/// Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ToolchainVersion(u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolchainVersionError {
    #[error("toolchain version must be a positive integer, got 0")]
    Zero,
    #[error("toolchain version must be a positive integer, got '{0}'")]
    NotANumber(String),
}

impl ToolchainVersion {
    /// Returns `None` for `0`.
    pub fn new(version: u32) -> Option<Self> {
        (version > 0).then_some(Self(version))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ToolchainVersion {
    type Error = ToolchainVersionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ToolchainVersionError::Zero)
    }
}

impl From<ToolchainVersion> for u32 {
    fn from(v: ToolchainVersion) -> Self {
        v.0
    }
}

impl FromStr for ToolchainVersion {
    type Err = ToolchainVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| ToolchainVersionError::NotANumber(s.to_string()))?;
        Self::try_from(n)
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
