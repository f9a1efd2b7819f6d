//! Shared utilities for buildenv.
//!
//! This crate provides cross-cutting concerns used by the other buildenv
//! crates: the unified error type, the filesystem collaborator consulted
//! when validating local artifacts, and SHA-256 hashing.

pub mod errors;
pub mod fs;
pub mod hash;
