//! Manifest resolution engine: turns a [`Manifest`](buildenv_core::manifest::Manifest)
//! into an immutable [`ResolvedEnvironment`].
//!
//! Resolution is a pure function of the manifest, the injected
//! [`ResolverConfig`](buildenv_core::config::ResolverConfig), and answers
//! from the [`FileSystem`](buildenv_util::fs::FileSystem) collaborator. It
//! performs no network access and does not log.

pub mod conflict;
pub mod error;
pub mod resolver;
pub mod version;

pub use conflict::{ConflictReport, VersionConflict};
pub use error::{MissingReason, ResolveError};
pub use resolver::{Resolution, ResolvedDependency, ResolvedEnvironment, Resolver};
