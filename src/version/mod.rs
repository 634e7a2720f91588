//! Version management layer
//! - semver.rs: Runner version parsing and comparison
//! - types.rs: ReleaseSet of published releases
//! - error.rs: Fetch errors
//! - registry.rs: ReleaseSource trait definition
//! - registries/: ReleaseSource implementations
//! - cache.rs: TTL-bounded ReleaseCatalog

pub mod cache;
pub mod error;
pub mod registries;
pub mod registry;
pub mod semver;
pub mod types;
