pub mod advisor;
pub mod config;
pub mod log;
pub mod version;

pub use advisor::{Suggestions, UpgradeAdvisor, UpgradeStatus};
pub use config::AdvisorConfig;
pub use version::cache::ReleaseCatalog;
pub use version::registries::HttpReleaseSource;
pub use version::registry::ReleaseSource;
pub use version::semver::{Version, VersionLine};
pub use version::types::ReleaseSet;
