//! Upgrade advice for runners
//! - suggestion.rs: UpgradeStatus and the ordered Suggestions mapping
//! - checker.rs: UpgradeAdvisor decision engine

pub mod checker;
pub mod suggestion;

pub use checker::{DEFAULT_BACKPORT_WINDOW, UpgradeAdvisor};
pub use suggestion::{Suggestions, UpgradeStatus};
