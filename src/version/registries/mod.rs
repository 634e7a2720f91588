//! Release source implementations for fetching runner release names

pub mod releases_api;

pub use releases_api::HttpReleaseSource;
