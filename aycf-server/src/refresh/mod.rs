//! Periodic dataset refresh.
//!
//! The historical corpus lives in an upstream Git repository published as a
//! zip archive. This module keeps a local cache of its `data/` directory,
//! guarded by a freshness stamp so the archive is only re-downloaded once
//! per interval. The scoring core never calls in here; it just reads
//! whatever directory the cache currently holds.

mod error;
mod updater;

pub use error::RefreshError;
pub use updater::{DEFAULT_UPSTREAM_ZIP, DataRefresher, RefreshConfig, RefreshOutcome};
