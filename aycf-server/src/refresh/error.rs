//! Refresh error types.

/// Errors from the dataset refresh job.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// Downloading the upstream archive failed.
    #[error("failed to download upstream archive: {0}")]
    Download(#[from] reqwest::Error),

    /// The downloaded archive could not be unpacked.
    #[error("failed to unpack upstream archive: {0}")]
    Unpack(String),

    /// The archive unpacked, but no data directory with snapshot files was
    /// found inside it.
    #[error("upstream archive contains no data directory with snapshot files")]
    NoDataInArchive,

    /// Filesystem operation failed while swapping the cache.
    #[error("filesystem error during refresh: {0}")]
    Io(#[from] std::io::Error),
}
