//! History loading error types.

use std::path::PathBuf;

/// Errors from loading the historical snapshot corpus.
///
/// Both variants are fatal and user-visible: the data directory needs
/// fixing. An empty suggestion result is deliberately *not* an error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HistoryError {
    /// No snapshot files at all under the data directory.
    #[error(
        "no snapshot files found under {}: point the data directory at the corpus (e.g. .../data)",
        .dir.display()
    )]
    NoDataFound { dir: PathBuf },

    /// Snapshot files exist, but none carries the required columns.
    #[error(
        "found {files} snapshot file(s) under {}, but none with the required departure_from/departure_to columns",
        .dir.display()
    )]
    SchemaMismatch { dir: PathBuf, files: usize },
}
