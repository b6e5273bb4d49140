//! Download, unpack and swap in the upstream corpus.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{info, warn};
use zip::ZipArchive;

use crate::history::snapshot_file_count;

use super::error::RefreshError;

/// Upstream archive with the scraped availability corpus.
pub const DEFAULT_UPSTREAM_ZIP: &str =
    "https://github.com/markvincevarga/wizzair-aycf-availability/archive/refs/heads/main.zip";

/// Freshness stamp file name, holding the epoch seconds of the last
/// successful update.
const STAMP_FILE: &str = "last_update.txt";

/// Temporary extraction directory under the cache root.
const TMP_EXTRACT_DIR: &str = "tmp_extract";

/// Configuration for the dataset refresh job.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Root directory owning the stamp file, temp space and `data/`.
    pub cache_root: PathBuf,

    /// Archive URL to download.
    pub upstream_zip_url: String,

    /// Minimum time between downloads.
    pub refresh_interval: Duration,

    /// HTTP timeout for the download.
    pub timeout: Duration,
}

impl RefreshConfig {
    /// Create a config with the default upstream URL and a daily interval.
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            upstream_zip_url: DEFAULT_UPSTREAM_ZIP.to_string(),
            refresh_interval: Duration::from_secs(24 * 60 * 60),
            timeout: Duration::from_secs(60),
        }
    }

    /// Override the upstream archive URL.
    pub fn with_upstream_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_zip_url = url.into();
        self
    }

    /// Override the refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

/// Outcome of one refresh attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The stamp is within the refresh interval; nothing was downloaded.
    Fresh,

    /// A new corpus was downloaded and swapped in.
    Updated,

    /// The update failed, but an existing cache remains usable.
    StaleButUsable { error: String },
}

/// Keeps the local corpus cache up to date with the upstream archive.
pub struct DataRefresher {
    config: RefreshConfig,
    http: reqwest::Client,
}

impl DataRefresher {
    pub fn new(config: RefreshConfig) -> Result<Self, RefreshError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// The directory the refreshed corpus lands in.
    pub fn data_dir(&self) -> PathBuf {
        self.config.cache_root.join("data")
    }

    /// Refresh the cache if the stamp has expired (or `force` is set).
    ///
    /// A failed update with a usable existing cache is reported as
    /// [`RefreshOutcome::StaleButUsable`] rather than an error: scoring can
    /// carry on against yesterday's corpus.
    pub async fn update_if_stale(&self, force: bool) -> Result<RefreshOutcome, RefreshError> {
        std::fs::create_dir_all(&self.config.cache_root)?;

        let last = self.read_stamp().unwrap_or(0);
        let now = epoch_secs();
        if !force && now.saturating_sub(last) < self.config.refresh_interval.as_secs() {
            return Ok(RefreshOutcome::Fresh);
        }

        match self.download_and_swap(now).await {
            Ok(()) => {
                info!(data_dir = %self.data_dir().display(), "refreshed corpus from upstream");
                Ok(RefreshOutcome::Updated)
            }
            Err(err) => {
                if self.has_usable_cache() {
                    warn!(error = %err, "refresh failed, keeping existing corpus");
                    Ok(RefreshOutcome::StaleButUsable {
                        error: err.to_string(),
                    })
                } else {
                    Err(err)
                }
            }
        }
    }

    async fn download_and_swap(&self, now: u64) -> Result<(), RefreshError> {
        let response = self
            .http
            .get(&self.config.upstream_zip_url)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;

        let tmp = self.config.cache_root.join(TMP_EXTRACT_DIR);
        if tmp.exists() {
            std::fs::remove_dir_all(&tmp)?;
        }
        std::fs::create_dir_all(&tmp)?;

        let mut archive = ZipArchive::new(Cursor::new(bytes.as_ref()))
            .map_err(|e| RefreshError::Unpack(e.to_string()))?;
        archive
            .extract(&tmp)
            .map_err(|e| RefreshError::Unpack(e.to_string()))?;

        let source = locate_data_dir(&tmp)?;

        let destination = self.data_dir();
        if destination.exists() {
            std::fs::remove_dir_all(&destination)?;
        }
        std::fs::rename(&source, &destination)?;

        self.write_stamp(now)?;
        let _ = std::fs::remove_dir_all(&tmp);

        Ok(())
    }

    fn has_usable_cache(&self) -> bool {
        snapshot_file_count(&self.data_dir()) > 0
    }

    fn read_stamp(&self) -> Option<u64> {
        let raw = std::fs::read_to_string(self.config.cache_root.join(STAMP_FILE)).ok()?;
        raw.trim().parse().ok()
    }

    fn write_stamp(&self, epoch: u64) -> Result<(), RefreshError> {
        std::fs::write(
            self.config.cache_root.join(STAMP_FILE),
            epoch.to_string(),
        )?;
        Ok(())
    }
}

/// Pick the extracted `data` directory holding the most snapshot files.
///
/// The upstream archive nests everything under a `<repo>-<branch>/` prefix
/// and may contain several `data` directories; the one with the most CSV
/// runs is the corpus.
fn locate_data_dir(extract_root: &Path) -> Result<PathBuf, RefreshError> {
    let mut best: Option<(PathBuf, usize)> = None;
    visit_data_dirs(extract_root, &mut |candidate| {
        let count = direct_csv_count(candidate);
        if count > 0 && best.as_ref().is_none_or(|(_, best_count)| count > *best_count) {
            best = Some((candidate.to_path_buf(), count));
        }
    });

    best.map(|(path, _)| path).ok_or(RefreshError::NoDataInArchive)
}

fn visit_data_dirs(dir: &Path, visit: &mut impl FnMut(&Path)) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.file_name().is_some_and(|name| name == "data") {
            visit(&path);
        }
        visit_data_dirs(&path, visit);
    }
}

fn direct_csv_count(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|entry| {
            let path = entry.path();
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .count()
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
